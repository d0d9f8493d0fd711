//! Run command - execute a YAML pipeline file.

use crate::RunArgs;
use crate::commands::pipeline::{self, Pipeline};
use crate::commands::{load_image, render_sized, save_image};
use anyhow::{Context, Result};
use sampl_core::Sampler;
use sampl_io::{BitmapOptions, RenderOptions};
use tracing::info;

pub fn run(args: RunArgs, verbose: bool) -> Result<()> {
    let pipeline = Pipeline::load(&args.pipeline)?;
    let input = args
        .input
        .or(pipeline.input)
        .context("No input: set `input` in the pipeline or pass --input")?;
    let output = args
        .output
        .or(pipeline.output)
        .context("No output: set `output` in the pipeline or pass --output")?;

    let bitmap = load_image(&input)?;
    if verbose {
        println!("Loaded: {} ({}x{})", input.display(), bitmap.width(), bitmap.height());
    }

    let options = BitmapOptions::default().with_interpolation(pipeline.interpolate);
    let step_count = pipeline.steps.len();
    let sampler = pipeline::build(sampl_io::sampler(bitmap, &options), pipeline.steps)?;
    info!(
        steps = step_count,
        width = sampler.width(),
        height = sampler.height(),
        "pipeline built"
    );

    let out = render_sized(&sampler, pipeline.width, pipeline.height, &RenderOptions::default())?;
    save_image(&output, &out)?;

    if verbose {
        println!("Saved: {} ({}x{})", output.display(), out.width(), out.height());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sampl_io::Bitmap;

    #[test]
    fn test_run_pipeline_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut bmp = Bitmap::new(2, 2);
        bmp.set_pixel(0, 0, [255, 255, 255, 255]);
        sampl_io::png::write(dir.path().join("in.png"), &bmp).unwrap();

        let yaml = "input: in.png\noutput: out.png\nwidth: 4\nheight: 4\ninterpolate: false\nsteps:\n  - op: flip_h\n";
        let pipeline_path = dir.path().join("steps.yaml");
        std::fs::write(&pipeline_path, yaml).unwrap();

        let args = RunArgs {
            pipeline: pipeline_path,
            input: None,
            output: None,
        };
        run(args, false).unwrap();

        let out = sampl_io::png::read(dir.path().join("out.png")).unwrap();
        assert_eq!((out.width(), out.height()), (4, 4));
        // The white corner moved to the top right and covers a 2x2 block.
        assert_eq!(out.pixel(3, 0), Some([255, 255, 255, 255]));
        assert_eq!(out.pixel(2, 1), Some([255, 255, 255, 255]));
        assert_eq!(out.pixel(0, 0), Some([0, 0, 0, 0]));
        assert_eq!(out.pixel(3, 2), Some([0, 0, 0, 0]));
    }

    #[test]
    fn test_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let pipeline_path = dir.path().join("steps.yaml");
        std::fs::write(&pipeline_path, "steps: []\n").unwrap();
        let args = RunArgs {
            pipeline: pipeline_path,
            input: None,
            output: None,
        };
        assert!(run(args, false).is_err());
    }
}
