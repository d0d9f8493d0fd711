//! Render command - transform an image from flags.

use crate::RenderArgs;
use crate::commands::pipeline::{self, Step};
use crate::commands::{load_image, parse_color, parse_rect, render_sized, save_image};
use anyhow::{bail, Result};
use sampl_core::{Rgba, Sampler};
use sampl_io::{BitmapOptions, RenderOptions};
use tracing::info;

/// Translates the flags into pipeline steps, in the documented order.
pub fn steps_from_args(args: &RenderArgs, oob: Rgba) -> Result<Vec<Step>> {
    let mut steps = Vec::new();

    if let Some(spec) = &args.crop {
        let r = parse_rect(spec)?;
        steps.push(Step::Crop {
            x: r.x,
            y: r.y,
            width: r.width,
            height: r.height,
        });
    }
    if args.flip_h {
        steps.push(Step::FlipH);
    }
    if args.flip_v {
        steps.push(Step::FlipV);
    }
    if let Some(dir) = &args.rotate {
        steps.push(match dir.to_ascii_lowercase().as_str() {
            "left" | "270" => Step::RotateLeft,
            "right" | "90" => Step::RotateRight,
            "over" | "180" => Step::RotateOver,
            other => bail!("Unknown rotation '{}': use left, right or over", other),
        });
    }
    if let Some(degrees) = args.angle {
        steps.push(Step::Rotate {
            degrees,
            origin: None,
            fill: oob,
        });
    }
    if let Some(sx) = args.scale {
        steps.push(Step::Scale { sx, sy: None });
    }
    if args.wrap {
        steps.push(Step::Loop);
    }
    Ok(steps)
}

pub fn run(args: RenderArgs, verbose: bool) -> Result<()> {
    let oob = parse_color(&args.oob)?;
    let steps = steps_from_args(&args, oob)?;

    let bitmap = load_image(&args.input)?;
    if verbose {
        println!("Loaded: {} ({}x{})", args.input.display(), bitmap.width(), bitmap.height());
    }

    let options = BitmapOptions::default()
        .with_oob(oob)
        .with_interpolation(args.interpolate);
    let sampler = pipeline::build(sampl_io::sampler(bitmap, &options), steps)?;
    info!(width = sampler.width(), height = sampler.height(), "pipeline built");

    let render_options = RenderOptions::default().with_offset(args.offset);
    let out = render_sized(&sampler, args.width, args.height, &render_options)?;
    save_image(&args.output, &out)?;

    if verbose {
        println!("Saved: {} ({}x{})", args.output.display(), out.width(), out.height());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sampl_io::Bitmap;
    use std::path::PathBuf;

    fn args(input: PathBuf, output: PathBuf) -> RenderArgs {
        RenderArgs {
            input,
            output,
            crop: None,
            flip_h: false,
            flip_v: false,
            rotate: None,
            angle: None,
            scale: None,
            wrap: false,
            width: None,
            height: None,
            interpolate: false,
            oob: "0,0,0,0".into(),
            offset: 0.5,
        }
    }

    #[test]
    fn test_steps_order() {
        let mut a = args("a.png".into(), "b.png".into());
        a.scale = Some(2.0);
        a.flip_h = true;
        a.rotate = Some("Right".into());
        a.crop = Some("0,0,2,2".into());
        let steps = steps_from_args(&a, [0.0; 4]).unwrap();
        assert_eq!(steps.len(), 4);
        assert!(matches!(steps[0], Step::Crop { .. }));
        assert_eq!(steps[1], Step::FlipH);
        assert_eq!(steps[2], Step::RotateRight);
        assert_eq!(steps[3], Step::Scale { sx: 2.0, sy: None });
    }

    #[test]
    fn test_bad_rotation() {
        let mut a = args("a.png".into(), "b.png".into());
        a.rotate = Some("sideways".into());
        assert!(steps_from_args(&a, [0.0; 4]).is_err());
    }

    #[test]
    fn test_render_rotated_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.png");
        let output = dir.path().join("out.png");
        let mut bmp = Bitmap::new(3, 1);
        bmp.set_pixel(0, 0, [255, 0, 0, 255]);
        bmp.set_pixel(2, 0, [0, 0, 255, 255]);
        sampl_io::png::write(&input, &bmp).unwrap();

        let mut a = args(input, output.clone());
        a.rotate = Some("right".into());
        run(a, false).unwrap();

        let out = sampl_io::png::read(&output).unwrap();
        assert_eq!((out.width(), out.height()), (1, 3));
        // A right turn puts the left edge on top.
        assert_eq!(out.pixel(0, 0), Some([255, 0, 0, 255]));
        assert_eq!(out.pixel(0, 2), Some([0, 0, 255, 255]));
    }
}
