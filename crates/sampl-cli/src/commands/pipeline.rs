//! YAML pipeline description.
//!
//! ```yaml
//! input: photo.png
//! output: out.png
//! width: 512          # optional, defaults to the transformed width
//! interpolate: true   # bilinear reads from the input image
//! steps:
//!   - op: rotate_right
//!   - op: rotate
//!     degrees: 30
//!   - op: scale
//!     sx: 2
//!   - op: oob
//!     color: [0, 0, 0, 1]
//! ```
//!
//! Relative paths resolve against the pipeline file's directory.

use anyhow::{Context, Result};
use sampl_core::{BoxedSampler, Rgba, TRANSPARENT};
use sampl_math::bilinear_rgba;
use sampl_ops::{Direction, SamplerExt};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// One combinator applied to the running sampler.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    Translate {
        dx: f64,
        dy: f64,
    },
    FlipH,
    FlipV,
    RotateLeft,
    RotateRight,
    RotateOver,
    /// Clockwise, in degrees. Uncovered corners read as `fill`.
    Rotate {
        degrees: f64,
        #[serde(default)]
        origin: Option<[f64; 2]>,
        #[serde(default = "transparent")]
        fill: Rgba,
    },
    Scale {
        sx: f64,
        #[serde(default)]
        sy: Option<f64>,
    },
    Stretch {
        width: f64,
        height: f64,
    },
    Crop {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    Loop,
    Clamp,
    Floor,
    Round,
    Interpolate,
    Cache,
    Oob {
        color: Rgba,
    },
}

fn transparent() -> Rgba {
    TRANSPARENT
}

impl Step {
    /// Wraps `sampler` in this step's combinator.
    pub fn apply(self, sampler: BoxedSampler<Rgba>) -> Result<BoxedSampler<Rgba>> {
        let out = match self {
            Step::Translate { dx, dy } => sampler.translate(dx, dy).boxed(),
            Step::FlipH => sampler.flip_h().boxed(),
            Step::FlipV => sampler.flip_v().boxed(),
            Step::RotateLeft => sampler.rotate(Direction::Left).boxed(),
            Step::RotateRight => sampler.rotate(Direction::Right).boxed(),
            Step::RotateOver => sampler.rotate(Direction::Over).boxed(),
            Step::Rotate {
                degrees,
                origin,
                fill,
            } => {
                let angle = degrees.to_radians();
                match origin {
                    Some([ox, oy]) => sampler.rotate_about(angle, ox, oy).fill_missing(fill).boxed(),
                    None => sampler.rotate_angle(angle).fill_missing(fill).boxed(),
                }
            }
            Step::Scale { sx, sy } => sampler.scale(sx, sy.unwrap_or(sx))?.boxed(),
            Step::Stretch { width, height } => sampler.stretch(width, height)?.boxed(),
            Step::Crop {
                x,
                y,
                width,
                height,
            } => sampler.crop(x, y, width, height)?.boxed(),
            Step::Loop => sampler.wrap().boxed(),
            Step::Clamp => sampler.clamp_coords().boxed(),
            Step::Floor => sampler.floor_coords().boxed(),
            Step::Round => sampler.round_coords().boxed(),
            Step::Interpolate => sampler.interpolate(bilinear_rgba).boxed(),
            Step::Cache => sampler.with_cache().boxed(),
            Step::Oob { color } => sampler.oob(color).boxed(),
        };
        Ok(out)
    }
}

/// Applies `steps` in order.
pub fn build(sampler: BoxedSampler<Rgba>, steps: Vec<Step>) -> Result<BoxedSampler<Rgba>> {
    steps.into_iter().enumerate().try_fold(sampler, |s, (i, step)| {
        debug!(index = i, ?step, "pipeline step");
        let label = format!("Step {} ({:?})", i + 1, step);
        step.apply(s).context(label)
    })
}

fn default_interpolate() -> bool {
    true
}

/// A whole pipeline file.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Pipeline {
    #[serde(default)]
    pub input: Option<PathBuf>,
    #[serde(default)]
    pub output: Option<PathBuf>,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default = "default_interpolate")]
    pub interpolate: bool,
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl Pipeline {
    pub fn from_yaml(text: &str) -> Result<Self> {
        serde_yaml::from_str(text).context("Invalid pipeline")
    }

    /// Reads a pipeline file, resolving its relative paths.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read pipeline: {}", path.display()))?;
        let mut pipeline =
            Self::from_yaml(&text).with_context(|| format!("In {}", path.display()))?;
        if let Some(dir) = path.parent() {
            pipeline.input = pipeline.input.map(|p| dir.join(p));
            pipeline.output = pipeline.output.map(|p| dir.join(p));
        }
        Ok(pipeline)
    }
}
