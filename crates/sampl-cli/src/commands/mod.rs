//! CLI command implementations

pub mod info;
pub mod pipeline;
pub mod render;
pub mod run;

use anyhow::{bail, Context, Result};
use sampl_core::{lattice_len, Rect, Rgba, Sampler};
use sampl_io::{Bitmap, RenderOptions};
use std::path::Path;

/// Load image from path
pub fn load_image(path: &Path) -> Result<Bitmap> {
    sampl_io::load_file(path).with_context(|| format!("Failed to load: {}", path.display()))
}

/// Save image to path
pub fn save_image(path: &Path, bitmap: &Bitmap) -> Result<()> {
    sampl_io::png::write(path, bitmap).with_context(|| format!("Failed to save: {}", path.display()))
}

/// Renders `sampler` at its own size, or stretched to `width x height`
/// when either is given. A missing side keeps the sampler's extent.
pub fn render_sized<S>(
    sampler: &S,
    width: Option<u32>,
    height: Option<u32>,
    options: &RenderOptions,
) -> Result<Bitmap>
where
    S: Sampler<Item = Rgba> + Sync + ?Sized,
{
    if width.is_none() && height.is_none() {
        return sampl_io::render(sampler, options).context("Render failed");
    }
    let side = |given: Option<u32>, extent: f64| -> Result<u32> {
        match given {
            Some(v) => Ok(v),
            None => u32::try_from(lattice_len(extent)).context("Output size out of range"),
        }
    };
    let w = side(width, sampler.width())?;
    let h = side(height, sampler.height())?;
    if w == 0 || h == 0 {
        bail!("Output size must be positive, got {w}x{h}");
    }
    let mut bitmap = Bitmap::new(w, h);
    sampl_io::render_into(sampler, &mut bitmap, Rect::from_size(w as f64, h as f64), options)
        .context("Render failed")?;
    Ok(bitmap)
}

/// Parse color string like "0,0,0" or "0.5,0.5,0.5,1.0". Alpha defaults to 1.
pub fn parse_color(s: &str) -> Result<Rgba> {
    let parts: Vec<f32> = s
        .split(',')
        .map(|p| p.trim().parse::<f32>())
        .collect::<std::result::Result<_, _>>()
        .map_err(|_| anyhow::anyhow!("Invalid color format: {}", s))?;
    match parts.as_slice() {
        [r, g, b] => Ok([*r, *g, *b, 1.0]),
        [r, g, b, a] => Ok([*r, *g, *b, *a]),
        _ => bail!("Color needs 3 or 4 components, got {}: {}", parts.len(), s),
    }
}

/// Parse a rectangle string "X,Y,W,H".
pub fn parse_rect(s: &str) -> Result<Rect> {
    let parts: Vec<f64> = s
        .split(',')
        .map(|p| p.trim().parse::<f64>())
        .collect::<std::result::Result<_, _>>()
        .map_err(|_| anyhow::anyhow!("Invalid rectangle format: {}", s))?;
    match parts.as_slice() {
        [x, y, w, h] => Ok(Rect::new(*x, *y, *w, *h)),
        _ => bail!("Rectangle needs X,Y,W,H, got: {}", s),
    }
}

/// Format file size for display
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
