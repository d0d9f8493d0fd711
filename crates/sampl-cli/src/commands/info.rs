//! Image info command.
//!
//! Displays dimensions and file size, and with `--stats` per-channel
//! min/max/mean plus mean Rec.709 luminance.

use crate::InfoArgs;
use anyhow::{Context, Result};
use sampl_core::{Rgba, TRANSPARENT};
use sampl_ops::SamplerExt;
use std::fs;

/// Per-channel min, max and mean.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelStats {
    pub min: Rgba,
    pub max: Rgba,
    pub mean: Rgba,
}

/// Summarizes `pixels`. `None` when there are none.
pub fn channel_stats(pixels: &[Rgba]) -> Option<ChannelStats> {
    let first = *pixels.first()?;
    let mut min = first;
    let mut max = first;
    let mut sum = [0.0f64; 4];
    for px in pixels {
        for c in 0..4 {
            min[c] = min[c].min(px[c]);
            max[c] = max[c].max(px[c]);
            sum[c] += px[c] as f64;
        }
    }
    let n = pixels.len() as f64;
    let mean = sum.map(|s| (s / n) as f32);
    Some(ChannelStats { min, max, mean })
}

/// Runs the info command.
pub fn run(args: InfoArgs, verbose: bool) -> Result<()> {
    for path in &args.input {
        let file_size = fs::metadata(path)
            .with_context(|| format!("Failed to stat: {}", path.display()))?
            .len();
        let bitmap = super::load_image(path)?;

        println!("{}", path.display());
        println!("  Resolution: {}x{}", bitmap.width(), bitmap.height());
        println!("  Pixels:     {}", bitmap.width() as u64 * bitmap.height() as u64);
        println!("  File size:  {}", super::format_size(file_size));

        if args.stats || verbose {
            let sampler = bitmap.sampler(TRANSPARENT);
            let pixels = sampler.par_to_flat_xy();
            if let Some(stats) = channel_stats(&pixels) {
                println!("  Min:        {}", format_rgba(stats.min));
                println!("  Max:        {}", format_rgba(stats.max));
                println!("  Mean:       {}", format_rgba(stats.mean));
            }
            let luma = sampler.luminance().par_to_flat_xy();
            if !luma.is_empty() {
                let mean = luma.iter().map(|&v| v as f64).sum::<f64>() / luma.len() as f64;
                println!("  Luminance:  {:.6}", mean);
            }
        }

        if args.input.len() > 1 {
            println!();
        }
    }

    Ok(())
}

fn format_rgba(c: Rgba) -> String {
    format!("{:.4} {:.4} {:.4} {:.4}", c[0], c[1], c[2], c[3])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_stats() {
        let stats = channel_stats(&[[0.0, 1.0, 0.5, 1.0], [1.0, 0.0, 0.5, 0.0]]).unwrap();
        assert_eq!(stats.min, [0.0, 0.0, 0.5, 0.0]);
        assert_eq!(stats.max, [1.0, 1.0, 0.5, 1.0]);
        assert_eq!(stats.mean, [0.5, 0.5, 0.5, 0.5]);
        assert!(channel_stats(&[]).is_none());
    }
}
