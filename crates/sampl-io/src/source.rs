//! Where a color sampler comes from, and background loading.
//!
//! A [`Source`] is either already in memory (a bitmap or a sampler) or a
//! file on disk. [`Source::load`] resolves it on a worker thread and hands
//! back a [`LoadHandle`] that yields its result exactly once.
//!
//! # Example
//!
//! ```rust
//! use sampl_core::Sampler;
//! use sampl_io::{Bitmap, BitmapOptions, Source};
//!
//! let handle = Source::Bitmap(Bitmap::new(4, 2)).load(BitmapOptions::default());
//! let sampler = handle.wait().unwrap();
//! assert_eq!(sampler.size(), (4.0, 2.0));
//! ```

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use sampl_core::{BoxedSampler, Rgba, Sampler};
use tracing::debug;

use crate::bitmap::{sampler, Bitmap, BitmapOptions};
use crate::{png, IoError, IoResult};

const PNG_SIGNATURE: &[u8] = b"\x89PNG\r\n\x1a\n";

/// A color image in one of its possible forms.
pub enum Source {
    /// Decoded pixels.
    Bitmap(Bitmap),
    /// A ready sampler, passed through untouched.
    Sampler(BoxedSampler<Rgba>),
    /// An image file on the local filesystem.
    Path(PathBuf),
}

impl fmt::Debug for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bitmap(b) => write!(f, "Source::Bitmap({}x{})", b.width(), b.height()),
            Self::Sampler(s) => write!(f, "Source::Sampler({}x{})", s.width(), s.height()),
            Self::Path(p) => write!(f, "Source::Path({})", p.display()),
        }
    }
}

impl From<Bitmap> for Source {
    fn from(bitmap: Bitmap) -> Self {
        Self::Bitmap(bitmap)
    }
}

impl From<PathBuf> for Source {
    fn from(path: PathBuf) -> Self {
        Self::Path(path)
    }
}

impl From<&Path> for Source {
    fn from(path: &Path) -> Self {
        Self::Path(path.to_path_buf())
    }
}

impl Source {
    /// Resolves the source on the calling thread.
    ///
    /// Bitmaps and files go through [`sampler`] with `options`; samplers
    /// are returned as they are.
    pub fn into_sampler(self, options: &BitmapOptions) -> IoResult<BoxedSampler<Rgba>> {
        match self {
            Self::Bitmap(bitmap) => Ok(sampler(bitmap, options)),
            Self::Sampler(s) => Ok(s),
            Self::Path(path) => Ok(sampler(load_file(&path)?, options)),
        }
    }

    /// Resolves the source on a worker thread.
    pub fn load(self, options: BitmapOptions) -> LoadHandle {
        let (tx, rx) = mpsc::sync_channel(1);
        debug!(source = ?self, "load started");
        thread::spawn(move || {
            let result = self.into_sampler(&options);
            // The handle may already be gone; nobody is left to tell.
            let _ = tx.send(result);
        });
        LoadHandle { rx }
    }
}

/// Decodes an image file into a bitmap.
///
/// # Errors
///
/// [`IoError::Io`] if the file cannot be read, [`IoError::UnsupportedFormat`]
/// for anything that is not a PNG.
pub fn load_file(path: &Path) -> IoResult<Bitmap> {
    let bytes = std::fs::read(path)?;
    if !bytes.starts_with(PNG_SIGNATURE) {
        return Err(IoError::UnsupportedFormat(format!(
            "{}: not a PNG file",
            path.display()
        )));
    }
    let bitmap = png::read_from_memory(&bytes)?;
    debug!(path = %path.display(), w = bitmap.width(), h = bitmap.height(), "loaded");
    Ok(bitmap)
}

/// Pending result of [`Source::load`].
///
/// Consumed by [`wait`](Self::wait) or a successful
/// [`try_wait`](Self::try_wait), so the result is delivered once.
#[derive(Debug)]
pub struct LoadHandle {
    rx: Receiver<IoResult<BoxedSampler<Rgba>>>,
}

impl LoadHandle {
    /// Blocks until the load finishes.
    ///
    /// # Errors
    ///
    /// The load's own error, or [`IoError::LoadAborted`] if the worker died
    /// without reporting.
    pub fn wait(self) -> IoResult<BoxedSampler<Rgba>> {
        self.rx
            .recv()
            .map_err(|_| IoError::LoadAborted("loader thread exited without a result".into()))?
    }

    /// Returns the result if the load has finished, or the handle back if
    /// it has not.
    pub fn try_wait(self) -> Result<IoResult<BoxedSampler<Rgba>>, Self> {
        match self.rx.try_recv() {
            Ok(result) => Ok(result),
            Err(TryRecvError::Empty) => Err(self),
            Err(TryRecvError::Disconnected) => Ok(Err(IoError::LoadAborted(
                "loader thread exited without a result".into(),
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sampl_core::from_fn;
    use sampl_ops::SamplerExt;

    #[test]
    fn test_sampler_passes_through() {
        let s = from_fn(3.0, 3.0, |_, _| [0.5f32, 0.5, 0.5, 1.0]).boxed();
        let out = Source::Sampler(s).into_sampler(&BitmapOptions::default()).unwrap();
        assert_eq!(out.get(1.0, 1.0), [0.5, 0.5, 0.5, 1.0]);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("red.png");
        let mut bmp = Bitmap::new(2, 2);
        bmp.set_pixel(1, 0, [255, 0, 0, 255]);
        png::write(&path, &bmp).unwrap();

        let s = Source::from(path.as_path())
            .load(BitmapOptions::default().with_interpolation(false))
            .wait()
            .unwrap();
        assert_eq!(s.size(), (2.0, 2.0));
        assert_eq!(s.get(1.0, 0.0), [1.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_missing_file() {
        let result = Source::Path("/nonexistent/nothing.png".into())
            .load(BitmapOptions::default())
            .wait();
        assert!(matches!(result, Err(IoError::Io(_))));
    }

    #[test]
    fn test_not_a_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "hello").unwrap();
        let err = load_file(&path).unwrap_err();
        assert!(matches!(err, IoError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_try_wait_eventually_completes() {
        let mut handle = Source::Bitmap(Bitmap::new(1, 1)).load(BitmapOptions::default());
        let result = loop {
            match handle.try_wait() {
                Ok(result) => break result,
                Err(pending) => {
                    handle = pending;
                    thread::yield_now();
                }
            }
        };
        assert!(result.is_ok());
    }
}
