//! PNG decode/encode.
//!
//! Decoding accepts 8-bit grayscale, grayscale+alpha, RGB and RGBA and
//! expands everything to a [`Bitmap`]; indexed images are expanded by the
//! decoder. 16-bit images are reduced to their high byte. Encoding always
//! writes 8-bit RGBA with an sRGB chunk.
//!
//! # Example
//!
//! ```rust,ignore
//! use sampl_io::png;
//!
//! let bitmap = png::read("input.png")?;
//! png::write("output.png", &bitmap)?;
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Cursor, Seek, Write};
use std::path::Path;

use tracing::debug;

use crate::{Bitmap, ChannelOrder, IoError, IoResult};

/// Reads a PNG file from the given path.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<Bitmap> {
    let file = File::open(path.as_ref())?;
    let bitmap = decode(BufReader::new(file))?;
    debug!(path = %path.as_ref().display(), w = bitmap.width(), h = bitmap.height(), "png read");
    Ok(bitmap)
}

/// Decodes a PNG held in memory.
pub fn read_from_memory(bytes: &[u8]) -> IoResult<Bitmap> {
    decode(Cursor::new(bytes))
}

fn decode<R: BufRead + Seek>(reader: R) -> IoResult<Bitmap> {
    let mut decoder = png::Decoder::new(reader);
    decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);
    let mut reader = decoder
        .read_info()
        .map_err(|e: png::DecodingError| IoError::DecodeError(e.to_string()))?;

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("cannot determine output buffer size".into()))?;
    let mut buf = vec![0u8; buf_size];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|e: png::DecodingError| IoError::DecodeError(e.to_string()))?;
    let raw = &buf[..info.buffer_size()];

    let rgba: Vec<u8> = match (info.color_type, info.bit_depth) {
        (png::ColorType::Rgba, png::BitDepth::Eight) => raw.to_vec(),
        (png::ColorType::Rgb, png::BitDepth::Eight) => raw
            .chunks_exact(3)
            .flat_map(|p| [p[0], p[1], p[2], 255])
            .collect(),
        (png::ColorType::Grayscale, png::BitDepth::Eight) => {
            raw.iter().flat_map(|&g| [g, g, g, 255]).collect()
        }
        (png::ColorType::GrayscaleAlpha, png::BitDepth::Eight) => raw
            .chunks_exact(2)
            .flat_map(|ga| [ga[0], ga[0], ga[0], ga[1]])
            .collect(),
        (color_type, bit_depth) => {
            return Err(IoError::UnsupportedFormat(format!(
                "{color_type:?} {bit_depth:?}"
            )));
        }
    };

    Bitmap::from_raw(info.width, info.height, rgba, ChannelOrder::Rgba)
}

/// Writes a bitmap to a PNG file.
pub fn write<P: AsRef<Path>>(path: P, bitmap: &Bitmap) -> IoResult<()> {
    let file = File::create(path.as_ref())?;
    encode(BufWriter::new(file), bitmap)?;
    debug!(path = %path.as_ref().display(), w = bitmap.width(), h = bitmap.height(), "png write");
    Ok(())
}

/// Encodes a bitmap to PNG bytes.
pub fn write_to_memory(bitmap: &Bitmap) -> IoResult<Vec<u8>> {
    let mut out = Vec::new();
    encode(&mut out, bitmap)?;
    Ok(out)
}

fn encode<W: Write>(writer: W, bitmap: &Bitmap) -> IoResult<()> {
    if bitmap.width() == 0 || bitmap.height() == 0 {
        return Err(IoError::EncodeError(format!(
            "cannot encode an empty {}x{} bitmap",
            bitmap.width(),
            bitmap.height()
        )));
    }

    let mut encoder = png::Encoder::new(writer, bitmap.width(), bitmap.height());
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_compression(png::Compression::default());
    encoder.set_source_srgb(png::SrgbRenderingIntent::Perceptual);

    let mut png_writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(e.to_string()))?;
    png_writer
        .write_image_data(bitmap.as_bytes())
        .map_err(|e| IoError::EncodeError(e.to_string()))?;
    png_writer
        .finish()
        .map_err(|e| IoError::EncodeError(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern(width: u32, height: u32) -> Bitmap {
        let mut bmp = Bitmap::new(width, height);
        for y in 0..height {
            for x in 0..width {
                bmp.set_pixel(x, y, [(x * 16) as u8, (y * 16) as u8, 64, 200]);
            }
        }
        bmp
    }

    #[test]
    fn test_roundtrip_memory() {
        let bmp = pattern(16, 8);
        let bytes = write_to_memory(&bmp).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
        let loaded = read_from_memory(&bytes).unwrap();
        assert_eq!(loaded, bmp);
    }

    #[test]
    fn test_roundtrip_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pattern.png");
        let bmp = pattern(5, 7);
        write(&path, &bmp).unwrap();
        assert_eq!(read(&path).unwrap(), bmp);
    }

    #[test]
    fn test_rgb_and_gray_expand_to_rgba() {
        let mut bytes = Vec::new();
        {
            let mut enc = png::Encoder::new(&mut bytes, 2, 1);
            enc.set_color(png::ColorType::Rgb);
            enc.set_depth(png::BitDepth::Eight);
            let mut w = enc.write_header().unwrap();
            w.write_image_data(&[1, 2, 3, 4, 5, 6]).unwrap();
        }
        let rgb = read_from_memory(&bytes).unwrap();
        assert_eq!(rgb.as_bytes(), &[1, 2, 3, 255, 4, 5, 6, 255]);

        let mut bytes = Vec::new();
        {
            let mut enc = png::Encoder::new(&mut bytes, 2, 1);
            enc.set_color(png::ColorType::GrayscaleAlpha);
            enc.set_depth(png::BitDepth::Eight);
            let mut w = enc.write_header().unwrap();
            w.write_image_data(&[9, 100, 7, 50]).unwrap();
        }
        let ga = read_from_memory(&bytes).unwrap();
        assert_eq!(ga.as_bytes(), &[9, 9, 9, 100, 7, 7, 7, 50]);
    }

    #[test]
    fn test_garbage_is_decode_error() {
        let err = read_from_memory(b"not a png").unwrap_err();
        assert!(matches!(err, IoError::DecodeError(_)));
    }

    #[test]
    fn test_empty_bitmap_rejected() {
        assert!(matches!(write_to_memory(&Bitmap::new(0, 3)), Err(IoError::EncodeError(_))));
    }
}
