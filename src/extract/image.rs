use crate::document::ImageData;
use crate::error::{PsdJsonError, Result};
use image::{ImageFormat, RgbaImage};
use std::path::Path;

/// Write an RGBA pixel buffer to disk as a PNG file
///
/// The buffer length must match the declared dimensions exactly
/// (`width * height * 4`), otherwise a `PixelBufferMismatch` is returned.
pub fn write_png(data: &ImageData, path: &Path) -> Result<()> {
    // `from_raw` alone would accept an oversized buffer and drop the tail
    if data.rgba.len() != data.expected_len() {
        return Err(PsdJsonError::PixelBufferMismatch {
            width: data.width,
            height: data.height,
            expected: data.expected_len(),
            actual: data.rgba.len(),
        });
    }

    let buffer = RgbaImage::from_raw(data.width, data.height, data.rgba.clone()).ok_or(
        PsdJsonError::PixelBufferMismatch {
            width: data.width,
            height: data.height,
            expected: data.expected_len(),
            actual: data.rgba.len(),
        },
    )?;

    buffer.save_with_format(path, ImageFormat::Png)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_png_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pixel.png");

        // 2x1 image: one red pixel, one transparent pixel
        let data = ImageData::new(2, 1, vec![255, 0, 0, 255, 0, 0, 0, 0]);
        write_png(&data, &path).unwrap();

        let written = image::open(&path).unwrap().to_rgba8();
        assert_eq!(written.width(), 2);
        assert_eq!(written.height(), 1);
        assert_eq!(written.get_pixel(0, 0).0, [255, 0, 0, 255]);
    }

    #[test]
    fn test_write_png_size_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.png");

        // 2x2 image needs 16 bytes, only 4 given
        let data = ImageData::new(2, 2, vec![0; 4]);
        let result = write_png(&data, &path);

        match result {
            Err(PsdJsonError::PixelBufferMismatch {
                expected, actual, ..
            }) => {
                assert_eq!(expected, 16);
                assert_eq!(actual, 4);
            }
            _ => panic!("Expected PixelBufferMismatch error"),
        }
        assert!(!path.exists());
    }

    #[test]
    fn test_write_png_oversized_buffer() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fat.png");

        // 1x1 image needs 4 bytes, 8 given: trailing bytes must not be dropped silently
        let data = ImageData::new(1, 1, vec![0; 8]);
        let result = write_png(&data, &path);

        match result {
            Err(PsdJsonError::PixelBufferMismatch {
                expected, actual, ..
            }) => {
                assert_eq!(expected, 4);
                assert_eq!(actual, 8);
            }
            _ => panic!("Expected PixelBufferMismatch error"),
        }
        assert!(!path.exists());
    }
}
