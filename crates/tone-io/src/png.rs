//! PNG output for the 8-bit display-referred grid.
//!
//! The pipeline's sink: takes an [`LdrImage`] and writes an 8-bit RGB
//! PNG. The bytes are already gamma-encoded sRGB, so the file is tagged
//! with the sRGB chunk and no further conversion happens here.

use crate::{IoError, IoResult};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use tone_core::LdrImage;
use tracing::debug;

/// Writes an 8-bit RGB PNG.
///
/// # Example
///
/// ```rust,ignore
/// use tone_core::LdrImage;
///
/// let out = LdrImage::new(640, 480);
/// tone_io::png::write("out.png", &out)?;
/// ```
pub fn write<P: AsRef<Path>>(path: P, image: &LdrImage) -> IoResult<()> {
    let file = File::create(path.as_ref())?;
    let writer = BufWriter::new(file);

    let mut encoder = png::Encoder::new(writer, image.width(), image.height());
    encoder.set_color(png::ColorType::Rgb);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_source_srgb(png::SrgbRenderingIntent::Perceptual);

    let mut writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(e.to_string()))?;
    writer
        .write_image_data(image.as_bytes())
        .map_err(|e| IoError::EncodeError(e.to_string()))?;

    debug!(
        width = image.width(),
        height = image.height(),
        path = %path.as_ref().display(),
        "wrote png"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_png_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");

        let mut image = LdrImage::new(4, 3);
        image.set_pixel(0, 0, [255, 0, 0]);
        image.set_pixel(3, 2, [0, 128, 255]);

        write(&path, &image).expect("PNG write failed");

        let decoder = png::Decoder::new(BufReader::new(File::open(&path).unwrap()));
        let mut reader = decoder.read_info().unwrap();
        let buf_size = reader.output_buffer_size().unwrap();
        let mut buf = vec![0u8; buf_size];
        let info = reader.next_frame(&mut buf).unwrap();

        assert_eq!(info.width, 4);
        assert_eq!(info.height, 3);
        assert_eq!(info.color_type, png::ColorType::Rgb);
        assert_eq!(&buf[..info.buffer_size()], image.as_bytes());
    }
}
