//! Radiance HDR (RGBE) reading.
//!
//! Decodes the classic `.hdr` format into a linear-light [`HdrImage`]:
//! a text header introduced by `#?`, a resolution line, then scanlines
//! of shared-exponent RGBE pixels, either flat or RLE-compressed.
//!
//! Only the common `32-bit_rle_rgbe` pixel format is supported; XYZE
//! files are rejected at the header.

use crate::{IoError, IoResult};
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use tone_core::HdrImage;
use tracing::debug;

const HDR_MAGIC: &str = "#?";

/// Reads a Radiance HDR file into a linear-light image.
///
/// # Example
///
/// ```rust,ignore
/// let img = tone_io::hdr::read("memorial.hdr")?;
/// ```
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<HdrImage> {
    let file = File::open(path.as_ref())?;
    let img = decode(BufReader::new(file))?;
    debug!(
        width = img.width(),
        height = img.height(),
        path = %path.as_ref().display(),
        "loaded radiance hdr"
    );
    Ok(img)
}

/// Decodes a Radiance HDR stream.
pub fn decode<R: BufRead>(mut reader: R) -> IoResult<HdrImage> {
    let (width, height) = read_header(&mut reader)?;
    let data = read_pixels(&mut reader, width as usize, height as usize)?;
    HdrImage::from_data(width, height, data)
        .map_err(|e| IoError::DecodeError(e.to_string()))
}

fn read_header<R: BufRead>(reader: &mut R) -> IoResult<(u32, u32)> {
    let mut line = String::new();

    reader.read_line(&mut line)?;
    if !trim_line(&line).starts_with(HDR_MAGIC) {
        return Err(IoError::InvalidFile("HDR magic not found".into()));
    }

    loop {
        line.clear();
        let bytes = reader.read_line(&mut line)?;
        if bytes == 0 {
            return Err(IoError::InvalidFile("missing HDR resolution line".into()));
        }
        let line = trim_line(&line);

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with('+') || line.starts_with('-') {
            return parse_resolution(line)
                .ok_or_else(|| IoError::InvalidFile("invalid HDR resolution line".into()));
        }

        if let Some((key, value)) = line.split_once('=') {
            if key.trim().eq_ignore_ascii_case("FORMAT") {
                let value = value.trim();
                if !value.eq_ignore_ascii_case("32-bit_rle_rgbe") {
                    return Err(IoError::InvalidFile(format!(
                        "unsupported HDR pixel format: {}",
                        value
                    )));
                }
            }
            // other header fields (EXPOSURE, SOFTWARE, ...) are ignored
        }
    }
}

/// Parses a resolution line such as `-Y 768 +X 1024`.
///
/// Only the axis magnitudes matter here; flipped orientations are read
/// in file order.
fn parse_resolution(line: &str) -> Option<(u32, u32)> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() != 4 {
        return None;
    }

    let mut width = 0u32;
    let mut height = 0u32;

    for i in (0..4).step_by(2) {
        let axis = parts[i];
        let value: u32 = parts.get(i + 1)?.parse().ok()?;

        if axis.ends_with('X') {
            width = value;
        } else if axis.ends_with('Y') {
            height = value;
        }
    }

    if width > 0 && height > 0 {
        Some((width, height))
    } else {
        None
    }
}

fn read_pixels<R: Read>(reader: &mut R, width: usize, height: usize) -> IoResult<Vec<f32>> {
    let mut first = [0u8; 4];
    reader.read_exact(&mut first)?;

    // adaptive-RLE scanlines announce themselves with [2, 2, hi, lo]
    let use_rle = (8..=0x7fff).contains(&width)
        && first[0] == 2
        && first[1] == 2
        && ((first[2] as usize) << 8 | first[3] as usize) == width;

    let mut rgbe = vec![0u8; width * height * 4];

    if use_rle {
        let mut scanline = vec![0u8; width * 4];
        decode_rle_scanline(reader, width, &mut scanline, first)?;
        rgbe[0..width * 4].copy_from_slice(&scanline);

        for y in 1..height {
            let mut header = [0u8; 4];
            reader.read_exact(&mut header)?;
            decode_rle_scanline(reader, width, &mut scanline, header)?;
            let offset = y * width * 4;
            rgbe[offset..offset + width * 4].copy_from_slice(&scanline);
        }
    } else {
        rgbe[0..4].copy_from_slice(&first);
        reader.read_exact(&mut rgbe[4..])?;
    }

    let mut data = Vec::with_capacity(width * height * 3);
    for chunk in rgbe.chunks_exact(4) {
        let (r, g, b) = rgbe_to_f32(chunk[0], chunk[1], chunk[2], chunk[3]);
        data.push(r);
        data.push(g);
        data.push(b);
    }

    Ok(data)
}

fn decode_rle_scanline<R: Read>(
    reader: &mut R,
    width: usize,
    out: &mut [u8],
    header: [u8; 4],
) -> IoResult<()> {
    if header[0] != 2 || header[1] != 2 {
        return Err(IoError::InvalidFile("HDR RLE header invalid".into()));
    }
    let encoded_width = ((header[2] as usize) << 8) | (header[3] as usize);
    if encoded_width != width {
        return Err(IoError::InvalidFile("HDR RLE width mismatch".into()));
    }

    // channels are stored planar within the scanline: R run, G run, B run, E run
    let mut channel = vec![0u8; width];
    for c in 0..4 {
        let mut idx = 0usize;
        while idx < width {
            let mut count = [0u8; 1];
            reader.read_exact(&mut count)?;
            let count = count[0] as usize;
            if count > 128 {
                let run = count - 128;
                if idx + run > width {
                    return Err(IoError::InvalidFile("HDR RLE run overflows scanline".into()));
                }
                let mut value = [0u8; 1];
                reader.read_exact(&mut value)?;
                channel[idx..idx + run].fill(value[0]);
                idx += run;
            } else {
                if idx + count > width {
                    return Err(IoError::InvalidFile("HDR RLE run overflows scanline".into()));
                }
                reader.read_exact(&mut channel[idx..idx + count])?;
                idx += count;
            }
        }

        for x in 0..width {
            out[x * 4 + c] = channel[x];
        }
    }

    Ok(())
}

/// Decodes one shared-exponent RGBE pixel to linear floats.
#[inline]
fn rgbe_to_f32(r: u8, g: u8, b: u8, e: u8) -> (f32, f32, f32) {
    if e == 0 {
        return (0.0, 0.0, 0.0);
    }
    let exp = (e as i32) - 136;
    let f = 2.0_f32.powi(exp);
    (r as f32 * f, g as f32 * f, b as f32 * f)
}

fn trim_line(line: &str) -> &str {
    line.trim_end_matches(&['\r', '\n'][..])
}
