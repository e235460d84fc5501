//! Decodes raw little-endian RGB565 framebuffer dumps into RGB images.

use image::{ImageBuffer, Rgb, RgbImage};
use std::fs;
use std::path::{Path, PathBuf};

pub const WIDTH: u32 = 240;
pub const HEIGHT: u32 = 240;
pub const EXPECTED_SIZE: usize = (WIDTH * HEIGHT * 2) as usize;

#[derive(thiserror::Error, Debug)]
pub enum ConvertError {
    #[error("expected {expected} bytes, got {actual}")]
    Size { expected: usize, actual: usize },
    #[error("reading {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("writing {path}: {source}")]
    Write {
        path: PathBuf,
        source: image::ImageError,
    },
}

/// Expands a 5-6-5 pixel to 8 bits per channel, replicating high bits
/// into the low ones so full scale maps to 255.
pub fn rgb565_to_rgb888(pixel: u16) -> [u8; 3] {
    let r = ((pixel >> 11) & 0x1F) as u8;
    let g = ((pixel >> 5) & 0x3F) as u8;
    let b = (pixel & 0x1F) as u8;
    [r << 3 | r >> 2, g << 2 | g >> 4, b << 3 | b >> 2]
}

/// Blends toward luminance-weighted grey; 0 is greyscale, 1 is unchanged.
pub fn desaturate(rgb: [u8; 3], saturation: f64) -> [u8; 3] {
    let [r, g, b] = rgb.map(f64::from);
    let lum = (0.299 * r + 0.587 * g + 0.114 * b).trunc();
    [r, g, b].map(|c| (lum + saturation * (c - lum)).trunc().clamp(0.0, 255.0) as u8)
}

/// Decodes a full-frame dump. The buffer must be exactly [`EXPECTED_SIZE`]
/// bytes.
pub fn decode(data: &[u8], saturation: f64) -> Result<RgbImage, ConvertError> {
    if data.len() != EXPECTED_SIZE {
        return Err(ConvertError::Size {
            expected: EXPECTED_SIZE,
            actual: data.len(),
        });
    }
    let image = ImageBuffer::from_fn(WIDTH, HEIGHT, |x, y| {
        let offset = ((y * WIDTH + x) * 2) as usize;
        let pixel = u16::from_le_bytes([data[offset], data[offset + 1]]);
        Rgb(desaturate(rgb565_to_rgb888(pixel), saturation))
    });
    Ok(image)
}

/// Converts `input` and writes `output`; nothing is written on error.
pub fn convert(input: &Path, output: &Path, saturation: f64) -> Result<(), ConvertError> {
    let data = fs::read(input).map_err(|source| ConvertError::Read {
        path: input.to_path_buf(),
        source,
    })?;
    let image = decode(&data, saturation)?;
    image.save(output).map_err(|source| ConvertError::Write {
        path: output.to_path_buf(),
        source,
    })?;
    log::info!("saved {} ({}x{})", output.display(), WIDTH, HEIGHT);
    Ok(())
}

/// `screenshot_001.bin` -> `screenshot_001.png`.
pub fn default_output(input: &Path) -> PathBuf {
    input.with_extension("png")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn channel_expansion_hits_both_ends() {
        assert_eq!(rgb565_to_rgb888(0x0000), [0, 0, 0]);
        assert_eq!(rgb565_to_rgb888(0xFFFF), [255, 255, 255]);
        assert_eq!(rgb565_to_rgb888(0xF800), [255, 0, 0]);
        assert_eq!(rgb565_to_rgb888(0x07E0), [0, 255, 0]);
        assert_eq!(rgb565_to_rgb888(0x001F), [0, 0, 255]);
    }

    #[test]
    fn zero_saturation_is_grey_and_one_is_identity() {
        assert_eq!(desaturate([255, 0, 0], 0.0), [76, 76, 76]);
        assert_eq!(desaturate([12, 200, 90], 1.0), [12, 200, 90]);
        let grey = desaturate([10, 20, 30], 0.0);
        assert!(grey[0] == grey[1] && grey[1] == grey[2]);
    }

    #[test]
    fn wrong_size_is_rejected_without_output() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("screenshot_001.bin");
        fs::write(&input, vec![0u8; EXPECTED_SIZE - 2]).unwrap();
        let output = default_output(&input);

        let err = convert(&input, &output, 0.0).unwrap_err();
        assert!(matches!(err, ConvertError::Size { actual, .. } if actual == EXPECTED_SIZE - 2));
        assert!(!output.exists());
    }

    #[test]
    fn decodes_pixels_row_major() {
        let mut data = vec![0u8; EXPECTED_SIZE];
        // pixel (1, 0) pure red, pixel (0, 1) pure blue
        data[2..4].copy_from_slice(&0xF800u16.to_le_bytes());
        let row = (WIDTH * 2) as usize;
        data[row..row + 2].copy_from_slice(&0x001Fu16.to_le_bytes());

        let image = decode(&data, 1.0).unwrap();
        assert_eq!(image.get_pixel(1, 0).0, [255, 0, 0]);
        assert_eq!(image.get_pixel(0, 1).0, [0, 0, 255]);
        assert_eq!(image.get_pixel(0, 0).0, [0, 0, 0]);
    }

    #[test]
    fn converts_to_png_next_to_input() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("screenshot_002.bin");
        fs::write(&input, vec![0xFFu8; EXPECTED_SIZE]).unwrap();
        let output = default_output(&input);
        convert(&input, &output, 0.0).unwrap();

        let image = image::open(&output).unwrap().to_rgb8();
        assert_eq!(image.dimensions(), (WIDTH, HEIGHT));
        assert_eq!(image.get_pixel(10, 10).0, [255, 255, 255]);
    }
}
