use ndarray::Array2;

use crate::prelude::{PixelSink, RadarError, RadarResult};

/// RGB565 frame held as a `height x width` array.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameBuffer {
    pixels: Array2<u16>,
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            pixels: Array2::zeros((height, width)),
        }
    }

    /// Rebuilds a frame from a little-endian raw dump.
    pub fn from_le_bytes(width: usize, height: usize, bytes: &[u8]) -> RadarResult<Self> {
        let expected = width * height * 2;
        if bytes.len() != expected {
            return Err(RadarError::AssetSize {
                expected,
                actual: bytes.len(),
            });
        }
        let values = bytes
            .chunks_exact(2)
            .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
            .collect::<Vec<_>>();
        let pixels = Array2::from_shape_vec((height, width), values)
            .map_err(|_| RadarError::InvalidDimensions { width, height })?;
        Ok(Self { pixels })
    }

    /// Row-major little-endian dump, the on-flash screenshot format.
    pub fn to_le_bytes(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|p| p.to_le_bytes()).collect()
    }

    /// Bitwise-inverts every pixel.
    pub fn invert(&mut self) {
        self.pixels.mapv_inplace(|p| !p);
    }

    /// Darkens every `step`-th pixel of every `step`-th row by masking it
    /// with `overlay` and halving.
    pub fn blend_grid(&mut self, overlay: u16, step: usize) {
        let step = step.max(1);
        for ((y, x), pixel) in self.pixels.indexed_iter_mut() {
            if y % step == 0 && x % step == 0 {
                *pixel = (*pixel & overlay) >> 1;
            }
        }
    }

    fn index(&self, x: i32, y: i32) -> Option<(usize, usize)> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        let (rows, cols) = self.pixels.dim();
        (y < rows && x < cols).then_some((y, x))
    }
}

impl PixelSink for FrameBuffer {
    fn width(&self) -> i32 {
        self.pixels.ncols() as i32
    }

    fn height(&self) -> i32 {
        self.pixels.nrows() as i32
    }

    fn set_pixel(&mut self, x: i32, y: i32, color: u16) {
        if let Some(index) = self.index(x, y) {
            self.pixels[index] = color;
        }
    }

    fn get_pixel(&self, x: i32, y: i32) -> Option<u16> {
        self.index(x, y).map(|index| self.pixels[index])
    }

    fn fill(&mut self, color: u16) {
        self.pixels.fill(color);
    }
}

/// Pulse overlay for step `i` of `cycles`, as shown while waiting for the
/// uplink.
pub fn pulse_overlay(i: usize, cycles: usize) -> u16 {
    let phase = i as f64 * std::f64::consts::PI / cycles.max(1) as f64;
    let intensity = ((phase.sin() + 1.0) * 127.0) as u32;
    ((intensity << 11) | (intensity << 5) | intensity) as u16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_bounds_access_is_a_no_op() {
        let mut frame = FrameBuffer::new(4, 3);
        frame.set_pixel(-1, 0, 0xFFFF);
        frame.set_pixel(4, 0, 0xFFFF);
        frame.set_pixel(0, 3, 0xFFFF);
        assert!(frame.to_le_bytes().iter().all(|&b| b == 0));
        assert_eq!(frame.get_pixel(4, 0), None);
        assert_eq!(frame.get_pixel(3, 2), Some(0));
    }

    #[test]
    fn dump_is_row_major_little_endian() {
        let mut frame = FrameBuffer::new(2, 2);
        frame.set_pixel(1, 0, 0x1234);
        frame.set_pixel(0, 1, 0xABCD);
        assert_eq!(
            frame.to_le_bytes(),
            vec![0x00, 0x00, 0x34, 0x12, 0xCD, 0xAB, 0x00, 0x00]
        );
        let restored = FrameBuffer::from_le_bytes(2, 2, &frame.to_le_bytes()).unwrap();
        assert_eq!(restored, frame);
        assert!(FrameBuffer::from_le_bytes(2, 2, &[0; 7]).is_err());
    }

    #[test]
    fn invert_flips_all_bits() {
        let mut frame = FrameBuffer::new(2, 1);
        frame.set_pixel(0, 0, 0xF800);
        frame.invert();
        assert_eq!(frame.get_pixel(0, 0), Some(0x07FF));
        assert_eq!(frame.get_pixel(1, 0), Some(0xFFFF));
    }

    #[test]
    fn blend_grid_touches_only_grid_pixels() {
        let mut frame = FrameBuffer::new(8, 8);
        frame.fill(0xFFFF);
        frame.blend_grid(0x00FF, 4);
        assert_eq!(frame.get_pixel(0, 0), Some(0x007F));
        assert_eq!(frame.get_pixel(4, 4), Some(0x007F));
        assert_eq!(frame.get_pixel(1, 0), Some(0xFFFF));
    }

    #[test]
    fn pulse_overlay_uses_intensity_in_every_channel_slot() {
        assert_eq!(pulse_overlay(0, 4), (127 << 11 | 127 << 5 | 127) as u16);
        let peak = ((1.0f64 + 1.0) * 127.0) as u32;
        let phase = std::f64::consts::PI / 2.0;
        let mid = ((phase.sin() + 1.0) * 127.0) as u32;
        assert_eq!(mid, peak);
        assert_eq!(pulse_overlay(2, 4), ((mid << 11) | (mid << 5) | mid) as u16);
    }
}
