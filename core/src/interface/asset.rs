use crate::prelude::{RadarError, RadarResult};

/// Read-only 1-bit raster, row-major, most significant bit first.
#[derive(Debug, Clone)]
pub struct MonoBitmap {
    width: usize,
    height: usize,
    bits: Vec<u8>,
}

impl MonoBitmap {
    /// Wraps packed bits; `bits` must hold at least `width * height` bits.
    pub fn new(width: usize, height: usize, bits: Vec<u8>) -> RadarResult<Self> {
        if width == 0 || height == 0 {
            return Err(RadarError::InvalidDimensions { width, height });
        }
        let expected = (width * height).div_ceil(8);
        if bits.len() < expected {
            return Err(RadarError::AssetSize {
                expected,
                actual: bits.len(),
            });
        }
        Ok(Self {
            width,
            height,
            bits,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Out-of-bounds coordinates read as unset.
    pub fn is_set(&self, x: usize, y: usize) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let index = y * self.width + x;
        self.bits
            .get(index / 8)
            .map(|byte| byte & (1 << (7 - index % 8)) != 0)
            .unwrap_or(false)
    }
}

/// Sprite whose pixels are either the [`IconBitmap::ON`] sentinel or ignored.
#[derive(Debug, Clone)]
pub struct IconBitmap {
    width: usize,
    height: usize,
    pixels: Vec<u16>,
}

impl IconBitmap {
    pub const ON: u16 = 0xFFFF;

    pub fn new(width: usize, height: usize, pixels: Vec<u16>) -> RadarResult<Self> {
        if width == 0 || height == 0 {
            return Err(RadarError::InvalidDimensions { width, height });
        }
        if pixels.len() != width * height {
            return Err(RadarError::AssetSize {
                expected: width * height * 2,
                actual: pixels.len() * 2,
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Decodes little-endian 16-bit pixels.
    pub fn from_le_bytes(width: usize, height: usize, bytes: &[u8]) -> RadarResult<Self> {
        if bytes.len() != width * height * 2 {
            return Err(RadarError::AssetSize {
                expected: width * height * 2,
                actual: bytes.len(),
            });
        }
        let pixels = bytes
            .chunks_exact(2)
            .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
            .collect();
        Self::new(width, height, pixels)
    }

    /// Small satellite silhouette used when no icon asset is configured.
    pub fn satellite() -> Self {
        const ROWS: [&str; 7] = [
            "...........",
            "##..###..##",
            "##..#.#..##",
            "#########.#",
            "##..#.#..##",
            "##..###..##",
            "...........",
        ];
        let pixels = ROWS
            .iter()
            .flat_map(|row| row.bytes())
            .map(|b| if b == b'#' { Self::ON } else { 0 })
            .collect();
        Self {
            width: 11,
            height: ROWS.len(),
            pixels,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn is_on(&self, x: usize, y: usize) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        self.pixels.get(y * self.width + x) == Some(&Self::ON)
    }
}
