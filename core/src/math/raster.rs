use crate::interface::asset::{IconBitmap, MonoBitmap};
use crate::interface::font::TinyFont;
use crate::prelude::PixelSink;

/// Pixel-level drawing primitives over any [`PixelSink`].
pub struct Rasterizer;

impl Rasterizer {
    /// Integer Bresenham line, both endpoints included.
    pub fn draw_line<S: PixelSink + ?Sized>(
        sink: &mut S,
        x0: i32,
        y0: i32,
        x1: i32,
        y1: i32,
        color: u16,
    ) {
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        let (mut x, mut y) = (x0, y0);

        loop {
            sink.set_pixel(x, y, color);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Midpoint circle; every step plots all eight octant reflections.
    pub fn draw_circle<S: PixelSink + ?Sized>(sink: &mut S, cx: i32, cy: i32, radius: i32, color: u16) {
        let mut x = radius;
        let mut y = 0;
        let mut err = 0;

        while x >= y {
            sink.set_pixel(cx + x, cy + y, color);
            sink.set_pixel(cx + y, cy + x, color);
            sink.set_pixel(cx - y, cy + x, color);
            sink.set_pixel(cx - x, cy + y, color);
            sink.set_pixel(cx - x, cy - y, color);
            sink.set_pixel(cx - y, cy - x, color);
            sink.set_pixel(cx + y, cy - x, color);
            sink.set_pixel(cx + x, cy - y, color);

            y += 1;
            if err <= 0 {
                err += 2 * y + 1;
            }
            if err > 0 {
                x -= 1;
                err -= 2 * x + 1;
            }
        }
    }

    /// Draws alternating `dash`/`gap` intervals along the segment and
    /// returns how many dashes were drawn.
    ///
    /// At least one dash is drawn for any non-empty segment; a segment
    /// whose endpoints coincide draws nothing.
    #[allow(clippy::too_many_arguments)]
    pub fn draw_dashed_segment<S: PixelSink + ?Sized>(
        sink: &mut S,
        x0: i32,
        y0: i32,
        x1: i32,
        y1: i32,
        dash: u32,
        gap: u32,
        color: u16,
    ) -> usize {
        let dx = (x1 - x0) as f64;
        let dy = (y1 - y0) as f64;
        let length = dx.hypot(dy);
        if length <= 0.0 {
            return 0;
        }

        let period = (dash + gap).max(1) as f64;
        let count = ((length / period) as usize).max(1);
        let at = |t: f64| {
            (
                (x0 as f64 + dx * t + 0.5) as i32,
                (y0 as f64 + dy * t + 0.5) as i32,
            )
        };

        for j in 0..count {
            let start = j as f64 * period;
            let t_start = start / length;
            let t_end = ((start + dash as f64) / length).min(1.0);
            let (xs, ys) = at(t_start);
            let (xe, ye) = at(t_end);
            Self::draw_line(sink, xs, ys, xe, ye, color);
        }
        count
    }

    /// Renders `text` with the 3x5 font; returns the x after the last glyph.
    pub fn draw_text<S: PixelSink + ?Sized>(
        sink: &mut S,
        font: &TinyFont,
        text: &str,
        x: i32,
        y: i32,
        color: u16,
    ) -> i32 {
        let mut cursor = x;
        for ch in text.chars() {
            let Some(rows) = font.glyph(ch) else {
                continue;
            };
            for (row, bits) in rows.iter().enumerate() {
                for col in 0..TinyFont::WIDTH {
                    if bits & (1 << (TinyFont::WIDTH - 1 - col)) != 0 {
                        sink.set_pixel(cursor + col as i32, y + row as i32, color);
                    }
                }
            }
            cursor += TinyFont::ADVANCE;
        }
        cursor
    }

    /// Blits the "on" pixels of `icon` with its top-left corner at `(x, y)`.
    pub fn draw_icon<S: PixelSink + ?Sized>(sink: &mut S, icon: &IconBitmap, x: i32, y: i32, color: u16) {
        for row in 0..icon.height() {
            for col in 0..icon.width() {
                if icon.is_on(col, row) {
                    sink.set_pixel(x + col as i32, y + row as i32, color);
                }
            }
        }
    }

    /// Blits the set bits of a 1-bpp raster in `color`; unset bits are left
    /// untouched.
    pub fn draw_bitmap<S: PixelSink + ?Sized>(sink: &mut S, bitmap: &MonoBitmap, x: i32, y: i32, color: u16) {
        for row in 0..bitmap.height() {
            for col in 0..bitmap.width() {
                if bitmap.is_set(col, row) {
                    sink.set_pixel(x + col as i32, y + row as i32, color);
                }
            }
        }
    }
}
