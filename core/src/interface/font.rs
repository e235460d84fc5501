/// 3x5 bitmap font covering digits, hemisphere letters and a few marks.
///
/// Each glyph is five rows, most significant of the low three bits on
/// the left.
#[derive(Debug, Clone, Copy, Default)]
pub struct TinyFont;

impl TinyFont {
    pub const WIDTH: usize = 3;
    pub const HEIGHT: usize = 5;
    /// Horizontal distance between glyph origins.
    pub const ADVANCE: i32 = 4;

    pub fn glyph(&self, ch: char) -> Option<[u8; 5]> {
        let rows = match ch {
            '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
            '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
            '2' => [0b111, 0b001, 0b111, 0b100, 0b111],
            '3' => [0b111, 0b001, 0b111, 0b001, 0b111],
            '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
            '5' | 'S' => [0b111, 0b100, 0b111, 0b001, 0b111],
            '6' => [0b111, 0b100, 0b111, 0b101, 0b111],
            '7' => [0b111, 0b001, 0b010, 0b010, 0b010],
            '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
            '9' => [0b111, 0b101, 0b111, 0b001, 0b111],
            '.' => [0b000, 0b000, 0b000, 0b000, 0b010],
            'N' => [0b101, 0b111, 0b111, 0b111, 0b101],
            'E' => [0b111, 0b100, 0b111, 0b100, 0b111],
            'W' => [0b101, 0b101, 0b101, 0b101, 0b111],
            '-' => [0b000, 0b000, 0b111, 0b000, 0b000],
            ' ' => [0; 5],
            _ => return None,
        };
        Some(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_characters_are_covered() {
        let font = TinyFont;
        for ch in "0123456789.NSEW -".chars() {
            assert!(font.glyph(ch).is_some(), "missing glyph {ch:?}");
        }
        assert!(font.glyph('x').is_none());
    }

    #[test]
    fn glyph_rows_fit_three_columns() {
        let font = TinyFont;
        for ch in "0123456789.NSEW-".chars() {
            let rows = font.glyph(ch).unwrap_or_default();
            assert!(rows.iter().all(|row| *row < 0b1000));
        }
    }
}
