//! Built-in 5x8 fonts covering printable ASCII.
//!
//! Both fonts are rasterized at compile time from one column-major table.
//! [`FONT_5X8`] places every glyph in a fixed 6 px cell; [`FONT_5X8_PROPORTIONAL`]
//! trims blank columns and keeps one column of spacing.

mod data;

use data::{COLUMNS, COUNT, FIRST};

use crate::font::{BitmapFont, GlyphIndex};

const HEIGHT: usize = 8;
const SPACE_ADVANCE: u8 = 3;

static MONO_BITMAP: [u8; COUNT * HEIGHT] = rasterize(&COLUMNS, &[0; COUNT]);
const PROP_LEFT: [u8; COUNT] = left_trim(&COLUMNS);
static PROP_BITMAP: [u8; COUNT * HEIGHT] = rasterize(&COLUMNS, &PROP_LEFT);
static PROP_WIDTHS: [u8; COUNT] = advances(&COLUMNS);

/// Fixed-cell font: 5 px glyphs in a 6 px cell, 8 rows.
pub static FONT_5X8: BitmapFont = BitmapFont {
    width: 6,
    height: HEIGHT as u8,
    glyph_count: COUNT as u16,
    index: GlyphIndex::Contiguous { first: FIRST },
    bitmap: &MONO_BITMAP,
    widths: None,
};

/// Proportional variant of [`FONT_5X8`].
pub static FONT_5X8_PROPORTIONAL: BitmapFont = BitmapFont {
    width: 6,
    height: HEIGHT as u8,
    glyph_count: COUNT as u16,
    index: GlyphIndex::Contiguous { first: FIRST },
    bitmap: &PROP_BITMAP,
    widths: Some(&PROP_WIDTHS),
};

const fn rasterize(columns: &[[u8; 5]; COUNT], left: &[u8; COUNT]) -> [u8; COUNT * HEIGHT] {
    let mut out = [0u8; COUNT * HEIGHT];
    let mut glyph = 0;
    while glyph < COUNT {
        let mut col = left[glyph] as usize;
        while col < 5 {
            let bits = columns[glyph][col];
            let mut row = 0;
            while row < HEIGHT {
                if bits & (1 << row) != 0 {
                    out[glyph * HEIGHT + row] |= 0x80 >> (col - left[glyph] as usize);
                }
                row += 1;
            }
            col += 1;
        }
        glyph += 1;
    }
    out
}

const fn left_trim(columns: &[[u8; 5]; COUNT]) -> [u8; COUNT] {
    let mut out = [0u8; COUNT];
    let mut glyph = 0;
    while glyph < COUNT {
        let mut col = 0;
        while col < 5 && columns[glyph][col] == 0 {
            col += 1;
        }
        out[glyph] = if col == 5 { 0 } else { col as u8 };
        glyph += 1;
    }
    out
}

const fn advances(columns: &[[u8; 5]; COUNT]) -> [u8; COUNT] {
    let mut out = [0u8; COUNT];
    let mut glyph = 0;
    while glyph < COUNT {
        let mut left = 5;
        let mut right = 0;
        let mut col = 0;
        while col < 5 {
            if columns[glyph][col] != 0 {
                if col < left {
                    left = col;
                }
                right = col;
            }
            col += 1;
        }
        out[glyph] = if left > right {
            SPACE_ADVANCE
        } else {
            (right - left + 2) as u8
        };
        glyph += 1;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(font: &BitmapFont, c: u8) -> [u8; HEIGHT] {
        core::array::from_fn(|row| font.glyph_row(c, 0, row as u8))
    }

    #[test]
    fn builtin_fonts_validate() {
        assert_eq!(FONT_5X8.validate(), Ok(()));
        assert_eq!(FONT_5X8_PROPORTIONAL.validate(), Ok(()));
        assert!(FONT_5X8.contains(b' '));
        assert!(FONT_5X8.contains(b'~'));
        assert!(!FONT_5X8.contains(0x7F));
        assert!(!FONT_5X8.contains(b'\n'));
    }

    #[test]
    fn mono_glyphs_are_transposed_from_columns() {
        assert_eq!(
            rows(&FONT_5X8, b'H'),
            [0x88, 0x88, 0x88, 0xF8, 0x88, 0x88, 0x88, 0x00]
        );
        assert_eq!(
            rows(&FONT_5X8, b'I'),
            [0x70, 0x20, 0x20, 0x20, 0x20, 0x20, 0x70, 0x00]
        );
        assert_eq!(FONT_5X8.glyph_width(b'H'), 6);
    }

    #[test]
    fn descenders_use_the_bottom_row() {
        assert_eq!(FONT_5X8.glyph_row(b',', 0, 7), 0b0100_0000);
    }

    #[test]
    fn proportional_glyphs_are_left_aligned() {
        // 'I' occupies columns 1..=3 of its cell
        assert_eq!(FONT_5X8_PROPORTIONAL.glyph_width(b'I'), 4);
        assert_eq!(
            rows(&FONT_5X8_PROPORTIONAL, b'I'),
            [0xE0, 0x40, 0x40, 0x40, 0x40, 0x40, 0xE0, 0x00]
        );
        assert_eq!(FONT_5X8_PROPORTIONAL.glyph_width(b'W'), 6);
        assert_eq!(FONT_5X8_PROPORTIONAL.glyph_width(b' '), SPACE_ADVANCE);
        assert_eq!(FONT_5X8_PROPORTIONAL.glyph_width(b'.'), 3);
    }
}
