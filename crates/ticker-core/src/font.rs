//! Bitmap font tables and glyph lookup.
//!
//! Glyph bitmaps are stored glyph after glyph, row after row, each row padded
//! to `ceil(width / 8)` bytes with the leftmost pixel in bit 7.

use crate::error::LayerError;

/// Maps character codes to glyph slots.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum GlyphIndex {
    /// Slot `i` holds code `first + i`.
    Contiguous { first: u8 },
    /// Slot `i` holds `codes[i]`. Codes must be sorted ascending.
    Sparse(&'static [u8]),
}

/// Immutable, externally owned font table.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct BitmapFont {
    /// Cell width; also the width of every glyph when `widths` is `None`.
    pub width: u8,
    pub height: u8,
    pub glyph_count: u16,
    pub index: GlyphIndex,
    pub bitmap: &'static [u8],
    /// Optional per-glyph widths, one per slot.
    pub widths: Option<&'static [u8]>,
}

impl BitmapFont {
    /// Bytes per glyph row.
    #[inline]
    pub const fn row_bytes(&self) -> usize {
        (self.width as usize).div_ceil(8)
    }

    #[inline]
    const fn glyph_bytes(&self) -> usize {
        self.row_bytes() * self.height as usize
    }

    /// Slot of `code`, or `None` when the font has no glyph for it.
    pub fn glyph_slot(&self, code: u8) -> Option<u16> {
        match self.index {
            GlyphIndex::Contiguous { first } => {
                let slot = code.checked_sub(first)? as u16;
                (slot < self.glyph_count).then_some(slot)
            }
            GlyphIndex::Sparse(codes) => codes
                .get(..self.glyph_count as usize)?
                .binary_search(&code)
                .ok()
                .map(|slot| slot as u16),
        }
    }

    pub fn contains(&self, code: u8) -> bool {
        self.glyph_slot(code).is_some()
    }

    /// Checks that the table dimensions agree with its bitmap.
    pub fn validate(&self) -> Result<(), LayerError> {
        if self.width == 0 || self.height == 0 {
            return Err(LayerError::InvalidFont);
        }

        let slots = self.glyph_count as usize;
        if self.bitmap.len() < slots * self.glyph_bytes() {
            return Err(LayerError::InvalidFont);
        }

        if let GlyphIndex::Sparse(codes) = self.index {
            if codes.len() < slots || codes[..slots].windows(2).any(|pair| pair[0] >= pair[1]) {
                return Err(LayerError::InvalidFont);
            }
        }

        if let Some(widths) = self.widths {
            if widths.len() < slots || widths[..slots].iter().any(|w| *w > self.width) {
                return Err(LayerError::InvalidFont);
            }
        }

        Ok(())
    }

    /// Pixel width of the glyph in `slot`.
    #[inline]
    pub fn slot_width(&self, slot: u16) -> u8 {
        match self.widths {
            Some(widths) => widths[slot as usize],
            None => self.width,
        }
    }

    /// Up to eight pixels of glyph `slot`, row `row`, starting at `column`.
    ///
    /// Pixels past the glyph width are always clear.
    pub fn slot_row(&self, slot: u16, column: u8, row: u8) -> u8 {
        let width = self.slot_width(slot);
        if column >= width || row >= self.height {
            return 0;
        }

        let row_bytes = self.row_bytes();
        let base = slot as usize * self.glyph_bytes() + row as usize * row_bytes;
        let byte = column as usize / 8;
        let shift = column % 8;

        let mut bits = self.bitmap[base + byte] << shift;
        if shift != 0 && byte + 1 < row_bytes {
            bits |= self.bitmap[base + byte + 1] >> (8 - shift);
        }

        let remaining = width - column;
        if remaining < 8 {
            bits &= 0xFF << (8 - remaining);
        }
        bits
    }

    /// Pixel width of the glyph for `code`.
    ///
    /// `code` must be present in the font; missing codes report width 0.
    pub fn glyph_width(&self, code: u8) -> u8 {
        self.glyph_slot(code)
            .map_or(0, |slot| self.slot_width(slot))
    }

    /// Up to eight packed pixels of glyph `code`, row `row`, from `column`.
    ///
    /// `code` must be present in the font; missing codes read as blank.
    pub fn glyph_row(&self, code: u8, column: u8, row: u8) -> u8 {
        self.glyph_slot(code)
            .map_or(0, |slot| self.slot_row(slot, column, row))
    }
}

/// ASCII base letter for each Latin-1 code in `0xC0..=0xFF`, or 0 for none.
const LATIN1_LETTERS: &[u8; 64] =
    b"AAAAAA\0CEEEEIIIIDNOOOOOxOUUUUY\0\0aaaaaa\0ceeeeiiiidnooooo/ouuuuy\0y";

/// Folds Latin-1 letters and typographic punctuation onto printable ASCII.
///
/// The built-in fonts only carry `0x20..=0x7E`; ligatures and letters with no
/// ASCII base (Æ, ß, Þ) are returned unchanged.
pub fn fold_char(c: char) -> char {
    match c {
        '\u{C0}'..='\u{FF}' => match LATIN1_LETTERS[c as usize - 0xC0] {
            0 => c,
            base => char::from(base),
        },
        '\u{A0}' => ' ',
        '\u{B4}' | '\u{2018}'..='\u{201B}' => '\'',
        '\u{201C}'..='\u{201F}' => '"',
        '\u{2010}'..='\u{2015}' => '-',
        '\u{2026}' => '.',
        _ => c,
    }
}

/// Character code used to look `c` up in a font.
///
/// Codes the font carries are used as-is, so fonts with Latin-1 glyphs keep
/// them; anything else is folded first.
pub fn char_code(font: &BitmapFont, c: char) -> Result<u8, LayerError> {
    let lookup = |c: char| {
        u8::try_from(u32::from(c))
            .ok()
            .filter(|code| font.contains(*code))
    };

    lookup(c)
        .or_else(|| lookup(fold_char(c)))
        .ok_or(LayerError::MissingGlyph(c))
}
