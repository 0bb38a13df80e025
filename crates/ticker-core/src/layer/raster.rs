//! Full repaint of the text into the ink and fill canvases.

use super::ScrollLayer;
use crate::motion::ScrollMode;

/// Fill-mask segment covering `remaining` glyph columns.
#[inline]
const fn span_mask(remaining: i32) -> u8 {
    if remaining >= 8 {
        0xFF
    } else {
        0xFF << (8 - remaining)
    }
}

impl<C: Copy> ScrollLayer<C> {
    /// Repaints the text at the current scroll position.
    ///
    /// Only the rows covered by the font inside the window are cleared, unless
    /// a major change forces a full clear.
    pub(super) fn redraw(&mut self) {
        if self.major_change {
            self.ink.clear_all();
            self.fill.clear_all();
            self.major_change = false;
        }

        let top = self.window.y as i32 + self.top_offset;
        let band_start = top.max(self.window.y as i32);
        let band_end = (top + self.font.height as i32).min(self.window.y_end() as i32);
        if band_start >= band_end {
            return;
        }

        self.ink
            .clear_rows(band_start as usize, band_end as usize);
        self.fill
            .clear_rows(band_start as usize, band_end as usize);

        if self.motion.mode == ScrollMode::Off {
            return;
        }

        let font = self.font;
        let x_end = self.window.x_end() as i32;
        let first_glyph_row = band_start - top;

        let mut char_x = self.motion.position;
        let mut index = 0;

        // skip glyphs entirely left of column 0
        while let Some(&slot) = self.slots.get(index) {
            let width = font.slot_width(slot) as i32;
            if char_x + width >= 0 {
                break;
            }
            char_x += width;
            index += 1;
        }

        while let Some(&slot) = self.slots.get(index) {
            if char_x >= x_end {
                break;
            }

            let width = font.slot_width(slot) as i32;
            for (canvas_y, glyph_row) in (band_start..band_end).zip(first_glyph_row..) {
                let canvas_y = canvas_y as usize;

                for column in (0..width).step_by(8) {
                    let x = char_x + column;
                    if x <= -8 || x >= x_end {
                        continue;
                    }

                    let bits = font.slot_row(slot, column as u8, glyph_row as u8);
                    self.ink.or_bits(x as isize, canvas_y, bits, x_end as usize);
                    if self.draw_background {
                        self.fill.or_bits(
                            x as isize,
                            canvas_y,
                            span_mask(width - column),
                            x_end as usize,
                        );
                    }
                }
            }

            char_x += width;
            index += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::span_mask;

    #[test]
    fn span_mask_covers_leading_columns() {
        assert_eq!(span_mask(8), 0xFF);
        assert_eq!(span_mask(12), 0xFF);
        assert_eq!(span_mask(5), 0b1111_1000);
        assert_eq!(span_mask(1), 0b1000_0000);
    }
}
