//! Owned 1bpp canvas with byte-padded rows.

use alloc::{boxed::Box, vec};

/// Number of storage bytes for one row of `width` pixels.
#[inline]
pub const fn row_bytes(width: u16) -> usize {
    (width as usize).div_ceil(8)
}

#[inline]
const fn bit_mask(x: usize) -> u8 {
    0x80 >> (x % 8)
}

/// 1bpp canvas sized once at construction.
///
/// Bit mapping within one row byte: bit 7 is the first pixel in that byte.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Canvas {
    width: u16,
    height: u16,
    stride: usize,
    bytes: Box<[u8]>,
}

impl Canvas {
    /// Allocates a cleared canvas of `width` x `height` pixels.
    pub fn new(width: u16, height: u16) -> Self {
        let stride = row_bytes(width);
        Self {
            width,
            height,
            stride,
            bytes: vec![0u8; stride * height as usize].into_boxed_slice(),
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Bytes per row.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Returns the underlying canvas bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns mutable canvas bytes.
    pub fn bytes_mut(&mut self) -> &mut [u8] {
        &mut self.bytes
    }

    #[inline]
    fn byte_index(&self, x: usize, y: usize) -> Option<usize> {
        if x >= self.width as usize || y >= self.height as usize {
            return None;
        }

        Some(y * self.stride + (x / 8))
    }

    /// Turns a pixel on.
    ///
    /// Returns `true` when pixel is in bounds, `false` otherwise.
    pub fn set_pixel(&mut self, x: usize, y: usize) -> bool {
        self.write_pixel(x, y, true)
    }

    /// Turns a pixel off.
    pub fn clear_pixel(&mut self, x: usize, y: usize) -> bool {
        self.write_pixel(x, y, false)
    }

    /// Writes a pixel state.
    pub fn write_pixel(&mut self, x: usize, y: usize, on: bool) -> bool {
        let Some(index) = self.byte_index(x, y) else {
            return false;
        };

        if on {
            self.bytes[index] |= bit_mask(x);
        } else {
            self.bytes[index] &= !bit_mask(x);
        }

        true
    }

    /// Reads a pixel state.
    pub fn pixel(&self, x: usize, y: usize) -> Option<bool> {
        let index = self.byte_index(x, y)?;
        Some((self.bytes[index] & bit_mask(x)) != 0)
    }

    /// Reads a pixel, treating out-of-bounds coordinates as off.
    #[inline]
    pub fn test_pixel(&self, x: usize, y: usize) -> bool {
        self.pixel(x, y).unwrap_or(false)
    }

    /// Clears every pixel.
    pub fn clear_all(&mut self) {
        self.bytes.fill(0x00);
    }

    /// Clears rows `y0..y1`; the range is clamped to the canvas.
    pub fn clear_rows(&mut self, y0: usize, y1: usize) {
        let y1 = y1.min(self.height as usize);
        if y0 >= y1 {
            return;
        }

        self.bytes[y0 * self.stride..y1 * self.stride].fill(0x00);
    }

    /// Sets or clears pixels `x0..x1` of row `y`, one byte mask at a time.
    ///
    /// The span is clamped to the row; rows outside the canvas are ignored.
    pub fn fill_span(&mut self, y: usize, x0: usize, x1: usize, on: bool) {
        let x1 = x1.min(self.width as usize);
        if y >= self.height as usize || x0 >= x1 {
            return;
        }

        let row = y * self.stride;
        let (first, last) = (x0 / 8, (x1 - 1) / 8);
        for byte in first..=last {
            let lo = if byte == first { x0 % 8 } else { 0 };
            let hi = if byte == last { (x1 - 1) % 8 + 1 } else { 8 };
            let mask = (0xFF >> lo) & (0xFF_u16 << (8 - hi)) as u8;

            if on {
                self.bytes[row + byte] |= mask;
            } else {
                self.bytes[row + byte] &= !mask;
            }
        }
    }

    /// Returns the packed bytes of row `y`.
    pub fn row(&self, y: usize) -> Option<&[u8]> {
        if y >= self.height as usize {
            return None;
        }

        let start = y * self.stride;
        Some(&self.bytes[start..start + self.stride])
    }

    /// ORs an 8-pixel MSB-first segment whose first pixel lands on column `x`.
    ///
    /// `x` may be negative down to `-7`: the visible tail of the segment is
    /// shifted into byte 0. When `x` is not byte aligned the segment straddles
    /// two bytes and the spill goes into the following byte, but only while
    /// that byte lies below `row_bytes(x_end)` and inside the row.
    ///
    /// Returns `false` when nothing could be written.
    pub fn or_bits(&mut self, x: isize, y: usize, bits: u8, x_end: usize) -> bool {
        if x <= -8 || x >= self.width as isize || y >= self.height as usize {
            return false;
        }

        let row = y * self.stride;

        if x < 0 {
            self.bytes[row] |= bits << (-x) as u32;
            return true;
        }

        let x = x as usize;
        let byte = x / 8;
        let shift = (x % 8) as u32;
        self.bytes[row + byte] |= bits >> shift;

        let limit = row_bytes(x_end.min(u16::MAX as usize) as u16).min(self.stride);
        if shift != 0 && byte + 1 < limit {
            self.bytes[row + byte + 1] |= bits << (8 - shift);
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn pixel_bit_mapping_is_msb_first_within_byte() {
        let mut canvas = Canvas::new(16, 2);

        assert!(canvas.set_pixel(0, 0));
        assert!(canvas.set_pixel(7, 0));
        assert!(canvas.set_pixel(8, 0));

        let row = canvas.row(0).unwrap();
        assert_eq!(row[0], 0b1000_0001);
        assert_eq!(row[1], 0b1000_0000);
        assert_eq!(canvas.row(1).unwrap(), &[0, 0]);
    }

    #[test]
    fn rows_are_padded_to_whole_bytes() {
        let canvas = Canvas::new(13, 5);

        assert_eq!(canvas.stride(), 2);
        assert_eq!(canvas.bytes().len(), 10);
        assert_eq!(row_bytes(0), 0);
        assert_eq!(row_bytes(8), 1);
        assert_eq!(row_bytes(9), 2);
    }

    #[test]
    fn out_of_bounds_pixel_is_ignored() {
        let mut canvas = Canvas::new(13, 5);

        assert!(!canvas.set_pixel(13, 0));
        assert!(!canvas.set_pixel(0, 5));
        assert_eq!(canvas.pixel(13, 0), None);
        assert!(!canvas.test_pixel(0, 5));
        assert!(canvas.bytes().iter().all(|b| *b == 0));
    }

    #[test]
    fn clear_pixel_only_touches_its_bit() {
        let mut canvas = Canvas::new(8, 1);
        canvas.bytes_mut()[0] = 0xFF;

        assert!(canvas.clear_pixel(3, 0));
        assert_eq!(canvas.bytes()[0], 0b1110_1111);
    }

    #[test]
    fn clear_rows_is_half_open_and_clamped() {
        let mut canvas = Canvas::new(8, 4);
        canvas.bytes_mut().fill(0xFF);

        canvas.clear_rows(1, 3);
        assert_eq!(canvas.bytes(), &[0xFF, 0x00, 0x00, 0xFF]);

        canvas.clear_rows(3, 99);
        assert_eq!(canvas.bytes(), &[0xFF, 0x00, 0x00, 0x00]);

        canvas.clear_rows(2, 1);
        assert_eq!(canvas.bytes()[0], 0xFF);

        canvas.clear_all();
        assert!(canvas.bytes().iter().all(|b| *b == 0));
    }

    #[test]
    fn fill_span_masks_partial_bytes() {
        let mut canvas = Canvas::new(20, 2);

        canvas.fill_span(1, 3, 13, true);
        assert_eq!(canvas.row(1).unwrap(), &[0b0001_1111, 0b1111_1000, 0]);
        assert_eq!(canvas.row(0).unwrap(), &[0, 0, 0]);

        canvas.fill_span(1, 4, 10, false);
        assert_eq!(canvas.row(1).unwrap(), &[0b0001_0000, 0b0011_1000, 0]);

        // clamped to the 20 px row
        canvas.fill_span(0, 18, 40, true);
        assert_eq!(canvas.row(0).unwrap(), &[0, 0, 0b0011_0000]);

        canvas.fill_span(0, 5, 5, true);
        canvas.fill_span(2, 0, 20, true);
        assert_eq!(canvas.row(0).unwrap(), &[0, 0, 0b0011_0000]);
    }

    #[test]
    fn aligned_segment_writes_one_byte() {
        let mut canvas = Canvas::new(24, 1);

        assert!(canvas.or_bits(8, 0, 0b1010_1010, 24));
        assert_eq!(canvas.bytes(), &[0x00, 0b1010_1010, 0x00]);
    }

    #[test]
    fn straddling_segment_splits_across_two_bytes() {
        let mut canvas = Canvas::new(24, 1);

        assert!(canvas.or_bits(5, 0, 0b1111_1000, 24));
        // columns 5..10
        assert_eq!(canvas.bytes(), &[0b0000_0111, 0b1100_0000, 0x00]);
        for x in 0..24 {
            assert_eq!(canvas.test_pixel(x, 0), (5..10).contains(&x), "x={x}");
        }
    }

    #[test]
    fn straddle_ors_into_existing_bits() {
        let mut canvas = Canvas::new(16, 1);
        canvas.bytes_mut()[0] = 0b1000_0000;
        canvas.bytes_mut()[1] = 0b0000_0001;

        canvas.or_bits(3, 0, 0xFF, 16);
        assert_eq!(canvas.bytes(), &[0b1001_1111, 0b1110_0001]);
    }

    #[test]
    fn negative_offset_shifts_tail_into_first_byte() {
        let mut canvas = Canvas::new(16, 1);

        assert!(canvas.or_bits(-3, 0, 0b1111_1000, 16));
        assert_eq!(canvas.bytes(), &[0b1100_0000, 0x00]);

        assert!(!canvas.or_bits(-8, 0, 0xFF, 16));
        assert_eq!(canvas.bytes(), &[0b1100_0000, 0x00]);
    }

    #[test]
    fn spill_stops_at_window_end_byte() {
        let mut canvas = Canvas::new(32, 1);

        // window ends at column 16, the spill would land in byte 2
        canvas.or_bits(13, 0, 0xFF, 16);
        assert_eq!(canvas.bytes(), &[0x00, 0b0000_0111, 0x00, 0x00]);

        // a window end inside byte 2 still admits the spill
        canvas.clear_all();
        canvas.or_bits(13, 0, 0xFF, 17);
        assert_eq!(canvas.bytes(), &[0x00, 0b0000_0111, 0b1111_1000, 0x00]);
    }

    #[test]
    fn spill_never_leaves_the_row() {
        let mut canvas = Canvas::new(12, 2);

        canvas.or_bits(10, 0, 0xFF, 12);
        assert_eq!(canvas.row(0).unwrap(), &[0x00, 0b0011_1111]);
        assert_eq!(canvas.row(1).unwrap(), &[0x00, 0x00]);
    }

    proptest! {
        #[test]
        fn set_pixel_does_not_alias(
            width in 1u16..40,
            height in 1u16..12,
            seed in proptest::collection::vec((0usize..40, 0usize..12), 0..24),
            target in (0usize..40, 0usize..12),
        ) {
            let mut canvas = Canvas::new(width, height);
            let in_bounds = |(x, y): (usize, usize)| x < width as usize && y < height as usize;

            for &(x, y) in seed.iter().filter(|p| in_bounds(**p)) {
                canvas.set_pixel(x, y);
            }
            let before = canvas.clone();

            let (tx, ty) = (target.0 % width as usize, target.1 % height as usize);
            prop_assert!(canvas.set_pixel(tx, ty));
            prop_assert!(canvas.test_pixel(tx, ty));

            for y in 0..height as usize {
                for x in 0..width as usize {
                    if (x, y) != (tx, ty) {
                        prop_assert_eq!(canvas.test_pixel(x, y), before.test_pixel(x, y));
                    }
                }
            }
        }

        #[test]
        fn or_bits_matches_per_pixel_writes(
            x in -7isize..40,
            bits in any::<u8>(),
        ) {
            let mut packed = Canvas::new(40, 1);
            let mut reference = Canvas::new(40, 1);

            packed.or_bits(x, 0, bits, 40);
            for i in 0..8isize {
                let px = x + i;
                if bits & (0x80 >> i) != 0 && px >= 0 {
                    reference.set_pixel(px as usize, 0);
                }
            }

            prop_assert_eq!(packed.bytes(), reference.bytes());
        }
    }
}
