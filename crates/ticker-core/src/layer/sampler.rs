use super::ScrollLayer;

/// Layer color at one hardware pixel.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Sample<C> {
    /// Keep whatever lower layers put there.
    Transparent,
    Ink(C),
    Fill(C),
}

impl<C: Copy> Sample<C> {
    pub fn color(self) -> Option<C> {
        match self {
            Self::Transparent => None,
            Self::Ink(color) | Self::Fill(color) => Some(color),
        }
    }
}

impl<C: Copy> ScrollLayer<C> {
    /// Panel size after rotation, as `(width, height)`.
    pub fn hardware_size(&self) -> (u16, u16) {
        self.rotation
            .hardware_size(self.ink.width(), self.ink.height())
    }

    /// Canvas pixel for a hardware pixel, if it lies inside the window.
    #[inline]
    fn window_pixel(&self, hx: u16, hy: u16) -> Option<(usize, usize)> {
        let mapped = self
            .rotation
            .to_canvas(hx, hy, self.ink.width(), self.ink.height());
        debug_assert!(
            mapped.is_some(),
            "hardware pixel ({hx},{hy}) outside {:?}",
            self.hardware_size()
        );

        let (x, y) = mapped?;
        self.window
            .contains(x, y)
            .then_some((x as usize, y as usize))
    }

    /// Whether the ink mask is set at a hardware pixel.
    pub fn ink_pixel(&self, hx: u16, hy: u16) -> bool {
        self.window_pixel(hx, hy)
            .is_some_and(|(x, y)| self.ink.test_pixel(x, y))
    }

    /// Whether the background mask is set at a hardware pixel.
    pub fn fill_pixel(&self, hx: u16, hy: u16) -> bool {
        self.window_pixel(hx, hy)
            .is_some_and(|(x, y)| self.fill.test_pixel(x, y))
    }

    /// Composited layer color at a hardware pixel.
    ///
    /// `hx` and `hy` must lie inside [`Self::hardware_size`]; debug builds
    /// assert this, release builds report such pixels as transparent.
    pub fn sample(&self, hx: u16, hy: u16) -> Sample<C> {
        let Some((x, y)) = self.window_pixel(hx, hy) else {
            return Sample::Transparent;
        };

        if self.ink.test_pixel(x, y) {
            Sample::Ink(self.foreground)
        } else if self.draw_background && self.fill.test_pixel(x, y) {
            Sample::Fill(self.background)
        } else {
            Sample::Transparent
        }
    }

    /// Writes every opaque pixel of hardware row `hy` into `row`.
    ///
    /// Transparent pixels are left untouched. `row` is indexed by hardware x
    /// and may be shorter or longer than the panel width.
    pub fn fill_refresh_row(&self, hy: u16, row: &mut [C]) {
        let (width, height) = self.hardware_size();
        if hy >= height {
            return;
        }

        for (hx, pixel) in (0..width).zip(row.iter_mut()) {
            if let Some(color) = self.sample(hx, hy).color() {
                *pixel = color;
            }
        }
    }
}
