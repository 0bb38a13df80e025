//! Layer construction settings and geometry helpers.

use crate::motion::ScrollMode;

/// Panel rotation applied between hardware and canvas coordinates.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    /// Hardware panel size for a canvas of `width` x `height`.
    pub const fn hardware_size(self, width: u16, height: u16) -> (u16, u16) {
        match self {
            Self::Deg0 | Self::Deg180 => (width, height),
            Self::Deg90 | Self::Deg270 => (height, width),
        }
    }

    /// Maps a hardware pixel onto a `width` x `height` canvas.
    ///
    /// Returns `None` when the hardware pixel lies outside the panel.
    pub fn to_canvas(self, hx: u16, hy: u16, width: u16, height: u16) -> Option<(u16, u16)> {
        let (hw_width, hw_height) = self.hardware_size(width, height);
        if hx >= hw_width || hy >= hw_height {
            return None;
        }

        Some(match self {
            Self::Deg0 => (hx, hy),
            Self::Deg180 => (width - 1 - hx, height - 1 - hy),
            Self::Deg90 => (hy, hw_width - 1 - hx),
            Self::Deg270 => (hw_height - 1 - hy, hx),
        })
    }
}

/// Visible rectangle of the canvas, in canvas pixels.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Window {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Window {
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Exclusive right edge.
    pub const fn x_end(&self) -> u32 {
        self.x as u32 + self.width as u32
    }

    /// Exclusive bottom edge.
    pub const fn y_end(&self) -> u32 {
        self.y as u32 + self.height as u32
    }

    pub const fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x && (x as u32) < self.x_end() && y >= self.y && (y as u32) < self.y_end()
    }

    /// Whether the window lies inside a `width` x `height` canvas.
    pub const fn fits(&self, width: u16, height: u16) -> bool {
        self.x_end() <= width as u32 && self.y_end() <= height as u32
    }
}

/// Settings resolved once when a layer is built.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct LayerConfig {
    /// Canvas width in pixels, before rotation.
    pub width: u16,
    /// Canvas height in pixels, before rotation.
    pub height: u16,
    pub rotation: Rotation,
    /// Display refresh callbacks per second.
    pub refresh_rate_hz: u16,
    /// Scroll speed. Zero is treated as one.
    pub pixels_per_second: u16,
    pub mode: ScrollMode,
}

impl Default for LayerConfig {
    fn default() -> Self {
        Self {
            width: 32,
            height: 32,
            rotation: Rotation::Deg0,
            refresh_rate_hz: 120,
            pixels_per_second: 30,
            mode: ScrollMode::WrapForward,
        }
    }
}

impl LayerConfig {
    /// Window covering the whole canvas.
    pub const fn full_window(&self) -> Window {
        Window::new(0, 0, self.width, self.height)
    }
}

/// Outcome of one refresh-frame tick.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TickResult {
    Idle,
    Redrawn,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_rotation_passes_coordinates_through() {
        assert_eq!(Rotation::Deg0.to_canvas(3, 5, 32, 16), Some((3, 5)));
        assert_eq!(Rotation::Deg0.to_canvas(32, 5, 32, 16), None);
    }

    #[test]
    fn half_turn_mirrors_both_axes() {
        assert_eq!(Rotation::Deg180.to_canvas(0, 0, 32, 16), Some((31, 15)));
        assert_eq!(Rotation::Deg180.to_canvas(31, 15, 32, 16), Some((0, 0)));
    }

    #[test]
    fn quarter_turns_swap_panel_axes() {
        // 32x16 canvas mounted on a 16x32 panel
        assert_eq!(Rotation::Deg90.hardware_size(32, 16), (16, 32));
        assert_eq!(Rotation::Deg90.to_canvas(0, 0, 32, 16), Some((0, 15)));
        assert_eq!(Rotation::Deg90.to_canvas(15, 31, 32, 16), Some((31, 0)));
        assert_eq!(Rotation::Deg90.to_canvas(16, 0, 32, 16), None);

        assert_eq!(Rotation::Deg270.to_canvas(0, 0, 32, 16), Some((31, 0)));
        assert_eq!(Rotation::Deg270.to_canvas(15, 31, 32, 16), Some((0, 15)));
        assert_eq!(Rotation::Deg270.to_canvas(0, 32, 32, 16), None);
    }

    #[test]
    fn every_rotation_is_a_bijection() {
        for rotation in [
            Rotation::Deg0,
            Rotation::Deg90,
            Rotation::Deg180,
            Rotation::Deg270,
        ] {
            let (hw, hh) = rotation.hardware_size(6, 4);
            let mut seen = [[false; 6]; 4];
            for hy in 0..hh {
                for hx in 0..hw {
                    let (x, y) = rotation.to_canvas(hx, hy, 6, 4).unwrap();
                    assert!(!seen[y as usize][x as usize], "{rotation:?} ({hx},{hy})");
                    seen[y as usize][x as usize] = true;
                }
            }
        }
    }

    #[test]
    fn window_edges_are_exclusive() {
        let window = Window::new(2, 1, 4, 3);

        assert_eq!(window.x_end(), 6);
        assert_eq!(window.y_end(), 4);
        assert!(window.contains(2, 1));
        assert!(window.contains(5, 3));
        assert!(!window.contains(6, 3));
        assert!(!window.contains(1, 1));
        assert!(window.fits(6, 4));
        assert!(!window.fits(5, 4));
    }
}
