//! Configuration errors reported by the scrolling layer.

use core::fmt;

/// Rejected configuration. The layer is left unchanged when one is returned.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LayerError {
    /// The text holds a character the current font cannot draw.
    MissingGlyph(char),
    /// The requested window does not fit inside the canvas.
    WindowOutOfBounds,
    /// Font table dimensions are inconsistent with its bitmap.
    InvalidFont,
}

impl fmt::Display for LayerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingGlyph(c) => write!(f, "font has no glyph for {c:?}"),
            Self::WindowOutOfBounds => f.write_str("window exceeds canvas bounds"),
            Self::InvalidFont => f.write_str("font table is inconsistent"),
        }
    }
}

impl core::error::Error for LayerError {}
