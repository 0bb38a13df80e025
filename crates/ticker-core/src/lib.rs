#![cfg_attr(not(test), no_std)]

//! Scrolling bitmap-font text layer for LED matrix refresh pipelines.
//!
//! A [`ScrollLayer`] owns two bit-packed canvases (ink and background fill),
//! advances its scroll position once per eligible refresh frame and repaints
//! the canvases from an external [`BitmapFont`]. The compositor then samples
//! the layer one hardware pixel at a time.

pub mod config;
pub mod error;
pub mod font;
pub mod fonts;
pub mod layer;
pub mod motion;

pub use config::{LayerConfig, Rotation, TickResult, Window};
pub use error::LayerError;
pub use font::{BitmapFont, GlyphIndex};
pub use layer::{Sample, ScrollLayer, TEXT_CAPACITY};
pub use motion::{Bounds, REPEAT_FOREVER, ScrollMode, ScrollStatus};
