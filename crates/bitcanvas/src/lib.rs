#![cfg_attr(not(test), no_std)]

//! Bit-packed monochrome canvas primitives.
//!
//! Each row is stored as `ceil(width / 8)` bytes. Bit 7 of a byte is the
//! leftmost pixel covered by that byte.

extern crate alloc;

mod canvas;

#[cfg(feature = "embedded-graphics")]
mod graphics;

pub use canvas::{Canvas, row_bytes};
