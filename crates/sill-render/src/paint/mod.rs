//! Color state for the primitive layer.

mod color;

pub use color::Color;
