//! Integer coordinate primitives (top-left origin).

mod point;
mod rect;

pub use point::Point;
pub use rect::Rect;
