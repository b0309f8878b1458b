//! Sill render crate.
//!
//! Owns everything below the control tree: integer coordinate primitives,
//! color state, the transform/clip pipeline, and the [`render::Renderer`]
//! trait that concrete 2D backends implement.

pub mod coords;
pub mod logging;
pub mod paint;
pub mod render;
