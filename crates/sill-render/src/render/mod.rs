//! Renderer abstraction.
//!
//! [`RenderContext`] holds the transform/clip/color state every backend
//! shares; [`Renderer`] is the capability trait backends implement, with the
//! whole primitive layer provided as default methods on top of a single
//! required fill operation. [`RecordingRenderer`] is the in-crate backend
//! used by tests and the demo binary.

mod ctx;
mod recording;
mod renderer;

pub use ctx::RenderContext;
pub use recording::{DrawCmd, RecordingRenderer};
pub use renderer::{Font, Renderer, Texture};
