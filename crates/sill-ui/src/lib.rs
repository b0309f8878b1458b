//! Sill UI — retained control tree on top of `sill-render`.
//!
//! Controls live in an arena ([`tree::ControlTree`]) addressed by stable
//! [`control::ControlId`] handles; parent and modal back-references are
//! handles too, so there is no cyclic ownership. Sibling order inside a
//! parent's child list is the z-order (last = top).
//!
//! # Quick start
//!
//! ```rust,ignore
//! use sill_ui::prelude::*;
//!
//! let mut tree = ControlTree::new(Rect::new(0, 0, 800, 600));
//! let window = Window::create(&mut tree, tree.canvas(), "Inspector");
//! window.on_closed(&mut tree, |id| log::info!("window {id:?} closed"));
//!
//! // Each frame:
//! layout::arrange(&mut tree, tree.canvas());
//! tree.render(&mut renderer, &SimpleSkin::new());
//! tree.end_frame(); // drains the deferred-destruction queue
//! ```

pub mod control;
pub mod layout;
pub mod skin;
pub mod tree;
pub mod window;

/// Everything needed to build on the control tree.
pub mod prelude {
    pub use crate::control::{Align, Control, ControlId, ControlKind, Dock, Margin, Padding};
    pub use crate::layout;
    pub use crate::skin::{SimpleSkin, Skin, Theme};
    pub use crate::tree::ControlTree;
    pub use crate::window::Window;

    // Re-export the render primitives everyone needs.
    pub use sill_render::coords::{Point, Rect};
    pub use sill_render::paint::Color;
    pub use sill_render::render::{Font, RecordingRenderer, Renderer};
}
