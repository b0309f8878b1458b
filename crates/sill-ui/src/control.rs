//! Control nodes — the per-kind state stored in the tree arena.

use slotmap::new_key_type;

use sill_render::coords::{Point, Rect};
use sill_render::paint::Color;
use sill_render::render::Font;

new_key_type! {
    /// Stable handle to a control in the tree arena.
    ///
    /// Handles stay valid across reparenting and z-order changes; a handle
    /// to a destroyed control simply stops resolving.
    pub struct ControlId;
}

// ── layout types ──────────────────────────────────────────────────────────

/// Outer spacing between a control and its siblings/parent edge.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Margin {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Margin {
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self { left, top, right, bottom }
    }

    pub const fn all(v: i32) -> Self {
        Self::new(v, v, v, v)
    }
}

/// Inner spacing reserved inside a control before its children are placed.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Padding {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Padding {
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self { left, top, right, bottom }
    }

    pub const fn all(v: i32) -> Self {
        Self::new(v, v, v, v)
    }
}

/// How a control claims space inside its parent during the dock pass.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum Dock {
    /// Manual positioning; bounds are used as-is.
    #[default]
    None,
    /// Hug the parent's top edge, full width.
    Top,
    /// Hug the parent's bottom edge, full width.
    Bottom,
    /// Hug the parent's left edge, full height.
    Left,
    /// Hug the parent's right edge, full height.
    Right,
    /// Take the space remaining after every edge-docked sibling.
    Fill,
}

/// Horizontal text alignment for labels. Vertical centering is implicit.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

// ── per-kind state ────────────────────────────────────────────────────────

/// State for a text label.
pub struct LabelState {
    pub text: String,
    pub color: Color,
    pub align: Align,
    pub font: Font,
}

impl LabelState {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            color: Color::WHITE,
            align: Align::Left,
            font: Font::new("default", 14.0),
        }
    }
}

/// State for a window control. The four chrome children are created
/// atomically with the window and live for its whole lifetime.
pub struct WindowState {
    pub title_bar: ControlId,
    pub title_label: ControlId,
    pub close_button: ControlId,
    /// Blank child filling the window body; the attachment point for caller
    /// content.
    pub content: ControlId,
    /// Live modal overlay, at most one per window.
    pub modal: Option<ControlId>,
    /// When set, closing the window also schedules deferred destruction.
    pub delete_on_close: bool,
    pub(crate) on_closed: Vec<Box<dyn FnMut(ControlId)>>,
}

impl WindowState {
    pub(crate) fn new() -> Self {
        Self {
            title_bar: ControlId::default(),
            title_label: ControlId::default(),
            close_button: ControlId::default(),
            content: ControlId::default(),
            modal: None,
            delete_on_close: false,
            on_closed: Vec::new(),
        }
    }

    pub fn is_modal(&self) -> bool {
        self.modal.is_some()
    }
}

/// The flavor of a control plus its kind-specific state.
pub enum ControlKind {
    /// Plain container with no visuals of its own.
    Panel,
    /// Root of the tree; its child list is the top-level z-order.
    Canvas,
    Label(LabelState),
    /// Title-bar drag region. Dragging it moves `target` instead of itself.
    Dragger { target: Option<ControlId> },
    /// Window close button; presses are routed to the owning window.
    CloseButton { window: ControlId },
    Window(WindowState),
    /// Full-screen intercepting layer behind a modal window, optionally
    /// dimming everything beneath it.
    ModalOverlay { draw_background: bool },
}

// ── Control ───────────────────────────────────────────────────────────────

/// One node in the control tree.
pub struct Control {
    pub kind: ControlKind,
    pub(crate) parent: Option<ControlId>,
    /// Z-order: last entry draws on top.
    pub(crate) children: Vec<ControlId>,
    /// Bounds relative to the parent's top-left corner.
    pub bounds: Rect,
    pub margin: Margin,
    pub padding: Padding,
    pub dock: Dock,
    pub hidden: bool,
    pub tabable: bool,
    pub keyboard_input: bool,
    pub min_size: Point,
    /// Clamp position changes so the control stays inside its parent.
    pub clamp_movement: bool,
    pub(crate) pending_destroy: bool,
}

impl Control {
    pub(crate) fn new(kind: ControlKind) -> Self {
        Self {
            kind,
            parent: None,
            children: Vec::new(),
            bounds: Rect::default(),
            margin: Margin::default(),
            padding: Padding::default(),
            dock: Dock::None,
            hidden: false,
            tabable: true,
            keyboard_input: true,
            min_size: Point::zero(),
            clamp_movement: false,
            pending_destroy: false,
        }
    }

    #[inline]
    pub fn is_window(&self) -> bool {
        matches!(self.kind, ControlKind::Window(_))
    }

    #[inline]
    pub fn parent(&self) -> Option<ControlId> {
        self.parent
    }

    #[inline]
    pub fn children(&self) -> &[ControlId] {
        &self.children
    }

    /// True once the control sits in the deferred-destruction queue. Such a
    /// control is still alive and addressable until the end-of-frame sweep.
    #[inline]
    pub fn is_pending_destroy(&self) -> bool {
        self.pending_destroy
    }

    pub fn window_state(&self) -> Option<&WindowState> {
        match &self.kind {
            ControlKind::Window(state) => Some(state),
            _ => None,
        }
    }

    pub fn window_state_mut(&mut self) -> Option<&mut WindowState> {
        match &mut self.kind {
            ControlKind::Window(state) => Some(state),
            _ => None,
        }
    }

    pub fn label_state(&self) -> Option<&LabelState> {
        match &self.kind {
            ControlKind::Label(state) => Some(state),
            _ => None,
        }
    }

    pub fn label_state_mut(&mut self) -> Option<&mut LabelState> {
        match &mut self.kind {
            ControlKind::Label(state) => Some(state),
            _ => None,
        }
    }
}
