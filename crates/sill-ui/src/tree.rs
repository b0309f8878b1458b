//! The control tree arena: ownership, z-order, deferred destruction, and
//! the per-frame render walk.

use slotmap::SlotMap;

use sill_render::coords::{Point, Rect};
use sill_render::render::{Font, Renderer};
use sill_render::paint::Color;

use crate::control::{Align, Control, ControlId, ControlKind};
use crate::skin::Skin;
use crate::window::Window;

/// Arena of controls plus the root canvas.
///
/// Sibling order inside a parent's child list is the z-order: the last
/// entry draws on top and wins focus scans. All mutation happens on the
/// single frame thread in strict call order.
///
/// Destruction is deferred: [`delayed_destroy`](Self::delayed_destroy)
/// enqueues a handle and [`end_frame`](Self::end_frame) drains the queue at
/// the frame boundary, so a control may destroy itself from inside its own
/// callback without invalidating anything mid-frame.
pub struct ControlTree {
    controls: SlotMap<ControlId, Control>,
    canvas: ControlId,
    pending: Vec<ControlId>,
}

impl ControlTree {
    /// Creates the tree with a root canvas covering `bounds`.
    pub fn new(bounds: Rect) -> Self {
        let mut controls = SlotMap::with_key();
        let canvas = controls.insert({
            let mut c = Control::new(ControlKind::Canvas);
            c.bounds = bounds;
            c
        });
        Self { controls, canvas, pending: Vec::new() }
    }

    /// The root canvas — the attachment point for top-level windows and
    /// modal overlays.
    #[inline]
    pub fn canvas(&self) -> ControlId {
        self.canvas
    }

    // ── arena access ──────────────────────────────────────────────────────

    /// Inserts a control as the top-most child of `parent`.
    pub fn new_control(&mut self, kind: ControlKind, parent: ControlId) -> ControlId {
        let id = self.controls.insert(Control::new(kind));
        self.controls[id].parent = Some(parent);
        if let Some(p) = self.controls.get_mut(parent) {
            p.children.push(id);
        }
        id
    }

    #[inline]
    pub fn contains(&self, id: ControlId) -> bool {
        self.controls.contains_key(id)
    }

    #[inline]
    pub fn get(&self, id: ControlId) -> Option<&Control> {
        self.controls.get(id)
    }

    #[inline]
    pub fn get_mut(&mut self, id: ControlId) -> Option<&mut Control> {
        self.controls.get_mut(id)
    }

    /// Panicking access for ids the caller just created or validated.
    pub(crate) fn ctrl_mut(&mut self, id: ControlId) -> &mut Control {
        &mut self.controls[id]
    }

    pub fn parent(&self, id: ControlId) -> Option<ControlId> {
        self.controls.get(id).and_then(|c| c.parent)
    }

    /// Children of `id` in z-order (last = top). Empty for stale handles.
    pub fn children(&self, id: ControlId) -> &[ControlId] {
        self.controls.get(id).map(|c| c.children()).unwrap_or(&[])
    }

    // ── hierarchy & z-order ───────────────────────────────────────────────

    /// Moves `id` under `new_parent`, on top of its new siblings.
    pub fn set_parent(&mut self, id: ControlId, new_parent: ControlId) {
        if !self.controls.contains_key(id) || !self.controls.contains_key(new_parent) {
            return;
        }
        self.detach(id);
        self.controls[id].parent = Some(new_parent);
        self.controls[new_parent].children.push(id);
    }

    /// Promotes `id` to the top of its parent's z-order.
    pub fn bring_to_front(&mut self, id: ControlId) {
        let Some(parent) = self.parent(id) else { return };
        let children = &mut self.controls[parent].children;
        if children.last() == Some(&id) {
            return;
        }
        if let Some(pos) = children.iter().position(|&c| c == id) {
            children.remove(pos);
            children.push(id);
        }
    }

    fn detach(&mut self, id: ControlId) {
        if let Some(parent) = self.controls[id].parent.take() {
            if let Some(p) = self.controls.get_mut(parent) {
                p.children.retain(|&c| c != id);
            }
        }
    }

    // ── geometry ──────────────────────────────────────────────────────────

    /// Moves `id` to `(x, y)` relative to its parent, honoring movement
    /// clamping against the parent's extent.
    pub fn set_position(&mut self, id: ControlId, x: i32, y: i32) {
        let Some(ctrl) = self.controls.get(id) else { return };
        let (mut x, mut y) = (x, y);
        if ctrl.clamp_movement {
            if let Some(parent) = ctrl.parent.and_then(|p| self.controls.get(p)) {
                x = x.clamp(0, (parent.bounds.w - ctrl.bounds.w).max(0));
                y = y.clamp(0, (parent.bounds.h - ctrl.bounds.h).max(0));
            }
        }
        let ctrl = &mut self.controls[id];
        ctrl.bounds.x = x;
        ctrl.bounds.y = y;
    }

    /// Resizes `id`, never below its minimum size.
    pub fn set_size(&mut self, id: ControlId, w: i32, h: i32) {
        if let Some(ctrl) = self.controls.get_mut(id) {
            ctrl.bounds.w = w.max(ctrl.min_size.x);
            ctrl.bounds.h = h.max(ctrl.min_size.y);
        }
    }

    // ── deferred destruction ──────────────────────────────────────────────

    /// Schedules `id` for destruction at the next [`end_frame`](Self::end_frame).
    ///
    /// Idempotent: a control already in the queue is not enqueued again.
    /// Until the sweep runs, the control remains alive and addressable.
    pub fn delayed_destroy(&mut self, id: ControlId) {
        let Some(ctrl) = self.controls.get_mut(id) else { return };
        if ctrl.pending_destroy {
            return;
        }
        ctrl.pending_destroy = true;
        self.pending.push(id);
        log::debug!("control {id:?} scheduled for destruction");
    }

    /// Frame boundary: drains the deferred-destruction queue.
    pub fn end_frame(&mut self) {
        let pending = std::mem::take(&mut self.pending);
        if !pending.is_empty() {
            log::debug!("sweeping {} pending control(s)", pending.len());
        }
        for id in pending {
            // May already be gone if an earlier entry owned this one.
            if self.controls.contains_key(id) {
                self.destroy_now(id);
            }
        }
    }

    /// Immediate teardown of `id` and its subtree.
    ///
    /// A window tears down its live modal overlay first so the overlay
    /// never outlives the window it was created for.
    fn destroy_now(&mut self, id: ControlId) {
        let overlay = self
            .controls
            .get_mut(id)
            .and_then(|c| c.window_state_mut())
            .and_then(|s| s.modal.take());
        if let Some(overlay) = overlay {
            // Pull the window out from under the overlay before the overlay
            // subtree is freed.
            self.set_parent(id, self.canvas);
            if self.controls.contains_key(overlay) {
                self.destroy_now(overlay);
            }
        }

        self.detach(id);
        let mut worklist = vec![id];
        while let Some(next) = worklist.pop() {
            if let Some(ctrl) = self.controls.remove(next) {
                worklist.extend(ctrl.children);
            }
        }
    }

    // ── render walk ───────────────────────────────────────────────────────

    /// Renders the whole tree front-to-back in z-order.
    ///
    /// The canvas establishes the base clip; every control then narrows the
    /// offset and clip for itself and its children, restoring the context
    /// afterwards.
    pub fn render(&mut self, renderer: &mut dyn Renderer, skin: &dyn Skin) {
        renderer.begin();
        let bounds = self.controls[self.canvas].bounds;
        renderer.ctx_mut().set_offset(Point::zero());
        renderer.ctx_mut().set_clip(bounds);
        self.render_control(self.canvas, renderer, skin);
        renderer.end();
    }

    fn render_control(&mut self, id: ControlId, renderer: &mut dyn Renderer, skin: &dyn Skin) {
        let Some(ctrl) = self.controls.get(id) else { return };
        if ctrl.hidden {
            return;
        }
        let bounds = ctrl.bounds;

        // Callers own save/restore; the clip only ever shrinks below here.
        let saved = renderer.ctx().clone();
        renderer.ctx_mut().add_offset(bounds.origin());
        renderer.ctx_mut().add_clip(Rect::new(0, 0, bounds.w, bounds.h));

        if renderer.ctx().is_clip_visible() {
            self.render_under(id, renderer, skin);
            self.render_self(id, renderer, skin);
            let children = self.controls[id].children.clone();
            for child in children {
                self.render_control(child, renderer, skin);
            }
        }

        *renderer.ctx_mut() = saved;
    }

    /// The pass drawn beneath a control, before its own chrome.
    fn render_under(&mut self, id: ControlId, renderer: &mut dyn Renderer, skin: &dyn Skin) {
        let Some(ctrl) = self.controls.get(id) else { return };
        if ctrl.is_window() {
            let local = Rect::new(0, 0, ctrl.bounds.w, ctrl.bounds.h);
            skin.draw_shadow(renderer, local);
        }
    }

    fn render_self(&mut self, id: ControlId, renderer: &mut dyn Renderer, skin: &dyn Skin) {
        enum Draw {
            Window,
            Label { text: String, color: Color, font: Font, align: Align, pad_left: i32 },
            Overlay,
            CloseButton,
            Nothing,
        }

        let Some(ctrl) = self.controls.get(id) else { return };
        let local = Rect::new(0, 0, ctrl.bounds.w, ctrl.bounds.h);
        let draw = match &ctrl.kind {
            ControlKind::Window(_) => Draw::Window,
            ControlKind::Label(state) => Draw::Label {
                text: state.text.clone(),
                color: state.color,
                font: state.font.clone(),
                align: state.align,
                pad_left: ctrl.padding.left,
            },
            ControlKind::ModalOverlay { draw_background: true } => Draw::Overlay,
            ControlKind::CloseButton { .. } => Draw::CloseButton,
            _ => Draw::Nothing,
        };

        match draw {
            Draw::Window => Window::from_id(id).render(self, renderer, skin),
            Draw::Label { text, color, font, align, pad_left } => {
                let text_h = font.size as i32;
                let y = (local.h - text_h) / 2;
                let x = match align {
                    Align::Left => pad_left,
                    Align::Center | Align::Right => {
                        let m = renderer.measure_text(&font, &text);
                        let tw = (m.x as f32 / renderer.ctx().scale()) as i32;
                        if align == Align::Center {
                            (local.w - tw) / 2
                        } else {
                            local.w - tw - pad_left
                        }
                    }
                };
                renderer.set_draw_color(color);
                renderer.render_text(&font, Point::new(x, y), &text);
            }
            Draw::Overlay => skin.draw_modal(renderer, local),
            Draw::CloseButton => skin.draw_close_button(renderer, local),
            Draw::Nothing => {}
        }
    }
}
