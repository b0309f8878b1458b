//! The window control: title bar, close button, focus/z-order, and the
//! modal lifecycle state machine.

use sill_render::coords::{Point, Rect};
use sill_render::render::Renderer;

use crate::control::{ControlId, ControlKind, Dock, LabelState, Margin, Padding, WindowState};
use crate::skin::Skin;
use crate::tree::ControlTree;

/// Fixed title bar height, docked to the window's top edge.
pub const TITLE_BAR_HEIGHT: i32 = 24;

/// Default size a freshly created window starts at.
const DEFAULT_SIZE: (i32, i32) = (200, 120);

/// Handle to a window control in a [`ControlTree`].
///
/// Thin copyable wrapper over the window's [`ControlId`]; every operation
/// borrows the tree explicitly. Structural misuse (double `make_modal`,
/// destroying a modal that is not there, closing a stale handle) is a
/// no-op, never an error — the frame loop must not be interruptible.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Window {
    id: ControlId,
}

impl Window {
    /// Builds a window and its chrome atomically: drag title bar, title
    /// label, close button, and a blank content panel for caller content.
    ///
    /// The window starts visible, non-modal, non-tabable, on top of its
    /// siblings, with a 100×40 minimum size, movement clamped to its
    /// parent, and keyboard input disabled on the frame itself.
    pub fn create(tree: &mut ControlTree, parent: ControlId, title: &str) -> Window {
        let id = tree.new_control(ControlKind::Window(WindowState::new()), parent);
        {
            let w = tree.ctrl_mut(id);
            w.bounds = Rect::new(0, 0, DEFAULT_SIZE.0, DEFAULT_SIZE.1);
            w.min_size = Point::new(100, 40);
            w.clamp_movement = true;
            w.tabable = false;
            w.keyboard_input = false;
        }

        let title_bar = tree.new_control(ControlKind::Dragger { target: Some(id) }, id);
        {
            let tb = tree.ctrl_mut(title_bar);
            tb.bounds.h = TITLE_BAR_HEIGHT;
            tb.dock = Dock::Top;
            tb.margin = Margin::new(0, 0, 0, 4);
            tb.tabable = false;
        }

        let title_label = tree.new_control(ControlKind::Label(LabelState::new(title)), title_bar);
        {
            let l = tree.ctrl_mut(title_label);
            l.dock = Dock::Fill;
            l.padding = Padding::new(8, 0, 0, 0);
            l.tabable = false;
        }

        let close_button = tree.new_control(ControlKind::CloseButton { window: id }, title_bar);
        {
            let b = tree.ctrl_mut(close_button);
            b.bounds.w = TITLE_BAR_HEIGHT;
            b.dock = Dock::Right;
            b.tabable = false;
        }

        let content = tree.new_control(ControlKind::Panel, id);
        tree.ctrl_mut(content).dock = Dock::Fill;

        if let Some(state) = tree.ctrl_mut(id).window_state_mut() {
            state.title_bar = title_bar;
            state.title_label = title_label;
            state.close_button = close_button;
            state.content = content;
        }

        tree.bring_to_front(id);
        log::debug!("window {id:?} created ({title:?})");
        Window { id }
    }

    /// Wraps an existing window control id.
    pub fn from_id(id: ControlId) -> Window {
        Window { id }
    }

    #[inline]
    pub fn id(self) -> ControlId {
        self.id
    }

    fn state(self, tree: &ControlTree) -> Option<&WindowState> {
        tree.get(self.id).and_then(|c| c.window_state())
    }

    fn state_mut(self, tree: &mut ControlTree) -> Option<&mut WindowState> {
        tree.get_mut(self.id).and_then(|c| c.window_state_mut())
    }

    // ── chrome accessors ──────────────────────────────────────────────────

    /// The blank panel filling the window body — parent caller content here.
    pub fn content(self, tree: &ControlTree) -> Option<ControlId> {
        self.state(tree).map(|s| s.content)
    }

    pub fn title_bar(self, tree: &ControlTree) -> Option<ControlId> {
        self.state(tree).map(|s| s.title_bar)
    }

    pub fn close_button(self, tree: &ControlTree) -> Option<ControlId> {
        self.state(tree).map(|s| s.close_button)
    }

    pub fn set_title(self, tree: &mut ControlTree, title: &str) {
        let Some(label) = self.state(tree).map(|s| s.title_label) else { return };
        if let Some(l) = tree.get_mut(label).and_then(|c| c.label_state_mut()) {
            l.text = title.to_owned();
        }
    }

    pub fn title(self, tree: &ControlTree) -> Option<&str> {
        let label = self.state(tree)?.title_label;
        tree.get(label)?.label_state().map(|l| l.text.as_str())
    }

    // ── closability ───────────────────────────────────────────────────────

    /// Shows or hides the close button. Non-closable windows never show it.
    pub fn set_closable(self, tree: &mut ControlTree, closable: bool) {
        let Some(button) = self.state(tree).map(|s| s.close_button) else { return };
        if let Some(b) = tree.get_mut(button) {
            b.hidden = !closable;
        }
    }

    pub fn is_closable(self, tree: &ControlTree) -> bool {
        self.state(tree)
            .and_then(|s| tree.get(s.close_button))
            .is_some_and(|b| !b.hidden)
    }

    /// When set, closing the window also schedules deferred destruction.
    pub fn set_delete_on_close(self, tree: &mut ControlTree, delete: bool) {
        if let Some(state) = self.state_mut(tree) {
            state.delete_on_close = delete;
        }
    }

    // ── focus & z-order ───────────────────────────────────────────────────

    /// A window is focused iff it is the top-most *window* among its
    /// parent's children. Non-window siblings above it are skipped; the
    /// scan stops at the first window found, so the cost is the depth to
    /// that window, not the sibling count.
    pub fn is_on_top(self, tree: &ControlTree) -> bool {
        let Some(parent) = tree.parent(self.id) else { return false };
        for &sibling in tree.children(parent).iter().rev() {
            let Some(ctrl) = tree.get(sibling) else { continue };
            if !ctrl.is_window() {
                continue;
            }
            return sibling == self.id;
        }
        false
    }

    /// Becoming visible promotes the window in z-order first; hiding
    /// applies directly.
    pub fn set_hidden(self, tree: &mut ControlTree, hidden: bool) {
        if !hidden {
            tree.bring_to_front(self.id);
        }
        if let Some(ctrl) = tree.get_mut(self.id) {
            ctrl.hidden = hidden;
        }
    }

    pub fn is_hidden(self, tree: &ControlTree) -> bool {
        tree.get(self.id).map(|c| c.hidden).unwrap_or(true)
    }

    /// Any interaction bringing the window into use promotes it, focused
    /// or not.
    pub fn touch(self, tree: &mut ControlTree) {
        tree.bring_to_front(self.id);
    }

    // ── modal lifecycle ───────────────────────────────────────────────────

    pub fn is_modal(self, tree: &ControlTree) -> bool {
        self.state(tree).is_some_and(|s| s.is_modal())
    }

    /// Enters modal mode: creates an overlay on the canvas, reparents the
    /// window onto it, and configures the dimming background. No-op when
    /// already modal.
    pub fn make_modal(self, tree: &mut ControlTree, draw_background: bool) {
        match self.state(tree) {
            None => return,
            Some(s) if s.is_modal() => return,
            Some(_) => {}
        }

        let canvas = tree.canvas();
        let overlay = tree.new_control(ControlKind::ModalOverlay { draw_background }, canvas);
        let canvas_bounds = tree.get(canvas).map(|c| c.bounds).unwrap_or_default();
        {
            let o = tree.ctrl_mut(overlay);
            o.bounds = Rect::new(0, 0, canvas_bounds.w, canvas_bounds.h);
            o.dock = Dock::Fill;
            o.tabable = false;
        }
        tree.set_parent(self.id, overlay);
        if let Some(state) = self.state_mut(tree) {
            state.modal = Some(overlay);
        }
        log::debug!("window {:?} entered modal mode", self.id);
    }

    /// Leaves modal mode: reparents the window onto the canvas and
    /// schedules the overlay for deferred destruction. No-op when not
    /// modal.
    ///
    /// The original parent is not tracked at `make_modal` time and cannot
    /// be restored; the window always lands back on the canvas. Track the
    /// parent yourself if you reparent windows into panels before making
    /// them modal.
    pub fn destroy_modal(self, tree: &mut ControlTree) {
        let Some(overlay) = self.state_mut(tree).and_then(|s| s.modal.take()) else {
            return;
        };
        let canvas = tree.canvas();
        tree.set_parent(self.id, canvas);
        tree.delayed_destroy(overlay);
        log::debug!("window {:?} left modal mode", self.id);
    }

    // ── closing ───────────────────────────────────────────────────────────

    /// Subscribes to the closed notification. Listeners run while the
    /// window is still alive and merely hidden, never after destruction.
    pub fn on_closed(self, tree: &mut ControlTree, f: impl FnMut(ControlId) + 'static) {
        if let Some(state) = self.state_mut(tree) {
            state.on_closed.push(Box::new(f));
        }
    }

    /// Handler for the close button's press event.
    ///
    /// Tears down any modal overlay, hides the window, notifies listeners,
    /// and — only with `delete_on_close` set — schedules deferred
    /// destruction. A second invocation in the same frame finds the window
    /// already hidden and does nothing, so listeners fire once and the
    /// destruction queue sees the window once.
    pub fn close_button_pressed(self, tree: &mut ControlTree) {
        if self.is_hidden(tree) {
            return;
        }

        self.destroy_modal(tree);
        self.set_hidden(tree, true);

        let mut listeners = match self.state_mut(tree) {
            Some(state) => std::mem::take(&mut state.on_closed),
            None => return,
        };
        for listener in listeners.iter_mut() {
            listener(self.id);
        }
        if let Some(state) = self.state_mut(tree) {
            // A listener may have subscribed more listeners; keep both.
            let mut added = std::mem::replace(&mut state.on_closed, listeners);
            state.on_closed.append(&mut added);
        }

        let delete = self.state(tree).is_some_and(|s| s.delete_on_close);
        if delete {
            tree.delayed_destroy(self.id);
        }
        log::debug!("window {:?} closed", self.id);
    }

    // ── rendering ─────────────────────────────────────────────────────────

    /// Per-frame chrome pass: recomputes focus, recolors the title label,
    /// and delegates drawing to the skin. The drop shadow is drawn
    /// separately in the render-under pass.
    pub(crate) fn render(self, tree: &mut ControlTree, renderer: &mut dyn Renderer, skin: &dyn Skin) {
        let has_focus = self.is_on_top(tree);

        let (label, title_bar_bottom, local) = {
            let Some(ctrl) = tree.get(self.id) else { return };
            let Some(state) = ctrl.window_state() else { return };
            let bottom = tree
                .get(state.title_bar)
                .map(|tb| tb.bounds.bottom())
                .unwrap_or(TITLE_BAR_HEIGHT);
            (
                state.title_label,
                bottom,
                Rect::new(0, 0, ctrl.bounds.w, ctrl.bounds.h),
            )
        };

        let theme = skin.theme();
        let color = if has_focus { theme.title_active } else { theme.title_inactive };
        if let Some(l) = tree.get_mut(label).and_then(|c| c.label_state_mut()) {
            l.color = color;
        }

        skin.draw_window(renderer, local, title_bar_bottom, has_focus);
    }
}

/// Routes a press on a close button control to its owning window.
///
/// Input dispatch lives outside this crate; whatever routes press events
/// calls this when the pressed control is a window close button.
pub fn handle_close_press(tree: &mut ControlTree, button: ControlId) {
    let owner = match tree.get(button).map(|c| &c.kind) {
        Some(&ControlKind::CloseButton { window }) => window,
        _ => return,
    };
    Window::from_id(owner).close_button_pressed(tree);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    use sill_render::render::{RecordingRenderer, Renderer};

    use crate::control::ControlKind;
    use crate::skin::SimpleSkin;

    fn tree() -> ControlTree {
        ControlTree::new(Rect::new(0, 0, 800, 600))
    }

    // ── construction ──────────────────────────────────────────────────────

    #[test]
    fn create_builds_chrome_atomically() {
        let mut t = tree();
        let w = { let c = t.canvas(); Window::create(&mut t, c, "Settings") };

        let state = t.get(w.id()).unwrap().window_state().unwrap();
        let (bar, label, button, content) =
            (state.title_bar, state.title_label, state.close_button, state.content);
        assert!(t.contains(bar) && t.contains(label) && t.contains(button) && t.contains(content));
        assert_eq!(t.parent(label), Some(bar));
        assert_eq!(t.parent(button), Some(bar));
        assert_eq!(w.title(&t), Some("Settings"));

        let ctrl = t.get(w.id()).unwrap();
        assert_eq!(ctrl.min_size, Point::new(100, 40));
        assert!(ctrl.clamp_movement);
        assert!(!ctrl.tabable);
        assert!(!ctrl.keyboard_input);
        assert_eq!(t.get(bar).unwrap().bounds.h, TITLE_BAR_HEIGHT);
    }

    // ── closability ───────────────────────────────────────────────────────

    #[test]
    fn closable_toggles_close_button_visibility() {
        let mut t = tree();
        let w = { let c = t.canvas(); Window::create(&mut t, c, "W") };
        assert!(w.is_closable(&t));
        w.set_closable(&mut t, false);
        assert!(!w.is_closable(&t));
        let button = t.get(w.id()).unwrap().window_state().unwrap().close_button;
        assert!(t.get(button).unwrap().hidden);
        w.set_closable(&mut t, true);
        assert!(w.is_closable(&t));
    }

    // ── focus & z-order ───────────────────────────────────────────────────

    #[test]
    fn top_window_has_focus() {
        let mut t = tree();
        let a = { let c = t.canvas(); Window::create(&mut t, c, "A") };
        let b = { let c = t.canvas(); Window::create(&mut t, c, "B") };
        assert!(!a.is_on_top(&t));
        assert!(b.is_on_top(&t));

        a.touch(&mut t);
        assert!(a.is_on_top(&t));
        assert!(!b.is_on_top(&t));
    }

    #[test]
    fn non_window_siblings_above_are_skipped() {
        let mut t = tree();
        let w = { let c = t.canvas(); Window::create(&mut t, c, "W") };
        // A tooltip-like panel stacked above the window must not steal focus.
        t.new_control(ControlKind::Panel, t.canvas());
        assert!(w.is_on_top(&t));
    }

    #[test]
    fn single_window_with_only_panel_siblings_is_on_top() {
        let mut t = tree();
        t.new_control(ControlKind::Panel, t.canvas());
        let w = { let c = t.canvas(); Window::create(&mut t, c, "W") };
        t.new_control(ControlKind::Panel, t.canvas());
        assert!(w.is_on_top(&t));
    }

    #[test]
    fn unhiding_promotes_z_order() {
        let mut t = tree();
        let a = { let c = t.canvas(); Window::create(&mut t, c, "A") };
        let b = { let c = t.canvas(); Window::create(&mut t, c, "B") };
        a.set_hidden(&mut t, true);
        assert!(b.is_on_top(&t));
        a.set_hidden(&mut t, false);
        assert!(a.is_on_top(&t));
    }

    // ── modal lifecycle ───────────────────────────────────────────────────

    #[test]
    fn make_modal_reparents_onto_overlay() {
        let mut t = tree();
        let w = { let c = t.canvas(); Window::create(&mut t, c, "W") };
        w.make_modal(&mut t, true);

        assert!(w.is_modal(&t));
        let overlay = t.get(w.id()).unwrap().window_state().unwrap().modal.unwrap();
        assert_eq!(t.parent(w.id()), Some(overlay));
        assert_eq!(t.parent(overlay), Some(t.canvas()));
        assert!(matches!(
            t.get(overlay).unwrap().kind,
            ControlKind::ModalOverlay { draw_background: true }
        ));
    }

    #[test]
    fn make_modal_twice_keeps_one_overlay() {
        let mut t = tree();
        let w = { let c = t.canvas(); Window::create(&mut t, c, "W") };
        w.make_modal(&mut t, true);
        let overlay = t.get(w.id()).unwrap().window_state().unwrap().modal.unwrap();
        w.make_modal(&mut t, true);
        assert_eq!(t.get(w.id()).unwrap().window_state().unwrap().modal, Some(overlay));
        // Canvas holds exactly one overlay.
        let overlays = t
            .children(t.canvas())
            .iter()
            .filter(|&&c| matches!(t.get(c).unwrap().kind, ControlKind::ModalOverlay { .. }))
            .count();
        assert_eq!(overlays, 1);
    }

    #[test]
    fn destroy_modal_returns_window_to_canvas() {
        let mut t = tree();
        let panel = t.new_control(ControlKind::Panel, t.canvas());
        let w = Window::create(&mut t, panel, "W");
        w.make_modal(&mut t, false);
        let overlay = t.get(w.id()).unwrap().window_state().unwrap().modal.unwrap();

        w.destroy_modal(&mut t);
        assert!(!w.is_modal(&t));
        // The original parent is not tracked; the window lands on the
        // canvas, not back in the panel.
        assert_eq!(t.parent(w.id()), Some(t.canvas()));
        // Overlay is queued, not freed, until the sweep.
        assert!(t.contains(overlay));
        t.end_frame();
        assert!(!t.contains(overlay));
    }

    #[test]
    fn destroy_modal_when_not_modal_is_noop() {
        let mut t = tree();
        let w = { let c = t.canvas(); Window::create(&mut t, c, "W") };
        w.destroy_modal(&mut t);
        assert_eq!(t.parent(w.id()), Some(t.canvas()));
    }

    #[test]
    fn destroying_window_destroys_live_overlay() {
        let mut t = tree();
        let w = { let c = t.canvas(); Window::create(&mut t, c, "W") };
        w.make_modal(&mut t, true);
        let overlay = t.get(w.id()).unwrap().window_state().unwrap().modal.unwrap();

        t.delayed_destroy(w.id());
        t.end_frame();
        assert!(!t.contains(w.id()));
        assert!(!t.contains(overlay));
        assert!(t.children(t.canvas()).is_empty());
    }

    // ── closing ───────────────────────────────────────────────────────────

    #[test]
    fn close_fires_listener_while_window_is_hidden_but_alive() {
        let mut t = tree();
        let w = { let c = t.canvas(); Window::create(&mut t, c, "W") };
        w.set_delete_on_close(&mut t, true);
        w.make_modal(&mut t, true);

        let observed = Rc::new(Cell::new(false));
        let obs = Rc::clone(&observed);
        w.on_closed(&mut t, move |_| obs.set(true));

        w.close_button_pressed(&mut t);
        assert!(observed.get());
        assert!(w.is_hidden(&t));
        assert!(!w.is_modal(&t));
        // Alive until the sweep.
        assert!(t.contains(w.id()));
        assert!(t.get(w.id()).unwrap().is_pending_destroy());

        t.end_frame();
        assert!(!t.contains(w.id()));
    }

    #[test]
    fn double_close_in_one_frame_fires_once() {
        let mut t = tree();
        let w = { let c = t.canvas(); Window::create(&mut t, c, "W") };
        w.set_delete_on_close(&mut t, true);

        let fired = Rc::new(Cell::new(0));
        let f = Rc::clone(&fired);
        w.on_closed(&mut t, move |_| f.set(f.get() + 1));

        w.close_button_pressed(&mut t);
        w.close_button_pressed(&mut t);
        assert_eq!(fired.get(), 1);

        t.end_frame();
        assert!(!t.contains(w.id()));
    }

    #[test]
    fn close_without_delete_on_close_only_hides() {
        let mut t = tree();
        let w = { let c = t.canvas(); Window::create(&mut t, c, "W") };
        w.close_button_pressed(&mut t);
        t.end_frame();
        assert!(t.contains(w.id()));
        assert!(w.is_hidden(&t));
    }

    #[test]
    fn close_press_routes_from_button() {
        let mut t = tree();
        let w = { let c = t.canvas(); Window::create(&mut t, c, "W") };
        let button = t.get(w.id()).unwrap().window_state().unwrap().close_button;
        handle_close_press(&mut t, button);
        assert!(w.is_hidden(&t));
    }

    // ── rendering ─────────────────────────────────────────────────────────

    #[test]
    fn render_recolors_title_by_focus() {
        let mut t = tree();
        let skin = SimpleSkin::new();
        let a = { let c = t.canvas(); Window::create(&mut t, c, "A") };
        let b = { let c = t.canvas(); Window::create(&mut t, c, "B") };
        { let c = t.canvas(); crate::layout::arrange(&mut t, c) };

        let mut renderer = RecordingRenderer::new();
        t.render(&mut renderer, &skin);
        assert!(!renderer.commands().is_empty());

        let label_color = |t: &ControlTree, w: Window| {
            let label = t.get(w.id()).unwrap().window_state().unwrap().title_label;
            t.get(label).unwrap().label_state().unwrap().color
        };
        assert_eq!(label_color(&t, a), skin.theme().title_inactive);
        assert_eq!(label_color(&t, b), skin.theme().title_active);

        a.touch(&mut t);
        t.render(&mut renderer, &skin);
        assert_eq!(label_color(&t, a), skin.theme().title_active);
        assert_eq!(label_color(&t, b), skin.theme().title_inactive);
    }

    #[test]
    fn hidden_window_emits_nothing() {
        let mut t = tree();
        let skin = SimpleSkin::new();
        let w = { let c = t.canvas(); Window::create(&mut t, c, "W") };
        w.set_hidden(&mut t, true);

        let mut renderer = RecordingRenderer::new();
        t.render(&mut renderer, &skin);
        assert!(renderer.commands().is_empty());
    }
}
