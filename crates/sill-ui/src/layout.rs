//! Minimal dock layout pass.
//!
//! Enough to land window chrome where it belongs: edge-docked children
//! consume slices of the parent's inner area in z-order, `Fill` children
//! take what remains, and `None` children keep their manual bounds. The
//! full layout engine of a widget toolkit is deliberately out of scope.

use sill_render::coords::Rect;

use crate::control::{ControlId, Dock};
use crate::tree::ControlTree;

/// Arranges the children of `id` and recurses into the subtree.
///
/// Hidden children are skipped and keep their previous bounds.
pub fn arrange(tree: &mut ControlTree, id: ControlId) {
    let Some(ctrl) = tree.get(id) else { return };
    let padding = ctrl.padding;
    let mut area = Rect::new(
        padding.left,
        padding.top,
        ctrl.bounds.w - padding.left - padding.right,
        ctrl.bounds.h - padding.top - padding.bottom,
    );
    let children: Vec<ControlId> = ctrl.children().to_vec();

    let mut fills = Vec::new();
    for &child in &children {
        let Some(c) = tree.get(child) else { continue };
        if c.hidden {
            continue;
        }
        let (dock, margin, bounds) = (c.dock, c.margin, c.bounds);
        let next = match dock {
            Dock::None => bounds,
            Dock::Fill => {
                fills.push(child);
                continue;
            }
            Dock::Top => {
                let h = bounds.h;
                let r = Rect::new(
                    area.x + margin.left,
                    area.y + margin.top,
                    area.w - margin.left - margin.right,
                    h,
                );
                let consumed = h + margin.top + margin.bottom;
                area.y += consumed;
                area.h -= consumed;
                r
            }
            Dock::Bottom => {
                let h = bounds.h;
                let r = Rect::new(
                    area.x + margin.left,
                    area.bottom() - margin.bottom - h,
                    area.w - margin.left - margin.right,
                    h,
                );
                area.h -= h + margin.top + margin.bottom;
                r
            }
            Dock::Left => {
                let w = bounds.w;
                let r = Rect::new(
                    area.x + margin.left,
                    area.y + margin.top,
                    w,
                    area.h - margin.top - margin.bottom,
                );
                let consumed = w + margin.left + margin.right;
                area.x += consumed;
                area.w -= consumed;
                r
            }
            Dock::Right => {
                let w = bounds.w;
                let r = Rect::new(
                    area.right() - margin.right - w,
                    area.y + margin.top,
                    w,
                    area.h - margin.top - margin.bottom,
                );
                area.w -= w + margin.left + margin.right;
                r
            }
        };
        if let Some(c) = tree.get_mut(child) {
            c.bounds = next;
        }
    }

    for child in fills {
        let Some(c) = tree.get(child) else { continue };
        let margin = c.margin;
        let next = Rect::new(
            area.x + margin.left,
            area.y + margin.top,
            area.w - margin.left - margin.right,
            area.h - margin.top - margin.bottom,
        );
        if let Some(c) = tree.get_mut(child) {
            c.bounds = next;
        }
    }

    for child in children {
        arrange(tree, child);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::ControlKind;
    use crate::window::{TITLE_BAR_HEIGHT, Window};

    #[test]
    fn window_chrome_docks_into_place() {
        let mut tree = ControlTree::new(Rect::new(0, 0, 800, 600));
        let w = { let c = tree.canvas(); Window::create(&mut tree, c, "W") };
        tree.get_mut(w.id()).unwrap().bounds = Rect::new(50, 50, 300, 200);
        { let c = tree.canvas(); arrange(&mut tree, c) };

        let state = tree.get(w.id()).unwrap().window_state().unwrap();
        let (bar, label, button, content) =
            (state.title_bar, state.title_label, state.close_button, state.content);

        // Title bar hugs the top at full width.
        let bar_bounds = tree.get(bar).unwrap().bounds;
        assert_eq!(bar_bounds, Rect::new(0, 0, 300, TITLE_BAR_HEIGHT));

        // Close button docks right inside the bar; label fills the rest.
        let button_bounds = tree.get(button).unwrap().bounds;
        assert_eq!(button_bounds.right(), 300);
        let label_bounds = tree.get(label).unwrap().bounds;
        assert_eq!(label_bounds.x, 0);
        assert_eq!(label_bounds.right(), button_bounds.x);

        // Content takes the body below the bar and its 4-unit margin.
        let content_bounds = tree.get(content).unwrap().bounds;
        assert_eq!(content_bounds, Rect::new(0, TITLE_BAR_HEIGHT + 4, 300, 200 - TITLE_BAR_HEIGHT - 4));
    }

    #[test]
    fn hidden_children_are_skipped() {
        let mut tree = ControlTree::new(Rect::new(0, 0, 100, 100));
        let panel = tree.new_control(ControlKind::Panel, tree.canvas());
        tree.get_mut(panel).unwrap().bounds = Rect::new(0, 0, 100, 100);

        let top = tree.new_control(ControlKind::Panel, panel);
        {
            let c = tree.get_mut(top).unwrap();
            c.dock = Dock::Top;
            c.bounds.h = 20;
            c.hidden = true;
        }
        let fill = tree.new_control(ControlKind::Panel, panel);
        tree.get_mut(fill).unwrap().dock = Dock::Fill;

        arrange(&mut tree, panel);
        // The hidden top bar consumes nothing.
        assert_eq!(tree.get(fill).unwrap().bounds, Rect::new(0, 0, 100, 100));
    }

    #[test]
    fn edge_docks_consume_in_order() {
        let mut tree = ControlTree::new(Rect::new(0, 0, 200, 100));
        let root = tree.canvas();

        let left = tree.new_control(ControlKind::Panel, root);
        {
            let c = tree.get_mut(left).unwrap();
            c.dock = Dock::Left;
            c.bounds.w = 40;
        }
        let bottom = tree.new_control(ControlKind::Panel, root);
        {
            let c = tree.get_mut(bottom).unwrap();
            c.dock = Dock::Bottom;
            c.bounds.h = 10;
        }
        let fill = tree.new_control(ControlKind::Panel, root);
        tree.get_mut(fill).unwrap().dock = Dock::Fill;

        arrange(&mut tree, root);
        assert_eq!(tree.get(left).unwrap().bounds, Rect::new(0, 0, 40, 100));
        assert_eq!(tree.get(bottom).unwrap().bounds, Rect::new(40, 90, 160, 10));
        assert_eq!(tree.get(fill).unwrap().bounds, Rect::new(40, 0, 160, 90));
    }
}
