//! Skin contract — how window chrome gets drawn.
//!
//! Colors live in an explicit [`Theme`] carried by the skin and passed into
//! render calls; there is deliberately no process-wide skin state.

use sill_render::coords::Rect;
use sill_render::paint::Color;
use sill_render::render::Renderer;

/// Named color slots consumed by window chrome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    /// Title text of the focused (top-most) window.
    pub title_active: Color,
    /// Title text of every other window.
    pub title_inactive: Color,
    pub window_fill: Color,
    pub title_bar_fill: Color,
    pub title_bar_fill_focused: Color,
    pub frame: Color,
    pub shadow: Color,
    /// Dimming fill painted by a modal overlay behind its window.
    pub modal_dim: Color,
    pub close_button: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            title_active: Color::rgb(255, 255, 255),
            title_inactive: Color::rgb(150, 150, 150),
            window_fill: Color::rgb(46, 46, 46),
            title_bar_fill: Color::rgb(37, 37, 37),
            title_bar_fill_focused: Color::rgb(58, 58, 58),
            frame: Color::rgb(80, 80, 80),
            shadow: Color::rgba(0, 0, 0, 110),
            modal_dim: Color::rgba(0, 0, 0, 150),
            close_button: Color::rgb(200, 80, 80),
        }
    }
}

/// Chrome-drawing contract consumed by the window control.
///
/// `bounds` arguments are in the control's local space; the renderer's
/// offset already points at the control's top-left corner when these run.
pub trait Skin {
    fn theme(&self) -> &Theme;

    /// Window body + title bar. `title_bar_bottom` is the Y of the title
    /// bar's bottom edge in local space.
    fn draw_window(
        &self,
        renderer: &mut dyn Renderer,
        bounds: Rect,
        title_bar_bottom: i32,
        has_focus: bool,
    );

    /// Drop shadow painted in the render-under pass, before the body.
    fn draw_shadow(&self, renderer: &mut dyn Renderer, bounds: Rect);

    /// Dimming layer painted by a modal overlay with a background.
    fn draw_modal(&self, renderer: &mut dyn Renderer, bounds: Rect) {
        renderer.set_draw_color(self.theme().modal_dim);
        renderer.draw_filled_rect(bounds);
    }

    fn draw_close_button(&self, renderer: &mut dyn Renderer, bounds: Rect) {
        renderer.set_draw_color(self.theme().close_button);
        renderer.draw_lined_rect(bounds);
    }
}

/// Flat-colored skin built entirely from the primitive layer.
pub struct SimpleSkin {
    theme: Theme,
}

impl SimpleSkin {
    pub fn new() -> Self {
        Self { theme: Theme::default() }
    }

    pub fn with_theme(theme: Theme) -> Self {
        Self { theme }
    }
}

impl Default for SimpleSkin {
    fn default() -> Self {
        Self::new()
    }
}

impl Skin for SimpleSkin {
    fn theme(&self) -> &Theme {
        &self.theme
    }

    fn draw_window(
        &self,
        renderer: &mut dyn Renderer,
        bounds: Rect,
        title_bar_bottom: i32,
        has_focus: bool,
    ) {
        renderer.set_draw_color(self.theme.window_fill);
        renderer.draw_filled_rect(bounds);

        let strip = if has_focus {
            self.theme.title_bar_fill_focused
        } else {
            self.theme.title_bar_fill
        };
        renderer.set_draw_color(strip);
        renderer.draw_filled_rect(Rect::new(bounds.x, bounds.y, bounds.w, title_bar_bottom));

        // Softer outline on unfocused windows.
        renderer.set_draw_color(self.theme.frame);
        renderer.draw_shaved_corner_rect(bounds, !has_focus);
    }

    fn draw_shadow(&self, renderer: &mut dyn Renderer, bounds: Rect) {
        renderer.set_draw_color(self.theme.shadow);
        renderer.draw_filled_rect(bounds.offset(4, 4));
    }
}
