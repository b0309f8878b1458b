use crate::coords::{Point, Rect};
use crate::paint::Color;

use super::RenderContext;

/// Minimal font descriptor consumed by the fallback text path.
///
/// Glyph loading belongs to concrete backends; the base layer only looks at
/// `size`.
#[derive(Debug, Clone, PartialEq)]
pub struct Font {
    pub facename: String,
    pub size: f32,
}

impl Font {
    pub fn new(facename: impl Into<String>, size: f32) -> Self {
        Self { facename: facename.into(), size }
    }
}

/// Opaque backend texture descriptor.
///
/// The base layer never loads image data. `failed` is set by the backend
/// when the asset could not be resolved; consumers then draw the
/// missing-image placeholder instead of sampling.
#[derive(Debug, Clone, Default)]
pub struct Texture {
    pub name: String,
    pub width: i32,
    pub height: i32,
    pub failed: bool,
}

/// Capability set a concrete 2D backend implements.
///
/// Exactly one drawing primitive is required — fill an axis-aligned rect
/// with the current draw color — and the rest of the primitive layer is
/// default methods composed on top of it. Backends with real glyph metrics
/// override [`render_text`](Self::render_text) /
/// [`measure_text`](Self::measure_text); backends that can sample textures
/// override [`pixel_color`](Self::pixel_color). The defaults are crude
/// placeholders that keep a UI legible without either.
///
/// `rect` arguments are in logical space; implementations of
/// [`draw_filled_rect`](Self::draw_filled_rect) run them through
/// [`RenderContext::translate_rect`] before emitting device draw calls.
pub trait Renderer {
    /// Transform/clip/color state shared by the default primitives.
    fn ctx(&self) -> &RenderContext;
    fn ctx_mut(&mut self) -> &mut RenderContext;

    /// Fill `rect` with the current draw color.
    fn draw_filled_rect(&mut self, rect: Rect);

    /// Set the color used by subsequent fills.
    ///
    /// The default stores the color on the context. Backends that mirror it
    /// into a native color state override this and must keep the context in
    /// sync.
    fn set_draw_color(&mut self, color: Color) {
        self.ctx_mut().draw_color = color;
    }

    /// Hook called at the start of a frame.
    fn begin(&mut self) {}

    /// Hook called at the end of a frame.
    fn end(&mut self) {}

    /// Release backend-held resources (textures, glyph atlases).
    ///
    /// Called once by the owner during teardown; the base layer holds
    /// nothing to release.
    fn release_resources(&mut self) {}

    // ── composed primitives ───────────────────────────────────────────────

    /// Rectangle outline built from four 1-unit filled rects.
    fn draw_lined_rect(&mut self, rect: Rect) {
        self.draw_filled_rect(Rect::new(rect.x, rect.y, rect.w, 1));
        self.draw_filled_rect(Rect::new(rect.x, rect.y + rect.h - 1, rect.w, 1));
        self.draw_filled_rect(Rect::new(rect.x, rect.y, 1, rect.h));
        self.draw_filled_rect(Rect::new(rect.x + rect.w - 1, rect.y, 1, rect.h));
    }

    fn draw_pixel(&mut self, x: i32, y: i32) {
        self.draw_filled_rect(Rect::new(x, y, 1, 1));
    }

    /// Rectangle outline with softened corners, for UI chrome that wants
    /// rounded corners without arc drawing.
    ///
    /// `slight` insets all four edges by one unit and leaves the corners
    /// untouched; otherwise the single corner pixels are omitted and drawn
    /// individually one unit in, with the edges shortened to match.
    fn draw_shaved_corner_rect(&mut self, rect: Rect, slight: bool) {
        // Draw inside the w/h.
        let rect = Rect::new(rect.x, rect.y, rect.w - 1, rect.h - 1);

        if slight {
            self.draw_filled_rect(Rect::new(rect.x + 1, rect.y, rect.w - 1, 1));
            self.draw_filled_rect(Rect::new(rect.x + 1, rect.y + rect.h, rect.w - 1, 1));
            self.draw_filled_rect(Rect::new(rect.x, rect.y + 1, 1, rect.h - 1));
            self.draw_filled_rect(Rect::new(rect.x + rect.w, rect.y + 1, 1, rect.h - 1));
            return;
        }

        self.draw_pixel(rect.x + 1, rect.y + 1);
        self.draw_pixel(rect.x + rect.w - 1, rect.y + 1);
        self.draw_pixel(rect.x + 1, rect.y + rect.h - 1);
        self.draw_pixel(rect.x + rect.w - 1, rect.y + rect.h - 1);
        self.draw_filled_rect(Rect::new(rect.x + 2, rect.y, rect.w - 3, 1));
        self.draw_filled_rect(Rect::new(rect.x + 2, rect.y + rect.h, rect.w - 3, 1));
        self.draw_filled_rect(Rect::new(rect.x, rect.y + 2, 1, rect.h - 3));
        self.draw_filled_rect(Rect::new(rect.x + rect.w, rect.y + 2, 1, rect.h - 3));
    }

    /// Fallback for an image/texture that could not be resolved: a solid
    /// alert-colored fill. A missing asset degrades visually instead of
    /// failing the frame.
    fn draw_missing_image(&mut self, rect: Rect) {
        self.set_draw_color(Color::RED);
        self.draw_filled_rect(rect);
    }

    /// Sample a texel. The base layer cannot sample; it returns `default`.
    fn pixel_color(&mut self, _texture: &Texture, _x: u32, _y: u32, default: Color) -> Color {
        default
    }

    // ── fallback text ─────────────────────────────────────────────────────

    /// Placeholder glyph rendering for backends without real font support:
    /// each character becomes a rect roughly where the letter would be.
    /// Not a typography engine — backends are expected to override this
    /// together with [`measure_text`](Self::measure_text).
    fn render_text(&mut self, font: &Font, pos: Point, text: &str) {
        let size = font.size * self.ctx().scale();

        for (i, chr) in text.chars().enumerate() {
            if chr == ' ' {
                continue;
            }

            let mut r = Rect::new(
                pos.x + (i as f32 * size * 0.4) as i32,
                pos.y,
                (size * 0.4 - 1.0) as i32,
                size as i32,
            );

            // Vary the rect shape per glyph class so the placeholder text
            // keeps a readable rhythm.
            if matches!(chr, 'l' | 'i' | '!' | 't') {
                r.w = 1;
            } else if chr.is_ascii_lowercase() {
                r.y += (size * 0.5) as i32;
                r.h -= (size * 0.4) as i32;
            } else if matches!(chr, '.' | ',') {
                r.x += 2;
                r.y += r.h - 2;
                r.w = 2;
                r.h = 2;
            } else if matches!(chr, '\'' | '`' | '"') {
                r.x += 3;
                r.w = 2;
                r.h = 2;
            }

            if matches!(chr, 'o' | 'O' | '0') {
                self.draw_lined_rect(r);
            } else {
                self.draw_filled_rect(r);
            }
        }
    }

    /// Placeholder metrics matching [`render_text`](Self::render_text):
    /// `(chars * size * scale * 0.4, size * scale)`.
    fn measure_text(&self, font: &Font, text: &str) -> Point {
        let size = font.size * self.ctx().scale();
        Point::new(
            (size * text.chars().count() as f32 * 0.4) as i32,
            size as i32,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::RecordingRenderer;

    fn renderer() -> RecordingRenderer {
        let mut r = RecordingRenderer::new();
        r.ctx_mut().set_clip(Rect::new(0, 0, 1000, 1000));
        r
    }

    // ── composed primitives ───────────────────────────────────────────────

    #[test]
    fn lined_rect_is_four_edges() {
        let mut r = renderer();
        r.set_draw_color(Color::WHITE);
        r.draw_lined_rect(Rect::new(10, 10, 20, 30));

        let rects: Vec<Rect> = r.commands().iter().map(|c| c.rect).collect();
        assert_eq!(
            rects,
            vec![
                Rect::new(10, 10, 20, 1),
                Rect::new(10, 39, 20, 1),
                Rect::new(10, 10, 1, 30),
                Rect::new(29, 10, 1, 30),
            ]
        );
    }

    #[test]
    fn pixel_is_unit_rect() {
        let mut r = renderer();
        r.draw_pixel(5, 7);
        assert_eq!(r.commands()[0].rect, Rect::new(5, 7, 1, 1));
    }

    #[test]
    fn shaved_corner_rect_slight_is_four_inset_edges() {
        let mut r = renderer();
        r.draw_shaved_corner_rect(Rect::new(0, 0, 10, 10), true);
        // w/h drawn inside: effective rect is 9x9.
        let rects: Vec<Rect> = r.commands().iter().map(|c| c.rect).collect();
        assert_eq!(
            rects,
            vec![
                Rect::new(1, 0, 8, 1),
                Rect::new(1, 9, 8, 1),
                Rect::new(0, 1, 1, 8),
                Rect::new(9, 1, 1, 8),
            ]
        );
    }

    #[test]
    fn shaved_corner_rect_full_has_corner_pixels_and_edges() {
        let mut r = renderer();
        r.draw_shaved_corner_rect(Rect::new(0, 0, 10, 10), false);
        // Four corner pixels + four shortened edges.
        assert_eq!(r.commands().len(), 8);
        assert_eq!(r.commands()[0].rect, Rect::new(1, 1, 1, 1));
        assert_eq!(r.commands()[4].rect, Rect::new(2, 0, 6, 1));
    }

    #[test]
    fn missing_image_always_uses_alert_color() {
        let mut r = renderer();
        r.set_draw_color(Color::rgb(0, 128, 255));
        r.draw_missing_image(Rect::new(0, 0, 4, 4));
        let cmd = r.commands()[0];
        assert_eq!(cmd.color, Color::RED);
        assert_eq!(cmd.rect, Rect::new(0, 0, 4, 4));
    }

    #[test]
    fn pixel_color_default_passes_through() {
        let mut r = renderer();
        let fallback = Color::rgb(1, 2, 3);
        assert_eq!(r.pixel_color(&Texture::default(), 3, 4, fallback), fallback);
    }

    // ── fallback text ─────────────────────────────────────────────────────

    #[test]
    fn measure_text_uses_character_count() {
        let r = renderer();
        let font = Font::new("any", 10.0);
        assert_eq!(r.measure_text(&font, "ab"), Point::new(8, 10));
        assert_eq!(r.measure_text(&font, ""), Point::new(0, 10));
    }

    #[test]
    fn measure_text_scales() {
        let mut r = renderer();
        r.ctx_mut().set_scale(2.0);
        let font = Font::new("any", 10.0);
        assert_eq!(r.measure_text(&font, "ab"), Point::new(16, 20));
    }

    #[test]
    fn render_text_skips_spaces() {
        let mut r = renderer();
        let font = Font::new("any", 10.0);
        r.render_text(&font, Point::zero(), "a b");
        // Two glyph rects; the space emits nothing.
        assert_eq!(r.commands().len(), 2);
    }

    #[test]
    fn render_text_outlines_o_shapes() {
        let mut r = renderer();
        let font = Font::new("any", 10.0);
        r.render_text(&font, Point::zero(), "O");
        // Outlined glyph: four edge rects instead of one fill.
        assert_eq!(r.commands().len(), 4);
    }

    #[test]
    fn render_text_narrow_glyphs_are_one_unit_wide() {
        let mut r = renderer();
        let font = Font::new("any", 10.0);
        r.render_text(&font, Point::zero(), "i");
        assert_eq!(r.commands()[0].rect.w, 1);
    }
}
