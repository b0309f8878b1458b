use crate::coords::{Point, Rect};
use crate::paint::Color;

/// Transform, clip, and color state shared by every renderer.
///
/// One instance lives on each renderer for the lifetime of the frame loop.
/// Logical coordinates pass through [`translate_point`](Self::translate_point)
/// / [`translate_rect`](Self::translate_rect) on their way to device space:
/// the render offset is applied first, then the uniform scale, with ceiling
/// rounding so scaled geometry never under-covers a logical pixel (flooring
/// opens 1px gaps at non-integer scale factors).
///
/// The clip region only ever shrinks through [`add_clip`](Self::add_clip);
/// nested scissor regions are modeled without a stack, so callers save and
/// restore the whole context around nested draws.
#[derive(Debug, Clone)]
pub struct RenderContext {
    offset: Point,
    scale: f32,
    clip: Rect,
    /// Current draw color. Set by callers before each primitive call; never
    /// reset automatically.
    pub draw_color: Color,
}

impl RenderContext {
    pub fn new() -> Self {
        Self {
            offset: Point::zero(),
            scale: 1.0,
            clip: Rect::default(),
            draw_color: Color::BLACK,
        }
    }

    // ── offset & scale ────────────────────────────────────────────────────

    #[inline]
    pub fn offset(&self) -> Point {
        self.offset
    }

    #[inline]
    pub fn set_offset(&mut self, offset: Point) {
        self.offset = offset;
    }

    /// Accumulate a translation (entering a child control's coordinate space).
    #[inline]
    pub fn add_offset(&mut self, delta: Point) {
        self.offset = self.offset + delta;
    }

    #[inline]
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Set the uniform scale factor. Must be positive.
    #[inline]
    pub fn set_scale(&mut self, scale: f32) {
        debug_assert!(scale > 0.0, "scale must be positive, got {scale}");
        self.scale = scale;
    }

    // ── logical → device ──────────────────────────────────────────────────

    /// `ceil((p + offset) * scale)` per axis.
    pub fn translate_point(&self, p: Point) -> Point {
        Point::new(
            (((p.x + self.offset.x) as f32) * self.scale).ceil() as i32,
            (((p.y + self.offset.y) as f32) * self.scale).ceil() as i32,
        )
    }

    /// Translates the origin and independently scales the extent, both with
    /// ceiling rounding.
    pub fn translate_rect(&self, rect: Rect) -> Rect {
        let origin = self.translate_point(rect.origin());
        Rect::from_point_size(
            origin,
            ((rect.w as f32) * self.scale).ceil() as i32,
            ((rect.h as f32) * self.scale).ceil() as i32,
        )
    }

    // ── clip region ───────────────────────────────────────────────────────

    #[inline]
    pub fn clip(&self) -> Rect {
        self.clip
    }

    /// Replace the active clip region unconditionally.
    #[inline]
    pub fn set_clip(&mut self, rect: Rect) {
        self.clip = rect;
    }

    /// Intersect `rect` with the current clip region.
    ///
    /// The incoming rect is first re-anchored to the current render offset —
    /// its own position is ignored, only its extent matters. Each edge of
    /// the result is then clamped against the current clip independently,
    /// so the region monotonically shrinks and never grows.
    pub fn add_clip(&mut self, rect: Rect) {
        let anchored = Rect::new(self.offset.x, self.offset.y, rect.w, rect.h);
        let mut out = anchored;

        if anchored.x < self.clip.x {
            out.w -= self.clip.x - out.x;
            out.x = self.clip.x;
        }

        if anchored.y < self.clip.y {
            out.h -= self.clip.y - out.y;
            out.y = self.clip.y;
        }

        if anchored.right() > self.clip.right() {
            out.w = self.clip.right() - out.x;
        }

        if anchored.bottom() > self.clip.bottom() {
            out.h = self.clip.bottom() - out.y;
        }

        self.clip = out;
    }

    /// False iff the clip region has non-positive width or height.
    #[inline]
    pub fn is_clip_visible(&self) -> bool {
        self.clip.w > 0 && self.clip.h > 0
    }
}

impl Default for RenderContext {
    fn default() -> Self {
        Self::new()
    }
}
