use crate::coords::Rect;
use crate::paint::Color;

use super::{RenderContext, Renderer};

/// One device-space fill emitted by [`RecordingRenderer`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct DrawCmd {
    pub rect: Rect,
    pub color: Color,
}

/// Backend that records translated fills instead of rasterizing.
///
/// Used by the demo binary and by tests that assert on emitted geometry.
/// Fills are dropped while the clip region is not visible, mirroring what a
/// scissor test would do on a real backend.
pub struct RecordingRenderer {
    ctx: RenderContext,
    commands: Vec<DrawCmd>,
    released: bool,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self {
            ctx: RenderContext::new(),
            commands: Vec::new(),
            released: false,
        }
    }

    /// Fills recorded since the last [`begin`](Renderer::begin).
    pub fn commands(&self) -> &[DrawCmd] {
        &self.commands
    }

    /// True once [`release_resources`](Renderer::release_resources) ran.
    pub fn is_released(&self) -> bool {
        self.released
    }
}

impl Default for RecordingRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for RecordingRenderer {
    fn drop(&mut self) {
        if !self.released {
            self.release_resources();
        }
    }
}

impl Renderer for RecordingRenderer {
    fn ctx(&self) -> &RenderContext {
        &self.ctx
    }

    fn ctx_mut(&mut self) -> &mut RenderContext {
        &mut self.ctx
    }

    fn draw_filled_rect(&mut self, rect: Rect) {
        if !self.ctx.is_clip_visible() {
            return;
        }
        self.commands.push(DrawCmd {
            rect: self.ctx.translate_rect(rect),
            color: self.ctx.draw_color,
        });
    }

    fn begin(&mut self) {
        self.commands.clear();
    }

    fn release_resources(&mut self) {
        self.released = true;
        log::debug!("recording renderer released");
    }
}
