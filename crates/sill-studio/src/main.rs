//! Demo: a small window stack driven against the recording backend.
//!
//! There is no OS window here on purpose — the demo exercises the control
//! tree and renderer abstraction end to end and logs what each frame would
//! draw.

use anyhow::{Context, Result};

use sill_render::logging::{LoggingConfig, init_logging};
use sill_ui::prelude::*;
use sill_ui::window::handle_close_press;

fn frame(tree: &mut ControlTree, renderer: &mut RecordingRenderer, skin: &SimpleSkin) -> usize {
    layout::arrange(tree, tree.canvas());
    tree.render(renderer, skin);
    tree.end_frame();
    renderer.commands().len()
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let mut tree = ControlTree::new(Rect::new(0, 0, 800, 600));
    let skin = SimpleSkin::new();
    let mut renderer = RecordingRenderer::new();

    let canvas = tree.canvas();
    let inspector = Window::create(&mut tree, canvas, "Inspector");
    if let Some(c) = tree.get_mut(inspector.id()) {
        c.bounds = Rect::new(40, 40, 320, 240);
    }

    let canvas = tree.canvas();
    let about = Window::create(&mut tree, canvas, "About sill");
    if let Some(c) = tree.get_mut(about.id()) {
        c.bounds = Rect::new(200, 160, 260, 140);
    }
    about.set_delete_on_close(&mut tree, true);
    about.on_closed(&mut tree, |id| log::info!("about window {id:?} closed"));

    log::info!(
        "frame 1: {} draw commands, about on top: {}",
        frame(&mut tree, &mut renderer, &skin),
        about.is_on_top(&tree)
    );

    // Pop the about box over everything as a modal dialog.
    about.make_modal(&mut tree, true);
    log::info!(
        "frame 2 (modal): {} draw commands",
        frame(&mut tree, &mut renderer, &skin)
    );

    // User clicks the close button; the window hides itself, tears down the
    // overlay, and is reaped at the frame boundary.
    let close = about
        .close_button(&tree)
        .context("about window lost its close button")?;
    handle_close_press(&mut tree, close);
    log::info!(
        "frame 3 (closed): {} draw commands, inspector on top: {}",
        frame(&mut tree, &mut renderer, &skin),
        inspector.is_on_top(&tree)
    );

    renderer.release_resources();
    Ok(())
}
