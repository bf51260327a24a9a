//! Headless session
//!
//! Drives the viewer with scripted window input and prints what a renderer
//! would be asked to draw. Run with `RUST_LOG=debug` to follow picking and
//! trackball events.

use log::info;
use modeller::prelude::*;
use winit::event::MouseScrollDelta;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = ViewerConfig {
        trackball_theta: 0.0,
        ..ViewerConfig::default()
    };
    let mut viewer = ViewerState::new(config)?;
    let input = viewer.interaction_mut();

    // Click the cube, which sits right of centre, then make it bigger and
    // step its colour backward. Cursor positions are winit's, origin top-left.
    input.handle_cursor_moved(400.0, 240.0);
    input.handle_mouse_button(MouseButton::Left, ElementState::Pressed);
    input.handle_cursor_moved(430.0, 240.0);
    input.handle_mouse_button(MouseButton::Left, ElementState::Released);
    input.handle_key(KeyCode::ArrowUp, ElementState::Pressed);
    input.handle_key(KeyCode::ArrowRight, ElementState::Pressed);

    // Drop a figure under the cursor and spin the view a little
    input.handle_key(KeyCode::KeyF, ElementState::Pressed);
    input.handle_mouse_button(MouseButton::Right, ElementState::Pressed);
    input.handle_cursor_moved(460.0, 220.0);
    input.handle_mouse_button(MouseButton::Right, ElementState::Released);
    input.handle_scroll(MouseScrollDelta::LineDelta(0.0, -1.0));

    info!("Applying {} commands", viewer.interaction().pending());
    for error in viewer.apply_pending() {
        eprintln!("command failed: {error}");
    }

    let scene = viewer.scene();
    println!("{} nodes, selected: {:?}", scene.len(), scene.selected_index());
    for (index, node) in scene.nodes().iter().enumerate() {
        let t = node.transform().translation();
        println!(
            "  [{index}] {:?} colour {} at ({:.2}, {:.2}, {:.2}) scale {:.2}",
            node.kind(),
            node.color_index(),
            t.x,
            t.y,
            t.z,
            node.transform().scale_factors().x
        );
    }

    let list = viewer.draw_list()?;
    println!(
        "{} draw calls, {} bytes of instance data",
        list.calls().len(),
        list.instance_bytes().len()
    );
    Ok(())
}
