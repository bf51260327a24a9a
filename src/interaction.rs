//! # Interaction
//!
//! Turns raw window input into [`Command`]s for the viewer. The event loop
//! forwards winit input here; the render side drains the queue and applies
//! the commands one at a time through
//! [`ViewerState::apply`](crate::app::ViewerState::apply), so the scene has a
//! single writer no matter where input comes from.
//!
//! ## Bindings
//!
//! - **Left button**: press picks, drag moves the selection
//! - **Right drag**: rotates the trackball
//! - **Middle drag**: pans the camera
//! - **Wheel**: moves the camera in and out
//! - **S / C / F**: place a sphere, cube or figure under the cursor
//! - **Up / Down**: scale the selection up or down
//! - **Left / Right**: step the selection's colour forward or backward

use std::collections::VecDeque;

use log::debug;
use winit::{
    event::{ElementState, MouseButton, MouseScrollDelta},
    keyboard::KeyCode,
};

use crate::config::ViewerConfig;
use crate::gfx::scene::ShapeKind;

/// One scene or camera mutation. Coordinates are window pixels with the
/// origin at the bottom-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Pick { x: f32, y: f32 },
    Move { x: f32, y: f32 },
    Place { kind: ShapeKind, x: f32, y: f32 },
    RotateColor { forward: bool },
    Scale { up: bool },
    BeginRotate { x: f32, y: f32 },
    Rotate { x: f32, y: f32, dx: f32, dy: f32 },
    EndRotate,
    TranslateCamera { dx: f32, dy: f32, dz: f32 },
}

pub struct Interaction {
    pressed: Option<MouseButton>,
    mouse_loc: Option<(f32, f32)>,
    window_size: (f32, f32),
    pan_divisor: f32,
    scroll_step: f32,
    queue: VecDeque<Command>,
}

impl Interaction {
    pub fn new(config: &ViewerConfig) -> Self {
        Self {
            pressed: None,
            mouse_loc: None,
            window_size: (config.viewport_width as f32, config.viewport_height as f32),
            pan_divisor: config.pan_divisor,
            scroll_step: config.scroll_step,
            queue: VecDeque::new(),
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.window_size = (width as f32, height as f32);
    }

    /// Cursor position in winit window coordinates (origin top-left)
    pub fn handle_cursor_moved(&mut self, x: f64, y: f64) {
        let (x, y) = (x as f32, self.window_size.1 - y as f32);

        if let (Some(button), Some((last_x, last_y))) = (self.pressed, self.mouse_loc) {
            let (dx, dy) = (x - last_x, y - last_y);
            match button {
                // Rotate about the world origin, so the camera translation is ignored
                MouseButton::Right => self.push(Command::Rotate {
                    x: last_x,
                    y: last_y,
                    dx,
                    dy,
                }),
                MouseButton::Left => self.push(Command::Move { x, y }),
                MouseButton::Middle => self.push(Command::TranslateCamera {
                    dx: dx / self.pan_divisor,
                    dy: dy / self.pan_divisor,
                    dz: 0.0,
                }),
                _ => (),
            }
        }

        self.mouse_loc = Some((x, y));
    }

    pub fn handle_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        match state {
            ElementState::Pressed => {
                // The first held button owns the drag until it is released
                if let Some(held) = self.pressed {
                    debug!("Interaction: ignoring {button:?} while {held:?} is held");
                    return;
                }
                self.pressed = Some(button);
                let Some((x, y)) = self.mouse_loc else {
                    debug!("Interaction: {button:?} pressed before any cursor position");
                    return;
                };
                match button {
                    MouseButton::Left => self.push(Command::Pick { x, y }),
                    MouseButton::Right => self.push(Command::BeginRotate { x, y }),
                    _ => (),
                }
            }
            ElementState::Released => {
                if self.pressed != Some(button) {
                    return;
                }
                if button == MouseButton::Right {
                    self.push(Command::EndRotate);
                }
                self.pressed = None;
            }
        }
    }

    pub fn handle_scroll(&mut self, delta: MouseScrollDelta) {
        let amount = match delta {
            MouseScrollDelta::LineDelta(_, y) => y,
            MouseScrollDelta::PixelDelta(position) => position.y as f32,
        };

        if amount > 0.0 {
            self.push(Command::TranslateCamera {
                dx: 0.0,
                dy: 0.0,
                dz: self.scroll_step,
            });
        } else if amount < 0.0 {
            self.push(Command::TranslateCamera {
                dx: 0.0,
                dy: 0.0,
                dz: -self.scroll_step,
            });
        }
    }

    pub fn handle_key(&mut self, key: KeyCode, state: ElementState) {
        if state != ElementState::Pressed {
            return;
        }

        let (x, y) = self.cursor_or_center();
        let command = match key {
            KeyCode::KeyS => Command::Place {
                kind: ShapeKind::Sphere,
                x,
                y,
            },
            KeyCode::KeyC => Command::Place {
                kind: ShapeKind::Cube,
                x,
                y,
            },
            KeyCode::KeyF => Command::Place {
                kind: ShapeKind::Figure,
                x,
                y,
            },
            KeyCode::ArrowUp => Command::Scale { up: true },
            KeyCode::ArrowDown => Command::Scale { up: false },
            KeyCode::ArrowLeft => Command::RotateColor { forward: true },
            KeyCode::ArrowRight => Command::RotateColor { forward: false },
            _ => return,
        };
        self.push(command);
    }

    /// Take every queued command, oldest first
    pub fn drain(&mut self) -> Vec<Command> {
        self.queue.drain(..).collect()
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    fn cursor_or_center(&self) -> (f32, f32) {
        self.mouse_loc
            .unwrap_or((self.window_size.0 / 2.0, self.window_size.1 / 2.0))
    }

    fn push(&mut self, command: Command) {
        self.queue.push_back(command);
    }
}

impl Default for Interaction {
    fn default() -> Self {
        Self::new(&ViewerConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::dpi::PhysicalPosition;

    #[test]
    fn test_left_click_picks_with_flipped_y() {
        let mut interaction = Interaction::default();
        interaction.handle_cursor_moved(100.0, 80.0);
        interaction.handle_mouse_button(MouseButton::Left, ElementState::Pressed);
        assert_eq!(interaction.drain(), vec![Command::Pick { x: 100.0, y: 400.0 }]);
        assert_eq!(interaction.pending(), 0);
    }

    #[test]
    fn test_press_without_cursor_is_ignored() {
        let mut interaction = Interaction::default();
        interaction.handle_mouse_button(MouseButton::Left, ElementState::Pressed);
        assert!(interaction.drain().is_empty());
    }

    #[test]
    fn test_right_drag_drives_trackball() {
        let mut interaction = Interaction::default();
        interaction.handle_cursor_moved(300.0, 200.0);
        interaction.handle_mouse_button(MouseButton::Right, ElementState::Pressed);
        interaction.handle_cursor_moved(310.0, 190.0);
        interaction.handle_cursor_moved(315.0, 190.0);
        interaction.handle_mouse_button(MouseButton::Right, ElementState::Released);

        assert_eq!(
            interaction.drain(),
            vec![
                Command::BeginRotate { x: 300.0, y: 280.0 },
                Command::Rotate {
                    x: 300.0,
                    y: 280.0,
                    dx: 10.0,
                    dy: 10.0
                },
                Command::Rotate {
                    x: 310.0,
                    y: 290.0,
                    dx: 5.0,
                    dy: 0.0
                },
                Command::EndRotate,
            ]
        );
    }

    #[test]
    fn test_left_drag_moves_and_middle_drag_pans() {
        let mut interaction = Interaction::default();
        interaction.handle_cursor_moved(100.0, 100.0);
        interaction.handle_mouse_button(MouseButton::Left, ElementState::Pressed);
        interaction.handle_cursor_moved(120.0, 100.0);
        interaction.handle_mouse_button(MouseButton::Left, ElementState::Released);

        interaction.handle_mouse_button(MouseButton::Middle, ElementState::Pressed);
        interaction.handle_cursor_moved(180.0, 40.0);
        interaction.handle_mouse_button(MouseButton::Middle, ElementState::Released);

        // Hover without a button does nothing
        interaction.handle_cursor_moved(0.0, 0.0);

        assert_eq!(
            interaction.drain(),
            vec![
                Command::Pick { x: 100.0, y: 380.0 },
                Command::Move { x: 120.0, y: 380.0 },
                Command::TranslateCamera {
                    dx: 1.0,
                    dy: 1.0,
                    dz: 0.0
                },
            ]
        );
    }

    #[test]
    fn test_other_buttons_do_not_interrupt_rotation() {
        let mut interaction = Interaction::default();
        interaction.handle_cursor_moved(300.0, 200.0);
        interaction.handle_mouse_button(MouseButton::Right, ElementState::Pressed);
        interaction.handle_mouse_button(MouseButton::Left, ElementState::Pressed);
        interaction.handle_cursor_moved(310.0, 200.0);
        interaction.handle_mouse_button(MouseButton::Left, ElementState::Released);
        interaction.handle_mouse_button(MouseButton::Right, ElementState::Released);

        assert_eq!(
            interaction.drain(),
            vec![
                Command::BeginRotate { x: 300.0, y: 280.0 },
                Command::Rotate {
                    x: 300.0,
                    y: 280.0,
                    dx: 10.0,
                    dy: 0.0
                },
                Command::EndRotate,
            ]
        );

        // Nothing is held any more, so a left click picks again
        interaction.handle_mouse_button(MouseButton::Left, ElementState::Pressed);
        assert_eq!(interaction.drain(), vec![Command::Pick { x: 310.0, y: 280.0 }]);
    }

    #[test]
    fn test_resize_changes_flipped_row() {
        let mut interaction = Interaction::default();
        interaction.resize(800, 600);
        interaction.handle_cursor_moved(100.0, 100.0);
        interaction.handle_mouse_button(MouseButton::Left, ElementState::Pressed);
        assert_eq!(interaction.drain(), vec![Command::Pick { x: 100.0, y: 500.0 }]);
    }

    #[test]
    fn test_scroll_zooms_by_fixed_step() {
        let mut interaction = Interaction::default();
        interaction.handle_scroll(MouseScrollDelta::LineDelta(0.0, 3.0));
        interaction.handle_scroll(MouseScrollDelta::PixelDelta(PhysicalPosition::new(0.0, -12.0)));
        interaction.handle_scroll(MouseScrollDelta::LineDelta(1.0, 0.0));

        assert_eq!(
            interaction.drain(),
            vec![
                Command::TranslateCamera {
                    dx: 0.0,
                    dy: 0.0,
                    dz: 1.0
                },
                Command::TranslateCamera {
                    dx: 0.0,
                    dy: 0.0,
                    dz: -1.0
                },
            ]
        );
    }

    #[test]
    fn test_key_bindings() {
        let mut interaction = Interaction::default();
        interaction.handle_key(KeyCode::KeyS, ElementState::Pressed);
        interaction.handle_cursor_moved(10.0, 470.0);
        interaction.handle_key(KeyCode::KeyC, ElementState::Pressed);
        interaction.handle_key(KeyCode::KeyF, ElementState::Released);
        interaction.handle_key(KeyCode::ArrowUp, ElementState::Pressed);
        interaction.handle_key(KeyCode::ArrowDown, ElementState::Pressed);
        interaction.handle_key(KeyCode::ArrowLeft, ElementState::Pressed);
        interaction.handle_key(KeyCode::ArrowRight, ElementState::Pressed);
        interaction.handle_key(KeyCode::KeyQ, ElementState::Pressed);

        assert_eq!(
            interaction.drain(),
            vec![
                Command::Place {
                    kind: ShapeKind::Sphere,
                    x: 320.0,
                    y: 240.0
                },
                Command::Place {
                    kind: ShapeKind::Cube,
                    x: 10.0,
                    y: 10.0
                },
                Command::Scale { up: true },
                Command::Scale { up: false },
                Command::RotateColor { forward: true },
                Command::RotateColor { forward: false },
            ]
        );
    }
}
