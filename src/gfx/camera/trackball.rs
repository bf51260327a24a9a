//! Virtual trackball.
//!
//! Pointer positions are normalised to [-1, 1] across the viewport and
//! lifted onto a sphere of radius `radius`, which blends into a hyperbolic
//! sheet past `radius / sqrt(2)` so drags outside the ball still rotate
//! smoothly. Each drag step becomes the rotation carrying the previous point
//! on that surface to the new one.

use std::f32::consts::{FRAC_1_SQRT_2, SQRT_2};

use cgmath::{Deg, InnerSpace, Matrix4, Quaternion, Rad, Rotation3, Vector3};
use log::debug;

use crate::config::ViewerConfig;

/// Renormalise the orientation after this many increments
const RENORMALIZE_EVERY: u32 = 97;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragState {
    Idle,
    Dragging { last: (f32, f32) },
}

#[derive(Debug, Clone)]
pub struct Trackball {
    orientation: Quaternion<f32>,
    state: DragState,
    radius: f32,
    viewport: (f32, f32),
    increments: u32,
}

impl Trackball {
    /// Start tilted `theta` degrees about the X axis.
    pub fn new(theta: f32, radius: f32, viewport_width: u32, viewport_height: u32) -> Self {
        Self {
            orientation: Quaternion::from_angle_x(Deg(theta)),
            state: DragState::Idle,
            radius,
            viewport: (viewport_width.max(1) as f32, viewport_height.max(1) as f32),
            increments: 0,
        }
    }

    pub fn from_config(config: &ViewerConfig) -> Self {
        Self::new(
            config.trackball_theta,
            config.trackball_radius,
            config.viewport_width,
            config.viewport_height,
        )
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    pub fn orientation(&self) -> Quaternion<f32> {
        self.orientation
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.viewport = (width.max(1) as f32, height.max(1) as f32);
    }

    pub fn begin_drag(&mut self, x: f32, y: f32) {
        debug!("Trackball: drag started at ({x}, {y})");
        self.state = DragState::Dragging { last: (x, y) };
    }

    /// Rotate by the drag from `(x, y)` to `(x + dx, y + dy)`, in pixels.
    ///
    /// Ignored unless a drag is in progress.
    pub fn drag_to(&mut self, x: f32, y: f32, dx: f32, dy: f32) {
        if !self.is_dragging() {
            debug!("Trackball: ignoring drag while idle");
            return;
        }

        let (width, height) = self.viewport;
        let increment = self.rotation_increment(
            (2.0 * x - width) / width,
            (2.0 * y - height) / height,
            2.0 * dx / width,
            2.0 * dy / height,
        );

        self.orientation = increment * self.orientation;
        self.increments += 1;
        if self.increments >= RENORMALIZE_EVERY {
            self.orientation = self.orientation.normalize();
            self.increments = 0;
        }

        self.state = DragState::Dragging {
            last: (x + dx, y + dy),
        };
    }

    pub fn end_drag(&mut self) {
        debug!("Trackball: drag ended");
        self.state = DragState::Idle;
    }

    /// Current rotation as a matrix, about the world origin
    pub fn matrix(&self) -> Matrix4<f32> {
        Matrix4::from(self.orientation)
    }

    fn rotation_increment(&self, x: f32, y: f32, dx: f32, dy: f32) -> Quaternion<f32> {
        let identity = Quaternion::new(1.0, 0.0, 0.0, 0.0);
        if dx == 0.0 && dy == 0.0 {
            return identity;
        }

        let last = Vector3::new(x, y, project_to_surface(self.radius, x, y));
        let new = Vector3::new(x + dx, y + dy, project_to_surface(self.radius, x + dx, y + dy));

        let axis = last.cross(new);
        if axis.magnitude2() == 0.0 {
            return identity;
        }

        let t = ((last - new).magnitude() / (2.0 * self.radius)).clamp(-1.0, 1.0);
        let angle = 2.0 * t.asin();
        Quaternion::from_axis_angle(axis.normalize(), Rad(angle))
    }
}

impl Default for Trackball {
    fn default() -> Self {
        Self::from_config(&ViewerConfig::default())
    }
}

/// Height of the trackball surface above (x, y)
fn project_to_surface(radius: f32, x: f32, y: f32) -> f32 {
    let d = (x * x + y * y).sqrt();
    if d < radius * FRAC_1_SQRT_2 {
        (radius * radius - d * d).sqrt()
    } else {
        let t = radius / SQRT_2;
        t * t / d
    }
}
