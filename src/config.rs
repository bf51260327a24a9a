//! # Viewer Configuration
//!
//! All tunable constants of the modeller live in [`ViewerConfig`]. The
//! defaults reproduce the classic fixed-function setup: a 640x480 window, a 70
//! degree perspective pulled back 15 units, and new objects dropped 15 units
//! in front of the camera.

/// Default window width in pixels
pub const DEFAULT_VIEWPORT_WIDTH: u32 = 640;
/// Default window height in pixels
pub const DEFAULT_VIEWPORT_HEIGHT: u32 = 480;
/// Camera-space depth at which placed objects are created
pub const PLACE_DEPTH: f32 = 15.0;
/// Multiplicative step applied when scaling up
pub const SCALE_UP_STEP: f32 = 1.1;
/// Multiplicative step applied when scaling down
pub const SCALE_DOWN_STEP: f32 = 0.9;
/// Radius of the trackball's virtual sphere in normalised viewport units
pub const TRACKBALL_RADIUS: f32 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewerConfig {
    pub viewport_width: u32,
    pub viewport_height: u32,
    /// Vertical field of view in degrees
    pub fovy_degrees: f32,
    pub znear: f32,
    pub zfar: f32,
    /// Distance the projection pulls the whole scene back from the eye
    pub eye_distance: f32,
    pub place_depth: f32,
    pub scale_up: f32,
    pub scale_down: f32,
    /// Initial trackball tilt about the X axis, in degrees
    pub trackball_theta: f32,
    pub trackball_radius: f32,
    /// Pixels of middle-button drag per unit of camera pan
    pub pan_divisor: f32,
    /// Camera translation per scroll-wheel notch
    pub scroll_step: f32,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            viewport_width: DEFAULT_VIEWPORT_WIDTH,
            viewport_height: DEFAULT_VIEWPORT_HEIGHT,
            fovy_degrees: 70.0,
            znear: 0.1,
            zfar: 1000.0,
            eye_distance: 15.0,
            place_depth: PLACE_DEPTH,
            scale_up: SCALE_UP_STEP,
            scale_down: SCALE_DOWN_STEP,
            trackball_theta: -25.0,
            trackball_radius: TRACKBALL_RADIUS,
            pan_divisor: 60.0,
            scroll_step: 1.0,
        }
    }
}

impl ViewerConfig {
    /// Aspect ratio of the configured viewport
    pub fn aspect(&self) -> f32 {
        self.viewport_width as f32 / self.viewport_height.max(1) as f32
    }
}
