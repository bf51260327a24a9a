pub mod camera_utils;
pub mod trackball;

// Re-export main types
pub use camera_utils::{Camera, Projection};
pub use trackball::{DragState, Trackball};
