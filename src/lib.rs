// src/lib.rs
//! Modeller
//!
//! The core of an interactive 3D scene modeller: a scene graph of spheres,
//! cubes and composite figures, ray-cast picking against their bounding
//! boxes, and a virtual trackball camera. Window input is mapped to commands
//! by [`interaction::Interaction`] and applied by [`ViewerState`]; drawing
//! goes through the [`gfx::rendering::Renderer`] trait.

pub mod app;
pub mod config;
pub mod error;
pub mod gfx;
pub mod interaction;
pub mod prelude;

// Re-export main types for convenience
pub use app::ViewerState;
pub use config::ViewerConfig;
pub use error::{Error, Result};

/// Creates a viewer over the sample scene with the default configuration
pub fn default() -> Result<ViewerState> {
    ViewerState::new(ViewerConfig::default())
}
