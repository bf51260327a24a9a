//! # Modeller Prelude
//!
//! Commonly used types in one import.
//!
//! ## Usage
//!
//! ```rust
//! use modeller::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let mut viewer = ViewerState::new(ViewerConfig::default())?;
//!     viewer
//!         .interaction_mut()
//!         .handle_key(KeyCode::KeyC, ElementState::Pressed);
//!     assert!(viewer.apply_pending().is_empty());
//!
//!     assert_eq!(viewer.scene().len(), 4);
//!     Ok(())
//! }
//! ```

// Re-export core application types
pub use crate::app::ViewerState;
pub use crate::config::ViewerConfig;
pub use crate::error::{Error, Result};
pub use crate::interaction::{Command, Interaction};

// Re-export graphics and scene types
pub use crate::gfx::camera::{Camera, Projection, Trackball};
pub use crate::gfx::picking::{Ray, RayCaster, AABB};
pub use crate::gfx::rendering::{DrawList, FrameGuard, Primitive, Renderer};
pub use crate::gfx::scene::{Node, SceneGraph, ShapeKind, Transform};

// Re-export common external dependencies
pub use cgmath::{vec3, Matrix4, SquareMatrix, Vector3};
pub use winit::event::{ElementState, MouseButton};
pub use winit::keyboard::KeyCode;
