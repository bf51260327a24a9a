//! # Graphics Module
//!
//! Everything between window input and the external renderer: the camera,
//! ray casting, the scene graph and the rendering seam.
//!
//! ## Architecture Overview
//!
//! - **Camera System** ([`camera`]) - Trackball rotation with pan and zoom
//! - **Picking** ([`picking`]) - Window rays and ray/box intersection
//! - **Rendering Seam** ([`rendering`]) - The [`Renderer`] trait and a draw list
//! - **Scene Management** ([`scene`]) - Nodes, transforms and selection
//!
//! ## Usage
//!
//! ```rust
//! use modeller::gfx::{rendering::DrawList, scene::SceneGraph};
//!
//! let scene = SceneGraph::sample();
//! let mut list = DrawList::new();
//! scene.render(&mut list).unwrap();
//! assert_eq!(list.calls().len(), 5);
//! ```
//!
//! [`Renderer`]: rendering::Renderer

pub mod camera;
pub mod math;
pub mod picking;
pub mod rendering;
pub mod scene;

#[cfg(test)]
mod test_scenarios;

// Re-export commonly used types
pub use camera::Camera;
pub use picking::{Ray, RayCaster, AABB};
pub use rendering::{DrawList, Renderer};
pub use scene::SceneGraph;
