//! # Scene Management Module
//!
//! This module provides the scene graph: placed nodes with hierarchical
//! transforms, their bounding boxes, and the selection they share.
//!
//! ## Key Components
//!
//! - [`SceneGraph`] - Ordered root nodes plus the current selection
//! - [`Node`] - A sphere, a cube, or a figure that owns child nodes
//! - [`Transform`] - Translation and scale relative to the parent frame
//!
//! ## Usage
//!
//! ```rust
//! use cgmath::{vec3, Matrix4, SquareMatrix};
//! use modeller::gfx::scene::{Node, SceneGraph};
//!
//! let mut scene = SceneGraph::new();
//! scene.add_node(Node::cube().at(2.0, 0.0, 2.0));
//!
//! let picked = scene
//!     .pick(vec3(2.0, 0.0, 10.0), vec3(0.0, 0.0, -1.0), &Matrix4::identity())
//!     .unwrap();
//! assert_eq!(picked, Some(0));
//! ```

pub mod node;
pub mod scene_graph;
pub mod transform;

// Re-export main types
pub use node::{Node, PickHit, Shape, ShapeKind, PALETTE};
pub use scene_graph::SceneGraph;
pub use transform::Transform;
