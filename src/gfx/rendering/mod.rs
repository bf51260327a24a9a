// src/gfx/rendering/mod.rs
//! Rendering seam
//!
//! The modeller never rasterizes anything itself. Nodes describe what to draw
//! through the [`Renderer`] trait: a matrix stack, a current colour and
//! emission, and a call per primitive. The actual draw calls belong to the
//! windowing layer.
//!
//! [`DrawList`] is the in-crate implementation. It flattens the matrix stack
//! into per-primitive instance data that can be uploaded straight to a GPU
//! buffer.

pub mod draw_list;

use std::ops::{Deref, DerefMut};

use cgmath::{Matrix4, Vector3, Zero};

use crate::error::Result;

// Re-export main types
pub use draw_list::{DrawCall, DrawInstance, DrawList};

/// Geometry the external renderer knows how to draw (its call-list handles)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    Sphere,
    Cube,
}

/// Immediate-mode drawing interface implemented by the external renderer.
pub trait Renderer {
    /// Push a new frame: `local` is composed onto the current top of stack.
    fn push_frame(&mut self, local: Matrix4<f32>);

    /// Restore the frame that was current before the matching push.
    fn pop_frame(&mut self);

    fn set_color(&mut self, color: Vector3<f32>);

    fn set_emission(&mut self, emission: Vector3<f32>);

    /// Draw one primitive in the current frame with the current material.
    fn draw_primitive(&mut self, primitive: Primitive) -> Result<()>;
}

/// Scoped frame on a [`Renderer`].
///
/// Pushes a frame on creation. When dropped it clears any emission it set
/// and pops the frame, so an early return through `?` still leaves the
/// renderer in the parent's state.
pub struct FrameGuard<'a, R: Renderer + ?Sized> {
    renderer: &'a mut R,
    emissive: bool,
}

impl<'a, R: Renderer + ?Sized> FrameGuard<'a, R> {
    pub fn push(renderer: &'a mut R, local: Matrix4<f32>) -> Self {
        renderer.push_frame(local);
        Self {
            renderer,
            emissive: false,
        }
    }

    /// Set an emission that lasts until this frame is popped
    pub fn set_emission(&mut self, emission: Vector3<f32>) {
        self.renderer.set_emission(emission);
        self.emissive = true;
    }
}

impl<R: Renderer + ?Sized> Deref for FrameGuard<'_, R> {
    type Target = R;

    fn deref(&self) -> &R {
        self.renderer
    }
}

impl<R: Renderer + ?Sized> DerefMut for FrameGuard<'_, R> {
    fn deref_mut(&mut self) -> &mut R {
        self.renderer
    }
}

impl<R: Renderer + ?Sized> Drop for FrameGuard<'_, R> {
    fn drop(&mut self) {
        if self.emissive {
            self.renderer.set_emission(Vector3::zero());
        }
        self.renderer.pop_frame();
    }
}
