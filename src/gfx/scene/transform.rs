//! Node placement relative to the parent frame.
//!
//! A transform is a translation followed by a per-axis scale, composed as
//! `T * S`. Rotation only ever comes from the camera, never from nodes.

use cgmath::{Matrix4, Vector3, Zero};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    translation: Vector3<f32>,
    scale: Vector3<f32>,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translation: Vector3::zero(),
            scale: Vector3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Transform {
    /// Create an identity transform
    pub fn new() -> Self {
        Self::default()
    }

    pub fn translation(&self) -> Vector3<f32> {
        self.translation
    }

    pub fn scale_factors(&self) -> Vector3<f32> {
        self.scale
    }

    /// Apply translation (accumulates with the existing translation)
    pub fn translate(&mut self, dx: f32, dy: f32, dz: f32) {
        self.translation += Vector3::new(dx, dy, dz);
    }

    /// Multiply a uniform factor into the existing scale.
    pub fn scale(&mut self, factor: f32) -> Result<()> {
        if !(factor.is_finite() && factor > 0.0) {
            return Err(Error::InvalidScale(factor));
        }
        self.apply_scale(factor);
        Ok(())
    }

    pub(crate) fn apply_scale(&mut self, factor: f32) {
        self.scale *= factor;
    }

    pub fn translation_matrix(&self) -> Matrix4<f32> {
        Matrix4::from_translation(self.translation)
    }

    pub fn scale_matrix(&self) -> Matrix4<f32> {
        Matrix4::from_nonuniform_scale(self.scale.x, self.scale.y, self.scale.z)
    }

    /// Node-to-parent matrix, `T * S`
    pub fn matrix(&self) -> Matrix4<f32> {
        self.translation_matrix() * self.scale_matrix()
    }
}
