use cgmath::{perspective, vec3, Deg, Matrix4, SquareMatrix, Vector3, Zero};

use super::trackball::Trackball;
use crate::config::ViewerConfig;
use crate::error::{Error, Result};

/// Perspective projection pulled back from the scene by `eye_distance`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub fovy: Deg<f32>,
    pub aspect: f32,
    pub znear: f32,
    pub zfar: f32,
    pub eye_distance: f32,
}

impl Projection {
    pub fn from_config(config: &ViewerConfig) -> Self {
        Self {
            fovy: Deg(config.fovy_degrees),
            aspect: config.aspect(),
            znear: config.znear,
            zfar: config.zfar,
            eye_distance: config.eye_distance,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.aspect = width as f32 / height.max(1) as f32;
    }

    pub fn matrix(&self) -> Matrix4<f32> {
        perspective(self.fovy, self.aspect, self.znear, self.zfar)
            * Matrix4::from_translation(vec3(0.0, 0.0, -self.eye_distance))
    }
}

/// Viewer camera: a pan/zoom translation applied after the trackball rotation.
#[derive(Debug, Clone)]
pub struct Camera {
    pub translation: Vector3<f32>,
    pub trackball: Trackball,
}

impl Camera {
    pub fn new(trackball: Trackball) -> Self {
        Self {
            translation: Vector3::zero(),
            trackball,
        }
    }

    pub fn from_config(config: &ViewerConfig) -> Self {
        Self::new(Trackball::from_config(config))
    }

    /// Pan or zoom (accumulates)
    pub fn translate(&mut self, dx: f32, dy: f32, dz: f32) {
        self.translation += vec3(dx, dy, dz);
    }

    /// Scene-to-camera transform: `T(translation) * R(trackball)`
    pub fn modelview(&self) -> Matrix4<f32> {
        Matrix4::from_translation(self.translation) * self.trackball.matrix()
    }

    pub fn inverse_modelview(&self) -> Result<Matrix4<f32>> {
        self.modelview().invert().ok_or(Error::SingularTransform)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::from_config(&ViewerConfig::default())
    }
}
