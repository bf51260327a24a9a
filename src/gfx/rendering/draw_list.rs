//! Recording renderer
//!
//! Collects draw calls with their fully composed transforms, ready for
//! instanced upload. Also what the tests render into.

use bytemuck::{Pod, Zeroable};
use cgmath::{Matrix4, SquareMatrix, Vector3, Zero};
use log::warn;

use super::{Primitive, Renderer};
use crate::error::Result;

/// Instance data for a single drawn primitive
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct DrawInstance {
    /// Object-to-view transform (column major)
    pub transform: [[f32; 4]; 4],
    /// Diffuse colour (RGBA)
    pub color: [f32; 4],
    /// Emissive colour (RGBA)
    pub emission: [f32; 4],
}

impl DrawInstance {
    /// Create new instance data from a transform matrix and material
    pub fn from_transform(
        transform: Matrix4<f32>,
        color: Vector3<f32>,
        emission: Vector3<f32>,
    ) -> Self {
        Self {
            transform: transform.into(),
            color: color.extend(1.0).into(),
            emission: emission.extend(1.0).into(),
        }
    }

    pub fn translation(&self) -> Vector3<f32> {
        let column = self.transform[3];
        Vector3::new(column[0], column[1], column[2])
    }
}

/// One recorded primitive
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DrawCall {
    pub primitive: Primitive,
    pub instance: DrawInstance,
}

/// A [`Renderer`] that records instead of drawing.
#[derive(Debug, Clone)]
pub struct DrawList {
    stack: Vec<Matrix4<f32>>,
    color: Vector3<f32>,
    emission: Vector3<f32>,
    calls: Vec<DrawCall>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::with_base(Matrix4::identity())
    }

    /// Start recording with `base` as the outermost frame (usually the camera modelview)
    pub fn with_base(base: Matrix4<f32>) -> Self {
        Self {
            stack: vec![base],
            color: Vector3::new(1.0, 1.0, 1.0),
            emission: Vector3::zero(),
            calls: Vec::new(),
        }
    }

    /// Number of frames pushed on top of the base
    pub fn depth(&self) -> usize {
        self.stack.len() - 1
    }

    pub fn top(&self) -> Matrix4<f32> {
        self.stack.last().copied().unwrap_or_else(Matrix4::identity)
    }

    pub fn emission(&self) -> Vector3<f32> {
        self.emission
    }

    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    /// Instance data only, in draw order
    pub fn instances(&self) -> Vec<DrawInstance> {
        self.calls.iter().map(|call| call.instance).collect()
    }

    /// Raw bytes of the instance data for buffer upload
    pub fn instance_bytes(&self) -> Vec<u8> {
        bytemuck::cast_slice(&self.instances()).to_vec()
    }

    pub fn clear(&mut self) {
        self.stack.truncate(1);
        self.color = Vector3::new(1.0, 1.0, 1.0);
        self.emission = Vector3::zero();
        self.calls.clear();
    }
}

impl Default for DrawList {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for DrawList {
    fn push_frame(&mut self, local: Matrix4<f32>) {
        let top = self.top() * local;
        self.stack.push(top);
    }

    fn pop_frame(&mut self) {
        if self.stack.len() > 1 {
            self.stack.pop();
        } else {
            warn!("DrawList: pop_frame without a matching push");
        }
    }

    fn set_color(&mut self, color: Vector3<f32>) {
        self.color = color;
    }

    fn set_emission(&mut self, emission: Vector3<f32>) {
        self.emission = emission;
    }

    fn draw_primitive(&mut self, primitive: Primitive) -> Result<()> {
        self.calls.push(DrawCall {
            primitive,
            instance: DrawInstance::from_transform(self.top(), self.color, self.emission),
        });
        Ok(())
    }
}
