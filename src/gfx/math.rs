//! Shared math vocabulary.
//!
//! The modeller works in single precision throughout. These aliases keep
//! signatures short while still being plain cgmath types, so every cgmath
//! operator and trait applies.

use cgmath::{Matrix4, Quaternion, Vector3, Vector4};

pub type Vec3 = Vector3<f32>;
pub type Vec4 = Vector4<f32>;
pub type Mat4 = Matrix4<f32>;
pub type Quat = Quaternion<f32>;

/// Apply `matrix` to a point (w = 1), dividing through by w.
pub fn transform_point(matrix: &Mat4, point: Vec3) -> Vec3 {
    let p = *matrix * point.extend(1.0);
    if p.w != 0.0 && p.w != 1.0 {
        p.truncate() / p.w
    } else {
        p.truncate()
    }
}

/// Apply `matrix` to a direction (w = 0); translation is ignored.
pub fn transform_vector(matrix: &Mat4, vector: Vec3) -> Vec3 {
    (*matrix * vector.extend(0.0)).truncate()
}

/// True when every component is finite.
pub fn is_finite(v: Vec3) -> bool {
    v.x.is_finite() && v.y.is_finite() && v.z.is_finite()
}
