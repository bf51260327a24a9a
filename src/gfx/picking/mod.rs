//! # Object Picking System
//!
//! This module provides 3D object picking using mouse ray-casting. It lets the
//! user click on objects in the scene to select them for recolouring, scaling
//! or dragging.
//!
//! ## How it works
//!
//! 1. **Mouse to Ray**: [`RayCaster`] unprojects window coordinates through the
//!    inverse projection into a ray
//! 2. **Ray-Box Intersection**: [`AABB::intersect`] moves the ray into a node's
//!    local frame and runs the slab test
//! 3. **Selection**: the scene graph keeps the closest hit, first-added wins ties
//!
//! ## Usage
//!
//! ```rust
//! use cgmath::{vec3, Matrix4, SquareMatrix};
//! use modeller::gfx::picking::{Ray, AABB};
//!
//! let aabb = AABB::unit();
//! let ray = Ray::new(vec3(0.0, 0.0, 10.0), vec3(0.0, 0.0, -1.0)).unwrap();
//! let hit = aabb.intersect(&ray, &Matrix4::identity()).unwrap();
//! assert!(hit.is_some());
//! ```

use cgmath::{vec3, InnerSpace, SquareMatrix, Vector3, Vector4};

use crate::error::{Error, Result};
use crate::gfx::math::{is_finite, transform_point, transform_vector, Mat4, Vec3};

/// A 3D ray for intersection testing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Ray origin point
    pub origin: Vector3<f32>,
    /// Ray direction (normalized)
    pub direction: Vector3<f32>,
}

impl Ray {
    /// Create a new ray, normalizing `direction`.
    ///
    /// Zero-length or non-finite directions are rejected instead of producing
    /// NaNs further down the pipeline.
    pub fn new(origin: Vector3<f32>, direction: Vector3<f32>) -> Result<Self> {
        let length = direction.magnitude();
        if !is_finite(origin) || !length.is_finite() || length == 0.0 {
            return Err(Error::DegenerateRay);
        }
        Ok(Self {
            origin,
            direction: direction / length,
        })
    }

    /// Get a point along the ray at distance t
    pub fn point_at(&self, t: f32) -> Vector3<f32> {
        self.origin + self.direction * t
    }

    /// Map the ray through an affine `matrix`, renormalizing the direction.
    pub fn transformed(&self, matrix: &Mat4) -> Result<Self> {
        Self::new(
            transform_point(matrix, self.origin),
            transform_vector(matrix, self.direction),
        )
    }
}

/// Axis-aligned bounding box in a node's local space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AABB {
    min: Vector3<f32>,
    max: Vector3<f32>,
}

impl AABB {
    /// Create a new AABB, rejecting boxes whose min corner is not
    /// componentwise <= the max corner.
    pub fn new(min: Vector3<f32>, max: Vector3<f32>) -> Result<Self> {
        if min.x <= max.x && min.y <= max.y && min.z <= max.z {
            Ok(Self { min, max })
        } else {
            Err(Error::InvalidGeometry {
                min: min.into(),
                max: max.into(),
            })
        }
    }

    /// Box centred on the origin with the given half extents
    pub fn from_half_extents(half_extents: Vector3<f32>) -> Result<Self> {
        Self::new(-half_extents, half_extents)
    }

    /// The default primitive box, half extent 0.5 on every axis
    pub fn unit() -> Self {
        Self::from_ordered(vec3(-0.5, -0.5, -0.5), vec3(0.5, 0.5, 0.5))
    }

    /// For corners that are ordered by construction
    pub(crate) fn from_ordered(min: Vector3<f32>, max: Vector3<f32>) -> Self {
        debug_assert!(min.x <= max.x && min.y <= max.y && min.z <= max.z);
        Self { min, max }
    }

    pub fn min(&self) -> Vector3<f32> {
        self.min
    }

    pub fn max(&self) -> Vector3<f32> {
        self.max
    }

    pub fn center(&self) -> Vector3<f32> {
        (self.min + self.max) * 0.5
    }

    pub fn half_extents(&self) -> Vector3<f32> {
        (self.max - self.min) * 0.5
    }

    /// Scale the box about the local origin by a positive factor.
    pub fn scale(&mut self, factor: f32) -> Result<()> {
        if !(factor.is_finite() && factor > 0.0) {
            return Err(Error::InvalidScale(factor));
        }
        self.apply_scale(factor);
        Ok(())
    }

    /// Unchecked scale for factors already known to be positive.
    pub(crate) fn apply_scale(&mut self, factor: f32) {
        self.min *= factor;
        self.max *= factor;
    }

    /// Test a ray against this box placed in the world by `node_to_world`.
    ///
    /// The ray is pulled into the box's local frame with the inverse matrix
    /// and clipped against each slab. Returns the distance along the world ray
    /// to the entry point, or `None` on a miss. A ray starting inside the box
    /// hits at distance zero; a box entirely behind the origin is a miss.
    /// A matrix with non-finite entries is reported as singular.
    pub fn intersect(&self, ray: &Ray, node_to_world: &Mat4) -> Result<Option<f32>> {
        let world_to_node = node_to_world.invert().ok_or(Error::SingularTransform)?;

        // Affine maps preserve the ray parameter, so t found locally is t on
        // the world ray as long as the direction is not renormalized.
        let origin = transform_point(&world_to_node, ray.origin);
        let direction = transform_vector(&world_to_node, ray.direction);
        if !is_finite(origin) || !is_finite(direction) {
            return Err(Error::SingularTransform);
        }

        let mut t_near = 0.0_f32;
        let mut t_far = f32::INFINITY;

        for axis in 0..3 {
            let (o, d) = (origin[axis], direction[axis]);
            let (lo, hi) = (self.min[axis], self.max[axis]);

            if d == 0.0 {
                // Parallel to this slab
                if o < lo || o > hi {
                    return Ok(None);
                }
                continue;
            }

            let inv = 1.0 / d;
            let mut t0 = (lo - o) * inv;
            let mut t1 = (hi - o) * inv;
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }

            t_near = t_near.max(t0);
            t_far = t_far.min(t1);
            if t_near > t_far {
                return Ok(None);
            }
        }

        Ok(Some(t_near * ray.direction.magnitude()))
    }
}

/// Turns window coordinates into rays using the current projection.
///
/// Window coordinates have their origin at the bottom-left corner.
#[derive(Debug, Clone, Copy)]
pub struct RayCaster {
    projection: Mat4,
    inverse_projection: Mat4,
    viewport: (f32, f32),
}

impl RayCaster {
    pub fn new(projection: Mat4, viewport_width: u32, viewport_height: u32) -> Result<Self> {
        let inverse_projection = projection.invert().ok_or(Error::SingularTransform)?;
        Ok(Self {
            projection,
            inverse_projection,
            viewport: (viewport_width.max(1) as f32, viewport_height.max(1) as f32),
        })
    }

    pub fn projection(&self) -> Mat4 {
        self.projection
    }

    pub fn set_projection(&mut self, projection: Mat4) -> Result<()> {
        self.inverse_projection = projection.invert().ok_or(Error::SingularTransform)?;
        self.projection = projection;
        Ok(())
    }

    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.viewport = (width.max(1) as f32, height.max(1) as f32);
    }

    /// Ray through the window position with an identity modelview.
    ///
    /// This is the ray the scene is picked with, paired with the camera
    /// modelview as the scene-to-ray transform.
    pub fn eye_ray(&self, x: f32, y: f32) -> Result<Ray> {
        let (width, height) = self.viewport;

        // Convert window coordinates to normalized device coordinates (-1 to 1)
        let ndc_x = (2.0 * x) / width - 1.0;
        let ndc_y = (2.0 * y) / height - 1.0;

        let near = self.unproject(Vector4::new(ndc_x, ndc_y, -1.0, 1.0))?;
        let far = self.unproject(Vector4::new(ndc_x, ndc_y, 1.0, 1.0))?;

        Ray::new(near, far - near)
    }

    /// Same ray expressed in world space, for picking with an identity transform.
    pub fn world_ray(&self, x: f32, y: f32, modelview: &Mat4) -> Result<Ray> {
        let inverse_modelview = modelview.invert().ok_or(Error::SingularTransform)?;
        self.eye_ray(x, y)?.transformed(&inverse_modelview)
    }

    fn unproject(&self, ndc: Vector4<f32>) -> Result<Vec3> {
        let p = self.inverse_projection * ndc;
        if p.w == 0.0 || !p.w.is_finite() {
            return Err(Error::SingularTransform);
        }
        Ok(p.truncate() / p.w)
    }
}
