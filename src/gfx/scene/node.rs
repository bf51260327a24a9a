//! # Scene Nodes
//!
//! A [`Node`] is one placed object: a primitive shape or a composite figure
//! that owns its child nodes outright. Each node carries its own transform,
//! a local bounding box used for picking, a palette colour and a transient
//! selection flag.

use cgmath::{vec3, Matrix4, Vector3};
use rand::Rng;

use super::transform::Transform;
use crate::config::{SCALE_DOWN_STEP, SCALE_UP_STEP};
use crate::error::Result;
use crate::gfx::picking::{Ray, AABB};
use crate::gfx::rendering::{FrameGuard, Primitive, Renderer};

pub const MIN_COLOR: usize = 0;
pub const MAX_COLOR: usize = 5;

/// Red, green, blue, yellow, magenta, cyan
pub const PALETTE: [[f32; 3]; MAX_COLOR + 1] = [
    [1.0, 0.0, 0.0],
    [0.0, 1.0, 0.0],
    [0.0, 0.0, 1.0],
    [1.0, 1.0, 0.0],
    [1.0, 0.0, 1.0],
    [0.0, 1.0, 1.0],
];

/// Emission applied while a node is selected
pub const SELECTION_EMISSION: [f32; 3] = [0.3, 0.3, 0.3];

/// What [`crate::gfx::scene::SceneGraph::place`] can create
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Sphere,
    Cube,
    Figure,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Primitive(Primitive),
    /// Composite drawn by drawing its children in its own frame
    Figure(Vec<Node>),
}

/// Where the last successful pick hit this node
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickHit {
    /// Distance along the pick ray
    pub distance: f32,
    /// Hit point in the pick ray's space
    pub point: Vector3<f32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    shape: Shape,
    color_index: usize,
    transform: Transform,
    aabb: AABB,
    selected: bool,
    pub(crate) hit: Option<PickHit>,
}

impl Node {
    /// Create a node of the given kind with a random palette colour
    pub fn new(kind: ShapeKind) -> Self {
        match kind {
            ShapeKind::Sphere => Self::sphere(),
            ShapeKind::Cube => Self::cube(),
            ShapeKind::Figure => Self::figure(),
        }
    }

    pub fn sphere() -> Self {
        Self::from_shape(Shape::Primitive(Primitive::Sphere), AABB::unit())
    }

    pub fn cube() -> Self {
        Self::from_shape(Shape::Primitive(Primitive::Cube), AABB::unit())
    }

    /// Three stacked spheres sharing the first palette colour.
    ///
    /// Picking treats the figure as one box around all three.
    pub fn figure() -> Self {
        let children = vec![
            figure_part(vec3(0.0, -0.6, 0.0), 1.0),
            figure_part(vec3(0.0, 0.1, 0.0), 0.8),
            figure_part(vec3(0.0, 0.75, 0.0), 0.7),
        ];
        let aabb = AABB::from_ordered(vec3(-0.5, -1.1, -0.5), vec3(0.5, 1.1, 0.5));
        Self::from_shape(Shape::Figure(children), aabb)
    }

    fn from_shape(shape: Shape, aabb: AABB) -> Self {
        Self {
            shape,
            color_index: rand::rng().random_range(MIN_COLOR..=MAX_COLOR),
            transform: Transform::new(),
            aabb,
            selected: false,
            hit: None,
        }
    }

    /// Builder-style colour override; wraps into the palette.
    pub fn with_color(mut self, color_index: usize) -> Self {
        self.set_color_index(color_index);
        self
    }

    /// Builder-style translation
    pub fn at(mut self, x: f32, y: f32, z: f32) -> Self {
        self.translate(x, y, z);
        self
    }

    pub fn kind(&self) -> ShapeKind {
        match self.shape {
            Shape::Primitive(Primitive::Sphere) => ShapeKind::Sphere,
            Shape::Primitive(Primitive::Cube) => ShapeKind::Cube,
            Shape::Figure(_) => ShapeKind::Figure,
        }
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Child nodes of a figure; empty for primitives
    pub fn children(&self) -> &[Node] {
        match &self.shape {
            Shape::Figure(children) => children,
            Shape::Primitive(_) => &[],
        }
    }

    pub fn color_index(&self) -> usize {
        self.color_index
    }

    pub fn set_color_index(&mut self, color_index: usize) {
        self.color_index = color_index % PALETTE.len();
    }

    pub fn color(&self) -> Vector3<f32> {
        PALETTE[self.color_index].into()
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn aabb(&self) -> &AABB {
        &self.aabb
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn pick_hit(&self) -> Option<PickHit> {
        self.hit
    }

    pub fn translate(&mut self, dx: f32, dy: f32, dz: f32) {
        self.transform.translate(dx, dy, dz);
    }

    /// Draw this node (and any children) inside its own frame.
    pub fn render<R: Renderer + ?Sized>(&self, renderer: &mut R) -> Result<()> {
        let mut frame = FrameGuard::push(renderer, self.transform.matrix());
        frame.set_color(self.color());
        if self.selected {
            frame.set_emission(SELECTION_EMISSION.into());
        }

        match &self.shape {
            Shape::Primitive(primitive) => frame.draw_primitive(*primitive)?,
            Shape::Figure(children) => {
                for child in children {
                    child.render(&mut *frame)?;
                }
            }
        }
        Ok(())
    }

    /// Test a ray against this node's box, with the node placed by
    /// `parent_to_world`.
    ///
    /// The box already has this node's scale folded in (see [`Node::scale_by`]),
    /// so only the translation is composed here. Composing the full `T * S`
    /// would apply the scale twice.
    pub fn pick(&self, ray: &Ray, parent_to_world: &Matrix4<f32>) -> Result<Option<f32>> {
        let node_to_world = *parent_to_world * self.transform.translation_matrix();
        self.aabb.intersect(ray, &node_to_world)
    }

    /// Set the selection flag, or toggle it when `select` is `None`.
    pub fn select(&mut self, select: Option<bool>) {
        self.selected = select.unwrap_or(!self.selected);
    }

    /// Step through the palette, wrapping at both ends.
    pub fn rotate_color(&mut self, forward: bool) {
        let len = PALETTE.len();
        self.color_index = if forward {
            (self.color_index + 1) % len
        } else {
            (self.color_index + len - 1) % len
        };
    }

    /// Grow by 10% or shrink by 10%.
    pub fn scale(&mut self, up: bool) {
        let factor = if up { SCALE_UP_STEP } else { SCALE_DOWN_STEP };
        self.transform.apply_scale(factor);
        self.aabb.apply_scale(factor);
    }

    /// Multiply `factor` into both the transform and the picking box.
    pub fn scale_by(&mut self, factor: f32) -> Result<()> {
        self.transform.scale(factor)?;
        self.aabb.apply_scale(factor);
        Ok(())
    }
}

fn figure_part(offset: Vector3<f32>, factor: f32) -> Node {
    let mut part = Node::sphere().with_color(MIN_COLOR);
    part.translate(offset.x, offset.y, offset.z);
    part.transform.apply_scale(factor);
    part.aabb.apply_scale(factor);
    part
}
