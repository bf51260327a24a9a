//! # Scene Graph
//!
//! An ordered list of root nodes plus the current selection. Insertion order
//! is render order, and it also decides ties when two nodes are hit at the
//! same distance: the node added first wins.

use cgmath::{Matrix4, Vector3};
use log::{debug, info};

use super::node::{Node, PickHit, ShapeKind};
use crate::config::PLACE_DEPTH;
use crate::error::{Error, Result};
use crate::gfx::math::{is_finite, transform_point, transform_vector};
use crate::gfx::picking::Ray;
use crate::gfx::rendering::Renderer;

/// Main scene containing the placed nodes and the selection
#[derive(Debug, Clone, Default)]
pub struct SceneGraph {
    nodes: Vec<Node>,
    /// Index into `nodes`, never an owner
    selected: Option<usize>,
}

impl SceneGraph {
    /// Creates an empty scene
    pub fn new() -> Self {
        Self::default()
    }

    /// The startup scene: a blue cube, a yellow sphere and a figure
    pub fn sample() -> Self {
        let mut scene = Self::new();
        scene.add_node(Node::cube().with_color(2).at(2.0, 0.0, 2.0));
        scene.add_node(Node::sphere().with_color(3).at(-2.0, 0.0, 2.0));
        scene.add_node(Node::figure().at(-2.0, 0.0, -2.0));
        scene
    }

    /// Append a root node and return its index. Incoming selection state is
    /// cleared; only [`SceneGraph::pick`] selects.
    pub fn add_node(&mut self, mut node: Node) -> usize {
        node.select(Some(false));
        node.hit = None;
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    /// Remove and return a root node; later nodes shift down by one.
    pub fn remove_node(&mut self, index: usize) -> Option<Node> {
        if index >= self.nodes.len() {
            return None;
        }

        self.selected = match self.selected {
            Some(selected) if selected == index => None,
            Some(selected) if selected > index => Some(selected - 1),
            other => other,
        };

        let mut node = self.nodes.remove(index);
        node.select(Some(false));
        node.hit = None;
        info!("Removed {:?} node at index {}", node.kind(), index);
        Some(node)
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node(&self, index: usize) -> Option<&Node> {
        self.nodes.get(index)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_node(&self) -> Option<&Node> {
        self.selected.and_then(|index| self.nodes.get(index))
    }

    fn selected_node_mut(&mut self) -> Option<&mut Node> {
        self.selected.and_then(|index| self.nodes.get_mut(index))
    }

    pub fn clear_selection(&mut self) {
        if let Some(node) = self.selected_node_mut() {
            node.select(Some(false));
            node.hit = None;
        }
        self.selected = None;
    }

    /// Render every root node in insertion order
    pub fn render<R: Renderer + ?Sized>(&self, renderer: &mut R) -> Result<()> {
        for node in &self.nodes {
            node.render(renderer)?;
        }
        Ok(())
    }

    /// Select the closest node hit by the ray, replacing any previous selection.
    ///
    /// `camera_to_world` places the scene in the ray's space. All
    /// intersections are computed before anything is mutated, so an error
    /// leaves the selection untouched.
    pub fn pick(
        &mut self,
        origin: Vector3<f32>,
        direction: Vector3<f32>,
        camera_to_world: &Matrix4<f32>,
    ) -> Result<Option<usize>> {
        let ray = Ray::new(origin, direction)?;

        let mut closest: Option<(usize, f32)> = None;
        for (index, node) in self.nodes.iter().enumerate() {
            if let Some(distance) = node.pick(&ray, camera_to_world)? {
                // Strict comparison keeps the earliest node on ties
                if closest.map_or(true, |(_, best)| distance < best) {
                    closest = Some((index, distance));
                }
            }
        }

        self.clear_selection();

        if let Some((index, distance)) = closest {
            let node = &mut self.nodes[index];
            node.select(Some(true));
            node.hit = Some(PickHit {
                distance,
                point: ray.point_at(distance),
            });
            self.selected = Some(index);
            info!(
                "Selected {:?} node {} at distance {:.3}",
                node.kind(),
                index,
                distance
            );
        } else {
            debug!("Pick missed every node");
        }

        Ok(self.selected)
    }

    /// Drag the selected node so it stays under the ray at its picked depth.
    pub fn move_selected(
        &mut self,
        origin: Vector3<f32>,
        direction: Vector3<f32>,
        inverse_camera: &Matrix4<f32>,
    ) -> Result<()> {
        let Some(node) = self.selected_node_mut() else {
            return Ok(());
        };
        let Some(hit) = node.hit else {
            return Ok(());
        };

        let ray = Ray::new(origin, direction)?;
        let new_point = ray.point_at(hit.distance);
        let delta = transform_vector(inverse_camera, new_point - hit.point);
        if !is_finite(delta) {
            return Err(Error::SingularTransform);
        }

        node.translate(delta.x, delta.y, delta.z);
        node.hit = Some(PickHit {
            distance: hit.distance,
            point: new_point,
        });
        Ok(())
    }

    pub fn rotate_selected_color(&mut self, forward: bool) {
        if let Some(node) = self.selected_node_mut() {
            node.rotate_color(forward);
        }
    }

    pub fn scale_selected(&mut self, up: bool) {
        if let Some(node) = self.selected_node_mut() {
            node.scale(up);
        }
    }

    /// Scale the selection by an arbitrary positive factor; no-op when empty.
    pub fn scale_selected_by(&mut self, factor: f32) -> Result<()> {
        match self.selected_node_mut() {
            Some(node) => node.scale_by(factor),
            None => Ok(()),
        }
    }

    /// Create a node of `kind` at [`PLACE_DEPTH`] along the ray.
    pub fn place(
        &mut self,
        kind: ShapeKind,
        origin: Vector3<f32>,
        direction: Vector3<f32>,
        inverse_camera: &Matrix4<f32>,
    ) -> Result<usize> {
        self.place_at_depth(kind, origin, direction, inverse_camera, PLACE_DEPTH)
    }

    /// Create a node of `kind` `depth` units along the ray. The ray is in
    /// camera space; `inverse_camera` brings the point into the world.
    /// The new node is not selected. A non-finite depth or landing point is
    /// rejected and nothing is added.
    pub fn place_at_depth(
        &mut self,
        kind: ShapeKind,
        origin: Vector3<f32>,
        direction: Vector3<f32>,
        inverse_camera: &Matrix4<f32>,
        depth: f32,
    ) -> Result<usize> {
        if !depth.is_finite() {
            return Err(Error::DegenerateRay);
        }
        let ray = Ray::new(origin, direction)?;
        let position = transform_point(inverse_camera, ray.point_at(depth));
        if !is_finite(position) {
            return Err(Error::DegenerateRay);
        }

        let node = Node::new(kind).at(position.x, position.y, position.z);
        let index = self.add_node(node);
        info!("Placed {:?} at {:?}", kind, position);
        Ok(index)
    }
}
