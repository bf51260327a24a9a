//! End-to-end scenarios across the scene graph, picking and rendering.

use cgmath::{vec3, InnerSpace, Matrix4, SquareMatrix, Vector3, Zero};

use crate::error::Error;
use crate::gfx::picking::Ray;
use crate::gfx::rendering::{DrawList, Primitive, Renderer};
use crate::gfx::scene::node::MIN_COLOR;
use crate::gfx::scene::{Node, SceneGraph, ShapeKind};

fn identity() -> Matrix4<f32> {
    Matrix4::identity()
}

fn two_node_scene() -> SceneGraph {
    let mut scene = SceneGraph::new();
    scene.add_node(Node::cube().with_color(2).at(2.0, 0.0, 2.0));
    scene.add_node(Node::sphere().with_color(3).at(-2.0, 0.0, 2.0));
    scene
}

#[test]
fn test_pick_then_switch_selection() {
    let mut scene = two_node_scene();

    let picked = scene
        .pick(vec3(2.0, 0.0, 10.0), vec3(0.0, 0.0, -1.0), &identity())
        .unwrap();
    assert_eq!(picked, Some(0));
    let hit = scene.selected_node().unwrap().pick_hit().unwrap();
    assert!((hit.distance - 8.0).abs() <= 0.5, "hit at {}", hit.distance);
    assert!(scene.nodes()[0].is_selected());

    let picked = scene
        .pick(vec3(-2.0, 0.0, 10.0), vec3(0.0, 0.0, -1.0), &identity())
        .unwrap();
    assert_eq!(picked, Some(1));
    assert!(!scene.nodes()[0].is_selected());
    assert!(scene.nodes()[1].is_selected());
}

#[test]
fn test_place_figure_along_ray() {
    let mut scene = SceneGraph::new();
    let index = scene
        .place_at_depth(
            ShapeKind::Figure,
            vec3(0.0, 0.0, 10.0),
            vec3(0.0, 0.0, -1.0),
            &identity(),
            15.0,
        )
        .unwrap();

    let figure = &scene.nodes()[index];
    assert_eq!(figure.kind(), ShapeKind::Figure);
    assert_eq!(figure.transform().translation(), vec3(0.0, 0.0, -5.0));

    let expected = [(-0.6, 1.0), (0.1, 0.8), (0.75, 0.7)];
    assert_eq!(figure.children().len(), expected.len());
    for (child, (y, scale)) in figure.children().iter().zip(expected) {
        assert_eq!(child.transform().translation(), vec3(0.0, y, 0.0));
        assert!((child.transform().scale_factors().y - scale).abs() < 1e-6);
        assert_eq!(child.color_index(), MIN_COLOR);
    }
}

#[test]
fn test_selection_is_exclusive_across_many_picks() {
    let mut scene = SceneGraph::sample();
    scene.add_node(Node::cube().at(0.0, 3.0, 0.0));

    let targets = [
        vec3(2.0, 0.0, 2.0),
        vec3(-2.0, 0.0, 2.0),
        vec3(-2.0, 0.0, -2.0),
        vec3(0.0, 3.0, 0.0),
        vec3(9.0, 9.0, 9.0),
    ];
    for target in targets {
        let origin = target + vec3(0.0, 0.0, 20.0);
        scene.pick(origin, vec3(0.0, 0.0, -1.0), &identity()).unwrap();

        let flagged: Vec<_> = scene
            .nodes()
            .iter()
            .enumerate()
            .filter(|(_, n)| n.is_selected())
            .map(|(i, _)| i)
            .collect();
        assert!(flagged.len() <= 1);
        assert_eq!(flagged.first().copied(), scene.selected_index());
    }
}

#[test]
fn test_nearest_pick_is_insertion_order_independent_except_ties() {
    let near = Node::sphere().with_color(1).at(0.0, 0.0, 1.0);
    let far = Node::sphere().with_color(4).at(0.0, 0.0, -1.0);

    let mut forward = SceneGraph::new();
    forward.add_node(near.clone());
    forward.add_node(far.clone());

    let mut backward = SceneGraph::new();
    backward.add_node(far);
    backward.add_node(near);

    for scene in [&mut forward, &mut backward] {
        scene
            .pick(vec3(0.0, 0.0, 10.0), vec3(0.0, 0.0, -1.0), &identity())
            .unwrap();
        assert_eq!(scene.selected_node().unwrap().color_index(), 1);
    }
}

#[test]
fn test_color_rotation_round_trips() {
    let mut scene = two_node_scene();
    scene
        .pick(vec3(2.0, 0.0, 10.0), vec3(0.0, 0.0, -1.0), &identity())
        .unwrap();

    for _ in 0..4 {
        scene.rotate_selected_color(true);
    }
    assert_eq!(scene.nodes()[0].color_index(), 0);
    for _ in 0..4 {
        scene.rotate_selected_color(false);
    }
    assert_eq!(scene.nodes()[0].color_index(), 2);
}

#[test]
fn test_repeated_scaling_matches_single_scale() {
    let mut stepped = two_node_scene();
    let mut direct = two_node_scene();
    for scene in [&mut stepped, &mut direct] {
        scene
            .pick(vec3(-2.0, 0.0, 10.0), vec3(0.0, 0.0, -1.0), &identity())
            .unwrap();
    }

    for _ in 0..3 {
        stepped.scale_selected(true);
    }
    stepped.scale_selected(false);
    direct.scale_selected_by(1.1 * 1.1 * 1.1 * 0.9).unwrap();

    let a = stepped.nodes()[1].transform().scale_factors();
    let b = direct.nodes()[1].transform().scale_factors();
    assert!((a - b).magnitude2() < 1e-10);

    // The grown box is what picking sees
    let half = stepped.nodes()[1].aabb().half_extents();
    assert!((half.x - 0.5 * a.x).abs() < 1e-5);
}

#[test]
fn test_scaled_node_is_picked_at_its_new_surface() {
    let mut scene = two_node_scene();
    scene
        .pick(vec3(2.0, 0.0, 10.0), vec3(0.0, 0.0, -1.0), &identity())
        .unwrap();
    scene.scale_selected_by(2.0).unwrap();

    // Off the original box, inside the scaled one
    scene
        .pick(vec3(2.8, 0.0, 10.0), vec3(0.0, 0.0, -1.0), &identity())
        .unwrap();
    let hit = scene.selected_node().unwrap().pick_hit().unwrap();
    assert!((hit.distance - 7.0).abs() < 1e-4);
}

#[test]
fn test_render_leaves_renderer_balanced() {
    let mut scene = SceneGraph::sample();
    scene
        .pick(vec3(-2.0, 0.0, 10.0), vec3(0.0, 0.0, -5.0), &identity())
        .unwrap();

    let mut list = DrawList::with_base(Matrix4::from_translation(vec3(0.0, 0.0, -15.0)));
    scene.render(&mut list).unwrap();

    assert_eq!(list.depth(), 0);
    assert_eq!(list.emission(), Vector3::zero());

    // Only the selected sphere glows
    let glowing: Vec<_> = list
        .calls()
        .iter()
        .filter(|c| c.instance.emission[0] > 0.0)
        .map(|c| c.primitive)
        .collect();
    assert_eq!(glowing, vec![Primitive::Sphere]);
    assert_eq!(list.calls()[1].instance.translation(), vec3(-2.0, 0.0, -13.0));
}

#[test]
fn test_failing_renderer_does_not_corrupt_state() {
    struct RejectCubes(DrawList);

    impl Renderer for RejectCubes {
        fn push_frame(&mut self, local: Matrix4<f32>) {
            self.0.push_frame(local);
        }
        fn pop_frame(&mut self) {
            self.0.pop_frame();
        }
        fn set_color(&mut self, color: Vector3<f32>) {
            self.0.set_color(color);
        }
        fn set_emission(&mut self, emission: Vector3<f32>) {
            self.0.set_emission(emission);
        }
        fn draw_primitive(&mut self, primitive: Primitive) -> crate::error::Result<()> {
            if primitive == Primitive::Cube {
                return Err(Error::Render("no cube list".into()));
            }
            self.0.draw_primitive(primitive)
        }
    }

    let mut scene = SceneGraph::sample();
    scene
        .pick(vec3(2.0, 0.0, 10.0), vec3(0.0, 0.0, -1.0), &identity())
        .unwrap();

    let mut renderer = RejectCubes(DrawList::new());
    let result = scene.render(&mut renderer);
    assert!(matches!(result, Err(Error::Render(_))));
    assert_eq!(renderer.0.depth(), 0);
    assert_eq!(renderer.0.emission(), Vector3::zero());
}

#[test]
fn test_ray_normalization_does_not_change_hits() {
    let scene = two_node_scene();
    let short = Ray::new(vec3(2.0, 0.0, 10.0), vec3(0.0, 0.0, -0.01)).unwrap();
    let long = Ray::new(vec3(2.0, 0.0, 10.0), vec3(0.0, 0.0, -100.0)).unwrap();

    let node = &scene.nodes()[0];
    assert_eq!(
        node.pick(&short, &identity()).unwrap(),
        node.pick(&long, &identity()).unwrap()
    );
}
