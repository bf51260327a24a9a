//! # Viewer State
//!
//! Everything the windowing layer needs to drive the modeller, scoped to one
//! value instead of process-wide globals: the scene graph, the camera with
//! its trackball, the ray caster and the input mapper. Input arrives as
//! [`Command`]s and is applied here, on the thread that renders. The viewer
//! owns its [`Interaction`] so a resize reaches every consumer of the window
//! size at once.

use log::warn;

use crate::config::ViewerConfig;
use crate::error::{Error, Result};
use crate::gfx::{
    camera::{Camera, Projection},
    picking::RayCaster,
    rendering::{DrawList, Renderer},
    scene::SceneGraph,
};
use crate::interaction::{Command, Interaction};

pub struct ViewerState {
    config: ViewerConfig,
    scene: SceneGraph,
    camera: Camera,
    projection: Projection,
    ray_caster: RayCaster,
    interaction: Interaction,
}

impl ViewerState {
    /// Create a viewer over the startup sample scene
    pub fn new(config: ViewerConfig) -> Result<Self> {
        Self::with_scene(config, SceneGraph::sample())
    }

    pub fn with_scene(config: ViewerConfig, scene: SceneGraph) -> Result<Self> {
        let projection = Projection::from_config(&config);
        let ray_caster =
            RayCaster::new(projection.matrix(), config.viewport_width, config.viewport_height)?;
        let camera = Camera::from_config(&config);
        let interaction = Interaction::new(&config);

        Ok(Self {
            config,
            scene,
            camera,
            projection,
            ray_caster,
            interaction,
        })
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn scene(&self) -> &SceneGraph {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut SceneGraph {
        &mut self.scene
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    pub fn interaction(&self) -> &Interaction {
        &self.interaction
    }

    /// Window input goes here; queued commands run on [`ViewerState::apply_pending`]
    pub fn interaction_mut(&mut self) -> &mut Interaction {
        &mut self.interaction
    }

    pub fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        self.config.viewport_width = width;
        self.config.viewport_height = height;
        self.projection.resize(width, height);
        self.ray_caster.set_projection(self.projection.matrix())?;
        self.ray_caster.set_viewport(width, height);
        self.camera.trackball.resize(width, height);
        self.interaction.resize(width, height);
        Ok(())
    }

    /// Apply one command. At most one scene mutation happens per call.
    pub fn apply(&mut self, command: Command) -> Result<()> {
        match command {
            Command::Pick { x, y } => {
                let ray = self.ray_caster.eye_ray(x, y)?;
                self.scene
                    .pick(ray.origin, ray.direction, &self.camera.modelview())?;
            }
            Command::Move { x, y } => {
                let ray = self.ray_caster.eye_ray(x, y)?;
                let inverse = self.camera.inverse_modelview()?;
                self.scene.move_selected(ray.origin, ray.direction, &inverse)?;
            }
            Command::Place { kind, x, y } => {
                let ray = self.ray_caster.eye_ray(x, y)?;
                let inverse = self.camera.inverse_modelview()?;
                self.scene.place_at_depth(
                    kind,
                    ray.origin,
                    ray.direction,
                    &inverse,
                    self.config.place_depth,
                )?;
            }
            Command::RotateColor { forward } => self.scene.rotate_selected_color(forward),
            Command::Scale { up } => {
                let factor = if up {
                    self.config.scale_up
                } else {
                    self.config.scale_down
                };
                self.scene.scale_selected_by(factor)?;
            }
            Command::BeginRotate { x, y } => self.camera.trackball.begin_drag(x, y),
            Command::Rotate { x, y, dx, dy } => self.camera.trackball.drag_to(x, y, dx, dy),
            Command::EndRotate => self.camera.trackball.end_drag(),
            Command::TranslateCamera { dx, dy, dz } => self.camera.translate(dx, dy, dz),
        }
        Ok(())
    }

    /// Apply commands in order. A failing command is logged and skipped; the
    /// failures are returned for the caller to act on.
    pub fn apply_all<I>(&mut self, commands: I) -> Vec<Error>
    where
        I: IntoIterator<Item = Command>,
    {
        let mut failures = Vec::new();
        for command in commands {
            if let Err(err) = self.apply(command) {
                warn!("Viewer: {command:?} failed: {err}");
                failures.push(err);
            }
        }
        failures
    }

    /// Drain the input queue and apply it, as [`ViewerState::apply_all`]
    pub fn apply_pending(&mut self) -> Vec<Error> {
        let commands = self.interaction.drain();
        self.apply_all(commands)
    }

    /// Render the scene; `renderer` should already hold the camera modelview
    pub fn render<R: Renderer + ?Sized>(&self, renderer: &mut R) -> Result<()> {
        self.scene.render(renderer).inspect_err(|err| {
            warn!("Viewer: frame abandoned: {err}");
        })
    }

    /// Render into a fresh [`DrawList`] based at the camera modelview
    pub fn draw_list(&self) -> Result<DrawList> {
        let mut list = DrawList::with_base(self.camera.modelview());
        self.render(&mut list)?;
        Ok(list)
    }
}
