use bevy::log::{debug, info, warn};
use bevy::math::DVec2;
use bevy::prelude::Resource;
use rand::{SeedableRng, rngs::StdRng};

use crate::components::{Body, Trail};
use crate::error::SandboxError;
use crate::integrator::{self, ForceModel, StepReport};
use crate::render::{self, Canvas};
use crate::resources::*;
use crate::spawn;

/// Offset of the drag end used by [`Simulation::spawn_at_center`].
const CENTER_SPAWN_DRAG: DVec2 = DVec2::new(100.0, 0.0);

/// The whole sandbox: bodies, tunables and display toggles.
///
/// Bodies are identified by their slot in [`Simulation::bodies`].
#[derive(Resource)]
pub struct Simulation {
    model: ForceModel,
    bodies: Vec<Body>,
    bounds: Bounds,
    paused: bool,
    pub params: PhysicsParams,
    pub spawn: SpawnSettings,
    display: DisplaySettings,
    preset: GravityPreset,
    rng: StdRng,
}

impl Simulation {
    pub fn new(model: ForceModel, bounds: Bounds) -> Self {
        Self::with_rng(model, bounds, StdRng::from_os_rng())
    }

    /// Same as [`Simulation::new`] with reproducible spawn randomness.
    pub fn with_seed(model: ForceModel, bounds: Bounds, seed: u64) -> Self {
        Self::with_rng(model, bounds, StdRng::seed_from_u64(seed))
    }

    fn with_rng(model: ForceModel, bounds: Bounds, rng: StdRng) -> Self {
        let spawn = match model {
            ForceModel::UniformField => SpawnSettings::default(),
            ForceModel::PairwiseGravity => SpawnSettings {
                mass: 5.0,
                ..SpawnSettings::default()
            },
        };
        Self {
            model,
            bodies: Vec::new(),
            bounds,
            paused: false,
            params: PhysicsParams::default(),
            spawn,
            display: DisplaySettings::default(),
            preset: GravityPreset::default(),
            rng,
        }
    }

    pub fn model(&self) -> ForceModel {
        self.model
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn trail(&self, index: usize) -> Option<&Trail> {
        self.bodies.get(index).map(Body::trail)
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn display(&self) -> &DisplaySettings {
        &self.display
    }

    pub fn gravity_preset(&self) -> GravityPreset {
        self.preset
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Adds a body at `start`, launched by the drag towards `end`. Returns its slot.
    pub fn spawn(&mut self, start: DVec2, end: Option<DVec2>) -> Result<usize, SandboxError> {
        let body = spawn::build_body(self.model, &self.spawn, start, end, &mut self.rng)
            .inspect_err(|err| warn!("spawn rejected: {err}"))?;
        debug!(
            "spawned body at ({:.1}, {:.1}) mass {:.3e} radius {:.2}",
            body.position.x,
            body.position.y,
            body.mass(),
            body.radius()
        );
        self.bodies.push(body);
        Ok(self.bodies.len() - 1)
    }

    /// Spawns at the centre of the surface with a short rightward drag.
    pub fn spawn_at_center(&mut self) -> Result<usize, SandboxError> {
        let center = self.bounds.center();
        self.spawn(center, Some(center + CENTER_SPAWN_DRAG))
    }

    /// Advances one step. Does nothing while paused.
    pub fn step(&mut self) -> StepReport {
        if self.paused {
            return StepReport::default();
        }
        integrator::step(
            self.model,
            &mut self.bodies,
            &self.params,
            self.bounds,
            self.display.show_trails,
        )
    }

    /// Steps, then draws the result onto `canvas`.
    pub fn tick(&mut self, canvas: &mut impl Canvas) -> StepReport {
        let report = self.step();
        render::render(self, canvas);
        report
    }

    /// Removes every body and, with them, every trail.
    pub fn reset(&mut self) {
        info!("reset: removing {} bodies", self.bodies.len());
        self.bodies.clear();
    }

    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        info!("simulation {}", if self.paused { "paused" } else { "resumed" });
        self.paused
    }

    pub fn set_mass(&mut self, mass: f64) {
        self.spawn.mass = mass;
    }

    pub fn set_velocity(&mut self, velocity: f64) {
        self.spawn.velocity = velocity;
    }

    pub fn set_gravity(&mut self, gravity: f64) {
        self.params.gravity = gravity;
    }

    pub fn set_bounce(&mut self, bounce: f64) {
        self.params.bounce = bounce;
    }

    pub fn set_time_scale(&mut self, time_scale: f64) {
        self.params.time_scale = time_scale;
    }

    pub fn set_air_resistance(&mut self, air_resistance: f64) {
        self.params.air_resistance = air_resistance;
    }

    /// Selects G by name: "strong", "weak", anything else means G₀.
    pub fn set_gravity_preset(&mut self, name: &str) -> GravityPreset {
        let preset = GravityPreset::from_name(name);
        if preset == GravityPreset::Normal && !name.trim().eq_ignore_ascii_case("normal") {
            warn!("unknown gravity preset {name:?}, using normal");
        }
        self.apply_gravity_preset(preset);
        preset
    }

    pub fn apply_gravity_preset(&mut self, preset: GravityPreset) {
        self.preset = preset;
        self.params.g = preset.constant();
        info!("gravity preset {} (G = {:e})", preset.name(), self.params.g);
    }

    /// Turning trails off discards the recorded history.
    pub fn set_show_trails(&mut self, show: bool) {
        self.display.show_trails = show;
        if !show {
            for body in &mut self.bodies {
                body.trail_mut().clear();
            }
        }
    }

    pub fn set_show_vectors(&mut self, show: bool) {
        self.display.show_vectors = show;
    }

    pub fn set_show_grid(&mut self, show: bool) {
        self.display.show_grid = show;
    }

    /// Follows the drawable surface size. Bodies are not moved until the next step.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.bounds = Bounds::new(width, height);
    }

    /// Path a body released from the drag `start → end` would take.
    pub fn predict_trajectory(&self, start: DVec2, end: DVec2, steps: usize) -> Vec<DVec2> {
        spawn::predict_trajectory(
            self.model,
            &self.spawn,
            &self.params,
            &self.bodies,
            start,
            end,
            steps,
        )
    }
}
