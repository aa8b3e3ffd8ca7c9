//! # Particle Sandbox
//!
//! Core of an interactive 2D particle and gravity sandbox: bodies spawned
//! from drag gestures, a fixed-step integrator with either a uniform
//! downward field or pairwise Newtonian attraction, impulse-based circle
//! collisions, bounded motion trails and a read-only render interface.

pub mod collision;
pub mod components;
pub mod error;
pub mod integrator;
pub mod render;
pub mod resources;
pub mod simulation;
pub mod spawn;

pub use components::{Body, BodyColor, Trail};
pub use error::SandboxError;
pub use integrator::{ForceModel, StepReport};
pub use render::{Canvas, Paint};
pub use resources::{Bounds, DisplaySettings, GravityPreset, PhysicsParams, SpawnSettings};
pub use simulation::Simulation;
