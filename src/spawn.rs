//! Turns drag gestures into new bodies.

use bevy::math::DVec2;
use rand::Rng;

use crate::components::{Body, BodyColor};
use crate::error::SandboxError;
use crate::integrator::{self, ForceModel};
use crate::resources::{DRAG_VELOCITY_FACTOR, MASS_SCALE, PhysicsParams, SpawnSettings};

/// Builds a body at `start`, launched along the drag towards `end`.
pub fn build_body<R: Rng + ?Sized>(
    model: ForceModel,
    settings: &SpawnSettings,
    start: DVec2,
    end: Option<DVec2>,
    rng: &mut R,
) -> Result<Body, SandboxError> {
    ensure_finite(start)?;
    if let Some(end) = end {
        ensure_finite(end)?;
    }

    let velocity = match (model, end) {
        (ForceModel::UniformField, Some(end)) => drag_velocity(model, settings, start, end),
        (ForceModel::UniformField, None) => {
            // Uniform in [-v/2, v/2) per axis.
            let x = rng.random::<f64>() - 0.5;
            let y = rng.random::<f64>() - 0.5;
            DVec2::new(x, y) * settings.velocity
        }
        (ForceModel::PairwiseGravity, Some(end)) => drag_velocity(model, settings, start, end),
        (ForceModel::PairwiseGravity, None) => return Err(SandboxError::MissingDragEnd),
    };

    let mass = body_mass(model, settings);
    let radius = model.radius_for_mass(mass);
    if !mass.is_finite() || !radius.is_finite() || radius <= 0.0 {
        return Err(SandboxError::InvalidMass { mass });
    }

    let color = BodyColor::from_hue(rng.random_range(0.0..360.0));
    Ok(Body::new(start, velocity, mass, radius, color))
}

/// Mass given to the next spawned body.
pub fn body_mass(model: ForceModel, settings: &SpawnSettings) -> f64 {
    match model {
        ForceModel::UniformField => settings.mass,
        ForceModel::PairwiseGravity => settings.mass * MASS_SCALE,
    }
}

/// Launch velocity for a drag from `start` to `end`.
pub fn drag_velocity(
    model: ForceModel,
    settings: &SpawnSettings,
    start: DVec2,
    end: DVec2,
) -> DVec2 {
    let drag = end - start;
    match model {
        ForceModel::UniformField => drag * DRAG_VELOCITY_FACTOR * settings.velocity / 5.0,
        ForceModel::PairwiseGravity => drag * DRAG_VELOCITY_FACTOR,
    }
}

/// Path a body released from this drag would follow, starting at `start`.
///
/// Other bodies attract the probe in the gravitational model but are not moved.
/// Collisions and walls are ignored.
pub fn predict_trajectory(
    model: ForceModel,
    settings: &SpawnSettings,
    params: &PhysicsParams,
    bodies: &[Body],
    start: DVec2,
    end: DVec2,
    steps: usize,
) -> Vec<DVec2> {
    let mut position = start;
    let mut velocity = drag_velocity(model, settings, start, end);
    let mut path = Vec::with_capacity(steps + 1);
    path.push(position);

    match model {
        ForceModel::UniformField => {
            let damping = 1.0 - params.air_resistance;
            for _ in 0..steps {
                velocity.y += params.gravity;
                velocity *= damping;
                position += velocity;
                path.push(position);
            }
        }
        ForceModel::PairwiseGravity => {
            let mass = body_mass(model, settings);
            let dt = model.time_step(params.time_scale);
            let mut probe = Body::new(position, velocity, mass, 0.0, BodyColor::from_hue(0.0));
            for _ in 0..steps {
                let force: DVec2 = bodies
                    .iter()
                    .map(|other| {
                        let (g, min_distance) = (params.g, params.min_distance);
                        integrator::gravitational_force(&probe, other, g, min_distance)
                    })
                    .sum();
                probe.velocity += force / mass * dt;
                probe.position += probe.velocity * dt;
                path.push(probe.position);
            }
        }
    }

    path
}

fn ensure_finite(point: DVec2) -> Result<(), SandboxError> {
    if point.is_finite() {
        Ok(())
    } else {
        Err(SandboxError::NonFinitePoint {
            x: point.x,
            y: point.y,
        })
    }
}
