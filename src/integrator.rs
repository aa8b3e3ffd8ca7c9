//! Fixed-step explicit integration for both force models.

use bevy::log::debug;
use bevy::math::DVec2;

use crate::collision::{self, pair_mut};
use crate::components::Body;
use crate::resources::{Bounds, GRAVITY_DT, PhysicsParams};

/// How bodies are accelerated between collisions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ForceModel {
    /// Constant downward pull plus wall bounces, one frame per step.
    #[default]
    UniformField,
    /// Newtonian attraction between every pair, no walls.
    PairwiseGravity,
}

impl ForceModel {
    /// Radius derived from mass at spawn time.
    pub fn radius_for_mass(self, mass: f64) -> f64 {
        match self {
            ForceModel::UniformField => mass.sqrt() * 2.0,
            ForceModel::PairwiseGravity => mass.ln() * 0.5,
        }
    }

    /// Length of one step.
    pub fn time_step(self, time_scale: f64) -> f64 {
        match self {
            ForceModel::UniformField => 1.0,
            ForceModel::PairwiseGravity => GRAVITY_DT * time_scale,
        }
    }
}

/// Outcome of a single step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StepReport {
    /// Number of pairs that received an impulse.
    pub collisions: usize,
}

/// Advances every body by one step of `model`.
pub fn step(
    model: ForceModel,
    bodies: &mut [Body],
    params: &PhysicsParams,
    bounds: Bounds,
    record_trails: bool,
) -> StepReport {
    let report = match model {
        ForceModel::UniformField => step_uniform(bodies, params, bounds, record_trails),
        ForceModel::PairwiseGravity => step_pairwise(bodies, params, record_trails),
    };
    if report.collisions > 0 {
        debug!("resolved {} collisions", report.collisions);
    }
    report
}

fn step_uniform(
    bodies: &mut [Body],
    params: &PhysicsParams,
    bounds: Bounds,
    record_trails: bool,
) -> StepReport {
    let mut report = StepReport::default();

    for i in 0..bodies.len() {
        for j in (i + 1)..bodies.len() {
            let (a, b) = pair_mut(bodies, i, j);
            if let Some(contact) = collision::detect(a, b, params.min_distance)
                && collision::resolve(a, b, &contact, params.bounce, true)
            {
                report.collisions += 1;
            }
        }
    }

    let damping = 1.0 - params.air_resistance;
    for body in bodies.iter_mut() {
        body.velocity.y += params.gravity;
        body.velocity *= damping;
        body.position += body.velocity;

        if record_trails {
            let position = body.position;
            body.trail_mut().push(position);
        }

        bounce_off_walls(body, bounds, params.bounce);
    }

    report
}

fn step_pairwise(bodies: &mut [Body], params: &PhysicsParams, record_trails: bool) -> StepReport {
    let mut report = StepReport::default();
    let dt = ForceModel::PairwiseGravity.time_step(params.time_scale);

    for i in 0..bodies.len() {
        for j in (i + 1)..bodies.len() {
            let (a, b) = pair_mut(bodies, i, j);

            if let Some(contact) = collision::detect(a, b, params.min_distance) {
                // Velocities only: the next position update separates the pair.
                if collision::resolve(a, b, &contact, params.restitution, false) {
                    report.collisions += 1;
                }
                continue;
            }

            let force = gravitational_force(a, b, params.g, params.min_distance);
            a.velocity += force / a.mass() * dt;
            b.velocity -= force / b.mass() * dt;
        }
    }

    for body in bodies.iter_mut() {
        body.position += body.velocity * dt;
        if record_trails {
            let position = body.position;
            body.trail_mut().push(position);
        }
    }

    report
}

/// Force exerted on `a` by `b`. The force on `b` is its negation.
pub fn gravitational_force(a: &Body, b: &Body, g: f64, min_distance: f64) -> DVec2 {
    let delta = b.position - a.position;
    let distance = delta.length().max(min_distance);
    let magnitude = g * a.mass() * b.mass() / (distance * distance);
    let angle = delta.y.atan2(delta.x);
    DVec2::from_angle(angle) * magnitude
}

/// Clamps `body` inside `bounds`, reflecting and damping the crossing axis.
pub fn bounce_off_walls(body: &mut Body, bounds: Bounds, bounce: f64) {
    let radius = body.radius();

    if body.position.x - radius < 0.0 {
        body.position.x = radius;
        body.velocity.x = body.velocity.x.abs() * bounce;
    } else if body.position.x + radius > bounds.width {
        body.position.x = bounds.width - radius;
        body.velocity.x = -body.velocity.x.abs() * bounce;
    }

    if body.position.y - radius < 0.0 {
        body.position.y = radius;
        body.velocity.y = body.velocity.y.abs() * bounce;
    } else if body.position.y + radius > bounds.height {
        body.position.y = bounds.height - radius;
        body.velocity.y = -body.velocity.y.abs() * bounce;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::BodyColor;
    use crate::resources::{G0, TRAIL_LENGTH};

    fn body(position: DVec2, velocity: DVec2, mass: f64, radius: f64) -> Body {
        Body::new(position, velocity, mass, radius, BodyColor::from_hue(0.0))
    }

    fn weightless() -> PhysicsParams {
        PhysicsParams {
            gravity: 0.0,
            ..PhysicsParams::default()
        }
    }

    #[test]
    fn radius_follows_model() {
        assert!((ForceModel::UniformField.radius_for_mass(16.0) - 8.0).abs() < 1e-12);
        let expected = (5e24_f64).ln() * 0.5;
        assert!((ForceModel::PairwiseGravity.radius_for_mass(5e24) - expected).abs() < 1e-12);
    }

    #[test]
    fn time_step_scales_only_for_gravity() {
        assert_eq!(ForceModel::UniformField.time_step(3.0), 1.0);
        assert!((ForceModel::PairwiseGravity.time_step(2.0) - 0.032).abs() < 1e-12);
    }

    #[test]
    fn uniform_field_accelerates_downward() {
        let mut bodies = vec![body(DVec2::new(500.0, 100.0), DVec2::ZERO, 10.0, 2.0)];
        let params = PhysicsParams::default();

        step(ForceModel::UniformField, &mut bodies, &params, Bounds::default(), false);

        assert!((bodies[0].velocity.y - params.gravity).abs() < 1e-12);
        assert!((bodies[0].position.y - (100.0 + params.gravity)).abs() < 1e-12);
        assert_eq!(bodies[0].position.x, 500.0);
    }

    #[test]
    fn left_wall_clamps_and_reflects() {
        let radius = 4.0;
        let epsilon = 0.5;
        let vx = -3.0;
        let mut bodies = vec![body(
            DVec2::new(radius - epsilon, 500.0),
            DVec2::new(vx, 0.0),
            4.0,
            radius,
        )];
        let params = weightless();

        step(ForceModel::UniformField, &mut bodies, &params, Bounds::default(), false);

        assert_eq!(bodies[0].position.x, radius);
        assert!((bodies[0].velocity.x - vx.abs() * params.bounce).abs() < 1e-12);
    }

    #[test]
    fn floor_reflects_with_energy_loss() {
        let bounds = Bounds::new(200.0, 200.0);
        let mut bodies = vec![body(DVec2::new(100.0, 195.0), DVec2::new(0.0, 10.0), 1.0, 2.0)];
        let params = weightless();

        step(ForceModel::UniformField, &mut bodies, &params, bounds, false);

        assert_eq!(bodies[0].position.y, 198.0);
        assert!((bodies[0].velocity.y + 8.0).abs() < 1e-12);
    }

    #[test]
    fn air_resistance_damps_velocity() {
        let mut bodies = vec![body(DVec2::new(500.0, 500.0), DVec2::new(10.0, 0.0), 1.0, 1.0)];
        let params = PhysicsParams {
            air_resistance: 0.1,
            ..weightless()
        };

        step(ForceModel::UniformField, &mut bodies, &params, Bounds::default(), false);

        assert!((bodies[0].velocity.x - 9.0).abs() < 1e-12);
    }

    #[test]
    fn uniform_collision_conserves_momentum() {
        let mut bodies = vec![
            body(DVec2::new(500.0, 500.0), DVec2::new(2.0, 0.0), 4.0, 4.0),
            body(DVec2::new(506.0, 500.0), DVec2::new(-1.0, 0.5), 9.0, 6.0),
        ];
        let before: DVec2 = bodies.iter().map(Body::momentum).sum();

        let report = step(
            ForceModel::UniformField,
            &mut bodies,
            &weightless(),
            Bounds::default(),
            false,
        );

        let after: DVec2 = bodies.iter().map(Body::momentum).sum();
        assert_eq!(report.collisions, 1);
        assert!((after - before).length() < 1e-9);
    }

    #[test]
    fn pairwise_bodies_accelerate_towards_each_other() {
        let a_start = DVec2::new(0.0, 0.0);
        let b_start = DVec2::new(100.0, 0.0);
        let mass = 5e24;
        let radius = ForceModel::PairwiseGravity.radius_for_mass(mass);
        let mut bodies = vec![
            body(a_start, DVec2::ZERO, mass, radius),
            body(b_start, DVec2::ZERO, mass, radius),
        ];
        let params = PhysicsParams {
            g: G0,
            ..PhysicsParams::default()
        };

        let report = step(
            ForceModel::PairwiseGravity,
            &mut bodies,
            &params,
            Bounds::default(),
            false,
        );

        assert_eq!(report.collisions, 0);
        let towards_b = (b_start - a_start).normalize();
        assert!(bodies[0].velocity.dot(towards_b) > 0.0);
        assert!(bodies[1].velocity.dot(-towards_b) > 0.0);
        assert!(bodies[0].velocity.y.abs() < 1e-6 * bodies[0].velocity.x.abs());
    }

    #[test]
    fn pairwise_velocity_change_matches_newton() {
        let mass_a = 2e24;
        let mass_b = 6e24;
        let mut bodies = vec![
            body(DVec2::ZERO, DVec2::ZERO, mass_a, 1.0),
            body(DVec2::new(0.0, 200.0), DVec2::ZERO, mass_b, 1.0),
        ];
        let params = PhysicsParams::default();
        let dt = ForceModel::PairwiseGravity.time_step(params.time_scale);

        step(ForceModel::PairwiseGravity, &mut bodies, &params, Bounds::default(), false);

        let force = G0 * mass_a * mass_b / (200.0 * 200.0);
        let expected_a = force / mass_a * dt;
        let relative = (bodies[0].velocity.y - expected_a).abs() / expected_a;
        assert!(relative < 1e-9);
        assert!((bodies[0].position.y - expected_a * dt).abs() / (expected_a * dt) < 1e-9);
    }

    #[test]
    fn separated_bodies_are_never_resolved() {
        let mut bodies = vec![
            body(DVec2::new(100.0, 100.0), DVec2::new(1.0, 0.0), 1.0, 2.0),
            body(DVec2::new(300.0, 100.0), DVec2::new(-1.0, 0.0), 1.0, 2.0),
        ];
        let params = weightless();

        for _ in 0..10 {
            let report = step(
                ForceModel::UniformField,
                &mut bodies,
                &params,
                Bounds::default(),
                false,
            );
            assert_eq!(report.collisions, 0);
        }
        assert_eq!(bodies[0].velocity, DVec2::new(1.0, 0.0));
        assert_eq!(bodies[1].velocity, DVec2::new(-1.0, 0.0));
    }

    #[test]
    fn overlapping_gravity_pair_gets_no_force() {
        let mut bodies = vec![
            body(DVec2::new(0.0, 0.0), DVec2::new(-1.0, 0.0), 5e24, 10.0),
            body(DVec2::new(15.0, 0.0), DVec2::new(1.0, 0.0), 5e24, 10.0),
        ];

        let report = step(
            ForceModel::PairwiseGravity,
            &mut bodies,
            &PhysicsParams::default(),
            Bounds::default(),
            false,
        );

        // Separating pair: resolver declines, and the attraction is skipped too.
        assert_eq!(report.collisions, 0);
        assert_eq!(bodies[0].velocity, DVec2::new(-1.0, 0.0));
        assert_eq!(bodies[1].velocity, DVec2::new(1.0, 0.0));
    }

    #[test]
    fn gravity_contact_uses_fixed_restitution_without_push() {
        let mut bodies = vec![
            body(DVec2::new(0.0, 0.0), DVec2::new(1.0, 0.0), 5e24, 10.0),
            body(DVec2::new(15.0, 0.0), DVec2::new(-1.0, 0.0), 5e24, 10.0),
        ];
        let params = PhysicsParams {
            bounce: 0.1,
            ..PhysicsParams::default()
        };
        let dt = ForceModel::PairwiseGravity.time_step(params.time_scale);

        let report = step(
            ForceModel::PairwiseGravity,
            &mut bodies,
            &params,
            Bounds::default(),
            false,
        );

        assert_eq!(report.collisions, 1);
        assert!((bodies[0].velocity.x + 0.8).abs() < 1e-12);
        assert!((bodies[1].velocity.x - 0.8).abs() < 1e-12);
        // Only the position update moves them; no overlap correction.
        assert!((bodies[0].position.x - (0.0 - 0.8 * dt)).abs() < 1e-12);
        assert!((bodies[1].position.x - (15.0 + 0.8 * dt)).abs() < 1e-12);
        assert_eq!(bodies[0].position.y, 0.0);
    }

    #[test]
    fn uniform_contact_uses_bounce_coefficient() {
        let mut bodies = vec![
            body(DVec2::new(500.0, 500.0), DVec2::new(2.0, 0.0), 4.0, 4.0),
            body(DVec2::new(506.0, 500.0), DVec2::new(-1.0, 0.0), 9.0, 6.0),
        ];
        let params = PhysicsParams {
            bounce: 0.3,
            restitution: 0.8,
            ..weightless()
        };
        let closing = bodies[0].velocity.x - bodies[1].velocity.x;

        let report = step(
            ForceModel::UniformField,
            &mut bodies,
            &params,
            Bounds::default(),
            false,
        );

        assert_eq!(report.collisions, 1);
        let separating = bodies[1].velocity.x - bodies[0].velocity.x;
        assert!((separating - 0.3 * closing).abs() < 1e-12);
        // Overlap of 4 split evenly, then one step of motion.
        let expected_a = 500.0 - 2.0 + bodies[0].velocity.x;
        let expected_b = 506.0 + 2.0 + bodies[1].velocity.x;
        assert!((bodies[0].position.x - expected_a).abs() < 1e-9);
        assert!((bodies[1].position.x - expected_b).abs() < 1e-9);
    }

    #[test]
    fn gravitational_force_survives_coincident_centres() {
        let a = body(DVec2::splat(5.0), DVec2::ZERO, 1.0, 0.0);
        let b = body(DVec2::splat(5.0), DVec2::ZERO, 1.0, 0.0);
        let force = gravitational_force(&a, &b, G0, 1e-6);
        assert!(force.is_finite());
    }

    #[test]
    fn trails_stay_bounded() {
        let mut bodies = vec![body(DVec2::new(500.0, 10.0), DVec2::new(3.0, 0.0), 1.0, 2.0)];
        let params = PhysicsParams::default();

        for _ in 0..(TRAIL_LENGTH * 3) {
            step(ForceModel::UniformField, &mut bodies, &params, Bounds::default(), true);
            assert!(bodies[0].trail().len() <= TRAIL_LENGTH);
        }
        assert_eq!(bodies[0].trail().len(), TRAIL_LENGTH);
    }
}
