//! Read-only drawing of the simulation onto a host surface.
//!
//! The host implements [`Canvas`] and maps each [`Paint`] to its own colours.
//! Nothing here mutates the simulation.

use bevy::math::DVec2;

use crate::components::BodyColor;
use crate::resources::{GRID_SPACING, PREVIEW_STEPS, VECTOR_SCALE};
use crate::simulation::Simulation;

/// What a primitive represents.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Paint {
    Body(BodyColor),
    /// Translucent variant of the owning body's colour.
    Trail(BodyColor),
    Vector,
    Grid,
    DragLine,
    Preview,
}

/// Drawing surface in canvas coordinates (top-left origin, `y` down).
pub trait Canvas {
    fn circle(&mut self, center: DVec2, radius: f64, paint: Paint);
    fn line(&mut self, from: DVec2, to: DVec2, paint: Paint);
    fn polyline(&mut self, points: &[DVec2], paint: Paint);
}

/// Draws grid, trails, bodies and velocity vectors according to the display toggles.
pub fn render(sim: &Simulation, canvas: &mut impl Canvas) {
    let display = sim.display();

    if display.show_grid {
        draw_grid(sim, canvas);
    }

    if display.show_trails {
        let mut points = Vec::new();
        for body in sim.bodies() {
            if body.trail().len() < 2 {
                continue;
            }
            points.clear();
            points.extend(body.trail().iter());
            canvas.polyline(&points, Paint::Trail(body.color()));
        }
    }

    for body in sim.bodies() {
        canvas.circle(body.position, body.radius(), Paint::Body(body.color()));
        if display.show_vectors {
            canvas.line(
                body.position,
                body.position + body.velocity * VECTOR_SCALE,
                Paint::Vector,
            );
        }
    }
}

/// Draws an in-progress drag and the path its body would take.
pub fn render_drag(sim: &Simulation, start: DVec2, current: DVec2, canvas: &mut impl Canvas) {
    canvas.line(start, current, Paint::DragLine);
    let path = sim.predict_trajectory(start, current, PREVIEW_STEPS);
    canvas.polyline(&path, Paint::Preview);
}

fn draw_grid(sim: &Simulation, canvas: &mut impl Canvas) {
    let bounds = sim.bounds();

    let mut x = 0.0;
    while x < bounds.width {
        canvas.line(DVec2::new(x, 0.0), DVec2::new(x, bounds.height), Paint::Grid);
        x += GRID_SPACING;
    }

    let mut y = 0.0;
    while y < bounds.height {
        canvas.line(DVec2::new(0.0, y), DVec2::new(bounds.width, y), Paint::Grid);
        y += GRID_SPACING;
    }
}
