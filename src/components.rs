use bevy::math::DVec2;
use std::collections::VecDeque;

use crate::resources::TRAIL_LENGTH;

/// Display colour of a body, stored as an HSL triple.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BodyColor {
    pub hue: f32,
    pub saturation: f32,
    pub lightness: f32,
}

impl BodyColor {
    pub const SATURATION: f32 = 0.7;
    pub const LIGHTNESS: f32 = 0.6;

    pub fn from_hue(hue: f32) -> Self {
        Self {
            hue,
            saturation: Self::SATURATION,
            lightness: Self::LIGHTNESS,
        }
    }
}

/// Bounded history of past positions, oldest first.
#[derive(Clone, Debug, Default)]
pub struct Trail {
    history: VecDeque<DVec2>,
}

impl Trail {
    /// Appends a position, evicting the oldest entry past [`TRAIL_LENGTH`].
    pub fn push(&mut self, position: DVec2) {
        self.history.push_back(position);
        while self.history.len() > TRAIL_LENGTH {
            self.history.pop_front();
        }
    }

    pub fn clear(&mut self) {
        self.history.clear();
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = DVec2> + '_ {
        self.history.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }
}

/// A simulated point mass with a radius.
///
/// Mass, radius and colour are fixed at spawn time. Position and velocity
/// are rewritten every step.
#[derive(Clone, Debug)]
pub struct Body {
    pub position: DVec2,
    pub velocity: DVec2,
    mass: f64,
    radius: f64,
    color: BodyColor,
    trail: Trail,
}

impl Body {
    pub fn new(position: DVec2, velocity: DVec2, mass: f64, radius: f64, color: BodyColor) -> Self {
        Self {
            position,
            velocity,
            mass,
            radius,
            color,
            trail: Trail::default(),
        }
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn color(&self) -> BodyColor {
        self.color
    }

    pub fn momentum(&self) -> DVec2 {
        self.velocity * self.mass
    }

    pub fn trail(&self) -> &Trail {
        &self.trail
    }

    pub(crate) fn trail_mut(&mut self) -> &mut Trail {
        &mut self.trail
    }
}
