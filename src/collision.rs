//! Circle-circle overlap detection and impulse response.
//!
//! Pairs are visited in slot order (`i` ascending, `j > i`). Three or more
//! bodies overlapping at once are resolved pair by pair, so the outcome
//! depends on that order.

use bevy::math::DVec2;

use crate::components::Body;

/// Geometry of an overlapping pair, seen from the first body.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Contact {
    /// Unit vector from the first body's centre towards the second's.
    pub normal: DVec2,
    /// Centre distance, clamped to the minimum distance.
    pub distance: f64,
    /// How far the two circles interpenetrate.
    pub overlap: f64,
}

/// Returns the contact between `a` and `b` if their circles overlap.
///
/// Coincident centres produce a `+x` normal so the pair can still be pushed apart.
pub fn detect(a: &Body, b: &Body, min_distance: f64) -> Option<Contact> {
    let delta = b.position - a.position;
    let raw_distance = delta.length();
    let reach = a.radius() + b.radius();
    if raw_distance >= reach {
        return None;
    }

    let distance = raw_distance.max(min_distance);
    let normal = if raw_distance > 0.0 {
        delta / raw_distance
    } else {
        DVec2::X
    };

    Some(Contact {
        normal,
        distance,
        overlap: reach - distance,
    })
}

/// Applies an impulse along the contact normal.
///
/// Returns `false` without touching either body when they already move
/// apart. With `separate`, each body is also pushed out by half the overlap.
pub fn resolve(
    a: &mut Body,
    b: &mut Body,
    contact: &Contact,
    restitution: f64,
    separate: bool,
) -> bool {
    let relative_speed = (b.velocity - a.velocity).dot(contact.normal);
    if relative_speed > 0.0 {
        return false;
    }

    let inverse_a = 1.0 / a.mass();
    let inverse_b = 1.0 / b.mass();
    let impulse = -(1.0 + restitution) * relative_speed / (inverse_a + inverse_b);

    a.velocity -= contact.normal * (impulse * inverse_a);
    b.velocity += contact.normal * (impulse * inverse_b);

    if separate {
        let push = contact.normal * (contact.overlap * 0.5);
        a.position -= push;
        b.position += push;
    }

    true
}

/// Borrows two distinct slots mutably. Requires `i < j`.
pub fn pair_mut(bodies: &mut [Body], i: usize, j: usize) -> (&mut Body, &mut Body) {
    debug_assert!(i < j, "pair_mut expects i < j");
    let (head, tail) = bodies.split_at_mut(j);
    (&mut head[i], &mut tail[0])
}
