use bevy::math::DVec2;

// --- Simulation Defaults ---
/// Uniform downward acceleration, in canvas units per frame².
pub const DEFAULT_GRAVITY: f64 = 9.81;
/// Energy kept when bouncing off a wall (and between particles in the uniform field).
pub const DEFAULT_BOUNCE: f64 = 0.8;
/// Restitution used by the resolver in the gravitational model.
pub const DEFAULT_RESTITUTION: f64 = 0.8;
/// Newtonian gravitational constant G₀.
pub const G0: f64 = 6.67430e-11;
/// Seconds per step of the gravitational model before time scaling.
pub const GRAVITY_DT: f64 = 0.016;
/// Lower bound applied to centre distances before dividing by them.
pub const MIN_DISTANCE: f64 = 1e-6;
/// Maximum stored points per trail.
pub const TRAIL_LENGTH: usize = 50;
/// Scale applied to the mass slider in the gravitational model.
pub const MASS_SCALE: f64 = 1e24;
/// Drag vector to velocity factor.
pub const DRAG_VELOCITY_FACTOR: f64 = 0.1;
/// Spacing of the background grid.
pub const GRID_SPACING: f64 = 50.0;
/// Length multiplier for velocity vectors.
pub const VECTOR_SCALE: f64 = 5.0;
/// Steps drawn by the drag trajectory preview.
pub const PREVIEW_STEPS: usize = 20;

/// Tunable physics parameters. Writes take effect on the next step.
#[derive(Clone, Debug, PartialEq)]
pub struct PhysicsParams {
    /// Uniform field strength (uniform model only).
    pub gravity: f64,
    /// Gravitational constant (pairwise model only).
    pub g: f64,
    pub bounce: f64,
    pub restitution: f64,
    /// Fraction of velocity removed per step in the uniform model.
    pub air_resistance: f64,
    pub time_scale: f64,
    pub min_distance: f64,
}

impl Default for PhysicsParams {
    fn default() -> Self {
        Self {
            gravity: DEFAULT_GRAVITY,
            g: G0,
            bounce: DEFAULT_BOUNCE,
            restitution: DEFAULT_RESTITUTION,
            air_resistance: 0.0,
            time_scale: 1.0,
            min_distance: MIN_DISTANCE,
        }
    }
}

/// Values applied to the next spawned body.
#[derive(Clone, Debug, PartialEq)]
pub struct SpawnSettings {
    /// Raw mass in the uniform model, slider value (×[`MASS_SCALE`]) in the gravitational one.
    pub mass: f64,
    pub velocity: f64,
}

impl Default for SpawnSettings {
    fn default() -> Self {
        Self {
            mass: 10.0,
            velocity: 5.0,
        }
    }
}

/// User-facing display toggles read by the renderer.
#[derive(Clone, Debug, PartialEq)]
pub struct DisplaySettings {
    pub show_trails: bool,
    pub show_vectors: bool,
    pub show_grid: bool,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            show_trails: true,
            show_vectors: false,
            show_grid: false,
        }
    }
}

/// Size of the drawable surface. Origin is the top-left corner, `y` grows downward.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> DVec2 {
        DVec2::new(self.width / 2.0, self.height / 2.0)
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::new(1000.0, 1000.0)
    }
}

/// Discrete choices for the gravitational constant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GravityPreset {
    #[default]
    Normal,
    Strong,
    Weak,
}

impl GravityPreset {
    pub const ALL: [GravityPreset; 3] = [Self::Normal, Self::Strong, Self::Weak];

    /// Resolves a preset name. Unrecognised names map to [`GravityPreset::Normal`].
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "strong" => Self::Strong,
            "weak" => Self::Weak,
            _ => Self::Normal,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Strong => "strong",
            Self::Weak => "weak",
        }
    }

    pub fn constant(self) -> f64 {
        match self {
            Self::Normal => G0,
            Self::Strong => G0 * 100.0,
            Self::Weak => G0 * 0.01,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preset_names_resolve_to_scaled_constants() {
        assert_eq!(GravityPreset::from_name("strong").constant(), G0 * 100.0);
        assert_eq!(GravityPreset::from_name("Weak").constant(), G0 * 0.01);
        assert_eq!(GravityPreset::from_name("normal").constant(), G0);
        assert_eq!(GravityPreset::from_name("jupiter"), GravityPreset::Normal);
    }

    #[test]
    fn bounds_center_is_half_size() {
        let bounds = Bounds::new(800.0, 600.0);
        assert_eq!(bounds.center(), DVec2::new(400.0, 300.0));
    }
}
