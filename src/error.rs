use std::fmt;

/// Errors returned by fallible simulation calls.
#[derive(Debug, Clone, PartialEq)]
pub enum SandboxError {
    /// The gravitational model only spawns from a complete drag gesture.
    MissingDragEnd,
    /// A spawn point had a NaN or infinite coordinate.
    NonFinitePoint { x: f64, y: f64 },
    /// The configured mass cannot produce a body with a positive radius.
    InvalidMass { mass: f64 },
}

impl fmt::Display for SandboxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SandboxError::MissingDragEnd => {
                write!(f, "gravitational spawn requires a drag end point")
            }
            SandboxError::NonFinitePoint { x, y } => {
                write!(f, "spawn point ({x}, {y}) is not finite")
            }
            SandboxError::InvalidMass { mass } => {
                write!(f, "mass {mass} does not yield a positive radius")
            }
        }
    }
}

impl std::error::Error for SandboxError {}
