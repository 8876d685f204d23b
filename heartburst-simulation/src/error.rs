use thiserror::Error;

/// Errors raised by the heart simulation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimulationError {
    /// Required configuration is missing or out of range.
    #[error("Precondition failed: {0}")]
    Precondition(String),

    /// The explosion centre coincides with a heart's centre, so no push direction exists.
    #[error("Explosion at ({x}, {y}) coincides with a heart centre")]
    DegenerateExplosion { x: f64, y: f64 },

    /// Explosion parameters are not finite or not positive.
    #[error("Invalid explosion: {0}")]
    InvalidExplosion(String),
}
