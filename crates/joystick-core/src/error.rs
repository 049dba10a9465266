//! Widget construction errors.

use thiserror::Error;

use crate::config::ConfigError;
use crate::geometry::GeometryError;

/// Errors raised while building a joystick. Nothing is created when
/// construction fails.
#[derive(Debug, Error)]
pub enum JoystickError {
    #[error("Container not found: {0}")]
    ContainerNotFound(String),
    #[error("Drawing surface unavailable: {0}")]
    SurfaceUnavailable(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

/// Result type for joystick operations.
pub type JoystickResult<T> = Result<T, JoystickError>;
