use thiserror::Error;

use crate::models::geometry::GeometryError;

/// Errors raised by the interaction engine.
///
/// Invalid drops and degenerate resizes are not errors: they come back as
/// `is_valid: false` or get clamped. These variants cover misuse by the host.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InteractionError {
    #[error("another drag or resize gesture is already active")]
    GestureInProgress,
    #[error("grid layout cannot change while a gesture is active")]
    LayoutLocked,
    #[error("snap interval must be at least one minute")]
    ZeroSnapMinutes,
    #[error("invalid grid geometry: {0}")]
    Geometry(#[from] GeometryError),
}
