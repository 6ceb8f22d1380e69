//! Unified error type for the pixfx-engine public API.

use thiserror::Error;

use crate::buffer::BufferError;
use crate::palette::PaletteError;

/// Errors returned by the registry and by effect routines.
///
/// Malformed color strings are deliberately absent: effects fall back to
/// the parameter's default color instead of failing.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EffectError {
    #[error("unknown effect: {0}")]
    UnknownEffect(String),

    #[error("effect already registered: {0}")]
    DuplicateEffect(String),

    #[error("invalid value for parameter '{param}' of effect '{effect}': {reason}")]
    InvalidParam {
        effect: String,
        param: String,
        reason: String,
    },

    /// A routine read a parameter id its own definition does not declare.
    /// Caller-supplied keys never produce this; unknown keys are ignored.
    #[error("parameter '{param}' is not declared by effect '{effect}'")]
    UndeclaredParam { effect: String, param: String },

    #[error("invalid definition for effect '{effect}': {reason}")]
    InvalidDefinition { effect: String, reason: String },

    #[error("buffer error: {0}")]
    Buffer(#[from] BufferError),

    #[error("palette error: {0}")]
    Palette(#[from] PaletteError),
}
