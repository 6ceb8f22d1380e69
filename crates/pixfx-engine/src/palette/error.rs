//! Error types for palette operations

use thiserror::Error;

/// Error type for parsing hex color strings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseColorError {
    /// Hex string has the wrong number of digits (must be 6 after stripping '#')
    #[error("invalid hex color length {0} (expected 6 digits)")]
    InvalidLength(usize),
    /// Non-hexadecimal character encountered
    #[error("invalid hex color: {0}")]
    InvalidHex(String),
}

/// Error type for palette validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaletteError {
    /// No colors provided in palette
    #[error("palette cannot be empty")]
    Empty,
    /// No built-in palette with this name
    #[error("unknown palette: {0}")]
    UnknownName(String),
    /// Invalid hex color string
    #[error("invalid color: {0}")]
    ParseColor(#[from] ParseColorError),
}
