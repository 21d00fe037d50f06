//! Error types for the codec public API.
//!
//! Every failure is surfaced to the caller immediately; nothing is retried
//! internally. Aliased or undersized spans that slip past the public entry
//! points are programmer errors, not represented here.

use thiserror::Error;

/// Errors returned by the codec entry points.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// The requested format has no codec for the requested direction
    /// (palette, HDR and BC4 tags are registered by name only).
    #[error("format {0} has no codec for this operation")]
    Unsupported(String),

    /// A caller-supplied value is out of contract: unknown filter index,
    /// a scaling ratio other than 1 or ½, or a span length that does not
    /// match the declared format size.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The caller's format enumeration disagrees with the registry table.
    /// Fatal at startup: the two enumerations have drifted apart.
    #[error("format table mismatch: {0}")]
    InitializationMismatch(String),
}
