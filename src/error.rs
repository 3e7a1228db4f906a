/*
 * Defines the error and result types used throughout the spriteforms crate.
 * Validation failures are reported eagerly at the API boundary; a context that
 * has not been initialized yet is deliberately NOT an error (those paths are
 * silent no-ops so controls can be built before host resources exist).
 */

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// A caller supplied a value that can never be valid, e.g. a negative size
    /// dimension or a malformed parse input.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A caller supplied a value that conflicts with the current state of a
    /// range, e.g. a maximum at or below the minimum.
    #[error("value out of range: {0}")]
    InvalidRange(String),

    /// The operation is declared but has no behavior yet.
    #[error("not implemented: {0}")]
    Unimplemented(&'static str),
}

pub type Result<T> = std::result::Result<T, Error>;
