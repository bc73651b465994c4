//! Error types for simulation support operations.
//!
//! The engine itself (state mutation, physics, polling) cannot fail; these
//! errors only come from building cadences and logs with bad parameters.

use thiserror::Error;

/// Errors encountered while configuring simulation helpers.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error(transparent)]
    Core(#[from] wt_core::WtError),
}

pub type SimResult<T> = Result<T, SimError>;
