//! Centralized error type for the pitchtap umbrella crate.
//!
//! Wraps subsystem errors so `?` propagates naturally across crate boundaries.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] pitchtap_core::Error),

    #[error("Invalid estimator settings: {0}")]
    Settings(String),
}

pub type Result<T> = std::result::Result<T, Error>;
