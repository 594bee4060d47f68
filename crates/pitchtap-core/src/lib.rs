//! Core types shared by the pitchtap crates.
//!
//! # Primary API
//!
//! - [`StreamConfig`]: audio format negotiated with the host (sample rate,
//!   channel count, block size)
//! - [`AtomicFloat`]: wait-free scalar cell for control-thread → audio-thread
//!   parameter hand-off
//! - [`ParameterRange`]: host-visible parameter bounds and scaling
//! - [`Error`] / [`Result`]: errors for interface misuse
//!
//! # Example
//!
//! ```
//! use pitchtap_core::{AtomicFloat, StreamConfig};
//!
//! let config = StreamConfig::new(48000.0, 2, 1024);
//! assert!(config.validate().is_ok());
//! assert_eq!(config.max_lag(), 512);
//!
//! let threshold = AtomicFloat::new(0.1);
//! threshold.set(0.15);
//! assert_eq!(threshold.get(), 0.15);
//! ```

pub mod config;
pub use config::StreamConfig;

pub mod error;
pub use error::{Error, Result};

mod lockfree;
pub use lockfree::AtomicFloat;

pub mod parameter;
pub use parameter::{ParameterRange, ParameterScale};
