//! Shared types

mod errors;

pub use errors::{ConfigError, Result};
