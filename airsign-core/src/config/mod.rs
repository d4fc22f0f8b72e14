//! Configuration types
//!
//! Board-agnostic settings for the sign. Loaded by the host from TOML when
//! the `serde` feature is enabled; every field has a default.

pub mod types;

pub use types::*;
