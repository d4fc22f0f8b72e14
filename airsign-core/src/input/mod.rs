//! Front-panel button input
//!
//! Two active-low buttons sampled once per tick and debounced in software.

pub mod debounce;

pub use debounce::{Button, Buttons, DebouncedInput, DEFAULT_DEBOUNCE_MS, MAX_DEBOUNCE_MS};
