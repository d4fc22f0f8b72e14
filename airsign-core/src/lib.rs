//! Board-agnostic mode-control core for the airsign matrix sign
//!
//! This crate contains all application logic that does not depend on
//! specific hardware or network implementations:
//!
//! - Debounced button input
//! - Weather cache with pressure trend
//! - Message queue with cursor and deletion semantics
//! - The three display modes (air indicator, weather, message board)
//! - Mode controller and succession state machine
//! - Tiered transport fault recovery
//! - Configuration types and the master loop
//!
//! Everything is single-threaded and cooperative: the caller drives
//! [`runner::Runner::step`] with a monotonic millisecond clock.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

extern crate alloc;

pub mod config;
pub mod controller;
pub mod error;
pub mod input;
pub mod messages;
pub mod modes;
pub mod runner;
pub mod state;
pub mod traits;
pub mod transport;
pub mod weather;

cfg_if::cfg_if! {
    if #[cfg(feature = "log")] {
        pub use log::{trace, debug, info, warn, error};
    }
    else if #[cfg(feature = "defmt")] {
        pub use defmt::{trace, debug, info, warn, error};
    }
    else {
        macro_rules! trace {
            ($($arg:tt)*) => {{}};
        }
        macro_rules! debug {
            ($($arg:tt)*) => {{}};
        }
        macro_rules! info {
            ($($arg:tt)*) => {{}};
        }
        macro_rules! warn {
            ($($arg:tt)*) => {{}};
        }
        macro_rules! error {
            ($($arg:tt)*) => {{}};
        }
        #[allow(unused_imports)]
        pub(crate) use {trace, debug, info, warn, error};
    }
}

pub use config::{ConfigError, SignConfig};
pub use controller::Controller;
pub use error::FatalError;
pub use input::{Button, Buttons, DebouncedInput};
pub use runner::Runner;
pub use state::ActiveMode;
