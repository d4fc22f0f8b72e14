//! airsign Hardware Abstraction Layer
//!
//! The mode-control core never touches registers. It talks to the board
//! through the traits in this crate, so the same core runs on the matrix
//! board, in the host simulator, and under test with fake pins.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  airsign-core (modes, controller, loop) │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  airsign-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │  board pins   │       │  sim / fakes  │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::InputPin`] - front-panel buttons (pulled up, active low)
//! - [`gpio::OutputPin`] - status indicator LED
//! - [`delay::DelayMs`] - blocking waits

#![no_std]
#![deny(unsafe_code)]

pub mod delay;
pub mod gpio;

pub use delay::DelayMs;
pub use gpio::{InputPin, Level, OutputPin, StatusLed};
