//! Scene model and render sink for airsign
//!
//! This crate provides:
//! - [`Rgb`] colors with the per-channel scaling used by the pulsing overlay
//! - [`Label`] and [`Scene`], the visual tree each mode maintains
//! - [`RenderSink`], the seam to whatever actually lights the pixels
//!
//! # Architecture
//!
//! Modes mutate their own [`Scene`] during `update`. The controller pushes a
//! dirty scene to the [`RenderSink`] once per tick and marks it clean.
//! Bitmap decoding, fonts and framebuffer work all live behind the sink.

#![no_std]
#![deny(unsafe_code)]

pub mod color;
pub mod scene;
pub mod sink;

pub use color::Rgb;
pub use scene::{Label, Scene, ASSET_PATH_LEN, LABEL_LEN, MAX_LABELS};
pub use sink::{DisplayError, RenderSink};
