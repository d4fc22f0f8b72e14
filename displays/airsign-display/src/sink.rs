//! Render sink trait
//!
//! Defines the interface to the pixel side of the sign.

use crate::scene::Scene;

/// Render sink errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Communication error with the panel
    #[error("communication with the display failed")]
    Communication,
    /// A background or glyph asset could not be loaded
    #[error("display asset could not be loaded")]
    AssetLoad,
    /// Display not initialized
    #[error("display not initialized")]
    NotInitialized,
}

/// Render sink trait
///
/// Receives the active mode's scene whenever it changes. Implementations
/// decode bitmaps, lay out fonts and drive the matrix.
pub trait RenderSink {
    /// Show `scene` on the display
    fn show(&mut self, scene: &Scene) -> Result<(), DisplayError>;
}

/// Lets a borrowed sink stand in where an owned one is expected
impl<S: RenderSink + ?Sized> RenderSink for &mut S {
    fn show(&mut self, scene: &Scene) -> Result<(), DisplayError> {
        (**self).show(scene)
    }
}
