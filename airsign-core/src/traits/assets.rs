//! Bitmap asset lookup

/// Trait for checking which bitmap assets are installed
pub trait AssetStore {
    /// Check if an asset exists at `path`
    fn exists(&self, path: &str) -> bool;
}

/// Store that claims every asset exists
#[derive(Debug, Clone, Copy, Default)]
pub struct AllAssets;

impl AssetStore for AllAssets {
    fn exists(&self, _path: &str) -> bool {
        true
    }
}
