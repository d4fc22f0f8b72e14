//! Scene buffer
//!
//! A scene is one background asset plus a fixed number of label slots.
//! Each mode owns a scene and decides what its slots mean.

use heapless::{String, Vec};

use crate::color::Rgb;

/// Number of label slots in a scene
pub const MAX_LABELS: usize = 8;

/// Maximum bytes in a label
pub const LABEL_LEN: usize = 128;

/// Maximum bytes in an asset path
pub const ASSET_PATH_LEN: usize = 64;

/// Copy as much of `src` into `dst` as fits, stopping on a char boundary
///
/// Returns `true` when the whole of `src` was copied.
pub fn push_truncated<const N: usize>(dst: &mut String<N>, src: &str) -> bool {
    for ch in src.chars() {
        if dst.push(ch).is_err() {
            return false;
        }
    }
    true
}

/// A colored text label
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Label {
    text: String<LABEL_LEN>,
    color: Rgb,
}

impl Label {
    pub fn new(text: &str, color: Rgb) -> Self {
        let mut label = Self {
            text: String::new(),
            color,
        };
        push_truncated(&mut label.text, text);
        label
    }

    pub fn text(&self) -> &str {
        self.text.as_str()
    }

    pub fn color(&self) -> Rgb {
        self.color
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Visual tree for one mode
#[derive(Debug, Clone)]
pub struct Scene {
    /// Background bitmap path, if any
    background: Option<String<ASSET_PATH_LEN>>,
    labels: Vec<Label, MAX_LABELS>,
    /// Whether the scene needs to be pushed to the sink
    dirty: bool,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    /// Create an empty scene with all label slots blank
    pub fn new() -> Self {
        let mut labels = Vec::new();
        for _ in 0..MAX_LABELS {
            let _ = labels.push(Label::default());
        }
        Self {
            background: None,
            labels,
            dirty: true,
        }
    }

    /// Blank the background and every label
    pub fn clear(&mut self) {
        self.background = None;
        for label in &mut self.labels {
            *label = Label::default();
        }
        self.dirty = true;
    }

    /// Set the background asset; setting the same path is a no-op
    pub fn set_background(&mut self, path: Option<&str>) {
        if self.background.as_deref() == path {
            return;
        }
        self.background = path.map(|p| {
            let mut s = String::new();
            push_truncated(&mut s, p);
            s
        });
        self.dirty = true;
    }

    pub fn background(&self) -> Option<&str> {
        self.background.as_deref()
    }

    /// Set the text and color of a slot; out-of-range slots are ignored
    pub fn set_label(&mut self, slot: usize, text: &str, color: Rgb) {
        let Some(label) = self.labels.get_mut(slot) else {
            return;
        };
        let next = Label::new(text, color);
        if *label != next {
            *label = next;
            self.dirty = true;
        }
    }

    /// Change only the color of a slot
    pub fn set_label_color(&mut self, slot: usize, color: Rgb) {
        if let Some(label) = self.labels.get_mut(slot) {
            if label.color != color {
                label.color = color;
                self.dirty = true;
            }
        }
    }

    pub fn label(&self, slot: usize) -> Option<&Label> {
        self.labels.get(slot)
    }

    /// Non-empty labels with their slot index
    pub fn visible_labels(&self) -> impl Iterator<Item = (usize, &Label)> {
        self.labels.iter().enumerate().filter(|(_, l)| !l.is_empty())
    }

    /// Check if the scene needs pushing
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Mark scene as clean (after rendering)
    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Mark scene as dirty (needs redraw)
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Scene {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Scene[bg={}", self.background.as_deref());
        for (slot, label) in self.visible_labels() {
            defmt::write!(f, ", {}={}", slot, label.text());
        }
        defmt::write!(f, "]");
    }
}
