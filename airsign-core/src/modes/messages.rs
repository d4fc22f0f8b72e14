//! Message board
//!
//! Shows queued messages one at a time for a fixed duration. The upper
//! button leaves the board; the lower button deletes the message on screen.

use core::fmt::Write;

use airsign_display::{Rgb, Scene, ASSET_PATH_LEN, LABEL_LEN};
use airsign_protocol::MessagePayload;
use heapless::String;

use super::{Mode, ModeContext, UpdateResult};
use crate::input::Button;
use crate::messages::MessageQueue;
use crate::traits::AssetStore;

const SLOT_TEXT: usize = 0;

const TEXT_COLOR: Rgb = Rgb::from_u32(0x787878);

/// Right-justify every line of `text` to `width` columns
pub fn justify(text: &str, width: usize) -> String<LABEL_LEN> {
    let mut out = String::new();
    for (i, line) in text.split('\n').enumerate() {
        let sep = if i > 0 { "\n" } else { "" };
        if write!(out, "{}{:>width$}", sep, line, width = width).is_err() {
            crate::warn!("message text does not fit the label");
            break;
        }
    }
    out
}

/// Bitmap path for an emoji sequence: `bmps/emojis/<hex>-<hex>.bmp`
fn emoji_path(emoji: &[char]) -> String<ASSET_PATH_LEN> {
    let mut path = String::new();
    let _ = path.push_str("bmps/emojis/");
    for (i, cp) in emoji.iter().enumerate() {
        let sep = if i > 0 { "-" } else { "" };
        let _ = write!(path, "{}{:x}", sep, u32::from(*cp));
    }
    let _ = path.push_str(".bmp");
    path
}

/// Background for a message: its picture, else its emoji bitmap
///
/// A multi-code-point emoji falls back to the bitmap of its first code
/// point when the composed bitmap is not installed.
pub fn message_background(
    message: &MessagePayload,
    assets: &dyn AssetStore,
) -> Option<String<ASSET_PATH_LEN>> {
    if let Some(picture) = message.picture() {
        let mut path = String::new();
        let _ = path.push_str(picture);
        return Some(path);
    }
    let emoji = message.emoji()?;
    let full = emoji_path(emoji);
    if assets.exists(&full) {
        return Some(full);
    }
    crate::debug!("emoji {} missing, using first code point", full.as_str());
    emoji.first().map(|first| emoji_path(core::slice::from_ref(first)))
}

/// Message board mode
#[derive(Debug, Clone)]
pub struct MessageBoard {
    queue: MessageQueue,
    persist: bool,
    shown_at_ms: Option<u64>,
    duration_ms: u64,
    column_width: usize,
    scene: Scene,
}

impl MessageBoard {
    pub fn new(duration_ms: u64, column_width: usize) -> Self {
        Self {
            queue: MessageQueue::new(),
            persist: false,
            shown_at_ms: None,
            duration_ms,
            column_width,
            scene: Scene::new(),
        }
    }

    pub fn queue(&self) -> &MessageQueue {
        &self.queue
    }

    pub fn queue_mut(&mut self) -> &mut MessageQueue {
        &mut self.queue
    }

    pub fn is_nonempty(&self) -> bool {
        !self.queue.is_empty()
    }

    pub fn persist(&self) -> bool {
        self.persist
    }

    pub fn set_persist(&mut self, persist: bool) {
        self.persist = persist;
    }

    /// Start a fresh pass: next update shows the first message at once
    pub fn restart(&mut self) {
        self.queue.reset_cursor();
        self.shown_at_ms = None;
    }

    /// Decode and queue a message payload
    pub fn append_json(&mut self, payload: &[u8]) -> bool {
        self.queue.append_json(payload)
    }

    fn show(&mut self, index: usize, assets: &dyn AssetStore) {
        let Some(message) = self.queue.get(index) else {
            return;
        };
        let text = message
            .text()
            .map(|t| justify(t, self.column_width))
            .unwrap_or_default();
        let background = message_background(message, assets);
        crate::debug!(
            "showing message {}: {} {:?}",
            index,
            text.as_str(),
            background.as_deref()
        );
        self.scene.set_label(SLOT_TEXT, &text, TEXT_COLOR);
        self.scene.set_background(background.as_deref());
    }

    fn clear(&mut self) {
        self.scene.set_label(SLOT_TEXT, "", TEXT_COLOR);
        self.scene.set_background(None);
    }
}

impl Mode for MessageBoard {
    fn update(&mut self, ctx: &mut ModeContext<'_>) -> UpdateResult {
        if self.queue.is_empty() {
            return UpdateResult::Done;
        }
        let now = ctx.now_ms;
        let buttons = ctx.buttons;

        if !buttons.any() {
            let fresh = self
                .shown_at_ms
                .is_some_and(|t| now.saturating_sub(t) < self.duration_ms);
            if fresh {
                return UpdateResult::Continue;
            }
        }

        if buttons.pressed(Button::Advance) {
            self.persist = false;
            self.restart();
            return UpdateResult::Done;
        }

        if buttons.pressed(Button::Dismiss) {
            match self.queue.remove_current() {
                Some(_) => {
                    crate::info!("message deleted, {} left", self.queue.len());
                    if self.queue.is_empty() {
                        self.clear();
                        self.persist = false;
                        return UpdateResult::Done;
                    }
                }
                None => crate::warn!("dismiss with no message selected"),
            }
        }

        self.shown_at_ms = Some(now);
        match self.queue.advance() {
            Some(index) => {
                self.show(index, ctx.assets);
                UpdateResult::Continue
            }
            None => UpdateResult::Done,
        }
    }

    fn scene(&self) -> &Scene {
        &self.scene
    }

    fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }
}
