//! Render sink that logs scenes

use log::{log, log_enabled, Level};

use airsign_display::{DisplayError, RenderSink, Scene};

/// Logs shown scenes
///
/// A frame whose background or text changed is logged at info. Frames
/// that only recolor labels, such as the on-air pulse, go to debug.
#[derive(Default)]
pub struct LogSink {
    frames: u32,
    content_frames: u32,
    last_content: Option<String>,
}

impl LogSink {
    /// Number of scenes shown so far
    pub fn frames(&self) -> u32 {
        self.frames
    }

    /// Number of shown scenes that changed background or text
    pub fn content_frames(&self) -> u32 {
        self.content_frames
    }

    /// Record the scene's background and text, returning whether they changed
    fn content_changed(&mut self, scene: &Scene) -> bool {
        let mut content = String::from(scene.background().unwrap_or("-"));
        for (slot, label) in scene.visible_labels() {
            content.push('\n');
            content.push_str(&slot.to_string());
            content.push(':');
            content.push_str(label.text());
        }
        if self.last_content.as_deref() == Some(content.as_str()) {
            return false;
        }
        self.last_content = Some(content);
        true
    }
}

impl RenderSink for LogSink {
    fn show(&mut self, scene: &Scene) -> Result<(), DisplayError> {
        self.frames = self.frames.wrapping_add(1);
        let level = if self.content_changed(scene) {
            self.content_frames = self.content_frames.wrapping_add(1);
            Level::Info
        } else {
            Level::Debug
        };
        if !log_enabled!(level) {
            return Ok(());
        }
        log!(
            level,
            "frame {}: background {}",
            self.frames,
            scene.background().unwrap_or("-")
        );
        for (slot, label) in scene.visible_labels() {
            log!(
                level,
                "  [{}] #{:06x} {:?}",
                slot,
                label.color().to_u32(),
                label.text()
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use airsign_display::Rgb;

    #[test]
    fn test_counts_frames() {
        let mut sink = LogSink::default();
        let mut scene = Scene::new();
        scene.set_label(0, "hello", Rgb::WHITE);
        sink.show(&scene).unwrap();
        sink.show(&scene).unwrap();
        assert_eq!(sink.frames(), 2);
    }

    #[test]
    fn test_recolor_is_not_a_content_frame() {
        let mut sink = LogSink::default();
        let mut scene = Scene::new();
        scene.set_background(Some("bmps/Wings_FF0000.bmp"));
        scene.set_label(0, "ON", Rgb::new(0x13, 0, 0));
        scene.set_label(1, "AIR", Rgb::new(0x13, 0, 0));
        sink.show(&scene).unwrap();

        for red in 0x14..0x40 {
            scene.set_label_color(0, Rgb::new(red, 0, 0));
            scene.set_label_color(1, Rgb::new(red, 0, 0));
            sink.show(&scene).unwrap();
        }
        assert_eq!(sink.frames(), 45);
        assert_eq!(sink.content_frames(), 1);

        scene.set_label(0, "OFF", Rgb::new(0xDD, 0x80, 0));
        sink.show(&scene).unwrap();
        assert_eq!(sink.content_frames(), 2);
    }

    #[test]
    fn test_background_change_is_a_content_frame() {
        let mut sink = LogSink::default();
        let mut scene = Scene::new();
        scene.set_label(0, "12.0", Rgb::WHITE);
        sink.show(&scene).unwrap();
        scene.set_background(Some("bmps/weather/04d.bmp"));
        sink.show(&scene).unwrap();
        assert_eq!(sink.content_frames(), 2);
    }
}
