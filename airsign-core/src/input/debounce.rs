//! Software debounce for the two front-panel buttons
//!
//! A level change is accepted only once the raw line has held the new level
//! for the confirm window. Accepting a low level raises a one-tick press
//! edge; accepting a high level raises a one-tick release edge. A window of
//! zero accepts every raw change on the sample that sees it.

use airsign_hal::{DelayMs, InputPin};

/// Default confirm window
pub const DEFAULT_DEBOUNCE_MS: u32 = 20;

/// Largest confirm window accepted by configuration
pub const MAX_DEBOUNCE_MS: u32 = 30;

/// Poll interval used by [`DebouncedInput::wait_for_release`]
const RELEASE_POLL_MS: u32 = 5;

/// The two physical buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    /// Upper button: leave or skip the current mode
    Advance,
    /// Lower button: delete, reset or dismiss
    Dismiss,
}

impl Button {
    const fn index(self) -> usize {
        match self {
            Button::Advance => 0,
            Button::Dismiss => 1,
        }
    }
}

/// Press edges seen during one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Buttons {
    advance: bool,
    dismiss: bool,
}

impl Buttons {
    /// No button pressed
    pub const fn idle() -> Self {
        Self {
            advance: false,
            dismiss: false,
        }
    }

    /// Snapshot with `button` pressed this tick
    pub const fn with_press(button: Button) -> Self {
        match button {
            Button::Advance => Self {
                advance: true,
                dismiss: false,
            },
            Button::Dismiss => Self {
                advance: false,
                dismiss: true,
            },
        }
    }

    pub const fn pressed(&self, button: Button) -> bool {
        match button {
            Button::Advance => self.advance,
            Button::Dismiss => self.dismiss,
        }
    }

    pub const fn any(&self) -> bool {
        self.advance || self.dismiss
    }
}

/// Debounce state for one line
#[derive(Debug, Clone, Copy, Default)]
struct LineState {
    raw_low: bool,
    stable_low: bool,
    changed_at_ms: u64,
    pressed: bool,
    released: bool,
}

impl LineState {
    fn sample(&mut self, low: bool, now_ms: u64, window_ms: u32) {
        self.pressed = false;
        self.released = false;

        if low != self.raw_low {
            self.raw_low = low;
            self.changed_at_ms = now_ms;
        }

        let settled = now_ms.saturating_sub(self.changed_at_ms) >= u64::from(window_ms);
        if self.raw_low != self.stable_low && settled {
            self.stable_low = self.raw_low;
            if self.stable_low {
                self.pressed = true;
            } else {
                self.released = true;
            }
        }
    }

    fn force_released(&mut self, now_ms: u64) {
        self.raw_low = false;
        self.stable_low = false;
        self.changed_at_ms = now_ms;
    }
}

/// Debounced pair of active-low buttons
pub struct DebouncedInput<A, D> {
    advance: A,
    dismiss: D,
    window_ms: u32,
    lines: [LineState; 2],
}

impl<A: InputPin, D: InputPin> DebouncedInput<A, D> {
    /// Create a debouncer over the two button pins
    ///
    /// `window_ms` is clamped to [`MAX_DEBOUNCE_MS`].
    pub fn new(advance: A, dismiss: D, window_ms: u32) -> Self {
        Self {
            advance,
            dismiss,
            window_ms: window_ms.min(MAX_DEBOUNCE_MS),
            lines: [LineState::default(); 2],
        }
    }

    fn line_low(&self, button: Button) -> bool {
        match button {
            Button::Advance => self.advance.is_low(),
            Button::Dismiss => self.dismiss.is_low(),
        }
    }

    /// Read both pins once and return this tick's press edges
    pub fn sample(&mut self, now_ms: u64) -> Buttons {
        for button in [Button::Advance, Button::Dismiss] {
            let low = self.line_low(button);
            self.lines[button.index()].sample(low, now_ms, self.window_ms);
        }
        let buttons = Buttons {
            advance: self.pressed(Button::Advance),
            dismiss: self.pressed(Button::Dismiss),
        };
        if buttons.any() {
            crate::debug!("button edge {:?}", buttons);
        }
        buttons
    }

    /// Debounced level: pressed means the line settled low
    pub fn is_pressed(&self, button: Button) -> bool {
        self.lines[button.index()].stable_low
    }

    /// Press edge from the latest sample
    pub fn pressed(&self, button: Button) -> bool {
        self.lines[button.index()].pressed
    }

    /// Release edge from the latest sample
    pub fn released(&self, button: Button) -> bool {
        self.lines[button.index()].released
    }

    /// Block until the raw line reads high
    ///
    /// The line is then treated as settled high; no release edge is raised.
    pub fn wait_for_release<T: DelayMs>(&mut self, button: Button, delay: &mut T, now_ms: u64) {
        while self.line_low(button) {
            delay.delay_ms(RELEASE_POLL_MS);
        }
        self.lines[button.index()].force_released(now_ms);
    }

    /// Current confirm window
    pub fn window_ms(&self) -> u32 {
        self.window_ms
    }
}
