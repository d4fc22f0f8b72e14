//! Simulated button and LED pins

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use log::{debug, info};

use airsign_hal::{InputPin, OutputPin};

/// How long a simulated press holds the line low
const PRESS_HOLD: Duration = Duration::from_millis(100);

/// Active-low button pressed from the command stream
#[derive(Clone)]
pub struct SimButton {
    name: &'static str,
    held_until: Rc<Cell<Option<Instant>>>,
}

impl SimButton {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            held_until: Rc::new(Cell::new(None)),
        }
    }

    /// Hold the line low long enough to pass the debounce window
    pub fn press(&self) {
        debug!("{} button pressed", self.name);
        self.held_until.set(Some(Instant::now() + PRESS_HOLD));
    }
}

impl InputPin for SimButton {
    fn is_high(&self) -> bool {
        self.held_until
            .get()
            .map_or(true, |until| Instant::now() >= until)
    }
}

/// Status LED that logs every change
#[derive(Default)]
pub struct LogLed {
    lit: bool,
}

impl OutputPin for LogLed {
    fn set_high(&mut self) {
        if !self.lit {
            info!("status LED on");
        }
        self.lit = true;
    }

    fn set_low(&mut self) {
        if self.lit {
            info!("status LED off");
        }
        self.lit = false;
    }

    fn is_set_high(&self) -> bool {
        self.lit
    }
}
