//! GPIO pin abstractions
//!
//! Buttons on the sign are wired to ground with internal pull-ups, so a
//! pressed button reads [`Level::Low`]. The status LED may be wired either
//! way; [`StatusLed`] hides the polarity.

/// Logic level of a digital line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    Low,
    High,
}

impl Level {
    /// Level from a raw "is high" reading
    pub fn from_high(high: bool) -> Self {
        if high {
            Level::High
        } else {
            Level::Low
        }
    }
}

/// Digital input pin
pub trait InputPin {
    /// Check if the pin reads high (logic 1)
    fn is_high(&self) -> bool;

    /// Check if the pin reads low (logic 0)
    fn is_low(&self) -> bool {
        !self.is_high()
    }
}

impl<P: InputPin + ?Sized> InputPin for &P {
    fn is_high(&self) -> bool {
        (**self).is_high()
    }
}

/// Digital output pin
pub trait OutputPin {
    /// Drive the pin high (logic 1)
    fn set_high(&mut self);

    /// Drive the pin low (logic 0)
    fn set_low(&mut self);

    /// Drive the pin to a specific level
    fn set_level(&mut self, level: Level) {
        match level {
            Level::High => self.set_high(),
            Level::Low => self.set_low(),
        }
    }

    /// Check if the pin is currently driven high
    fn is_set_high(&self) -> bool;
}

/// Status indicator LED on top of an [`OutputPin`]
///
/// Lit while the network link is being recovered, and left lit after a
/// fatal fault until the board is restarted.
pub struct StatusLed<P> {
    pin: P,
    active_high: bool,
}

impl<P: OutputPin> StatusLed<P> {
    /// LED that lights when the pin is driven high
    pub fn active_high(pin: P) -> Self {
        Self::new(pin, true)
    }

    /// LED that lights when the pin is driven low
    pub fn active_low(pin: P) -> Self {
        Self::new(pin, false)
    }

    fn new(pin: P, active_high: bool) -> Self {
        let mut led = Self { pin, active_high };
        led.off();
        led
    }

    pub fn on(&mut self) {
        let level = Level::from_high(self.active_high);
        self.pin.set_level(level);
    }

    pub fn off(&mut self) {
        let level = Level::from_high(!self.active_high);
        self.pin.set_level(level);
    }

    pub fn is_on(&self) -> bool {
        self.pin.is_set_high() == self.active_high
    }

    /// Release the underlying pin
    pub fn into_inner(self) -> P {
        self.pin
    }
}
