//! Blocking delays

/// Millisecond busy or sleeping delay
pub trait DelayMs {
    fn delay_ms(&mut self, ms: u32);
}
