//! Persistent fault log

/// Trait for a sink that keeps fatal-fault lines across restarts
pub trait FaultLog {
    /// Record one line stamped with the monotonic time
    fn record(&mut self, now_ms: u64, line: &str);
}

/// No fault log configured
impl FaultLog for () {
    fn record(&mut self, _now_ms: u64, _line: &str) {}
}
