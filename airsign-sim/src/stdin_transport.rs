//! Transport fed from stdin
//!
//! A reader thread forwards lines over a channel; `poll` waits on it with
//! the loop's poll timeout. Lines starting with `!` control the simulator.

use std::collections::VecDeque;
use std::io::{self, BufRead};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use log::{info, warn};

use airsign_core::traits::{Transport, TransportError};

use crate::pins::SimButton;

/// One parsed stdin line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    Publish { topic: String, payload: String },
    Fault(TransportError),
    Press(&'static str),
    FailNextReconnect,
    FailNextReset,
    Blank,
    Unknown(String),
}

impl Line {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        match line {
            "" => Line::Blank,
            "!protocol" => Line::Fault(TransportError::Protocol),
            "!timeout" => Line::Fault(TransportError::Timeout),
            "!link" => Line::Fault(TransportError::LinkDown),
            "!other" => Line::Fault(TransportError::Other),
            "!advance" => Line::Press("advance"),
            "!dismiss" => Line::Press("dismiss"),
            "!reconnect-fail" => Line::FailNextReconnect,
            "!reset-fail" => Line::FailNextReset,
            _ if line.starts_with('!') => Line::Unknown(line.to_string()),
            _ => {
                let (topic, payload) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
                Line::Publish {
                    topic: topic.to_string(),
                    payload: payload.trim_start().to_string(),
                }
            }
        }
    }
}

/// Stdin-backed publish/subscribe stand-in
pub struct StdinTransport {
    lines: Receiver<String>,
    advance: SimButton,
    dismiss: SimButton,
    pending_faults: VecDeque<TransportError>,
    fail_reconnect: bool,
    fail_reset: bool,
    closed: bool,
}

impl StdinTransport {
    /// Start the stdin reader thread
    pub fn spawn(advance: SimButton, dismiss: SimButton) -> Self {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            for line in io::stdin().lock().lines() {
                let Ok(line) = line else { break };
                if tx.send(line).is_err() {
                    break;
                }
            }
        });
        Self {
            lines: rx,
            advance,
            dismiss,
            pending_faults: VecDeque::new(),
            fail_reconnect: false,
            fail_reset: false,
            closed: false,
        }
    }

    /// Check if stdin has reached end of file
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    fn apply(&mut self, line: Line, on_message: &mut dyn FnMut(&str, &[u8])) {
        match line {
            Line::Publish { topic, payload } => on_message(&topic, payload.as_bytes()),
            Line::Fault(e) => self.pending_faults.push_back(e),
            Line::Press("advance") => self.advance.press(),
            Line::Press(_) => self.dismiss.press(),
            Line::FailNextReconnect => self.fail_reconnect = true,
            Line::FailNextReset => self.fail_reset = true,
            Line::Blank => {}
            Line::Unknown(cmd) => warn!("unknown simulator command {}", cmd),
        }
    }
}

impl Transport for StdinTransport {
    fn poll(
        &mut self,
        timeout_ms: u32,
        on_message: &mut dyn FnMut(&str, &[u8]),
    ) -> Result<(), TransportError> {
        if let Some(e) = self.pending_faults.pop_front() {
            return Err(e);
        }
        match self.lines.recv_timeout(Duration::from_millis(u64::from(timeout_ms))) {
            Ok(line) => {
                self.apply(Line::parse(&line), on_message);
                // Drain whatever else already arrived
                while let Ok(line) = self.lines.try_recv() {
                    self.apply(Line::parse(&line), on_message);
                }
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => self.closed = true,
        }
        Ok(())
    }

    fn reconnect(&mut self) -> Result<(), TransportError> {
        if std::mem::take(&mut self.fail_reconnect) {
            return Err(TransportError::Timeout);
        }
        info!("broker session re-established");
        Ok(())
    }

    fn reset_link(&mut self) -> Result<(), TransportError> {
        if std::mem::take(&mut self.fail_reset) {
            return Err(TransportError::LinkDown);
        }
        info!("network link reset");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_publication() {
        assert_eq!(
            Line::parse(r#"display/message {"text":"hi there"}"#),
            Line::Publish {
                topic: "display/message".into(),
                payload: r#"{"text":"hi there"}"#.into(),
            }
        );
        assert_eq!(
            Line::parse("display/mode   OnAir\n"),
            Line::Publish {
                topic: "display/mode".into(),
                payload: "OnAir".into(),
            }
        );
    }

    #[test]
    fn test_parse_controls() {
        assert_eq!(Line::parse("!link"), Line::Fault(TransportError::LinkDown));
        assert_eq!(Line::parse("!dismiss"), Line::Press("dismiss"));
        assert_eq!(Line::parse("!reset-fail"), Line::FailNextReset);
        assert_eq!(Line::parse("  "), Line::Blank);
        assert_eq!(Line::parse("!bogus"), Line::Unknown("!bogus".into()));
    }
}
