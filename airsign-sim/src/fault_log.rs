//! Append-only fault log file

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use log::error;

use airsign_core::traits::FaultLog;

/// Appends `[now_ms] line` records to a file, or drops them with no path
pub struct FileFaultLog {
    path: Option<PathBuf>,
}

impl FileFaultLog {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }
}

impl FaultLog for FileFaultLog {
    fn record(&mut self, now_ms: u64, line: &str) {
        let Some(path) = &self.path else { return };
        let written = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .and_then(|mut file| writeln!(file, "[{}] {}", now_ms, line));
        if let Err(e) = written {
            error!("cannot write fault log {}: {}", path.display(), e);
        }
    }
}
