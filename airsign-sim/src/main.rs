//! airsign host simulator
//!
//! Runs the mode-control core on a development machine. Publications are
//! read from stdin, one per line:
//!
//! ```text
//! display/mode OnAir
//! display/message {"text":"back in\n5 min"}
//! !advance            press the upper button
//! !dismiss            press the lower button
//! !protocol           inject a protocol error on the next poll
//! !timeout            inject a timeout
//! !link               inject a link loss
//! !other              inject an unclassified failure (fatal)
//! !reconnect-fail     make the next reconnect fail
//! !reset-fail         make the next link reset fail
//! ```
//!
//! Scenes are logged instead of drawn. Set `AIRSIGN_WEATHER_FILE` to serve
//! a saved weather response and `AIRSIGN_ASSET_DIR` to check emoji bitmaps
//! against a real asset tree.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;
use log::info;

use airsign_core::transport::TransportFaultHandler;
use airsign_core::{Controller, DebouncedInput, Runner};
use airsign_hal::StatusLed;

mod config;
mod fault_log;
mod pins;
mod sink;
mod stdin_transport;
mod weather;

use fault_log::FileFaultLog;
use pins::{LogLed, SimButton};
use sink::LogSink;
use stdin_transport::StdinTransport;
use weather::{DirAssets, FileWeather};

const DEFAULT_CONFIG: &str = "airsign.toml";

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG));
    let config = config::load(&config_path)?;

    let advance = SimButton::new("advance");
    let dismiss = SimButton::new("dismiss");
    let transport = StdinTransport::spawn(advance.clone(), dismiss.clone());

    let weather = FileWeather::new(std::env::var_os("AIRSIGN_WEATHER_FILE").map(PathBuf::from));
    let assets = DirAssets::new(std::env::var_os("AIRSIGN_ASSET_DIR").map(PathBuf::from));
    let fault_log = FileFaultLog::new(config.fault_log.as_ref().map(PathBuf::from));

    let mut runner = Runner::new(
        &config,
        TransportFaultHandler::new(transport, StatusLed::active_high(LogLed::default())),
        DebouncedInput::new(advance, dismiss, config.input.debounce_ms),
        Controller::new(&config, weather, assets),
        LogSink::default(),
        fault_log,
    );

    info!("airsign simulator running, reading commands from stdin");
    let start = Instant::now();
    loop {
        let now_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
        runner.step(now_ms)?;
        if runner.faults().transport().is_closed() {
            info!(
                "stdin closed after {} frames ({} with new content), exiting",
                runner.sink().frames(),
                runner.sink().content_frames()
            );
            return Ok(());
        }
    }
}
