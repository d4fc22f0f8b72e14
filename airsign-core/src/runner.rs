//! Master loop
//!
//! One [`Runner::step`] is one iteration of the sign's main loop:
//!
//! 1. poll the transport (bounded wait) and dispatch received commands
//! 2. sample the buttons
//! 3. tick the mode controller
//! 4. push the active scene if it changed
//!
//! Any fatal fault is written to the fault log, lights the status LED and
//! is returned to the caller, which is expected to exit.

use alloc::format;
use alloc::string::String;

use airsign_display::RenderSink;
use airsign_hal::{InputPin, OutputPin};
use airsign_protocol::Command;

use crate::config::SignConfig;
use crate::controller::Controller;
use crate::error::FatalError;
use crate::input::DebouncedInput;
use crate::traits::{AssetStore, FaultLog, Transport, WeatherSource};
use crate::transport::TransportFaultHandler;

/// Master loop state
pub struct Runner<T, L, PA, PD, W, A, S, F> {
    faults: TransportFaultHandler<T, L>,
    input: DebouncedInput<PA, PD>,
    controller: Controller<W, A>,
    sink: S,
    fault_log: F,
    topic_prefix: String,
    poll_timeout_ms: u32,
    started: bool,
}

impl<T, L, PA, PD, W, A, S, F> Runner<T, L, PA, PD, W, A, S, F>
where
    T: Transport,
    L: OutputPin,
    PA: InputPin,
    PD: InputPin,
    W: WeatherSource,
    A: AssetStore,
    S: RenderSink,
    F: FaultLog,
{
    pub fn new(
        config: &SignConfig,
        faults: TransportFaultHandler<T, L>,
        input: DebouncedInput<PA, PD>,
        controller: Controller<W, A>,
        sink: S,
        fault_log: F,
    ) -> Self {
        Self {
            faults,
            input,
            controller,
            sink,
            fault_log,
            topic_prefix: config.transport.topic_prefix.clone(),
            poll_timeout_ms: config.transport.poll_timeout_ms,
            started: false,
        }
    }

    /// Run one loop iteration at monotonic time `now_ms`
    pub fn step(&mut self, now_ms: u64) -> Result<(), FatalError> {
        if !self.started {
            self.started = true;
            self.controller.start(now_ms);
        }

        let controller = &mut self.controller;
        let prefix = self.topic_prefix.as_str();
        let polled = self.faults.poll(self.poll_timeout_ms, &mut |topic, payload| {
            match Command::parse(prefix, topic, payload) {
                Ok(command) => {
                    crate::debug!("command on {}: {:?}", topic, command);
                    controller.handle_command(command, now_ms);
                }
                Err(e) => crate::warn!("ignoring publication on {}: {}", topic, e),
            }
        });
        if let Err(fatal) = polled {
            return Err(self.fail(now_ms, fatal));
        }

        let buttons = self.input.sample(now_ms);
        self.controller.tick(now_ms, buttons);

        if let Err(e) = self.controller.render(&mut self.sink) {
            return Err(self.fail(now_ms, FatalError::from(e)));
        }
        Ok(())
    }

    fn fail(&mut self, now_ms: u64, fatal: FatalError) -> FatalError {
        crate::error!("fatal fault at {} ms: {}", now_ms, fatal);
        self.faults.light_led();
        let line = format!("fatal: {}", fatal);
        self.fault_log.record(now_ms, &line);
        fatal
    }

    pub fn controller(&self) -> &Controller<W, A> {
        &self.controller
    }

    pub fn faults(&self) -> &TransportFaultHandler<T, L> {
        &self.faults
    }

    pub fn faults_mut(&mut self) -> &mut TransportFaultHandler<T, L> {
        &mut self.faults
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn fault_log(&self) -> &F {
        &self.fault_log
    }
}
