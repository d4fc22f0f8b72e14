//! End-to-end tests of the master loop with fake collaborators

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use airsign_core::traits::{
    AllAssets, FaultLog, FetchError, Transport, TransportError, WeatherSource,
};
use airsign_core::transport::TransportFaultHandler;
use airsign_core::{
    ActiveMode, Controller, DebouncedInput, FatalError, Runner, SignConfig,
};
use airsign_display::{DisplayError, RenderSink, Scene};
use airsign_hal::{InputPin, OutputPin, StatusLed};
use airsign_protocol::WeatherReading;

const WEATHER_JSON: &str = r#"{
    "weather": [{"main": "Rain", "icon": "10d"}],
    "main": {"temp": 7.5, "pressure": 1008, "humidity": 88},
    "wind": {"speed": 5.0, "deg": 180}
}"#;

enum Inbound {
    Publish(&'static str, &'static str),
    Fail(TransportError),
}

#[derive(Default)]
struct TransportLog {
    inbound: VecDeque<Inbound>,
    reconnect_results: VecDeque<Result<(), TransportError>>,
    reset_results: VecDeque<Result<(), TransportError>>,
    reconnects: u32,
    resets: u32,
}

#[derive(Clone, Default)]
struct FakeTransport(Rc<RefCell<TransportLog>>);

impl FakeTransport {
    fn publish(&self, topic: &'static str, payload: &'static str) {
        self.0.borrow_mut().inbound.push_back(Inbound::Publish(topic, payload));
    }

    fn fail(&self, error: TransportError) {
        self.0.borrow_mut().inbound.push_back(Inbound::Fail(error));
    }
}

impl Transport for FakeTransport {
    fn poll(
        &mut self,
        _timeout_ms: u32,
        on_message: &mut dyn FnMut(&str, &[u8]),
    ) -> Result<(), TransportError> {
        let next = self.0.borrow_mut().inbound.pop_front();
        match next {
            Some(Inbound::Publish(topic, payload)) => {
                on_message(topic, payload.as_bytes());
                Ok(())
            }
            Some(Inbound::Fail(e)) => Err(e),
            None => Ok(()),
        }
    }

    fn reconnect(&mut self) -> Result<(), TransportError> {
        let mut log = self.0.borrow_mut();
        log.reconnects += 1;
        log.reconnect_results.pop_front().unwrap_or(Ok(()))
    }

    fn reset_link(&mut self) -> Result<(), TransportError> {
        let mut log = self.0.borrow_mut();
        log.resets += 1;
        log.reset_results.pop_front().unwrap_or(Ok(()))
    }
}

#[derive(Clone)]
struct FakeButton(Rc<Cell<bool>>);

impl FakeButton {
    fn released() -> Self {
        Self(Rc::new(Cell::new(true)))
    }

    fn hold(&self, down: bool) {
        self.0.set(!down);
    }
}

impl InputPin for FakeButton {
    fn is_high(&self) -> bool {
        self.0.get()
    }
}

#[derive(Clone, Default)]
struct FakeLed(Rc<Cell<bool>>);

impl OutputPin for FakeLed {
    fn set_high(&mut self) {
        self.0.set(true);
    }
    fn set_low(&mut self) {
        self.0.set(false);
    }
    fn is_set_high(&self) -> bool {
        self.0.get()
    }
}

struct FixedWeather;

impl WeatherSource for FixedWeather {
    fn fetch(&mut self, _url: &str) -> Result<WeatherReading, FetchError> {
        Ok(WeatherReading::from_json(WEATHER_JSON.as_bytes())?)
    }
}

#[derive(Default)]
struct RecordingSink {
    shown: Vec<Scene>,
    fail: bool,
}

impl RenderSink for RecordingSink {
    fn show(&mut self, scene: &Scene) -> Result<(), DisplayError> {
        if self.fail {
            return Err(DisplayError::Communication);
        }
        self.shown.push(scene.clone());
        Ok(())
    }
}

#[derive(Default)]
struct MemoryFaultLog(Vec<(u64, String)>);

impl FaultLog for MemoryFaultLog {
    fn record(&mut self, now_ms: u64, line: &str) {
        self.0.push((now_ms, line.to_string()));
    }
}

type TestRunner = Runner<
    FakeTransport,
    FakeLed,
    FakeButton,
    FakeButton,
    FixedWeather,
    AllAssets,
    RecordingSink,
    MemoryFaultLog,
>;

struct Rig {
    runner: TestRunner,
    transport: FakeTransport,
    led: FakeLed,
    advance: FakeButton,
    dismiss: FakeButton,
}

fn rig() -> Rig {
    rig_with_sink(RecordingSink::default())
}

fn rig_with_sink(sink: RecordingSink) -> Rig {
    let mut config = SignConfig::default();
    config.input.debounce_ms = 0;
    let transport = FakeTransport::default();
    let led = FakeLed::default();
    let advance = FakeButton::released();
    let dismiss = FakeButton::released();

    let runner = Runner::new(
        &config,
        TransportFaultHandler::new(transport.clone(), StatusLed::active_high(led.clone())),
        DebouncedInput::new(advance.clone(), dismiss.clone(), config.input.debounce_ms),
        Controller::new(&config, FixedWeather, AllAssets),
        sink,
        MemoryFaultLog::default(),
    );
    Rig {
        runner,
        transport,
        led,
        advance,
        dismiss,
    }
}

impl Rig {
    fn run(&mut self, from_ms: u64, to_ms: u64) {
        let mut now = from_ms;
        while now <= to_ms {
            self.runner.step(now).expect("no fatal fault");
            now += 10;
        }
    }

    fn press(&mut self, button: &FakeButton, now_ms: u64) {
        button.hold(true);
        self.runner.step(now_ms).expect("no fatal fault");
        button.hold(false);
        self.runner.step(now_ms + 10).expect("no fatal fault");
    }

    fn active(&self) -> ActiveMode {
        self.runner.controller().active()
    }
}

#[test]
fn test_starts_on_weather_and_renders() {
    let mut rig = rig();
    rig.run(0, 100);
    assert_eq!(rig.active(), ActiveMode::WeatherDisplay);
    let first = &rig.runner.sink().shown[0];
    assert_eq!(first.background(), Some("bmps/weather/10d.bmp"));
    assert_eq!(first.label(0).map(|l| l.text()), Some(" 7.5"));
    assert_eq!(first.label(5).map(|l| l.text()), Some("Rain"));
}

#[test]
fn test_weather_cycles_back_to_weather_without_messages() {
    let mut rig = rig();
    rig.run(0, 16_000);
    assert_eq!(rig.active(), ActiveMode::WeatherDisplay);
}

#[test]
fn test_queued_message_takes_over_after_weather_cycle() {
    let mut rig = rig();
    rig.transport.publish("display/message", r#"{"text":"lunch\n12:30"}"#);
    rig.run(0, 1_000);
    assert_eq!(rig.active(), ActiveMode::WeatherDisplay);

    rig.run(1_010, 16_000);
    assert_eq!(rig.active(), ActiveMode::MessageBoard);
    let scene = rig.runner.sink().shown.last().expect("board rendered");
    assert_eq!(scene.label(0).map(|l| l.text()), Some("     lunch\n     12:30"));

    // Single message, no persist: after its duration the board yields
    rig.run(16_010, 22_000);
    assert_eq!(rig.active(), ActiveMode::WeatherDisplay);
}

#[test]
fn test_mode_commands_preempt() {
    let mut rig = rig();
    rig.run(0, 50);
    rig.transport.publish("display/mode", "OnAir");
    rig.run(60, 100);
    assert_eq!(rig.active(), ActiveMode::AirIndicator);
    let scene = rig.runner.sink().shown.last().expect("air rendered");
    assert_eq!(scene.background(), Some("bmps/Wings_FF0000.bmp"));

    // Unknown names and topics are ignored
    rig.transport.publish("display/mode", "Party");
    rig.transport.publish("display/brightness", "3");
    rig.run(110, 200);
    assert_eq!(rig.active(), ActiveMode::AirIndicator);

    let dismiss = rig.dismiss.clone();
    rig.press(&dismiss, 300);
    assert_eq!(rig.active(), ActiveMode::WeatherDisplay);
}

#[test]
fn test_advance_leaves_persistent_board() {
    let mut rig = rig();
    rig.transport.publish("display/message", r#"{"text":"a"}"#);
    rig.transport.publish("display/message", r#"{"text":"b"}"#);
    rig.run(0, 50);
    rig.transport.publish("display/mode", "Messages");
    rig.run(60, 12_000);
    assert_eq!(rig.active(), ActiveMode::MessageBoard);

    let advance = rig.advance.clone();
    rig.press(&advance, 12_100);
    assert_eq!(rig.active(), ActiveMode::WeatherDisplay);
    assert_eq!(rig.runner.controller().board().queue().len(), 2);
}

#[test]
fn test_dismiss_deletes_messages() {
    let mut rig = rig();
    rig.transport.publish("display/message", r#"{"text":"only"}"#);
    rig.run(0, 50);
    rig.transport.publish("display/mode", "Messages");
    rig.run(60, 100);
    assert_eq!(rig.active(), ActiveMode::MessageBoard);

    let dismiss = rig.dismiss.clone();
    rig.press(&dismiss, 200);
    assert!(!rig.runner.controller().board().is_nonempty());
    assert_eq!(rig.active(), ActiveMode::WeatherDisplay);
}

#[test]
fn test_protocol_error_recovers_with_one_reconnect() {
    let mut rig = rig();
    rig.transport.fail(TransportError::Protocol);
    rig.run(0, 100);
    let log = rig.transport.0.borrow();
    assert_eq!(log.reconnects, 1);
    assert_eq!(log.resets, 0);
    assert!(!rig.led.0.get());
}

#[test]
fn test_reconnect_failure_escalates_to_single_reset() {
    let mut rig = rig();
    rig.transport.fail(TransportError::Timeout);
    rig.transport
        .0
        .borrow_mut()
        .reconnect_results
        .push_back(Err(TransportError::LinkDown));
    rig.transport.publish("display/mode", "OffAir");
    rig.run(0, 100);
    {
        let log = rig.transport.0.borrow();
        assert_eq!(log.reconnects, 2);
        assert_eq!(log.resets, 1);
    }
    // Mode state survives the recovery
    assert_eq!(rig.active(), ActiveMode::AirIndicator);
    assert_eq!(rig.runner.faults().stats().link_resets, 1);
}

#[test]
fn test_tier_two_failure_is_fatal_and_logged() {
    let mut rig = rig();
    rig.runner.step(0).expect("first step");
    rig.transport.fail(TransportError::LinkDown);
    {
        let mut log = rig.transport.0.borrow_mut();
        log.reconnect_results.push_back(Err(TransportError::LinkDown));
        log.reset_results.push_back(Err(TransportError::LinkDown));
    }
    let err = rig.runner.step(10).unwrap_err();
    assert_eq!(err, FatalError::Transport(TransportError::LinkDown));
    assert!(rig.led.0.get());

    let faults = &rig.runner.fault_log().0;
    assert_eq!(faults.len(), 1);
    assert_eq!(faults[0].0, 10);
    assert!(faults[0].1.contains("network link down"));

    let log = rig.transport.0.borrow();
    assert_eq!(log.reconnects, 1);
    assert_eq!(log.resets, 1);
}

#[test]
fn test_render_failure_is_fatal() {
    let mut rig = rig_with_sink(RecordingSink {
        shown: Vec::new(),
        fail: true,
    });
    assert_eq!(
        rig.runner.step(0),
        Err(FatalError::Display(DisplayError::Communication))
    );
    assert!(rig.led.0.get());
    assert_eq!(rig.runner.fault_log().0.len(), 1);
}
