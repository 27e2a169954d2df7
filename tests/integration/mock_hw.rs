//! Mock rig, clock and event sink for integration tests.
//!
//! Records every actuator call so tests can assert on the full command
//! history without touching real GPIO/PWM. Blocking calls advance the
//! fake clock by the time they would have taken.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use balloongame::app::events::GameEvent;
use balloongame::app::ports::{ActuatorPort, Clock, EventSink, LedAnimation, ServoAction};
use balloongame::game::input::InputAggregator;
use balloongame::game::player::Rgb;

// ── Actuator call record ──────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum ActuatorCall {
    Pump(bool),
    Valve(bool),
    Colour(Rgb),
    LedOn,
    LedOff,
    Animation {
        animation: LedAnimation,
        colour: Rgb,
        duration: Duration,
    },
    Servo(ServoAction),
}

// ── FakeClock ─────────────────────────────────────────────────

/// Shared virtual time; only moves when something sleeps or blocks.
#[derive(Debug, Clone, Default)]
pub struct FakeClock {
    now_us: Arc<AtomicU64>,
}

#[allow(dead_code)]
impl FakeClock {
    pub fn advance(&self, d: Duration) {
        self.now_us.fetch_add(d.as_micros() as u64, Ordering::SeqCst);
    }

    pub fn now(&self) -> Duration {
        Duration::from_micros(self.now_us.load(Ordering::SeqCst))
    }
}

impl Clock for FakeClock {
    fn now_us(&self) -> u64 {
        self.now_us.load(Ordering::SeqCst)
    }

    fn sleep(&self, duration: Duration) {
        self.advance(duration);
    }
}

// ── MockRig ───────────────────────────────────────────────────

pub struct MockRig {
    pub calls: Vec<ActuatorCall>,
    clock: FakeClock,
    servo_settle: Duration,
}

#[allow(dead_code)]
impl MockRig {
    pub fn new(clock: FakeClock) -> Self {
        Self {
            calls: Vec::new(),
            clock,
            servo_settle: Duration::from_millis(500),
        }
    }

    pub fn pump_on(&self) -> bool {
        self.calls
            .iter()
            .rev()
            .find_map(|c| match c {
                ActuatorCall::Pump(on) => Some(*on),
                _ => None,
            })
            .unwrap_or(false)
    }

    pub fn valve_open(&self) -> bool {
        self.calls
            .iter()
            .rev()
            .find_map(|c| match c {
                ActuatorCall::Valve(open) => Some(*open),
                _ => None,
            })
            .unwrap_or(false)
    }

    /// Intro animations played so far.
    pub fn intros(&self) -> Vec<Rgb> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                ActuatorCall::Animation {
                    animation: LedAnimation::Sinus,
                    colour,
                    ..
                } => Some(*colour),
                _ => None,
            })
            .collect()
    }

    pub fn ejects(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| **c == ActuatorCall::Servo(ServoAction::EjectAndReset))
            .count()
    }

    pub fn position(&self, call: &ActuatorCall) -> Option<usize> {
        self.calls.iter().position(|c| c == call)
    }
}

impl ActuatorPort for MockRig {
    fn set_pump(&mut self, on: bool) {
        self.calls.push(ActuatorCall::Pump(on));
    }

    fn set_valve(&mut self, open: bool) {
        self.calls.push(ActuatorCall::Valve(open));
    }

    fn set_led_colour(&mut self, rgb: Rgb) {
        self.calls.push(ActuatorCall::Colour(rgb));
    }

    fn led_on(&mut self) {
        self.calls.push(ActuatorCall::LedOn);
    }

    fn led_off(&mut self) {
        self.calls.push(ActuatorCall::LedOff);
    }

    fn led_animation(&mut self, animation: LedAnimation, colour: Rgb, duration: Duration) {
        self.calls.push(ActuatorCall::Animation {
            animation,
            colour,
            duration,
        });
        self.clock.advance(duration);
    }

    fn servo(&mut self, action: ServoAction) {
        self.calls.push(ActuatorCall::Servo(action));
        let moves = if action == ServoAction::EjectAndReset { 2 } else { 1 };
        self.clock.advance(self.servo_settle * moves);
    }
}

// ── RecordingSink ─────────────────────────────────────────────

#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    pub events: Vec<GameEvent>,
    /// When set, a called player presses their button as soon as they
    /// are announced, inside the Hard wait window.
    pub stations: Option<Arc<InputAggregator>>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, event: &GameEvent) -> bool {
        self.events.contains(event)
    }

    pub fn position(&self, event: &GameEvent) -> Option<usize> {
        self.events.iter().position(|e| e == event)
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &GameEvent) {
        if let (GameEvent::PlayerCalled(player), Some(stations)) = (event, &self.stations) {
            stations.record(*player);
        }
        self.events.push(event.clone());
    }
}
