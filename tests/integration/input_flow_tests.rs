//! Input path integration tests.
//!
//! Inbound MQTT messages and local line samples travel through the
//! `EdgeBus` and the `InputRouter` before the runner sees them.

use std::sync::Arc;

use balloongame::adapters::mqtt::TopicMap;
use balloongame::app::events::GameEvent;
use balloongame::app::router::InputRouter;
use balloongame::app::runner::{GameRunner, StepOutcome};
use balloongame::app::switcher::ModeSwitcher;
use balloongame::config::{GameConfig, MqttConfig};
use balloongame::drivers::input_task::{LineRole, LineWatcher};
use balloongame::events::{EdgeBus, InputEdge};
use balloongame::game::input::{ExplodeToggle, InputAggregator, TriggerKind};
use balloongame::game::modes::{CycleOutcome, ModeKind};
use balloongame::game::player::PlayerId;
use balloongame::game::tools::SharedTools;

use crate::mock_hw::{FakeClock, MockRig, RecordingSink};

struct Rig {
    bus: EdgeBus,
    topics: TopicMap,
    router: InputRouter<RecordingSink>,
    runner: GameRunner<MockRig, FakeClock>,
    sink: RecordingSink,
    explode: Arc<ExplodeToggle>,
}

fn rig(config: GameConfig, initial: ModeKind) -> Rig {
    let clock = FakeClock::default();
    let inputs = Arc::new(InputAggregator::new());
    let explode = Arc::new(ExplodeToggle::new());
    let switcher = Arc::new(ModeSwitcher::new());
    let router = InputRouter::new(
        &config,
        Arc::clone(&inputs),
        Arc::clone(&explode),
        Arc::clone(&switcher),
        RecordingSink::new(),
    );
    let topics = TopicMap::from_config(&config.mqtt);
    let tools = SharedTools::new(
        MockRig::new(clock.clone()),
        clock,
        inputs,
        Arc::clone(&explode),
        config,
    );
    let mut sink = RecordingSink::new();
    let runner = GameRunner::new(tools, initial, switcher, &mut sink);
    Rig {
        bus: EdgeBus::new(),
        topics,
        router,
        runner,
        sink,
        explode,
    }
}

impl Rig {
    fn publish(&self, topic: &str, payload: &[u8]) {
        if let Some(edge) = self.topics.on_message(topic, payload).unwrap() {
            assert!(self.bus.push(edge));
        }
    }

    /// Button press on a player station: `"1"` then `"0"`.
    fn press(&self, player: PlayerId) {
        let topic = self.topics.player_topic(player).unwrap();
        self.publish(&topic, b"1");
        self.publish(&topic, b"0");
    }

    fn step(&mut self) -> StepOutcome {
        self.router.drain(&self.bus);
        self.runner.step(&mut self.sink).unwrap()
    }
}

fn seeded() -> GameConfig {
    GameConfig {
        rng_seed: Some(7),
        ..GameConfig::default()
    }
}

#[test]
fn mqtt_presses_win_a_medium_round() {
    let mut r = rig(seeded(), ModeKind::Medium);
    assert_eq!(r.step(), StepOutcome::Cycle(CycleOutcome::Waiting));

    for p in [PlayerId::One, PlayerId::Three, PlayerId::Four] {
        r.press(p);
    }
    match r.step() {
        StepOutcome::Cycle(CycleOutcome::Won { .. }) => {}
        other => panic!("expected a win, got {:?}", other),
    }
    assert!(r.sink.events.iter().any(|e| matches!(
        e,
        GameEvent::RoundWon { mode: ModeKind::Medium, inputs, .. } if inputs.count() == 3
    )));
}

#[test]
fn release_without_press_is_filtered() {
    let mut r = rig(seeded(), ModeKind::Easy);
    r.step();
    r.publish("Pico2/Eingabe", b"0");
    assert_eq!(r.step(), StepOutcome::Cycle(CycleOutcome::Lost));
}

#[test]
fn level_low_trigger_counts_a_lone_zero() {
    let config = GameConfig {
        triggers: [TriggerKind::LevelLow; 4],
        ..seeded()
    };
    let mut r = rig(config, ModeKind::Easy);
    r.step();
    r.publish("Pico2/Eingabe", b"0");
    assert!(matches!(r.step(), StepOutcome::Cycle(CycleOutcome::Won { .. })));
}

#[test]
fn foreign_topics_never_reach_the_bus() {
    let r = rig(seeded(), ModeKind::Easy);
    r.publish("Pico1/Status", b"1");
    r.publish("weather/today", b"0");
    assert!(r.bus.is_empty());
}

#[test]
fn explode_topic_drives_the_toggle() {
    let mut r = rig(seeded(), ModeKind::Easy);
    let topic = MqttConfig::default().explode_topic;
    r.publish(&topic, b"1");
    r.step();
    assert!(r.explode.is_engaged());
    r.publish(&topic, b"0");
    r.step();
    assert!(!r.explode.is_engaged());
}

#[test]
fn mode_button_line_switches_after_intro() {
    let mut r = rig(seeded(), ModeKind::Easy);
    let mut button = LineWatcher::new(LineRole::ModeButton, 50);

    // Press during the intro: routed but ignored.
    let press = |w: &mut LineWatcher, at: u32| {
        assert_eq!(w.sample(false, at), None);
        w.sample(false, at + 60)
    };
    let edge = press(&mut button, 0).unwrap();
    assert_eq!(edge, InputEdge::ModeButton);
    r.bus.push(edge);
    r.router.drain(&r.bus);
    assert_eq!(r.router.sink().events, vec![GameEvent::SwitchIgnored]);

    r.step();
    assert_eq!(button.sample(true, 200), None);
    assert_eq!(button.sample(true, 260), None, "release is not reported");

    r.bus.push(press(&mut button, 1_000).unwrap());
    assert_eq!(
        r.step(),
        StepOutcome::Switched {
            from: ModeKind::Easy,
            to: ModeKind::Medium
        }
    );
}
