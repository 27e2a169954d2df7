//! Game runner integration tests.
//!
//! Drive `GameRunner` step by step against the mock rig and verify
//! mode switching, pausing and the actuator command sequence.

use std::sync::Arc;
use std::time::Duration;

use balloongame::app::events::GameEvent;
use balloongame::app::ports::ServoAction;
use balloongame::app::runner::{GameRunner, StepOutcome};
use balloongame::app::switcher::{ModeSwitcher, SwitchRequest};
use balloongame::config::GameConfig;
use balloongame::error::Error;
use balloongame::game::input::{ExplodeToggle, InputAggregator};
use balloongame::game::modes::{CycleOutcome, ModeKind};
use balloongame::game::player::PlayerId;
use balloongame::game::tools::SharedTools;

use crate::mock_hw::{ActuatorCall, FakeClock, MockRig, RecordingSink};

// ── Helpers ───────────────────────────────────────────────────

struct Harness {
    runner: GameRunner<MockRig, FakeClock>,
    sink: RecordingSink,
    inputs: Arc<InputAggregator>,
    explode: Arc<ExplodeToggle>,
    switcher: Arc<ModeSwitcher>,
    clock: FakeClock,
}

impl Harness {
    fn with_config(config: GameConfig, initial: ModeKind) -> Self {
        let clock = FakeClock::default();
        let inputs = Arc::new(InputAggregator::new());
        let explode = Arc::new(ExplodeToggle::new());
        let switcher = Arc::new(ModeSwitcher::new());
        let tools = SharedTools::new(
            MockRig::new(clock.clone()),
            clock.clone(),
            Arc::clone(&inputs),
            Arc::clone(&explode),
            config,
        );
        let mut sink = RecordingSink::new();
        let runner = GameRunner::new(tools, initial, Arc::clone(&switcher), &mut sink);
        Self {
            runner,
            sink,
            inputs,
            explode,
            switcher,
            clock,
        }
    }

    fn new(initial: ModeKind) -> Self {
        let config = GameConfig {
            rng_seed: Some(42),
            ..GameConfig::default()
        };
        Self::with_config(config, initial)
    }

    fn step(&mut self) -> StepOutcome {
        self.runner.step(&mut self.sink).unwrap()
    }

    fn calls(&self) -> &[ActuatorCall] {
        &self.runner.tools().hw().calls
    }

    /// Finish the intro of the active mode.
    fn play_intro(&mut self) {
        assert_eq!(self.step(), StepOutcome::Cycle(CycleOutcome::Waiting));
        assert!(!self.switcher.intro_pending());
    }

    fn switch(&mut self) -> StepOutcome {
        assert_eq!(self.switcher.request(), SwitchRequest::Accepted);
        self.step()
    }
}

// ── Startup ───────────────────────────────────────────────────

#[test]
fn startup_enters_easy_with_intro_pending() {
    let mut h = Harness::new(ModeKind::Easy);
    assert_eq!(h.runner.mode(), Some(ModeKind::Easy));
    assert_eq!(h.sink.events, vec![GameEvent::ModeEntered(ModeKind::Easy)]);
    assert!(h.switcher.intro_pending());

    h.play_intro();
    assert_eq!(h.runner.tools().hw().intros(), vec![ModeKind::Easy.intro_colour()]);
    assert!(h.sink.contains(&GameEvent::IntroFinished(ModeKind::Easy)));
}

#[test]
fn intro_plays_exactly_once() {
    let mut h = Harness::new(ModeKind::Easy);
    for _ in 0..5 {
        h.step();
    }
    assert_eq!(h.runner.tools().hw().intros().len(), 1);
}

// ── Switching ─────────────────────────────────────────────────

#[test]
fn switch_request_during_intro_is_ignored() {
    let mut h = Harness::new(ModeKind::Easy);
    assert_eq!(h.switcher.request(), SwitchRequest::Ignored);

    h.play_intro();
    assert_eq!(h.runner.mode(), Some(ModeKind::Easy));
    assert_eq!(h.runner.stats().switches, 0);
}

#[test]
fn switches_cycle_easy_medium_hard_easy() {
    let mut h = Harness::new(ModeKind::Easy);
    let expected = [
        (ModeKind::Easy, ModeKind::Medium),
        (ModeKind::Medium, ModeKind::Hard),
        (ModeKind::Hard, ModeKind::Easy),
    ];
    for (from, to) in expected {
        h.play_intro();
        assert_eq!(h.switch(), StepOutcome::Switched { from, to });
        assert_eq!(h.runner.mode(), Some(to));
    }
    assert_eq!(h.runner.stats().switches, 3);

    let intros = h.runner.tools().hw().intros();
    assert_eq!(
        intros,
        vec![
            ModeKind::Easy.intro_colour(),
            ModeKind::Medium.intro_colour(),
            ModeKind::Hard.intro_colour(),
        ]
    );
}

#[test]
fn repeated_presses_coalesce_into_one_switch() {
    let mut h = Harness::new(ModeKind::Easy);
    h.play_intro();
    assert_eq!(h.switcher.request(), SwitchRequest::Accepted);
    assert_eq!(h.switcher.request(), SwitchRequest::Accepted);
    assert_eq!(
        h.step(),
        StepOutcome::Switched {
            from: ModeKind::Easy,
            to: ModeKind::Medium
        }
    );
    // The new controller's intro is pending again.
    assert_eq!(h.switcher.request(), SwitchRequest::Ignored);
    h.play_intro();
    assert_eq!(h.runner.mode(), Some(ModeKind::Medium));
}

#[test]
fn cleanup_parks_the_rig_before_the_next_intro() {
    let mut h = Harness::new(ModeKind::Easy);
    h.play_intro();
    h.inputs.record(PlayerId::One);
    h.step();
    let before_switch = h.calls().len();

    h.switch();
    h.play_intro();

    let tail = &h.calls()[before_switch..];
    assert_eq!(
        &tail[..4],
        &[
            ActuatorCall::Pump(false),
            ActuatorCall::Valve(false),
            ActuatorCall::LedOff,
            ActuatorCall::Servo(ServoAction::Reset),
        ]
    );
    let intro_at = tail
        .iter()
        .position(|c| matches!(c, ActuatorCall::Animation { colour, .. } if *colour == ModeKind::Medium.intro_colour()))
        .unwrap();
    assert!(intro_at > 3);
}

#[test]
fn switch_zeroes_both_timers() {
    let mut h = Harness::new(ModeKind::Easy);
    h.play_intro();
    h.step(); // loss, valve vents
    h.inputs.record(PlayerId::Two);
    h.step(); // win, pump runs
    assert!(h.runner.tools().pump_timer().open_time() > 0.0);

    h.switch();
    assert_eq!(h.runner.tools().pump_timer().open_time(), 0.0);
    assert_eq!(h.runner.tools().valve_timer().open_time(), 0.0);
}

#[test]
fn switch_waits_the_grace_interval() {
    let mut h = Harness::new(ModeKind::Easy);
    h.play_intro();
    let before = h.clock.now();
    h.switch();
    let elapsed = h.clock.now() - before;
    // Cleanup resets the servo (settle time) and then the loop holds.
    assert_eq!(elapsed, Duration::from_millis(3_000 + 500));
}

#[test]
fn switch_events_are_ordered() {
    let mut h = Harness::new(ModeKind::Easy);
    h.play_intro();
    h.sink.events.clear();
    h.switch();

    let kinds: Vec<&GameEvent> = h.sink.events.iter().collect();
    assert_eq!(kinds.first(), Some(&&GameEvent::Paused));
    assert!(matches!(kinds[1], GameEvent::Stats(_)));
    assert_eq!(
        kinds[2],
        &GameEvent::ModeSwitched {
            from: ModeKind::Easy,
            to: ModeKind::Medium
        }
    );
    assert_eq!(kinds[3], &GameEvent::ModeEntered(ModeKind::Medium));
    assert_eq!(kinds.last(), Some(&&GameEvent::Resumed));
}

// ── Pausing ───────────────────────────────────────────────────

#[test]
fn paused_loop_runs_no_cycles() {
    let mut h = Harness::new(ModeKind::Easy);
    h.play_intro();
    let cycles = h.runner.stats().cycles;
    let calls = h.calls().len();

    h.switcher.pause();
    h.inputs.record(PlayerId::One);
    for _ in 0..3 {
        assert_eq!(h.step(), StepOutcome::Paused);
    }
    assert_eq!(h.runner.stats().cycles, cycles);
    assert_eq!(h.calls().len(), calls);

    h.switcher.resume();
    assert!(matches!(h.step(), StepOutcome::Cycle(CycleOutcome::Won { .. })));
}

#[test]
fn switch_is_served_even_while_paused() {
    let mut h = Harness::new(ModeKind::Easy);
    h.play_intro();
    h.switcher.request();
    h.switcher.pause();
    assert!(matches!(h.step(), StepOutcome::Switched { .. }));
    assert!(!h.runner.switcher().is_requested());
}

// ── Game flow ─────────────────────────────────────────────────

#[test]
fn medium_needs_three_players() {
    let mut h = Harness::new(ModeKind::Medium);
    h.play_intro();

    h.inputs.record(PlayerId::One);
    h.inputs.record(PlayerId::Two);
    assert_eq!(h.step(), StepOutcome::Cycle(CycleOutcome::Lost));
    assert!(h.runner.tools().hw().valve_open());

    for p in [PlayerId::One, PlayerId::Two, PlayerId::Three] {
        h.inputs.record(p);
    }
    assert!(matches!(h.step(), StepOutcome::Cycle(CycleOutcome::Won { .. })));
    assert!(!h.runner.tools().hw().pump_on());
    assert!(!h.runner.tools().hw().valve_open());
}

#[test]
fn hard_calls_a_player_every_cycle() {
    let mut h = Harness::new(ModeKind::Hard);
    h.play_intro();
    for _ in 0..10 {
        h.step();
    }
    let called: Vec<PlayerId> = h
        .sink
        .events
        .iter()
        .filter_map(|e| match e {
            GameEvent::PlayerCalled(p) => Some(*p),
            _ => None,
        })
        .collect();
    assert_eq!(called.len(), 10);
    assert!(called.windows(2).all(|w| w[0] != w[1]));
}

#[test]
fn first_answer_in_hard_scores_a_win() {
    let mut h = Harness::new(ModeKind::Hard);
    h.sink.stations = Some(Arc::clone(&h.inputs));
    h.play_intro();

    match h.step() {
        StepOutcome::Cycle(CycleOutcome::Won {
            balloon_time,
            ejected,
        }) => {
            assert!((balloon_time - 3.0).abs() < 1e-3);
            assert!(!ejected);
        }
        other => panic!("unexpected {:?}", other),
    }
    assert_eq!(h.runner.stats().wins, 1);
    assert_eq!(h.runner.stats().clamps, 0);
    assert!(
        h.sink
            .events
            .iter()
            .any(|e| matches!(e, GameEvent::RoundWon { mode: ModeKind::Hard, .. }))
    );
}

#[test]
fn long_fill_ejects_then_restarts_timers() {
    let config = GameConfig {
        rng_seed: Some(1),
        balloon_threshold_secs: 1.5,
        ..GameConfig::default()
    };
    let mut h = Harness::with_config(config, ModeKind::Easy);
    h.play_intro();
    h.inputs.record(PlayerId::One);
    assert!(matches!(
        h.step(),
        StepOutcome::Cycle(CycleOutcome::Won { ejected: false, .. })
    ));
    h.inputs.record(PlayerId::One);
    assert!(matches!(
        h.step(),
        StepOutcome::Cycle(CycleOutcome::Won { ejected: true, .. })
    ));
    assert_eq!(h.runner.tools().hw().ejects(), 1);

    // Next win starts from zero again.
    h.inputs.record(PlayerId::One);
    match h.step() {
        StepOutcome::Cycle(CycleOutcome::Won {
            balloon_time,
            ejected,
        }) => {
            assert!(!ejected);
            assert!((balloon_time - 1.0).abs() < 1e-3);
        }
        other => panic!("unexpected {:?}", other),
    }
    assert_eq!(h.runner.stats().ejects, 1);
}

#[test]
fn explode_toggle_holds_the_balloon() {
    let config = GameConfig {
        rng_seed: Some(1),
        balloon_threshold_secs: 0.5,
        ..GameConfig::default()
    };
    let mut h = Harness::with_config(config, ModeKind::Easy);
    h.explode.set(true);
    h.play_intro();
    h.inputs.record(PlayerId::Three);
    assert!(matches!(
        h.step(),
        StepOutcome::Cycle(CycleOutcome::Won { ejected: false, .. })
    ));
    assert_eq!(h.runner.tools().hw().ejects(), 0);
    assert!(
        h.sink
            .events
            .iter()
            .any(|e| matches!(e, GameEvent::EjectSuppressed { .. }))
    );
}

// ── Shutdown ──────────────────────────────────────────────────

#[test]
fn shutdown_parks_and_vacates_the_controller() {
    let mut h = Harness::new(ModeKind::Easy);
    h.play_intro();
    h.runner.shutdown(&mut h.sink);
    assert!(h.runner.mode().is_none());
    assert!(!h.runner.tools().hw().pump_on());
    assert!(matches!(h.sink.events.last(), Some(GameEvent::Stats(_))));
    assert!(matches!(
        h.runner.step(&mut h.sink),
        Err(Error::InvalidState(_))
    ));
}
