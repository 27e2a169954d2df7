//! Hard: one randomly called player must press inside the wait window.
//!
//! The same player is never called twice in a row. Inputs recorded before
//! the call are discarded, so only a reaction to the announced colour counts.

use core::time::Duration;

use log::debug;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::{CycleOutcome, GameMode, ModeKind, ModeState, play_intro, play_loss, play_win};
use crate::app::events::GameEvent;
use crate::app::ports::{ActuatorPort, Clock, EventSink};
use crate::game::player::{InputSet, PlayerId};
use crate::game::tools::SharedTools;

/// Uniform pick among the players other than `last`.
pub fn pick_player<R: Rng>(rng: &mut R, last: Option<PlayerId>) -> PlayerId {
    let candidates: heapless::Vec<PlayerId, { PlayerId::COUNT }> = PlayerId::ALL
        .into_iter()
        .filter(|p| Some(*p) != last)
        .collect();
    candidates[rng.gen_range(0..candidates.len())]
}

#[derive(Debug)]
pub struct HardMode {
    state: ModeState,
    rng: SmallRng,
}

impl HardMode {
    pub fn new(seed: u64) -> Self {
        Self {
            state: ModeState::new(),
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn wins(chosen: PlayerId, inputs: InputSet) -> bool {
        inputs.get(chosen)
    }
}

impl GameMode for HardMode {
    fn kind(&self) -> ModeKind {
        ModeKind::Hard
    }

    fn state(&self) -> &ModeState {
        &self.state
    }

    fn intro<H: ActuatorPort, C: Clock>(
        &mut self,
        tools: &mut SharedTools<H, C>,
        sink: &mut impl EventSink,
    ) {
        play_intro(ModeKind::Hard, &mut self.state, tools, sink);
    }

    fn run_cycle<H: ActuatorPort, C: Clock>(
        &mut self,
        tools: &mut SharedTools<H, C>,
        sink: &mut impl EventSink,
    ) -> CycleOutcome {
        if self.state.first_cycle {
            self.intro(tools, sink);
            self.state.waiting = true;
            return CycleOutcome::Waiting;
        }
        self.state.waiting = false;

        let chosen = pick_player(&mut self.rng, self.state.last_player);
        self.state.last_player = Some(chosen);

        let stale = tools.consume_inputs();
        if !stale.is_empty() {
            debug!("hard: discarding stale inputs {:?}", stale);
        }
        tools.hw_mut().set_led_colour(chosen.colour());
        sink.emit(&GameEvent::PlayerCalled(chosen));

        let window = Duration::from_millis(u64::from(tools.config().hard_wait_window_ms));
        tools.sleep(window);

        let inputs = tools.consume_inputs();
        if Self::wins(chosen, inputs) {
            play_win(ModeKind::Hard, &mut self.state, inputs, tools, sink)
        } else {
            play_loss(ModeKind::Hard, inputs, tools, sink)
        }
    }
}
