//! Medium: more than two of the four players must press.

use super::{CycleOutcome, GameMode, ModeKind, ModeState, play_intro, play_loss, play_win};
use crate::app::ports::{ActuatorPort, Clock, EventSink};
use crate::game::player::InputSet;
use crate::game::tools::SharedTools;

/// Strictly more than this many players must signal.
const QUORUM: usize = 2;

#[derive(Debug, Default)]
pub struct MediumMode {
    state: ModeState,
}

impl MediumMode {
    pub const fn new() -> Self {
        Self {
            state: ModeState::new(),
        }
    }

    pub fn wins(inputs: InputSet) -> bool {
        inputs.count() > QUORUM
    }
}

impl GameMode for MediumMode {
    fn kind(&self) -> ModeKind {
        ModeKind::Medium
    }

    fn state(&self) -> &ModeState {
        &self.state
    }

    fn intro<H: ActuatorPort, C: Clock>(
        &mut self,
        tools: &mut SharedTools<H, C>,
        sink: &mut impl EventSink,
    ) {
        play_intro(ModeKind::Medium, &mut self.state, tools, sink);
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

        let inputs = tools.consume_inputs();
        if Self::wins(inputs) {
            play_win(ModeKind::Medium, &mut self.state, inputs, tools, sink)
        } else {
            play_loss(ModeKind::Medium, inputs, tools, sink)
        }
    }
}
