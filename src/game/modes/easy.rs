//! Easy: any single player pressing wins the round.

use super::{CycleOutcome, GameMode, ModeKind, ModeState, play_intro, play_loss, play_win};
use crate::app::ports::{ActuatorPort, Clock, EventSink};
use crate::game::player::InputSet;
use crate::game::tools::SharedTools;

#[derive(Debug, Default)]
pub struct EasyMode {
    state: ModeState,
}

impl EasyMode {
    pub const fn new() -> Self {
        Self {
            state: ModeState::new(),
        }
    }

    /// At least one of the four players signalled.
    pub fn wins(inputs: InputSet) -> bool {
        inputs.count() >= 1
    }
}

impl GameMode for EasyMode {
    fn kind(&self) -> ModeKind {
        ModeKind::Easy
    }

    fn state(&self) -> &ModeState {
        &self.state
    }

    fn intro<H: ActuatorPort, C: Clock>(
        &mut self,
        tools: &mut SharedTools<H, C>,
        sink: &mut impl EventSink,
    ) {
        play_intro(ModeKind::Easy, &mut self.state, tools, sink);
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
            play_win(ModeKind::Easy, &mut self.state, inputs, tools, sink)
        } else {
            play_loss(ModeKind::Easy, inputs, tools, sink)
        }
    }
}
