//! Controller dispatch
//!
//! A `Controller` pairs a strategy with whatever state that strategy keeps
//! between ticks for its own traffic system.

use std::fmt;

use super::fixed_timing::{fixed_timing_control, FixedTimingState};
use super::game_theory::game_theory_control;
use super::system::TrafficSystem;

/// The available control strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ControllerKind {
    /// Queue- and fairness-weighted greedy selection
    GameTheory,
    /// Round robin with fixed green and yellow durations
    FixedTiming,
}

impl fmt::Display for ControllerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControllerKind::GameTheory => write!(f, "Game Theory"),
            ControllerKind::FixedTiming => write!(f, "Fixed Timing"),
        }
    }
}

/// A strategy together with its per-system state
#[derive(Debug, Clone)]
pub enum Controller {
    GameTheory,
    /// Timing state is created on the first tick
    FixedTiming(Option<FixedTimingState>),
}

impl Controller {
    pub fn new(kind: ControllerKind) -> Self {
        match kind {
            ControllerKind::GameTheory => Controller::GameTheory,
            ControllerKind::FixedTiming => Controller::FixedTiming(None),
        }
    }

    pub fn kind(&self) -> ControllerKind {
        match self {
            Controller::GameTheory => ControllerKind::GameTheory,
            Controller::FixedTiming(_) => ControllerKind::FixedTiming,
        }
    }

    /// Update the phases of `system` for one tick
    pub fn apply(&mut self, system: &mut TrafficSystem) {
        match self {
            Controller::GameTheory => game_theory_control(system),
            Controller::FixedTiming(state) => fixed_timing_control(system, state),
        }
    }

    pub fn fixed_timing_state(&self) -> Option<&FixedTimingState> {
        match self {
            Controller::FixedTiming(state) => state.as_ref(),
            Controller::GameTheory => None,
        }
    }
}
