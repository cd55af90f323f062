//! Fixed-timing control
//!
//! A queue-blind round robin: each sync group gets `GREEN_DURATION` ticks of
//! green followed by `YELLOW_DURATION` ticks of yellow, in ascending group
//! order.

use log::debug;

use super::system::TrafficSystem;
use super::types::{SignalPhase, SyncGroup};

/// Ticks a group stays green
pub const GREEN_DURATION: u32 = 10;

/// Ticks a group stays yellow
pub const YELLOW_DURATION: u32 = 3;

/// Phase of the currently active group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixedPhase {
    Green,
    Yellow,
}

/// Timing state attached to one traffic system
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedTimingState {
    pub current_green_group: SyncGroup,
    pub phase: FixedPhase,
    /// Ticks left in the current phase
    pub timer: u32,
    /// Number of group hand-overs so far
    pub cycle_count: u64,
}

impl FixedTimingState {
    /// Fresh state: the lowest group starts a full green phase
    pub fn new(first_group: SyncGroup) -> Self {
        Self {
            current_green_group: first_group,
            phase: FixedPhase::Green,
            timer: GREEN_DURATION,
            cycle_count: 0,
        }
    }

    /// Advance one tick through the green/yellow cycle over `groups`
    fn advance(&mut self, groups: &[SyncGroup]) {
        self.timer = self.timer.saturating_sub(1);
        if self.timer > 0 {
            return;
        }

        match self.phase {
            FixedPhase::Green => {
                self.phase = FixedPhase::Yellow;
                self.timer = YELLOW_DURATION;
            }
            FixedPhase::Yellow => {
                // A group that vanished on reconfiguration restarts the order
                let next_index = groups
                    .iter()
                    .position(|&g| g == self.current_green_group)
                    .map_or(0, |index| (index + 1) % groups.len());
                self.current_green_group = groups[next_index];
                self.cycle_count += 1;
                self.phase = FixedPhase::Green;
                self.timer = GREEN_DURATION;
            }
        }
    }
}

/// Run one tick of fixed-timing control
///
/// The state is created on the first call for a system and must be kept by
/// the caller for as long as the system lives.
pub fn fixed_timing_control(system: &mut TrafficSystem, state: &mut Option<FixedTimingState>) {
    let groups = system.sync_groups();
    let Some(&first_group) = groups.first() else {
        return;
    };

    let state = state.get_or_insert_with(|| FixedTimingState::new(first_group));
    let previous = (state.current_green_group, state.phase);
    state.advance(&groups);

    if previous != (state.current_green_group, state.phase) {
        debug!(
            "Fixed timing: group {} now {:?} for {} ticks (cycle {})",
            state.current_green_group, state.phase, state.timer, state.cycle_count
        );
    }

    for signal in &mut system.signals {
        if signal.sync_group != state.current_green_group {
            if signal.phase != SignalPhase::Red {
                signal.turn_red();
            }
            continue;
        }

        match state.phase {
            FixedPhase::Green => {
                if !signal.is_green() {
                    signal.turn_green();
                }
            }
            FixedPhase::Yellow => {
                if signal.is_yellow() {
                    signal.yellow_time_remaining = state.timer;
                } else {
                    signal.turn_yellow(state.timer);
                }
            }
        }
    }

    debug_assert!(system.groups_in_lockstep());
}
