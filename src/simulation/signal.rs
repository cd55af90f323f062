//! A single traffic signal
//!
//! Phase changes go through `turn_green`, `turn_yellow` and `turn_red` so the
//! timer resets stay consistent no matter which controller drives the signal.

use super::types::{SignalId, SignalPhase, SyncGroup};

/// One signal controlling an approach to the intersection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signal {
    pub id: SignalId,
    /// Vehicles waiting at this signal
    pub queue_length: u32,
    pub phase: SignalPhase,
    /// Ticks left before a yellow signal turns red
    pub yellow_time_remaining: u32,
    /// Ticks since the current green phase began
    pub green_time_elapsed: u32,
    pub min_green_time: u32,
    pub max_green_time: u32,
    pub sync_group: SyncGroup,
    /// Ticks since this signal was last green
    pub wait_time: u32,
}

impl Signal {
    pub fn new(
        id: SignalId,
        sync_group: SyncGroup,
        queue_length: u32,
        min_green_time: u32,
        max_green_time: u32,
    ) -> Self {
        Self {
            id,
            queue_length,
            phase: SignalPhase::Red,
            yellow_time_remaining: 0,
            green_time_elapsed: 0,
            min_green_time,
            max_green_time,
            sync_group,
            wait_time: 0,
        }
    }

    pub fn is_green(&self) -> bool {
        self.phase == SignalPhase::Green
    }

    pub fn is_yellow(&self) -> bool {
        self.phase == SignalPhase::Yellow
    }

    pub fn is_red(&self) -> bool {
        self.phase == SignalPhase::Red
    }

    /// Whether the signal currently lets traffic into the intersection
    pub fn is_active(&self) -> bool {
        !self.is_red()
    }

    pub fn turn_green(&mut self) {
        self.phase = SignalPhase::Green;
        self.yellow_time_remaining = 0;
        self.green_time_elapsed = 0;
        self.wait_time = 0;
    }

    pub fn turn_yellow(&mut self, duration: u32) {
        self.phase = SignalPhase::Yellow;
        self.yellow_time_remaining = duration;
        self.green_time_elapsed = 0;
    }

    pub fn turn_red(&mut self) {
        self.phase = SignalPhase::Red;
        self.yellow_time_remaining = 0;
        self.green_time_elapsed = 0;
    }

    /// Add newly arrived vehicles to the queue
    pub fn enqueue(&mut self, vehicles: u32) {
        self.queue_length = self.queue_length.saturating_add(vehicles);
    }

    /// Let up to `throughput` vehicles through
    ///
    /// Returns the number of vehicles that actually left.
    pub fn discharge(&mut self, throughput: u32) -> u32 {
        let departed = self.queue_length.min(throughput);
        self.queue_length -= departed;
        departed
    }
}
