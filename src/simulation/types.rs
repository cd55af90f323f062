//! Core types for the intersection simulation

use std::fmt;

/// Identifier of a signal within a single traffic system
///
/// Ids are dense: signal `n` lives at index `n` of the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SignalId(pub usize);

/// A set of signals that always display the same phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SyncGroup(pub u32);

impl fmt::Display for SignalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for SyncGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What a signal currently displays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SignalPhase {
    Green,
    Yellow,
    #[default]
    Red,
}

impl SignalPhase {
    /// Single-character form used in terminal summaries
    pub fn symbol(self) -> char {
        match self {
            SignalPhase::Green => 'G',
            SignalPhase::Yellow => 'Y',
            SignalPhase::Red => 'R',
        }
    }
}

/// Default number of ticks a green phase must last before it may end
pub const DEFAULT_MIN_GREEN_TIME: u32 = 5;

/// Default number of ticks after which a green phase must end
pub const DEFAULT_MAX_GREEN_TIME: u32 = 30;

/// Upper bound (exclusive) of the random initial queue per signal
pub const INITIAL_QUEUE_LIMIT: u32 = 10;

/// Vehicles leaving a green signal's queue per tick
pub const DEPARTURES_PER_TICK: u32 = 2;

/// Largest arrival burst a single signal can receive in one tick
pub const NEW_VEHICLE_RATE: u32 = 2;

/// Accepted range of the traffic-rate setting
pub const MIN_TRAFFIC_RATE: u8 = 1;
pub const MAX_TRAFFIC_RATE: u8 = 10;

/// Arrival probability per signal and tick is `traffic_rate / ARRIVAL_RATE_DIVISOR`
pub const ARRIVAL_RATE_DIVISOR: f64 = 20.0;
