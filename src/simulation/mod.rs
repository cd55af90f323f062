//! Intersection control simulation
//!
//! Everything needed to run the adaptive and fixed-timing controllers side
//! by side and compare them. Nothing in here does I/O besides the optional
//! terminal summaries.

mod config;
mod conflicts;
mod controller;
mod fixed_timing;
mod game_theory;
mod metrics;
mod signal;
mod system;
mod types;
mod world;

pub use config::{SimConfig, SystemConfig};
pub use conflicts::{find_conflicts, ConflictGraph};
pub use controller::{Controller, ControllerKind};
pub use fixed_timing::{
    fixed_timing_control, FixedPhase, FixedTimingState, GREEN_DURATION, YELLOW_DURATION,
};
pub use game_theory::{
    game_theory_control, rank_groups, GroupBid, FAIRNESS_WEIGHT, LOW_QUEUE_THRESHOLD,
    MAX_WAIT_TIME, YELLOW_TIME,
};
pub use metrics::{compute_metrics, improvement_percentage, SimulationMetrics, StrategyMetrics};
pub use signal::Signal;
pub use system::TrafficSystem;
pub use types::{
    SignalId, SignalPhase, SyncGroup, ARRIVAL_RATE_DIVISOR, DEFAULT_MAX_GREEN_TIME,
    DEFAULT_MIN_GREEN_TIME, DEPARTURES_PER_TICK, INITIAL_QUEUE_LIMIT, MAX_TRAFFIC_RATE,
    MIN_TRAFFIC_RATE, NEW_VEHICLE_RATE,
};
pub use world::{SimWorld, StrategyRun};
