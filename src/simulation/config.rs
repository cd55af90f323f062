//! Configuration accepted from the caller
//!
//! Everything here is validated up front so that stepping never has to fail.

use anyhow::{ensure, Result};

use super::controller::ControllerKind;
use super::types::{
    SyncGroup, DEFAULT_MAX_GREEN_TIME, DEFAULT_MIN_GREEN_TIME, MAX_TRAFFIC_RATE, MIN_TRAFFIC_RATE,
};

/// Shape of a single traffic system
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemConfig {
    pub signal_count: usize,
    /// One group per signal; `None` pairs signals up (`[0, 0, 1, 1, ...]`)
    pub sync_groups: Option<Vec<u32>>,
    pub min_green_time: u32,
    pub max_green_time: u32,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self::new(4)
    }
}

impl SystemConfig {
    pub fn new(signal_count: usize) -> Self {
        Self {
            signal_count,
            sync_groups: None,
            min_green_time: DEFAULT_MIN_GREEN_TIME,
            max_green_time: DEFAULT_MAX_GREEN_TIME,
        }
    }

    pub fn with_sync_groups(mut self, sync_groups: Vec<u32>) -> Self {
        self.sync_groups = Some(sync_groups);
        self
    }

    pub fn with_green_bounds(mut self, min_green_time: u32, max_green_time: u32) -> Self {
        self.min_green_time = min_green_time;
        self.max_green_time = max_green_time;
        self
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.signal_count > 0,
            "signal count must be at least 1, got {}",
            self.signal_count
        );
        if let Some(groups) = &self.sync_groups {
            ensure!(
                groups.len() == self.signal_count,
                "sync group assignment has {} entries but there are {} signals",
                groups.len(),
                self.signal_count
            );
        }
        ensure!(
            self.min_green_time <= self.max_green_time,
            "minimum green time {} exceeds maximum green time {}",
            self.min_green_time,
            self.max_green_time
        );
        Ok(())
    }

    /// Group of every signal, in id order
    pub fn resolved_sync_groups(&self) -> Vec<SyncGroup> {
        match &self.sync_groups {
            Some(groups) => groups.iter().map(|&g| SyncGroup(g)).collect(),
            None => (0..self.signal_count)
                .map(|i| SyncGroup((i / 2) as u32))
                .collect(),
        }
    }
}

/// Everything needed to build and drive a `SimWorld`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimConfig {
    pub system: SystemConfig,
    /// Arrival intensity on a 1-10 scale
    pub traffic_rate: u8,
    /// Wall-clock interval between ticks; the core never reads it
    pub tick_interval_ms: u64,
    /// One parallel system is simulated per entry
    pub strategies: Vec<ControllerKind>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            system: SystemConfig::default(),
            traffic_rate: 5,
            tick_interval_ms: 500,
            strategies: vec![ControllerKind::GameTheory, ControllerKind::FixedTiming],
        }
    }
}

impl SimConfig {
    pub fn validate(&self) -> Result<()> {
        self.system.validate()?;
        validate_traffic_rate(self.traffic_rate)?;
        ensure!(
            !self.strategies.is_empty(),
            "at least one control strategy is required"
        );
        Ok(())
    }
}

pub(crate) fn validate_traffic_rate(rate: u8) -> Result<()> {
    ensure!(
        (MIN_TRAFFIC_RATE..=MAX_TRAFFIC_RATE).contains(&rate),
        "traffic rate must be between {} and {}, got {}",
        MIN_TRAFFIC_RATE,
        MAX_TRAFFIC_RATE,
        rate
    );
    Ok(())
}
