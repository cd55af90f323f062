//! A traffic system: the signals of one intersection and their conflicts

use anyhow::{Context, Result};
use log::info;
use rand::Rng;
use std::collections::BTreeMap;

use super::config::SystemConfig;
use super::conflicts::ConflictGraph;
use super::signal::Signal;
use super::types::{SignalId, SignalPhase, SyncGroup, INITIAL_QUEUE_LIMIT};

/// One intersection's signals, driven by a single controller
#[derive(Debug, Clone)]
pub struct TrafficSystem {
    /// Signals in id order
    pub signals: Vec<Signal>,
    /// Sum of vehicles left waiting at non-green signals, over all ticks
    pub total_wait_time: u64,
    pub conflicts: ConflictGraph,
}

impl TrafficSystem {
    /// Build a fresh system with random initial queues
    ///
    /// The lowest sync group starts green, every other signal starts red.
    pub fn initialize<R: Rng>(config: &SystemConfig, rng: &mut R) -> Result<Self> {
        config
            .validate()
            .context("invalid traffic system configuration")?;

        let groups = config.resolved_sync_groups();
        let first_group = groups.iter().min().copied();

        let signals = groups
            .iter()
            .enumerate()
            .map(|(index, &group)| {
                let queue = rng.random_range(0..INITIAL_QUEUE_LIMIT);
                let mut signal = Signal::new(
                    SignalId(index),
                    group,
                    queue,
                    config.min_green_time,
                    config.max_green_time,
                );
                if Some(group) == first_group {
                    signal.turn_green();
                }
                signal
            })
            .collect();

        let system = Self {
            signals,
            total_wait_time: 0,
            conflicts: ConflictGraph::from_sync_groups(&groups),
        };
        info!(
            "Initialized traffic system: {} signals, {} sync groups, {} conflicts",
            system.signal_count(),
            system.sync_groups().len(),
            system.conflicts.len()
        );

        Ok(system)
    }

    pub fn signal(&self, id: SignalId) -> Option<&Signal> {
        self.signals.get(id.0)
    }

    pub fn signal_count(&self) -> usize {
        self.signals.len()
    }

    /// Distinct sync groups, ascending
    pub fn sync_groups(&self) -> Vec<SyncGroup> {
        let mut groups: Vec<SyncGroup> = self.signals.iter().map(|s| s.sync_group).collect();
        groups.sort();
        groups.dedup();
        groups
    }

    /// Sync group of every signal, in id order
    pub fn group_assignment(&self) -> Vec<SyncGroup> {
        self.signals.iter().map(|s| s.sync_group).collect()
    }

    pub fn conflict_pairs(&self) -> Vec<(SignalId, SignalId)> {
        self.conflicts.pairs()
    }

    pub fn total_queue(&self) -> u64 {
        self.signals.iter().map(|s| u64::from(s.queue_length)).sum()
    }

    /// True when all members of each sync group display the same phase
    pub fn groups_in_lockstep(&self) -> bool {
        let mut phases: BTreeMap<SyncGroup, SignalPhase> = BTreeMap::new();
        self.signals.iter().all(|signal| {
            *phases.entry(signal.sync_group).or_insert(signal.phase) == signal.phase
        })
    }

    /// Compact phase string, e.g. `GGRR`
    pub fn phase_string(&self) -> String {
        self.signals.iter().map(|s| s.phase.symbol()).collect()
    }
}
