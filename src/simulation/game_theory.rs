//! Adaptive "game theory" control
//!
//! Each red sync group bids for the green phase with its total queue. A group
//! whose longest wait reaches `MAX_WAIT_TIME` gets a bonus of
//! `max_wait * FAIRNESS_WEIGHT`, which dwarfs any realistic queue bid. The
//! best positive bid wins. This is a greedy selector, not an equilibrium
//! solver.

use log::debug;
use sorted_vec::SortedVec;
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use super::conflicts::find_conflicts;
use super::signal::Signal;
use super::system::TrafficSystem;
use super::types::SyncGroup;

/// Wait (in ticks) after which a group's bid gets the fairness bonus
pub const MAX_WAIT_TIME: u32 = 20;

/// Bonus multiplier applied to the longest wait of a starved group
pub const FAIRNESS_WEIGHT: u64 = 100;

/// Ticks a group stays yellow after leaving green
pub const YELLOW_TIME: u32 = 3;

/// Queue at or below which a green group may give up its phase early
pub const LOW_QUEUE_THRESHOLD: u32 = 2;

/// A sync group's claim on the next green phase
#[derive(Debug, Clone, Copy)]
pub struct GroupBid {
    pub sync_group: SyncGroup,
    pub score: u64,
    pub total_queue: u64,
    pub max_wait_time: u32,
}

impl GroupBid {
    fn from_members(sync_group: SyncGroup, members: &[&Signal]) -> Self {
        let total_queue: u64 = members.iter().map(|s| u64::from(s.queue_length)).sum();
        let max_wait_time = members.iter().map(|s| s.wait_time).max().unwrap_or(0);
        let fairness_bonus = if max_wait_time >= MAX_WAIT_TIME {
            u64::from(max_wait_time) * FAIRNESS_WEIGHT
        } else {
            0
        };

        Self {
            sync_group,
            score: total_queue + fairness_bonus,
            total_queue,
            max_wait_time,
        }
    }
}

// Highest score first, lowest group id on ties
impl Ord for GroupBid {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .score
            .cmp(&self.score)
            .then_with(|| self.sync_group.cmp(&other.sync_group))
    }
}

impl PartialOrd for GroupBid {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for GroupBid {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for GroupBid {}

/// Bids of every red group that could turn green right now, best first
///
/// Groups with a yellow member, and groups with any member conflicting with
/// a green or yellow signal, do not bid.
pub fn rank_groups(system: &TrafficSystem) -> SortedVec<GroupBid> {
    let yellow_groups: BTreeSet<SyncGroup> = system
        .signals
        .iter()
        .filter(|s| s.is_yellow())
        .map(|s| s.sync_group)
        .collect();

    let mut candidates: BTreeMap<SyncGroup, Vec<&Signal>> = BTreeMap::new();
    for signal in &system.signals {
        if signal.is_red() && !yellow_groups.contains(&signal.sync_group) {
            candidates.entry(signal.sync_group).or_default().push(signal);
        }
    }

    let bids = candidates
        .into_iter()
        .filter(|(_, members)| {
            members
                .iter()
                .all(|signal| find_conflicts(signal.id, system).is_empty())
        })
        .map(|(group, members)| GroupBid::from_members(group, &members))
        .collect();

    SortedVec::from_unsorted(bids)
}

/// Count down yellow signals, turning them red once their time is up
fn expire_yellows(system: &mut TrafficSystem) {
    for signal in system.signals.iter_mut().filter(|s| s.is_yellow()) {
        if signal.yellow_time_remaining > 1 {
            signal.yellow_time_remaining -= 1;
        } else {
            signal.turn_red();
        }
    }
}

/// Move to yellow every group with a green signal that has served long enough
fn end_green_phases(system: &mut TrafficSystem) {
    let finished: BTreeSet<SyncGroup> = system
        .signals
        .iter()
        .filter(|s| {
            s.is_green()
                && s.green_time_elapsed >= s.min_green_time
                && (s.queue_length <= LOW_QUEUE_THRESHOLD
                    || s.green_time_elapsed >= s.max_green_time)
        })
        .map(|s| s.sync_group)
        .collect();

    for group in &finished {
        debug!("Game theory: group {} turning yellow", group);
    }

    for signal in &mut system.signals {
        if signal.is_green() && finished.contains(&signal.sync_group) {
            signal.turn_yellow(YELLOW_TIME);
        }
    }
}

/// Run one tick of game-theory control
///
/// Every signal still red when the tick ends ages by one tick of wait,
/// whether or not a group was selected.
pub fn game_theory_control(system: &mut TrafficSystem) {
    expire_yellows(system);
    end_green_phases(system);

    let ranking = rank_groups(system);
    let winner = ranking.first().filter(|bid| bid.score > 0).copied();

    if let Some(bid) = winner {
        debug!(
            "Game theory: group {} selected (score {}, queue {}, max wait {})",
            bid.sync_group, bid.score, bid.total_queue, bid.max_wait_time
        );
        for signal in &mut system.signals {
            if signal.sync_group == bid.sync_group && signal.is_red() {
                signal.turn_green();
            }
        }
    }

    for signal in system.signals.iter_mut().filter(|s| s.is_red()) {
        signal.wait_time += 1;
    }

    debug_assert!(system.groups_in_lockstep());
}
