//! Conflict graph between signals
//!
//! Two signals conflict when they belong to different sync groups. The
//! relation is kept as an undirected petgraph graph whose node `n` is
//! signal `n`.

use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;

use super::system::TrafficSystem;
use super::types::{SignalId, SyncGroup};

/// Undirected graph of signals that must never be non-red together
#[derive(Debug, Clone, Default)]
pub struct ConflictGraph {
    graph: UnGraph<SignalId, ()>,
}

impl ConflictGraph {
    /// Derive conflicts from a sync-group assignment (one entry per signal)
    pub fn from_sync_groups(groups: &[SyncGroup]) -> Self {
        let mut graph = UnGraph::with_capacity(groups.len(), 0);
        for index in 0..groups.len() {
            graph.add_node(SignalId(index));
        }

        for i in 0..groups.len() {
            for j in (i + 1)..groups.len() {
                if groups[i] != groups[j] {
                    graph.add_edge(NodeIndex::new(i), NodeIndex::new(j), ());
                }
            }
        }

        Self { graph }
    }

    /// Number of conflicting pairs
    pub fn len(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.edge_count() == 0
    }

    pub fn are_conflicting(&self, a: SignalId, b: SignalId) -> bool {
        if a.0 >= self.graph.node_count() || b.0 >= self.graph.node_count() {
            return false;
        }
        self.graph
            .find_edge(NodeIndex::new(a.0), NodeIndex::new(b.0))
            .is_some()
    }

    /// Signals conflicting with `signal_id`, ascending
    pub fn neighbors(&self, signal_id: SignalId) -> Vec<SignalId> {
        if signal_id.0 >= self.graph.node_count() {
            return Vec::new();
        }
        let mut ids: Vec<SignalId> = self
            .graph
            .neighbors(NodeIndex::new(signal_id.0))
            .map(|node| self.graph[node])
            .collect();
        ids.sort();
        ids
    }

    /// Every conflicting pair once, as `(low, high)`, sorted
    pub fn pairs(&self) -> Vec<(SignalId, SignalId)> {
        let mut pairs: Vec<(SignalId, SignalId)> = self
            .graph
            .edge_references()
            .map(|edge| {
                let a = self.graph[edge.source()];
                let b = self.graph[edge.target()];
                (a.min(b), a.max(b))
            })
            .collect();
        pairs.sort();
        pairs
    }
}

/// Conflicting signals of `signal_id` that are currently green or yellow
///
/// An unknown id has no conflicts.
pub fn find_conflicts(signal_id: SignalId, system: &TrafficSystem) -> Vec<SignalId> {
    system
        .conflicts
        .neighbors(signal_id)
        .into_iter()
        .filter(|&other| system.signal(other).is_some_and(|s| s.is_active()))
        .collect()
}
