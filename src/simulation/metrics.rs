//! Comparable summary statistics for each strategy

use super::controller::ControllerKind;
use super::system::TrafficSystem;
use super::world::SimWorld;

/// Summary of one strategy's traffic system
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StrategyMetrics {
    pub total_wait_time: u64,
    /// Mean queue over all signals right now (not a running average)
    pub avg_queue_length: f64,
}

impl StrategyMetrics {
    pub fn from_system(system: &TrafficSystem) -> Self {
        let avg_queue_length = if system.signals.is_empty() {
            0.0
        } else {
            system.total_queue() as f64 / system.signal_count() as f64
        };

        Self {
            total_wait_time: system.total_wait_time,
            avg_queue_length,
        }
    }
}

/// Metrics of every strategy in a world, in run order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SimulationMetrics {
    pub tick: u64,
    pub strategies: Vec<(ControllerKind, StrategyMetrics)>,
}

impl SimulationMetrics {
    pub fn get(&self, kind: ControllerKind) -> Option<&StrategyMetrics> {
        self.strategies
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, metrics)| metrics)
    }

    /// Wait time saved by game theory control relative to fixed timing, in percent
    pub fn wait_time_improvement(&self) -> f64 {
        self.compare(|m| m.total_wait_time as f64)
    }

    /// Queue reduction of game theory control relative to fixed timing, in percent
    pub fn queue_improvement(&self) -> f64 {
        self.compare(|m| m.avg_queue_length)
    }

    fn compare(&self, value: impl Fn(&StrategyMetrics) -> f64) -> f64 {
        match (
            self.get(ControllerKind::FixedTiming),
            self.get(ControllerKind::GameTheory),
        ) {
            (Some(baseline), Some(candidate)) => {
                improvement_percentage(value(baseline), value(candidate))
            }
            _ => 0.0,
        }
    }

    /// Print a comparison table
    pub fn print_table(&self) {
        println!("{:<16} {:>16} {:>16}", "Strategy", "Total wait", "Avg queue");
        for (kind, metrics) in &self.strategies {
            println!(
                "{:<16} {:>16} {:>16.1}",
                kind.to_string(),
                metrics.total_wait_time,
                metrics.avg_queue_length
            );
        }
        println!("Wait time improvement: {:.1}%", self.wait_time_improvement());
        println!("Queue improvement: {:.1}%", self.queue_improvement());
    }
}

/// Relative gain of `candidate` over `baseline` in percent, 0 when baseline is 0
pub fn improvement_percentage(baseline: f64, candidate: f64) -> f64 {
    if baseline > 0.0 {
        (baseline - candidate) / baseline * 100.0
    } else {
        0.0
    }
}

/// Summarize every strategy's system in `world`
pub fn compute_metrics(world: &SimWorld) -> SimulationMetrics {
    SimulationMetrics {
        tick: world.tick,
        strategies: world
            .runs
            .iter()
            .map(|run| (run.kind(), StrategyMetrics::from_system(&run.system)))
            .collect(),
    }
}
