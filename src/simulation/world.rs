//! Main simulation world that ties everything together
//!
//! A `SimWorld` runs one traffic system per control strategy side by side.
//! All systems share the tick counter and see exactly the same arrivals, so
//! their metrics are directly comparable.

use anyhow::{Context, Result};
use log::{info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::config::{validate_traffic_rate, SimConfig, SystemConfig};
use super::controller::{Controller, ControllerKind};
use super::metrics::{compute_metrics, SimulationMetrics};
use super::system::TrafficSystem;
use super::types::{ARRIVAL_RATE_DIVISOR, DEPARTURES_PER_TICK, NEW_VEHICLE_RATE};

/// One strategy and the traffic system it controls
#[derive(Debug, Clone)]
pub struct StrategyRun {
    pub controller: Controller,
    pub system: TrafficSystem,
}

impl StrategyRun {
    pub fn kind(&self) -> ControllerKind {
        self.controller.kind()
    }

    /// Apply one tick: arrivals, control, departures, wait bookkeeping
    fn advance(&mut self, arrivals: &[u32]) {
        for (signal, &vehicles) in self.system.signals.iter_mut().zip(arrivals) {
            signal.enqueue(vehicles);
        }

        self.controller.apply(&mut self.system);

        let mut waiting = 0u64;
        for signal in &mut self.system.signals {
            if signal.is_green() {
                signal.discharge(DEPARTURES_PER_TICK);
                signal.green_time_elapsed += 1;
            } else {
                waiting += u64::from(signal.queue_length);
            }
        }
        self.system.total_wait_time += waiting;
    }
}

/// The parallel simulation of every configured strategy
#[derive(Debug, Clone)]
pub struct SimWorld {
    pub runs: Vec<StrategyRun>,

    /// Ticks simulated since the last reset
    pub tick: u64,

    config: SimConfig,

    /// Source of initial queues and arrivals
    rng: StdRng,
}

impl SimWorld {
    fn new_internal(config: SimConfig, mut rng: StdRng) -> Result<Self> {
        config.validate().context("invalid simulation configuration")?;
        let runs = Self::build_runs(&config, &mut rng)?;
        Ok(Self {
            runs,
            tick: 0,
            config,
            rng,
        })
    }

    pub fn new(config: SimConfig) -> Result<Self> {
        Self::new_internal(config, StdRng::from_os_rng())
    }

    /// Create a new SimWorld with a seeded RNG for reproducible simulations
    pub fn new_with_seed(config: SimConfig, seed: u64) -> Result<Self> {
        Self::new_internal(config, StdRng::seed_from_u64(seed))
    }

    /// Create a new SimWorld drawing from the given generator
    pub fn with_rng(config: SimConfig, rng: StdRng) -> Result<Self> {
        Self::new_internal(config, rng)
    }

    fn build_runs(config: &SimConfig, rng: &mut StdRng) -> Result<Vec<StrategyRun>> {
        config
            .strategies
            .iter()
            .map(|&kind| {
                let system = TrafficSystem::initialize(&config.system, rng)
                    .with_context(|| format!("failed to initialize {} system", kind))?;
                Ok(StrategyRun {
                    controller: Controller::new(kind),
                    system,
                })
            })
            .collect()
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn run(&self, kind: ControllerKind) -> Option<&StrategyRun> {
        self.runs.iter().find(|run| run.kind() == kind)
    }

    pub fn system(&self, kind: ControllerKind) -> Option<&TrafficSystem> {
        self.run(kind).map(|run| &run.system)
    }

    /// Vehicles arriving at each signal this tick
    fn draw_arrivals(&mut self) -> Vec<u32> {
        let signal_count = self.config.system.signal_count;
        let probability = f64::from(self.config.traffic_rate) / ARRIVAL_RATE_DIVISOR;
        let rng = &mut self.rng;

        (0..signal_count)
            .map(|_| {
                if rng.random_bool(probability) {
                    rng.random_range(1..=NEW_VEHICLE_RATE)
                } else {
                    0
                }
            })
            .collect()
    }

    /// Advance every system by one tick
    pub fn tick(&mut self) {
        let arrivals = self.draw_arrivals();
        for run in &mut self.runs {
            run.advance(&arrivals);
        }
        self.tick += 1;
    }

    /// The world one tick from now, leaving `self` untouched
    pub fn step(&self) -> SimWorld {
        let mut next = self.clone();
        next.tick();
        next
    }

    pub fn run_ticks(&mut self, ticks: u64) {
        for _ in 0..ticks {
            self.tick();
        }
    }

    /// Discard all systems and rebuild them from the current configuration
    pub fn reset(&mut self) -> Result<()> {
        self.runs = Self::build_runs(&self.config, &mut self.rng)?;
        self.tick = 0;
        info!(
            "Simulation reset: {} strategies, {} signals each",
            self.runs.len(),
            self.config.system.signal_count
        );
        Ok(())
    }

    /// Replace the system shape and reset
    ///
    /// On error the world keeps its previous configuration and state.
    pub fn reconfigure(&mut self, system: SystemConfig) -> Result<()> {
        if let Err(err) = system.validate() {
            warn!("Rejected reconfiguration: {:#}", err);
            return Err(err.context("invalid traffic system configuration"));
        }
        self.config.system = system;
        self.reset()
    }

    /// Assign new sync groups to the existing signals and reset
    pub fn set_sync_groups(&mut self, sync_groups: Vec<u32>) -> Result<()> {
        let system = self.config.system.clone().with_sync_groups(sync_groups);
        self.reconfigure(system)
    }

    pub fn set_traffic_rate(&mut self, rate: u8) -> Result<()> {
        if let Err(err) = validate_traffic_rate(rate) {
            warn!("Rejected traffic rate change: {:#}", err);
            return Err(err);
        }
        self.config.traffic_rate = rate;
        Ok(())
    }

    /// Store the caller's tick interval; the simulation itself ignores it
    pub fn set_tick_interval_ms(&mut self, interval_ms: u64) {
        self.config.tick_interval_ms = interval_ms;
    }

    pub fn metrics(&self) -> SimulationMetrics {
        compute_metrics(self)
    }

    /// Print a summary of the world state
    pub fn print_summary(&self) {
        println!("=== Intersection Simulation Summary ===");
        println!(
            "Tick: {}, Traffic rate: {}/10",
            self.tick, self.config.traffic_rate
        );
        for run in &self.runs {
            println!("--- {} ---", run.kind());
            println!(
                "  Phases: {}  Queues: {:?}",
                run.system.phase_string(),
                run.system
                    .signals
                    .iter()
                    .map(|s| s.queue_length)
                    .collect::<Vec<_>>()
            );
            println!("  Total wait time: {}", run.system.total_wait_time);
            if let Some(state) = run.controller.fixed_timing_state() {
                println!(
                    "  Active group: {} ({:?}, {} ticks left, {} hand-overs)",
                    state.current_green_group, state.phase, state.timer, state.cycle_count
                );
            }
        }
    }
}
