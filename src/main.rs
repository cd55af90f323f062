use anyhow::Result;
use clap::Parser;
use intersection_sim::simulation::{SimConfig, SimWorld, SystemConfig};
use log::info;

#[derive(Parser)]
#[command(name = "intersection_sim")]
#[command(about = "Compare adaptive and fixed-timing signal control at one intersection")]
struct Cli {
    /// Number of simulation ticks to run
    #[arg(long, default_value = "200")]
    ticks: u64,

    /// Traffic arrival rate (1-10)
    #[arg(long, default_value = "5")]
    traffic_rate: u8,

    /// Number of signals at the intersection
    #[arg(long, default_value = "4")]
    signals: usize,

    /// Sync group of each signal, e.g. 0,0,1,1 (defaults to pairs)
    #[arg(long, value_delimiter = ',')]
    sync_groups: Option<Vec<u32>>,

    /// Minimum green time in ticks
    #[arg(long, default_value = "5")]
    min_green: u32,

    /// Maximum green time in ticks
    #[arg(long, default_value = "30")]
    max_green: u32,

    /// Seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Wall-clock pause between ticks in milliseconds
    #[arg(long, default_value = "0")]
    interval_ms: u64,

    /// Print a summary every this many ticks (0 disables)
    #[arg(long, default_value = "50")]
    report_every: u64,
}

impl Cli {
    fn sim_config(&self) -> SimConfig {
        let mut system = SystemConfig::new(self.signals)
            .with_green_bounds(self.min_green, self.max_green);
        if let Some(groups) = &self.sync_groups {
            system = system.with_sync_groups(groups.clone());
        }

        SimConfig {
            system,
            traffic_rate: self.traffic_rate,
            tick_interval_ms: self.interval_ms,
            ..SimConfig::default()
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = cli.sim_config();
    let mut world = match cli.seed {
        Some(seed) => SimWorld::new_with_seed(config, seed)?,
        None => SimWorld::new(config)?,
    };

    info!(
        "Running {} ticks at traffic rate {}",
        cli.ticks, cli.traffic_rate
    );
    println!("Initial state:");
    world.print_summary();
    println!();

    for _ in 0..cli.ticks {
        world.tick();

        if cli.report_every > 0 && world.tick % cli.report_every == 0 {
            println!("--- After tick {} ---", world.tick);
            world.print_summary();
            println!();
        }

        if cli.interval_ms > 0 {
            std::thread::sleep(std::time::Duration::from_millis(cli.interval_ms));
        }
    }

    println!("=== SIMULATION COMPLETE ===");
    world.print_summary();
    println!();
    world.metrics().print_table();

    Ok(())
}
