//! Courier Grid - command-line entry point
//!
//! Runs planner experiments on the preset maps, plans single routes on grid
//! files, and prints or exports maps.

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use courier_grid::core::config::CourierConfig;
use courier_grid::core::error::{CourierError, Result};
use courier_grid::core::types::{Cell, Tick};
use courier_grid::experiment::{self, MapPreset, Scenario};
use courier_grid::planning::{Algorithm, Planner};
use courier_grid::world::{CellType, Grid};

#[derive(Parser, Debug)]
#[command(name = "courier-grid")]
#[command(about = "Compare route planners for a delivery agent on a weighted grid")]
struct Cli {
    /// TOML configuration file; omitted fields keep their defaults
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Seed for the stochastic planners, overrides the config file
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run one delivery on a preset map
    Run {
        #[arg(long, value_enum, default_value = "small")]
        map: MapPreset,

        #[arg(long, value_enum, default_value = "a-star")]
        algorithm: Algorithm,

        /// Write the result as JSON instead of printing a summary
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Run every algorithm on every preset map
    RunAll {
        #[arg(long, default_value = "results.json")]
        output: PathBuf,
    },

    /// Plan a single route on a grid file
    Plan {
        #[arg(long)]
        grid: PathBuf,

        /// Origin as "x,y"
        #[arg(long)]
        from: Cell,

        /// Destination as "x,y"
        #[arg(long)]
        to: Cell,

        #[arg(long, value_enum, default_value = "a-star")]
        algorithm: Algorithm,
    },

    /// Print a map as ASCII
    Show {
        #[command(flatten)]
        source: MapSource,

        /// Time step at which moving obstacles are drawn
        #[arg(long, default_value_t = 0)]
        time: Tick,
    },

    /// Export a preset map in the grid text format
    SaveMap {
        #[arg(long, value_enum)]
        map: MapPreset,

        #[arg(long)]
        output: PathBuf,
    },
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
struct MapSource {
    #[arg(long, value_enum)]
    map: Option<MapPreset>,

    #[arg(long)]
    grid: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("courier_grid=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => CourierConfig::load(path)?,
        None => CourierConfig::default(),
    };
    if cli.seed.is_some() {
        config.planner.seed = cli.seed;
    }
    config.validate()?;

    match cli.command {
        Command::Run {
            map,
            algorithm,
            output,
        } => {
            let result = experiment::run_experiment(map, algorithm, &config)?;
            match output {
                Some(path) => experiment::save_results(&path, &[result])?,
                None => {
                    println!("map:            {}", result.map);
                    println!("algorithm:      {}", result.algorithm);
                    println!("success:        {}", result.success);
                    match result.path_cost {
                        Some(cost) => println!("path cost:      {}", cost),
                        None => println!("path cost:      -"),
                    }
                    println!("fuel remaining: {}", result.fuel_remaining);
                    println!("path length:    {}", result.path_length);
                    println!("nodes expanded: {}", result.nodes_expanded);
                    println!("time:           {:.3} ms", result.time_taken_ms);
                    if let Some(failure) = &result.failure {
                        println!("failure:        {}", failure);
                    }
                }
            }
        }

        Command::RunAll { output } => {
            let results = experiment::run_all(&config)?;
            println!(
                "{:<10} {:<20} {:>7} {:>10} {:>8} {:>10}",
                "map", "algorithm", "success", "cost", "length", "nodes"
            );
            for r in &results {
                let cost = r
                    .path_cost
                    .map(|c| c.to_string())
                    .unwrap_or_else(|| "-".to_string());
                println!(
                    "{:<10} {:<20} {:>7} {:>10} {:>8} {:>10}",
                    r.map.name(),
                    r.algorithm.name(),
                    r.success,
                    cost,
                    r.path_length,
                    r.nodes_expanded
                );
            }
            experiment::save_results(&output, &results)?;
        }

        Command::Plan {
            grid,
            from,
            to,
            algorithm,
        } => {
            let world = load_grid(&grid)?;
            let mut planner = Planner::new(config.planner.clone());
            let result = planner.plan(&world, from, to, algorithm)?;

            match &result.path {
                Some(path) => {
                    let route: Vec<String> = path.iter().map(|c| c.to_string()).collect();
                    println!("{}", route.join(" -> "));
                    println!("cost: {}, nodes expanded: {}", result.cost, result.nodes_expanded);
                    let markers = [(from, CellType::Agent), (to, CellType::Destination)];
                    print!("{}", world.render(config.planner.time_step, &markers));
                }
                None => println!(
                    "no route from {} to {} ({} nodes expanded)",
                    from, to, result.nodes_expanded
                ),
            }
        }

        Command::Show { source, time } => {
            let (grid, markers) = match (source.map, source.grid) {
                (Some(preset), _) => {
                    let scenario = preset.build(config.world.default_ground)?;
                    let markers = scenario_markers(&scenario);
                    (scenario.grid, markers)
                }
                (None, Some(path)) => (load_grid(&path)?, Vec::new()),
                (None, None) => {
                    return Err(CourierError::InvalidConfig(
                        "show needs --map or --grid".into(),
                    ))
                }
            };
            print!("{}", grid.render(time, &markers));
        }

        Command::SaveMap { map, output } => {
            let scenario = map.build(config.world.default_ground)?;
            scenario.grid.save_to_file(&output)?;
            println!(
                "saved {} map to {} (start {}, package {}, drop-off {})",
                map,
                output.display(),
                scenario.start,
                scenario.package,
                scenario.drop_off
            );
        }
    }

    Ok(())
}

fn load_grid(path: &Path) -> Result<Grid> {
    let mut grid = Grid::default();
    grid.load_from_file(path)?;
    Ok(grid)
}

fn scenario_markers(scenario: &Scenario) -> Vec<(Cell, CellType)> {
    vec![
        (scenario.start, CellType::Agent),
        (scenario.package, CellType::Cargo),
        (scenario.drop_off, CellType::Destination),
    ]
}
