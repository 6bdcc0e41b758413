use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use weekplan::config::{AppConfig, ConfigManager, ScheduleConfig};
use weekplan::data::{write_json, Catalog, PlanExport, PopulationFile};
use weekplan::engines::generation::{
    build_population, ConsoleProgressCallback, EvolutionEngine,
};

#[derive(Parser, Debug)]
#[command(name = "weekplan")]
#[command(about = "Genetic search for a weekly exercise plan")]
struct Args {
    /// Path to a TOML config file
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// RNG seed (overrides config)
    #[arg(long)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a random feasible population to a JSON file
    Generate {
        /// Exercise catalog (JSON array of exercise records)
        #[arg(long)]
        catalog: PathBuf,
        #[arg(short, long)]
        out: PathBuf,
        /// Number of plans (defaults to evolution.population_size)
        #[arg(long)]
        count: Option<usize>,
        /// Draw random day budgets and skill caps instead of the configured ones
        #[arg(long)]
        randomize: bool,
    },
    /// Evolve a population and export the best plan
    Optimize {
        #[arg(long)]
        catalog: PathBuf,
        /// Start from a generated population instead of a fresh one
        #[arg(long)]
        population: Option<PathBuf>,
        #[arg(short, long)]
        out: PathBuf,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let manager = ConfigManager::new();
    if let Some(path) = &args.config {
        manager
            .load_from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?;
    }
    if let Some(seed) = args.seed {
        manager.update(|c| c.evolution.seed = Some(seed))?;
    }
    let config = manager.get()?;

    match args.command {
        Command::Generate {
            catalog,
            out,
            count,
            randomize,
        } => generate(&config, catalog, out, count, randomize),
        Command::Optimize {
            catalog,
            population,
            out,
        } => optimize(config, catalog, population, out),
    }
}

fn generate(
    config: &AppConfig,
    catalog_path: PathBuf,
    out: PathBuf,
    count: Option<usize>,
    randomize: bool,
) -> Result<()> {
    let catalog = Catalog::load_json(&catalog_path)
        .with_context(|| format!("loading catalog {}", catalog_path.display()))?;
    let mut rng = config.evolution.population_rng();

    let schedule = if randomize {
        ScheduleConfig::randomized(config.schedule.expected_values, &mut rng)
    } else {
        config.schedule.clone()
    };
    log::info!("Day budgets: {:?}", schedule.times_available);
    log::info!("Max values: {:?}", schedule.max_values.0);

    let count = count.unwrap_or(config.evolution.population_size);
    let plans = build_population(count, &schedule, &catalog, &mut rng);
    write_json(&PopulationFile::new(&schedule, plans), &out)
        .with_context(|| format!("writing {}", out.display()))?;

    log::info!("Wrote {} plans to {}", count, out.display());
    Ok(())
}

fn optimize(
    config: AppConfig,
    catalog_path: PathBuf,
    population_path: Option<PathBuf>,
    out: PathBuf,
) -> Result<()> {
    let catalog = Arc::new(
        Catalog::load_json(&catalog_path)
            .with_context(|| format!("loading catalog {}", catalog_path.display()))?,
    );
    let mut schedule = config.schedule.clone();

    let initial = match population_path {
        Some(path) => {
            let file = PopulationFile::load(&path)
                .with_context(|| format!("loading population {}", path.display()))?;
            schedule.times_available = file.times_available;
            schedule.max_values = file.max_values;
            file.plans
        }
        None => {
            let mut rng = config.evolution.population_rng();
            build_population(config.evolution.population_size, &schedule, &catalog, &mut rng)
        }
    };

    let callback = ConsoleProgressCallback::new(config.evolution.verbosity);
    let mut engine = EvolutionEngine::for_schedule(config.evolution, &schedule, catalog, initial)?;
    let summary = engine.run(callback)?;

    let export = PlanExport::new(&summary.best_plan, &schedule, Some(summary.best_score));
    write_json(&export, &out).with_context(|| format!("writing {}", out.display()))?;

    log::info!(
        "Best score {} after {} generations ({:?}); plan written to {}",
        summary.best_score,
        summary.generations,
        summary.state,
        out.display()
    );
    Ok(())
}
