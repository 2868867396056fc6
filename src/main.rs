use clap::Parser;
use tracing_subscriber::EnvFilter;

use xor_evolve::dataset::TrainingSet;
use xor_evolve::experiment::{self, ExperimentConfig};
use xor_evolve::{output, report, viz};

use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "xor-evolve", version)]
#[command(about = "Evolves a feed-forward XOR solver with NEAT")]
struct Cli {
    /// Path to the experiment configuration file (RON).
    #[arg(default_value = "xor.ron")]
    config: PathBuf,
    /// Directory receiving charts and checkpoints. Cleared before the run.
    #[arg(short, long, default_value = "out")]
    out_dir: PathBuf,
    /// Override the configured generation limit.
    #[arg(long)]
    generations: Option<usize>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let mut config = ExperimentConfig::from_path(&cli.config)?;
    if let Some(limit) = cli.generations {
        config.generation_limit = limit;
    }

    let training = TrainingSet::xor();
    output::prepare(&cli.out_dir)?;

    let run_report = experiment::run(&config, &training, &cli.out_dir)?;
    report::print_summary(&run_report, &config);

    viz::plot_fitness(&run_report.history, &cli.out_dir.join("avg_fitness.svg"))?;
    viz::plot_species(&run_report.history, &cli.out_dir.join("speciation.svg"))?;
    viz::write_champion_dot(&run_report.champion, &cli.out_dir.join("winner.dot"))?;
    tracing::info!(out_dir = %cli.out_dir.display(), "charts written");

    Ok(())
}
