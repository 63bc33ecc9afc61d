//! Negotiation simulator CLI.
//!
//! Plays a baseline strategy against every built-in strategy over one or more
//! scenario files and prints wins and scores per pairing and scenario.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use negotiation_sim_core::{
    run_tournament, MatchConfig, NamedScenario, ScenarioConfig, StrategyKind, TournamentReport,
};

#[derive(Parser)]
#[command(name = "negotiate")]
#[command(version)]
#[command(about = "Bilateral alternating-offer negotiation tournaments")]
struct Cli {
    /// Negotiations per pairing and scenario
    #[arg(long, default_value = "10")]
    rounds: usize,

    /// Random seed
    #[arg(long, default_value = "12345")]
    seed: u64,

    /// Strategy playing side A against the whole field
    #[arg(long, default_value = "opportunist")]
    baseline: StrategyKind,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Scenario files (`.json` or CSV)
    #[arg(required = true)]
    files: Vec<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let scenarios = cli
        .files
        .iter()
        .map(|path| load_scenario(path))
        .collect::<Result<Vec<_>>>()?;
    info!(scenarios = scenarios.len(), baseline = %cli.baseline, "starting tournament");

    let config = MatchConfig {
        rounds: cli.rounds,
        rng_seed: cli.seed,
    };
    let report = run_tournament(config, &scenarios, cli.baseline, &StrategyKind::ALL)
        .context("tournament failed")?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(())
}

fn load_scenario(path: &Path) -> Result<NamedScenario> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let config = if is_json {
        ScenarioConfig::from_json(&text)
    } else {
        ScenarioConfig::from_csv(&text)
    }
    .with_context(|| format!("invalid scenario {}", path.display()))?;

    Ok(NamedScenario::new(path.display().to_string(), config))
}

fn print_report(report: &TournamentReport) {
    for (pairing, per_scenario) in &report.pairings {
        println!("{}", pairing);
        for (scenario, entry) in per_scenario {
            println!("  Scenario: {}", scenario);
            for (round, result) in entry.rounds.iter().enumerate() {
                println!(
                    "    Round {:>3}: {:<10} A: {:>9.3} | B: {:>9.3} ({} iterations)",
                    round,
                    if result.succeeded { "Successful" } else { "Failed" },
                    result.points_a,
                    result.points_b,
                    result.iterations_used
                );
            }
            let summary = &entry.summary;
            println!(
                "    A: {:>3} wins {:>10.3} pts | B: {:>3} wins {:>10.3} pts",
                summary.a.wins, summary.a.score, summary.b.wins, summary.b.score
            );
        }
    }
    println!();
    println!("Total points A: {:.3}", report.total_points_a);
    println!("Total points B: {:.3}", report.total_points_b);
}
