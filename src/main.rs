use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};

mod config;

use config::Config;
use wcq_sim::{load_teams, QualificationReport, Simulation, WorldCup};

fn main() -> Result<()> {
    // Initialise tracing / logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::parse();
    config.validate()?;

    let mut book = load_teams(&config.teams)?;
    info!("Loaded {} teams from {}", book.len(), config.teams);

    if let Some((team, conf)) = config.reassignment()? {
        book = book
            .reassign(&team, conf)
            .with_context(|| format!("Cannot move {} to {}", team, conf))?;
        info!("{} now qualifies through {}", team, conf);
    }
    config.check_focus(&book)?;

    let world_cup = WorldCup::new(config.hosts.clone());
    world_cup
        .validate_hosts(&book)
        .context("Invalid host list")?;

    let scope = config.scope;
    let simulation = Simulation::new(config.trials, config.seed).parallel(!config.sequential);
    let tally = simulation.run(|rng| scope.simulate(&book, &world_cup, rng));
    if tally.successful() == 0 {
        anyhow::bail!("All {} trials failed, see the log for details", tally.trials);
    }

    let members = scope.members(&book, &world_cup.hosts);
    let report = QualificationReport::build(&book, &members, &tally, simulation.seed)?;

    if let Some(focus) = &config.focus {
        match report.row(focus) {
            Some(row) => info!(
                "{}: qualifies {:.1}%, playoff {:.1}%",
                focus,
                row.qualify_probability * 100.0,
                row.playoff_probability * 100.0
            ),
            None => warn!("{} does not take part in {} qualifying", focus, scope),
        }
    }

    if config.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report.render_table(config.top));
    }

    Ok(())
}
