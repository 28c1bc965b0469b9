//! Simulate one scenario end to end.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use console::style;

use runtime::{Simulation, SimulationReport};
use skill_content::ContentFactory;

/// Simulate a scenario and print a summary
#[derive(Parser)]
pub struct Run {
    /// Content directory holding config.toml, abilities.ron and scenarios/
    #[arg(short, long, value_name = "DIR")]
    data: PathBuf,

    /// Scenario name (file stem under scenarios/)
    #[arg(short, long, value_name = "NAME")]
    scenario: String,

    /// Override the scenario duration in seconds
    #[arg(long, value_name = "N")]
    seconds: Option<f32>,

    /// Override the random seed
    #[arg(long, value_name = "S")]
    seed: Option<u64>,

    /// Print the report as JSON instead of a summary
    #[arg(long)]
    json: bool,
}

impl Run {
    pub fn execute(self) -> Result<()> {
        let factory = ContentFactory::new(&self.data);
        let config = factory.load_config()?;
        let catalog = factory.load_abilities()?;
        let scenario = factory
            .load_scenario(&self.scenario)
            .with_context(|| format!("Failed to load scenario '{}'", self.scenario))?;

        let mut builder = Simulation::builder(Arc::new(catalog))
            .config(config)
            .scenario(&scenario);
        if let Some(seconds) = self.seconds {
            builder = builder.duration(seconds);
        }
        if let Some(seed) = self.seed {
            builder = builder.seed(seed);
        }
        let mut simulation = builder.build()?;
        let report = simulation.run();

        if self.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            print_summary(&report);
        }
        Ok(())
    }
}

fn print_summary(report: &SimulationReport) {
    println!(
        "{}",
        style(format!("=== {} ===", report.scenario)).bold().green()
    );
    println!();

    println!("{}", style("Outcome:").bold().yellow());
    println!("  Elapsed:   {:.2}s ({} steps)", report.elapsed, report.steps);
    let status = if report.player_alive {
        style("alive").green()
    } else {
        style("dead").red()
    };
    println!("  Player:    {} ({:.1} hp)", status, report.player_health);
    println!(
        "  Kills:     {} ({} remaining)",
        report.kills, report.enemies_remaining
    );
    println!("  Bonuses:   {}", report.bonuses_granted);
    println!();

    println!("{}", style("Combat:").bold().yellow());
    println!("  Casts:     {}", report.casts);
    println!(
        "  Replicas:  {} scheduled, {} fired, {} dropped",
        report.replicas_scheduled, report.replicas_fired, report.replicas_dropped
    );
    println!("  Hits:      {}", report.hits);
    println!("  Dealt:     {:.1} (+{:.1} status)", report.damage_dealt, report.status_damage);
    println!("  Taken:     {:.1}", report.damage_taken);
    println!("  Visuals:   {}", report.visuals_spawned);
    println!();

    if report.abilities.is_empty() {
        return;
    }
    println!("{}", style("Abilities:").bold().yellow());
    for ability in &report.abilities {
        println!(
            "  {} {}  dmg x{:.3}  cd {:.2}s  count {}  multicast {:.0}%",
            style(&ability.name).cyan(),
            style(format!("L{}", ability.level)).dim(),
            ability.damage_multiplier,
            ability.cooldown,
            ability.count,
            ability.multicast_chance * 100.0,
        );
    }
}
