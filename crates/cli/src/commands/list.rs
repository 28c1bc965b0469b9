//! Inspect the content of a data directory.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use console::style;

use skill_content::ContentFactory;
use skill_core::AbilityDefinition;

/// List abilities and scenarios in a data directory
#[derive(Parser)]
pub struct List {
    /// Content directory holding abilities.ron and scenarios/
    #[arg(short, long, value_name = "DIR")]
    data: PathBuf,
}

impl List {
    pub fn execute(self) -> Result<()> {
        let factory = ContentFactory::new(&self.data);
        let catalog = factory.load_abilities()?;

        println!(
            "{}",
            style(format!("Abilities ({}):", catalog.len())).bold().yellow()
        );
        for definition in catalog.iter() {
            println!("  {}", describe(definition));
        }

        // Scenarios are optional: a directory may only carry abilities.
        let scenarios_dir = factory.data_dir().join("scenarios");
        if scenarios_dir.is_dir() {
            let scenarios = factory.list_scenarios()?;
            println!();
            println!(
                "{}",
                style(format!("Scenarios ({}):", scenarios.len())).bold().yellow()
            );
            for name in scenarios {
                println!("  {}", name);
            }
        }
        Ok(())
    }
}

fn describe(definition: &AbilityDefinition) -> String {
    let delivery = flag_names(definition.delivery.iter_names().map(|(name, _)| name));
    format!(
        "{:>3} {} dmg {:>5.1}  cd {:>4.2}s  range {:>4.1}  [{}]{}",
        definition.id.0,
        style(format!("{:<14}", definition.name)).cyan(),
        definition.base_damage,
        definition.base_cooldown,
        definition.base_range,
        delivery,
        if definition.traits.is_empty() {
            String::new()
        } else {
            format!(
                " ({})",
                flag_names(definition.traits.iter_names().map(|(name, _)| name))
            )
        },
    )
}

fn flag_names<'a>(names: impl Iterator<Item = &'a str>) -> String {
    let names: Vec<&str> = names.collect();
    if names.is_empty() {
        "-".to_string()
    } else {
        names.join(" | ")
    }
}
