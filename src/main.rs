use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use pax2kgml::kgml::Pathway;
use pax2kgml::model::{PaxClass, PaxModel};
use pax2kgml::resolve::{default_table, load_table, SpeciesResolver, TableMapperFactory};
use pax2kgml::translate::Translator;
use pax2kgml::Config;

#[derive(Parser, Debug)]
#[command(name = "pax2kgml")]
#[command(about = "Translate BioPAX Level 3 pathway models to KEGG KGML graphs")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Translate a model snapshot into fresh KGML pathways
    Translate {
        /// Model snapshot (JSON)
        model: PathBuf,
        /// Write the pathways here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Override the configured default organism (KEGG abbreviation)
        #[arg(long)]
        organism: Option<String>,
    },
    /// Add inferred relations to an existing KGML pathway snapshot
    Augment {
        /// Model snapshot (JSON) to infer relations from
        model: PathBuf,
        /// Existing pathway snapshot (JSON) to augment
        #[arg(long)]
        pathway: PathBuf,
        /// Write the augmented pathway here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print element statistics of a model snapshot
    Inspect {
        /// Model snapshot (JSON)
        model: PathBuf,
    },
}

fn main() -> Result<()> {
    // Initialize logger from environment variable or default to info level
    env_logger::Builder::from_env(env_logger::Env::default().filter_or("RUST_LOG", "info")).init();

    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Command::Translate {
            model,
            output,
            organism,
        } => {
            let model = load_model(&model)?;
            let translator = build_translator(&config, organism.as_deref())?;
            let pathways = translator.translate(&model)?;
            log::info!("translated {} pathway(s)", pathways.len());
            write_output(&pathways, output.as_deref(), config.output.pretty)?;
        }
        Command::Augment {
            model,
            pathway,
            output,
        } => {
            let model = load_model(&model)?;
            let mut target: Pathway = read_json(&pathway)?;
            let translator = build_translator(&config, None)?;
            let stats = translator.augment(&model, &mut target)?;
            log::info!(
                "augmented '{}': {} relations added, {} subtypes merged",
                target.name,
                stats.relations_added,
                stats.subtypes_merged
            );
            write_output(&target, output.as_deref(), config.output.pretty)?;
        }
        Command::Inspect { model } => {
            let model = load_model(&model)?;
            inspect(&model);
        }
    }

    Ok(())
}

/// Assemble the translator from config: species table, default organism and
/// mapping tables.
fn build_translator(config: &Config, organism: Option<&str>) -> Result<Translator> {
    let table = match &config.translate.species_file {
        Some(path) => load_table(path)
            .with_context(|| format!("Failed to load species table: {}", path.display()))?,
        None => default_table(),
    };
    let organism = organism.unwrap_or(&config.translate.default_organism);
    let species = SpeciesResolver::with_default(table, organism)
        .with_context(|| format!("Organism '{}' is not in the species table", organism))?;
    let factory = TableMapperFactory::from_files(
        config.translate.symbol_map.as_deref(),
        config.translate.gene_map.as_deref(),
    )
    .context("Failed to load identifier mapping tables")?;
    Ok(Translator::new(species, Box::new(factory)))
}

fn load_model(path: &Path) -> Result<PaxModel> {
    read_json(path)
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Failed to parse {}", path.display()))
}

fn write_output<T: Serialize>(value: &T, output: Option<&Path>, pretty: bool) -> Result<()> {
    let text = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    match output {
        Some(path) => std::fs::write(path, text)
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => println!("{}", text),
    }
    Ok(())
}

fn inspect(model: &PaxModel) {
    let mut counts: BTreeMap<&'static str, usize> = BTreeMap::new();
    let mut organisms: Vec<String> = Vec::new();
    for (_, element) in model.iter() {
        *counts.entry(element.class.name()).or_insert(0) += 1;
        if let PaxClass::Pathway {
            organism: Some(source),
            ..
        } = &element.class
        {
            if let Some(name) = &source.name {
                if !organisms.contains(name) {
                    organisms.push(name.clone());
                }
            }
        }
    }

    println!("{} elements", model.len());
    for (class, count) in &counts {
        println!("  {:<32} {}", class, count);
    }
    if organisms.is_empty() {
        println!("no declared organisms");
    } else {
        println!("organisms: {}", organisms.join(", "));
    }
}
