//! typereg - inspect the component type graph and spawn scenes from manifests

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use typereg::scene::{load_scene, ComponentRegistry, GameObjectRegistry, SceneManifest};
use typereg::{Config, TypeRegistry};

/// Type registry tooling
#[derive(Parser, Debug)]
#[command(name = "typereg", version, about = "Inspect registered types and spawn scenes")]
struct Cli {
    /// TOML config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List every registered type with its parents
    Types {
        /// Print the type graph as JSON
        #[arg(long)]
        json: bool,
        /// List every ancestor instead of the immediate parents
        #[arg(long, conflicts_with = "json")]
        ancestors: bool,
    },
    /// Check whether one type derives from another (exit status 1 if not)
    Check {
        /// Type to test
        type_name: String,
        /// Candidate ancestor
        ancestor: String,
    },
    /// Instantiate every object and component listed in a scene manifest
    Spawn {
        /// Path to a JSON scene manifest
        manifest: PathBuf,
    },
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));

    let (json, plain) = if config.log_json {
        let layer = tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr);
        (Some(layer), None)
    } else {
        let layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);
        (None, Some(layer))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(json)
        .with(plain)
        .init();
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref())?;
    init_tracing(&config);

    // Registering the built-ins populates the global type registry
    let objects = GameObjectRegistry::with_policy(config.duplicate_policy)
        .context("failed to register built-in object types")?;
    let components = ComponentRegistry::with_policy(config.duplicate_policy)
        .context("failed to register built-in components")?;
    let types = TypeRegistry::global();

    match cli.command {
        Command::Types { json, ancestors } => {
            let snapshot = types.snapshot();
            if json {
                println!("{}", serde_json::to_string_pretty(&snapshot)?);
            } else {
                for entry in &snapshot {
                    let constructible =
                        objects.contains(&entry.name) || components.contains(&entry.name);
                    let marker = if constructible { "" } else { " (abstract)" };
                    let related: Vec<String> = if ancestors {
                        types
                            .find(&entry.name)
                            .map(|d| d.ancestors().iter().map(|a| a.name().to_string()).collect())
                            .unwrap_or_default()
                    } else {
                        entry.parents.clone()
                    };

                    if related.is_empty() {
                        println!("{}{}", entry.name, marker);
                    } else {
                        println!("{}{}: {}", entry.name, marker, related.join(", "));
                    }
                }
            }
        }

        Command::Check {
            type_name,
            ancestor,
        } => {
            let Some(descriptor) = types.find(&type_name) else {
                bail!("unknown type: {}", type_name);
            };
            let Some(candidate) = types.find(&ancestor) else {
                bail!("unknown type: {}", ancestor);
            };

            if descriptor.is_subtype_of(&candidate) {
                println!("{} is a subtype of {}", descriptor, candidate);
            } else {
                println!("{} is not a subtype of {}", descriptor, candidate);
                return Ok(ExitCode::FAILURE);
            }
        }

        Command::Spawn { manifest } => {
            let manifest = SceneManifest::from_path(&manifest)?;
            let scene = load_scene(&objects, &components, &manifest)?;

            for object in scene.objects() {
                let names: Vec<&str> =
                    object.components().iter().map(|c| c.type_name()).collect();
                println!(
                    "{} [{}] {}: {}",
                    object.name(),
                    object.id(),
                    object.type_name(),
                    names.join(", ")
                );
            }
            info!(objects = scene.len(), "spawn complete");
        }
    }

    Ok(ExitCode::SUCCESS)
}
