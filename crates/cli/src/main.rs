#![deny(unsafe_code)]
//! CLI binary for the scrubgen level generator.
//!
//! Subcommands:
//! - `level <index>` — generate one level and print its descriptor
//! - `world <number>` — pre-generate a full world and print a summary
//! - `theme <world>` — print a world's theme name
//! - `show-config` — print the effective configuration

mod error;

use clap::{Parser, Subcommand};
use error::CliError;
use scrubgen_core::GenConfig;
use scrubgen_levels::LevelOrchestrator;
use std::path::PathBuf;
use std::process;
use std::sync::atomic::AtomicBool;

#[derive(Parser)]
#[command(name = "scrubgen", about = "Deterministic level generator CLI")]
struct Cli {
    /// Path to a JSON configuration file; defaults apply when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Enable debug-level generation logging on stderr.
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a single level and print its descriptor.
    Level {
        /// 1-based level index.
        index: u64,
    },
    /// Pre-generate every level of a world and print a summary.
    World {
        /// 1-based world number.
        number: u32,
    },
    /// Print the theme name of a world.
    Theme {
        /// 1-based world number.
        world: u32,
    },
    /// Print the effective configuration after file overrides.
    ShowConfig,
}

/// Loads the configuration, applying the JSON file at `path` over defaults.
fn load_config(path: Option<&PathBuf>) -> Result<GenConfig, CliError> {
    let Some(path) = path else {
        return Ok(GenConfig::default());
    };
    let text = std::fs::read_to_string(path)?;
    let value: serde_json::Value = serde_json::from_str(&text)
        .map_err(|e| CliError::Input(format!("invalid config JSON: {e}")))?;
    Ok(GenConfig::from_json(&value))
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = load_config(cli.config.as_ref())?;

    match cli.command {
        Command::Level { index } => {
            if index == 0 {
                return Err(CliError::Input("level index must be >= 1".into()));
            }
            let orchestrator = LevelOrchestrator::new(&config)?;
            let descriptor = orchestrator.generate(index)?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&*descriptor)?);
            } else {
                let c = descriptor.coordinates;
                println!(
                    "level {index}: world {} ({}), floor {}, room {}",
                    c.world, descriptor.theme, c.floor, c.room
                );
                println!(
                    "  difficulty {:.2}, timer {:.0}s, regrowth {:.3}/s",
                    descriptor.difficulty_multiplier,
                    descriptor.timer_seconds,
                    descriptor.regrowth_rate
                );
                println!(
                    "  hazards ({}): {}",
                    descriptor.hazard_count,
                    descriptor.hazards.join(", ")
                );
                println!(
                    "  solvable: {} (reached {:.1}% clean, {} elegant paths)",
                    descriptor.is_solvable,
                    descriptor.achieved_clean_percentage,
                    descriptor.estimated_elegant_paths
                );
                if descriptor.is_key_level {
                    println!("  key level");
                }
                if descriptor.is_story_level {
                    println!("  story level");
                }
            }
        }
        Command::World { number } => {
            if number == 0 || number > config.total_worlds {
                return Err(CliError::Input(format!(
                    "world must be in 1..={}",
                    config.total_worlds
                )));
            }
            let orchestrator = LevelOrchestrator::new(&config)?;
            let cancel = AtomicBool::new(false);
            let generated = orchestrator.pre_generate_world(number, &cancel)?;

            // Solvability summary over the freshly cached world.
            let first = u64::from(number - 1) * config.levels_per_world() + 1;
            let mut flagged = Vec::new();
            for index in first..first + generated as u64 {
                let descriptor = orchestrator.generate(index)?;
                if !descriptor.is_solvable {
                    flagged.push(index);
                }
            }

            if cli.json {
                let info = serde_json::json!({
                    "world": number,
                    "theme": orchestrator.world_theme(number),
                    "levels_generated": generated,
                    "flagged_unsolvable": flagged,
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!(
                    "world {number} ({}): {generated} levels generated",
                    orchestrator.world_theme(number)
                );
                if flagged.is_empty() {
                    println!("  all levels passed greedy validation");
                } else {
                    println!("  flagged for review: {flagged:?}");
                }
            }
        }
        Command::Theme { world } => {
            let orchestrator = LevelOrchestrator::new(&config)?;
            let theme = orchestrator.world_theme(world);
            if cli.json {
                let info = serde_json::json!({ "world": world, "theme": theme });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("{theme}");
            }
        }
        Command::ShowConfig => {
            config.validate()?;
            if cli.json {
                let info = serde_json::json!({
                    "grid_size": config.grid_size,
                    "floors_per_world": config.floors_per_world,
                    "rooms_per_floor": config.rooms_per_floor,
                    "total_worlds": config.total_worlds,
                    "total_levels": config.total_levels(),
                    "world_themes": config.world_themes,
                    "hazard_catalog": config.hazard_catalog,
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!(
                    "{} worlds x {} floors x {} rooms = {} levels, grid {}x{}",
                    config.total_worlds,
                    config.floors_per_world,
                    config.rooms_per_floor,
                    config.total_levels(),
                    config.grid_size,
                    config.grid_size
                );
                println!("themes: {}", config.world_themes.join(", "));
            }
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
