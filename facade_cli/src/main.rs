//! # Facade Indicator CLI
//!
//! Runs the indicator pipeline over dataset profiles and prints the results
//! as section tables or JSON.
//!
//! ```bash
//! facade analyze --profile DX-02 --set tilt_angle=4.0
//! facade analyze --strict --format json
//! facade history
//! facade seed --output data/system_dataset.json
//! ```

mod render;

use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use facade_core::dataset::{load_or_fallback, save_dataset, seed_dataset, DEFAULT_DATASET_PATH};
use facade_core::equations::generate_equations_markdown;
use facade_core::session::AnalysisSession;
use facade_core::{analyze, calculate, FacadeError, LoadedDataset, Material, ParamName, ParameterSet};

#[derive(Parser, Debug)]
#[command(name = "facade", about = "Facade module indicator engine", version)]
struct Cli {
    /// Dataset file (falls back to built-in profiles when unreadable)
    #[arg(long, short = 'd', global = true, env = "FACADE_DATASET", default_value = DEFAULT_DATASET_PATH)]
    dataset: PathBuf,

    /// Increase log verbosity (-v info, -vv debug); RUST_LOG overrides
    #[arg(long, short = 'v', global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Analyze one profile, optionally with parameter overrides
    Analyze {
        /// Profile id (defaults to the dataset's active profile)
        #[arg(long, short = 'p')]
        profile: Option<String>,

        /// Override a parameter, e.g. `module_width=1.3` or `material=steel`
        #[arg(long = "set", value_name = "NAME=VALUE", value_parser = parse_override)]
        overrides: Vec<Override>,

        /// Reject missing, non-finite or non-positive inputs instead of
        /// propagating NaN
        #[arg(long)]
        strict: bool,

        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Switch through every profile and print the rolling history
    History {
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// List the dataset's profiles
    Profiles,

    /// Write the seed dataset (built-in profiles plus snapshot)
    Seed {
        #[arg(long, short = 'o')]
        output: PathBuf,
    },

    /// Print the formula reference
    Formulas,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

/// A single `--set` override.
#[derive(Clone, Debug, PartialEq)]
enum Override {
    Param(ParamName, f64),
    Material(Material),
}

impl Override {
    fn apply(&self, params: &mut ParameterSet) {
        match self {
            Override::Param(name, value) => params.set(*name, *value),
            Override::Material(material) => params.material = Some(material.clone()),
        }
    }
}

fn parse_override(raw: &str) -> Result<Override, String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{}'", raw))?;
    let (name, value) = (name.trim(), value.trim());

    if name == "material" {
        return value
            .parse::<Material>()
            .map(Override::Material)
            .map_err(|e| e.to_string());
    }

    let param: ParamName = name.parse().map_err(|e: FacadeError| e.to_string())?;
    let value: f64 = value
        .parse()
        .map_err(|_| format!("'{}' is not a number for {}", value, param))?;
    Ok(Override::Param(param, value))
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(cli) {
        eprintln!("Error: {:#}", err);
        if let Some(facade_err) = err.downcast_ref::<FacadeError>() {
            if let Ok(json) = serde_json::to_string_pretty(facade_err) {
                eprintln!();
                eprintln!("Error JSON:");
                eprintln!("{}", json);
            }
        }
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Analyze {
            profile,
            overrides,
            strict,
            format,
        } => cmd_analyze(load_or_fallback(&cli.dataset), profile, &overrides, strict, format),
        Commands::History { format } => cmd_history(load_or_fallback(&cli.dataset), format),
        Commands::Profiles => {
            render::profiles(&load_or_fallback(&cli.dataset));
            Ok(())
        }
        Commands::Seed { output } => {
            let dataset = seed_dataset();
            save_dataset(&dataset, &output)?;
            info!(path = %output.display(), "seed dataset written");
            println!("Dataset generated at: {}", output.display());
            Ok(())
        }
        Commands::Formulas => {
            print!("{}", generate_equations_markdown());
            Ok(())
        }
    }
}

fn cmd_analyze(
    loaded: LoadedDataset,
    profile_id: Option<String>,
    overrides: &[Override],
    strict: bool,
    format: OutputFormat,
) -> Result<()> {
    let dataset = &loaded.dataset;
    let profile = match profile_id {
        Some(id) => dataset
            .profile(&id)
            .ok_or_else(|| FacadeError::profile_not_found(id.as_str()))?,
        None => dataset.active_profile().ok_or(FacadeError::EmptyDataset)?,
    };

    let mut params = profile.parameters.clone();
    for o in overrides {
        o.apply(&mut params);
    }

    let report = if strict {
        calculate(&params).with_context(|| format!("profile {} failed validation", profile.id))?
    } else {
        analyze(&params)
    };

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Table => render::report(profile, &params, &report),
    }
    Ok(())
}

fn cmd_history(loaded: LoadedDataset, format: OutputFormat) -> Result<()> {
    let ids: Vec<String> = loaded.dataset.profiles.iter().map(|p| p.id.clone()).collect();
    let mut session = AnalysisSession::start(loaded)?;
    let started = session.active_profile_id().to_string();
    for id in ids.iter().filter(|id| **id != started) {
        session.select_profile(id)?;
    }

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(session.history())?),
        OutputFormat::Table => render::history(session.origin(), session.history()),
    }
    Ok(())
}
