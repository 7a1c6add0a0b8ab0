// ABOUTME: Pierre exercise CLI - command-line front end to the exercise-name resolver
// ABOUTME: Resolves names, manages user mappings, and exports or imports learned state
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Resolve one exercise name
//! pierre-exercise-cli resolve "db row"
//!
//! # Resolve every line of a workout file
//! pierre-exercise-cli resolve-workout workout.txt --context "upper body day"
//!
//! # Teach the resolver a correction
//! pierre-exercise-cli correct "db row" dumbbell-row
//!
//! # Review what could not be matched
//! pierre-exercise-cli unmapped
//!
//! # Back up and restore learned state
//! pierre-exercise-cli export --output mappings.json
//! pierre-exercise-cli import mappings.json
//! ```

mod commands;

use clap::{Parser, Subcommand};
use pierre_exercise_resolver::{
    config::ResolverConfig,
    errors::{AppError, AppResult},
    logging::LoggingConfig,
    ExerciseResolver,
};
use std::path::PathBuf;
use tracing::debug;

#[derive(Parser)]
#[command(
    name = "pierre-exercise-cli",
    about = "Pierre exercise-name resolver CLI",
    long_about = "Resolve free-text exercise names against the exercise catalog and manage learned mappings."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Database URL override
    #[arg(long, global = true)]
    database_url: Option<String>,

    /// JSON exercise catalog override
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Resolve a single exercise name
    Resolve {
        /// Free-text exercise name
        query: String,

        /// Workout context used for keyword matching
        #[arg(long)]
        context: Option<String>,
    },

    /// Resolve every exercise name found in a workout file
    ResolveWorkout {
        /// Text file with one exercise per line
        file: PathBuf,

        /// Workout context used for keyword matching
        #[arg(long)]
        context: Option<String>,
    },

    /// Create a manual user mapping
    Map {
        /// Free-text exercise name
        query: String,

        /// Catalog exercise id
        exercise_id: String,

        /// Mapping confidence (0.0-1.0)
        #[arg(long, default_value = "1.0")]
        confidence: f64,
    },

    /// Record a correction of a resolution result
    Correct {
        /// Free-text exercise name that was resolved wrongly
        query: String,

        /// Catalog exercise id it should resolve to
        exercise_id: String,
    },

    /// Remove a user mapping
    Unmap {
        /// Free-text exercise name
        query: String,
    },

    /// List user mappings, most used first
    Mappings,

    /// List unmapped names, most frequent first
    Unmapped,

    /// Show resolution statistics
    Stats,

    /// Export learned state as JSON
    Export {
        /// Write to this file instead of stdout
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Import learned state from a JSON export
    Import {
        /// Export document to read
        file: PathBuf,
    },

    /// Delete all learned state
    Clear {
        /// Required confirmation
        #[arg(long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> AppResult<()> {
    let cli = Cli::parse();

    LoggingConfig::for_cli(cli.verbose)
        .init()
        .map_err(|e| AppError::internal(format!("Failed to initialize logging: {e}")))?;

    let mut config = ResolverConfig::from_env()?;
    if let Some(database_url) = cli.database_url {
        config.database_url = database_url;
    }
    if let Some(catalog) = cli.catalog {
        config.catalog_path = Some(catalog);
    }
    debug!(?config, "Starting exercise CLI");

    let resolver = ExerciseResolver::from_config(&config).await?;

    match cli.command {
        Command::Resolve { query, context } => {
            commands::resolve::single(&resolver, &query, context.as_deref()).await?;
        }
        Command::ResolveWorkout { file, context } => {
            commands::resolve::workout(&resolver, &file, context.as_deref()).await?;
        }
        Command::Map {
            query,
            exercise_id,
            confidence,
        } => {
            commands::mapping::create(&resolver, &query, &exercise_id, confidence).await?;
        }
        Command::Correct { query, exercise_id } => {
            commands::mapping::correct(&resolver, &query, &exercise_id).await?;
        }
        Command::Unmap { query } => {
            commands::mapping::remove(&resolver, &query).await?;
        }
        Command::Mappings => commands::mapping::list(&resolver).await?,
        Command::Unmapped => commands::data::unmapped(&resolver).await?,
        Command::Stats => commands::data::stats(&resolver).await?,
        Command::Export { output } => {
            commands::data::export(&resolver, output.as_deref()).await?;
        }
        Command::Import { file } => commands::data::import(&resolver, &file).await?,
        Command::Clear { yes } => commands::data::clear(&resolver, yes).await?,
    }

    resolver.flush().await;
    Ok(())
}
