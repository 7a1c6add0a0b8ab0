// ABOUTME: Main library entry point for the Pierre exercise-name resolver
// ABOUTME: Resolves free-text exercise names to catalog exercises and learns from corrections
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Pierre Exercise Resolver
//!
//! Turns free-text exercise names from imported workouts ("db row",
//! "Bench", "3x10 goblet squats") into canonical exercises from a catalog,
//! with a confidence score, a match type, and ranked alternatives.
//!
//! ## Features
//!
//! - **Staged matching**: user mapping, similarity, contextual keywords,
//!   movement-pattern semantics, then a generic fallback
//! - **Learning**: user corrections become mappings that win every later lookup
//! - **Unmapped tracking**: failed lookups are recorded for curation
//! - **Durable state**: SQLite-backed store with export and import
//!
//! ## Architecture
//!
//! - **Catalog**: read-only exercise dictionary and similarity primitive
//! - **Matching**: tokenization, movement groups, alternative generation
//! - **Store**: in-memory authority over learned state, persisted per family
//! - **Resolver**: the pipeline, learning loop, batch adapter, and transfer
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use pierre_exercise_resolver::config::ResolverConfig;
//! use pierre_exercise_resolver::errors::AppResult;
//! use pierre_exercise_resolver::ExerciseResolver;
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     let resolver = ExerciseResolver::from_config(&ResolverConfig::from_env()?).await?;
//!     let result = resolver.resolve("db row", None).await;
//!     println!("{} ({:.2})", result.exercise_id, result.confidence);
//!     Ok(())
//! }
//! ```

pub use pierre_exercise_core::{constants, errors, models};

/// Exercise catalog, similarity primitive, and name extraction
pub mod catalog;

/// Environment-based configuration
pub mod config;

/// Structured logging setup
pub mod logging;

/// Tokenization, movement groups, and alternative generation
pub mod matching;

/// The exercise-name resolution service
pub mod resolver;

/// Durable storage backends for learned state
pub mod storage;

/// Mapping store owning learned state
pub mod store;

pub use resolver::{ExerciseResolver, ImportSummary};
