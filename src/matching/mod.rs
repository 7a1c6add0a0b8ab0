// ABOUTME: Read-only matching helpers used by the resolution pipeline
// ABOUTME: Tokenization, alternative generation, and movement-pattern grouping
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Ranked alternative candidates for manual correction
pub mod alternatives;
/// Movement-pattern classification of free text
pub mod semantic;
/// Tokenization and stop-word filtering
pub mod tokens;

pub use alternatives::AlternativeGenerator;
pub use semantic::{MovementGroup, SemanticGrouper, SemanticMatch};
