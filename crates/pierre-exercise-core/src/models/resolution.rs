// ABOUTME: Resolution output types returned by the pipeline and the batch adapter
// ABOUTME: MatchType enumerates every pipeline stage; results are never persisted
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::exercise::ExerciseRecord;
use super::mapping::Alternative;
use serde::{Deserialize, Serialize};

/// Pipeline stage that produced a resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchType {
    /// Similarity score above the exact threshold
    Exact,
    /// Similarity score between the accept and exact thresholds
    Fuzzy,
    /// A stored user mapping
    UserMapping,
    /// Keyword search over query and context tokens
    Contextual,
    /// Movement-pattern group default
    Semantic,
    /// Generic fallback exercise
    Generic,
}

impl MatchType {
    /// Stable string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::Fuzzy => "fuzzy",
            Self::UserMapping => "user_mapping",
            Self::Contextual => "contextual",
            Self::Semantic => "semantic",
            Self::Generic => "generic",
        }
    }

    /// Whether the stage counts as a successful match in statistics
    #[must_use]
    pub const fn is_successful(&self) -> bool {
        !matches!(self, Self::Generic)
    }
}

/// Outcome of resolving one free-text exercise name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolutionResult {
    /// Resolved catalog id
    pub exercise_id: String,
    /// Catalog record for `exercise_id`
    pub exercise: ExerciseRecord,
    /// Confidence, 0.0-1.0
    pub confidence: f64,
    /// Stage that produced the result
    pub match_type: MatchType,
    /// Human-readable explanation
    pub match_reason: String,
    /// Ranked secondary candidates
    pub alternatives: Vec<Alternative>,
    /// Whether a human should confirm the match
    pub needs_review: bool,
}

/// Results of resolving every exercise name of one workout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct BatchResolution {
    /// One result per input query, in input order
    pub results: Vec<ResolutionResult>,
    /// True iff any result needs review
    pub needs_review: bool,
}

impl BatchResolution {
    /// Aggregate individual results
    #[must_use]
    pub fn from_results(results: Vec<ResolutionResult>) -> Self {
        let needs_review = results.iter().any(|r| r.needs_review);
        Self {
            results,
            needs_review,
        }
    }

    /// Results that need review
    pub fn pending_review(&self) -> impl Iterator<Item = &ResolutionResult> {
        self.results.iter().filter(|r| r.needs_review)
    }
}
