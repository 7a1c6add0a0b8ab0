// ABOUTME: Persisted resolver records: user mappings, unmapped observations, statistics
// ABOUTME: Serializable record families owned exclusively by the mapping store
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who asserted a user mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MappingSource {
    /// Created explicitly by a user or an operator
    #[default]
    Manual,
    /// Learned from a user correcting a resolution result
    Correction,
    /// Promoted automatically by the system
    AutoLearned,
}

impl MappingSource {
    /// Convert to storage string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Manual => "manual",
            Self::Correction => "correction",
            Self::AutoLearned => "auto_learned",
        }
    }

    /// Parse from storage string representation
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "correction" => Self::Correction,
            "auto_learned" | "auto-learned" => Self::AutoLearned,
            // Default to Manual for unrecognized values
            _ => Self::Manual,
        }
    }
}

/// Durable binding from a normalized query string to a catalog exercise
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserMapping {
    /// Normalized query, unique key
    pub query: String,
    /// Catalog exercise id
    pub exercise_id: String,
    /// Stored confidence, 0.0-1.0
    pub confidence: f64,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last time this mapping won a resolution
    pub last_used_at: DateTime<Utc>,
    /// Number of resolutions this mapping has won
    pub usage_count: u32,
    /// Who asserted the mapping
    pub source: MappingSource,
}

impl UserMapping {
    /// Create an unused mapping; `query` must already be normalized
    pub fn new(
        query: impl Into<String>,
        exercise_id: impl Into<String>,
        confidence: f64,
        source: MappingSource,
    ) -> Self {
        let now = Utc::now();
        Self {
            query: query.into(),
            exercise_id: exercise_id.into(),
            confidence: confidence.clamp(0.0, 1.0),
            created_at: now,
            last_used_at: now,
            usage_count: 0,
            source,
        }
    }

    /// Record a winning resolution
    pub fn touch(&mut self) {
        self.usage_count = self.usage_count.saturating_add(1);
        self.last_used_at = Utc::now();
    }
}

/// A candidate offered next to the primary resolution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alternative {
    /// Catalog exercise id
    pub exercise_id: String,
    /// Candidate confidence, 0.0-1.0
    pub confidence: f64,
    /// Why the candidate was offered
    pub reason: String,
}

/// Aggregated record of a query that could not be resolved confidently
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnmappedObservation {
    /// Normalized query, unique key
    pub query: String,
    /// Number of failed resolutions, at least 1
    pub occurrence_count: u32,
    /// First failure
    pub first_seen_at: DateTime<Utc>,
    /// Most recent failure
    pub last_seen_at: DateTime<Utc>,
    /// Distinct contexts the query was seen in, in arrival order
    #[serde(default)]
    pub contexts: Vec<String>,
    /// Alternatives computed when the observation was first created
    #[serde(default)]
    pub suggested_alternatives: Vec<Alternative>,
}

impl UnmappedObservation {
    /// First sighting of a query
    pub fn first_seen(
        query: impl Into<String>,
        context: Option<&str>,
        suggested_alternatives: Vec<Alternative>,
    ) -> Self {
        let now = Utc::now();
        let mut observation = Self {
            query: query.into(),
            occurrence_count: 1,
            first_seen_at: now,
            last_seen_at: now,
            contexts: Vec::new(),
            suggested_alternatives,
        };
        observation.add_context(context);
        observation
    }

    /// Another failed resolution of the same query
    pub fn record_occurrence(&mut self, context: Option<&str>) {
        self.occurrence_count = self.occurrence_count.saturating_add(1);
        self.last_seen_at = Utc::now();
        self.add_context(context);
    }

    fn add_context(&mut self, context: Option<&str>) {
        let Some(context) = context.map(str::trim).filter(|c| !c.is_empty()) else {
            return;
        };
        if !self.contexts.iter().any(|c| c == context) {
            self.contexts.push(context.to_owned());
        }
    }
}

/// Process-wide resolution statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MappingStatistics {
    /// Every call to resolve
    pub total_attempts: u64,
    /// Resolutions that did not fall back to the generic exercise
    pub successful_matches: u64,
    /// Mappings created from user corrections
    pub user_corrections: u64,
    /// Current number of unmapped observations
    pub unmapped_count: u64,
    /// Last mutation
    pub last_updated_at: DateTime<Utc>,
}

impl Default for MappingStatistics {
    fn default() -> Self {
        Self {
            total_attempts: 0,
            successful_matches: 0,
            user_corrections: 0,
            unmapped_count: 0,
            last_updated_at: Utc::now(),
        }
    }
}

impl MappingStatistics {
    /// Fraction of attempts that resolved without the generic fallback
    #[must_use]
    pub fn success_rate(&self) -> f64 {
        if self.total_attempts == 0 {
            return 0.0;
        }
        self.successful_matches as f64 / self.total_attempts as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mapping_source_round_trip() {
        for source in [
            MappingSource::Manual,
            MappingSource::Correction,
            MappingSource::AutoLearned,
        ] {
            assert_eq!(MappingSource::parse(source.as_str()), source);
        }
        assert_eq!(MappingSource::parse("unknown"), MappingSource::Manual);
    }

    #[test]
    fn test_user_mapping_clamps_confidence() {
        let mapping = UserMapping::new("db row", "dumbbell-row", 1.7, MappingSource::Manual);
        assert!((mapping.confidence - 1.0).abs() < f64::EPSILON);
        let mapping = UserMapping::new("db row", "dumbbell-row", -0.3, MappingSource::Manual);
        assert!(mapping.confidence.abs() < f64::EPSILON);
    }

    #[test]
    fn test_unmapped_contexts_are_distinct() {
        let mut observation = UnmappedObservation::first_seen("zercher", Some("Leg Day"), vec![]);
        observation.record_occurrence(Some("Leg Day"));
        observation.record_occurrence(Some("Upper Body"));
        observation.record_occurrence(None);

        assert_eq!(observation.occurrence_count, 4);
        assert_eq!(observation.contexts, vec!["Leg Day", "Upper Body"]);
    }

    #[test]
    fn test_success_rate_handles_zero_attempts() {
        let mut stats = MappingStatistics::default();
        assert!(stats.success_rate().abs() < f64::EPSILON);
        stats.total_attempts = 4;
        stats.successful_matches = 3;
        assert!((stats.success_rate() - 0.75).abs() < f64::EPSILON);
    }
}
