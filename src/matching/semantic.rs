// ABOUTME: Classifies free-text exercise names into movement-pattern groups
// ABOUTME: Keyword overlap per group with a fixed tie-break order and per-group default exercise
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::tokens::tokenize;
use crate::constants::exercise_ids;
use crate::constants::keywords;
use crate::constants::matching::{SEMANTIC_CONFIDENCE, SEMANTIC_MIN_TOKEN_LEN};
use serde::{Deserialize, Serialize};

/// Movement-pattern group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementGroup {
    /// Presses, push-ups, dips
    Pushing,
    /// Rows, pull-ups, curls
    Pulling,
    /// Squats and lunges
    Squatting,
    /// Deadlifts, swings, hip thrusts
    Hinging,
    /// Planks, crunches, rotations
    Core,
    /// Conditioning
    Cardio,
}

impl MovementGroup {
    /// Every group in tie-break order
    pub const ALL: [Self; 6] = [
        Self::Pushing,
        Self::Pulling,
        Self::Squatting,
        Self::Hinging,
        Self::Core,
        Self::Cardio,
    ];

    /// Keywords that identify the group
    #[must_use]
    pub const fn keywords(&self) -> &'static [&'static str] {
        match self {
            Self::Pushing => keywords::PUSH,
            Self::Pulling => keywords::PULL,
            Self::Squatting => keywords::SQUAT,
            Self::Hinging => keywords::HINGE,
            Self::Core => keywords::CORE,
            Self::Cardio => keywords::CARDIO,
        }
    }

    /// Catalog exercise standing in for the whole group
    #[must_use]
    pub const fn default_exercise_id(&self) -> &'static str {
        match self {
            Self::Pushing => exercise_ids::PUSH_DEFAULT,
            Self::Pulling => exercise_ids::PULL_DEFAULT,
            Self::Squatting => exercise_ids::SQUAT_DEFAULT,
            Self::Hinging => exercise_ids::HINGE_DEFAULT,
            Self::Core => exercise_ids::CORE_DEFAULT,
            Self::Cardio => exercise_ids::CARDIO_DEFAULT,
        }
    }

    /// Stable string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pushing => "pushing",
            Self::Pulling => "pulling",
            Self::Squatting => "squatting",
            Self::Hinging => "hinging",
            Self::Core => "core",
            Self::Cardio => "cardio",
        }
    }

    /// Number of tokens overlapping any keyword (substring match either way)
    fn match_count(self, tokens: &[String]) -> usize {
        tokens
            .iter()
            .filter(|token| {
                self.keywords()
                    .iter()
                    .any(|keyword| token.contains(keyword) || keyword.contains(token.as_str()))
            })
            .count()
    }
}

/// A movement-group classification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SemanticMatch {
    /// Winning group
    pub group: MovementGroup,
    /// The group's default exercise
    pub exercise_id: String,
    /// Fixed semantic confidence
    pub confidence: f64,
    /// Tokens that overlapped the group's keywords
    pub match_count: usize,
}

/// Stateless movement-pattern classifier
#[derive(Debug, Clone, Copy, Default)]
pub struct SemanticGrouper;

impl SemanticGrouper {
    /// Classify `query`; `None` when no group keyword overlaps
    ///
    /// Single-character tokens are ignored: they are substrings of
    /// almost every keyword.
    #[must_use]
    pub fn classify(&self, query: &str) -> Option<SemanticMatch> {
        let tokens: Vec<String> = tokenize(query)
            .into_iter()
            .filter(|token| token.chars().count() >= SEMANTIC_MIN_TOKEN_LEN)
            .collect();
        if tokens.is_empty() {
            return None;
        }

        let mut best: Option<(MovementGroup, usize)> = None;
        for group in MovementGroup::ALL {
            let count = group.match_count(&tokens);
            // Strictly greater keeps the earliest group on ties
            if count > best.map_or(0, |(_, c)| c) {
                best = Some((group, count));
            }
        }

        best.map(|(group, match_count)| SemanticMatch {
            group,
            exercise_id: group.default_exercise_id().to_owned(),
            confidence: SEMANTIC_CONFIDENCE,
            match_count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classifies_by_keyword_overlap() {
        let grouper = SemanticGrouper;
        assert_eq!(
            grouper.classify("Landmine Press").map(|m| m.group),
            Some(MovementGroup::Pushing)
        );
        assert_eq!(
            grouper.classify("zercher squats").map(|m| m.group),
            Some(MovementGroup::Squatting)
        );
        assert_eq!(
            grouper.classify("single leg hip thruster").map(|m| m.group),
            Some(MovementGroup::Hinging)
        );
        assert_eq!(
            grouper.classify("hollow body hold").map(|m| m.exercise_id),
            Some("plank".to_owned())
        );
    }

    #[test]
    fn test_tie_keeps_first_group() {
        // "press" is pushing, "row" is pulling: one hit each
        let hit = SemanticGrouper.classify("press row").unwrap();
        assert_eq!(hit.group, MovementGroup::Pushing);
        assert_eq!(hit.match_count, 1);
    }

    #[test]
    fn test_bidirectional_substring() {
        // keyword "push" contains token "pu"; token "pushes" contains keyword "push"
        assert_eq!(
            SemanticGrouper.classify("pushes").map(|m| m.group),
            Some(MovementGroup::Pushing)
        );
        assert_eq!(
            SemanticGrouper.classify("pu").map(|m| m.group),
            Some(MovementGroup::Pushing)
        );
    }

    #[test]
    fn test_no_overlap_is_none() {
        assert!(SemanticGrouper
            .classify("some totally unknown movement xyz")
            .is_none());
        assert!(SemanticGrouper.classify("").is_none());
        assert!(SemanticGrouper.classify("a b c").is_none());
    }

    #[test]
    fn test_confidence_is_fixed() {
        let hit = SemanticGrouper.classify("burpee broad jump").unwrap();
        assert_eq!(hit.group, MovementGroup::Cardio);
        assert!((hit.confidence - 0.5).abs() < f64::EPSILON);
    }
}
