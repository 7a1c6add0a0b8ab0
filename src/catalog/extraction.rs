// ABOUTME: Baseline extraction of candidate exercise names from workout text
// ABOUTME: One candidate per line with bullets, numbering, and set/rep notation stripped
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::ExerciseNameExtractor;
use regex::Regex;
use std::sync::LazyLock;

/// Leading bullets, numbering ("1.", "2)"), and prescriptions written first ("3x10")
static LEADING_NOISE: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(?:[-*•·]+|\d+[.)])?\s*(?:\d+\s*[x×]\s*\d+\s*)?").ok()
});

/// Trailing prescriptions: "3x10", "- 4 sets of 8", ": 30 seconds", "(3 x 12)"
static TRAILING_PRESCRIPTION: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(
        r"(?i)[\s:,(\-–]+\d+(?:\s*[-–]\s*\d+)?\s*(?:x|×|sets?|reps?|rounds?|minutes?|mins?|seconds?|secs?).*$",
    )
    .ok()
});

/// Extracts one candidate per non-empty line
///
/// Lines ending with `:` are treated as section headers ("Warm-up:") and skipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineExtractor;

impl LineExtractor {
    fn clean_line(line: &str) -> Option<String> {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.ends_with(':') {
            return None;
        }

        let mut candidate = trimmed.to_owned();
        if let Some(pattern) = LEADING_NOISE.as_ref() {
            candidate = pattern.replace(&candidate, "").into_owned();
        }
        if let Some(pattern) = TRAILING_PRESCRIPTION.as_ref() {
            candidate = pattern.replace(&candidate, "").into_owned();
        }

        let candidate = candidate.trim().trim_end_matches([':', ',', '-']).trim();
        if candidate.is_empty() {
            None
        } else {
            Some(candidate.to_owned())
        }
    }
}

impl ExerciseNameExtractor for LineExtractor {
    fn extract(&self, text: &str) -> Vec<String> {
        text.lines().filter_map(Self::clean_line).collect()
    }
}
