// ABOUTME: Confidence literals and thresholds for the staged resolution pipeline
// ABOUTME: Hand-tuned values kept exactly as shipped for behavior compatibility
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Upper bound on the confidence reported for a user-mapping hit
pub const USER_MAPPING_CONFIDENCE_CAP: f64 = 0.95;

/// Boost added to a stored user-mapping confidence on every hit
pub const USER_MAPPING_CONFIDENCE_BOOST: f64 = 0.1;

/// Similarity score a match must exceed to be accepted
pub const SIMILARITY_ACCEPT_THRESHOLD: f64 = 0.7;

/// Similarity score above which a match is labelled exact
pub const SIMILARITY_EXACT_THRESHOLD: f64 = 0.9;

/// Similarity score below which a match still needs review
pub const SIMILARITY_REVIEW_THRESHOLD: f64 = 0.85;

/// Confidence of a contextual keyword match
pub const CONTEXTUAL_CONFIDENCE: f64 = 0.6;

/// Confidence of a semantic movement-group match
pub const SEMANTIC_CONFIDENCE: f64 = 0.5;

/// Confidence of a keyword-search alternative
pub const KEYWORD_ALTERNATIVE_CONFIDENCE: f64 = 0.4;

/// Confidence of a popular backfill alternative
pub const POPULAR_ALTERNATIVE_CONFIDENCE: f64 = 0.3;

/// Confidence of the generic fallback
pub const GENERIC_FALLBACK_CONFIDENCE: f64 = 0.2;

/// Confidence stored for a mapping learned from a user correction
pub const CORRECTION_CONFIDENCE: f64 = 0.9;

/// Default confidence of a manually created mapping
pub const MANUAL_MAPPING_CONFIDENCE: f64 = 1.0;

/// Keyword alternatives added in the regular mode
pub const KEYWORD_ALTERNATIVE_LIMIT: usize = 2;

/// Keyword alternatives added in exhaustive mode
pub const EXHAUSTIVE_KEYWORD_ALTERNATIVE_LIMIT: usize = 5;

/// Exhaustive mode backfills popular alternatives below this count
pub const EXHAUSTIVE_MIN_ALTERNATIVES: usize = 3;

/// Tokens of this length or shorter are treated as stop-words
pub const STOP_WORD_MAX_LEN: usize = 2;

/// Tokens shorter than this never take part in movement-group matching
pub const SEMANTIC_MIN_TOKEN_LEN: usize = 2;
