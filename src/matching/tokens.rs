// ABOUTME: Tokenization and stop-word filtering for free-text exercise names
// ABOUTME: Shared by keyword search, contextual matching, and the semantic grouper
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::keywords::CONTEXT_STOP_WORDS;
use crate::constants::matching::STOP_WORD_MAX_LEN;

/// Lower-cased alphanumeric tokens, in order
#[must_use]
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|token| !token.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Whether a token carries no matching signal
#[must_use]
pub fn is_stop_word(token: &str) -> bool {
    token.chars().count() <= STOP_WORD_MAX_LEN || CONTEXT_STOP_WORDS.contains(&token)
}

/// Distinct non-stop-word tokens of the query followed by those of the context
#[must_use]
pub fn contextual_keywords(query: &str, context: &str) -> Vec<String> {
    let mut keywords: Vec<String> = Vec::new();
    for token in tokenize(query).into_iter().chain(tokenize(context)) {
        if !is_stop_word(&token) && !keywords.contains(&token) {
            keywords.push(token);
        }
    }
    keywords
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_splits_on_punctuation() {
        assert_eq!(tokenize("DB Row (3x10)"), vec!["db", "row", "3x10"]);
        assert_eq!(tokenize("Pull-Up"), vec!["pull", "up"]);
        assert!(tokenize("  ").is_empty());
    }

    #[test]
    fn test_stop_words() {
        assert!(is_stop_word("of"));
        assert!(is_stop_word("reps"));
        assert!(is_stop_word("workout"));
        assert!(!is_stop_word("row"));
    }

    #[test]
    fn test_contextual_keywords_merge_and_dedupe() {
        assert_eq!(
            contextual_keywords("cable fly", "Chest and Shoulders workout, cable day"),
            vec!["cable", "fly", "chest", "shoulders", "day"]
        );
        assert!(contextual_keywords("3 sets", "the workout").is_empty());
    }
}
