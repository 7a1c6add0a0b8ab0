// ABOUTME: Integration tests for the staged exercise-name resolution pipeline
// ABOUTME: Covers stage priority, confidence thresholds, fallback, and statistics counting
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::{create_test_resolver, resolver_with_matcher, ScriptedMatcher};
use pierre_exercise_resolver::models::{MappingSource, MatchType, UserMapping};
use std::sync::Arc;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[tokio::test]
async fn test_exact_alias_resolves_without_review() {
    let (resolver, _) = create_test_resolver();

    let result = resolver.resolve("Bench", None).await;

    assert_eq!(result.exercise_id, "bench-press");
    assert_eq!(result.exercise.id, "bench-press");
    assert_eq!(result.match_type, MatchType::Exact);
    assert!(result.confidence > 0.9);
    assert!(!result.needs_review);
}

#[tokio::test]
async fn test_unknown_name_falls_back_and_is_recorded() {
    let (resolver, _) = create_test_resolver();

    let result = resolver.resolve("zzqx flurb", None).await;

    assert_eq!(result.exercise_id, "push-up");
    assert_eq!(result.match_type, MatchType::Generic);
    assert!(approx(result.confidence, 0.2));
    assert!(result.needs_review);
    assert!(result.alternatives.len() >= 3);
    assert!(result.alternatives.iter().all(|a| a.exercise_id != "push-up"));

    let unmapped = resolver.list_unmapped().await;
    assert_eq!(unmapped.len(), 1);
    assert_eq!(unmapped[0].query, "zzqx flurb");
    assert_eq!(unmapped[0].occurrence_count, 1);
    assert_eq!(unmapped[0].suggested_alternatives, result.alternatives);

    resolver.resolve("ZZQX flurb ", Some("monday")).await;
    let unmapped = resolver.list_unmapped().await;
    assert_eq!(unmapped.len(), 1);
    assert_eq!(unmapped[0].occurrence_count, 2);
    assert_eq!(unmapped[0].contexts, vec!["monday".to_owned()]);
}

#[tokio::test]
async fn test_unknown_movement_falls_back_to_generic() {
    let (resolver, _) = create_test_resolver();

    let result = resolver
        .resolve("some totally unknown movement xyz", None)
        .await;

    assert_eq!(result.match_type, MatchType::Generic);
    assert_eq!(result.exercise_id, "push-up");
    assert!(approx(result.confidence, 0.2));
    assert!(result.needs_review);

    let unmapped = resolver.list_unmapped().await;
    assert_eq!(unmapped.len(), 1);
    assert_eq!(unmapped[0].query, "some totally unknown movement xyz");
    assert_eq!(unmapped[0].occurrence_count, 1);
    assert!(unmapped[0].contexts.is_empty());

    let stats = resolver.get_statistics().await;
    assert_eq!(stats.total_attempts, 1);
    assert_eq!(stats.successful_matches, 0);
    assert_eq!(stats.unmapped_count, 1);
}

#[tokio::test]
async fn test_statistics_count_attempts_and_successes() {
    let (resolver, _) = create_test_resolver();

    resolver.resolve("bench", None).await;
    resolver.resolve("landmine press", None).await;
    resolver.resolve("zzqx flurb", None).await;

    let stats = resolver.get_statistics().await;
    assert_eq!(stats.total_attempts, 3);
    assert_eq!(stats.successful_matches, 2);
    assert_eq!(stats.unmapped_count, 1);
    assert_eq!(stats.user_corrections, 0);
    assert!(approx(stats.success_rate(), 2.0 / 3.0));
}

#[tokio::test]
async fn test_user_mapping_wins_over_similarity() {
    let (resolver, _) = create_test_resolver();
    resolver
        .create_user_mapping("bench", "incline-dumbbell-press", 0.8, MappingSource::Manual)
        .await
        .unwrap();

    let result = resolver.resolve("  BENCH ", None).await;

    assert_eq!(result.exercise_id, "incline-dumbbell-press");
    assert_eq!(result.match_type, MatchType::UserMapping);
    assert!(approx(result.confidence, 0.9));
    assert!(!result.needs_review);
    assert!(result.alternatives.is_empty());
}

#[tokio::test]
async fn test_user_mapping_confidence_is_capped() {
    let (resolver, _) = create_test_resolver();
    resolver
        .create_user_mapping("db row", "dumbbell-row", 1.0, MappingSource::Manual)
        .await
        .unwrap();

    let result = resolver.resolve("db row", None).await;

    assert!(approx(result.confidence, 0.95));
}

#[tokio::test]
async fn test_dangling_user_mapping_falls_through() {
    let (resolver, _) = create_test_resolver();
    resolver
        .mapping_store()
        .upsert_user_mapping(UserMapping::new(
            "bench",
            "retired-exercise",
            1.0,
            MappingSource::Manual,
        ))
        .await;

    let result = resolver.resolve("bench", None).await;

    assert_eq!(result.exercise_id, "bench-press");
    assert_eq!(result.match_type, MatchType::Exact);
}

#[tokio::test]
async fn test_similarity_thresholds() {
    let matcher = ScriptedMatcher::new()
        .with_score("benchy", "bench-press", 0.8)
        .with_score("benchish", "bench-press", 0.88)
        .with_score("bench pres", "bench-press", 0.95)
        .with_score("qqq", "bench-press", 0.7);
    let (resolver, _) = resolver_with_matcher(Arc::new(matcher));

    let fuzzy_review = resolver.resolve("benchy", None).await;
    assert_eq!(fuzzy_review.match_type, MatchType::Fuzzy);
    assert!(approx(fuzzy_review.confidence, 0.8));
    assert!(fuzzy_review.needs_review);

    let fuzzy = resolver.resolve("benchish", None).await;
    assert_eq!(fuzzy.match_type, MatchType::Fuzzy);
    assert!(!fuzzy.needs_review);

    let exact = resolver.resolve("bench pres", None).await;
    assert_eq!(exact.match_type, MatchType::Exact);
    assert!(!exact.needs_review);

    let rejected = resolver.resolve("qqq", None).await;
    assert_eq!(rejected.match_type, MatchType::Generic);
}

#[tokio::test]
async fn test_contextual_match_requires_context() {
    let (resolver, _) = create_test_resolver();

    let with_context = resolver.resolve("zottman", Some("curl day")).await;
    assert_eq!(with_context.exercise_id, "bicep-curl");
    assert_eq!(with_context.match_type, MatchType::Contextual);
    assert!(approx(with_context.confidence, 0.6));
    assert!(with_context.needs_review);

    let without_context = resolver.resolve("zottman", None).await;
    assert_eq!(without_context.match_type, MatchType::Generic);
}

#[tokio::test]
async fn test_semantic_group_default() {
    let (resolver, _) = create_test_resolver();

    let result = resolver.resolve("Landmine Press", None).await;

    assert_eq!(result.exercise_id, "push-up");
    assert_eq!(result.match_type, MatchType::Semantic);
    assert!(approx(result.confidence, 0.5));
    assert!(result.needs_review);
    assert!(result.alternatives.iter().all(|a| a.exercise_id != "push-up"));
    assert!(resolver.list_unmapped().await.is_empty());
}

#[tokio::test]
async fn test_empty_query_resolves_without_recording() {
    let (resolver, _) = create_test_resolver();

    let result = resolver.resolve("", None).await;

    assert_eq!(result.match_type, MatchType::Generic);
    assert_eq!(result.exercise_id, "push-up");
    assert!(resolver.list_unmapped().await.is_empty());
    assert_eq!(resolver.get_statistics().await.total_attempts, 1);
}

#[tokio::test]
async fn test_alternatives_are_ranked_and_distinct() {
    let (resolver, _) = create_test_resolver();

    let result = resolver.resolve("zzqx squat", Some("legs")).await;

    let ids: Vec<&str> = result
        .alternatives
        .iter()
        .map(|a| a.exercise_id.as_str())
        .collect();
    let mut deduped = ids.clone();
    deduped.sort_unstable();
    deduped.dedup();
    assert_eq!(deduped.len(), ids.len());
    assert!(!ids.contains(&result.exercise_id.as_str()));
    assert!(result
        .alternatives
        .windows(2)
        .all(|pair| pair[0].confidence >= pair[1].confidence));
}
