// ABOUTME: Fixed catalog exercise ids referenced directly by the resolution pipeline
// ABOUTME: Generic fallback, popular backfill alternatives, and movement-group defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Exercise returned by the generic fallback stage
pub const GENERIC_FALLBACK: &str = "push-up";

/// Popular exercises used to backfill exhaustive alternative lists, in priority order
pub const POPULAR: &[&str] = &[
    "push-up",
    "bodyweight-squat",
    "plank",
    "dumbbell-row",
    "lunge",
];

/// Default exercise for the pushing movement group
pub const PUSH_DEFAULT: &str = "push-up";
/// Default exercise for the pulling movement group
pub const PULL_DEFAULT: &str = "pull-up";
/// Default exercise for the squatting movement group
pub const SQUAT_DEFAULT: &str = "bodyweight-squat";
/// Default exercise for the hinging movement group
pub const HINGE_DEFAULT: &str = "deadlift";
/// Default exercise for the core movement group
pub const CORE_DEFAULT: &str = "plank";
/// Default exercise for the cardio movement group
pub const CARDIO_DEFAULT: &str = "jumping-jacks";
