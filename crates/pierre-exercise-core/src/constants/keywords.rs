// ABOUTME: Keyword tables for movement-pattern grouping and contextual stop-words
// ABOUTME: Fixed word lists consumed by the semantic grouper and contextual stage
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Pushing movements
pub const PUSH: &[&str] = &[
    "push", "press", "bench", "dip", "chest", "tricep", "shoulder", "fly",
];

/// Pulling movements
pub const PULL: &[&str] = &["pull", "row", "chin", "lat", "curl", "bicep", "back"];

/// Squatting movements
pub const SQUAT: &[&str] = &["squat", "lunge", "leg", "quad", "step", "split"];

/// Hip-hinge movements
pub const HINGE: &[&str] = &[
    "deadlift", "hinge", "swing", "hip", "glute", "hamstring", "rdl", "thrust", "bridge",
];

/// Core and trunk work
pub const CORE: &[&str] = &[
    "plank", "crunch", "sit", "core", "abs", "hollow", "twist", "rollout",
];

/// Conditioning and cardio
pub const CARDIO: &[&str] = &[
    "run", "jog", "sprint", "jump", "burpee", "bike", "cardio", "skip", "climber",
];

/// Filler words dropped before contextual keyword search
pub const CONTEXT_STOP_WORDS: &[&str] = &[
    "the", "and", "for", "with", "set", "rep", "reps", "sets", "workout", "exercise",
];
