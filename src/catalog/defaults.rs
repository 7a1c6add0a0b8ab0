// ABOUTME: Built-in default exercise catalog covering common strength and cardio movements
// ABOUTME: Guarantees every fixed id the resolution pipeline references is present
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::InMemoryCatalog;
use crate::models::ExerciseRecord;

/// Build the default catalog
#[must_use]
pub fn default_catalog() -> InMemoryCatalog {
    InMemoryCatalog::new(vec![
        // ====================================================================
        // Pushing
        // ====================================================================
        ExerciseRecord::new("push-up", "Push-Up", &["pushup", "push up", "press up", "press-up"])
            .with_muscles(&["chest", "triceps", "shoulders"]),
        ExerciseRecord::new(
            "bench-press",
            "Bench Press",
            &["bench", "barbell bench press", "flat bench", "flat bench press"],
        )
        .with_muscles(&["chest", "triceps"]),
        ExerciseRecord::new(
            "incline-dumbbell-press",
            "Incline Dumbbell Press",
            &["incline db press", "incline press"],
        )
        .with_muscles(&["chest", "shoulders"]),
        ExerciseRecord::new(
            "overhead-press",
            "Overhead Press",
            &["ohp", "military press", "shoulder press", "standing press"],
        )
        .with_muscles(&["shoulders", "triceps"]),
        ExerciseRecord::new("dips", "Dips", &["dip", "parallel bar dip", "chest dip"])
            .with_muscles(&["chest", "triceps"]),
        ExerciseRecord::new(
            "tricep-pushdown",
            "Tricep Pushdown",
            &["cable pushdown", "rope pushdown", "triceps pushdown"],
        )
        .with_muscles(&["triceps"]),
        // ====================================================================
        // Pulling
        // ====================================================================
        ExerciseRecord::new("pull-up", "Pull-Up", &["pullup", "pull up", "chin-up", "chinup"])
            .with_muscles(&["lats", "biceps"]),
        ExerciseRecord::new(
            "dumbbell-row",
            "Dumbbell Row",
            &["one arm dumbbell row", "single arm row", "dumbbell bent over row"],
        )
        .with_muscles(&["lats", "rhomboids"]),
        ExerciseRecord::new(
            "barbell-row",
            "Barbell Row",
            &["bent over row", "bent-over barbell row", "pendlay row"],
        )
        .with_muscles(&["lats", "rhomboids"]),
        ExerciseRecord::new("lat-pulldown", "Lat Pulldown", &["pulldown", "lat pull down"])
            .with_muscles(&["lats"]),
        ExerciseRecord::new(
            "bicep-curl",
            "Bicep Curl",
            &["biceps curl", "dumbbell curl", "db curl", "curl"],
        )
        .with_muscles(&["biceps"]),
        // ====================================================================
        // Squatting
        // ====================================================================
        ExerciseRecord::new(
            "bodyweight-squat",
            "Bodyweight Squat",
            &["air squat", "squat", "bw squat"],
        )
        .with_muscles(&["quadriceps", "glutes"]),
        ExerciseRecord::new(
            "barbell-back-squat",
            "Barbell Back Squat",
            &["back squat", "barbell squat"],
        )
        .with_muscles(&["quadriceps", "glutes"]),
        ExerciseRecord::new("goblet-squat", "Goblet Squat", &["kettlebell goblet squat"])
            .with_muscles(&["quadriceps", "glutes"]),
        ExerciseRecord::new("lunge", "Lunge", &["lunges", "forward lunge", "walking lunge"])
            .with_muscles(&["quadriceps", "glutes"]),
        ExerciseRecord::new(
            "bulgarian-split-squat",
            "Bulgarian Split Squat",
            &["split squat", "rear foot elevated split squat", "bss"],
        )
        .with_muscles(&["quadriceps", "glutes"]),
        ExerciseRecord::new("leg-press", "Leg Press", &["machine leg press"])
            .with_muscles(&["quadriceps"]),
        // ====================================================================
        // Hinging
        // ====================================================================
        ExerciseRecord::new("deadlift", "Deadlift", &["conventional deadlift", "barbell deadlift"])
            .with_muscles(&["hamstrings", "glutes", "lower back"]),
        ExerciseRecord::new(
            "romanian-deadlift",
            "Romanian Deadlift",
            &["rdl", "stiff leg deadlift"],
        )
        .with_muscles(&["hamstrings", "glutes"]),
        ExerciseRecord::new(
            "kettlebell-swing",
            "Kettlebell Swing",
            &["kb swing", "russian swing", "swings"],
        )
        .with_muscles(&["glutes", "hamstrings"]),
        ExerciseRecord::new("hip-thrust", "Hip Thrust", &["barbell hip thrust", "glute bridge"])
            .with_muscles(&["glutes"]),
        // ====================================================================
        // Core
        // ====================================================================
        ExerciseRecord::new("plank", "Plank", &["front plank", "forearm plank"])
            .with_muscles(&["abdominals"]),
        ExerciseRecord::new("crunch", "Crunch", &["crunches", "ab crunch"])
            .with_muscles(&["abdominals"]),
        ExerciseRecord::new("russian-twist", "Russian Twist", &["seated twist"])
            .with_muscles(&["obliques"]),
        ExerciseRecord::new(
            "hanging-leg-raise",
            "Hanging Leg Raise",
            &["leg raise", "hanging knee raise"],
        )
        .with_muscles(&["abdominals", "hip flexors"]),
        // ====================================================================
        // Cardio and conditioning
        // ====================================================================
        ExerciseRecord::new(
            "jumping-jacks",
            "Jumping Jacks",
            &["jumping jack", "star jumps"],
        )
        .with_muscles(&["full body"]),
        ExerciseRecord::new("burpee", "Burpee", &["burpees"]).with_muscles(&["full body"]),
        ExerciseRecord::new(
            "mountain-climber",
            "Mountain Climber",
            &["mountain climbers", "climbers"],
        )
        .with_muscles(&["abdominals", "shoulders"]),
        ExerciseRecord::new("jump-rope", "Jump Rope", &["skipping", "skip rope"])
            .with_muscles(&["calves"]),
        ExerciseRecord::new("running", "Running", &["run", "jog", "jogging", "treadmill run"])
            .with_muscles(&["legs"]),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ExerciseCatalog;
    use crate::constants::exercise_ids;

    #[test]
    fn test_default_catalog_contains_every_fixed_id() {
        let catalog = default_catalog();
        let fixed = [
            exercise_ids::GENERIC_FALLBACK,
            exercise_ids::PUSH_DEFAULT,
            exercise_ids::PULL_DEFAULT,
            exercise_ids::SQUAT_DEFAULT,
            exercise_ids::HINGE_DEFAULT,
            exercise_ids::CORE_DEFAULT,
            exercise_ids::CARDIO_DEFAULT,
        ];
        for id in fixed.iter().chain(exercise_ids::POPULAR) {
            assert!(catalog.contains(id), "missing {id}");
        }
    }
}
