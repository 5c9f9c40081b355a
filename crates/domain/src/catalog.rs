use std::sync::LazyLock;

use crate::{Category, Equipment, Exercise, MovementType, Name};

struct BaseExercise {
    id: u128,
    name: &'static str,
    movement_type: MovementType,
    categories: &'static [Category],
    tags: &'static [&'static str],
    equipment: &'static [Equipment],
}

/// Built-in exercise library seeded into a fresh application state.
///
/// Identifiers are fixed so the same exercise keeps its history across
/// reinstalls.
pub static EXERCISES: LazyLock<Vec<Exercise>> = LazyLock::new(|| {
    BASE_EXERCISES
        .iter()
        .map(|e| {
            Exercise::new(
                e.id.into(),
                Name::new(e.name).unwrap(),
                e.movement_type,
                e.categories.to_vec(),
                e.tags.iter().map(ToString::to_string).collect(),
                e.equipment.to_vec(),
            )
            .unwrap()
        })
        .collect()
});

static BASE_EXERCISES: [BaseExercise; 7] = [
    BaseExercise {
        id: 1,
        name: "Squat",
        movement_type: MovementType::Compound,
        categories: &[Category::KneeDominant],
        tags: &["squat", "quads", "glutes"],
        equipment: &[Equipment::Barbell, Equipment::Rack],
    },
    BaseExercise {
        id: 2,
        name: "Lunges",
        movement_type: MovementType::Compound,
        categories: &[Category::KneeDominant],
        tags: &["lunge", "quads", "glutes", "unilateral"],
        equipment: &[Equipment::BodyweightOrLoad],
    },
    BaseExercise {
        id: 3,
        name: "Step-Ups",
        movement_type: MovementType::Compound,
        categories: &[Category::KneeDominant],
        tags: &["step_up", "quads", "glutes", "unilateral"],
        equipment: &[Equipment::BodyweightOrLoad, Equipment::Bench],
    },
    BaseExercise {
        id: 4,
        name: "Leg Press",
        movement_type: MovementType::Compound,
        categories: &[Category::KneeDominant],
        tags: &["leg_press", "quads", "glutes"],
        equipment: &[Equipment::Machine],
    },
    BaseExercise {
        id: 5,
        name: "Bulgarian Split Squat",
        movement_type: MovementType::Compound,
        categories: &[Category::KneeDominant],
        tags: &["split_squat", "quads", "glutes", "unilateral"],
        equipment: &[Equipment::BodyweightOrLoad, Equipment::Bench],
    },
    BaseExercise {
        id: 6,
        name: "Deadlift",
        movement_type: MovementType::Compound,
        categories: &[Category::HipDominant],
        tags: &["hinge", "hamstrings", "glutes", "back"],
        equipment: &[Equipment::Barbell],
    },
    BaseExercise {
        id: 7,
        name: "Hip Thrust",
        movement_type: MovementType::Compound,
        categories: &[Category::HipDominant],
        tags: &["hinge", "glutes", "hamstrings"],
        equipment: &[Equipment::Barbell, Equipment::Bench],
    },
];
