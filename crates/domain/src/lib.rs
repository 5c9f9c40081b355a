#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

pub mod catalog;
pub mod error;
pub mod exercise;
pub mod history;
pub mod proposal;
pub mod service;
pub mod settings;
pub mod workout;

pub use error::{ReadError, StorageError, WriteError};
pub use exercise::{
    Category, CategoryError, Equipment, EquipmentError, Exercise, ExerciseError, ExerciseID,
    MovementType, MovementTypeError, Name, NameError, Property,
};
pub use history::HistoryIndex;
pub use proposal::{
    LogTrace, Trace, WORKOUT_CATEGORIES, generate_workout, generate_workout_traced,
    prescribe_sets, rank_by_last_performance, rank_by_recency_score, recency_scores,
    repropose_exercise, repropose_exercise_traced, select_for_category, switch_exercise,
    switch_exercise_traced,
};
pub use service::{AppState, Service, StateRepository};
pub use settings::Settings;
pub use workout::{
    CompleteSetError, ExerciseWithSets, Performance, Reps, RepsError, Set, Weight, WeightError,
    Workout, WorkoutError, WorkoutHistory, WorkoutID, WorkoutKind, WorkoutKindError,
};
