use chrono::{DateTime, Utc};

use crate::{ExerciseID, Performance, Workout, WorkoutHistory};

/// Recency and frequency queries over a workout history.
///
/// Only completed workouts are considered. The index sorts them
/// most-recent-first on construction, so callers cannot depend on the
/// iteration order of the underlying mapping.
pub struct HistoryIndex<'a> {
    completed: Vec<&'a Workout>,
}

impl<'a> HistoryIndex<'a> {
    #[must_use]
    pub fn new(history: &'a WorkoutHistory) -> Self {
        let mut completed = history
            .values()
            .filter(|w| w.completed)
            .collect::<Vec<_>>();
        completed.sort_by(|a, b| b.date.cmp(&a.date));
        Self { completed }
    }

    /// Completed workouts, most recent first.
    pub fn completed(&self) -> impl Iterator<Item = &'a Workout> + '_ {
        self.completed.iter().copied()
    }

    /// Date and sets of the most recent completed workout containing the
    /// exercise.
    #[must_use]
    pub fn last_performance_of(&self, exercise_id: ExerciseID) -> Option<Performance> {
        self.completed.iter().find_map(|w| {
            w.exercises
                .iter()
                .find(|e| e.exercise.id() == exercise_id)
                .map(|e| Performance {
                    date: w.date,
                    sets: e.sets.clone(),
                })
        })
    }

    #[must_use]
    pub fn last_performed(&self, exercise_id: ExerciseID) -> Option<DateTime<Utc>> {
        self.completed
            .iter()
            .find(|w| w.exercises.iter().any(|e| e.exercise.id() == exercise_id))
            .map(|w| w.date)
    }

    /// Occurrences across all completed workouts. An exercise appearing
    /// twice in one workout counts twice.
    #[must_use]
    pub fn times_performed(&self, exercise_id: ExerciseID) -> usize {
        self.completed
            .iter()
            .map(|w| {
                w.exercises
                    .iter()
                    .filter(|e| e.exercise.id() == exercise_id)
                    .count()
            })
            .sum()
    }

    /// Elapsed whole days since the most recent performance, rounded up.
    /// Zero if the exercise was never performed.
    #[must_use]
    pub fn days_since_last_performed(&self, exercise_id: ExerciseID) -> u32 {
        self.last_performed(exercise_id).map_or(0, |date| {
            let seconds = (Utc::now() - date).num_seconds().max(0);
            u32::try_from((seconds + 86_399) / 86_400).unwrap_or(u32::MAX)
        })
    }
}
