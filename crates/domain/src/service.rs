use std::collections::BTreeSet;

use log::error;

use crate::{
    Category, Exercise, ExerciseID, HistoryIndex, ReadError, Settings, Workout, WorkoutHistory,
    WorkoutID, WriteError, catalog, generate_workout,
};

/// Complete persisted application state.
#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    pub exercise_library: Vec<Exercise>,
    pub workouts: WorkoutHistory,
    pub settings: Settings,
    pub active_exercises: BTreeSet<ExerciseID>,
}

impl Default for AppState {
    fn default() -> Self {
        let exercise_library = catalog::EXERCISES.clone();
        let active_exercises = exercise_library.iter().map(Exercise::id).collect();
        Self {
            exercise_library,
            workouts: WorkoutHistory::new(),
            settings: Settings::default(),
            active_exercises,
        }
    }
}

impl AppState {
    /// Fills gaps left by data files written before a field existed. An
    /// empty library is seeded from the built-in catalog and an empty
    /// active set enables every library exercise.
    pub fn backfill(&mut self) {
        if self.exercise_library.is_empty() {
            self.exercise_library = catalog::EXERCISES.clone();
        }
        if self.active_exercises.is_empty() {
            self.active_exercises = self.exercise_library.iter().map(Exercise::id).collect();
        }
    }
}

pub trait StateRepository {
    fn load(&self) -> Result<AppState, ReadError>;
    fn save(&self, state: &AppState) -> Result<(), WriteError>;
}

/// Owns the application state and persists it after every mutation.
///
/// Loading falls back to the default state when the repository fails, and
/// saving is best effort; failures are logged but never surface, so a broken
/// data file cannot lock the user out of training.
pub struct Service<R> {
    repository: R,
    state: AppState,
}

impl<R: StateRepository> Service<R> {
    pub fn new(repository: R) -> Self {
        let state = match repository.load() {
            Ok(mut state) => {
                state.backfill();
                state
            }
            Err(err) => {
                error!("failed to load state: {err}");
                AppState::default()
            }
        };
        Self { repository, state }
    }

    #[must_use]
    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn put_workout(&mut self, workout: Workout) {
        self.state.workouts.insert(workout.id, workout);
        self.persist();
    }

    pub fn remove_workout(&mut self, id: WorkoutID) -> Option<Workout> {
        let removed = self.state.workouts.remove(&id);
        if removed.is_some() {
            self.persist();
        }
        removed
    }

    pub fn toggle_exercise_active(&mut self, id: ExerciseID) {
        if !self.state.active_exercises.remove(&id) {
            self.state.active_exercises.insert(id);
        }
        self.persist();
    }

    pub fn put_settings(&mut self, settings: Settings) {
        self.state.settings = settings;
        self.persist();
    }

    pub fn active_exercises(&self) -> impl Iterator<Item = &Exercise> {
        self.state
            .exercise_library
            .iter()
            .filter(|e| self.state.active_exercises.contains(&e.id()))
    }

    /// All workouts, most recent first.
    #[must_use]
    pub fn sorted_workouts(&self) -> Vec<&Workout> {
        let mut workouts = self.state.workouts.values().collect::<Vec<_>>();
        workouts.sort_by(|a, b| b.date.cmp(&a.date));
        workouts
    }

    #[must_use]
    pub fn propose_workout(&self) -> Workout {
        generate_workout(
            &self.state.exercise_library,
            &self.state.workouts,
            &self.state.active_exercises,
        )
    }

    #[must_use]
    pub fn switch_exercise(&self, current: &Exercise) -> Option<&Exercise> {
        let index = HistoryIndex::new(&self.state.workouts);
        crate::switch_exercise(current, &self.state.exercise_library, &index)
    }

    #[must_use]
    pub fn repropose_exercise(
        &self,
        category: Category,
        current_id: ExerciseID,
    ) -> Option<Exercise> {
        let index = HistoryIndex::new(&self.state.workouts);
        crate::repropose_exercise(category, current_id, &index)
    }

    fn persist(&self) {
        if let Err(err) = self.repository.save(&self.state) {
            error!("failed to save state: {err}");
        }
    }
}
