use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use derive_more::{Deref, Display, Into};
use thiserror::Error;
use uuid::Uuid;

use crate::{Exercise, ExerciseID, Property};

pub type WorkoutHistory = BTreeMap<WorkoutID, Workout>;

/// A proposed or recorded training session.
///
/// `completed` is true iff every set of every exercise is completed. A
/// workout becomes terminal once [`Workout::finish`] has succeeded; all
/// editing operations reject it from then on. Operations return new values
/// and never mutate caller-owned structures in place.
#[derive(Debug, Clone, PartialEq)]
pub struct Workout {
    pub id: WorkoutID,
    pub date: DateTime<Utc>,
    pub kind: WorkoutKind,
    pub exercises: Vec<ExerciseWithSets>,
    pub completed: bool,
    pub duration: Option<u32>,
    pub notes: Option<String>,
}

impl Workout {
    #[must_use]
    pub fn exercise_ids(&self) -> BTreeSet<ExerciseID> {
        self.exercises
            .iter()
            .map(|e| e.exercise.id())
            .collect::<BTreeSet<_>>()
    }

    #[must_use]
    pub fn all_sets_completed(&self) -> bool {
        self.exercises
            .iter()
            .all(|e| e.sets.iter().all(|s| s.completed()))
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.duration.is_some()
    }

    /// Toggles the completion state of a single set.
    ///
    /// Completion requires positive reps; the set stays pending and the
    /// transition is rejected otherwise. The workout-level `completed` flag
    /// is recomputed on every toggle.
    pub fn with_set_completion(
        &self,
        exercise_index: usize,
        set_index: usize,
        completed: bool,
    ) -> Result<Workout, WorkoutError> {
        let mut workout = self.editable()?;
        let set = workout.set_mut(exercise_index, set_index)?;
        *set = if completed {
            set.complete()?
        } else {
            set.uncomplete()
        };
        workout.completed = workout.all_sets_completed();
        Ok(workout)
    }

    pub fn with_set_values(
        &self,
        exercise_index: usize,
        set_index: usize,
        weight: Weight,
        reps: Reps,
    ) -> Result<Workout, WorkoutError> {
        let mut workout = self.editable()?;
        let set = workout.set_mut(exercise_index, set_index)?;
        *set = Set::new(weight, reps);
        workout.completed = workout.all_sets_completed();
        Ok(workout)
    }

    /// Appends a pending set repeating the values of the exercise's last set.
    pub fn with_added_set(&self, exercise_index: usize) -> Result<Workout, WorkoutError> {
        let mut workout = self.editable()?;
        let exercise = workout
            .exercises
            .get_mut(exercise_index)
            .ok_or(WorkoutError::ExerciseIndex(exercise_index))?;
        let set = exercise
            .sets
            .last()
            .map_or_else(Set::default, |s| Set::new(s.weight(), s.reps()));
        exercise.sets.push(set);
        workout.completed = workout.all_sets_completed();
        Ok(workout)
    }

    /// Removes a set. Every exercise keeps at least one set.
    pub fn with_removed_set(
        &self,
        exercise_index: usize,
        set_index: usize,
    ) -> Result<Workout, WorkoutError> {
        let mut workout = self.editable()?;
        let exercise = workout
            .exercises
            .get_mut(exercise_index)
            .ok_or(WorkoutError::ExerciseIndex(exercise_index))?;
        if set_index >= exercise.sets.len() {
            return Err(WorkoutError::SetIndex(exercise_index, set_index));
        }
        if exercise.sets.len() == 1 {
            return Err(WorkoutError::LastSet);
        }
        exercise.sets.remove(set_index);
        workout.completed = workout.all_sets_completed();
        Ok(workout)
    }

    /// Replaces the exercise reference of one slot, preserving its sets and
    /// the previous-performance snapshot.
    pub fn with_exercise(
        &self,
        exercise_index: usize,
        exercise: Exercise,
    ) -> Result<Workout, WorkoutError> {
        let mut workout = self.editable()?;
        workout
            .exercises
            .get_mut(exercise_index)
            .ok_or(WorkoutError::ExerciseIndex(exercise_index))?
            .exercise = exercise;
        Ok(workout)
    }

    /// Finishes the workout, deriving its duration from the elapsed
    /// wall-clock time since creation.
    ///
    /// Requires every set to be completed; the indices of pending sets are
    /// reported otherwise so the caller can surface a validation signal.
    pub fn finish(&self, now: DateTime<Utc>) -> Result<Workout, WorkoutError> {
        let mut workout = self.editable()?;
        let pending = workout
            .exercises
            .iter()
            .enumerate()
            .flat_map(|(i, e)| {
                e.sets
                    .iter()
                    .enumerate()
                    .filter(|(_, s)| !s.completed())
                    .map(move |(j, _)| (i, j))
            })
            .collect::<Vec<_>>();
        if !pending.is_empty() {
            return Err(WorkoutError::IncompleteSets(pending));
        }
        workout.completed = true;
        workout.duration =
            Some(u32::try_from((now - workout.date).num_minutes().max(0)).unwrap_or(u32::MAX));
        Ok(workout)
    }

    fn editable(&self) -> Result<Workout, WorkoutError> {
        if self.is_finished() {
            return Err(WorkoutError::Finished);
        }
        Ok(self.clone())
    }

    fn set_mut(
        &mut self,
        exercise_index: usize,
        set_index: usize,
    ) -> Result<&mut Set, WorkoutError> {
        self.exercises
            .get_mut(exercise_index)
            .ok_or(WorkoutError::ExerciseIndex(exercise_index))?
            .sets
            .get_mut(set_index)
            .ok_or(WorkoutError::SetIndex(exercise_index, set_index))
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum WorkoutError {
    #[error("Workout is already finished")]
    Finished,
    #[error("No exercise at index {0}")]
    ExerciseIndex(usize),
    #[error("No set at index {1} of exercise {0}")]
    SetIndex(usize, usize),
    #[error("Exercise must keep at least one set")]
    LastSet,
    #[error("{} sets are not completed", .0.len())]
    IncompleteSets(Vec<(usize, usize)>),
    #[error(transparent)]
    CompleteSet(#[from] CompleteSetError),
}

#[derive(Deref, Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct WorkoutID(Uuid);

impl WorkoutID {
    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl From<Uuid> for WorkoutID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for WorkoutID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

/// Informational session tag; not enforced against the exercises chosen.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum WorkoutKind {
    #[default]
    FullBody,
    UpperBody,
    LowerBody,
    Push,
    Pull,
}

impl WorkoutKind {
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            WorkoutKind::FullBody => "fullBody",
            WorkoutKind::UpperBody => "upperBody",
            WorkoutKind::LowerBody => "lowerBody",
            WorkoutKind::Push => "push",
            WorkoutKind::Pull => "pull",
        }
    }
}

impl Property for WorkoutKind {
    fn iter() -> std::slice::Iter<'static, WorkoutKind> {
        static KINDS: [WorkoutKind; 5] = [
            WorkoutKind::FullBody,
            WorkoutKind::UpperBody,
            WorkoutKind::LowerBody,
            WorkoutKind::Push,
            WorkoutKind::Pull,
        ];
        KINDS.iter()
    }

    fn name(self) -> &'static str {
        match self {
            WorkoutKind::FullBody => "Full Body",
            WorkoutKind::UpperBody => "Upper Body",
            WorkoutKind::LowerBody => "Lower Body",
            WorkoutKind::Push => "Push",
            WorkoutKind::Pull => "Pull",
        }
    }
}

impl TryFrom<&str> for WorkoutKind {
    type Error = WorkoutKindError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        WorkoutKind::iter()
            .find(|k| k.tag() == value)
            .copied()
            .ok_or_else(|| WorkoutKindError::UnknownTag(value.to_string()))
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum WorkoutKindError {
    #[error("Unknown workout kind `{0}`")]
    UnknownTag(String),
}

/// One exercise slot of a workout.
///
/// The exercise is a value copy of the catalog entry, so later catalog edits
/// do not retroactively alter past workouts. The previous-performance
/// snapshot is captured at workout-creation time for display and carry-over
/// and is never touched by set edits.
#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseWithSets {
    pub exercise: Exercise,
    pub sets: Vec<Set>,
    pub previous_performance: Option<Performance>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Performance {
    pub date: DateTime<Utc>,
    pub sets: Vec<Set>,
}

/// One performed or prescribed weight × reps unit.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Set {
    weight: Weight,
    reps: Reps,
    completed: bool,
}

impl Set {
    #[must_use]
    pub fn new(weight: Weight, reps: Reps) -> Self {
        Self {
            weight,
            reps,
            completed: false,
        }
    }

    #[must_use]
    pub fn weight(&self) -> Weight {
        self.weight
    }

    #[must_use]
    pub fn reps(&self) -> Reps {
        self.reps
    }

    #[must_use]
    pub fn completed(&self) -> bool {
        self.completed
    }

    pub fn complete(&self) -> Result<Set, CompleteSetError> {
        if u32::from(self.reps) == 0 {
            return Err(CompleteSetError::ZeroReps);
        }
        Ok(Set {
            completed: true,
            ..*self
        })
    }

    #[must_use]
    pub fn uncomplete(&self) -> Set {
        Set {
            completed: false,
            ..*self
        }
    }

    #[must_use]
    pub fn pending_copy(&self) -> Set {
        Set::new(self.weight, self.reps)
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum CompleteSetError {
    #[error("Reps must be positive to complete a set")]
    ZeroReps,
}

#[derive(Debug, Default, Display, Clone, Copy, Into, PartialEq, PartialOrd)]
pub struct Weight(f32);

impl Weight {
    pub fn new(value: f32) -> Result<Self, WeightError> {
        if !(0.0..1000.0).contains(&value) {
            return Err(WeightError::OutOfRange);
        }

        if (value * 10.0 % 1.0).abs() > f32::EPSILON {
            return Err(WeightError::InvalidResolution);
        }

        Ok(Self(value))
    }
}

impl TryFrom<&str> for Weight {
    type Error = WeightError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.parse::<f32>() {
            Ok(parsed_value) => Weight::new(parsed_value),
            Err(_) => Err(WeightError::ParseError),
        }
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum WeightError {
    #[error("Weight must be in the range 0.0 to 999.9 kg")]
    OutOfRange,
    #[error("Weight must be a multiple of 0.1 kg")]
    InvalidResolution,
    #[error("Weight must be a decimal")]
    ParseError,
}

#[derive(Debug, Default, Display, Clone, Copy, Into, PartialEq, Eq, PartialOrd, Ord)]
pub struct Reps(u32);

impl Reps {
    pub fn new(value: u32) -> Result<Self, RepsError> {
        if !(0..1000).contains(&value) {
            return Err(RepsError::OutOfRange);
        }

        Ok(Self(value))
    }
}

impl TryFrom<&str> for Reps {
    type Error = RepsError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.parse::<u32>() {
            Ok(parsed_value) => Reps::new(parsed_value),
            Err(_) => Err(RepsError::ParseError),
        }
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum RepsError {
    #[error("Reps must be in the range 0 to 999")]
    OutOfRange,
    #[error("Reps must be an integer")]
    ParseError,
}
