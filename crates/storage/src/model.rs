//! Serialized form of the application state.
//!
//! The data file uses camelCase keys and string tags for enumerations.
//! Unknown tags are rejected on load instead of being dropped silently.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use supaset_domain as domain;

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct State {
    pub exercise_library: Vec<Exercise>,
    pub workouts: Vec<Workout>,
    pub settings: Settings,
    pub active_exercises: Vec<Uuid>,
}

impl From<&domain::AppState> for State {
    fn from(value: &domain::AppState) -> Self {
        Self {
            exercise_library: value.exercise_library.iter().map(Exercise::from).collect(),
            workouts: value.workouts.values().map(Workout::from).collect(),
            settings: Settings::from(&value.settings),
            active_exercises: value.active_exercises.iter().map(|id| **id).collect(),
        }
    }
}

impl TryFrom<State> for domain::AppState {
    type Error = StateError;

    fn try_from(value: State) -> Result<Self, Self::Error> {
        Ok(Self {
            exercise_library: value
                .exercise_library
                .into_iter()
                .map(domain::Exercise::try_from)
                .collect::<Result<Vec<domain::Exercise>, ExerciseError>>()?,
            workouts: value
                .workouts
                .into_iter()
                .map(|w| domain::Workout::try_from(w).map(|w| (w.id, w)))
                .collect::<Result<domain::WorkoutHistory, WorkoutError>>()?,
            settings: value.settings.into(),
            active_exercises: value
                .active_exercises
                .into_iter()
                .map(domain::ExerciseID::from)
                .collect(),
        })
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum StateError {
    #[error(transparent)]
    InvalidExercise(#[from] ExerciseError),
    #[error(transparent)]
    InvalidWorkout(#[from] WorkoutError),
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    pub id: Uuid,
    pub name: String,
    pub movement_type: String,
    pub categories: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub equipment: Vec<String>,
}

impl From<&domain::Exercise> for Exercise {
    fn from(value: &domain::Exercise) -> Self {
        Self {
            id: *value.id(),
            name: value.name().to_string(),
            movement_type: value.movement_type().tag().to_string(),
            categories: value
                .categories()
                .iter()
                .map(|c| c.tag().to_string())
                .collect(),
            tags: value.tags().to_vec(),
            equipment: value
                .equipment()
                .iter()
                .map(|e| e.tag().to_string())
                .collect(),
        }
    }
}

impl TryFrom<Exercise> for domain::Exercise {
    type Error = ExerciseError;

    fn try_from(value: Exercise) -> Result<Self, Self::Error> {
        Ok(domain::Exercise::new(
            value.id.into(),
            domain::Name::new(&value.name)?,
            domain::MovementType::try_from(&*value.movement_type)?,
            value
                .categories
                .iter()
                .map(|c| domain::Category::try_from(&**c))
                .collect::<Result<Vec<domain::Category>, domain::CategoryError>>()?,
            value.tags,
            value
                .equipment
                .iter()
                .map(|e| domain::Equipment::try_from(&**e))
                .collect::<Result<Vec<domain::Equipment>, domain::EquipmentError>>()?,
        )?)
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ExerciseError {
    #[error(transparent)]
    InvalidName(#[from] domain::NameError),
    #[error(transparent)]
    InvalidMovementType(#[from] domain::MovementTypeError),
    #[error(transparent)]
    InvalidCategory(#[from] domain::CategoryError),
    #[error(transparent)]
    InvalidEquipment(#[from] domain::EquipmentError),
    #[error(transparent)]
    InvalidExercise(#[from] domain::ExerciseError),
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Workout {
    pub id: Uuid,
    pub date: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: String,
    pub exercises: Vec<ExerciseWithSets>,
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl From<&domain::Workout> for Workout {
    fn from(value: &domain::Workout) -> Self {
        Self {
            id: *value.id,
            date: value.date,
            kind: value.kind.tag().to_string(),
            exercises: value.exercises.iter().map(ExerciseWithSets::from).collect(),
            completed: value.completed,
            duration: value.duration,
            notes: value.notes.clone(),
        }
    }
}

impl TryFrom<Workout> for domain::Workout {
    type Error = WorkoutError;

    fn try_from(value: Workout) -> Result<Self, Self::Error> {
        Ok(Self {
            id: value.id.into(),
            date: value.date,
            kind: domain::WorkoutKind::try_from(&*value.kind)?,
            exercises: value
                .exercises
                .into_iter()
                .map(domain::ExerciseWithSets::try_from)
                .collect::<Result<Vec<domain::ExerciseWithSets>, WorkoutError>>()?,
            completed: value.completed,
            duration: value.duration,
            notes: value.notes,
        })
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum WorkoutError {
    #[error(transparent)]
    InvalidKind(#[from] domain::WorkoutKindError),
    #[error(transparent)]
    InvalidExercise(#[from] ExerciseError),
    #[error(transparent)]
    InvalidSet(#[from] SetError),
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseWithSets {
    pub exercise: Exercise,
    pub sets: Vec<Set>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_performance: Option<Performance>,
}

impl From<&domain::ExerciseWithSets> for ExerciseWithSets {
    fn from(value: &domain::ExerciseWithSets) -> Self {
        Self {
            exercise: Exercise::from(&value.exercise),
            sets: value.sets.iter().map(Set::from).collect(),
            previous_performance: value.previous_performance.as_ref().map(Performance::from),
        }
    }
}

impl TryFrom<ExerciseWithSets> for domain::ExerciseWithSets {
    type Error = WorkoutError;

    fn try_from(value: ExerciseWithSets) -> Result<Self, Self::Error> {
        Ok(Self {
            exercise: value.exercise.try_into()?,
            sets: value
                .sets
                .into_iter()
                .map(domain::Set::try_from)
                .collect::<Result<Vec<domain::Set>, SetError>>()?,
            previous_performance: value
                .previous_performance
                .map(domain::Performance::try_from)
                .transpose()?,
        })
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
pub struct Performance {
    pub date: DateTime<Utc>,
    pub sets: Vec<Set>,
}

impl From<&domain::Performance> for Performance {
    fn from(value: &domain::Performance) -> Self {
        Self {
            date: value.date,
            sets: value.sets.iter().map(Set::from).collect(),
        }
    }
}

impl TryFrom<Performance> for domain::Performance {
    type Error = SetError;

    fn try_from(value: Performance) -> Result<Self, Self::Error> {
        Ok(Self {
            date: value.date,
            sets: value
                .sets
                .into_iter()
                .map(domain::Set::try_from)
                .collect::<Result<Vec<domain::Set>, SetError>>()?,
        })
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Set {
    pub weight: f32,
    pub reps: u32,
    pub completed: bool,
}

impl From<&domain::Set> for Set {
    fn from(value: &domain::Set) -> Self {
        Self {
            weight: value.weight().into(),
            reps: value.reps().into(),
            completed: value.completed(),
        }
    }
}

impl TryFrom<Set> for domain::Set {
    type Error = SetError;

    fn try_from(value: Set) -> Result<Self, Self::Error> {
        let set = domain::Set::new(
            domain::Weight::new(value.weight)?,
            domain::Reps::new(value.reps)?,
        );
        if value.completed {
            Ok(set.complete()?)
        } else {
            Ok(set)
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum SetError {
    #[error(transparent)]
    InvalidWeight(#[from] domain::WeightError),
    #[error(transparent)]
    InvalidReps(#[from] domain::RepsError),
    #[error(transparent)]
    InvalidCompletion(#[from] domain::CompleteSetError),
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub rest_timer: u32,
    pub dark_mode: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self::from(&domain::Settings::default())
    }
}

impl From<&domain::Settings> for Settings {
    fn from(value: &domain::Settings) -> Self {
        Self {
            name: value.name.clone(),
            rest_timer: value.rest_timer,
            dark_mode: value.dark_mode,
        }
    }
}

impl From<Settings> for domain::Settings {
    fn from(value: Settings) -> Self {
        Self {
            name: value.name,
            rest_timer: value.rest_timer,
            dark_mode: value.dark_mode,
        }
    }
}
