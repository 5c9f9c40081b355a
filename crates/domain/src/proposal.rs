use std::collections::{BTreeMap, BTreeSet};

use chrono::Utc;
use log::debug;
use uuid::Uuid;

use crate::{
    Category, Exercise, ExerciseID, ExerciseWithSets, HistoryIndex, Performance, Property, Reps,
    Set, Weight, Workout, WorkoutHistory, WorkoutKind,
};

/// Category slots filled by a generated workout, in order.
pub const WORKOUT_CATEGORIES: [Category; 2] = [Category::KneeDominant, Category::HipDominant];

/// Default prescription for an exercise without recorded history.
const DEFAULT_SET_COUNT: usize = 3;
const DEFAULT_REPS: u32 = 10;

/// Number of most recent completed workouts that influence the weighted
/// recency score. Older workouts contribute nothing.
const RECENCY_WINDOW: u32 = 10;

/// Observer of engine decision points. All methods default to no-ops.
pub trait Trace {
    fn exercise_selected(&self, _category: Category, _exercise: &Exercise) {}
    fn category_skipped(&self, _category: Category) {}
    fn exercise_switched(&self, _from: &Exercise, _to: &Exercise) {}
    fn exercise_reproposed(&self, _from: ExerciseID, _to: &Exercise) {}
}

/// Forwards engine decisions to the log facade.
pub struct LogTrace;

impl Trace for LogTrace {
    fn exercise_selected(&self, category: Category, exercise: &Exercise) {
        debug!("selected {} for {}", exercise.name(), category.name());
    }

    fn category_skipped(&self, category: Category) {
        debug!("no eligible exercise for {}", category.name());
    }

    fn exercise_switched(&self, from: &Exercise, to: &Exercise) {
        debug!("switched {} to {}", from.name(), to.name());
    }

    fn exercise_reproposed(&self, from: ExerciseID, to: &Exercise) {
        debug!("reproposed {} for {}", to.name(), *from);
    }
}

/// Weighted recency score per exercise.
///
/// Every occurrence in the k-th most recent completed workout accrues
/// `RECENCY_WINDOW - k` points; unseen exercises accrue none. A lower score
/// means less recently or less frequently trained.
#[must_use]
pub fn recency_scores(index: &HistoryIndex) -> BTreeMap<ExerciseID, u32> {
    let mut scores = BTreeMap::new();
    for (k, workout) in index.completed().enumerate() {
        let points = RECENCY_WINDOW.saturating_sub(u32::try_from(k).unwrap_or(u32::MAX));
        if points == 0 {
            break;
        }
        for slot in &workout.exercises {
            *scores.entry(slot.exercise.id()).or_insert(0) += points;
        }
    }
    scores
}

/// Candidates ordered from most overdue to least overdue by weighted
/// recency score. Ties keep the input order.
#[must_use]
pub fn rank_by_recency_score<'a>(
    candidates: impl Iterator<Item = &'a Exercise>,
    index: &HistoryIndex,
) -> Vec<&'a Exercise> {
    let scores = recency_scores(index);
    let mut ranked = candidates.collect::<Vec<_>>();
    ranked.sort_by_key(|e| scores.get(&e.id()).copied().unwrap_or(0));
    ranked
}

/// Candidates ordered ascending by last performance date. Exercises without
/// a recorded performance come first. Ties keep the input order.
#[must_use]
pub fn rank_by_last_performance<'a>(
    candidates: impl Iterator<Item = &'a Exercise>,
    index: &HistoryIndex,
) -> Vec<&'a Exercise> {
    let mut ranked = candidates.collect::<Vec<_>>();
    ranked.sort_by_key(|e| index.last_performed(e.id()));
    ranked
}

/// The most overdue exercise of a category among the active exercises, or
/// `None` if the category has no eligible candidates.
#[must_use]
pub fn select_for_category<'a>(
    library: &'a [Exercise],
    active: &BTreeSet<ExerciseID>,
    category: Category,
    index: &HistoryIndex,
) -> Option<&'a Exercise> {
    let candidates = library
        .iter()
        .filter(|e| e.in_category(category) && active.contains(&e.id()));
    rank_by_last_performance(candidates, index).first().copied()
}

/// Initial set prescription for an exercise, along with the untouched
/// previous-performance snapshot.
///
/// The last completed performance is repeated with completion reset;
/// without one, the default prescription applies.
#[must_use]
pub fn prescribe_sets(
    exercise_id: ExerciseID,
    index: &HistoryIndex,
) -> (Vec<Set>, Option<Performance>) {
    let previous = index.last_performance_of(exercise_id);
    let sets = match &previous {
        Some(performance) if !performance.sets.is_empty() => {
            performance.sets.iter().map(Set::pending_copy).collect()
        }
        _ => vec![default_set(); DEFAULT_SET_COUNT],
    };
    (sets, previous)
}

fn default_set() -> Set {
    Set::new(Weight::default(), Reps::new(DEFAULT_REPS).unwrap())
}

/// Proposes a new workout from the library, history and active-exercise set.
///
/// Pure with respect to its inputs; nothing is persisted. Categories without
/// eligible candidates are skipped, so an empty active set yields a workout
/// with zero exercises.
#[must_use]
pub fn generate_workout(
    library: &[Exercise],
    history: &WorkoutHistory,
    active: &BTreeSet<ExerciseID>,
) -> Workout {
    generate_workout_traced(library, history, active, &LogTrace)
}

#[must_use]
pub fn generate_workout_traced(
    library: &[Exercise],
    history: &WorkoutHistory,
    active: &BTreeSet<ExerciseID>,
    trace: &impl Trace,
) -> Workout {
    let index = HistoryIndex::new(history);
    let mut exercises = Vec::new();
    for category in WORKOUT_CATEGORIES {
        if let Some(exercise) = select_for_category(library, active, category, &index) {
            trace.exercise_selected(category, exercise);
            let (sets, previous_performance) = prescribe_sets(exercise.id(), &index);
            exercises.push(ExerciseWithSets {
                exercise: exercise.clone(),
                sets,
                previous_performance,
            });
        } else {
            trace.category_skipped(category);
        }
    }
    Workout {
        id: Uuid::new_v4().into(),
        date: Utc::now(),
        kind: WorkoutKind::default(),
        exercises,
        completed: false,
        duration: None,
        notes: None,
    }
}

/// Toggle between the two most overdue exercises of the current exercise's
/// primary category.
///
/// Scans the full library regardless of the active-exercise set, so inactive
/// exercises can be surfaced. `None` if fewer than two candidates exist or
/// the toggle would not change anything.
#[must_use]
pub fn switch_exercise<'a>(
    current: &Exercise,
    library: &'a [Exercise],
    index: &HistoryIndex,
) -> Option<&'a Exercise> {
    switch_exercise_traced(current, library, index, &LogTrace)
}

#[must_use]
pub fn switch_exercise_traced<'a>(
    current: &Exercise,
    library: &'a [Exercise],
    index: &HistoryIndex,
    trace: &impl Trace,
) -> Option<&'a Exercise> {
    let category = current.primary_category();
    let ranked = rank_by_last_performance(
        library.iter().filter(|e| e.in_category(category)),
        index,
    );
    let [first, second, ..] = ranked[..] else {
        return None;
    };
    let replacement = if first.id() == current.id() {
        second
    } else {
        first
    };
    if replacement.id() == current.id() {
        return None;
    }
    trace.exercise_switched(current, replacement);
    Some(replacement)
}

/// The exercise that preceded the current one in the same category, looking
/// backwards through completed workouts.
///
/// Scans workouts most recent first and their slots in order; after the
/// current exercise has been seen, the next different same-category exercise
/// is the replacement. `None` if history is exhausted first.
#[must_use]
pub fn repropose_exercise(
    category: Category,
    current_id: ExerciseID,
    index: &HistoryIndex,
) -> Option<Exercise> {
    repropose_exercise_traced(category, current_id, index, &LogTrace)
}

#[must_use]
pub fn repropose_exercise_traced(
    category: Category,
    current_id: ExerciseID,
    index: &HistoryIndex,
    trace: &impl Trace,
) -> Option<Exercise> {
    let mut found_current = false;
    for workout in index.completed() {
        for slot in &workout.exercises {
            if !slot.exercise.in_category(category) {
                continue;
            }
            if slot.exercise.id() == current_id {
                found_current = true;
                continue;
            }
            if found_current {
                trace.exercise_reproposed(current_id, &slot.exercise);
                return Some(slot.exercise.clone());
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use crate::{MovementType, Name, WorkoutID};

    use super::*;

    fn exercise(id: u128, name: &str, category: Category) -> Exercise {
        Exercise::new(
            id.into(),
            Name::new(name).unwrap(),
            MovementType::Compound,
            vec![category],
            vec![],
            vec![],
        )
        .unwrap()
    }

    fn set(weight: f32, reps: u32, completed: bool) -> Set {
        let set = Set::new(Weight::new(weight).unwrap(), Reps::new(reps).unwrap());
        if completed { set.complete().unwrap() } else { set }
    }

    fn slot(exercise: Exercise, sets: Vec<Set>) -> ExerciseWithSets {
        ExerciseWithSets {
            exercise,
            sets,
            previous_performance: None,
        }
    }

    fn completed_workout(id: u128, days_ago: i64, exercises: Vec<ExerciseWithSets>) -> Workout {
        Workout {
            id: id.into(),
            date: Utc::now() - Duration::days(days_ago),
            kind: WorkoutKind::FullBody,
            exercises,
            completed: true,
            duration: Some(45),
            notes: None,
        }
    }

    fn history(workouts: Vec<Workout>) -> WorkoutHistory {
        workouts.into_iter().map(|w| (w.id, w)).collect()
    }

    fn squat() -> Exercise {
        exercise(1, "Squat", Category::KneeDominant)
    }

    fn deadlift() -> Exercise {
        exercise(2, "Deadlift", Category::HipDominant)
    }

    #[test]
    fn test_generate_workout_from_empty_history() {
        let library = vec![squat(), deadlift()];
        let active = BTreeSet::from([squat().id(), deadlift().id()]);

        let workout = generate_workout(&library, &WorkoutHistory::new(), &active);

        assert_eq!(workout.exercises.len(), 2);
        assert_eq!(workout.exercises[0].exercise, squat());
        assert_eq!(workout.exercises[1].exercise, deadlift());
        for slot in &workout.exercises {
            assert_eq!(slot.sets, vec![set(0.0, 10, false); 3]);
            assert_eq!(slot.previous_performance, None);
        }
        assert!(!workout.completed);
        assert_eq!(workout.duration, None);
        assert_eq!(workout.kind, WorkoutKind::FullBody);
    }

    #[test]
    fn test_generate_workout_with_empty_active_set() {
        let library = vec![squat(), deadlift()];
        let history = history(vec![completed_workout(
            1,
            3,
            vec![slot(squat(), vec![set(80.0, 5, true)])],
        )]);

        let workout = generate_workout(&library, &history, &BTreeSet::new());

        assert_eq!(workout.exercises.len(), 0);
        assert!(!workout.completed);
    }

    #[test]
    fn test_generate_workout_never_exceeds_category_slots() {
        let library = vec![
            squat(),
            exercise(3, "Leg Press", Category::KneeDominant),
            exercise(4, "Lunges", Category::KneeDominant),
            deadlift(),
            exercise(5, "Hip Thrust", Category::HipDominant),
        ];
        let active = library.iter().map(Exercise::id).collect::<BTreeSet<_>>();

        let workout = generate_workout(&library, &WorkoutHistory::new(), &active);

        assert_eq!(workout.exercises.len(), WORKOUT_CATEGORIES.len());
    }

    #[test]
    fn test_generate_workout_respects_active_set() {
        let library = vec![
            squat(),
            exercise(3, "Leg Press", Category::KneeDominant),
            deadlift(),
        ];
        let active = BTreeSet::from([ExerciseID::from(3)]);

        let workout = generate_workout(&library, &WorkoutHistory::new(), &active);

        assert_eq!(workout.exercises.len(), 1);
        assert!(workout.exercise_ids().is_subset(&active));
    }

    #[test]
    fn test_generate_workout_prefers_least_recently_performed() {
        let leg_press = exercise(3, "Leg Press", Category::KneeDominant);
        let library = vec![squat(), leg_press.clone(), deadlift()];
        let active = library.iter().map(Exercise::id).collect::<BTreeSet<_>>();
        let history = history(vec![
            completed_workout(1, 2, vec![slot(squat(), vec![set(80.0, 5, true)])]),
            completed_workout(2, 9, vec![slot(leg_press.clone(), vec![set(120.0, 8, true)])]),
        ]);

        let workout = generate_workout(&library, &history, &active);

        assert_eq!(workout.exercises[0].exercise, leg_press);
    }

    #[test]
    fn test_generate_workout_carries_over_previous_sets() {
        let library = vec![squat(), deadlift()];
        let active = BTreeSet::from([squat().id()]);
        let previous_sets = vec![set(80.0, 5, true), set(80.0, 5, true)];
        let history = history(vec![completed_workout(
            1,
            3,
            vec![slot(squat(), previous_sets.clone())],
        )]);

        let workout = generate_workout(&library, &history, &active);

        assert_eq!(workout.exercises.len(), 1);
        assert_eq!(
            workout.exercises[0].sets,
            vec![set(80.0, 5, false), set(80.0, 5, false)]
        );
        let previous = workout.exercises[0].previous_performance.as_ref().unwrap();
        assert_eq!(previous.sets, previous_sets);
    }

    #[test]
    fn test_generate_workout_ignores_uncompleted_workouts() {
        let library = vec![squat(), deadlift()];
        let active = BTreeSet::from([squat().id()]);
        let mut draft = completed_workout(1, 3, vec![slot(squat(), vec![set(90.0, 5, false)])]);
        draft.completed = false;
        draft.duration = None;
        let history = history(vec![draft]);

        let workout = generate_workout(&library, &history, &active);

        assert_eq!(workout.exercises[0].sets, vec![set(0.0, 10, false); 3]);
        assert_eq!(workout.exercises[0].previous_performance, None);
    }

    #[test]
    fn test_generate_workout_fresh_ids() {
        let workout_a = generate_workout(&[], &WorkoutHistory::new(), &BTreeSet::new());
        let workout_b = generate_workout(&[], &WorkoutHistory::new(), &BTreeSet::new());

        assert_ne!(workout_a.id, WorkoutID::nil());
        assert_ne!(workout_a.id, workout_b.id);
    }

    #[test]
    fn test_recency_scores_window() {
        let in_first = squat();
        let in_last = exercise(3, "Leg Press", Category::KneeDominant);
        let beyond_window = exercise(4, "Lunges", Category::KneeDominant);
        let mut workouts = vec![completed_workout(
            1,
            1,
            vec![slot(in_first.clone(), vec![set(80.0, 5, true)])],
        )];
        for day in 2u32..10 {
            workouts.push(completed_workout(
                u128::from(day),
                i64::from(day),
                vec![slot(deadlift(), vec![set(100.0, 3, true)])],
            ));
        }
        workouts.push(completed_workout(
            10,
            10,
            vec![slot(in_last.clone(), vec![set(120.0, 8, true)])],
        ));
        workouts.push(completed_workout(
            11,
            11,
            vec![slot(beyond_window.clone(), vec![set(60.0, 12, true)])],
        ));
        let history = history(workouts);
        let index = HistoryIndex::new(&history);

        let scores = recency_scores(&index);

        assert_eq!(scores.get(&in_first.id()), Some(&10));
        assert_eq!(scores.get(&in_last.id()), Some(&1));
        // the 11th most recent workout contributes nothing
        assert_eq!(scores.get(&beyond_window.id()), None);
    }

    #[test]
    fn test_recency_scores_accumulate_per_occurrence() {
        let history = history(vec![
            completed_workout(
                1,
                1,
                vec![
                    slot(squat(), vec![set(80.0, 5, true)]),
                    slot(squat(), vec![set(80.0, 5, true)]),
                ],
            ),
            completed_workout(2, 2, vec![slot(squat(), vec![set(80.0, 5, true)])]),
        ]);
        let index = HistoryIndex::new(&history);

        assert_eq!(recency_scores(&index).get(&squat().id()), Some(&29));
    }

    #[test]
    fn test_rank_by_recency_score() {
        let recent = squat();
        let stale = exercise(3, "Leg Press", Category::KneeDominant);
        let unseen = exercise(4, "Lunges", Category::KneeDominant);
        let history = history(vec![
            completed_workout(1, 1, vec![slot(recent.clone(), vec![set(80.0, 5, true)])]),
            completed_workout(2, 20, vec![slot(stale.clone(), vec![set(120.0, 8, true)])]),
        ]);
        let index = HistoryIndex::new(&history);
        let library = vec![recent.clone(), stale.clone(), unseen.clone()];

        assert_eq!(
            rank_by_recency_score(library.iter(), &index),
            vec![&unseen, &stale, &recent]
        );
    }

    #[test]
    fn test_rank_by_last_performance_never_performed_first() {
        let performed = squat();
        let unseen = exercise(3, "Leg Press", Category::KneeDominant);
        let history = history(vec![completed_workout(
            1,
            5,
            vec![slot(performed.clone(), vec![set(80.0, 5, true)])],
        )]);
        let index = HistoryIndex::new(&history);
        let library = vec![performed.clone(), unseen.clone()];

        assert_eq!(
            rank_by_last_performance(library.iter(), &index),
            vec![&unseen, &performed]
        );
    }

    #[rstest]
    #[case(Category::KneeDominant, Some(1))]
    #[case(Category::HipDominant, None)]
    fn test_select_for_category(
        #[case] category: Category,
        #[case] expected: Option<u128>,
    ) {
        let library = vec![squat(), deadlift()];
        let active = BTreeSet::from([squat().id()]);
        let history = WorkoutHistory::new();
        let index = HistoryIndex::new(&history);

        assert_eq!(
            select_for_category(&library, &active, category, &index).map(Exercise::id),
            expected.map(ExerciseID::from)
        );
    }

    #[test]
    fn test_prescribe_sets_default() {
        let history = WorkoutHistory::new();
        let index = HistoryIndex::new(&history);

        let (sets, previous) = prescribe_sets(squat().id(), &index);

        assert_eq!(sets, vec![set(0.0, 10, false); 3]);
        assert_eq!(previous, None);
    }

    #[test]
    fn test_switch_exercise_toggles_between_two_oldest() {
        let a = squat();
        let b = exercise(3, "Leg Press", Category::KneeDominant);
        let library = vec![a.clone(), b.clone()];
        let history = history(vec![completed_workout(
            1,
            5,
            vec![slot(b.clone(), vec![set(120.0, 8, true)])],
        )]);
        let index = HistoryIndex::new(&history);

        // a never performed, b performed 5 days ago
        assert_eq!(switch_exercise(&a, &library, &index), Some(&b));
        assert_eq!(switch_exercise(&b, &library, &index), Some(&a));
    }

    #[test]
    fn test_switch_exercise_single_candidate() {
        let library = vec![squat(), deadlift()];
        let history = WorkoutHistory::new();
        let index = HistoryIndex::new(&history);

        assert_eq!(switch_exercise(&squat(), &library, &index), None);
    }

    #[test]
    fn test_switch_exercise_prefers_most_overdue() {
        let a = squat();
        let b = exercise(3, "Leg Press", Category::KneeDominant);
        let c = exercise(4, "Lunges", Category::KneeDominant);
        let library = vec![a.clone(), b.clone(), c.clone()];
        let history = history(vec![
            completed_workout(1, 2, vec![slot(a.clone(), vec![set(80.0, 5, true)])]),
            completed_workout(2, 9, vec![slot(b.clone(), vec![set(120.0, 8, true)])]),
        ]);
        let index = HistoryIndex::new(&history);

        // ranking is [c, b, a]; a is not among the two oldest
        assert_eq!(switch_exercise(&a, &library, &index), Some(&c));
        assert_eq!(switch_exercise(&c, &library, &index), Some(&b));
    }

    #[test]
    fn test_repropose_exercise() {
        let a = squat();
        let b = exercise(3, "Leg Press", Category::KneeDominant);
        let history = history(vec![
            completed_workout(1, 2, vec![slot(a.clone(), vec![set(80.0, 5, true)])]),
            completed_workout(2, 9, vec![slot(b.clone(), vec![set(120.0, 8, true)])]),
        ]);
        let index = HistoryIndex::new(&history);

        assert_eq!(
            repropose_exercise(Category::KneeDominant, a.id(), &index),
            Some(b.clone())
        );
        // b is encountered last; no same-category exercise follows it
        assert_eq!(repropose_exercise(Category::KneeDominant, b.id(), &index), None);
    }

    #[test]
    fn test_repropose_exercise_skips_other_categories() {
        let a = squat();
        let b = exercise(3, "Leg Press", Category::KneeDominant);
        let history = history(vec![
            completed_workout(1, 2, vec![slot(a.clone(), vec![set(80.0, 5, true)])]),
            completed_workout(2, 5, vec![slot(deadlift(), vec![set(100.0, 3, true)])]),
            completed_workout(3, 9, vec![slot(b.clone(), vec![set(120.0, 8, true)])]),
        ]);
        let index = HistoryIndex::new(&history);

        assert_eq!(
            repropose_exercise(Category::KneeDominant, a.id(), &index),
            Some(b)
        );
    }

    #[test]
    fn test_repropose_exercise_requires_current_to_be_seen() {
        let a = squat();
        let b = exercise(3, "Leg Press", Category::KneeDominant);
        let history = history(vec![completed_workout(
            1,
            2,
            vec![slot(b.clone(), vec![set(120.0, 8, true)])],
        )]);
        let index = HistoryIndex::new(&history);

        assert_eq!(repropose_exercise(Category::KneeDominant, a.id(), &index), None);
    }
}
