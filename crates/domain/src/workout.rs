use std::collections::{BTreeMap, BTreeSet};

use chrono::{Duration, Local, NaiveDate, NaiveDateTime};
use derive_more::Deref;
use uuid::Uuid;

use crate::{
    Archetype, ArchetypeTargets, CreateError, Exercise, ExerciseCatalog, ExerciseID, GenerateError,
    MesocycleID, ReadError, Reps, SessionID, UserID, Weight,
};

#[allow(async_fn_in_trait)]
pub trait WorkoutService {
    async fn get_workouts(&self, user_id: UserID) -> Result<Vec<Workout>, ReadError>;
    async fn generate_workout(
        &self,
        user_id: UserID,
        targets: &ArchetypeTargets,
    ) -> Result<Vec<Exercise>, GenerateError>;
}

#[allow(async_fn_in_trait)]
pub trait WorkoutRepository {
    async fn read_workouts(&self, user_id: UserID) -> Result<Vec<Workout>, ReadError>;
    async fn create_workout(&self, workout: NewWorkout) -> Result<Workout, CreateError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct Workout {
    pub id: WorkoutID,
    pub user_id: UserID,
    pub mesocycle_id: Option<MesocycleID>,
    pub session_id: Option<SessionID>,
    pub date: NaiveDate,
    pub notes: String,
    pub created_at: NaiveDateTime,
    pub exercises: Vec<WorkoutExercise>,
}

impl Workout {
    #[must_use]
    pub fn exercise_ids(&self) -> BTreeSet<ExerciseID> {
        self.exercises
            .iter()
            .map(|e| e.exercise_id)
            .collect::<BTreeSet<_>>()
    }

    #[must_use]
    pub fn completed_sets(&self) -> u32 {
        #[allow(clippy::cast_possible_truncation)]
        let sets = self
            .exercises
            .iter()
            .flat_map(|e| &e.sets)
            .filter(|s| s.completed)
            .count() as u32;
        sets
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewWorkout {
    pub user_id: UserID,
    pub mesocycle_id: Option<MesocycleID>,
    pub session_id: Option<SessionID>,
    pub date: NaiveDate,
    pub notes: String,
    pub exercises: Vec<WorkoutExercise>,
}

#[derive(Deref, Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
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

#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutExercise {
    pub exercise_id: ExerciseID,
    pub order: u32,
    pub sets: Vec<WorkoutSet>,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct WorkoutSet {
    pub reps: Option<Reps>,
    pub weight: Option<Weight>,
    pub completed: bool,
}

/// The most recent workout by date; creation time breaks ties.
#[must_use]
pub fn latest_workout(workouts: &[Workout]) -> Option<&Workout> {
    workouts.iter().max_by_key(|w| (w.date, w.created_at))
}

/// Completed sets per archetype over the trailing 7 days (today inclusive,
/// lower bound exclusive). Exercises without a resolvable archetype are
/// ignored.
#[must_use]
pub fn completed_sets_per_archetype(
    workouts: &[Workout],
    catalog: &ExerciseCatalog,
) -> BTreeMap<Archetype, u32> {
    let today = Local::now().date_naive();
    let mut result: BTreeMap<Archetype, u32> = BTreeMap::new();

    for workout in workouts {
        if workout.date <= today - Duration::days(7) || workout.date > today {
            continue;
        }
        for exercise in &workout.exercises {
            let Some(archetype) = catalog.get(exercise.exercise_id).and_then(|e| e.archetype)
            else {
                continue;
            };
            #[allow(clippy::cast_possible_truncation)]
            let completed = exercise.sets.iter().filter(|s| s.completed).count() as u32;
            if completed > 0 {
                *result.entry(archetype).or_insert(0) += completed;
            }
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use crate::{Equipment, Name};

    use super::*;

    static TODAY: std::sync::LazyLock<NaiveDate> =
        std::sync::LazyLock::new(|| Local::now().date_naive());

    fn catalog() -> ExerciseCatalog {
        ExerciseCatalog::new(vec![
            exercise(1, "Back Squat", Some(Archetype::Squat), 1),
            exercise(2, "Overhead Press", Some(Archetype::PushVertical), 2),
            exercise(3, "Plank", None, 3),
        ])
    }

    fn exercise(id: u128, name: &str, archetype: Option<Archetype>, order: u32) -> Exercise {
        Exercise {
            id: id.into(),
            name: Name::new(name).unwrap(),
            equipment: Equipment::Barbell,
            archetype,
            order,
            created_by: UserID::nil(),
        }
    }

    fn workout(days_ago: i64, exercises: &[(u128, u32, u32)]) -> Workout {
        let date = *TODAY - Duration::days(days_ago);
        Workout {
            id: WorkoutID::from(u128::try_from(days_ago).unwrap() + 1),
            user_id: UserID::nil(),
            mesocycle_id: None,
            session_id: None,
            date,
            notes: String::new(),
            created_at: date.and_hms_opt(12, 0, 0).unwrap(),
            exercises: exercises
                .iter()
                .map(|(exercise_id, completed, incomplete)| WorkoutExercise {
                    exercise_id: (*exercise_id).into(),
                    order: 1,
                    sets: (0..*completed)
                        .map(|_| WorkoutSet {
                            reps: Some(Reps::new(5).unwrap()),
                            weight: None,
                            completed: true,
                        })
                        .chain((0..*incomplete).map(|_| WorkoutSet::default()))
                        .collect::<Vec<_>>(),
                })
                .collect::<Vec<_>>(),
        }
    }

    #[test]
    fn test_workout_exercise_ids() {
        assert_eq!(
            workout(0, &[(1, 1, 0), (2, 1, 0), (1, 1, 0)]).exercise_ids(),
            BTreeSet::from([1.into(), 2.into()])
        );
    }

    #[rstest]
    #[case(&[(1, 2, 1), (2, 1, 0)], 3)]
    #[case(&[(1, 0, 3)], 0)]
    fn test_workout_completed_sets(#[case] exercises: &[(u128, u32, u32)], #[case] expected: u32) {
        assert_eq!(workout(0, exercises).completed_sets(), expected);
    }

    #[test]
    fn test_latest_workout() {
        let workouts = vec![workout(5, &[]), workout(1, &[]), workout(3, &[])];
        assert_eq!(
            latest_workout(&workouts).map(|w| w.date),
            Some(*TODAY - Duration::days(1))
        );
        assert_eq!(latest_workout(&[]), None);
    }

    #[test]
    fn test_completed_sets_per_archetype() {
        let workouts = vec![
            workout(0, &[(1, 2, 1)]),
            workout(6, &[(1, 1, 0), (2, 3, 0)]),
            // outside the trailing window
            workout(7, &[(1, 5, 0)]),
            workout(10, &[(2, 5, 0)]),
        ];

        assert_eq!(
            completed_sets_per_archetype(&workouts, &catalog()),
            BTreeMap::from([(Archetype::Squat, 3), (Archetype::PushVertical, 3)])
        );
    }

    #[test]
    fn test_completed_sets_per_archetype_ignores_untagged() {
        let workouts = vec![workout(0, &[(3, 4, 0), (99, 2, 0)])];

        assert_eq!(
            completed_sets_per_archetype(&workouts, &catalog()),
            BTreeMap::new()
        );
    }

    #[test]
    fn test_workout_id_nil() {
        assert!(WorkoutID::nil().is_nil());
        assert_eq!(WorkoutID::nil(), WorkoutID::default());
    }
}
