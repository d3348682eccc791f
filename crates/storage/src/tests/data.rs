use chrono::{Duration, Local, NaiveDate};

use robur_domain as domain;

pub static USER_ID: std::sync::LazyLock<domain::UserID> =
    std::sync::LazyLock::new(|| domain::UserID::from(1));

pub static TODAY: std::sync::LazyLock<NaiveDate> =
    std::sync::LazyLock::new(|| Local::now().date_naive());

pub fn new_mesocycle(protocol: domain::Protocol, duration_weeks: u8) -> domain::NewMesocycle {
    domain::NewMesocycle {
        name: domain::Name::new("Base Block").unwrap(),
        focus: domain::GoalFocus::Hypertrophy,
        protocol,
        start_date: *TODAY,
        duration_weeks,
        notes: String::new(),
    }
}

pub fn new_exercise(
    name: &str,
    archetype: Option<domain::Archetype>,
    order: u32,
) -> domain::NewExercise {
    domain::NewExercise {
        name: domain::Name::new(name).unwrap(),
        equipment: domain::Equipment::Barbell,
        archetype,
        order,
        created_by: *USER_ID,
    }
}

pub fn new_workout(
    days_ago: i64,
    exercise_ids: &[domain::ExerciseID],
    completed_sets: u32,
) -> domain::NewWorkout {
    domain::NewWorkout {
        user_id: *USER_ID,
        mesocycle_id: None,
        session_id: None,
        date: *TODAY - Duration::days(days_ago),
        notes: String::new(),
        exercises: exercise_ids
            .iter()
            .enumerate()
            .map(|(index, exercise_id)| domain::WorkoutExercise {
                exercise_id: *exercise_id,
                order: u32::try_from(index).unwrap() + 1,
                sets: (0..completed_sets)
                    .map(|_| domain::WorkoutSet {
                        reps: Some(domain::Reps::new(5).unwrap()),
                        weight: None,
                        completed: true,
                    })
                    .collect::<Vec<_>>(),
            })
            .collect::<Vec<_>>(),
    }
}
