use std::collections::BTreeSet;

use chrono::Local;

use crate::{
    ArchetypeTargets, Exercise, ExerciseCatalog, ExerciseID, ReadError, StorageError, Workout,
    workout,
};

#[derive(thiserror::Error, Debug)]
pub enum GenerateError {
    #[error("no exercises available to generate a workout")]
    EmptyCatalog,
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error>),
}

impl From<ReadError> for GenerateError {
    fn from(value: ReadError) -> Self {
        match value {
            ReadError::NotFound => GenerateError::Other("not found".into()),
            ReadError::Storage(storage) => GenerateError::Storage(storage),
            ReadError::Other(other) => GenerateError::Other(other),
        }
    }
}

const DEFAULT_EXERCISE_COUNT: usize = 5;

/// Selects exercises for an ad-hoc workout by covering the largest weekly
/// per-archetype volume deficits, sized down and de-overlapped when the last
/// workout is recent. Performs no writes; instantiating records from the
/// returned list is the caller's job.
pub fn generate(
    catalog: &ExerciseCatalog,
    targets: &ArchetypeTargets,
    history: &[Workout],
) -> Result<Vec<Exercise>, GenerateError> {
    if catalog.is_empty() {
        return Err(GenerateError::EmptyCatalog);
    }

    let (count, excluded) = sizing(history);
    let completed = workout::completed_sets_per_archetype(history, catalog);
    let deficits = targets.deficits(&completed);

    let mut selected: Vec<&Exercise> = Vec::with_capacity(count);
    let mut picked: BTreeSet<ExerciseID> = BTreeSet::new();
    let mut covered = BTreeSet::new();

    for (archetype, _) in deficits {
        if selected.len() >= count {
            break;
        }
        if covered.contains(&archetype) {
            continue;
        }
        if let Some(exercise) = catalog.exercises().iter().find(|e| {
            e.archetype == Some(archetype)
                && !excluded.contains(&e.id)
                && !picked.contains(&e.id)
        }) {
            picked.insert(exercise.id);
            covered.insert(archetype);
            selected.push(exercise);
        }
    }

    // fill remaining slots without archetype constraints, in catalog order
    for exercise in catalog.exercises() {
        if selected.len() >= count {
            break;
        }
        if excluded.contains(&exercise.id) || picked.contains(&exercise.id) {
            continue;
        }
        picked.insert(exercise.id);
        selected.push(exercise);
    }

    Ok(selected.into_iter().cloned().collect::<Vec<_>>())
}

/// Recovery heuristic: the closer the last workout, the smaller the follow-up
/// and the stricter the overlap exclusion.
fn sizing(history: &[Workout]) -> (usize, BTreeSet<ExerciseID>) {
    let Some(latest) = workout::latest_workout(history) else {
        return (DEFAULT_EXERCISE_COUNT, BTreeSet::new());
    };

    let gap = (Local::now().date_naive() - latest.date).num_days();
    if gap <= 1 {
        (3, latest.exercise_ids())
    } else if gap <= 3 {
        (4, latest.exercise_ids())
    } else {
        (DEFAULT_EXERCISE_COUNT, BTreeSet::new())
    }
}
