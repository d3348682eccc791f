use crate::{
    Archetype, CreateError, Equipment, Exercise, ExerciseID, ExerciseRepository, Name, NewExercise,
    STANDARD_VARIATION, UserID,
};

/// In-memory snapshot of the exercise catalog, built once per call and
/// discarded afterwards. Exercises created during a synchronization pass are
/// appended so later resolutions see them without a re-fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExerciseCatalog {
    exercises: Vec<Exercise>,
}

impl ExerciseCatalog {
    #[must_use]
    pub fn new(mut exercises: Vec<Exercise>) -> Self {
        exercises.sort_by_key(|e| e.order);
        Self { exercises }
    }

    #[must_use]
    pub fn exercises(&self) -> &[Exercise] {
        &self.exercises
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.exercises.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.exercises.len()
    }

    #[must_use]
    pub fn get(&self, id: ExerciseID) -> Option<&Exercise> {
        self.exercises.iter().find(|e| e.id == id)
    }

    /// Case-insensitive, whitespace-trimmed exact-name match.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&Exercise> {
        self.exercises.iter().find(|e| e.name.matches(name))
    }

    #[must_use]
    pub fn next_order(&self) -> u32 {
        self.exercises.iter().map(|e| e.order).max().unwrap_or(0) + 1
    }

    pub fn push(&mut self, exercise: Exercise) {
        self.exercises.push(exercise);
    }
}

/// Resolves a canonical exercise name to a catalog row, creating the exercise
/// and a named variation if absent. Writes 0 to 2 new rows; never updates or
/// deletes existing ones.
pub async fn resolve<R: ExerciseRepository>(
    repository: &R,
    catalog: &mut ExerciseCatalog,
    name: &str,
    equipment: Equipment,
    archetype: Option<Archetype>,
    variation: &str,
    user_id: UserID,
) -> Result<ExerciseID, CreateError> {
    let id = match catalog.find(name) {
        Some(exercise) => exercise.id,
        None => {
            let exercise = repository
                .create_exercise(NewExercise {
                    name: Name::new(name).map_err(|err| CreateError::Other(err.into()))?,
                    equipment,
                    archetype,
                    order: catalog.next_order(),
                    created_by: user_id,
                })
                .await?;
            let id = exercise.id;
            catalog.push(exercise);
            id
        }
    };

    ensure_variation(repository, id, variation).await?;

    Ok(id)
}

async fn ensure_variation<R: ExerciseRepository>(
    repository: &R,
    exercise_id: ExerciseID,
    variation: &str,
) -> Result<(), CreateError> {
    if variation.trim() == STANDARD_VARIATION {
        return Ok(());
    }

    let variations = repository.read_variations(exercise_id).await?;
    if variations.iter().any(|v| v.name.matches(variation)) {
        return Ok(());
    }

    repository
        .create_variation(
            exercise_id,
            Name::new(variation).map_err(|err| CreateError::Other(err.into()))?,
        )
        .await?;

    Ok(())
}
