use serde::Serialize;
use uuid::Uuid;

use crate::{
    ExerciseCatalog, ExerciseRepository, Mesocycle, MesocycleSession, Name, NewSession,
    NewSessionExercise, Prescription, ProtocolTemplate, SessionExercise, SessionRepository,
    SyncError, UserID, Weight, catalog,
};

/// Converges the persisted sessions and session exercises of a mesocycle to a
/// declarative protocol template. Safe to call on every read: when the
/// persisted content already matches the template, no exercise rows are
/// written.
pub async fn synchronize_protocol<R>(
    repository: &R,
    user_id: UserID,
    mesocycle: &Mesocycle,
    template: &ProtocolTemplate,
) -> Result<(), SyncError>
where
    R: ExerciseRepository + SessionRepository,
{
    let mut catalog = ExerciseCatalog::new(repository.read_exercises().await?);
    let existing = repository.read_sessions(mesocycle.id).await?;

    for (index, session_template) in template.sessions.iter().enumerate() {
        #[allow(clippy::cast_possible_truncation)]
        let order = index as u32 + 1;
        let name = Name::new(session_template.name).map_err(|err| SyncError::Other(err.into()))?;
        let prescription = Some(Prescription {
            sets_per_exercise: session_template.sets_per_exercise,
            rep_range: session_template.rep_range.to_string(),
            progression: session_template.progression.to_string(),
        });

        // Reuse a session matched by name so workouts already logged against
        // it keep a valid reference; the scalar fields are upserted
        // unconditionally.
        let session = match existing.iter().find(|s| s.name.matches(session_template.name)) {
            Some(session) => {
                repository
                    .replace_session(MesocycleSession {
                        id: session.id,
                        mesocycle_id: mesocycle.id,
                        name,
                        order,
                        focus: session_template.focus,
                        prescription,
                    })
                    .await?
            }
            None => {
                repository
                    .create_session(NewSession {
                        mesocycle_id: mesocycle.id,
                        name,
                        order,
                        focus: session_template.focus,
                        prescription,
                    })
                    .await?
            }
        };

        let mut desired = Vec::with_capacity(session_template.exercises.len());
        for (position, exercise_template) in session_template.exercises.iter().enumerate() {
            let exercise_id = catalog::resolve(
                repository,
                &mut catalog,
                exercise_template.name,
                exercise_template.equipment,
                exercise_template.archetype,
                exercise_template.variation,
                user_id,
            )
            .await?;
            #[allow(clippy::cast_possible_truncation)]
            desired.push(NewSessionExercise {
                exercise_id,
                order: position as u32 + 1,
                target_sets: exercise_template.target_sets,
                target_reps: exercise_template.target_reps.to_string(),
                load_increment: Weight::new(exercise_template.load_increment)
                    .map_err(|err| SyncError::Other(err.into()))?,
                notes: exercise_template.notes.to_string(),
            });
        }

        let current = repository.read_session_exercises(session.id).await?;
        if canonical(current.iter().map(Row::from))? != canonical(desired.iter().map(Row::from))? {
            // Full replace rather than a per-row diff: the row count is small
            // and a clean replace is easier to reason about under reordering.
            repository.delete_session_exercises(session.id).await?;
            repository.create_session_exercises(session.id, desired).await?;
        }
    }

    Ok(())
}

/// Field-order-stable comparable form of a session exercise row.
#[derive(Serialize)]
struct Row<'a> {
    exercise_id: Uuid,
    order: u32,
    target_sets: u32,
    target_reps: &'a str,
    load_increment: f32,
    notes: &'a str,
}

impl<'a> From<&'a SessionExercise> for Row<'a> {
    fn from(value: &'a SessionExercise) -> Self {
        Self {
            exercise_id: *value.exercise_id,
            order: value.order,
            target_sets: value.target_sets,
            target_reps: &value.target_reps,
            load_increment: f32::from(value.load_increment),
            notes: &value.notes,
        }
    }
}

impl<'a> From<&'a NewSessionExercise> for Row<'a> {
    fn from(value: &'a NewSessionExercise) -> Self {
        Self {
            exercise_id: *value.exercise_id,
            order: value.order,
            target_sets: value.target_sets,
            target_reps: &value.target_reps,
            load_increment: f32::from(value.load_increment),
            notes: &value.notes,
        }
    }
}

fn canonical<'a>(rows: impl Iterator<Item = Row<'a>>) -> Result<String, SyncError> {
    serde_json::to_string(&rows.collect::<Vec<_>>()).map_err(|err| SyncError::Other(err.into()))
}
