use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Local;
use uuid::Uuid;

use robur_domain as domain;

/// In-memory record store, one table per relation. Reference implementation
/// of the repository traits for tests and embedding applications without a
/// relational backend.
pub struct MemoryStore {
    tables: RwLock<Tables>,
    periodization_provisioned: bool,
}

#[derive(Default)]
struct Tables {
    exercises: Vec<domain::Exercise>,
    exercise_variations: Vec<domain::ExerciseVariation>,
    mesocycles: Vec<domain::Mesocycle>,
    mesocycle_sessions: Vec<domain::MesocycleSession>,
    mesocycle_session_exercises: Vec<domain::SessionExercise>,
    workouts: Vec<domain::Workout>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(Tables::default()),
            periodization_provisioned: true,
        }
    }

    /// A store on which the periodization migration has not been applied yet.
    /// Access to the mesocycle relations fails the way a relational store
    /// reports a missing relation.
    #[must_use]
    pub fn without_periodization() -> Self {
        Self {
            tables: RwLock::new(Tables::default()),
            periodization_provisioned: false,
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Tables> {
        self.tables.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Tables> {
        self.tables.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn periodization(&self, relation: &str) -> Result<(), domain::StorageError> {
        if self.periodization_provisioned {
            Ok(())
        } else {
            Err(domain::StorageError::from_store_message(&format!(
                "relation \"{relation}\" does not exist"
            )))
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl domain::ExerciseRepository for MemoryStore {
    async fn read_exercises(&self) -> Result<Vec<domain::Exercise>, domain::ReadError> {
        Ok(self.read().exercises.clone())
    }

    async fn create_exercise(
        &self,
        exercise: domain::NewExercise,
    ) -> Result<domain::Exercise, domain::CreateError> {
        let exercise = domain::Exercise {
            id: Uuid::new_v4().into(),
            name: exercise.name,
            equipment: exercise.equipment,
            archetype: exercise.archetype,
            order: exercise.order,
            created_by: exercise.created_by,
        };
        self.write().exercises.push(exercise.clone());
        Ok(exercise)
    }

    async fn read_variations(
        &self,
        exercise_id: domain::ExerciseID,
    ) -> Result<Vec<domain::ExerciseVariation>, domain::ReadError> {
        Ok(self
            .read()
            .exercise_variations
            .iter()
            .filter(|v| v.exercise_id == exercise_id)
            .cloned()
            .collect::<Vec<_>>())
    }

    async fn create_variation(
        &self,
        exercise_id: domain::ExerciseID,
        name: domain::Name,
    ) -> Result<domain::ExerciseVariation, domain::CreateError> {
        let variation = domain::ExerciseVariation {
            id: Uuid::new_v4().into(),
            exercise_id,
            name,
        };
        self.write().exercise_variations.push(variation.clone());
        Ok(variation)
    }
}

impl domain::MesocycleRepository for MemoryStore {
    async fn read_mesocycles(
        &self,
        user_id: domain::UserID,
    ) -> Result<Vec<domain::Mesocycle>, domain::ReadError> {
        self.periodization("mesocycles")?;
        let mut mesocycles = self
            .read()
            .mesocycles
            .iter()
            .filter(|m| m.user_id == user_id)
            .cloned()
            .collect::<Vec<_>>();
        mesocycles.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(mesocycles)
    }

    async fn create_mesocycle(
        &self,
        user_id: domain::UserID,
        mesocycle: domain::NewMesocycle,
        duration: domain::Weeks,
    ) -> Result<domain::Mesocycle, domain::CreateError> {
        self.periodization("mesocycles")?;
        let mesocycle = domain::Mesocycle {
            id: Uuid::new_v4().into(),
            user_id,
            name: mesocycle.name,
            focus: mesocycle.focus,
            protocol: mesocycle.protocol,
            start_date: mesocycle.start_date,
            duration,
            status: domain::MesocycleStatus::Active,
            notes: mesocycle.notes,
            created_at: Local::now().naive_local(),
        };
        self.write().mesocycles.push(mesocycle.clone());
        Ok(mesocycle)
    }

    async fn modify_mesocycle_status(
        &self,
        id: domain::MesocycleID,
        status: domain::MesocycleStatus,
    ) -> Result<domain::Mesocycle, domain::UpdateError> {
        self.periodization("mesocycles")?;
        let mut tables = self.write();
        let mesocycle = tables
            .mesocycles
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or(domain::UpdateError::NotFound)?;
        mesocycle.status = status;
        Ok(mesocycle.clone())
    }
}

impl domain::SessionRepository for MemoryStore {
    async fn read_sessions(
        &self,
        mesocycle_id: domain::MesocycleID,
    ) -> Result<Vec<domain::MesocycleSession>, domain::ReadError> {
        self.periodization("mesocycle_sessions")?;
        let mut sessions = self
            .read()
            .mesocycle_sessions
            .iter()
            .filter(|s| s.mesocycle_id == mesocycle_id)
            .cloned()
            .collect::<Vec<_>>();
        sessions.sort_by_key(|s| s.order);
        Ok(sessions)
    }

    async fn create_session(
        &self,
        session: domain::NewSession,
    ) -> Result<domain::MesocycleSession, domain::CreateError> {
        self.periodization("mesocycle_sessions")?;
        let session = domain::MesocycleSession {
            id: Uuid::new_v4().into(),
            mesocycle_id: session.mesocycle_id,
            name: session.name,
            order: session.order,
            focus: session.focus,
            prescription: session.prescription,
        };
        self.write().mesocycle_sessions.push(session.clone());
        Ok(session)
    }

    async fn replace_session(
        &self,
        session: domain::MesocycleSession,
    ) -> Result<domain::MesocycleSession, domain::UpdateError> {
        self.periodization("mesocycle_sessions")?;
        let mut tables = self.write();
        let slot = tables
            .mesocycle_sessions
            .iter_mut()
            .find(|s| s.id == session.id)
            .ok_or(domain::UpdateError::NotFound)?;
        *slot = session.clone();
        Ok(session)
    }

    async fn read_session_exercises(
        &self,
        session_id: domain::SessionID,
    ) -> Result<Vec<domain::SessionExercise>, domain::ReadError> {
        self.periodization("mesocycle_sessions")?;
        let mut exercises = self
            .read()
            .mesocycle_session_exercises
            .iter()
            .filter(|e| e.session_id == session_id)
            .cloned()
            .collect::<Vec<_>>();
        exercises.sort_by_key(|e| e.order);
        Ok(exercises)
    }

    async fn delete_session_exercises(
        &self,
        session_id: domain::SessionID,
    ) -> Result<(), domain::DeleteError> {
        self.periodization("mesocycle_sessions")?;
        self.write()
            .mesocycle_session_exercises
            .retain(|e| e.session_id != session_id);
        Ok(())
    }

    async fn create_session_exercises(
        &self,
        session_id: domain::SessionID,
        exercises: Vec<domain::NewSessionExercise>,
    ) -> Result<Vec<domain::SessionExercise>, domain::CreateError> {
        self.periodization("mesocycle_sessions")?;
        let rows = exercises
            .into_iter()
            .map(|exercise| domain::SessionExercise {
                id: Uuid::new_v4().into(),
                session_id,
                exercise_id: exercise.exercise_id,
                order: exercise.order,
                target_sets: exercise.target_sets,
                target_reps: exercise.target_reps,
                load_increment: exercise.load_increment,
                notes: exercise.notes,
            })
            .collect::<Vec<_>>();
        self.write()
            .mesocycle_session_exercises
            .extend(rows.iter().cloned());
        Ok(rows)
    }
}

impl domain::WorkoutRepository for MemoryStore {
    async fn read_workouts(
        &self,
        user_id: domain::UserID,
    ) -> Result<Vec<domain::Workout>, domain::ReadError> {
        Ok(self
            .read()
            .workouts
            .iter()
            .filter(|w| w.user_id == user_id)
            .cloned()
            .collect::<Vec<_>>())
    }

    async fn create_workout(
        &self,
        workout: domain::NewWorkout,
    ) -> Result<domain::Workout, domain::CreateError> {
        let workout = domain::Workout {
            id: Uuid::new_v4().into(),
            user_id: workout.user_id,
            mesocycle_id: workout.mesocycle_id,
            session_id: workout.session_id,
            date: workout.date,
            notes: workout.notes,
            created_at: Local::now().naive_local(),
            exercises: workout.exercises,
        };
        self.write().workouts.push(workout.clone());
        Ok(workout)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use robur_domain::{
        ExerciseRepository, MesocycleRepository, ProgramService, SessionRepository,
        WorkoutRepository, WorkoutService,
    };

    use crate::tests::data;

    use super::*;

    static TEMPLATE: domain::ProtocolTemplate = domain::ProtocolTemplate {
        name: "Test Protocol",
        sessions: &[domain::SessionTemplate {
            name: "Full Body 1",
            focus: None,
            sets_per_exercise: 3,
            rep_range: "8-12",
            progression: "Add load once all sets reach the top of the range.",
            exercises: &[
                domain::ExerciseTemplate {
                    name: "Back Squat",
                    variation: "Standard",
                    equipment: domain::Equipment::Barbell,
                    archetype: Some(domain::Archetype::Squat),
                    target_sets: 3,
                    target_reps: "8-12",
                    load_increment: 2.5,
                    notes: "",
                },
                domain::ExerciseTemplate {
                    name: "Bench Press",
                    variation: "Standard",
                    equipment: domain::Equipment::Barbell,
                    archetype: Some(domain::Archetype::PushHorizontal),
                    target_sets: 3,
                    target_reps: "8-12",
                    load_increment: 2.5,
                    notes: "",
                },
            ],
        }],
    };

    // same as TEMPLATE except for the bench press target reps
    static CHANGED_TEMPLATE: domain::ProtocolTemplate = domain::ProtocolTemplate {
        name: "Test Protocol",
        sessions: &[domain::SessionTemplate {
            name: "Full Body 1",
            focus: None,
            sets_per_exercise: 3,
            rep_range: "8-12",
            progression: "Add load once all sets reach the top of the range.",
            exercises: &[
                domain::ExerciseTemplate {
                    name: "Back Squat",
                    variation: "Standard",
                    equipment: domain::Equipment::Barbell,
                    archetype: Some(domain::Archetype::Squat),
                    target_sets: 3,
                    target_reps: "8-12",
                    load_increment: 2.5,
                    notes: "",
                },
                domain::ExerciseTemplate {
                    name: "Bench Press",
                    variation: "Standard",
                    equipment: domain::Equipment::Barbell,
                    archetype: Some(domain::Archetype::PushHorizontal),
                    target_sets: 3,
                    target_reps: "5-8",
                    load_increment: 2.5,
                    notes: "",
                },
            ],
        }],
    };

    async fn mesocycle(store: &MemoryStore, protocol: domain::Protocol) -> domain::Mesocycle {
        store
            .create_mesocycle(
                *data::USER_ID,
                data::new_mesocycle(protocol, 8),
                domain::Weeks::new(8).unwrap(),
            )
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_resolve_creates_exercise_and_variation() {
        let store = MemoryStore::new();
        let mut catalog = domain::ExerciseCatalog::new(vec![]);

        let id = domain::catalog::resolve(
            &store,
            &mut catalog,
            "Lat Pulldown",
            domain::Equipment::Machine,
            Some(domain::Archetype::PullVertical),
            "Close Grip",
            *data::USER_ID,
        )
        .await
        .unwrap();

        let exercises = store.read_exercises().await.unwrap();
        assert_eq!(exercises.len(), 1);
        assert_eq!(exercises[0].id, id);
        assert_eq!(exercises[0].order, 1);
        assert_eq!(store.read_variations(id).await.unwrap().len(), 1);

        // resolving again writes nothing
        let same = domain::catalog::resolve(
            &store,
            &mut catalog,
            "  lat pulldown  ",
            domain::Equipment::Machine,
            Some(domain::Archetype::PullVertical),
            "Close Grip",
            *data::USER_ID,
        )
        .await
        .unwrap();

        assert_eq!(same, id);
        assert_eq!(store.read_exercises().await.unwrap().len(), 1);
        assert_eq!(store.read_variations(id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_resolve_skips_standard_variation() {
        let store = MemoryStore::new();
        let mut catalog = domain::ExerciseCatalog::new(vec![]);

        let id = domain::catalog::resolve(
            &store,
            &mut catalog,
            "Leg Press",
            domain::Equipment::Machine,
            Some(domain::Archetype::Squat),
            "Standard",
            *data::USER_ID,
        )
        .await
        .unwrap();

        assert!(store.read_variations(id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_synchronize_is_idempotent() {
        let store = MemoryStore::new();
        let mesocycle = mesocycle(&store, domain::Protocol::Occams).await;

        domain::sync::synchronize_protocol(&store, *data::USER_ID, &mesocycle, &TEMPLATE)
            .await
            .unwrap();

        let sessions = store.read_sessions(mesocycle.id).await.unwrap();
        assert_eq!(sessions.len(), 1);
        let rows = store.read_session_exercises(sessions[0].id).await.unwrap();
        assert_eq!(rows.len(), 2);

        domain::sync::synchronize_protocol(&store, *data::USER_ID, &mesocycle, &TEMPLATE)
            .await
            .unwrap();

        let sessions_after = store.read_sessions(mesocycle.id).await.unwrap();
        let rows_after = store
            .read_session_exercises(sessions_after[0].id)
            .await
            .unwrap();

        // unchanged template: same session, same exercise rows, no rewrites
        assert_eq!(sessions_after[0].id, sessions[0].id);
        assert_eq!(rows_after, rows);
        assert_eq!(store.read_exercises().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_synchronize_replaces_rows_on_template_change() {
        let store = MemoryStore::new();
        let mesocycle = mesocycle(&store, domain::Protocol::Occams).await;

        domain::sync::synchronize_protocol(&store, *data::USER_ID, &mesocycle, &TEMPLATE)
            .await
            .unwrap();
        let sessions = store.read_sessions(mesocycle.id).await.unwrap();
        let rows = store.read_session_exercises(sessions[0].id).await.unwrap();

        domain::sync::synchronize_protocol(&store, *data::USER_ID, &mesocycle, &CHANGED_TEMPLATE)
            .await
            .unwrap();
        let sessions_after = store.read_sessions(mesocycle.id).await.unwrap();
        let rows_after = store
            .read_session_exercises(sessions_after[0].id)
            .await
            .unwrap();

        // the session row is reused, its exercise rows are fully replaced
        assert_eq!(sessions_after[0].id, sessions[0].id);
        assert_eq!(rows_after.len(), rows.len());
        assert!(rows_after.iter().all(|after| rows.iter().all(|r| r.id != after.id)));
        assert_eq!(rows_after[1].target_reps, "5-8");
        // no duplicate catalog entries were created
        assert_eq!(store.read_exercises().await.unwrap().len(), 2);
    }

    #[rstest]
    #[case(3, false)]
    #[case(4, true)]
    #[case(12, true)]
    #[case(13, false)]
    #[tokio::test]
    async fn test_create_mesocycle_duration_validation(#[case] weeks: u8, #[case] valid: bool) {
        let service = domain::Service::new(MemoryStore::new());

        let result = service
            .create_mesocycle(
                *data::USER_ID,
                data::new_mesocycle(domain::Protocol::Custom, weeks),
            )
            .await;

        if valid {
            assert_eq!(result.unwrap().status, domain::MesocycleStatus::Active);
        } else {
            assert!(matches!(result, Err(domain::CreateError::Validation(_))));
        }
    }

    #[tokio::test]
    async fn test_create_mesocycle_supersedes_active() {
        let service = domain::Service::new(MemoryStore::new());

        let first = service
            .create_mesocycle(
                *data::USER_ID,
                data::new_mesocycle(domain::Protocol::Custom, 8),
            )
            .await
            .unwrap();
        let second = service
            .create_mesocycle(
                *data::USER_ID,
                data::new_mesocycle(domain::Protocol::Custom, 6),
            )
            .await
            .unwrap();

        let mesocycles = service.get_mesocycles(*data::USER_ID).await.unwrap();
        assert_eq!(mesocycles.len(), 2);
        let status = |id| mesocycles.iter().find(|m| m.id == id).unwrap().status;
        assert_eq!(status(first.id), domain::MesocycleStatus::Completed);
        assert_eq!(status(second.id), domain::MesocycleStatus::Active);
    }

    #[tokio::test]
    async fn test_get_active_program_none() {
        let service = domain::Service::new(MemoryStore::new());

        assert_eq!(service.get_active_program(*data::USER_ID).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_create_mesocycle_provisions_fixed_protocol() {
        let service = domain::Service::new(MemoryStore::new());

        service
            .create_mesocycle(
                *data::USER_ID,
                data::new_mesocycle(domain::Protocol::Occams, 8),
            )
            .await
            .unwrap();

        let program = service
            .get_active_program(*data::USER_ID)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(program.current_week, 1);
        assert_eq!(program.sessions.len(), 2);
        assert_eq!(program.sessions[0].session.name.as_ref(), "Occam's Workout A");
        assert_eq!(program.sessions[1].session.name.as_ref(), "Occam's Workout B");
        for session in &program.sessions {
            assert_eq!(session.exercises.len(), 3);
            assert!(session.session.prescription.is_some());
        }
        assert_eq!(program.last_session_id, None);
        assert_eq!(program.next_session_id, Some(program.sessions[0].session.id));
    }

    #[tokio::test]
    async fn test_get_active_program_is_idempotent() {
        let service = domain::Service::new(MemoryStore::new());

        service
            .create_mesocycle(
                *data::USER_ID,
                data::new_mesocycle(domain::Protocol::Occams, 8),
            )
            .await
            .unwrap();

        let first = service
            .get_active_program(*data::USER_ID)
            .await
            .unwrap()
            .unwrap();
        let second = service
            .get_active_program(*data::USER_ID)
            .await
            .unwrap()
            .unwrap();

        // repeated lazy synchronization leaves the exercise rows untouched
        let row_ids = |program: &domain::ActiveProgram| {
            program
                .sessions
                .iter()
                .flat_map(|s| s.exercises.iter().map(|e| e.id))
                .collect::<Vec<_>>()
        };
        assert_eq!(row_ids(&first), row_ids(&second));
    }

    #[tokio::test]
    async fn test_session_rotation_through_program() {
        let service = domain::Service::new(MemoryStore::new());

        let mesocycle = service
            .create_mesocycle(
                *data::USER_ID,
                data::new_mesocycle(domain::Protocol::Occams, 8),
            )
            .await
            .unwrap();

        let program = service
            .get_active_program(*data::USER_ID)
            .await
            .unwrap()
            .unwrap();
        let first = program.sessions[0].session.id;
        let second = program.sessions[1].session.id;
        assert_eq!(program.next_session_id, Some(first));

        service
            .start_session(*data::USER_ID, mesocycle.id, first)
            .await
            .unwrap();
        let program = service
            .get_active_program(*data::USER_ID)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(program.last_session_id, Some(first));
        assert_eq!(program.next_session_id, Some(second));

        // the rotation wraps around
        service
            .start_session(*data::USER_ID, mesocycle.id, second)
            .await
            .unwrap();
        let program = service
            .get_active_program(*data::USER_ID)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(program.next_session_id, Some(first));
    }

    #[tokio::test]
    async fn test_start_session_instantiates_skeleton() {
        let service = domain::Service::new(MemoryStore::new());

        let mesocycle = service
            .create_mesocycle(
                *data::USER_ID,
                data::new_mesocycle(domain::Protocol::Occams, 8),
            )
            .await
            .unwrap();
        let program = service
            .get_active_program(*data::USER_ID)
            .await
            .unwrap()
            .unwrap();
        let session = &program.sessions[0];

        let workout = service
            .start_session(*data::USER_ID, mesocycle.id, session.session.id)
            .await
            .unwrap();

        assert_eq!(workout.mesocycle_id, Some(mesocycle.id));
        assert_eq!(workout.session_id, Some(session.session.id));
        assert_eq!(workout.date, *data::TODAY);
        assert_eq!(workout.exercises.len(), session.exercises.len());
        for (instance, target) in workout.exercises.iter().zip(&session.exercises) {
            assert_eq!(instance.exercise_id, target.exercise_id);
            assert_eq!(instance.sets.len(), target.target_sets as usize);
            assert!(instance.sets.iter().all(|s| !s.completed));
        }
    }

    #[tokio::test]
    async fn test_start_session_unknown_references() {
        let service = domain::Service::new(MemoryStore::new());

        let mesocycle = service
            .create_mesocycle(
                *data::USER_ID,
                data::new_mesocycle(domain::Protocol::Occams, 8),
            )
            .await
            .unwrap();

        assert!(matches!(
            service
                .start_session(*data::USER_ID, mesocycle.id, domain::SessionID::from(99))
                .await,
            Err(domain::CreateError::NotFound)
        ));
        assert!(matches!(
            service
                .start_session(
                    *data::USER_ID,
                    domain::MesocycleID::from(99),
                    domain::SessionID::from(99)
                )
                .await,
            Err(domain::CreateError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_create_custom_session_appends() {
        let service = domain::Service::new(MemoryStore::new());

        let mesocycle = service
            .create_mesocycle(
                *data::USER_ID,
                data::new_mesocycle(domain::Protocol::Custom, 8),
            )
            .await
            .unwrap();

        let first = service
            .create_custom_session(*data::USER_ID, mesocycle.id, None, None)
            .await
            .unwrap();
        assert_eq!(first.order, 1);
        assert!(
            first.name.as_ref().contains(&data::TODAY.to_string()),
            "default name should embed the current date: {}",
            first.name
        );
        assert_eq!(first.prescription, None);

        let second = service
            .create_custom_session(
                *data::USER_ID,
                mesocycle.id,
                Some(domain::GoalFocus::Strength),
                Some(domain::Name::new("Upper Body").unwrap()),
            )
            .await
            .unwrap();
        assert_eq!(second.order, 2);
        assert_eq!(second.name.as_ref(), "Upper Body");
        assert_eq!(second.focus, Some(domain::GoalFocus::Strength));
    }

    #[tokio::test]
    async fn test_create_custom_session_rejected_for_fixed_protocol() {
        let service = domain::Service::new(MemoryStore::new());

        let mesocycle = service
            .create_mesocycle(
                *data::USER_ID,
                data::new_mesocycle(domain::Protocol::Occams, 8),
            )
            .await
            .unwrap();

        assert!(matches!(
            service
                .create_custom_session(*data::USER_ID, mesocycle.id, None, None)
                .await,
            Err(domain::CreateError::Conflict)
        ));
    }

    #[tokio::test]
    async fn test_unprovisioned_store_is_translated() {
        let service = domain::Service::new(MemoryStore::without_periodization());

        let result = service.get_active_program(*data::USER_ID).await;
        assert!(matches!(
            result,
            Err(domain::ReadError::Storage(
                domain::StorageError::MissingRelation(_)
            ))
        ));
        if let Err(err) = result {
            assert!(err.to_string().contains("not provisioned"));
        }

        assert!(matches!(
            service
                .create_mesocycle(
                    *data::USER_ID,
                    data::new_mesocycle(domain::Protocol::Custom, 8),
                )
                .await,
            Err(domain::CreateError::Storage(
                domain::StorageError::MissingRelation(_)
            ))
        ));

        // the workout relations predate the periodization migration
        assert_eq!(service.get_workouts(*data::USER_ID).await.unwrap(), vec![]);
    }

    #[tokio::test]
    async fn test_generate_workout_respects_recovery() {
        let store = MemoryStore::new();
        let mut ids = Vec::new();
        for (order, (name, archetype)) in [
            ("Back Squat", domain::Archetype::Squat),
            ("Romanian Deadlift", domain::Archetype::Hinge),
            ("Bench Press", domain::Archetype::PushHorizontal),
            ("Barbell Row", domain::Archetype::PullHorizontal),
            ("Overhead Press", domain::Archetype::PushVertical),
            ("Walking Lunge", domain::Archetype::Lunge),
        ]
        .into_iter()
        .enumerate()
        {
            let exercise = store
                .create_exercise(data::new_exercise(
                    name,
                    Some(archetype),
                    u32::try_from(order).unwrap() + 1,
                ))
                .await
                .unwrap();
            ids.push(exercise.id);
        }
        store
            .create_workout(data::new_workout(1, &[ids[0], ids[1]], 3))
            .await
            .unwrap();

        let service = domain::Service::new(store);
        let selected = service
            .generate_workout(*data::USER_ID, &domain::ArchetypeTargets::default())
            .await
            .unwrap();

        assert_eq!(selected.len(), 3);
        for exercise in &selected {
            assert!(!ids[..2].contains(&exercise.id));
        }
    }

    #[tokio::test]
    async fn test_generate_workout_empty_catalog() {
        let service = domain::Service::new(MemoryStore::new());

        assert!(matches!(
            service
                .generate_workout(*data::USER_ID, &domain::ArchetypeTargets::default())
                .await,
            Err(domain::GenerateError::EmptyCatalog)
        ));
    }
}
