use chrono::Local;
use log::{debug, error};

use crate::{
    ActiveProgram, ArchetypeTargets, CreateError, Exercise, ExerciseCatalog, ExerciseRepository,
    GenerateError, GoalFocus, Mesocycle, MesocycleID, MesocycleRepository, MesocycleSession,
    MesocycleStatus, Name, NewMesocycle, NewSession, NewWorkout, ProgramService, ProgramSession,
    ReadError, SessionID, SessionRepository, UserID, ValidationError, Weeks, Workout,
    WorkoutExercise, WorkoutRepository, WorkoutService, WorkoutSet, generator, mesocycle, rotation,
    sync,
};

pub struct Service<R> {
    repository: R,
}

impl<R> Service<R>
where
    R: ExerciseRepository + MesocycleRepository + SessionRepository + WorkoutRepository,
{
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

macro_rules! log_on_error {
    ($func: expr, $error: ident, $action: literal, $entity: literal) => {{
        let result = $func.await;
        match result {
            Ok(_) => {}
            Err(ref err) => match err {
                $error::Storage(crate::StorageError::NoConnection) => {
                    debug!("failed to {} {}: {err}", $action, $entity);
                }
                _ => {
                    error!("failed to {} {}: {err}", $action, $entity);
                }
            },
        }
        result
    }};
}

impl<R> ProgramService for Service<R>
where
    R: ExerciseRepository + MesocycleRepository + SessionRepository + WorkoutRepository,
{
    async fn get_mesocycles(&self, user_id: UserID) -> Result<Vec<Mesocycle>, ReadError> {
        log_on_error!(
            self.repository.read_mesocycles(user_id),
            ReadError,
            "get",
            "mesocycles"
        )
    }

    async fn create_mesocycle(
        &self,
        user_id: UserID,
        mesocycle: NewMesocycle,
    ) -> Result<Mesocycle, CreateError> {
        log_on_error!(
            self.create_mesocycle_steps(user_id, mesocycle),
            CreateError,
            "create",
            "mesocycle"
        )
    }

    async fn get_active_program(
        &self,
        user_id: UserID,
    ) -> Result<Option<ActiveProgram>, ReadError> {
        log_on_error!(
            self.active_program_steps(user_id),
            ReadError,
            "get",
            "active program"
        )
    }

    async fn create_custom_session(
        &self,
        user_id: UserID,
        mesocycle_id: MesocycleID,
        focus: Option<GoalFocus>,
        name: Option<Name>,
    ) -> Result<MesocycleSession, CreateError> {
        log_on_error!(
            self.create_custom_session_steps(user_id, mesocycle_id, focus, name),
            CreateError,
            "create",
            "custom session"
        )
    }

    async fn start_session(
        &self,
        user_id: UserID,
        mesocycle_id: MesocycleID,
        session_id: SessionID,
    ) -> Result<Workout, CreateError> {
        log_on_error!(
            self.start_session_steps(user_id, mesocycle_id, session_id),
            CreateError,
            "start",
            "session"
        )
    }
}

impl<R> WorkoutService for Service<R>
where
    R: ExerciseRepository + MesocycleRepository + SessionRepository + WorkoutRepository,
{
    async fn get_workouts(&self, user_id: UserID) -> Result<Vec<Workout>, ReadError> {
        log_on_error!(
            self.repository.read_workouts(user_id),
            ReadError,
            "get",
            "workouts"
        )
    }

    async fn generate_workout(
        &self,
        user_id: UserID,
        targets: &ArchetypeTargets,
    ) -> Result<Vec<Exercise>, GenerateError> {
        log_on_error!(
            self.generate_workout_steps(user_id, targets),
            GenerateError,
            "generate",
            "workout"
        )
    }
}

impl<R> Service<R>
where
    R: ExerciseRepository + MesocycleRepository + SessionRepository + WorkoutRepository,
{
    async fn create_mesocycle_steps(
        &self,
        user_id: UserID,
        mesocycle: NewMesocycle,
    ) -> Result<Mesocycle, CreateError> {
        let duration = Weeks::new(mesocycle.duration_weeks)
            .map_err(|err| ValidationError::Other(err.into()))?;

        // Each step is a separate round trip; a failure leaves partial state
        // that the next synchronization pass heals.
        let mesocycles = self.repository.read_mesocycles(user_id).await?;
        for active in mesocycles
            .iter()
            .filter(|m| m.status == MesocycleStatus::Active)
        {
            self.repository
                .modify_mesocycle_status(active.id, MesocycleStatus::Completed)
                .await?;
        }

        let created = self
            .repository
            .create_mesocycle(user_id, mesocycle, duration)
            .await?;

        if let Some(template) = created.protocol.template() {
            sync::synchronize_protocol(&self.repository, user_id, &created, template).await?;
        }

        Ok(created)
    }

    async fn active_program_steps(
        &self,
        user_id: UserID,
    ) -> Result<Option<ActiveProgram>, ReadError> {
        let mesocycles = self.repository.read_mesocycles(user_id).await?;
        let Some(mesocycle) = mesocycles
            .into_iter()
            .find(|m| m.status == MesocycleStatus::Active)
        else {
            return Ok(None);
        };

        if let Some(template) = mesocycle.protocol.template() {
            sync::synchronize_protocol(&self.repository, user_id, &mesocycle, template).await?;
        }

        let sessions = self.repository.read_sessions(mesocycle.id).await?;
        let mut program_sessions = Vec::with_capacity(sessions.len());
        for session in &sessions {
            let exercises = self.repository.read_session_exercises(session.id).await?;
            program_sessions.push(ProgramSession {
                session: session.clone(),
                exercises,
            });
        }

        let workouts = self.repository.read_workouts(user_id).await?;
        let last_session_id = workouts
            .iter()
            .filter(|w| w.mesocycle_id == Some(mesocycle.id))
            .max_by_key(|w| w.created_at)
            .and_then(|w| w.session_id);
        let next_session_id = rotation::next_session(&sessions, last_session_id).map(|s| s.id);
        let current_week = mesocycle::current_week(mesocycle.start_date, mesocycle.duration);

        Ok(Some(ActiveProgram {
            mesocycle,
            sessions: program_sessions,
            current_week,
            last_session_id,
            next_session_id,
        }))
    }

    async fn create_custom_session_steps(
        &self,
        user_id: UserID,
        mesocycle_id: MesocycleID,
        focus: Option<GoalFocus>,
        name: Option<Name>,
    ) -> Result<MesocycleSession, CreateError> {
        let mesocycle = self.owned_mesocycle(user_id, mesocycle_id).await?;
        if mesocycle.status != MesocycleStatus::Active || mesocycle.protocol.is_fixed() {
            return Err(CreateError::Conflict);
        }

        let sessions = self.repository.read_sessions(mesocycle_id).await?;
        let order = sessions.iter().map(|s| s.order).max().unwrap_or(0) + 1;
        let name = match name {
            Some(name) => name,
            None => {
                Name::new(&format!("Session {order} ({})", Local::now().date_naive()))
                    .map_err(|err| CreateError::Other(err.into()))?
            }
        };

        self.repository
            .create_session(NewSession {
                mesocycle_id,
                name,
                order,
                focus,
                prescription: None,
            })
            .await
    }

    #[allow(clippy::cast_possible_truncation)]
    async fn start_session_steps(
        &self,
        user_id: UserID,
        mesocycle_id: MesocycleID,
        session_id: SessionID,
    ) -> Result<Workout, CreateError> {
        let mesocycle = self.owned_mesocycle(user_id, mesocycle_id).await?;
        if mesocycle.status != MesocycleStatus::Active {
            return Err(CreateError::Conflict);
        }

        let sessions = self.repository.read_sessions(mesocycle_id).await?;
        let session = sessions
            .iter()
            .find(|s| s.id == session_id)
            .ok_or(CreateError::NotFound)?;
        let targets = self.repository.read_session_exercises(session.id).await?;

        let exercises = targets
            .iter()
            .map(|target| WorkoutExercise {
                exercise_id: target.exercise_id,
                order: target.order,
                sets: vec![WorkoutSet::default(); target.target_sets as usize],
            })
            .collect::<Vec<_>>();

        self.repository
            .create_workout(NewWorkout {
                user_id,
                mesocycle_id: Some(mesocycle_id),
                session_id: Some(session.id),
                date: Local::now().date_naive(),
                notes: String::new(),
                exercises,
            })
            .await
    }

    async fn generate_workout_steps(
        &self,
        user_id: UserID,
        targets: &ArchetypeTargets,
    ) -> Result<Vec<Exercise>, GenerateError> {
        let catalog = ExerciseCatalog::new(self.repository.read_exercises().await?);
        let history = self.repository.read_workouts(user_id).await?;
        generator::generate(&catalog, targets, &history)
    }

    async fn owned_mesocycle(
        &self,
        user_id: UserID,
        mesocycle_id: MesocycleID,
    ) -> Result<Mesocycle, CreateError> {
        let mesocycles = self.repository.read_mesocycles(user_id).await?;
        mesocycles
            .into_iter()
            .find(|m| m.id == mesocycle_id)
            .ok_or(CreateError::NotFound)
    }
}
