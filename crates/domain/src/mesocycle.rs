use std::fmt;

use chrono::{Local, NaiveDate, NaiveDateTime};
use derive_more::Deref;
use uuid::Uuid;

use crate::{
    CreateError, DeleteError, ExerciseID, Name, Protocol, ReadError, UpdateError, UserID, Weeks,
    Weight, Workout,
};

/// The training-program lifecycle operations exposed to the UI layer.
#[allow(async_fn_in_trait)]
pub trait ProgramService {
    async fn get_mesocycles(&self, user_id: UserID) -> Result<Vec<Mesocycle>, ReadError>;
    async fn create_mesocycle(
        &self,
        user_id: UserID,
        mesocycle: NewMesocycle,
    ) -> Result<Mesocycle, CreateError>;
    async fn get_active_program(&self, user_id: UserID)
    -> Result<Option<ActiveProgram>, ReadError>;
    async fn create_custom_session(
        &self,
        user_id: UserID,
        mesocycle_id: MesocycleID,
        focus: Option<GoalFocus>,
        name: Option<Name>,
    ) -> Result<MesocycleSession, CreateError>;
    async fn start_session(
        &self,
        user_id: UserID,
        mesocycle_id: MesocycleID,
        session_id: SessionID,
    ) -> Result<Workout, CreateError>;
}

#[allow(async_fn_in_trait)]
pub trait MesocycleRepository {
    async fn read_mesocycles(&self, user_id: UserID) -> Result<Vec<Mesocycle>, ReadError>;
    async fn create_mesocycle(
        &self,
        user_id: UserID,
        mesocycle: NewMesocycle,
        duration: Weeks,
    ) -> Result<Mesocycle, CreateError>;
    async fn modify_mesocycle_status(
        &self,
        id: MesocycleID,
        status: MesocycleStatus,
    ) -> Result<Mesocycle, UpdateError>;
}

#[allow(async_fn_in_trait)]
pub trait SessionRepository {
    async fn read_sessions(
        &self,
        mesocycle_id: MesocycleID,
    ) -> Result<Vec<MesocycleSession>, ReadError>;
    async fn create_session(&self, session: NewSession) -> Result<MesocycleSession, CreateError>;
    async fn replace_session(
        &self,
        session: MesocycleSession,
    ) -> Result<MesocycleSession, UpdateError>;
    async fn read_session_exercises(
        &self,
        session_id: SessionID,
    ) -> Result<Vec<SessionExercise>, ReadError>;
    async fn delete_session_exercises(&self, session_id: SessionID) -> Result<(), DeleteError>;
    async fn create_session_exercises(
        &self,
        session_id: SessionID,
        exercises: Vec<NewSessionExercise>,
    ) -> Result<Vec<SessionExercise>, CreateError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mesocycle {
    pub id: MesocycleID,
    pub user_id: UserID,
    pub name: Name,
    pub focus: GoalFocus,
    pub protocol: Protocol,
    pub start_date: NaiveDate,
    pub duration: Weeks,
    pub status: MesocycleStatus,
    pub notes: String,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMesocycle {
    pub name: Name,
    pub focus: GoalFocus,
    pub protocol: Protocol,
    pub start_date: NaiveDate,
    pub duration_weeks: u8,
    pub notes: String,
}

#[derive(Deref, Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct MesocycleID(Uuid);

impl MesocycleID {
    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl From<Uuid> for MesocycleID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for MesocycleID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MesocycleStatus {
    Active,
    Completed,
    Cancelled,
}

impl fmt::Display for MesocycleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                MesocycleStatus::Active => "active",
                MesocycleStatus::Completed => "completed",
                MesocycleStatus::Cancelled => "cancelled",
            }
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GoalFocus {
    Strength,
    Hypertrophy,
    Endurance,
    GeneralFitness,
}

impl fmt::Display for GoalFocus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                GoalFocus::Strength => "strength",
                GoalFocus::Hypertrophy => "hypertrophy",
                GoalFocus::Endurance => "endurance",
                GoalFocus::GeneralFitness => "general_fitness",
            }
        )
    }
}

impl TryFrom<&str> for GoalFocus {
    type Error = GoalFocusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "strength" => Ok(GoalFocus::Strength),
            "hypertrophy" => Ok(GoalFocus::Hypertrophy),
            "endurance" => Ok(GoalFocus::Endurance),
            "general_fitness" => Ok(GoalFocus::GeneralFitness),
            _ => Err(GoalFocusError::Unknown(value.to_string())),
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum GoalFocusError {
    #[error("unknown goal focus: {0}")]
    Unknown(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MesocycleSession {
    pub id: SessionID,
    pub mesocycle_id: MesocycleID,
    pub name: Name,
    pub order: u32,
    pub focus: Option<GoalFocus>,
    pub prescription: Option<Prescription>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSession {
    pub mesocycle_id: MesocycleID,
    pub name: Name,
    pub order: u32,
    pub focus: Option<GoalFocus>,
    pub prescription: Option<Prescription>,
}

/// Prescribed execution parameters, only populated for fixed protocols.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prescription {
    pub sets_per_exercise: u32,
    pub rep_range: String,
    pub progression: String,
}

#[derive(Deref, Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct SessionID(Uuid);

impl SessionID {
    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl From<Uuid> for SessionID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for SessionID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionExercise {
    pub id: SessionExerciseID,
    pub session_id: SessionID,
    pub exercise_id: ExerciseID,
    pub order: u32,
    pub target_sets: u32,
    pub target_reps: String,
    pub load_increment: Weight,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewSessionExercise {
    pub exercise_id: ExerciseID,
    pub order: u32,
    pub target_sets: u32,
    pub target_reps: String,
    pub load_increment: Weight,
    pub notes: String,
}

#[derive(Deref, Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SessionExerciseID(Uuid);

impl SessionExerciseID {
    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl From<Uuid> for SessionExerciseID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for SessionExerciseID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

/// Composed read model returned by `get_active_program`.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveProgram {
    pub mesocycle: Mesocycle,
    pub sessions: Vec<ProgramSession>,
    pub current_week: u32,
    pub last_session_id: Option<SessionID>,
    pub next_session_id: Option<SessionID>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProgramSession {
    pub session: MesocycleSession,
    pub exercises: Vec<SessionExercise>,
}

/// 1-based week within the mesocycle, capped at its duration.
#[must_use]
pub fn current_week(start_date: NaiveDate, duration: Weeks) -> u32 {
    let today = Local::now().date_naive();
    let days = (today - start_date).num_days().max(0);
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let week = (days / 7 + 1) as u32;
    week.min(u32::from(u8::from(duration)))
}
