#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

pub mod catalog;
pub mod generator;
pub mod rotation;
pub mod sync;

mod archetype;
mod error;
mod exercise;
mod mesocycle;
mod name;
mod protocol;
mod service;
mod training;
mod user;
mod workout;

pub use archetype::{Archetype, ArchetypeTargets, DEFAULT_WEEKLY_TARGETS};
pub use catalog::ExerciseCatalog;
pub use error::{
    CreateError, DeleteError, ReadError, StorageError, SyncError, UpdateError, ValidationError,
};
pub use exercise::{
    Equipment, Exercise, ExerciseID, ExerciseRepository, ExerciseVariation, NewExercise,
    STANDARD_VARIATION, VariationID,
};
pub use generator::GenerateError;
pub use mesocycle::{
    ActiveProgram, GoalFocus, GoalFocusError, Mesocycle, MesocycleID, MesocycleRepository,
    MesocycleSession, MesocycleStatus, NewMesocycle, NewSession, NewSessionExercise, Prescription,
    ProgramService, ProgramSession, SessionExercise, SessionExerciseID, SessionID,
    SessionRepository, current_week,
};
pub use name::{Name, NameError};
pub use protocol::{
    ExerciseTemplate, OCCAMS, Protocol, ProtocolError, ProtocolTemplate, SessionTemplate,
};
pub use service::Service;
pub use training::{Reps, RepsError, Weeks, WeeksError, Weight, WeightError};
pub use user::UserID;
pub use workout::{
    NewWorkout, Workout, WorkoutExercise, WorkoutID, WorkoutRepository, WorkoutService, WorkoutSet,
    completed_sets_per_archetype, latest_workout,
};
