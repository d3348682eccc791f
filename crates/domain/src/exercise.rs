use std::{fmt, slice::Iter};

use derive_more::Deref;
use uuid::Uuid;

use crate::{Archetype, CreateError, Name, ReadError, UserID};

/// The engine only ever reads the catalog and appends to it; existing
/// exercises are never updated or deleted here.
#[allow(async_fn_in_trait)]
pub trait ExerciseRepository {
    async fn read_exercises(&self) -> Result<Vec<Exercise>, ReadError>;
    async fn create_exercise(&self, exercise: NewExercise) -> Result<Exercise, CreateError>;
    async fn read_variations(
        &self,
        exercise_id: ExerciseID,
    ) -> Result<Vec<ExerciseVariation>, ReadError>;
    async fn create_variation(
        &self,
        exercise_id: ExerciseID,
        name: Name,
    ) -> Result<ExerciseVariation, CreateError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exercise {
    pub id: ExerciseID,
    pub name: Name,
    pub equipment: Equipment,
    pub archetype: Option<Archetype>,
    pub order: u32,
    pub created_by: UserID,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewExercise {
    pub name: Name,
    pub equipment: Equipment,
    pub archetype: Option<Archetype>,
    pub order: u32,
    pub created_by: UserID,
}

#[derive(Deref, Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct ExerciseID(Uuid);

impl ExerciseID {
    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl From<Uuid> for ExerciseID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for ExerciseID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

/// The variation name that means "no named variation".
pub const STANDARD_VARIATION: &str = "Standard";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExerciseVariation {
    pub id: VariationID,
    pub exercise_id: ExerciseID,
    pub name: Name,
}

#[derive(Deref, Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct VariationID(Uuid);

impl VariationID {
    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl From<Uuid> for VariationID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for VariationID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Equipment {
    Barbell,
    Bodyweight,
    Cable,
    Dumbbell,
    Kettlebell,
    Machine,
    ResistanceBand,
}

impl Equipment {
    pub fn iter() -> Iter<'static, Equipment> {
        static EQUIPMENT: [Equipment; 7] = [
            Equipment::Barbell,
            Equipment::Bodyweight,
            Equipment::Cable,
            Equipment::Dumbbell,
            Equipment::Kettlebell,
            Equipment::Machine,
            Equipment::ResistanceBand,
        ];
        EQUIPMENT.iter()
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Equipment::Barbell => "Barbell",
            Equipment::Bodyweight => "Bodyweight",
            Equipment::Cable => "Cable",
            Equipment::Dumbbell => "Dumbbell",
            Equipment::Kettlebell => "Kettlebell",
            Equipment::Machine => "Machine",
            Equipment::ResistanceBand => "Resistance Band",
        }
    }
}

impl fmt::Display for Equipment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
