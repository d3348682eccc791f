use std::fmt;

use crate::{Archetype, Equipment, GoalFocus};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Protocol {
    Occams,
    Custom,
}

impl Protocol {
    /// The declarative template for fixed protocols, `None` for `Custom`.
    #[must_use]
    pub fn template(self) -> Option<&'static ProtocolTemplate> {
        match self {
            Protocol::Occams => Some(&OCCAMS),
            Protocol::Custom => None,
        }
    }

    #[must_use]
    pub fn is_fixed(self) -> bool {
        self.template().is_some()
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Protocol::Occams => "occams",
                Protocol::Custom => "custom",
            }
        )
    }
}

impl TryFrom<&str> for Protocol {
    type Error = ProtocolError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "occams" => Ok(Protocol::Occams),
            "custom" => Ok(Protocol::Custom),
            _ => Err(ProtocolError::Unknown(value.to_string())),
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ProtocolError {
    #[error("unknown protocol: {0}")]
    Unknown(String),
}

#[derive(Clone, Copy, Debug)]
pub struct ProtocolTemplate {
    pub name: &'static str,
    pub sessions: &'static [SessionTemplate],
}

#[derive(Clone, Copy, Debug)]
pub struct SessionTemplate {
    pub name: &'static str,
    pub focus: Option<GoalFocus>,
    pub sets_per_exercise: u32,
    pub rep_range: &'static str,
    pub progression: &'static str,
    pub exercises: &'static [ExerciseTemplate],
}

#[derive(Clone, Copy, Debug)]
pub struct ExerciseTemplate {
    pub name: &'static str,
    pub variation: &'static str,
    pub equipment: Equipment,
    pub archetype: Option<Archetype>,
    pub target_sets: u32,
    pub target_reps: &'static str,
    pub load_increment: f32,
    pub notes: &'static str,
}

pub static OCCAMS: ProtocolTemplate = ProtocolTemplate {
    name: "Occam's Protocol",
    sessions: &[
        SessionTemplate {
            name: "Occam's Workout A",
            focus: Some(GoalFocus::Hypertrophy),
            sets_per_exercise: 1,
            rep_range: "5-7",
            progression: "Increase the load at the next session once all target reps \
                          are completed at a 5/5 cadence.",
            exercises: &[
                ExerciseTemplate {
                    name: "Lat Pulldown",
                    variation: "Close Grip",
                    equipment: Equipment::Machine,
                    archetype: Some(Archetype::PullVertical),
                    target_sets: 1,
                    target_reps: "7",
                    load_increment: 2.5,
                    notes: "One set to failure, 5/5 cadence.",
                },
                ExerciseTemplate {
                    name: "Shoulder Press",
                    variation: "Standard",
                    equipment: Equipment::Machine,
                    archetype: Some(Archetype::PushVertical),
                    target_sets: 1,
                    target_reps: "7",
                    load_increment: 2.5,
                    notes: "One set to failure, 5/5 cadence.",
                },
                ExerciseTemplate {
                    name: "Myotatic Crunch",
                    variation: "Standard",
                    equipment: Equipment::Bodyweight,
                    archetype: Some(Archetype::Core),
                    target_sets: 1,
                    target_reps: "10",
                    load_increment: 0.0,
                    notes: "",
                },
            ],
        },
        SessionTemplate {
            name: "Occam's Workout B",
            focus: Some(GoalFocus::Hypertrophy),
            sets_per_exercise: 1,
            rep_range: "5-7",
            progression: "Increase the load at the next session once all target reps \
                          are completed at a 5/5 cadence.",
            exercises: &[
                ExerciseTemplate {
                    name: "Bench Press",
                    variation: "Slight Incline",
                    equipment: Equipment::Machine,
                    archetype: Some(Archetype::PushHorizontal),
                    target_sets: 1,
                    target_reps: "7",
                    load_increment: 2.5,
                    notes: "One set to failure, 5/5 cadence.",
                },
                ExerciseTemplate {
                    name: "Leg Press",
                    variation: "Standard",
                    equipment: Equipment::Machine,
                    archetype: Some(Archetype::Squat),
                    target_sets: 1,
                    target_reps: "10",
                    load_increment: 5.0,
                    notes: "One set to failure, 5/5 cadence.",
                },
                ExerciseTemplate {
                    name: "Kettlebell Swing",
                    variation: "Standard",
                    equipment: Equipment::Kettlebell,
                    archetype: Some(Archetype::Hinge),
                    target_sets: 1,
                    target_reps: "20",
                    load_increment: 4.0,
                    notes: "",
                },
            ],
        },
    ],
};
