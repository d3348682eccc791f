use std::{collections::BTreeMap, fmt, slice::Iter};

/// Canonical movement patterns used to bucket exercises for weekly volume
/// accounting.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Archetype {
    Squat,
    Hinge,
    Lunge,
    PushHorizontal,
    PushVertical,
    PullHorizontal,
    PullVertical,
    Core,
    Carry,
}

impl Archetype {
    pub fn iter() -> Iter<'static, Archetype> {
        static ARCHETYPES: [Archetype; 9] = [
            Archetype::Squat,
            Archetype::Hinge,
            Archetype::Lunge,
            Archetype::PushHorizontal,
            Archetype::PushVertical,
            Archetype::PullHorizontal,
            Archetype::PullVertical,
            Archetype::Core,
            Archetype::Carry,
        ];
        ARCHETYPES.iter()
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Archetype::Squat => "squat",
            Archetype::Hinge => "hinge",
            Archetype::Lunge => "lunge",
            Archetype::PushHorizontal => "push_horizontal",
            Archetype::PushVertical => "push_vertical",
            Archetype::PullHorizontal => "pull_horizontal",
            Archetype::PullVertical => "pull_vertical",
            Archetype::Core => "core",
            Archetype::Carry => "carry",
        }
    }
}

impl fmt::Display for Archetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

pub const DEFAULT_WEEKLY_TARGETS: [(Archetype, u32); 9] = [
    (Archetype::Squat, 6),
    (Archetype::Hinge, 6),
    (Archetype::Lunge, 3),
    (Archetype::PushHorizontal, 6),
    (Archetype::PushVertical, 4),
    (Archetype::PullHorizontal, 6),
    (Archetype::PullVertical, 4),
    (Archetype::Core, 4),
    (Archetype::Carry, 2),
];

/// Weekly set-count targets per archetype. Injected into the generator so
/// coaching policy can be swapped per deployment or test.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArchetypeTargets(Vec<(Archetype, u32)>);

impl ArchetypeTargets {
    #[must_use]
    pub fn new(targets: Vec<(Archetype, u32)>) -> Self {
        Self(targets)
    }

    /// Positive shortfalls against the targets, largest first. The sort is
    /// stable, so equal deficits keep the order of the targets table.
    #[must_use]
    pub fn deficits(&self, completed: &BTreeMap<Archetype, u32>) -> Vec<(Archetype, u32)> {
        let mut deficits = self
            .0
            .iter()
            .filter_map(|(archetype, target)| {
                let actual = completed.get(archetype).copied().unwrap_or(0);
                if actual < *target {
                    Some((*archetype, target - actual))
                } else {
                    None
                }
            })
            .collect::<Vec<_>>();
        deficits.sort_by(|a, b| b.1.cmp(&a.1));
        deficits
    }
}

impl Default for ArchetypeTargets {
    fn default() -> Self {
        Self(DEFAULT_WEEKLY_TARGETS.to_vec())
    }
}
