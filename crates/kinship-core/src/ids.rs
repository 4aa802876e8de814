use std::fmt;

use serde::{Deserialize, Serialize};

/// Entity kinds that receive their own identifier sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Person,
    Family,
}

impl EntityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::Person => "person",
            EntityKind::Family => "family",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FamilyId(pub u64);

impl PersonId {
    /// Local name used as subject and `name` literal in the emitted graph.
    pub fn local_name(self) -> String {
        format!("I{:08}", self.0)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl FamilyId {
    pub fn local_name(self) -> String {
        format!("F{:08}", self.0)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.local_name())
    }
}

impl fmt::Display for FamilyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.local_name())
    }
}

/// Issues strictly increasing identifiers, one sequence per entity kind.
///
/// Identifiers start at zero and are never reused. The allocator is owned by a
/// single generation run, so two runs never share a sequence.
#[derive(Debug, Default, Clone)]
pub struct IdAllocator {
    next_person: u64,
    next_family: u64,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self, kind: EntityKind) -> u64 {
        let slot = match kind {
            EntityKind::Person => &mut self.next_person,
            EntityKind::Family => &mut self.next_family,
        };
        let id = *slot;
        *slot += 1;
        id
    }

    pub fn next_person(&mut self) -> PersonId {
        PersonId(self.next_id(EntityKind::Person))
    }

    pub fn next_family(&mut self) -> FamilyId {
        FamilyId(self.next_id(EntityKind::Family))
    }

    /// Number of identifiers issued so far for `kind`.
    pub fn issued(&self, kind: EntityKind) -> u64 {
        match kind {
            EntityKind::Person => self.next_person,
            EntityKind::Family => self.next_family,
        }
    }
}
