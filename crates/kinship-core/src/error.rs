use thiserror::Error;

use crate::ids::{FamilyId, PersonId};

/// Model invariant violations shared across Kinship crates.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// A person was bound as a spouse twice.
    #[error("person {person} is already a spouse in family {existing}")]
    AlreadyMarried { person: PersonId, existing: FamilyId },
    /// Husband and wife are the same person.
    #[error("family {family}: husband and wife are the same person {person}")]
    SelfMarriage { family: FamilyId, person: PersonId },
    /// A spouse does not carry the sex required by the role.
    #[error("family {family}: person {person} cannot be {role}")]
    SexRole {
        family: FamilyId,
        person: PersonId,
        role: &'static str,
    },
    /// A child of the family is also one of its spouses.
    #[error("family {family}: person {person} is both spouse and child")]
    SpouseIsChild { family: FamilyId, person: PersonId },
    /// An entity was inserted out of allocation order.
    #[error("{kind} {id} inserted out of order (expected {expected})")]
    OutOfOrder {
        kind: &'static str,
        id: u64,
        expected: u64,
    },
    /// An identifier does not resolve to an entity.
    #[error("unknown {kind} {id}")]
    Unknown { kind: &'static str, id: u64 },
}

/// Convenience alias for results returned by Kinship crates.
pub type Result<T> = std::result::Result<T, Error>;
