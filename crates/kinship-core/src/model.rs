use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::ids::{FamilyId, PersonId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    pub fn as_str(self) -> &'static str {
        match self {
            Sex::Male => "male",
            Sex::Female => "female",
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a person exists in the population.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PersonOrigin {
    /// Husband or wife of a founding couple.
    Founder,
    /// Born into `family`.
    Child { family: FamilyId },
    /// Outsider introduced to marry a lineage child during pristine growth.
    Import,
}

impl PersonOrigin {
    pub fn label(self) -> &'static str {
        match self {
            PersonOrigin::Founder => "founder",
            PersonOrigin::Child { .. } => "child",
            PersonOrigin::Import => "import",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Person {
    pub id: PersonId,
    pub name: String,
    pub sex: Sex,
    /// Depth from the lineage root; founders are generation 0.
    pub generation: u32,
    pub origin: PersonOrigin,
    spouse_family: Option<FamilyId>,
}

impl Person {
    pub fn founder(id: PersonId, sex: Sex) -> Self {
        Self::with_origin(id, sex, 0, PersonOrigin::Founder)
    }

    pub fn child(id: PersonId, sex: Sex, family: FamilyId, generation: u32) -> Self {
        Self::with_origin(id, sex, generation, PersonOrigin::Child { family })
    }

    /// An imported partner takes the generation of the lineage child they marry.
    pub fn import(id: PersonId, sex: Sex, generation: u32) -> Self {
        Self::with_origin(id, sex, generation, PersonOrigin::Import)
    }

    fn with_origin(id: PersonId, sex: Sex, generation: u32, origin: PersonOrigin) -> Self {
        Self {
            id,
            name: id.local_name(),
            sex,
            generation,
            origin,
            spouse_family: None,
        }
    }

    pub fn origin_family(&self) -> Option<FamilyId> {
        match self.origin {
            PersonOrigin::Child { family } => Some(family),
            PersonOrigin::Founder | PersonOrigin::Import => None,
        }
    }

    pub fn spouse_family(&self) -> Option<FamilyId> {
        self.spouse_family
    }

    pub fn is_single(&self) -> bool {
        self.spouse_family.is_none()
    }

    /// Record the family in which this person is husband or wife.
    pub fn bind_spouse(&mut self, family: FamilyId) -> Result<()> {
        if let Some(existing) = self.spouse_family {
            return Err(Error::AlreadyMarried {
                person: self.id,
                existing,
            });
        }
        self.spouse_family = Some(family);
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FamilyPhase {
    Pristine,
    Mixed,
}

impl FamilyPhase {
    pub fn as_str(self) -> &'static str {
        match self {
            FamilyPhase::Pristine => "pristine",
            FamilyPhase::Mixed => "mixed",
        }
    }
}

/// A married couple and the children born to it.
///
/// The children list is fixed at construction; there is no way to add a
/// child afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Family {
    id: FamilyId,
    husband: PersonId,
    wife: PersonId,
    children: Vec<PersonId>,
    phase: FamilyPhase,
}

impl Family {
    pub fn new(
        id: FamilyId,
        phase: FamilyPhase,
        husband: &Person,
        wife: &Person,
        children: Vec<PersonId>,
    ) -> Result<Self> {
        if husband.id == wife.id {
            return Err(Error::SelfMarriage {
                family: id,
                person: husband.id,
            });
        }
        if husband.sex != Sex::Male {
            return Err(Error::SexRole {
                family: id,
                person: husband.id,
                role: "husband",
            });
        }
        if wife.sex != Sex::Female {
            return Err(Error::SexRole {
                family: id,
                person: wife.id,
                role: "wife",
            });
        }
        if let Some(&person) = children
            .iter()
            .find(|child| **child == husband.id || **child == wife.id)
        {
            return Err(Error::SpouseIsChild { family: id, person });
        }

        Ok(Self {
            id,
            husband: husband.id,
            wife: wife.id,
            children,
            phase,
        })
    }

    pub fn id(&self) -> FamilyId {
        self.id
    }

    pub fn husband(&self) -> PersonId {
        self.husband
    }

    pub fn wife(&self) -> PersonId {
        self.wife
    }

    pub fn children(&self) -> &[PersonId] {
        &self.children
    }

    pub fn phase(&self) -> FamilyPhase {
        self.phase
    }

    pub fn is_parent(&self, person: PersonId) -> bool {
        self.husband == person || self.wife == person
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_family_follows_origin_variant() {
        let founder = Person::founder(PersonId(0), Sex::Male);
        let child = Person::child(PersonId(1), Sex::Female, FamilyId(3), 2);
        let import = Person::import(PersonId(2), Sex::Male, 2);

        assert_eq!(founder.origin_family(), None);
        assert_eq!(child.origin_family(), Some(FamilyId(3)));
        assert_eq!(import.origin_family(), None);
        assert_eq!(child.name, "I00000001");
    }

    #[test]
    fn bind_spouse_rejects_bigamy() {
        let mut person = Person::founder(PersonId(0), Sex::Male);
        person.bind_spouse(FamilyId(0)).expect("first marriage");
        let err = person.bind_spouse(FamilyId(1)).unwrap_err();
        assert_eq!(
            err,
            Error::AlreadyMarried {
                person: PersonId(0),
                existing: FamilyId(0)
            }
        );
    }

    #[test]
    fn family_rejects_swapped_roles() {
        let man = Person::founder(PersonId(0), Sex::Male);
        let woman = Person::founder(PersonId(1), Sex::Female);

        let err = Family::new(FamilyId(0), FamilyPhase::Pristine, &woman, &man, Vec::new())
            .unwrap_err();
        assert!(matches!(err, Error::SexRole { role: "husband", .. }));
    }

    #[test]
    fn family_rejects_spouse_listed_as_child() {
        let man = Person::founder(PersonId(0), Sex::Male);
        let woman = Person::founder(PersonId(1), Sex::Female);

        let err = Family::new(
            FamilyId(0),
            FamilyPhase::Mixed,
            &man,
            &woman,
            vec![PersonId(2), PersonId(0)],
        )
        .unwrap_err();
        assert_eq!(
            err,
            Error::SpouseIsChild {
                family: FamilyId(0),
                person: PersonId(0)
            }
        );
    }

    #[test]
    fn family_rejects_self_marriage() {
        let man = Person::founder(PersonId(0), Sex::Male);
        let err =
            Family::new(FamilyId(0), FamilyPhase::Mixed, &man, &man, Vec::new()).unwrap_err();
        assert!(matches!(err, Error::SelfMarriage { .. }));
    }
}
