use crate::error::{Error, Result};
use crate::ids::{EntityKind, FamilyId, PersonId};
use crate::model::{Family, Person};

/// Relations that forbid a marriage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseRelation {
    /// Both were born into the same family.
    Siblings,
    /// One is husband or wife of the family the other was born into.
    ParentChild,
}

/// The in-memory person/family graph produced by a generation run.
///
/// Entities are stored in creation order and indexed by identifier, so an
/// entity must be inserted in the same order its identifier was allocated.
#[derive(Debug, Default, Clone)]
pub struct Population {
    persons: Vec<Person>,
    families: Vec<Family>,
}

impl Population {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_person(&mut self, person: Person) -> Result<PersonId> {
        let expected = self.persons.len() as u64;
        if person.id.0 != expected {
            return Err(Error::OutOfOrder {
                kind: EntityKind::Person.as_str(),
                id: person.id.0,
                expected,
            });
        }
        let id = person.id;
        self.persons.push(person);
        Ok(id)
    }

    /// Insert a family and bind its husband and wife to it.
    pub fn add_family(&mut self, family: Family) -> Result<FamilyId> {
        let expected = self.families.len() as u64;
        let id = family.id();
        if id.0 != expected {
            return Err(Error::OutOfOrder {
                kind: EntityKind::Family.as_str(),
                id: id.0,
                expected,
            });
        }
        // Check both spouses before mutating either one.
        for spouse in [family.husband(), family.wife()] {
            if let Some(existing) = self.require_person(spouse)?.spouse_family() {
                return Err(Error::AlreadyMarried {
                    person: spouse,
                    existing,
                });
            }
        }
        for spouse in [family.husband(), family.wife()] {
            self.persons[spouse.index()].bind_spouse(id)?;
        }
        self.families.push(family);
        Ok(id)
    }

    pub fn person(&self, id: PersonId) -> Option<&Person> {
        self.persons.get(id.index())
    }

    pub fn require_person(&self, id: PersonId) -> Result<&Person> {
        self.person(id).ok_or(Error::Unknown {
            kind: EntityKind::Person.as_str(),
            id: id.0,
        })
    }

    pub fn family(&self, id: FamilyId) -> Option<&Family> {
        self.families.get(id.index())
    }

    pub fn persons(&self) -> &[Person] {
        &self.persons
    }

    pub fn families(&self) -> &[Family] {
        &self.families
    }

    /// True when `parent` is husband or wife of the family `child` was born into.
    pub fn is_parent_of(&self, parent: PersonId, child: PersonId) -> bool {
        self.person(child)
            .and_then(Person::origin_family)
            .and_then(|family| self.family(family))
            .is_some_and(|family| family.is_parent(parent))
    }

    /// Classify `a` and `b` as siblings or parent and child, if they are.
    ///
    /// Only these two relations are considered; grandparents and cousins are
    /// not close relatives here.
    pub fn close_relation(&self, a: PersonId, b: PersonId) -> Option<CloseRelation> {
        let (left, right) = (self.person(a)?, self.person(b)?);
        if let Some(origin) = left.origin_family()
            && right.origin_family() == Some(origin)
        {
            return Some(CloseRelation::Siblings);
        }
        if self.is_parent_of(a, b) || self.is_parent_of(b, a) {
            return Some(CloseRelation::ParentChild);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FamilyPhase, Sex};

    fn founding_couple(population: &mut Population) -> FamilyId {
        let husband = Person::founder(PersonId(0), Sex::Male);
        let wife = Person::founder(PersonId(1), Sex::Female);
        let child = Person::child(PersonId(2), Sex::Female, FamilyId(0), 1);
        let sibling = Person::child(PersonId(3), Sex::Male, FamilyId(0), 1);
        let family = Family::new(
            FamilyId(0),
            FamilyPhase::Pristine,
            &husband,
            &wife,
            vec![PersonId(2), PersonId(3)],
        )
        .expect("valid family");
        for person in [husband, wife, child, sibling] {
            population.add_person(person).expect("add person");
        }
        population.add_family(family).expect("add family")
    }

    #[test]
    fn add_family_binds_spouses() {
        let mut population = Population::new();
        let family = founding_couple(&mut population);

        assert_eq!(
            population.person(PersonId(0)).and_then(Person::spouse_family),
            Some(family)
        );
        assert_eq!(
            population.person(PersonId(2)).and_then(Person::spouse_family),
            None
        );
    }

    #[test]
    fn rejects_out_of_order_person() {
        let mut population = Population::new();
        let err = population
            .add_person(Person::founder(PersonId(5), Sex::Male))
            .unwrap_err();
        assert_eq!(
            err,
            Error::OutOfOrder {
                kind: "person",
                id: 5,
                expected: 0
            }
        );
    }

    #[test]
    fn detects_siblings_and_parents() {
        let mut population = Population::new();
        founding_couple(&mut population);

        assert_eq!(
            population.close_relation(PersonId(2), PersonId(3)),
            Some(CloseRelation::Siblings)
        );
        assert_eq!(
            population.close_relation(PersonId(0), PersonId(2)),
            Some(CloseRelation::ParentChild)
        );
        assert_eq!(
            population.close_relation(PersonId(3), PersonId(1)),
            Some(CloseRelation::ParentChild)
        );
        assert_eq!(population.close_relation(PersonId(0), PersonId(1)), None);
    }

    #[test]
    fn rejects_second_marriage_without_partial_binding() {
        let mut population = Population::new();
        founding_couple(&mut population);
        let husband = population.person(PersonId(0)).cloned().expect("husband");
        let daughter = population.person(PersonId(2)).cloned().expect("daughter");
        let family = Family::new(FamilyId(1), FamilyPhase::Mixed, &husband, &daughter, Vec::new())
            .expect("shape is valid");

        assert!(matches!(
            population.add_family(family),
            Err(Error::AlreadyMarried { .. })
        ));
        assert!(population.person(PersonId(2)).is_some_and(Person::is_single));
    }
}
