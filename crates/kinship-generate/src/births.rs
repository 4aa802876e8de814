use kinship_core::{Family, FamilyId, FamilyPhase, IdAllocator, Person, PersonId, Population};

use crate::errors::GenerationError;
use crate::rng::RngContext;

/// A husband and wife together with the identifier reserved for their family.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Couple {
    pub family: FamilyId,
    pub husband: PersonId,
    pub wife: PersonId,
}

/// Draw the children of a couple and insert the completed family.
///
/// The child count and each child's sex are drawn from `rng` in that order.
/// Children are inserted before the family so the family is created with its
/// final children list.
pub(crate) fn found_family(
    population: &mut Population,
    ids: &mut IdAllocator,
    rng: &mut RngContext,
    couple: Couple,
    phase: FamilyPhase,
    child_generation: u32,
    max_children: u32,
) -> Result<Vec<PersonId>, GenerationError> {
    let count = rng.child_count(max_children);
    let mut children = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let sex = rng.sex();
        let id = ids.next_person();
        population.add_person(Person::child(id, sex, couple.family, child_generation))?;
        children.push(id);
    }

    let family = Family::new(
        couple.family,
        phase,
        population.require_person(couple.husband)?,
        population.require_person(couple.wife)?,
        children.clone(),
    )?;
    population.add_family(family)?;
    Ok(children)
}
