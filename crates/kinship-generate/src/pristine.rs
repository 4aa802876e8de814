//! Pristine growth: independent lineages that never intermarry.
//!
//! Growth moves through `Seed -> Growing(1..=pristine_generations) -> Done`.
//! Seeding reserves one founding couple per lineage. Each growth step gives
//! every couple of the previous step its children, then marries each of those
//! children to a freshly imported partner so the lineage can continue. The
//! last step leaves its children single for the mixing phase.

use std::collections::BTreeSet;

use tracing::{debug, info, warn};

use kinship_core::{
    FamilyPhase, GenerationConfig, IdAllocator, Person, PersonId, Population, Sex,
};

use crate::births::{Couple, found_family};
use crate::errors::GenerationError;
use crate::model::{ExtinctLineage, PristineSummary};
use crate::rng::RngContext;

#[derive(Debug, Clone, Copy)]
struct LineageCouple {
    couple: Couple,
    lineage: u32,
}

#[derive(Debug, Clone, Copy)]
struct Birth {
    person: PersonId,
    sex: Sex,
    lineage: u32,
}

/// Grow `initial_families` lineages for `pristine_generations` steps.
pub fn grow_pristine(
    config: &GenerationConfig,
    rng: &mut RngContext,
    ids: &mut IdAllocator,
    population: &mut Population,
) -> Result<PristineSummary, GenerationError> {
    let mut summary = PristineSummary::default();
    let mut pending = seed_founding_couples(config, ids, population)?;

    for generation in 1..=config.pristine_generations() {
        if pending.is_empty() {
            warn!(generation, "population died out before pristine generation");
            break;
        }

        let births = grow_generation(&pending, generation, config, rng, ids, population)?;
        record_extinct_lineages(&pending, &births, generation, &mut summary);
        summary.generations_completed = generation;
        info!(
            generation,
            families = pending.len(),
            children = births.len(),
            "pristine generation grown"
        );

        pending = if generation < config.pristine_generations() {
            marry_with_imports(&births, ids, population)?
        } else {
            Vec::new()
        };
    }

    // Without any growth step the founding couples never get children.
    for founding in pending {
        found_family(
            population,
            ids,
            rng,
            founding.couple,
            FamilyPhase::Pristine,
            1,
            0,
        )?;
    }

    Ok(summary)
}

fn seed_founding_couples(
    config: &GenerationConfig,
    ids: &mut IdAllocator,
    population: &mut Population,
) -> Result<Vec<LineageCouple>, GenerationError> {
    let mut couples = Vec::with_capacity(config.initial_families() as usize);
    for lineage in 0..config.initial_families() {
        let husband = population.add_person(Person::founder(ids.next_person(), Sex::Male))?;
        let wife = population.add_person(Person::founder(ids.next_person(), Sex::Female))?;
        let family = ids.next_family();
        couples.push(LineageCouple {
            couple: Couple {
                family,
                husband,
                wife,
            },
            lineage,
        });
    }
    debug!(couples = couples.len(), "founding couples seeded");
    Ok(couples)
}

fn grow_generation(
    pending: &[LineageCouple],
    generation: u32,
    config: &GenerationConfig,
    rng: &mut RngContext,
    ids: &mut IdAllocator,
    population: &mut Population,
) -> Result<Vec<Birth>, GenerationError> {
    let mut births = Vec::new();
    for parents in pending {
        let children = found_family(
            population,
            ids,
            rng,
            parents.couple,
            FamilyPhase::Pristine,
            generation,
            config.max_children(),
        )?;
        for person in children {
            let sex = population.require_person(person)?.sex;
            births.push(Birth {
                person,
                sex,
                lineage: parents.lineage,
            });
        }
    }
    Ok(births)
}

/// Pair every child with a new outsider of the opposite sex.
///
/// The partner is never taken from another lineage, so lineages stay disjoint
/// trees until mixing.
fn marry_with_imports(
    births: &[Birth],
    ids: &mut IdAllocator,
    population: &mut Population,
) -> Result<Vec<LineageCouple>, GenerationError> {
    let mut couples = Vec::with_capacity(births.len());
    for birth in births {
        let generation = population.require_person(birth.person)?.generation;
        let partner_sex = match birth.sex {
            Sex::Male => Sex::Female,
            Sex::Female => Sex::Male,
        };
        let partner =
            population.add_person(Person::import(ids.next_person(), partner_sex, generation))?;
        let (husband, wife) = match birth.sex {
            Sex::Male => (birth.person, partner),
            Sex::Female => (partner, birth.person),
        };
        couples.push(LineageCouple {
            couple: Couple {
                family: ids.next_family(),
                husband,
                wife,
            },
            lineage: birth.lineage,
        });
    }
    Ok(couples)
}

fn record_extinct_lineages(
    pending: &[LineageCouple],
    births: &[Birth],
    generation: u32,
    summary: &mut PristineSummary,
) {
    let growing: BTreeSet<u32> = pending.iter().map(|couple| couple.lineage).collect();
    let fertile: BTreeSet<u32> = births.iter().map(|birth| birth.lineage).collect();
    for &lineage in growing.difference(&fertile) {
        warn!(lineage, generation, "lineage died out");
        summary
            .extinct_lineages
            .push(ExtinctLineage { lineage, generation });
    }
}

#[cfg(test)]
mod tests {
    use kinship_core::{ConfigInput, PersonOrigin};

    use super::*;

    fn config(initial: i64, max_children: i64, generations: i64) -> GenerationConfig {
        ConfigInput {
            initial_families: initial,
            max_children,
            pristine_generations: generations,
            mixed_families: 0,
            ..ConfigInput::default()
        }
        .validate()
        .expect("valid config")
    }

    fn grow(config: &GenerationConfig) -> (Population, PristineSummary) {
        let mut rng = RngContext::from_seed(config.seed());
        let mut ids = IdAllocator::new();
        let mut population = Population::new();
        let summary =
            grow_pristine(config, &mut rng, &mut ids, &mut population).expect("pristine growth");
        (population, summary)
    }

    #[test]
    fn zero_generations_keeps_childless_founders() {
        let (population, summary) = grow(&config(3, 7, 0));

        assert_eq!(population.persons().len(), 6);
        assert_eq!(population.families().len(), 3);
        assert!(population.families().iter().all(|f| f.children().is_empty()));
        assert_eq!(summary.generations_completed, 0);
    }

    #[test]
    fn children_carry_generation_and_origin() {
        let (population, _) = grow(&config(4, 5, 3));

        for person in population.persons() {
            match person.origin {
                PersonOrigin::Founder => assert_eq!(person.generation, 0),
                PersonOrigin::Child { family } => {
                    let family = population.family(family).expect("origin family");
                    let father = population.person(family.husband()).expect("father");
                    assert_eq!(person.generation, father.generation + 1);
                    assert!(family.children().contains(&person.id));
                }
                PersonOrigin::Import => {
                    let spouse_family = person.spouse_family().expect("imports are married");
                    let family = population.family(spouse_family).expect("family");
                    let partner = if family.husband() == person.id {
                        family.wife()
                    } else {
                        family.husband()
                    };
                    let partner = population.person(partner).expect("partner");
                    assert!(matches!(partner.origin, PersonOrigin::Child { .. }));
                    assert_eq!(partner.generation, person.generation);
                }
            }
        }
    }

    #[test]
    fn only_last_generation_stays_single() {
        let (population, summary) = grow(&config(3, 4, 3));

        for person in population.persons() {
            if person.is_single() {
                assert_eq!(person.generation, summary.generations_completed);
            }
        }
    }

    #[test]
    fn lineages_never_intermarry() {
        let (population, _) = grow(&config(5, 4, 4));

        for family in population.families() {
            let husband = population.person(family.husband()).expect("husband");
            let wife = population.person(family.wife()).expect("wife");
            let lineage_children = [husband, wife]
                .iter()
                .filter(|p| matches!(p.origin, PersonOrigin::Child { .. }))
                .count();
            assert!(lineage_children <= 1, "family {} mixes lineages", family.id());
        }
    }

    #[test]
    fn childless_lineages_are_reported_extinct() {
        let (population, summary) = grow(&config(2, 0, 2));

        assert_eq!(population.families().len(), 2);
        assert_eq!(summary.generations_completed, 1);
        assert_eq!(
            summary.extinct_lineages,
            vec![
                ExtinctLineage {
                    lineage: 0,
                    generation: 1
                },
                ExtinctLineage {
                    lineage: 1,
                    generation: 1
                },
            ]
        );
    }
}
