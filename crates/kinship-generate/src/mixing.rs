//! Mixing: cross-lineage families formed from the single population.

use tracing::{debug, info};

use kinship_core::{
    CloseRelation, FamilyPhase, GenerationConfig, IdAllocator, PersonId, Population, Sex,
};

use crate::births::{Couple, found_family};
use crate::errors::GenerationError;
use crate::model::MixingStats;
use crate::rng::RngContext;

/// Persons not bound as a spouse in any family.
#[derive(Debug, Default)]
struct SinglesPool {
    members: Vec<PersonId>,
    males: usize,
    females: usize,
}

impl SinglesPool {
    fn from_population(population: &Population) -> Self {
        let mut pool = Self::default();
        for person in population.persons().iter().filter(|p| p.is_single()) {
            pool.push(person.id, person.sex);
        }
        pool
    }

    fn push(&mut self, person: PersonId, sex: Sex) {
        match sex {
            Sex::Male => self.males += 1,
            Sex::Female => self.females += 1,
        }
        self.members.push(person);
    }

    /// Remove the members at two distinct positions.
    fn take_pair(&mut self, a: usize, b: usize) -> (PersonId, PersonId) {
        let (high, low) = if a > b { (a, b) } else { (b, a) };
        let from_high = self.members.swap_remove(high);
        let from_low = self.members.swap_remove(low);
        // One of each sex leaves the pool.
        self.males -= 1;
        self.females -= 1;
        if high == a {
            (from_high, from_low)
        } else {
            (from_low, from_high)
        }
    }

    fn len(&self) -> usize {
        self.members.len()
    }

    fn can_pair(&self) -> bool {
        self.males > 0 && self.females > 0
    }
}

/// Create `mixed_families` families by pairing single persons.
///
/// Each attempt samples two distinct singles uniformly. A pair is rejected
/// when both share a sex, share an origin family, or one is a parent of the
/// other. Every accepted pair founds a family whose children join the pool.
pub fn mix_families(
    config: &GenerationConfig,
    rng: &mut RngContext,
    ids: &mut IdAllocator,
    population: &mut Population,
) -> Result<MixingStats, GenerationError> {
    let mut stats = MixingStats::default();
    let mut pool = SinglesPool::from_population(population);
    info!(
        singles = pool.len(),
        males = pool.males,
        females = pool.females,
        families = config.mixed_families(),
        "mixing started"
    );

    for family_index in 0..config.mixed_families() {
        let (first, second) = pick_pair(&pool, family_index, config, rng, population, &mut stats)?;
        let (husband, wife) = pool.take_pair(first, second);
        let generation = population
            .require_person(husband)?
            .generation
            .max(population.require_person(wife)?.generation)
            + 1;

        let couple = Couple {
            family: ids.next_family(),
            husband,
            wife,
        };
        let children = found_family(
            population,
            ids,
            rng,
            couple,
            FamilyPhase::Mixed,
            generation,
            config.max_children(),
        )?;
        for child in children {
            let sex = population.require_person(child)?.sex;
            pool.push(child, sex);
        }
        stats.families += 1;
    }

    info!(
        families = stats.families,
        attempts = stats.attempts,
        rejections = stats.rejections(),
        singles_left = pool.len(),
        "mixing finished"
    );
    Ok(stats)
}

/// Sample pool positions `(husband, wife)` for the next mixed family.
fn pick_pair(
    pool: &SinglesPool,
    family_index: u64,
    config: &GenerationConfig,
    rng: &mut RngContext,
    population: &Population,
    stats: &mut MixingStats,
) -> Result<(usize, usize), GenerationError> {
    let mut attempts = 0;
    while attempts < config.max_pair_attempts() && pool.can_pair() {
        attempts += 1;
        stats.attempts += 1;
        let Some((a, b)) = rng.distinct_pair(pool.len()) else {
            break;
        };
        let first = population.require_person(pool.members[a])?;
        let second = population.require_person(pool.members[b])?;
        if first.sex == second.sex {
            stats.rejected_same_sex += 1;
            continue;
        }
        match population.close_relation(first.id, second.id) {
            Some(CloseRelation::Siblings) => {
                stats.rejected_siblings += 1;
                continue;
            }
            Some(CloseRelation::ParentChild) => {
                stats.rejected_parent_child += 1;
                continue;
            }
            None => {}
        }
        return Ok(if first.sex == Sex::Male { (a, b) } else { (b, a) });
    }

    debug!(family_index, attempts, "no eligible pair found");
    Err(GenerationError::PoolExhausted {
        family_index,
        attempts,
        males: pool.males,
        females: pool.females,
    })
}

#[cfg(test)]
mod tests {
    use kinship_core::{ConfigInput, Family, FamilyId, Person};

    use super::*;

    fn config(mixed: i64, max_children: i64) -> GenerationConfig {
        ConfigInput {
            mixed_families: mixed,
            max_children,
            ..ConfigInput::default()
        }
        .validate()
        .expect("valid config")
    }

    /// Founders plus the given children of the founding family.
    fn family_with_children(sexes: &[Sex]) -> (Population, IdAllocator) {
        let mut ids = IdAllocator::new();
        let mut population = Population::new();
        let husband = Person::founder(ids.next_person(), Sex::Male);
        let wife = Person::founder(ids.next_person(), Sex::Female);
        let family_id = ids.next_family();
        let mut children = Vec::new();
        population.add_person(husband.clone()).expect("husband");
        population.add_person(wife.clone()).expect("wife");
        for sex in sexes {
            let child = Person::child(ids.next_person(), *sex, family_id, 1);
            children.push(population.add_person(child).expect("child"));
        }
        let family = Family::new(family_id, FamilyPhase::Pristine, &husband, &wife, children)
            .expect("family");
        population.add_family(family).expect("add family");
        (population, ids)
    }

    #[test]
    fn siblings_are_never_paired() {
        let (mut population, mut ids) = family_with_children(&[Sex::Male, Sex::Female]);
        let mut rng = RngContext::from_seed(3);

        let err = mix_families(&config(1, 2), &mut rng, &mut ids, &mut population).unwrap_err();
        assert!(matches!(
            err,
            GenerationError::PoolExhausted {
                family_index: 0,
                males: 1,
                females: 1,
                ..
            }
        ));
        assert_eq!(population.families().len(), 1);
    }

    #[test]
    fn single_sex_pool_fails_without_sampling() {
        let (mut population, mut ids) = family_with_children(&[Sex::Male, Sex::Male]);
        let mut rng = RngContext::from_seed(3);

        let err = mix_families(&config(1, 2), &mut rng, &mut ids, &mut population).unwrap_err();
        assert!(matches!(
            err,
            GenerationError::PoolExhausted {
                attempts: 0,
                females: 0,
                ..
            }
        ));
    }

    #[test]
    fn pairs_unrelated_singles() {
        let (mut population, mut ids) = family_with_children(&[Sex::Male]);
        let outsider = Person::import(ids.next_person(), Sex::Female, 1);
        population.add_person(outsider).expect("outsider");
        let mut rng = RngContext::from_seed(11);

        let stats = mix_families(&config(1, 3), &mut rng, &mut ids, &mut population)
            .expect("mixing succeeds");

        assert_eq!(stats.families, 1);
        let family = population.family(FamilyId(1)).expect("mixed family");
        assert_eq!(family.phase(), FamilyPhase::Mixed);
        assert_eq!(family.husband(), PersonId(2));
        assert_eq!(family.wife(), PersonId(3));
        for child in family.children() {
            let child = population.person(*child).expect("child");
            assert_eq!(child.generation, 2);
            assert_eq!(child.origin_family(), Some(FamilyId(1)));
        }
    }

    #[test]
    fn take_pair_returns_members_in_requested_order() {
        let mut pool = SinglesPool::default();
        pool.push(PersonId(10), Sex::Male);
        pool.push(PersonId(11), Sex::Female);
        pool.push(PersonId(12), Sex::Male);

        assert_eq!(pool.take_pair(1, 2), (PersonId(11), PersonId(12)));
        assert_eq!(pool.members, vec![PersonId(10)]);
    }
}
