use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use kinship_core::{GenerationConfig, Population};

/// A lineage that stopped producing children during pristine growth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtinctLineage {
    /// Index of the founding couple the lineage descends from.
    pub lineage: u32,
    /// Pristine step in which no child was born.
    pub generation: u32,
}

/// Outcome of pristine growth.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PristineSummary {
    pub generations_completed: u32,
    pub extinct_lineages: Vec<ExtinctLineage>,
}

/// Counters collected by the mixing engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MixingStats {
    pub families: u64,
    pub attempts: u64,
    pub rejected_same_sex: u64,
    pub rejected_siblings: u64,
    pub rejected_parent_child: u64,
}

impl MixingStats {
    pub fn rejections(&self) -> u64 {
        self.rejected_same_sex + self.rejected_siblings + self.rejected_parent_child
    }
}

/// Report for a generation run.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationReport {
    pub run_id: String,
    pub started_at: DateTime<Utc>,
    pub config: GenerationConfig,
    pub persons: u64,
    pub families: u64,
    pub children: u64,
    pub persons_by_origin: BTreeMap<String, u64>,
    pub persons_by_generation: BTreeMap<u32, u64>,
    pub families_by_phase: BTreeMap<String, u64>,
    pub pristine: PristineSummary,
    pub mixing: MixingStats,
    pub bytes_written: u64,
    pub duration_ms: u64,
}

impl GenerationReport {
    pub fn new(run_id: String, started_at: DateTime<Utc>, config: GenerationConfig) -> Self {
        Self {
            run_id,
            started_at,
            config,
            persons: 0,
            families: 0,
            children: 0,
            persons_by_origin: BTreeMap::new(),
            persons_by_generation: BTreeMap::new(),
            families_by_phase: BTreeMap::new(),
            pristine: PristineSummary::default(),
            mixing: MixingStats::default(),
            bytes_written: 0,
            duration_ms: 0,
        }
    }

    /// Fill the population counters from the final graph.
    pub fn record_population(&mut self, population: &Population) {
        self.persons = population.persons().len() as u64;
        self.families = population.families().len() as u64;
        self.persons_by_origin.clear();
        self.persons_by_generation.clear();
        self.families_by_phase.clear();
        for person in population.persons() {
            *self
                .persons_by_origin
                .entry(person.origin.label().to_string())
                .or_insert(0) += 1;
            *self
                .persons_by_generation
                .entry(person.generation)
                .or_insert(0) += 1;
        }
        self.children = population
            .families()
            .iter()
            .map(|family| family.children().len() as u64)
            .sum();
        for family in population.families() {
            *self
                .families_by_phase
                .entry(family.phase().as_str().to_string())
                .or_insert(0) += 1;
        }
    }

    pub fn record_bytes_written(&mut self, bytes: u64) {
        self.bytes_written = bytes;
    }
}
