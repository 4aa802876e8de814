use std::time::Instant;

use tracing::{info, warn};

use kinship_core::{ConfigInput, GenerationConfig, IdAllocator, Population};

use crate::errors::GenerationError;
use crate::mixing::mix_families;
use crate::model::GenerationReport;
use crate::pristine::grow_pristine;
use crate::rng::RngContext;

/// Result of a generation run.
#[derive(Debug, Clone)]
pub struct GenerationResult {
    pub population: Population,
    pub report: GenerationReport,
}

/// Entry point for generating a family population from a validated config.
#[derive(Debug, Clone)]
pub struct GenerationEngine {
    config: GenerationConfig,
}

impl GenerationEngine {
    pub fn new(config: GenerationConfig) -> Self {
        Self { config }
    }

    /// Validate raw input and build an engine from it.
    pub fn from_input(input: &ConfigInput) -> Result<Self, GenerationError> {
        Ok(Self::new(input.validate()?))
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Run pristine growth followed by mixing.
    ///
    /// Each run owns its RNG and identifier allocator, so the same config
    /// always yields the same population.
    pub fn run(&self) -> Result<GenerationResult, GenerationError> {
        let start = Instant::now();
        let run_id = uuid::Uuid::new_v4().to_string();
        let mut report = GenerationReport::new(run_id.clone(), chrono::Utc::now(), self.config);

        info!(
            run_id = %run_id,
            seed = self.config.seed(),
            initial_families = self.config.initial_families(),
            max_children = self.config.max_children(),
            pristine_generations = self.config.pristine_generations(),
            mixed_families = self.config.mixed_families(),
            "generation started"
        );

        let mut rng = RngContext::from_seed(self.config.seed());
        let mut ids = IdAllocator::new();
        let mut population = Population::new();

        let outcome = grow_pristine(&self.config, &mut rng, &mut ids, &mut population)
            .and_then(|pristine| {
                report.pristine = pristine;
                mix_families(&self.config, &mut rng, &mut ids, &mut population)
            });

        match outcome {
            Ok(mixing) => {
                report.mixing = mixing;
                report.record_population(&population);
                report.duration_ms = start.elapsed().as_millis() as u64;
                info!(
                    run_id = %run_id,
                    persons = report.persons,
                    families = report.families,
                    duration_ms = report.duration_ms,
                    "generation completed"
                );
                Ok(GenerationResult { population, report })
            }
            Err(err) => {
                warn!(run_id = %run_id, error = %err, "generation failed");
                Err(err)
            }
        }
    }
}
