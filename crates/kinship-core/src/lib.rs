//! Core contracts for Kinship.
//!
//! This crate defines the person/family model, identifier allocation and the
//! validated generation configuration shared by the generator, the evaluator
//! and the CLI.

pub mod config;
pub mod error;
pub mod ids;
pub mod model;
pub mod population;
pub mod vocab;

pub use config::{
    ConfigError, ConfigInput, DEFAULT_INITIAL_FAMILIES, DEFAULT_MAX_CHILDREN,
    DEFAULT_MAX_PAIR_ATTEMPTS, DEFAULT_MIXED_FAMILIES, DEFAULT_PRISTINE_GENERATIONS, DEFAULT_SEED,
    GenerationConfig,
};
pub use error::{Error, Result};
pub use ids::{EntityKind, FamilyId, IdAllocator, PersonId};
pub use model::{Family, FamilyPhase, Person, PersonOrigin, Sex};
pub use population::{CloseRelation, Population};
