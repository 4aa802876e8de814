//! Deterministic family-data generator for Kinship.
//!
//! This crate grows pristine lineages from founding couples, mixes them into
//! cross-lineage families and serializes the resulting person/family graph.

pub mod engine;
pub mod errors;
pub mod mixing;
pub mod model;
pub mod output;
pub mod pristine;
pub mod rng;

mod births;

pub use engine::{GenerationEngine, GenerationResult};
pub use errors::{GenerationError, SerializationError};
pub use model::{ExtinctLineage, GenerationReport, MixingStats, PristineSummary};
pub use output::{OutputTarget, Sink, emit, write_json_atomic, write_turtle};
pub use rng::RngContext;
