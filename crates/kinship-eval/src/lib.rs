//! Evaluation helpers for generated family documents.
//!
//! Reads an emitted document back into triples, rebuilds the family graph and
//! checks it against the structural invariants of the generator.

pub mod checks;
pub mod errors;
pub mod graph;
pub mod model;
pub mod turtle;

pub use checks::check_graph;
pub use errors::EvalError;
pub use graph::{FamilyGraph, FamilyRecord, PersonRecord};
pub use model::{CheckOptions, EvaluationReport, IssueSeverity, ValidationIssue};
pub use turtle::{Term, Triple, TripleSet};
