pub mod sink;
pub mod turtle;

pub use sink::{OutputTarget, Sink, write_json_atomic};
pub use turtle::{escape_literal, write_turtle};

use kinship_core::Population;

use crate::errors::SerializationError;

/// Stream the population to `target` and commit it.
///
/// A file target only appears at its final path once the whole document has
/// been written; on any error the partial output is discarded.
pub fn emit(population: &Population, target: &OutputTarget) -> Result<u64, SerializationError> {
    let mut sink = Sink::open(target)?;
    let bytes = write_turtle(population, &mut sink)?;
    sink.commit()?;
    tracing::info!(output = %target, bytes, "document written");
    Ok(bytes)
}
