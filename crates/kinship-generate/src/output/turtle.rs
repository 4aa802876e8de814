use std::io::Write;

use kinship_core::Population;
use kinship_core::vocab::{
    CLASS_FAMILY, CLASS_PERSON, DATA_NAMESPACE, DATA_PREFIX, PROP_CHILD, PROP_HUSBAND, PROP_NAME,
    PROP_SEX, PROP_WIFE, RDF_TYPE, SCHEMA_NAMESPACE, SCHEMA_PREFIX, data_term, sex_term,
};

use crate::errors::SerializationError;

/// Write the population as a line-oriented Turtle document.
///
/// Persons come first in creation order (class, name, sex), then families in
/// creation order (class, husband, wife, one line per child). Returns the
/// number of bytes written.
pub fn write_turtle<W: Write>(
    population: &Population,
    writer: W,
) -> Result<u64, SerializationError> {
    let mut out = CountingWriter::new(writer);

    writeln!(out, "@prefix {SCHEMA_PREFIX}: <{SCHEMA_NAMESPACE}> .")?;
    writeln!(out, "@prefix {DATA_PREFIX}: <{DATA_NAMESPACE}> .")?;
    writeln!(out)?;

    for person in population.persons() {
        let subject = data_term(&person.id.local_name());
        write_triple(&mut out, &subject, RDF_TYPE, CLASS_PERSON)?;
        write_triple(&mut out, &subject, PROP_NAME, &literal(&person.name))?;
        write_triple(&mut out, &subject, PROP_SEX, sex_term(person.sex))?;
    }

    for family in population.families() {
        let subject = data_term(&family.id().local_name());
        write_triple(&mut out, &subject, RDF_TYPE, CLASS_FAMILY)?;
        write_triple(
            &mut out,
            &subject,
            PROP_HUSBAND,
            &data_term(&family.husband().local_name()),
        )?;
        write_triple(
            &mut out,
            &subject,
            PROP_WIFE,
            &data_term(&family.wife().local_name()),
        )?;
        for child in family.children() {
            write_triple(&mut out, &subject, PROP_CHILD, &data_term(&child.local_name()))?;
        }
    }

    out.flush()?;
    Ok(out.bytes_written())
}

fn write_triple<W: Write>(
    out: &mut W,
    subject: &str,
    predicate: &str,
    object: &str,
) -> std::io::Result<()> {
    writeln!(out, "{subject}\t{predicate}\t{object} .")
}

fn literal(value: &str) -> String {
    format!("\"{}\"", escape_literal(value))
}

/// Escape a string for use inside a double-quoted Turtle literal.
pub fn escape_literal(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

struct CountingWriter<W: Write> {
    inner: W,
    bytes: u64,
}

impl<W: Write> CountingWriter<W> {
    fn new(inner: W) -> Self {
        Self { inner, bytes: 0 }
    }

    fn bytes_written(&self) -> u64 {
        self.bytes
    }
}

impl<W: Write> Write for CountingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let size = self.inner.write(buf)?;
        self.bytes = self.bytes.saturating_add(size as u64);
        Ok(size)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}
