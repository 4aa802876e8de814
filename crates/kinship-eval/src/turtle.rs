//! Reader for family documents.
//!
//! Any valid Turtle is accepted. Terms in the family namespaces come back as
//! `s:`/`d:` prefixed names whatever prefixes the document declared, so a
//! document using full IRIs or predicate lists reads the same as the
//! generator's own line format.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use rio_api::model::{Literal, NamedNode, Subject, Term as RioTerm, Triple as RioTriple};
use rio_api::parser::TriplesParser;
use rio_turtle::TurtleParser;
use tracing::debug;

use kinship_core::vocab::{
    DATA_NAMESPACE, RDF_TYPE, RDF_TYPE_IRI, SCHEMA_NAMESPACE, SCHEMA_PREFIX, data_term,
};

use crate::errors::EvalError;

/// Object position of a triple.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Term {
    /// Compacted IRI or blank node, e.g. `d:I00000001` or `s:sex-male`.
    Name(String),
    /// Lexical value of a literal.
    Literal(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Triple {
    pub subject: String,
    pub predicate: String,
    pub object: Term,
}

impl Triple {
    pub fn new(subject: impl Into<String>, predicate: impl Into<String>, object: Term) -> Self {
        Self {
            subject: subject.into(),
            predicate: predicate.into(),
            object,
        }
    }

    fn from_rio(triple: &RioTriple<'_>) -> Result<Self, EvalError> {
        let subject = match triple.subject {
            Subject::NamedNode(node) => compact_iri(node.iri),
            Subject::BlankNode(node) => format!("_:{}", node.id),
            Subject::Triple(quoted) => {
                return Err(EvalError::Unsupported(format!("quoted triple {quoted}")));
            }
        };
        let predicate = match triple.predicate {
            NamedNode { iri } if iri == RDF_TYPE_IRI => RDF_TYPE.to_string(),
            NamedNode { iri } => compact_iri(iri),
        };
        let object = match triple.object {
            RioTerm::NamedNode(node) => Term::Name(compact_iri(node.iri)),
            RioTerm::BlankNode(node) => Term::Name(format!("_:{}", node.id)),
            RioTerm::Literal(
                Literal::Simple { value }
                | Literal::LanguageTaggedString { value, .. }
                | Literal::Typed { value, .. },
            ) => Term::Literal(value.to_string()),
            RioTerm::Triple(quoted) => {
                return Err(EvalError::Unsupported(format!("quoted triple {quoted}")));
            }
        };
        Ok(Self {
            subject,
            predicate,
            object,
        })
    }
}

/// Parsed document: statements in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TripleSet {
    triples: Vec<Triple>,
}

impl TripleSet {
    /// Load a document from disk.
    pub fn load(path: &Path) -> Result<Self, EvalError> {
        let file = File::open(path)?;
        let set = Self::parse(BufReader::new(file))?;
        debug!(
            path = %path.display(),
            triples = set.len(),
            "document loaded"
        );
        Ok(set)
    }

    pub fn parse<R: BufRead>(reader: R) -> Result<Self, EvalError> {
        let mut parser = TurtleParser::new(reader, None);
        let mut triples = Vec::new();
        parser.parse_all(&mut |triple| -> Result<(), EvalError> {
            triples.push(Triple::from_rio(&triple)?);
            Ok(())
        })?;
        Ok(Self { triples })
    }

    pub fn parse_str(text: &str) -> Result<Self, EvalError> {
        Self::parse(text.as_bytes())
    }

    pub fn triples(&self) -> &[Triple] {
        &self.triples
    }

    pub fn len(&self) -> usize {
        self.triples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }
}

/// Shorten an IRI in the family namespaces to its prefixed name.
fn compact_iri(iri: &str) -> String {
    // The data namespace nests inside the schema namespace.
    if let Some(local) = iri.strip_prefix(DATA_NAMESPACE) {
        data_term(local)
    } else if let Some(local) = iri.strip_prefix(SCHEMA_NAMESPACE) {
        format!("{SCHEMA_PREFIX}:{local}")
    } else {
        format!("<{iri}>")
    }
}
