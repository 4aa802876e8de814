//! The fixed family-data vocabulary shared by the emitter and the reader.

use crate::model::Sex;

/// Namespace of classes and properties, bound to the `s:` prefix.
pub const SCHEMA_NAMESPACE: &str = "http://rdf.zvr.invalid/demofamilydata/";
/// Namespace of generated entities, bound to the `d:` prefix.
pub const DATA_NAMESPACE: &str = "http://rdf.zvr.invalid/demofamilydata/data/";

pub const SCHEMA_PREFIX: &str = "s";
pub const DATA_PREFIX: &str = "d";

pub const RDF_TYPE: &str = "a";
pub const RDF_TYPE_IRI: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
pub const CLASS_PERSON: &str = "s:Person";
pub const CLASS_FAMILY: &str = "s:Family";

pub const PROP_NAME: &str = "s:name";
pub const PROP_SEX: &str = "s:sex";
pub const PROP_HUSBAND: &str = "s:husband";
pub const PROP_WIFE: &str = "s:wife";
pub const PROP_CHILD: &str = "s:child";

const SEX_MALE: &str = "s:sex-male";
const SEX_FEMALE: &str = "s:sex-female";

pub fn sex_term(sex: Sex) -> &'static str {
    match sex {
        Sex::Male => SEX_MALE,
        Sex::Female => SEX_FEMALE,
    }
}

pub fn parse_sex_term(term: &str) -> Option<Sex> {
    match term {
        SEX_MALE => Some(Sex::Male),
        SEX_FEMALE => Some(Sex::Female),
        _ => None,
    }
}

/// Prefixed name of a generated entity, e.g. `d:I00000003`.
pub fn data_term(local_name: &str) -> String {
    format!("{DATA_PREFIX}:{local_name}")
}

/// Inverse of [`data_term`].
pub fn data_local_name(term: &str) -> Option<&str> {
    term.strip_prefix(DATA_PREFIX)?.strip_prefix(':')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sex_terms_round_trip() {
        for sex in [Sex::Male, Sex::Female] {
            assert_eq!(parse_sex_term(sex_term(sex)), Some(sex));
        }
        assert_eq!(parse_sex_term("s:sex-other"), None);
    }

    #[test]
    fn data_terms_strip_prefix() {
        assert_eq!(data_term("I00000001"), "d:I00000001");
        assert_eq!(data_local_name("d:F00000002"), Some("F00000002"));
        assert_eq!(data_local_name("s:Person"), None);
    }
}
