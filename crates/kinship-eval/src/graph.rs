use std::collections::{BTreeMap, HashSet};

use kinship_core::vocab::{
    CLASS_FAMILY, CLASS_PERSON, PROP_CHILD, PROP_HUSBAND, PROP_NAME, PROP_SEX, PROP_WIFE,
    RDF_TYPE, data_term, parse_sex_term, sex_term,
};
use kinship_core::{Population, Sex};

use crate::model::ValidationIssue;
use crate::turtle::{Term, Triple, TripleSet};

/// Facts recorded for one person subject.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonRecord {
    pub names: Vec<String>,
    pub sexes: Vec<Sex>,
}

impl PersonRecord {
    pub fn sex(&self) -> Option<Sex> {
        match self.sexes.as_slice() {
            [sex] => Some(*sex),
            _ => None,
        }
    }
}

/// Facts recorded for one family subject.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FamilyRecord {
    pub husbands: Vec<String>,
    pub wives: Vec<String>,
    pub children: Vec<String>,
}

impl FamilyRecord {
    pub fn husband(&self) -> Option<&str> {
        match self.husbands.as_slice() {
            [husband] => Some(husband),
            _ => None,
        }
    }

    pub fn wife(&self) -> Option<&str> {
        match self.wives.as_slice() {
            [wife] => Some(wife),
            _ => None,
        }
    }
}

/// Person/family graph keyed by subject term.
///
/// Records keep every fact they received, so duplicated or missing facts
/// stay visible to the checks instead of being merged away.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FamilyGraph {
    pub persons: BTreeMap<String, PersonRecord>,
    pub families: BTreeMap<String, FamilyRecord>,
    /// Problems found while reading facts: unknown terms, duplicates.
    pub anomalies: Vec<ValidationIssue>,
}

impl FamilyGraph {
    pub fn from_triples(set: &TripleSet) -> Self {
        let mut graph = Self::default();

        // Classes first so property facts can be attributed regardless of order.
        for triple in set.triples().iter().filter(|t| t.predicate == RDF_TYPE) {
            match &triple.object {
                Term::Name(class) if class == CLASS_PERSON => {
                    graph.persons.entry(triple.subject.clone()).or_default();
                }
                Term::Name(class) if class == CLASS_FAMILY => {
                    graph.families.entry(triple.subject.clone()).or_default();
                }
                other => graph.anomalies.push(ValidationIssue::warning(
                    "unknown_class",
                    &triple.subject,
                    format!("unexpected class {other:?}"),
                )),
            }
        }

        let mut seen: HashSet<&Triple> = HashSet::new();
        for triple in set.triples() {
            if !seen.insert(triple) {
                graph.anomalies.push(ValidationIssue::error(
                    "duplicate_fact",
                    &triple.subject,
                    format!(
                        "fact `{} {:?}` appears more than once",
                        triple.predicate, triple.object
                    ),
                ));
                continue;
            }
            if triple.predicate != RDF_TYPE {
                graph.add_property(triple);
            }
        }

        graph
    }

    /// Build the graph the emitter would produce for `population`.
    pub fn from_population(population: &Population) -> Self {
        let mut graph = Self::default();
        for person in population.persons() {
            graph.persons.insert(
                data_term(&person.id.local_name()),
                PersonRecord {
                    names: vec![person.name.clone()],
                    sexes: vec![person.sex],
                },
            );
        }
        for family in population.families() {
            graph.families.insert(
                data_term(&family.id().local_name()),
                FamilyRecord {
                    husbands: vec![data_term(&family.husband().local_name())],
                    wives: vec![data_term(&family.wife().local_name())],
                    children: family
                        .children()
                        .iter()
                        .map(|child| data_term(&child.local_name()))
                        .collect(),
                },
            );
        }
        graph
    }

    /// Index of person subject to the families listing it as a child.
    pub fn origin_index(&self) -> BTreeMap<&str, Vec<&str>> {
        let mut index: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
        for (subject, family) in &self.families {
            for child in &family.children {
                index.entry(child.as_str()).or_default().push(subject.as_str());
            }
        }
        index
    }

    /// Index of person subject to the families listing it as husband or wife.
    pub fn spouse_index(&self) -> BTreeMap<&str, Vec<&str>> {
        let mut index: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
        for (subject, family) in &self.families {
            for spouse in family.husbands.iter().chain(&family.wives) {
                index.entry(spouse.as_str()).or_default().push(subject.as_str());
            }
        }
        index
    }

    /// Number of `child` facts in the graph.
    pub fn child_facts(&self) -> usize {
        self.families.values().map(|f| f.children.len()).sum()
    }

    fn add_property(&mut self, triple: &Triple) {
        let subject = triple.subject.as_str();
        let predicate = triple.predicate.as_str();
        match (predicate, &triple.object) {
            (PROP_NAME | PROP_SEX, object) => {
                let Some(person) = self.persons.get_mut(subject) else {
                    self.untyped(subject, predicate);
                    return;
                };
                match (predicate, object) {
                    (PROP_NAME, Term::Literal(name)) => person.names.push(name.clone()),
                    (PROP_SEX, Term::Name(term)) => match parse_sex_term(term) {
                        Some(sex) => person.sexes.push(sex),
                        None => self.anomalies.push(ValidationIssue::error(
                            "unknown_sex",
                            subject,
                            format!(
                                "`{term}` is neither {} nor {}",
                                sex_term(Sex::Male),
                                sex_term(Sex::Female)
                            ),
                        )),
                    },
                    _ => self.anomalies.push(ValidationIssue::error(
                        "unknown_fact",
                        subject,
                        format!("unexpected value for `{predicate}`: {object:?}"),
                    )),
                }
            }
            (PROP_HUSBAND | PROP_WIFE | PROP_CHILD, Term::Name(person)) => {
                let Some(family) = self.families.get_mut(subject) else {
                    self.untyped(subject, predicate);
                    return;
                };
                let list = match predicate {
                    PROP_HUSBAND => &mut family.husbands,
                    PROP_WIFE => &mut family.wives,
                    _ => &mut family.children,
                };
                list.push(person.clone());
            }
            (_, object) => self.anomalies.push(ValidationIssue::error(
                "unknown_fact",
                subject,
                format!("unexpected fact `{predicate} {object:?}`"),
            )),
        }
    }

    fn untyped(&mut self, subject: &str, predicate: &str) {
        self.anomalies.push(ValidationIssue::error(
            "untyped_subject",
            subject,
            format!("`{predicate}` used on a subject without a matching class"),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph(body: &str) -> FamilyGraph {
        let text = format!(
            "@prefix s: <http://rdf.zvr.invalid/demofamilydata/> .\n\
             @prefix d: <http://rdf.zvr.invalid/demofamilydata/data/> .\n{body}"
        );
        FamilyGraph::from_triples(&TripleSet::parse_str(&text).expect("parse"))
    }

    #[test]
    fn rebuilds_family_membership() {
        let graph = graph(
            "d:F00000000\ts:child\td:I00000002 .\n\
             d:F00000000\ta\ts:Family .\n\
             d:F00000000\ts:husband\td:I00000000 .\n\
             d:F00000000\ts:wife\td:I00000001 .\n",
        );

        let family = &graph.families["d:F00000000"];
        assert_eq!(family.husband(), Some("d:I00000000"));
        assert_eq!(family.wife(), Some("d:I00000001"));
        assert_eq!(graph.origin_index()["d:I00000002"], vec!["d:F00000000"]);
        assert_eq!(graph.spouse_index()["d:I00000001"], vec!["d:F00000000"]);
        assert!(graph.anomalies.is_empty());
    }

    #[test]
    fn flags_duplicates_and_untyped_subjects() {
        let graph = graph(
            "d:I00000000\ta\ts:Person .\n\
             d:I00000000\ts:sex\ts:sex-male .\n\
             d:I00000000\ts:sex\ts:sex-male .\n\
             d:I00000009\ts:name\t\"ghost\" .\n",
        );

        let codes: Vec<_> = graph.anomalies.iter().map(|a| a.code.as_str()).collect();
        assert_eq!(codes, vec!["duplicate_fact", "untyped_subject"]);
        assert_eq!(graph.persons["d:I00000000"].sex(), Some(Sex::Male));
    }
}
