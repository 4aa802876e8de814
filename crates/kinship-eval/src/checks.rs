use std::collections::BTreeMap;

use kinship_core::Sex;
use tracing::info;

use crate::graph::{FamilyGraph, FamilyRecord};
use crate::model::{CheckOptions, EvaluationReport, ValidationIssue};

/// Check a rebuilt family graph against the generator's invariants.
pub fn check_graph(graph: &FamilyGraph, options: &CheckOptions) -> EvaluationReport {
    let mut report = EvaluationReport {
        persons: graph.persons.len(),
        families: graph.families.len(),
        child_facts: graph.child_facts(),
        ..EvaluationReport::default()
    };

    for anomaly in &graph.anomalies {
        report.push(anomaly.clone());
    }

    check_persons(graph, &mut report);
    let origins = graph.origin_index();
    let spouses = graph.spouse_index();
    for (subject, family) in &graph.families {
        check_family_shape(graph, subject, family, options, &mut report);
        check_close_relatives(graph, subject, family, &origins, &mut report);
    }
    check_memberships(graph, &origins, &spouses, &mut report);

    info!(
        persons = report.persons,
        families = report.families,
        errors = report.errors.len(),
        warnings = report.warnings.len(),
        "graph checked"
    );
    report
}

fn check_persons(graph: &FamilyGraph, report: &mut EvaluationReport) {
    for (subject, person) in &graph.persons {
        if person.names.len() != 1 {
            report.push(ValidationIssue::error(
                "name_count",
                subject,
                format!("expected one name, found {}", person.names.len()),
            ));
        }
        if person.sexes.len() != 1 {
            report.push(ValidationIssue::error(
                "sex_count",
                subject,
                format!("expected one sex, found {}", person.sexes.len()),
            ));
        }
    }
}

fn check_family_shape(
    graph: &FamilyGraph,
    subject: &str,
    family: &FamilyRecord,
    options: &CheckOptions,
    report: &mut EvaluationReport,
) {
    if family.husbands.len() != 1 {
        report.push(ValidationIssue::error(
            "husband_count",
            subject,
            format!("expected one husband, found {}", family.husbands.len()),
        ));
    }
    if family.wives.len() != 1 {
        report.push(ValidationIssue::error(
            "wife_count",
            subject,
            format!("expected one wife, found {}", family.wives.len()),
        ));
    }
    if let Some(max) = options.max_children
        && family.children.len() > max as usize
    {
        report.push(ValidationIssue::error(
            "too_many_children",
            subject,
            format!("{} children exceed the maximum of {max}", family.children.len()),
        ));
    }

    let roles = family
        .husbands
        .iter()
        .map(|person| (person, "husband", Some(Sex::Male)))
        .chain(family.wives.iter().map(|person| (person, "wife", Some(Sex::Female))))
        .chain(family.children.iter().map(|person| (person, "child", None)));
    for (person, role, required_sex) in roles {
        let Some(record) = graph.persons.get(person) else {
            report.push(ValidationIssue::error(
                "unknown_person",
                subject,
                format!("{role} {person} is not a declared person"),
            ));
            continue;
        };
        if let Some(required) = required_sex
            && record.sex().is_some_and(|sex| sex != required)
        {
            report.push(ValidationIssue::error(
                format!("{role}_not_{required}"),
                subject,
                format!("{role} {person} is not {required}"),
            ));
        }
    }

    if let (Some(husband), Some(wife)) = (family.husband(), family.wife()) {
        if husband == wife {
            report.push(ValidationIssue::error(
                "self_marriage",
                subject,
                format!("{husband} is both husband and wife"),
            ));
        }
        for spouse in [husband, wife] {
            if family.children.iter().any(|child| child == spouse) {
                report.push(ValidationIssue::error(
                    "spouse_is_own_child",
                    subject,
                    format!("{spouse} is both spouse and child"),
                ));
            }
        }
    }
}

/// Siblings and direct parent/child pairs must not marry.
fn check_close_relatives(
    graph: &FamilyGraph,
    subject: &str,
    family: &FamilyRecord,
    origins: &BTreeMap<&str, Vec<&str>>,
    report: &mut EvaluationReport,
) {
    let (Some(husband), Some(wife)) = (family.husband(), family.wife()) else {
        return;
    };
    let no_origin = Vec::new();
    let husband_origins = origins.get(husband).unwrap_or(&no_origin);
    let wife_origins = origins.get(wife).unwrap_or(&no_origin);

    if husband_origins.iter().any(|origin| wife_origins.contains(origin)) {
        report.push(ValidationIssue::error(
            "siblings_married",
            subject,
            format!("{husband} and {wife} share an origin family"),
        ));
    }

    if is_parent(graph, husband, wife_origins) || is_parent(graph, wife, husband_origins) {
        report.push(ValidationIssue::error(
            "parent_child_married",
            subject,
            format!("{husband} and {wife} are parent and child"),
        ));
    }
}

fn is_parent(graph: &FamilyGraph, parent: &str, child_origins: &[&str]) -> bool {
    child_origins.iter().any(|origin| {
        graph
            .families
            .get(*origin)
            .is_some_and(|family| family.husbands.iter().chain(&family.wives).any(|p| p == parent))
    })
}

fn check_memberships(
    graph: &FamilyGraph,
    origins: &BTreeMap<&str, Vec<&str>>,
    spouses: &BTreeMap<&str, Vec<&str>>,
    report: &mut EvaluationReport,
) {
    for (person, families) in origins {
        if families.len() > 1 {
            report.push(ValidationIssue::error(
                "multiple_origin_families",
                *person,
                format!("child in {} families: {}", families.len(), families.join(", ")),
            ));
        }
    }
    for (person, families) in spouses {
        if families.len() > 1 {
            report.push(ValidationIssue::error(
                "multiple_spouse_families",
                *person,
                format!("spouse in {} families: {}", families.len(), families.join(", ")),
            ));
        }
    }
    for subject in graph.persons.keys() {
        let subject = subject.as_str();
        if !origins.contains_key(subject) && !spouses.contains_key(subject) {
            report.push(ValidationIssue::warning(
                "isolated_person",
                subject,
                "person belongs to no family",
            ));
        }
    }
}
