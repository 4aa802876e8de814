use std::fmt::Write as _;

use serde::Serialize;

/// Severity level for validation issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueSeverity {
    Error,
    Warning,
}

/// Structured validation issue attached to a document subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub severity: IssueSeverity,
    pub code: String,
    pub subject: String,
    pub message: String,
}

impl ValidationIssue {
    pub fn error(
        code: impl Into<String>,
        subject: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity: IssueSeverity::Error,
            code: code.into(),
            subject: subject.into(),
            message: message.into(),
        }
    }

    pub fn warning(
        code: impl Into<String>,
        subject: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity: IssueSeverity::Warning,
            ..Self::error(code, subject, message)
        }
    }
}

/// Options for [`crate::check_graph`].
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// Upper bound on children per family, when known.
    pub max_children: Option<u32>,
}

/// Aggregated result of checking a family graph.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct EvaluationReport {
    pub persons: usize,
    pub families: usize,
    pub child_facts: usize,
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
}

impl EvaluationReport {
    /// Returns true when there are no errors.
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn push(&mut self, issue: ValidationIssue) {
        match issue.severity {
            IssueSeverity::Error => self.errors.push(issue),
            IssueSeverity::Warning => self.warnings.push(issue),
        }
    }

    /// Plain-text summary for terminals.
    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "persons: {}, families: {}, child facts: {}",
            self.persons, self.families, self.child_facts
        );
        for issue in self.errors.iter().chain(&self.warnings) {
            let level = match issue.severity {
                IssueSeverity::Error => "error",
                IssueSeverity::Warning => "warning",
            };
            let _ = writeln!(
                out,
                "{level} [{}] {}: {}",
                issue.code, issue.subject, issue.message
            );
        }
        let _ = writeln!(
            out,
            "{} error(s), {} warning(s)",
            self.errors.len(),
            self.warnings.len()
        );
        out
    }
}
