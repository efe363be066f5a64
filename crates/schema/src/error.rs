use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// A single failed constraint: which field, and why.
///
/// `path` is empty for the validated value itself, and dot separated for nested fields,
/// for example `attachment.fileName`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    path: String,
    message: String,
}

impl Violation {
    pub fn new<P: Into<String>, M: Into<String>>(path: P, message: M) -> Self {
        Self { path: path.into(), message: message.into() }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Moves this violation under the field `parent`
    pub(crate) fn nest(mut self, parent: &str) -> Self {
        if parent.is_empty() {
            return self;
        }
        self.path = if self.path.is_empty() { parent.to_owned() } else { format!("{parent}.{}", self.path) };
        self
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() { write!(f, "{}", self.message) } else { write!(f, "{}: {}", self.path, self.message) }
    }
}

/// The only error produced by validation, holding every [`Violation`] that was found
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[error("{} validation error(s): {}", .violations.len(), DisplayViolations(.violations))]
pub struct ValidationError {
    violations: Vec<Violation>,
}

impl ValidationError {
    pub(crate) fn new(violations: Vec<Violation>) -> Self {
        Self { violations }
    }

    /// An error carrying a single violation
    pub fn single<P: Into<String>, M: Into<String>>(path: P, message: M) -> Self {
        Self { violations: vec![Violation::new(path, message)] }
    }

    /// Builds an error from collected violations, `None` when nothing failed
    pub fn from_violations(violations: Vec<Violation>) -> Option<Self> {
        (!violations.is_empty()).then_some(Self { violations })
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub fn into_violations(self) -> Vec<Violation> {
        self.violations
    }

    /// Returns true if any violation was reported for `path`
    pub fn has_violation(&self, path: &str) -> bool {
        self.violations.iter().any(|v| v.path == path)
    }

    pub(crate) fn nest(self, parent: &str) -> Self {
        Self { violations: self.violations.into_iter().map(|v| v.nest(parent)).collect() }
    }
}

struct DisplayViolations<'a>(&'a [Violation]);

impl fmt::Display for DisplayViolations<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, violation) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{violation}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::error::{ValidationError, Violation};

    #[test]
    fn test_nest_path() {
        let violation = Violation::new("", "is a required field").nest("fileName");
        assert_eq!(violation.path(), "fileName");

        let violation = violation.nest("attachment");
        assert_eq!(violation.path(), "attachment.fileName");

        let violation = violation.nest("");
        assert_eq!(violation.path(), "attachment.fileName");
    }

    #[test]
    fn test_display() {
        let error = ValidationError::from_violations(vec![
            Violation::new("body", "failed type check, got string"),
            Violation::new("fileName", "expected string, got number"),
        ])
        .unwrap();

        assert_eq!(
            error.to_string(),
            "2 validation error(s): body: failed type check, got string; fileName: expected string, got number"
        );
        assert!(error.has_violation("body"));
        assert!(!error.has_violation("encoding"));
    }

    #[test]
    fn test_empty_violations_is_not_an_error() {
        assert!(ValidationError::from_violations(vec![]).is_none());
    }

    #[test]
    fn test_serialize() {
        let error = ValidationError::single("mimeType", "is a required field");
        let json = serde_json::to_value(&error).unwrap();
        assert_eq!(json, serde_json::json!({ "violations": [{ "path": "mimeType", "message": "is a required field" }] }));
    }
}
