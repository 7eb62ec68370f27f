use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use utoipa::ToSchema;

/// A single rule violation, addressed by a path such as `steps[1].instruction`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FieldError {
    pub path: String,
    pub message: String,
}

impl FieldError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{} {}", self.path, self.message)
        }
    }
}

/// Every rule violation found in one candidate. Never empty.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Validation failed: {}", .0.first().map(ToString::to_string).unwrap_or_default())]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    /// Returns `None` when there is nothing to report.
    pub fn from_vec(errors: Vec<FieldError>) -> Option<Self> {
        if errors.is_empty() {
            None
        } else {
            Some(Self(errors))
        }
    }

    pub fn single(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self(vec![FieldError::new(path, message)])
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    pub fn into_errors(self) -> Vec<FieldError> {
        self.0
    }

    /// Human-readable messages, one per violation, in discovery order.
    pub fn messages(&self) -> Vec<String> {
        self.0.iter().map(ToString::to_string).collect()
    }

    pub fn for_path(&self, path: &str) -> Option<&FieldError> {
        self.0.iter().find(|e| e.path == path)
    }

    /// Keeps the first violation of each path, which is what a form shows.
    pub fn first_per_path(self) -> Self {
        let mut seen: Vec<String> = Vec::new();
        let errors = self
            .0
            .into_iter()
            .filter(|e| {
                if seen.contains(&e.path) {
                    false
                } else {
                    seen.push(e.path.clone());
                    true
                }
            })
            .collect();
        Self(errors)
    }
}
