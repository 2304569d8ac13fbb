//! Domain primitive types used across the Stevedore workspace.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Globally unique identifier for a job.
///
/// Opaque and stable for the lifetime of the job; two launches of the same
/// job carry the same `JobId` even though each launch assembles its own
/// runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobId(String);

impl JobId {
    /// Creates a new job ID from a string value.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generates a random job ID.
    #[must_use]
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Returns the inner string representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn job_id_preserves_value() {
        let id = JobId::new("billing:v7");
        assert_eq!(id.as_str(), "billing:v7");
        assert_eq!(format!("{id}"), "billing:v7");
    }

    #[test]
    fn job_id_generate_unique() {
        let a = JobId::generate();
        let b = JobId::generate();
        assert_ne!(a, b, "generated IDs should be unique");
        assert!(!a.as_str().is_empty());
    }
}
