//! Immutable inputs to one launch assembly.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use stevedore_common::types::JobId;

/// What the operator asked for: the declared runtime specification of one
/// task launch.
///
/// Constructed once by the caller and borrowed immutably for the duration
/// of the assembly; the pipeline never writes back into it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchSpec {
    /// Identity of the job this task belongs to.
    pub job: JobId,
    /// Command and arguments to run inside the container.
    pub command: Vec<String>,
    /// DNS servers in resolution priority order. Empty means the runtime's
    /// own resolver default applies.
    pub dns_servers: Vec<String>,
    /// Environment overrides applied on top of the image's environment.
    pub env: BTreeMap<String, String>,
    /// Network mode passed through to the runtime unchanged.
    pub network_mode: Option<String>,
    /// Whether the container runs privileged. Passed through unchanged.
    pub privileged: bool,
}

impl LaunchSpec {
    /// Creates a spec with the given job identity and command; all other
    /// fields start empty.
    #[must_use]
    pub fn new(job: JobId, command: Vec<String>) -> Self {
        Self {
            job,
            command,
            dns_servers: Vec::new(),
            env: BTreeMap::new(),
            network_mode: None,
            privileged: false,
        }
    }
}

/// Read-only view of a container image's embedded configuration, obtained
/// from the image-inspection collaborator.
///
/// `None` means the image declares nothing; `Some` with an empty collection
/// means the image declares an explicitly empty value. Decorators treat
/// both as an empty sequence, but the distinction is preserved here so it
/// never has to be guessed downstream.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageConfigSnapshot {
    /// The image's own entrypoint, if it declares one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entrypoint: Option<Vec<String>>,
    /// Volume paths the image declares, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volumes: Option<BTreeSet<String>>,
}

impl ImageConfigSnapshot {
    /// Returns the entrypoint, treating an absent one as empty.
    #[must_use]
    pub fn entrypoint_or_empty(&self) -> &[String] {
        self.entrypoint.as_deref().unwrap_or_default()
    }
}
