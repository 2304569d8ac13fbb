//! Mutable config accumulators and their merge invariants.
//!
//! One builder pair exists per task launch and is owned by the decoration
//! chain for the duration of that assembly. Builders enforce the merge
//! rules so individual decorators do not have to: no two binds for one
//! target, set semantics for volumes, ordered prefixing for entrypoints.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::DecorationError;
use crate::request::{ContainerConfig, HostConfig};
use crate::spec::{ImageConfigSnapshot, LaunchSpec};

/// How a bind mount is exposed inside the container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BindMode {
    /// Mounted read-only.
    ReadOnly,
    /// Mounted read-write.
    ReadWrite,
}

impl BindMode {
    /// Returns the runtime's mode suffix for this variant.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ReadOnly => "ro",
            Self::ReadWrite => "rw",
        }
    }
}

impl fmt::Display for BindMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A host path bound into the container filesystem.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BindMount {
    /// Path on the host.
    pub source: String,
    /// Path inside the container.
    pub target: String,
    /// Mount mode.
    pub mode: BindMode,
}

impl BindMount {
    /// Creates a read-only bind mount.
    #[must_use]
    pub fn read_only(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            mode: BindMode::ReadOnly,
        }
    }

    /// Creates a read-write bind mount.
    #[must_use]
    pub fn read_write(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            mode: BindMode::ReadWrite,
        }
    }
}

impl fmt::Display for BindMount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.source, self.target, self.mode)
    }
}

/// Accumulator for host-level configuration.
#[derive(Debug)]
pub struct HostConfigBuilder {
    binds: Vec<BindMount>,
    dns_servers: Vec<String>,
    network_mode: Option<String>,
    privileged: bool,
}

impl HostConfigBuilder {
    /// Seeds a fresh accumulator from the launch spec: DNS servers in the
    /// spec's order, passthrough fields copied unchanged, no binds yet.
    pub(crate) fn seed(spec: &LaunchSpec) -> Self {
        Self {
            binds: Vec::new(),
            dns_servers: spec.dns_servers.clone(),
            network_mode: spec.network_mode.clone(),
            privileged: spec.privileged,
        }
    }

    /// Appends a bind mount.
    ///
    /// Re-adding an identical entry is a no-op, so a decorator invoked
    /// twice against the same accumulator contributes its bind once.
    ///
    /// # Errors
    ///
    /// Returns [`DecorationError::Conflict`] if an entry for the same
    /// target already exists with a different source or mode.
    pub fn add_bind(&mut self, bind: BindMount) -> Result<(), DecorationError> {
        if let Some(existing) = self.binds.iter().find(|b| b.target == bind.target) {
            if existing.source == bind.source && existing.mode == bind.mode {
                return Ok(());
            }
            return Err(DecorationError::Conflict {
                target: bind.target.clone(),
                existing: existing.to_string(),
                proposed: bind.to_string(),
            });
        }
        self.binds.push(bind);
        Ok(())
    }

    /// Appends a DNS server.
    ///
    /// Order affects runtime resolution priority and is preserved as
    /// given; duplicates are kept (suppression is the caller's call).
    pub fn add_dns_server(&mut self, server: impl Into<String>) {
        self.dns_servers.push(server.into());
    }

    /// Bind mounts accumulated so far, in append order.
    #[must_use]
    pub fn binds(&self) -> &[BindMount] {
        &self.binds
    }

    /// DNS servers accumulated so far, in append order.
    #[must_use]
    pub fn dns_servers(&self) -> &[String] {
        &self.dns_servers
    }

    /// Finalizes into the immutable host half of the launch request.
    pub(crate) fn finish(self) -> HostConfig {
        HostConfig {
            binds: self.binds,
            dns_servers: self.dns_servers,
            network_mode: self.network_mode,
            privileged: self.privileged,
        }
    }
}

/// Accumulator for container-level configuration.
#[derive(Debug)]
pub struct ContainerConfigBuilder {
    entrypoint: Vec<String>,
    command: Vec<String>,
    volumes: BTreeSet<String>,
    env: BTreeMap<String, String>,
}

impl ContainerConfigBuilder {
    /// Seeds a fresh accumulator: entrypoint and volumes from the image
    /// snapshot (absent treated as empty), command and environment
    /// overrides from the spec.
    ///
    /// # Errors
    ///
    /// Returns [`DecorationError::Configuration`] if the image declares a
    /// malformed volume path (empty or relative), so no decorator runs
    /// against an inconsistent snapshot.
    pub(crate) fn seed(
        spec: &LaunchSpec,
        image: &ImageConfigSnapshot,
    ) -> Result<Self, DecorationError> {
        let mut volumes = BTreeSet::new();
        if let Some(declared) = &image.volumes {
            for path in declared {
                if path.is_empty() || !path.starts_with('/') {
                    return Err(DecorationError::Configuration {
                        message: format!("image declares malformed volume path {path:?}"),
                    });
                }
                let _ = volumes.insert(path.clone());
            }
        }
        Ok(Self {
            entrypoint: image.entrypoint_or_empty().to_vec(),
            command: spec.command.clone(),
            volumes,
            env: spec.env.clone(),
        })
    }

    /// Prepends a wrapper to the entrypoint, keeping whatever entrypoint
    /// was accumulated before it as the tail.
    ///
    /// Safe to call repeatedly; each call wraps the current value, so the
    /// order of calls decides the nesting.
    pub fn prefix_entrypoint(&mut self, wrapper: impl IntoIterator<Item = String>) {
        let mut wrapped: Vec<String> = wrapper.into_iter().collect();
        wrapped.append(&mut self.entrypoint);
        self.entrypoint = wrapped;
    }

    /// Ensures the given path exists in the volume set. Adding a path
    /// already present is a no-op.
    pub fn declare_volume(&mut self, path: impl Into<String>) {
        let _ = self.volumes.insert(path.into());
    }

    /// Sets an environment variable. Keys are unique; inserting an
    /// existing key replaces its value.
    pub fn insert_env(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let _ = self.env.insert(key.into(), value.into());
    }

    /// The entrypoint accumulated so far.
    #[must_use]
    pub fn entrypoint(&self) -> &[String] {
        &self.entrypoint
    }

    /// The volume set accumulated so far.
    #[must_use]
    pub fn volumes(&self) -> &BTreeSet<String> {
        &self.volumes
    }

    /// Finalizes into the immutable container half of the launch request.
    pub(crate) fn finish(self) -> ContainerConfig {
        ContainerConfig {
            entrypoint: self.entrypoint,
            command: self.command,
            volumes: self.volumes,
            env: self.env,
        }
    }
}
