//! The finalized launch request and its runtime wire shape.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::builder::BindMount;

/// Finalized host-level configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostConfig {
    /// Bind mounts in append order.
    pub binds: Vec<BindMount>,
    /// DNS servers in resolution priority order.
    pub dns_servers: Vec<String>,
    /// Network mode, passed through from the launch spec.
    pub network_mode: Option<String>,
    /// Whether the container runs privileged.
    pub privileged: bool,
}

/// Finalized container-level configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerConfig {
    /// Full entrypoint argument vector, wrappers first.
    pub entrypoint: Vec<String>,
    /// Command and arguments.
    pub command: Vec<String>,
    /// Declared volume paths.
    pub volumes: BTreeSet<String>,
    /// Environment variables.
    pub env: BTreeMap<String, String>,
}

/// The immutable configuration pair handed to the container runtime.
///
/// Created exactly once per task launch and discarded after the runtime's
/// create call succeeds or fails; never reused across tasks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeLaunchRequest {
    /// Host-level half of the request.
    pub host: HostConfig,
    /// Container-level half of the request.
    pub container: ContainerConfig,
}

impl RuntimeLaunchRequest {
    /// Serializes both halves into the runtime's native create-container
    /// request shape.
    #[must_use]
    pub fn to_create_request(&self) -> CreateContainerRequest {
        CreateContainerRequest {
            entrypoint: self.container.entrypoint.clone(),
            cmd: self.container.command.clone(),
            env: self
                .container
                .env
                .iter()
                .map(|(k, v)| format!("{k}={v}"))
                .collect(),
            volumes: self
                .container
                .volumes
                .iter()
                .map(|path| (path.clone(), EmptyObject {}))
                .collect(),
            host_config: CreateHostConfig {
                binds: self.host.binds.iter().map(ToString::to_string).collect(),
                dns: self.host.dns_servers.clone(),
                network_mode: self.host.network_mode.clone(),
                privileged: self.host.privileged,
            },
        }
    }
}

/// Placeholder for the runtime's empty-object volume values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EmptyObject {}

/// Host-config section of the runtime's create request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateHostConfig {
    /// Bind mounts as `source:target:mode` strings.
    #[serde(rename = "Binds", skip_serializing_if = "Vec::is_empty")]
    pub binds: Vec<String>,
    /// DNS servers. Omitted when empty so the runtime's resolver default
    /// applies inside the container.
    #[serde(rename = "Dns", skip_serializing_if = "Vec::is_empty")]
    pub dns: Vec<String>,
    /// Network mode.
    #[serde(rename = "NetworkMode", skip_serializing_if = "Option::is_none")]
    pub network_mode: Option<String>,
    /// Privileged flag.
    #[serde(rename = "Privileged")]
    pub privileged: bool,
}

/// The runtime's native create-container request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateContainerRequest {
    /// Entrypoint argument vector.
    #[serde(rename = "Entrypoint", skip_serializing_if = "Vec::is_empty")]
    pub entrypoint: Vec<String>,
    /// Command and arguments.
    #[serde(rename = "Cmd", skip_serializing_if = "Vec::is_empty")]
    pub cmd: Vec<String>,
    /// Environment as `KEY=value` strings.
    #[serde(rename = "Env", skip_serializing_if = "Vec::is_empty")]
    pub env: Vec<String>,
    /// Declared volumes as a path-to-empty-object map.
    #[serde(rename = "Volumes", skip_serializing_if = "BTreeMap::is_empty")]
    pub volumes: BTreeMap<String, EmptyObject>,
    /// Host-level configuration.
    #[serde(rename = "HostConfig")]
    pub host_config: CreateHostConfig,
}
