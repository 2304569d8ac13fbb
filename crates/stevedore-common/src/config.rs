//! Agent configuration model.
//!
//! Fixed at agent-process startup; one `AgentConfig` outlives every task
//! launch the process performs, so everything in here must stay read-only
//! once the agent is running.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Startup-fixed configuration for a Stevedore agent process.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// DNS servers handed to every launched container, in resolution
    /// priority order. Empty means the container runtime's default applies.
    pub dns_servers: Vec<String>,
    /// Syslog endpoint (`host:port`) for container log redirection.
    /// When absent, container output is not redirected.
    pub syslog_redirect_to: Option<String>,
    /// Host directory containing the agent's container tooling.
    pub tooling_dir: PathBuf,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            dns_servers: Vec::new(),
            syslog_redirect_to: None,
            tooling_dir: PathBuf::from(crate::constants::AGENT_TOOLING_DIR),
        }
    }
}
