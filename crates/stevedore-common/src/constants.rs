//! System-wide constants and default paths.

/// Host directory where the agent's container tooling is installed.
pub const AGENT_TOOLING_DIR: &str = "/usr/lib/stevedore";

/// Path at which the tooling directory is bound inside containers.
pub const CONTAINER_TOOLING_DIR: &str = "/stevedore";

/// Argument-vector token separating injected wrapper flags from the
/// wrapped program's own entrypoint.
pub const ENTRYPOINT_SEPARATOR: &str = "--";
