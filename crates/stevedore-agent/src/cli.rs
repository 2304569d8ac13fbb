//! Agent flag definitions and the per-task launch entry.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::Parser;
use stevedore_common::config::AgentConfig;
use stevedore_common::error::{Result as CommonResult, StevedoreError};
use stevedore_common::types::JobId;
use stevedore_launch::chain::DecorationChain;
use stevedore_launch::spec::{ImageConfigSnapshot, LaunchSpec};
use stevedore_launch::syslog::SyslogRedirector;

/// Stevedore agent — assembles container launch configuration.
#[derive(Parser, Debug)]
#[command(name = "stevedore-agent", version, about, long_about = None)]
pub struct Cli {
    /// DNS server for launched containers, in resolution priority order
    /// (repeatable). When omitted, the runtime's default resolver applies.
    #[arg(long = "dns", value_name = "SERVER")]
    pub dns: Vec<String>,

    /// Redirect container stdout/stderr to this syslog endpoint.
    #[arg(long, value_name = "HOST:PORT")]
    pub syslog_redirect_to: Option<String>,

    /// Host directory containing the agent's container tooling.
    #[arg(
        long,
        value_name = "DIR",
        default_value = stevedore_common::constants::AGENT_TOOLING_DIR
    )]
    pub tooling_dir: PathBuf,

    /// Job identity; a random one is generated when omitted.
    #[arg(long, value_name = "ID")]
    pub job: Option<String>,

    /// Environment override for the container (repeatable, KEY=VALUE).
    #[arg(long = "env", value_name = "KEY=VALUE")]
    pub env: Vec<String>,

    /// Path to the image configuration snapshot JSON produced by image
    /// inspection. When omitted, the image is assumed to declare nothing.
    #[arg(long, value_name = "PATH")]
    pub image_config: Option<PathBuf>,

    /// Command and arguments to run inside the container.
    #[arg(trailing_var_arg = true, value_name = "COMMAND")]
    pub command: Vec<String>,
}

impl Cli {
    /// Collects the startup-fixed agent settings from the parsed flags.
    #[must_use]
    pub fn agent_config(&self) -> AgentConfig {
        AgentConfig {
            dns_servers: self.dns.clone(),
            syslog_redirect_to: self.syslog_redirect_to.clone(),
            tooling_dir: self.tooling_dir.clone(),
        }
    }
}

/// Builds the decoration chain applied to every launch of this agent
/// process. Called once at startup; the chain is shared across launches.
#[must_use]
pub fn build_chain(config: &AgentConfig) -> DecorationChain {
    let mut decorators: Vec<Arc<dyn stevedore_launch::decorator::ContainerDecorator>> = Vec::new();
    if let Some(endpoint) = &config.syslog_redirect_to {
        decorators.push(Arc::new(
            SyslogRedirector::new(endpoint).with_tooling_dir(&config.tooling_dir),
        ));
    }
    DecorationChain::new(decorators)
}

/// Assembles the launch request for the job described by the flags and
/// writes the runtime create request to stdout as JSON.
///
/// # Errors
///
/// Returns an error if an environment override is malformed, the snapshot
/// cannot be read or parsed, or configuration assembly fails.
pub fn execute(cli: &Cli) -> anyhow::Result<()> {
    let config = cli.agent_config();
    let chain = build_chain(&config);
    tracing::info!(decorators = chain.len(), "decoration chain built");

    let job = cli
        .job
        .as_ref()
        .map_or_else(JobId::generate, JobId::new);
    let mut spec = LaunchSpec::new(job, cli.command.clone());
    spec.dns_servers = config.dns_servers.clone();
    spec.env = parse_env_overrides(&cli.env)?;

    let snapshot = match &cli.image_config {
        Some(path) => load_snapshot(path)?,
        None => ImageConfigSnapshot::default(),
    };

    let request = chain.assemble(&spec, &snapshot)?;
    tracing::info!(job = %spec.job, "launch configuration assembled");

    let json = serde_json::to_string_pretty(&request.to_create_request())?;
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{json}")?;
    Ok(())
}

/// Parses repeatable `KEY=VALUE` flags into an environment map.
///
/// # Errors
///
/// Returns an error for entries without a `=` or with an empty key.
fn parse_env_overrides(entries: &[String]) -> CommonResult<BTreeMap<String, String>> {
    let mut env = BTreeMap::new();
    for entry in entries {
        let (key, value) = entry.split_once('=').ok_or_else(|| StevedoreError::Config {
            message: format!("environment override {entry:?} is not KEY=VALUE"),
        })?;
        if key.is_empty() {
            return Err(StevedoreError::Config {
                message: format!("environment override {entry:?} has an empty key"),
            });
        }
        let _ = env.insert(key.to_string(), value.to_string());
    }
    Ok(env)
}

/// Reads and parses an image configuration snapshot from disk.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid snapshot
/// JSON.
fn load_snapshot(path: &Path) -> CommonResult<ImageConfigSnapshot> {
    let content = std::fs::read_to_string(path).map_err(|e| StevedoreError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(serde_json::from_str(&content)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(
            std::iter::once("stevedore-agent").chain(args.iter().copied()),
        )
        .expect("valid arguments")
    }

    #[test]
    fn repeated_dns_flags_keep_order() {
        let cli = parse(&["--dns", "127.0.0.1", "--dns", "127.0.0.2", "cat"]);
        assert_eq!(cli.agent_config().dns_servers, ["127.0.0.1", "127.0.0.2"]);
    }

    #[test]
    fn syslog_flag_controls_chain_contents() {
        let with = parse(&["--syslog-redirect-to", "logs:514", "cat"]);
        assert_eq!(build_chain(&with.agent_config()).len(), 1);

        let without = parse(&["cat"]);
        assert!(build_chain(&without.agent_config()).is_empty());
    }

    #[test]
    fn tooling_dir_defaults_to_constant() {
        let cli = parse(&["cat"]);
        assert_eq!(
            cli.tooling_dir,
            PathBuf::from(stevedore_common::constants::AGENT_TOOLING_DIR)
        );
    }

    #[test]
    fn trailing_arguments_become_the_command() {
        let cli = parse(&["--dns", "127.0.0.1", "cat", "/etc/resolv.conf"]);
        assert_eq!(cli.command, ["cat", "/etc/resolv.conf"]);
    }

    #[test]
    fn env_overrides_parse_into_map() {
        let env = parse_env_overrides(&["A=1".into(), "B=two=three".into()])
            .expect("valid overrides");
        assert_eq!(env.get("A").map(String::as_str), Some("1"));
        assert_eq!(env.get("B").map(String::as_str), Some("two=three"));
    }

    #[test]
    fn env_override_without_separator_is_rejected() {
        let err = parse_env_overrides(&["MALFORMED".into()]).expect_err("must fail");
        assert!(matches!(err, StevedoreError::Config { .. }));
    }

    #[test]
    fn snapshot_loads_from_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("image.json");
        std::fs::write(&path, r#"{"entrypoint": ["/bin/app"]}"#).expect("write snapshot");

        let snapshot = load_snapshot(&path).expect("load snapshot");
        assert_eq!(snapshot.entrypoint_or_empty(), ["/bin/app"]);
    }

    #[test]
    fn missing_snapshot_file_reports_io_error() {
        let err = load_snapshot(Path::new("/nonexistent/image.json")).expect_err("must fail");
        assert!(matches!(err, StevedoreError::Io { .. }));
    }

    #[test]
    fn dns_flags_reach_the_create_request() {
        let cli = parse(&["--dns", "127.0.0.1", "--dns", "127.0.0.2", "cat"]);
        let config = cli.agent_config();
        let chain = build_chain(&config);

        let mut spec = LaunchSpec::new(JobId::new("job-1"), cli.command.clone());
        spec.dns_servers = config.dns_servers;
        let request = chain
            .assemble(&spec, &ImageConfigSnapshot::default())
            .expect("assemble");

        let json = serde_json::to_value(request.to_create_request()).expect("serialize");
        assert_eq!(json["HostConfig"]["Dns"][0], "127.0.0.1");
        assert_eq!(json["HostConfig"]["Dns"][1], "127.0.0.2");
    }
}
