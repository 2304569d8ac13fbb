//! Syslog redirection sidecar decorator.
//!
//! Bind mounts the agent's tooling directory inside the container and
//! wraps the entrypoint with the syslog-redirector executable there, so
//! the primary program's stdout/stderr end up in syslog without the image
//! knowing anything about it.

use std::path::PathBuf;

use stevedore_common::constants::{
    AGENT_TOOLING_DIR, CONTAINER_TOOLING_DIR, ENTRYPOINT_SEPARATOR,
};

use crate::builder::{BindMount, ContainerConfigBuilder, HostConfigBuilder};
use crate::decorator::ContainerDecorator;
use crate::error::DecorationError;
use crate::spec::{ImageConfigSnapshot, LaunchSpec};

/// Redirects container stdout/stderr to a syslog endpoint via an injected
/// wrapper executable.
#[derive(Debug, Clone)]
pub struct SyslogRedirector {
    endpoint: String,
    tooling_dir: PathBuf,
}

impl SyslogRedirector {
    /// Creates a redirector targeting the given `host:port` endpoint,
    /// using the default agent tooling directory.
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            tooling_dir: PathBuf::from(AGENT_TOOLING_DIR),
        }
    }

    /// Overrides the host directory the redirector executable lives in.
    #[must_use]
    pub fn with_tooling_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.tooling_dir = dir.into();
        self
    }

    fn redirector_path() -> String {
        format!("{CONTAINER_TOOLING_DIR}/syslog-redirector")
    }
}

impl ContainerDecorator for SyslogRedirector {
    fn decorate_host_config(&self, host: &mut HostConfigBuilder) -> Result<(), DecorationError> {
        host.add_bind(BindMount::read_only(
            self.tooling_dir.to_string_lossy(),
            CONTAINER_TOOLING_DIR,
        ))
    }

    fn decorate_container_config(
        &self,
        spec: &LaunchSpec,
        _image: &ImageConfigSnapshot,
        container: &mut ContainerConfigBuilder,
    ) -> Result<(), DecorationError> {
        container.prefix_entrypoint([
            Self::redirector_path(),
            "-h".to_string(),
            self.endpoint.clone(),
            "-n".to_string(),
            spec.job.to_string(),
            ENTRYPOINT_SEPARATOR.to_string(),
        ]);
        // The bind target must exist in the volume set so the runtime does
        // not persist it as writable container state.
        container.declare_volume(CONTAINER_TOOLING_DIR);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use stevedore_common::types::JobId;

    use super::*;

    fn spec() -> LaunchSpec {
        LaunchSpec::new(JobId::new("billing:v7"), vec!["./serve".into()])
    }

    #[test]
    fn host_config_gains_readonly_tooling_bind() {
        let redirector = SyslogRedirector::new("logs.internal:514");
        let mut host = HostConfigBuilder::seed(&spec());
        redirector
            .decorate_host_config(&mut host)
            .expect("decorate host");
        assert_eq!(host.binds().len(), 1);
        assert_eq!(
            host.binds()[0].to_string(),
            "/usr/lib/stevedore:/stevedore:ro"
        );
    }

    #[test]
    fn entrypoint_wraps_image_entrypoint() {
        let redirector = SyslogRedirector::new("logs.internal:514");
        let image = ImageConfigSnapshot {
            entrypoint: Some(vec!["/bin/app".into(), "--fast".into()]),
            volumes: None,
        };
        let mut container = ContainerConfigBuilder::seed(&spec(), &image).expect("seed");
        redirector
            .decorate_container_config(&spec(), &image, &mut container)
            .expect("decorate container");
        assert_eq!(
            container.entrypoint(),
            [
                "/stevedore/syslog-redirector",
                "-h",
                "logs.internal:514",
                "-n",
                "billing:v7",
                "--",
                "/bin/app",
                "--fast",
            ]
        );
    }

    #[test]
    fn absent_image_entrypoint_is_treated_as_empty() {
        let redirector = SyslogRedirector::new("logs.internal:514");
        let image = ImageConfigSnapshot::default();
        let mut container = ContainerConfigBuilder::seed(&spec(), &image).expect("seed");
        redirector
            .decorate_container_config(&spec(), &image, &mut container)
            .expect("decorate container");
        assert_eq!(
            container.entrypoint().last().map(String::as_str),
            Some("--"),
            "nothing follows the separator when the image has no entrypoint"
        );
    }

    #[test]
    fn tooling_dir_is_declared_as_volume() {
        let redirector = SyslogRedirector::new("logs.internal:514");
        let image = ImageConfigSnapshot::default();
        let mut container = ContainerConfigBuilder::seed(&spec(), &image).expect("seed");
        redirector
            .decorate_container_config(&spec(), &image, &mut container)
            .expect("decorate container");
        assert!(container.volumes().contains("/stevedore"));
    }

    #[test]
    fn custom_tooling_dir_changes_bind_source_only() {
        let redirector =
            SyslogRedirector::new("logs.internal:514").with_tooling_dir("/opt/stevedore");
        let mut host = HostConfigBuilder::seed(&spec());
        redirector
            .decorate_host_config(&mut host)
            .expect("decorate host");
        assert_eq!(host.binds()[0].to_string(), "/opt/stevedore:/stevedore:ro");
    }
}
