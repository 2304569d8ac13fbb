//! The decoration chain: ordered, deterministic assembly of one launch.

use std::sync::Arc;

use crate::builder::{ContainerConfigBuilder, HostConfigBuilder};
use crate::decorator::ContainerDecorator;
use crate::error::DecorationError;
use crate::request::RuntimeLaunchRequest;
use crate::spec::{ImageConfigSnapshot, LaunchSpec};

/// An ordered sequence of decorators applied to every task launch.
///
/// Built once at agent-process startup and shared across launches; each
/// [`assemble`](Self::assemble) call works on its own private builder
/// pair, so concurrent launches never share mutable state.
///
/// Order is caller-specified and never auto-sorted: each entrypoint wrap
/// changes what the next decorator sees as the prior entrypoint, so the
/// last decorator's wrapper ends up first on the final argument vector.
#[derive(Clone, Default)]
pub struct DecorationChain {
    decorators: Vec<Arc<dyn ContainerDecorator>>,
}

impl DecorationChain {
    /// Creates a chain applying the given decorators in order.
    #[must_use]
    pub fn new(decorators: Vec<Arc<dyn ContainerDecorator>>) -> Self {
        Self { decorators }
    }

    /// Returns the number of decorators in the chain.
    #[must_use]
    pub fn len(&self) -> usize {
        self.decorators.len()
    }

    /// Returns whether the chain holds no decorators.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.decorators.is_empty()
    }

    /// Assembles the finalized launch request for one task.
    ///
    /// Seeds a fresh builder pair from the spec and image snapshot, then
    /// invokes each decorator's two operations in list order, threading
    /// the same builders through. With an empty chain the image
    /// entrypoint is used verbatim.
    ///
    /// # Errors
    ///
    /// Fail-fast: the first [`DecorationError`] aborts the remaining
    /// decorators and no request is produced.
    pub fn assemble(
        &self,
        spec: &LaunchSpec,
        image: &ImageConfigSnapshot,
    ) -> Result<RuntimeLaunchRequest, DecorationError> {
        let mut host = HostConfigBuilder::seed(spec);
        let mut container = ContainerConfigBuilder::seed(spec, image)?;

        for decorator in &self.decorators {
            decorator.decorate_host_config(&mut host)?;
            decorator.decorate_container_config(spec, image, &mut container)?;
        }

        let request = RuntimeLaunchRequest {
            host: host.finish(),
            container: container.finish(),
        };
        tracing::debug!(
            job = %spec.job,
            decorators = self.decorators.len(),
            binds = request.host.binds.len(),
            "launch configuration assembled"
        );
        Ok(request)
    }
}

impl std::fmt::Debug for DecorationChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecorationChain")
            .field("decorators", &self.decorators.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use stevedore_common::types::JobId;

    use super::*;

    fn spec() -> LaunchSpec {
        LaunchSpec::new(JobId::new("job-1"), vec!["sh".into()])
    }

    #[test]
    fn empty_chain_uses_image_entrypoint_verbatim() {
        let image = ImageConfigSnapshot {
            entrypoint: Some(vec!["/bin/app".into(), "--flag".into()]),
            volumes: None,
        };
        let request = DecorationChain::default()
            .assemble(&spec(), &image)
            .expect("assemble");
        assert_eq!(request.container.entrypoint, ["/bin/app", "--flag"]);
        assert!(request.host.binds.is_empty());
    }

    #[test]
    fn seed_failure_aborts_before_decorators_run() {
        struct Panicking;
        impl ContainerDecorator for Panicking {
            fn decorate_host_config(
                &self,
                _host: &mut HostConfigBuilder,
            ) -> Result<(), DecorationError> {
                unreachable!("decorator must not run on a malformed snapshot")
            }
        }

        let image = ImageConfigSnapshot {
            entrypoint: None,
            volumes: Some(std::collections::BTreeSet::from(["relative".to_string()])),
        };
        let chain = DecorationChain::new(vec![Arc::new(Panicking)]);
        let err = chain
            .assemble(&spec(), &image)
            .expect_err("malformed snapshot must fail");
        assert!(matches!(err, DecorationError::Configuration { .. }));
    }

    #[test]
    fn chain_reports_length() {
        let chain = DecorationChain::default();
        assert!(chain.is_empty());
        assert_eq!(chain.len(), 0);
    }
}
