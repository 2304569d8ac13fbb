//! The decorator capability contract.

use crate::builder::{ContainerConfigBuilder, HostConfigBuilder};
use crate::error::DecorationError;
use crate::spec::{ImageConfigSnapshot, LaunchSpec};

/// A unit that contributes a bounded, composable modification to container
/// launch configuration.
///
/// Decorator instances are constructed once at agent startup and shared
/// across concurrent task launches, so implementors must hold only
/// read-only configuration; any mutable state needs its own
/// synchronization, documented as part of that decorator's contract.
///
/// Both operations default to no-ops; a concrete decorator overrides one
/// or both. Absent image configuration (no entrypoint, no volumes) is
/// valid input and must be treated as empty, never as an error. A
/// decorator that fails must leave the accumulator as it found it.
pub trait ContainerDecorator: Send + Sync {
    /// Contributes host-level configuration: bind mounts, DNS servers.
    ///
    /// Must be idempotent with respect to its own contribution: invoked
    /// twice against already-present state, it skips rather than
    /// duplicates. The accumulator's bind-append rule covers the common
    /// case.
    ///
    /// # Errors
    ///
    /// Returns a [`DecorationError`] if the contribution cannot be
    /// applied; the chain aborts for this task.
    fn decorate_host_config(&self, _host: &mut HostConfigBuilder) -> Result<(), DecorationError> {
        Ok(())
    }

    /// Contributes container-level configuration: entrypoint wrapping,
    /// volume declarations, environment.
    ///
    /// Entrypoint wrappers prepend their own executable and flags plus a
    /// separator, keeping the entrypoint already in the accumulator (the
    /// image's own unless a prior decorator wrapped it) as the tail.
    ///
    /// # Errors
    ///
    /// Returns a [`DecorationError`] if the contribution cannot be
    /// applied; the chain aborts for this task.
    fn decorate_container_config(
        &self,
        _spec: &LaunchSpec,
        _image: &ImageConfigSnapshot,
        _container: &mut ContainerConfigBuilder,
    ) -> Result<(), DecorationError> {
        Ok(())
    }
}
