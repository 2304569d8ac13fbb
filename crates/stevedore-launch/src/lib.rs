//! # stevedore-launch
//!
//! Container launch configuration assembly for the Stevedore agent.
//!
//! Immediately before creating a container, the agent composes the job's
//! declared [`spec::LaunchSpec`] and the image's embedded
//! [`spec::ImageConfigSnapshot`] into one consistent create request. The
//! composition runs through an ordered [`chain::DecorationChain`] of
//! [`decorator::ContainerDecorator`]s, each contributing bind mounts,
//! entrypoint wrapping, volume declarations, or DNS settings to a private
//! pair of config builders. The finished, immutable
//! [`request::RuntimeLaunchRequest`] is what gets handed to the runtime.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

pub mod builder;
pub mod chain;
pub mod decorator;
pub mod error;
pub mod request;
pub mod spec;
pub mod syslog;
