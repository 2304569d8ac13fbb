//! Assembly-time error taxonomy.
//!
//! Both variants abort the decoration chain before any container is
//! created; retry policy belongs to the task-launch orchestration above
//! this crate.

use thiserror::Error;

/// Failure raised while assembling a launch configuration.
#[derive(Debug, Error)]
pub enum DecorationError {
    /// A decorator's (or the seed step's) input was unusable, e.g.
    /// malformed volume declarations in the image metadata.
    #[error("unusable launch configuration: {message}")]
    Configuration {
        /// Description of the unusable input.
        message: String,
    },

    /// Two decorators disagree on a shared resource: the same mount
    /// target with a different source or mode.
    #[error("conflicting binds for {target}: {existing} vs {proposed}")]
    Conflict {
        /// Mount target both entries claim.
        target: String,
        /// Bind already present in the accumulator.
        existing: String,
        /// Bind the later decorator tried to add.
        proposed: String,
    },
}
