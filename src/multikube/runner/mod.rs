//! # Runner Layer
//!
//! This module defines the execution abstraction for multikube. The
//! [`CommandRunner`] trait is the only way the engine reaches the outside
//! world.
//!
//! ## Implementations
//!
//! - [`kubectl::KubectlRunner`]: production runner, spawns a kubectl process
//!   per invocation and captures its combined output
//! - [`scripted::ScriptedRunner`]: canned responses for tests, no processes
//!   spawned, records every invocation it sees
//!
//! Keeping the trait this narrow means the scheduler, the context lister and
//! the aggregation logic can all be tested without a cluster, a kubeconfig,
//! or even a kubectl binary on the machine.

use std::fmt;

pub mod kubectl;
pub mod scripted;

/// Captured error text of one failed invocation.
///
/// Carries whatever the process wrote before failing, not an exit code: the
/// text is what ends up in the result payload for that context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvokeError(pub String);

impl fmt::Display for InvokeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvokeError {}

/// Abstract interface for running the wrapped binary.
///
/// `Send + Sync` because the scheduler shares one runner across all worker
/// threads.
pub trait CommandRunner: Send + Sync {
    /// Run the external program with `args`, returning its combined
    /// stdout+stderr on success, or the captured error text on failure.
    fn invoke(&self, args: &[String]) -> Result<Vec<u8>, InvokeError>;
}
