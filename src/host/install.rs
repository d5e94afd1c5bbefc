use std::fmt;

use thiserror::Error;

/// Outcome of the native install flow, as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallOutcome {
    Accepted,
    Declined,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InstallError {
    /// No native install affordance exists in this environment.
    #[error("native install flow is not available")]
    Unavailable,
    /// The flow was invoked but its outcome could not be obtained.
    #[error("native install outcome unavailable: {0}")]
    Outcome(String),
}

/// A host-supplied pending native install offer.
///
/// In a browser host this wraps a captured `beforeinstallprompt` event.
/// The handle is valid for exactly one invocation; consuming `self` by
/// value makes reuse unrepresentable.
pub trait DeferredInstall: fmt::Debug + Send {
    fn invoke(self: Box<Self>) -> Result<InstallOutcome, InstallError>;
}
