use crate::host::install::{DeferredInstall, InstallError, InstallOutcome};

/// All possible messages that drive state transitions.
#[derive(Debug)]
pub enum Msg {
    // -- Host events
    /// The host captured a native "install available" offer.
    InstallAvailable(Box<dyn DeferredInstall>),
    /// The host finished invoking a native install handle.
    NativeOutcome(Result<InstallOutcome, InstallError>),

    // -- User actions
    /// "Install" on the call-to-action modal.
    Accept,
    /// "Later" on the call-to-action modal.
    Dismiss,
    /// Close the manual-instructions overlay.
    CloseInstructions,

    // -- System
    /// Periodic timer pulse; drives deadline checks.
    Tick,
}
