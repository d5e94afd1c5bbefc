//! Install-prompt controller for installable web apps.
//!
//! Detects the host environment (already-installed check, platform,
//! browser), runs a show/cooldown visibility policy, and either consumes
//! a host-supplied native install handle or resolves platform-specific
//! manual instructions. The controller only *decides*; it emits a
//! declarative [`view::PromptView`] that any renderer can draw.
//!
//! Hosts wire three seams: environment signals sampled at startup
//! ([`EnvironmentSignals`]), a durable home for the single dismissal
//! timestamp ([`CooldownStore`]), and an optional single-use native
//! install handle ([`DeferredInstall`]). Everything else is messages
//! into [`Controller::update`] and commands drained back out.

pub mod content;
pub mod controller;
pub mod host;
pub mod model;
pub mod msg;
pub mod view;

pub use controller::{Command, Controller};
pub use host::install::{DeferredInstall, InstallError, InstallOutcome};
pub use host::store::{CooldownStore, FileCooldownStore, MemoryCooldownStore, StoreError};
pub use model::config::PromptConfig;
pub use model::environment::{
    Browser, BrowserFamily, EnvironmentInfo, EnvironmentSignals, Platform,
};
pub use model::phase::Phase;
pub use msg::Msg;
pub use view::{InstallModal, Instructions, PromptView, Surface, Toast};
