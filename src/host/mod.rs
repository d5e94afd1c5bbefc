pub mod install;
pub mod store;

pub use install::{DeferredInstall, InstallError, InstallOutcome};
pub use store::{CooldownStore, FileCooldownStore, MemoryCooldownStore};
