/// Visibility phases of the install call-to-action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Nothing on screen. Terminal when the app runs standalone.
    #[default]
    Hidden,
    /// Policy passed; waiting out the presentation delay.
    Pending,
    /// Call-to-action modal is up.
    Shown,
    /// User declined; cooldown recorded, re-check scheduled.
    Dismissed,
    /// User accepted; native flow running or manual instructions up.
    InstallAttempted,
}

impl Phase {
    pub fn label(&self) -> &'static str {
        match self {
            Phase::Hidden => "HIDDEN",
            Phase::Pending => "PENDING",
            Phase::Shown => "SHOWN",
            Phase::Dismissed => "DISMISSED",
            Phase::InstallAttempted => "INSTALLING",
        }
    }
}
