//! Declarative render descriptions.
//!
//! The controller decides *what* is on screen; a renderer owned by the
//! host decides *how* it looks. Nothing in here carries behavior.

/// Everything a renderer needs for the current frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptView {
    pub surface: Surface,
    pub toast: Option<Toast>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Surface {
    /// Nothing to draw.
    None,
    /// The two-action call-to-action modal ("install" / "later").
    Modal(InstallModal),
    /// Platform-specific manual install steps.
    Instructions(Instructions),
}

/// Copy for the call-to-action modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallModal {
    pub headline: &'static str,
    pub body: &'static str,
    pub install_label: &'static str,
    pub later_label: &'static str,
    /// Display name of the detected browser, for the renderer's framing.
    pub browser_name: &'static str,
}

/// Lead-in plus ordered manual steps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instructions {
    pub title: String,
    pub lead_in: &'static str,
    pub steps: Vec<&'static str>,
}

/// Post-install success notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub title: &'static str,
    pub body: &'static str,
}

impl Toast {
    pub fn install_succeeded() -> Self {
        Self {
            title: "Installed!",
            body: "The app was added successfully.",
        }
    }
}
