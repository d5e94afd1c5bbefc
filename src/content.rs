//! Instruction content resolver.
//!
//! Pure `(platform, browser) → copy` lookups. Nothing here branches
//! control flow; the controller only asks for content once it has
//! already decided to show something. Unknown platforms and browsers
//! fall through to a generic branch, never an error.

use crate::model::environment::{Browser, BrowserFamily, Platform};
use crate::view::{InstallModal, Instructions};

const HEADLINE: &str = "Install the app";
const LATER: &str = "Later";

/// Call-to-action copy for the prompt modal.
pub fn modal_copy(platform: Platform, browser: Browser) -> InstallModal {
    let browser_name = browser.name();

    if platform == Platform::Ios {
        return InstallModal {
            headline: HEADLINE,
            body: "For the best experience, add this app to your home screen. \
                   It only takes a few taps from the share sheet.",
            install_label: "Show me how",
            later_label: LATER,
            browser_name,
        };
    }

    let (body, install_label) = match browser.family {
        BrowserFamily::Chrome => (
            "Install the app for quick access and a better experience. \
             You'll be able to open it straight from your home screen.",
            "Install now",
        ),
        BrowserFamily::Edge => (
            "Edge can install this app from its menu so it opens in its own window.",
            "Install the app",
        ),
        BrowserFamily::Opera => (
            "Opera can add this app to your device from its menu.",
            "Install the app",
        ),
        BrowserFamily::Firefox => (
            "Firefox can add this app to your home screen from the menu.",
            "Start installing",
        ),
        BrowserFamily::Safari => (
            "Safari can add this app from the Share menu.",
            "See how to install",
        ),
        BrowserFamily::Unknown => (
            "For the best experience, install this app. \
             We'll show you the steps for your browser.",
            "How to install",
        ),
    };

    InstallModal {
        headline: HEADLINE,
        body,
        install_label,
        later_label: LATER,
        browser_name,
    }
}

/// Ordered manual install steps for when no native flow exists.
pub fn instructions(platform: Platform, browser: Browser) -> Instructions {
    match (platform, browser.family) {
        (Platform::Ios, _) => Instructions {
            title: "Installing on iPhone and iPad".to_string(),
            lead_in: "Safari installs web apps from the share sheet:",
            steps: vec![
                "Tap the Share button in the toolbar",
                "Scroll down the share sheet",
                "Choose \"Add to Home Screen\"",
                "Tap \"Add\"",
            ],
        },
        // Android defaults to the Chrome menu path; Chrome is the
        // platform norm and also what WebView-derived browsers mimic.
        (Platform::Android, BrowserFamily::Firefox) => Instructions {
            title: "Installing with Firefox on Android".to_string(),
            lead_in: "Firefox adds web apps from its menu:",
            steps: vec![
                "Open the menu (three dots)",
                "Choose \"Install\" or \"Add to Home screen\"",
                "Confirm to add the app",
            ],
        },
        (Platform::Android, _) => Instructions {
            title: "Installing on Android".to_string(),
            lead_in: "Chrome installs web apps from its menu:",
            steps: vec![
                "Open the Chrome menu (three dots) in the top right",
                "Choose \"Install app\" or \"Add to Home screen\"",
                "Confirm the install",
            ],
        },
        (_, BrowserFamily::Chrome) => Instructions {
            title: "Installing with Chrome".to_string(),
            lead_in: "Chrome shows an install affordance in the address bar:",
            steps: vec![
                "Click the install icon at the right end of the address bar",
                "Or open the menu (three dots) and choose \"Install app\"",
                "Confirm the install",
            ],
        },
        (_, BrowserFamily::Edge) => Instructions {
            title: "Installing with Microsoft Edge".to_string(),
            lead_in: "Edge installs web apps from its Apps menu:",
            steps: vec![
                "Open the menu (three dots) in the top right",
                "Choose \"Apps\"",
                "Choose \"Install this site as an app\"",
            ],
        },
        (_, BrowserFamily::Opera) => Instructions {
            title: "Installing with Opera".to_string(),
            lead_in: "Opera adds web apps from its menu:",
            steps: vec![
                "Open the Opera menu",
                "Choose \"Install\" or \"Add to home screen\"",
            ],
        },
        (_, BrowserFamily::Firefox) => Instructions {
            title: "Installing with Firefox".to_string(),
            lead_in: "Firefox adds web apps from its menu:",
            steps: vec![
                "Open the menu (three lines) in the top right",
                "Choose \"Install\" or \"Add to Home Screen\"",
            ],
        },
        (_, BrowserFamily::Safari) => Instructions {
            title: "Installing with Safari".to_string(),
            lead_in: "Safari adds web apps from the Share menu:",
            steps: vec![
                "Click \"Share\" in the toolbar",
                "Choose \"Add to Dock\"",
                "Confirm the name and click \"Add\"",
            ],
        },
        (_, BrowserFamily::Unknown) => Instructions {
            title: "Installing the app".to_string(),
            lead_in: "Most browsers can install web apps:",
            steps: vec![
                "Open your browser's menu or settings",
                "Look for \"Install app\" or \"Add to Home Screen\"",
                "Follow the confirmation steps",
            ],
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn browser(family: BrowserFamily) -> Browser {
        Browser {
            family,
            matched_token: None,
        }
    }

    #[test]
    fn android_yields_chrome_menu_steps() {
        let steps = instructions(Platform::Android, browser(BrowserFamily::Chrome));
        assert!(steps.steps.iter().any(|s| s.contains("Chrome menu")));
    }

    #[test]
    fn android_with_unknown_browser_still_gets_chrome_path() {
        let steps = instructions(Platform::Android, browser(BrowserFamily::Unknown));
        assert!(steps.lead_in.contains("Chrome"));
    }

    #[test]
    fn ios_steps_go_through_the_share_sheet() {
        let steps = instructions(Platform::Ios, browser(BrowserFamily::Safari));
        assert_eq!(steps.steps.len(), 4);
        assert!(steps.steps[0].contains("Share"));
        assert!(steps.steps.iter().any(|s| s.contains("Add to Home Screen")));
    }

    #[test]
    fn ios_gets_share_steps_even_with_chrome_tokens() {
        // Chrome on iOS is WebKit underneath; the share sheet is the
        // only install path there.
        let steps = instructions(Platform::Ios, browser(BrowserFamily::Chrome));
        assert!(steps.steps[0].contains("Share"));
    }

    #[test]
    fn unknown_everything_gets_the_generic_branch() {
        let steps = instructions(Platform::Unknown, browser(BrowserFamily::Unknown));
        assert!(!steps.steps.is_empty());
        assert!(steps.steps.iter().any(|s| s.contains("Install app")));
    }

    #[test]
    fn modal_copy_varies_by_browser() {
        let chrome = modal_copy(Platform::Windows, browser(BrowserFamily::Chrome));
        let firefox = modal_copy(Platform::Windows, browser(BrowserFamily::Firefox));
        assert_ne!(chrome.install_label, firefox.install_label);
        assert_eq!(chrome.headline, firefox.headline);
    }

    #[test]
    fn ios_modal_routes_to_instructions_wording() {
        let modal = modal_copy(Platform::Ios, browser(BrowserFamily::Safari));
        assert_eq!(modal.install_label, "Show me how");
    }
}
