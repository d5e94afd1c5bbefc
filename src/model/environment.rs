use std::sync::LazyLock;

use regex::Regex;

static IOS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"iPad|iPhone|iPod").expect("valid ios token regex"));

/// Read-only host signals sampled once at startup.
///
/// In a browser host these come from the user-agent string, the
/// `(display-mode: standalone)` media query, `navigator.standalone`,
/// and the document referrer.
#[derive(Debug, Clone, Default)]
pub struct EnvironmentSignals {
    pub user_agent: String,
    pub display_mode_standalone: bool,
    pub navigator_standalone: bool,
    pub referrer: String,
}

impl EnvironmentSignals {
    /// Signals for an ordinary browser tab with the given user agent.
    pub fn browser_tab(user_agent: impl Into<String>) -> Self {
        Self {
            user_agent: user_agent.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Platform {
    Ios,
    Android,
    Windows,
    Mac,
    Linux,
    #[default]
    Unknown,
}

impl Platform {
    pub fn display_name(&self) -> &'static str {
        match self {
            Platform::Ios => "iOS",
            Platform::Android => "Android",
            Platform::Windows => "Windows",
            Platform::Mac => "macOS",
            Platform::Linux => "Linux",
            Platform::Unknown => "Unknown",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BrowserFamily {
    Chrome,
    Edge,
    Opera,
    Firefox,
    Safari,
    #[default]
    Unknown,
}

impl BrowserFamily {
    pub fn name(&self) -> &'static str {
        match self {
            BrowserFamily::Chrome => "Chrome",
            BrowserFamily::Edge => "Microsoft Edge",
            BrowserFamily::Opera => "Opera",
            BrowserFamily::Firefox => "Firefox",
            BrowserFamily::Safari => "Safari",
            BrowserFamily::Unknown => "your browser",
        }
    }
}

/// Classified browser plus the token that identified it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Browser {
    pub family: BrowserFamily,
    pub matched_token: Option<&'static str>,
}

impl Browser {
    pub fn name(&self) -> &'static str {
        self.family.name()
    }
}

/// Environment classification, derived once and immutable afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnvironmentInfo {
    pub is_standalone: bool,
    pub platform: Platform,
    pub browser: Browser,
}

impl EnvironmentInfo {
    /// Classify the host environment. Pure: no storage, no network,
    /// same signals always produce the same info.
    pub fn detect(signals: &EnvironmentSignals) -> Self {
        let is_standalone = signals.display_mode_standalone
            || signals.navigator_standalone
            || signals.referrer.starts_with("android-app://");

        Self {
            is_standalone,
            platform: detect_platform(&signals.user_agent),
            browser: detect_browser(&signals.user_agent),
        }
    }
}

/// iOS first: iOS user agents also carry `Mac OS X` and `Safari`
/// substrings, so the order here is load-bearing. Android before Linux
/// for the same reason.
fn detect_platform(user_agent: &str) -> Platform {
    if IOS_RE.is_match(user_agent) {
        Platform::Ios
    } else if user_agent.contains("Android") {
        Platform::Android
    } else if user_agent.contains("Windows") {
        Platform::Windows
    } else if user_agent.contains("Macintosh") || user_agent.contains("Mac OS X") {
        Platform::Mac
    } else if user_agent.contains("Linux") {
        Platform::Linux
    } else {
        Platform::Unknown
    }
}

/// Vendor tokens with exclusions: Edge and Opera ship the Chrome token,
/// and every Chromium browser ships the Safari token, so the stricter
/// matches come first.
fn detect_browser(user_agent: &str) -> Browser {
    let has = |token: &str| user_agent.contains(token);

    let (family, matched_token) = if has("Edg") {
        (BrowserFamily::Edge, Some("Edg"))
    } else if has("OPR") {
        (BrowserFamily::Opera, Some("OPR"))
    } else if has("Opera") {
        (BrowserFamily::Opera, Some("Opera"))
    } else if has("Firefox") {
        (BrowserFamily::Firefox, Some("Firefox"))
    } else if has("Chrome") {
        (BrowserFamily::Chrome, Some("Chrome"))
    } else if has("Safari") {
        (BrowserFamily::Safari, Some("Safari"))
    } else {
        (BrowserFamily::Unknown, None)
    };

    Browser {
        family,
        matched_token,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const IPHONE_SAFARI: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) \
         AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.0 Mobile/15E148 Safari/604.1";
    const ANDROID_CHROME: &str = "Mozilla/5.0 (Linux; Android 14; Pixel 8) \
         AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Mobile Safari/537.36";
    const WINDOWS_EDGE: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
         AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36 Edg/120.0.0.0";
    const MAC_SAFARI: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
         AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.0 Safari/605.1.15";
    const LINUX_FIREFOX: &str =
        "Mozilla/5.0 (X11; Linux x86_64; rv:121.0) Gecko/20100101 Firefox/121.0";

    #[test]
    fn ios_wins_over_overlapping_tokens() {
        // iPhone UA contains "Mac OS X" and "Safari"; iOS must still win.
        let info = EnvironmentInfo::detect(&EnvironmentSignals::browser_tab(IPHONE_SAFARI));
        assert_eq!(info.platform, Platform::Ios);
        assert_eq!(info.browser.family, BrowserFamily::Safari);
    }

    #[test]
    fn ipad_token_resolves_ios() {
        let ua = "Mozilla/5.0 (iPad; CPU OS 16_6 like Mac OS X) AppleWebKit/605.1.15 Safari/604.1";
        let info = EnvironmentInfo::detect(&EnvironmentSignals::browser_tab(ua));
        assert_eq!(info.platform, Platform::Ios);
    }

    #[test]
    fn android_wins_over_linux_token() {
        let info = EnvironmentInfo::detect(&EnvironmentSignals::browser_tab(ANDROID_CHROME));
        assert_eq!(info.platform, Platform::Android);
        assert_eq!(info.browser.family, BrowserFamily::Chrome);
    }

    #[test]
    fn edge_is_not_chrome_or_safari() {
        let info = EnvironmentInfo::detect(&EnvironmentSignals::browser_tab(WINDOWS_EDGE));
        assert_eq!(info.platform, Platform::Windows);
        assert_eq!(info.browser.family, BrowserFamily::Edge);
    }

    #[test]
    fn chrome_is_not_safari() {
        let ua = "Mozilla/5.0 (Windows NT 10.0) AppleWebKit/537.36 Chrome/120.0.0.0 Safari/537.36";
        let info = EnvironmentInfo::detect(&EnvironmentSignals::browser_tab(ua));
        assert_eq!(info.browser.family, BrowserFamily::Chrome);
        assert_eq!(info.browser.matched_token, Some("Chrome"));
    }

    #[test]
    fn plain_safari_on_mac() {
        let info = EnvironmentInfo::detect(&EnvironmentSignals::browser_tab(MAC_SAFARI));
        assert_eq!(info.platform, Platform::Mac);
        assert_eq!(info.browser.family, BrowserFamily::Safari);
    }

    #[test]
    fn firefox_on_linux() {
        let info = EnvironmentInfo::detect(&EnvironmentSignals::browser_tab(LINUX_FIREFOX));
        assert_eq!(info.platform, Platform::Linux);
        assert_eq!(info.browser.family, BrowserFamily::Firefox);
    }

    #[test]
    fn empty_signals_resolve_unknown() {
        let info = EnvironmentInfo::detect(&EnvironmentSignals::default());
        assert_eq!(info.platform, Platform::Unknown);
        assert_eq!(info.browser.family, BrowserFamily::Unknown);
        assert!(!info.is_standalone);
    }

    #[test]
    fn standalone_from_each_signal() {
        let mut signals = EnvironmentSignals::browser_tab(ANDROID_CHROME);
        assert!(!EnvironmentInfo::detect(&signals).is_standalone);

        signals.display_mode_standalone = true;
        assert!(EnvironmentInfo::detect(&signals).is_standalone);

        signals.display_mode_standalone = false;
        signals.navigator_standalone = true;
        assert!(EnvironmentInfo::detect(&signals).is_standalone);

        signals.navigator_standalone = false;
        signals.referrer = "android-app://com.example.app".to_string();
        assert!(EnvironmentInfo::detect(&signals).is_standalone);
    }

    #[test]
    fn detection_is_idempotent() {
        let signals = EnvironmentSignals::browser_tab(IPHONE_SAFARI);
        let first = EnvironmentInfo::detect(&signals);
        let second = EnvironmentInfo::detect(&signals);
        assert_eq!(first, second);
    }
}
