use anyhow::Result;
use serde::Deserialize;
use std::fs;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
pub struct PromptConfig {
    pub prompt: PromptSection,
    pub toast: ToastSection,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PromptSection {
    /// Delay between startup and showing the call-to-action when no
    /// native install signal arrives first.
    pub show_delay_ms: u64,
    /// Minimum wait after a dismissal before the prompt may show again.
    pub cooldown_hours: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ToastSection {
    pub duration_ms: u64,
}

impl PromptConfig {
    /// Load configuration with layering: defaults → user config.
    pub fn load() -> Result<Self> {
        let mut config = Self::defaults()?;

        if let Some(proj_dirs) = directories::ProjectDirs::from("", "", "install-nudge") {
            let config_path = proj_dirs.config_dir().join("config.toml");
            if config_path.exists() {
                let user_str = fs::read_to_string(&config_path)?;
                config = toml::from_str(&user_str)?;
            }
        }

        Ok(config)
    }

    /// Built-in defaults only, no user layering.
    pub fn defaults() -> Result<Self> {
        let defaults = include_str!("../../config/default.toml");
        Ok(toml::from_str(defaults)?)
    }

    pub fn show_delay(&self) -> Duration {
        Duration::from_millis(self.prompt.show_delay_ms)
    }

    pub fn cooldown(&self) -> Duration {
        Duration::from_secs(self.prompt.cooldown_hours * 60 * 60)
    }

    pub fn toast_duration(&self) -> Duration {
        Duration::from_millis(self.toast.duration_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_defaults_parse() {
        let config = PromptConfig::defaults().expect("default.toml parses");
        assert_eq!(config.prompt.cooldown_hours, 24);
        assert_eq!(config.show_delay(), Duration::from_millis(3000));
        assert_eq!(config.cooldown(), Duration::from_secs(24 * 60 * 60));
    }

    #[test]
    fn user_toml_overrides_wholesale() {
        let toml_str = r#"
            [prompt]
            show_delay_ms = 0
            cooldown_hours = 1

            [toast]
            duration_ms = 500
        "#;
        let config: PromptConfig = toml::from_str(toml_str).expect("user toml parses");
        assert_eq!(config.cooldown(), Duration::from_secs(60 * 60));
        assert_eq!(config.toast_duration(), Duration::from_millis(500));
    }
}
