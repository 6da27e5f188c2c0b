use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

/// Optional defaults read from a TOML file. Every field can be overridden on
/// the command line or through the environment.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct Config {
    #[serde(default)]
    pub(crate) channel_id: Option<String>,
    #[serde(default)]
    pub(crate) reply_broadcast: Option<bool>,
    #[serde(default)]
    pub(crate) state_file: Option<PathBuf>,
    #[serde(default)]
    pub(crate) chart_pattern: Option<String>,
    #[serde(default)]
    pub(crate) api_base: Option<String>,
    #[serde(default)]
    pub(crate) poll_retries: Option<u32>,
    #[serde(default)]
    pub(crate) poll_delay_ms: Option<u64>,
    #[serde(default)]
    pub(crate) quiet: bool,
    #[serde(default)]
    pub(crate) debug: bool,
}

impl Config {
    pub(crate) fn load() -> Self {
        Self::load_internal(false)
    }

    pub(crate) fn load_quiet() -> Self {
        Self::load_internal(true)
    }

    fn load_internal(quiet: bool) -> Self {
        for path in Self::get_config_paths() {
            if path.exists()
                && let Ok(content) = fs::read_to_string(&path)
            {
                match toml::from_str::<Config>(&content) {
                    Ok(config) => {
                        if !quiet {
                            eprintln!("Loaded config from {}", path.display());
                        }
                        return config;
                    }
                    Err(e) => {
                        if !quiet {
                            eprintln!("Warning: Failed to parse {}: {}", path.display(), e);
                        }
                    }
                }
            }
        }

        Self::default()
    }

    fn get_config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // 1. XDG config: ~/.config/mood-notify/config.toml
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".config").join("mood-notify").join("config.toml"));
        }

        // 2. Platform config dir (e.g. ~/Library/Application Support on macOS)
        if let Some(config_dir) = dirs::config_dir() {
            let platform_path = config_dir.join("mood-notify").join("config.toml");
            if !paths.contains(&platform_path) {
                paths.push(platform_path);
            }
        }

        // 3. Home directory: ~/.mood-notify.toml
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".mood-notify.toml"));
        }

        paths
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_paths_are_not_empty() {
        let paths = Config::get_config_paths();
        assert!(!paths.is_empty());
        assert!(paths.iter().all(|p| p.to_string_lossy().contains("mood-notify")));
    }

    #[test]
    fn parse_full_config() {
        let config: Config = toml::from_str(
            r#"
            channel_id = "C123"
            reply_broadcast = false
            state_file = "state/latest.json"
            chart_pattern = "*.png"
            api_base = "http://localhost:9000/api"
            poll_retries = 3
            poll_delay_ms = 100
            quiet = true
            "#,
        )
        .unwrap();
        assert_eq!(config.channel_id.as_deref(), Some("C123"));
        assert_eq!(config.reply_broadcast, Some(false));
        assert_eq!(config.state_file, Some(PathBuf::from("state/latest.json")));
        assert_eq!(config.chart_pattern.as_deref(), Some("*.png"));
        assert_eq!(config.poll_retries, Some(3));
        assert_eq!(config.poll_delay_ms, Some(100));
        assert!(config.quiet);
        assert!(!config.debug);
    }

    #[test]
    fn empty_config_is_default() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.channel_id.is_none());
        assert!(config.reply_broadcast.is_none());
        assert!(!config.quiet);
    }
}
