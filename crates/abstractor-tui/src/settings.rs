use std::path::PathBuf;
use std::time::Duration;

use abstractor_core::config_file::ConfigFile;
use abstractor_core::source::meeting_api::DEFAULT_BASE_URL;

use crate::Args;

pub const DEFAULT_CATALOG: &str = "jmm2026-parsed-agenda.json";
pub const DEFAULT_THEME: &str = "hacker";
pub const DEFAULT_TITLE: &str = "JMM Abstract Search";

/// Fully resolved runtime settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub catalog_path: PathBuf,
    pub cache_dir: PathBuf,
    pub base_url: String,
    /// Request timeout; `None` leaves the HTTP client's default in place.
    pub timeout: Option<Duration>,
    pub theme: String,
    pub title: String,
    pub log_file: Option<PathBuf>,
}

impl Settings {
    /// Resolve every setting from CLI flags > env vars > config file > defaults.
    pub fn resolve(args: &Args, file: &ConfigFile, env: impl Fn(&str) -> Option<String>) -> Self {
        let paths = file.paths.clone().unwrap_or_default();
        let remote = file.remote.clone().unwrap_or_default();
        let display = file.display.clone().unwrap_or_default();

        let catalog_path = args
            .catalog
            .clone()
            .or_else(|| env("ABSTRACTOR_CATALOG").map(PathBuf::from))
            .or(paths.catalog)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CATALOG));

        let cache_dir = args
            .cache_dir
            .clone()
            .or_else(|| env("ABSTRACTOR_CACHE_DIR").map(PathBuf::from))
            .or(paths.cache_dir)
            .unwrap_or_else(default_cache_dir);

        let base_url = args
            .base_url
            .clone()
            .or_else(|| env("ABSTRACTOR_BASE_URL"))
            .or(remote.base_url)
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let timeout = args
            .timeout_secs
            .or_else(|| env("ABSTRACTOR_TIMEOUT").and_then(|v| v.trim().parse().ok()))
            .or(remote.timeout_secs)
            .map(Duration::from_secs);

        let theme = args
            .theme
            .clone()
            .or(display.theme)
            .unwrap_or_else(|| DEFAULT_THEME.to_string());

        let title = args
            .title
            .clone()
            .or(display.title)
            .unwrap_or_else(|| DEFAULT_TITLE.to_string());

        let log_file = args.log_file.clone().or(paths.log_file).or_else(default_log_file);

        Self {
            catalog_path,
            cache_dir,
            base_url,
            timeout,
            theme,
            title,
            log_file,
        }
    }
}

fn default_cache_dir() -> PathBuf {
    dirs::cache_dir()
        .map(|d| d.join("abstractor").join("abstracts"))
        .unwrap_or_else(|| PathBuf::from("abstract_cache"))
}

fn default_log_file() -> Option<PathBuf> {
    dirs::cache_dir().map(|d| d.join("abstractor").join("abstractor.log"))
}
