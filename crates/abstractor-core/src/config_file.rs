use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// On-disk TOML configuration structure.
/// All fields are optional so partial configs work (merge with defaults).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigFile {
    pub paths: Option<PathsConfig>,
    pub remote: Option<RemoteConfig>,
    pub display: Option<DisplayConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PathsConfig {
    pub catalog: Option<PathBuf>,
    pub cache_dir: Option<PathBuf>,
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RemoteConfig {
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub theme: Option<String>,
    pub title: Option<String>,
}

/// Platform config directory path: `<config_dir>/abstractor/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("abstractor").join("config.toml"))
}

/// Load config by cascading CWD `.abstractor.toml` over platform config.
/// CWD values override platform values.
pub fn load_config() -> ConfigFile {
    let platform = config_path().and_then(|p| load_from_path(&p));
    let cwd = load_from_path(Path::new(".abstractor.toml"));

    match (platform, cwd) {
        (None, None) => ConfigFile::default(),
        (Some(p), None) => p,
        (None, Some(c)) => c,
        (Some(p), Some(c)) => merge(p, c),
    }
}

/// Load a config from a specific path. Returns `None` if the file doesn't
/// exist or can't be parsed.
pub fn load_from_path(path: &Path) -> Option<ConfigFile> {
    let content = std::fs::read_to_string(path).ok()?;
    match toml::from_str(&content) {
        Ok(config) => Some(config),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring unparsable config file");
            None
        }
    }
}

/// Merge two configs: `overlay` values take precedence over `base`.
pub fn merge(base: ConfigFile, overlay: ConfigFile) -> ConfigFile {
    let base_paths = base.paths.unwrap_or_default();
    let base_remote = base.remote.unwrap_or_default();
    let base_display = base.display.unwrap_or_default();
    let paths = overlay.paths.unwrap_or_default();
    let remote = overlay.remote.unwrap_or_default();
    let display = overlay.display.unwrap_or_default();

    ConfigFile {
        paths: Some(PathsConfig {
            catalog: paths.catalog.or(base_paths.catalog),
            cache_dir: paths.cache_dir.or(base_paths.cache_dir),
            log_file: paths.log_file.or(base_paths.log_file),
        }),
        remote: Some(RemoteConfig {
            base_url: remote.base_url.or(base_remote.base_url),
            timeout_secs: remote.timeout_secs.or(base_remote.timeout_secs),
        }),
        display: Some(DisplayConfig {
            theme: display.theme.or(base_display.theme),
            title: display.title.or(base_display.title),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_parses() {
        let toml_str = "[paths]\ncache_dir = \"/tmp/abstracts\"\n";
        let parsed: ConfigFile = toml::from_str(toml_str).unwrap();
        assert_eq!(
            parsed.paths.unwrap().cache_dir.unwrap(),
            PathBuf::from("/tmp/abstracts")
        );
        assert!(parsed.remote.is_none());
    }

    #[test]
    fn round_trip_toml() {
        let config = ConfigFile {
            remote: Some(RemoteConfig {
                base_url: Some("http://localhost:9000".to_string()),
                timeout_secs: Some(3),
            }),
            ..Default::default()
        };
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: ConfigFile = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn merge_overlay_wins() {
        let base = ConfigFile {
            display: Some(DisplayConfig {
                theme: Some("hacker".to_string()),
                title: Some("Base".to_string()),
            }),
            ..Default::default()
        };
        let overlay = ConfigFile {
            display: Some(DisplayConfig {
                theme: Some("modern".to_string()),
                title: None,
            }),
            ..Default::default()
        };
        let merged = merge(base, overlay).display.unwrap();
        assert_eq!(merged.theme.as_deref(), Some("modern"));
        assert_eq!(merged.title.as_deref(), Some("Base"));
    }

    #[test]
    fn merge_base_preserved_when_overlay_absent() {
        let base = ConfigFile {
            paths: Some(PathsConfig {
                catalog: Some(PathBuf::from("agenda.json")),
                ..Default::default()
            }),
            ..Default::default()
        };
        let merged = merge(base, ConfigFile::default());
        assert_eq!(
            merged.paths.unwrap().catalog.unwrap(),
            PathBuf::from("agenda.json")
        );
    }

    #[test]
    fn unparsable_file_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[paths\ncatalog = 1").unwrap();
        assert!(load_from_path(&path).is_none());
        assert!(load_from_path(&dir.path().join("absent.toml")).is_none());
    }
}
