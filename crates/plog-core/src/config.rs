//! Configuration types for plog.
//!
//! [`Config::load`] reads `~/.config/plog/config.toml`, creating it with
//! hardcoded defaults if it does not yet exist. [`Config::defaults`] returns
//! the same defaults without touching the filesystem (useful in tests).

use serde::Deserialize;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[scan]
window_secs = 15
log_dir     = "."
log_files   = [
    "beacon.log",
    "beacon.log.1",
    "beacon.log.2",
    "beacon.log.3",
    "beacon.log.4",
    "beacon.log.5",
    "beacon.log.6",
    "beacon.log.7",
    "beacon.log.8",
    "beacon.log.9",
    "beacon.log.10",
]

[lines]
window_secs = 13
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level configuration, loaded from `~/.config/plog/config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub scan: ScanConfig,
    #[serde(default)]
    pub lines: LinesConfig,
}

/// `[scan]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct ScanConfig {
    /// Seconds either side of the target timestamp.
    #[serde(default = "default_scan_window_secs")]
    pub window_secs: u32,
    /// Directory that relative `log_files` entries are resolved against.
    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,
    /// Rotated log files, scanned in this order.
    #[serde(default = "default_log_files")]
    pub log_files: Vec<PathBuf>,
}

fn default_scan_window_secs() -> u32 { 15 }
fn default_log_dir() -> PathBuf { PathBuf::from(".") }
fn default_log_files() -> Vec<PathBuf> {
    std::iter::once(PathBuf::from("beacon.log"))
        .chain((1..=10).map(|i| PathBuf::from(format!("beacon.log.{i}"))))
        .collect()
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            window_secs: default_scan_window_secs(),
            log_dir: default_log_dir(),
            log_files: default_log_files(),
        }
    }
}

impl ScanConfig {
    /// `log_files` with `log_dir` applied to the relative entries.
    pub fn log_paths(&self) -> Vec<PathBuf> {
        self.log_files.iter().map(|f| self.log_dir.join(f)).collect()
    }
}

/// `[lines]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct LinesConfig {
    /// Seconds after the target timestamp to dump.
    #[serde(default = "default_lines_window_secs")]
    pub window_secs: u32,
}

fn default_lines_window_secs() -> u32 { 13 }

impl Default for LinesConfig {
    fn default() -> Self {
        Self {
            window_secs: default_lines_window_secs(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load from `~/.config/plog/config.toml`, layered on top of the built-in
    /// defaults. Creates the file with defaults if it does not exist.
    pub fn load() -> anyhow::Result<Self> {
        let path = config_path();

        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, DEFAULT_CONFIG.trim_start())?;
        }

        Self::layered(&path, false)
    }

    /// Load a specific file layered on top of the built-in defaults. The file
    /// must exist.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        Self::layered(path, true)
    }

    fn layered(path: &Path, required: bool) -> anyhow::Result<Self> {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(
                config::File::from(path)
                    .format(config::FileFormat::Toml)
                    .required(required),
            )
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("plog")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_load() {
        let cfg = Config::defaults();
        assert_eq!(cfg.scan.window_secs, 15);
        assert_eq!(cfg.lines.window_secs, 13);
        assert_eq!(cfg.scan.log_files.len(), 11);
        assert_eq!(cfg.scan.log_files[0], PathBuf::from("beacon.log"));
        assert_eq!(cfg.scan.log_files[10], PathBuf::from("beacon.log.10"));
    }

    #[test]
    fn serde_defaults_match_embedded_toml() {
        let cfg = Config::defaults();
        let fallback = ScanConfig::default();
        assert_eq!(cfg.scan.log_files, fallback.log_files);
        assert_eq!(cfg.scan.log_dir, fallback.log_dir);
    }

    #[test]
    fn file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[scan]\nwindow_secs = 30\nlog_dir = \"/var/log/lighthouse\"\nlog_files = [\"beacon.log\"]\n",
        )
        .unwrap();

        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg.scan.window_secs, 30);
        assert_eq!(cfg.lines.window_secs, 13);
        assert_eq!(
            cfg.scan.log_paths()[0],
            PathBuf::from("/var/log/lighthouse/beacon.log")
        );
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Config::load_from(&dir.path().join("absent.toml")).is_err());
    }

    #[test]
    fn implicit_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = Config::layered(&dir.path().join("absent.toml"), false).unwrap();
        assert_eq!(cfg.scan.window_secs, 15);
        assert_eq!(cfg.scan.log_files.len(), 11);
    }
}
