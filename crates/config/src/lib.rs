pub mod schema;
pub mod watcher;

pub use schema::{BoardConfig, ChannelConfig, ChartKind, GlobalConfig, SourceKind};
pub use watcher::ConfigWatcher;

use board_core::{BoardError, Result};
use std::path::{Path, PathBuf};

/// Load configuration from a TOML file.  Returns `BoardConfig::default()` if
/// the file doesn't exist so the dashboard always has a temperature and a
/// light chart to draw.
pub fn load(path: impl AsRef<Path>) -> Result<BoardConfig> {
    let path = path.as_ref();
    if !path.exists() {
        tracing::warn!(
            "Config file not found at '{}'; using defaults.",
            path.display()
        );
        return Ok(BoardConfig::default());
    }

    let raw = std::fs::read_to_string(path)
        .map_err(|e| BoardError::Config(format!("cannot read '{}': {e}", path.display())))?;

    let config: BoardConfig =
        toml::from_str(&raw).map_err(|e| BoardError::Config(format!("TOML parse error: {e}")))?;
    config.validate()?;
    Ok(config)
}

/// Return the default config path, honouring `$XDG_CONFIG_HOME`.
pub fn default_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("sensorboard").join("sensorboard.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("sensorboard-{}-{name}", std::process::id()))
    }

    #[test]
    fn missing_file_yields_defaults() {
        let cfg = load(scratch("does-not-exist.toml")).unwrap();
        assert_eq!(cfg.channels.len(), 2);
        assert_eq!(cfg.global.capacity, 7);
    }

    #[test]
    fn load_rejects_invalid_config() {
        let path = scratch("zero.toml");
        std::fs::write(&path, "[global]\ncapacity = 0\n").unwrap();
        let result = load(&path);
        let _ = std::fs::remove_file(&path);
        assert!(matches!(result, Err(BoardError::Config(_))));
    }

    #[test]
    fn load_rejects_malformed_toml() {
        let path = scratch("broken.toml");
        std::fs::write(&path, "[[channels]\nname = ").unwrap();
        let result = load(&path);
        let _ = std::fs::remove_file(&path);
        assert!(result.is_err());
    }
}
