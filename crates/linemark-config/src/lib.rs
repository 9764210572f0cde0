use linemark_engine::{NavigationOptions, SortOrder, StickyOptions, ToggleMode};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

/// User-facing settings, loaded from `~/.config/linemark/config.toml`.
///
/// Every field has a default, so a missing or partial file is fine. The
/// engine itself takes plain option structs; [`Config::sticky_options`] and
/// [`Config::navigation_options`] are the adapters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Keep a bookmark whose line is deleted by relocating it to the
    /// surviving line, instead of dropping it.
    #[serde(default)]
    pub keep_bookmarks_on_line_delete: bool,
    /// The editor trims auto-inserted indentation on newline.
    #[serde(default = "default_true")]
    pub trim_auto_whitespace: bool,
    /// Next/previous bookmark cycles past the ends of the file.
    #[serde(default = "default_true")]
    pub wrap_navigation: bool,
    /// Next/previous bookmark continues into other files when the current
    /// file runs out.
    #[serde(default)]
    pub navigate_through_all_files: bool,
    #[serde(default)]
    pub sort_order: SortOrder,
    /// How a multi-cursor toggle resolves a batch of lines.
    #[serde(default)]
    pub multicursor_toggle: ToggleMode,
    /// Where persisted bookmark state lives. Tilde and environment
    /// variables are expanded on load.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_path: Option<PathBuf>,
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            keep_bookmarks_on_line_delete: false,
            trim_auto_whitespace: true,
            wrap_navigation: true,
            navigate_through_all_files: false,
            sort_order: SortOrder::ByLine,
            multicursor_toggle: ToggleMode::AllLinesAtOnce,
            data_path: None,
        }
    }
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        // Expand shell variables and tilde in the loaded data path
        if let Some(data_path) = &config.data_path {
            config.data_path = Some(Self::expand_path(data_path).unwrap_or_else(|| data_path.clone()));
        }

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/linemark");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    pub fn sticky_options(&self) -> StickyOptions {
        StickyOptions {
            keep_bookmarks_on_line_delete: self.keep_bookmarks_on_line_delete,
            trim_auto_whitespace: self.trim_auto_whitespace,
        }
    }

    pub fn navigation_options(&self) -> NavigationOptions {
        NavigationOptions {
            wrap_navigation: self.wrap_navigation,
            sort_order: self.sort_order,
        }
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}
