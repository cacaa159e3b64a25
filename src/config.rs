use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use serde::Deserialize;

static CONFIG: OnceLock<Config> = OnceLock::new();

#[derive(Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub plugin_paths: PluginPaths,
    pub editor: EditorConfig,
}

#[derive(Default, Deserialize)]
#[serde(default)]
pub struct PluginPaths {
    pub lv2: Vec<PathBuf>,
}

#[derive(Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Grid column count; must be a multiple of the processor count.
    pub columns: usize,
    pub reload_button: bool,
    pub gui_button: bool,
    /// Audio channels of the host; mono plugins get one processor per channel.
    pub host_channels: usize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            columns: 6,
            reload_button: false,
            gui_button: false,
            host_channels: 2,
        }
    }
}

/// `$XDG_CONFIG_HOME/lv2view/config.toml` (or the platform equivalent).
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("lv2view").join("config.toml"))
}

/// Read a config file. A missing file yields the defaults.
pub fn load(path: &Path) -> anyhow::Result<Config> {
    if !path.exists() {
        log::debug!("No config at {}, using defaults", path.display());
        return Ok(Config::default());
    }
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content)
        .map_err(|e| anyhow::anyhow!("Invalid config {}: {e}", path.display()))
}

pub fn init(config: Config) {
    CONFIG.set(config).ok();
}

pub fn get() -> &'static Config {
    CONFIG.get_or_init(Config::default)
}

pub fn editor() -> &'static EditorConfig {
    &get().editor
}

pub fn extra_lv2_paths() -> &'static [PathBuf] {
    get().plugin_paths.lv2.as_slice()
}
