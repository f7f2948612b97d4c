use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Global configuration loaded from `~/.config/lpcap/config.toml`.
///
/// Every key is optional in the file; missing keys take the defaults below.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LpcapConfig {
    /// Remote-debugging address of the running browser (`host:port` or a full URL).
    pub debugger_address: String,
    /// Where screenshots and page text are written (None = current directory).
    pub output_dir: Option<PathBuf>,
    /// Seconds to wait when attaching to the browser.
    pub connect_timeout_secs: u64,
    /// Seconds to wait for a tab to open or a navigation to finish.
    pub page_load_timeout_secs: u64,
    /// Extra pause after opening or navigating, for late-rendered content.
    pub settle_delay_ms: u64,
    /// Capture the full scrollable page instead of the viewport.
    pub full_page_screenshot: bool,
    /// Write the page's visible text next to the screenshot.
    pub save_text: bool,
}

impl Default for LpcapConfig {
    fn default() -> Self {
        Self {
            debugger_address: "localhost:9222".to_string(),
            output_dir: None,
            connect_timeout_secs: 10,
            page_load_timeout_secs: 30,
            settle_delay_ms: 2000,
            full_page_screenshot: false,
            save_text: true,
        }
    }
}

impl LpcapConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn page_load_timeout(&self) -> Duration {
        Duration::from_secs(self.page_load_timeout_secs)
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("lpcap")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<LpcapConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = LpcapConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: LpcapConfig = toml::from_str(&data)?;
    Ok(cfg)
}
