//! Browser control seam.
//!
//! The capture workflow only talks to [`BrowserControl`]; the real
//! implementation attaches to a running browser over the remote-debugging
//! protocol (see [`cdp::CdpBrowser`]).

pub mod cdp;

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

pub use cdp::CdpBrowser;

/// One open page target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabInfo {
    pub index: usize,
    pub url: String,
    /// True for the tab that navigation, text and screenshots act on.
    pub active: bool,
}

#[derive(Debug, Error)]
pub enum BrowserError {
    #[error("could not attach to browser at {endpoint}: {source}")]
    Connect {
        endpoint: String,
        #[source]
        source: chromiumoxide::error::CdpError,
    },
    #[error("timed out after {after:?} waiting for {what}")]
    Timeout { what: &'static str, after: Duration },
    #[error("no tabs open")]
    NoTabs,
    #[error("tab index {index} out of range (0..{count})")]
    TabOutOfRange { index: usize, count: usize },
    #[error("browser command failed: {0}")]
    Protocol(#[from] chromiumoxide::error::CdpError),
    #[error("unexpected result from page: {0}")]
    UnexpectedResult(String),
    #[error("write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Operations the capture workflow needs from a browser session.
///
/// All page operations act on the active tab. Opening or selecting a tab
/// makes it active.
#[async_trait]
pub trait BrowserControl: Send + Sync {
    /// Opens `url` in a new tab and makes it active.
    async fn open_tab(&mut self, url: &str) -> Result<(), BrowserError>;

    /// All page targets, in the order the browser reports them.
    async fn list_tabs(&mut self) -> Result<Vec<TabInfo>, BrowserError>;

    /// Makes an existing tab active (reuse instead of opening a new one).
    async fn select_tab(&mut self, index: usize) -> Result<(), BrowserError>;

    /// Navigates the active tab and waits for the load to finish.
    async fn navigate(&mut self, url: &str) -> Result<(), BrowserError>;

    async fn current_url(&self) -> Result<String, BrowserError>;

    /// Visible text of the active tab.
    async fn page_text(&self) -> Result<String, BrowserError>;

    /// Writes a PNG screenshot of the active tab to `path`.
    async fn screenshot(&self, path: &Path) -> Result<(), BrowserError>;
}
