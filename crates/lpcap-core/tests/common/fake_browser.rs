//! In-memory browser for exercising the capture workflow without Chrome.
//!
//! Tabs are just URLs; page text is looked up by URL from a fixed table.
//! Screenshots are written as a small placeholder file.

use async_trait::async_trait;
use lpcap_core::browser::{BrowserControl, BrowserError, TabInfo};
use std::collections::HashMap;
use std::path::Path;

pub const FAKE_PNG: &[u8] = b"\x89PNG\r\n\x1a\nfake";

#[derive(Debug, Default)]
pub struct FakeBrowser {
    tabs: Vec<String>,
    active: Option<usize>,
    texts: HashMap<String, String>,
    /// Every URL passed to `open_tab` or `navigate`, in order.
    pub visited: Vec<String>,
}

impl FakeBrowser {
    /// Browser with the given tabs open; the last one is active.
    pub fn with_tabs(urls: &[&str]) -> Self {
        Self {
            tabs: urls.iter().map(|u| u.to_string()).collect(),
            active: urls.len().checked_sub(1),
            ..Self::default()
        }
    }

    /// Registers the visible text served for `url`.
    pub fn page(mut self, url: &str, text: &str) -> Self {
        self.texts.insert(url.to_string(), text.to_string());
        self
    }

    pub fn tab_count(&self) -> usize {
        self.tabs.len()
    }

    fn active_url(&self) -> Result<&String, BrowserError> {
        self.active
            .and_then(|i| self.tabs.get(i))
            .ok_or(BrowserError::NoTabs)
    }
}

#[async_trait]
impl BrowserControl for FakeBrowser {
    async fn open_tab(&mut self, url: &str) -> Result<(), BrowserError> {
        self.tabs.push(url.to_string());
        self.active = Some(self.tabs.len() - 1);
        self.visited.push(url.to_string());
        Ok(())
    }

    async fn list_tabs(&mut self) -> Result<Vec<TabInfo>, BrowserError> {
        Ok(self
            .tabs
            .iter()
            .enumerate()
            .map(|(index, url)| TabInfo {
                index,
                url: url.clone(),
                active: self.active == Some(index),
            })
            .collect())
    }

    async fn select_tab(&mut self, index: usize) -> Result<(), BrowserError> {
        if index >= self.tabs.len() {
            return Err(BrowserError::TabOutOfRange {
                index,
                count: self.tabs.len(),
            });
        }
        self.active = Some(index);
        Ok(())
    }

    async fn navigate(&mut self, url: &str) -> Result<(), BrowserError> {
        let index = self.active.ok_or(BrowserError::NoTabs)?;
        self.tabs[index] = url.to_string();
        self.visited.push(url.to_string());
        Ok(())
    }

    async fn current_url(&self) -> Result<String, BrowserError> {
        self.active_url().cloned()
    }

    async fn page_text(&self) -> Result<String, BrowserError> {
        let url = self.active_url()?;
        Ok(self.texts.get(url).cloned().unwrap_or_default())
    }

    async fn screenshot(&self, path: &Path) -> Result<(), BrowserError> {
        self.active_url()?;
        std::fs::write(path, FAKE_PNG).map_err(|source| BrowserError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}
