//! Capture workflow: navigate, resolve the profile identifier, save text and screenshot.
//!
//! A missing identifier is an ordinary outcome here. Each step decides
//! explicitly what to do without one (skip the experience page, use the
//! caller's `--name`, or stop with an explanation).

use anyhow::{bail, Context, Result};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};

use crate::browser::{BrowserControl, BrowserError, TabInfo};
use crate::config::LpcapConfig;
use crate::profile_id::{self, file_stem};

/// What to capture and where to put it.
#[derive(Debug, Clone)]
pub struct CaptureRequest {
    /// Page to load first; `None` captures whatever the active tab shows.
    pub url: Option<String>,
    /// Load `url` in a new tab instead of reusing the active one.
    pub new_tab: bool,
    /// Follow up on the profile's experience details page.
    pub experience: bool,
    /// File stem override; otherwise the profile identifier is used.
    pub name: Option<String>,
    pub output_dir: PathBuf,
    pub save_text: bool,
    /// Pause after each navigation before reading the page.
    pub settle_delay: Duration,
}

impl CaptureRequest {
    /// Request with settings taken from the loaded config.
    pub fn from_config(cfg: &LpcapConfig, url: Option<String>) -> Self {
        Self {
            url,
            new_tab: false,
            experience: false,
            name: None,
            output_dir: cfg.output_dir.clone().unwrap_or_else(|| PathBuf::from(".")),
            save_text: cfg.save_text,
            settle_delay: cfg.settle_delay(),
        }
    }
}

/// Outcome of a successful capture.
#[derive(Debug, Clone)]
pub struct CaptureReport {
    pub identifier: Option<String>,
    /// URL of the page that was captured (after any follow-up navigation).
    pub page_url: String,
    pub screenshot_path: PathBuf,
    pub text_path: Option<PathBuf>,
    pub text_len: usize,
}

/// Opens `url` in a new tab and waits `settle_delay` for it to render.
pub async fn open_new_tab<B>(browser: &mut B, url: &str, settle_delay: Duration) -> Result<()>
where
    B: BrowserControl + ?Sized,
{
    browser
        .open_tab(url)
        .await
        .with_context(|| format!("open tab {url}"))?;
    info!("opened new tab with URL: {}", url);
    settle(settle_delay).await;
    Ok(())
}

pub async fn list_tabs<B>(browser: &mut B) -> Result<Vec<TabInfo>>
where
    B: BrowserControl + ?Sized,
{
    let tabs = browser.list_tabs().await.context("list tabs")?;
    info!("browser has {} open tabs", tabs.len());
    Ok(tabs)
}

/// Makes tab `index` active so later steps reuse it.
pub async fn reuse_tab<B>(browser: &mut B, index: usize) -> Result<()>
where
    B: BrowserControl + ?Sized,
{
    browser
        .select_tab(index)
        .await
        .with_context(|| format!("select tab {index}"))
}

/// Profile identifier of the active tab's URL, if it is a LinkedIn profile.
pub async fn resolve_identifier<B>(browser: &B) -> Result<Option<String>>
where
    B: BrowserControl + ?Sized,
{
    let url = browser.current_url().await.context("read current URL")?;
    let identifier = profile_id::extract(&url);
    match &identifier {
        Some(id) => info!("profile identifier {:?} from {}", id, url),
        None => info!("no profile identifier in {}", url),
    }
    Ok(identifier)
}

/// Runs a full capture as described by `req`.
pub async fn capture_profile<B>(browser: &mut B, req: &CaptureRequest) -> Result<CaptureReport>
where
    B: BrowserControl + ?Sized,
{
    if let Some(url) = &req.url {
        if req.new_tab {
            browser
                .open_tab(url)
                .await
                .with_context(|| format!("open tab {url}"))?;
        } else {
            load_in_active_tab(browser, url).await?;
        }
        settle(req.settle_delay).await;
    }

    let identifier = resolve_identifier(&*browser).await?;
    let stem = capture_stem(req.name.as_deref(), identifier.as_deref())?;

    if req.experience {
        match &identifier {
            Some(id) => {
                let url = profile_id::experience_url(id);
                browser
                    .navigate(&url)
                    .await
                    .with_context(|| format!("navigate to {url}"))?;
                settle(req.settle_delay).await;
            }
            None => warn!("no profile identifier; skipping experience page"),
        }
    }
    let page_url = browser.current_url().await.context("read current URL")?;

    tokio::fs::create_dir_all(&req.output_dir)
        .await
        .with_context(|| format!("create output dir {}", req.output_dir.display()))?;

    let text = browser.page_text().await.context("read page text")?;
    let text_path = if req.save_text {
        let path = req.output_dir.join(format!("{stem}.txt"));
        tokio::fs::write(&path, &text)
            .await
            .with_context(|| format!("write {}", path.display()))?;
        Some(path)
    } else {
        None
    };

    let screenshot_path = req.output_dir.join(format!("{stem}.png"));
    browser
        .screenshot(&screenshot_path)
        .await
        .context("take screenshot")?;
    info!(
        "captured {} ({} text bytes) to {}",
        page_url,
        text.len(),
        screenshot_path.display()
    );

    Ok(CaptureReport {
        identifier,
        page_url,
        screenshot_path,
        text_path,
        text_len: text.len(),
    })
}

/// Navigates the active tab, or opens a tab when the browser has none.
async fn load_in_active_tab<B>(browser: &mut B, url: &str) -> Result<()>
where
    B: BrowserControl + ?Sized,
{
    match browser.navigate(url).await {
        Err(BrowserError::NoTabs) => {
            info!("no open tab to reuse; opening {} in a new tab", url);
            browser
                .open_tab(url)
                .await
                .with_context(|| format!("open tab {url}"))
        }
        other => other.with_context(|| format!("navigate to {url}")),
    }
}

/// File stem for capture outputs: explicit name first, then the identifier.
pub fn capture_stem(name: Option<&str>, identifier: Option<&str>) -> Result<String> {
    let source = match (name, identifier) {
        (Some(name), _) => name,
        (None, Some(id)) => id,
        (None, None) => bail!(
            "the page is not a LinkedIn profile or company URL; pass --name to capture it anyway"
        ),
    };
    file_stem(source).with_context(|| format!("cannot derive a file name from {source:?}"))
}

async fn settle(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}
