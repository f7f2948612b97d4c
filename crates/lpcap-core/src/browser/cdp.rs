//! Remote-debugging (CDP) session attached to an already-running browser.
//!
//! The browser must have been started with `--remote-debugging-port`. We only
//! attach; dropping the session detaches and leaves the browser running.
//!
//! Tab order always comes from `Target.getTargets`, which lists targets in the
//! browser's own order. chromiumoxide's `Browser::pages()` is not used for
//! ordering because it iterates an unordered map.

use async_trait::async_trait;
use chromiumoxide::cdp::browser_protocol::page::CaptureScreenshotFormat;
use chromiumoxide::cdp::browser_protocol::target::TargetInfo;
use chromiumoxide::handler::Handler;
use chromiumoxide::page::ScreenshotParams;
use chromiumoxide::{Browser, Page};
use futures_util::StreamExt;
use std::future::Future;
use std::path::Path;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use super::{BrowserControl, BrowserError, TabInfo};
use crate::config::LpcapConfig;

/// Time given to the handler to learn about existing targets after attach.
const TARGET_DISCOVERY_DELAY: Duration = Duration::from_millis(100);

/// `TargetInfo::type` of a regular tab.
const PAGE_TARGET: &str = "page";

const PAGE_TEXT_JS: &str = "document.body ? document.body.innerText : ''";

pub struct CdpBrowser {
    browser: Browser,
    _handler_task: JoinHandle<()>,
    active: Option<Page>,
    page_load_timeout: Duration,
    full_page: bool,
}

impl CdpBrowser {
    /// Attaches to the browser listening at `cfg.debugger_address`.
    ///
    /// Existing tabs are discovered and the last one in the browser's target
    /// order becomes the active tab.
    pub async fn connect(cfg: &LpcapConfig) -> Result<Self, BrowserError> {
        let endpoint = debugger_endpoint(&cfg.debugger_address);
        info!("attaching to browser at {}", endpoint);

        let (browser, handler) = with_timeout(
            "browser connection",
            cfg.connect_timeout(),
            Browser::connect(endpoint.clone()),
        )
        .await?
        .map_err(|source| BrowserError::Connect {
            endpoint: endpoint.clone(),
            source,
        })?;

        let handler_task = tokio::spawn(handler_loop(handler));

        let mut session = Self {
            browser,
            _handler_task: handler_task,
            active: None,
            page_load_timeout: cfg.page_load_timeout(),
            full_page: cfg.full_page_screenshot,
        };

        let targets = session.browser.fetch_targets().await?;
        debug!("browser reported {} targets", targets.len());
        tokio::time::sleep(TARGET_DISCOVERY_DELAY).await;

        let tabs = session.page_targets().await?;
        info!("attached to {} with {} open tabs", endpoint, tabs.len());
        if let Some(last) = tabs.last() {
            session.active = Some(session.browser.get_page(last.target_id.clone()).await?);
        }
        Ok(session)
    }

    /// Capture the full scrollable page instead of the viewport.
    pub fn set_full_page(&mut self, full_page: bool) {
        self.full_page = full_page;
    }

    fn active_page(&self) -> Result<&Page, BrowserError> {
        self.active.as_ref().ok_or(BrowserError::NoTabs)
    }

    /// Page targets in the browser's order, freshly fetched.
    async fn page_targets(&mut self) -> Result<Vec<TargetInfo>, BrowserError> {
        let targets = self.browser.fetch_targets().await?;
        let positions = page_positions(targets.iter().map(|t| t.r#type.as_str()));
        Ok(positions.into_iter().map(|i| targets[i].clone()).collect())
    }
}

#[async_trait]
impl BrowserControl for CdpBrowser {
    async fn open_tab(&mut self, url: &str) -> Result<(), BrowserError> {
        let timeout = self.page_load_timeout;
        let page = with_timeout("new tab", timeout, self.browser.new_page(url))
            .await??;
        page.bring_to_front().await?;
        debug!("opened tab {:?} at {}", page.target_id(), url);
        self.active = Some(page);
        Ok(())
    }

    async fn list_tabs(&mut self) -> Result<Vec<TabInfo>, BrowserError> {
        let targets = self.page_targets().await?;
        let active_id = self.active.as_ref().map(|p| p.target_id().clone());
        Ok(targets
            .into_iter()
            .enumerate()
            .map(|(index, target)| TabInfo {
                index,
                active: active_id.as_ref() == Some(&target.target_id),
                url: target.url,
            })
            .collect())
    }

    async fn select_tab(&mut self, index: usize) -> Result<(), BrowserError> {
        let targets = self.page_targets().await?;
        let count = targets.len();
        let target = targets
            .into_iter()
            .nth(index)
            .ok_or(BrowserError::TabOutOfRange { index, count })?;
        let page = self.browser.get_page(target.target_id).await?;
        page.bring_to_front().await?;
        self.active = Some(page);
        Ok(())
    }

    async fn navigate(&mut self, url: &str) -> Result<(), BrowserError> {
        let page = self.active_page()?;
        with_timeout("page load", self.page_load_timeout, page.goto(url))
            .await??;
        debug!("navigated active tab to {}", url);
        Ok(())
    }

    async fn current_url(&self) -> Result<String, BrowserError> {
        Ok(self.active_page()?.url().await?.unwrap_or_default())
    }

    async fn page_text(&self) -> Result<String, BrowserError> {
        self.active_page()?
            .evaluate(PAGE_TEXT_JS)
            .await?
            .into_value::<String>()
            .map_err(|e| BrowserError::UnexpectedResult(e.to_string()))
    }

    async fn screenshot(&self, path: &Path) -> Result<(), BrowserError> {
        let params = ScreenshotParams::builder()
            .format(CaptureScreenshotFormat::Png)
            .full_page(self.full_page)
            .build();
        let png = self.active_page()?.screenshot(params).await?;
        tokio::fs::write(path, &png)
            .await
            .map_err(|source| BrowserError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        debug!("wrote {} byte screenshot to {}", png.len(), path.display());
        Ok(())
    }
}

/// Positions of page targets among all targets, keeping the input order.
///
/// Service workers, iframes and other non-tab targets are skipped, so the
/// result indexes tabs the way `lpcap tabs` numbers them.
fn page_positions<'a>(kinds: impl IntoIterator<Item = &'a str>) -> Vec<usize> {
    kinds
        .into_iter()
        .enumerate()
        .filter(|(_, kind)| *kind == PAGE_TARGET)
        .map(|(i, _)| i)
        .collect()
}

/// Drives CDP events; the session stops working if this loop is not polled.
async fn handler_loop(mut handler: Handler) {
    while let Some(event) = handler.next().await {
        if let Err(err) = event {
            debug!("cdp handler: {}", err);
        }
    }
    debug!("cdp handler loop ended");
}

async fn with_timeout<T>(
    what: &'static str,
    after: Duration,
    fut: impl Future<Output = T>,
) -> Result<T, BrowserError> {
    tokio::time::timeout(after, fut)
        .await
        .map_err(|_| BrowserError::Timeout { what, after })
}

/// Turns a configured debugger address into an endpoint chromiumoxide accepts.
///
/// `localhost:9222` becomes `http://localhost:9222` (resolved through
/// `/json/version`); explicit `http(s)://` and `ws(s)://` URLs pass through.
pub fn debugger_endpoint(address: &str) -> String {
    let address = address.trim();
    let has_scheme = ["http://", "https://", "ws://", "wss://"]
        .iter()
        .any(|scheme| address.starts_with(scheme));
    if has_scheme {
        address.to_string()
    } else {
        format!("http://{address}")
    }
}
