//! `lpcap open <url>` – open a URL in a new tab.

use anyhow::Result;
use lpcap_core::capture;
use lpcap_core::config::LpcapConfig;

use super::{attach, print_tabs};

pub async fn run_open(cfg: &LpcapConfig, url: &str) -> Result<()> {
    let mut browser = attach(cfg).await?;
    capture::open_new_tab(&mut browser, url, cfg.settle_delay()).await?;
    println!("Opened new tab with URL: {url}");
    let tabs = capture::list_tabs(&mut browser).await?;
    print_tabs(&tabs);
    Ok(())
}
