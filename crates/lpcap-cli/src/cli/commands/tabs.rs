//! `lpcap tabs` – list open tabs.

use anyhow::Result;
use lpcap_core::capture;
use lpcap_core::config::LpcapConfig;

use super::{attach, print_tabs};

pub async fn run_tabs(cfg: &LpcapConfig) -> Result<()> {
    let mut browser = attach(cfg).await?;
    let tabs = capture::list_tabs(&mut browser).await?;
    print_tabs(&tabs);
    Ok(())
}
