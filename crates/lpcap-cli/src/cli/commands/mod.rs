//! CLI command handlers, one file per command.

mod capture;
mod completions;
mod id;
mod man;
mod open;
mod tabs;

pub use capture::run_capture;
pub use completions::run_completions;
pub use id::run_id;
pub use man::run_man;
pub use open::run_open;
pub use tabs::run_tabs;

use anyhow::{Context, Result};
use lpcap_core::browser::{CdpBrowser, TabInfo};
use lpcap_core::config::LpcapConfig;

/// Attaches to the browser named in the config.
async fn attach(cfg: &LpcapConfig) -> Result<CdpBrowser> {
    CdpBrowser::connect(cfg).await.with_context(|| {
        format!(
            "attach to browser at {} (start it with --remote-debugging-port)",
            cfg.debugger_address
        )
    })
}

fn print_tabs(tabs: &[TabInfo]) {
    if tabs.is_empty() {
        println!("No tabs open.");
        return;
    }
    println!("Open tabs:");
    for tab in tabs {
        let marker = if tab.active { " [active]" } else { "" };
        println!("Tab {}: {}{}", tab.index, tab.url, marker);
    }
}
