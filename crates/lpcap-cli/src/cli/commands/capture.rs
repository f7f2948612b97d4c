//! `lpcap capture [url]` – save page text and a screenshot.

use anyhow::Result;
use lpcap_core::capture::{self, CaptureRequest};
use lpcap_core::config::LpcapConfig;

use super::attach;
use crate::cli::CaptureArgs;

/// Builds the capture request from config, then lets flags override it.
fn build_request(cfg: &LpcapConfig, args: CaptureArgs) -> CaptureRequest {
    let mut req = CaptureRequest::from_config(cfg, args.url);
    req.new_tab = args.new_tab;
    req.experience = args.experience;
    req.name = args.name;
    if let Some(dir) = args.out_dir {
        req.output_dir = dir;
    }
    if args.no_text {
        req.save_text = false;
    }
    req
}

pub async fn run_capture(cfg: &LpcapConfig, args: CaptureArgs) -> Result<()> {
    let mut browser = attach(cfg).await?;
    if args.full_page {
        browser.set_full_page(true);
    }
    if let Some(index) = args.tab {
        capture::reuse_tab(&mut browser, index).await?;
    }

    let req = build_request(cfg, args);
    let report = capture::capture_profile(&mut browser, &req).await?;

    match &report.identifier {
        Some(id) => println!("Profile: {id}"),
        None => println!("Profile: (none)"),
    }
    println!("Page: {}", report.page_url);
    if let Some(path) = &report.text_path {
        println!("Text: {} ({} bytes)", path.display(), report.text_len);
    }
    println!("Screenshot: {}", report.screenshot_path.display());
    Ok(())
}
