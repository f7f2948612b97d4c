//! CLI for lpcap.

mod commands;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use lpcap_core::config::{self, LpcapConfig};
use std::path::PathBuf;
use std::process::ExitCode;

use commands::{run_capture, run_completions, run_id, run_man, run_open, run_tabs};

/// Top-level CLI for lpcap.
#[derive(Debug, Parser)]
#[command(name = "lpcap")]
#[command(about = "lpcap: capture LinkedIn profiles from a running browser", long_about = None)]
pub struct Cli {
    /// Remote-debugging address of the running browser (overrides config), e.g. localhost:9222.
    #[arg(long, global = true, value_name = "ADDR")]
    pub debugger: Option<String>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// List open tabs of the attached browser.
    Tabs,

    /// Open a URL in a new tab.
    Open {
        /// URL to open.
        url: String,
    },

    /// Print the profile identifier of a LinkedIn URL (no browser needed).
    Id {
        /// Profile or company URL.
        url: String,
    },

    /// Save the visible text and a screenshot of a profile page.
    Capture(CaptureArgs),

    /// Print shell completions.
    Completions {
        /// Target shell.
        shell: Shell,
    },

    /// Print the man page (roff).
    Man,
}

#[derive(Debug, Args)]
pub struct CaptureArgs {
    /// Page to load first; without it the active tab is captured as-is.
    pub url: Option<String>,

    /// Load the URL in a new tab instead of reusing the active one.
    #[arg(long)]
    pub new_tab: bool,

    /// Reuse tab N (as listed by `lpcap tabs`) instead of the active one.
    #[arg(long, value_name = "N", conflicts_with = "new_tab")]
    pub tab: Option<usize>,

    /// Continue to the profile's experience details page before capturing.
    #[arg(long)]
    pub experience: bool,

    /// Output directory (overrides config; default current directory).
    #[arg(long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// File stem for outputs instead of the profile identifier.
    #[arg(long, value_name = "STEM")]
    pub name: Option<String>,

    /// Capture the full scrollable page instead of the viewport.
    #[arg(long)]
    pub full_page: bool,

    /// Do not write the page text file.
    #[arg(long)]
    pub no_text: bool,
}

impl CliCommand {
    pub async fn run_from_args() -> Result<ExitCode> {
        run(Cli::parse()).await
    }
}

/// Runs a parsed command line. Only the commands that attach to the browser
/// read (or create) the config file.
pub async fn run(cli: Cli) -> Result<ExitCode> {
    match cli.command {
        CliCommand::Id { url } => return Ok(run_id(&url)),
        CliCommand::Completions { shell } => run_completions(shell),
        CliCommand::Man => run_man()?,
        CliCommand::Tabs => run_tabs(&browser_config(cli.debugger)?).await?,
        CliCommand::Open { url } => run_open(&browser_config(cli.debugger)?, &url).await?,
        CliCommand::Capture(args) => run_capture(&browser_config(cli.debugger)?, args).await?,
    }

    Ok(ExitCode::SUCCESS)
}

fn browser_config(debugger: Option<String>) -> Result<LpcapConfig> {
    let cfg = with_overrides(config::load_or_init()?, debugger);
    tracing::debug!("loaded config: {:?}", cfg);
    Ok(cfg)
}

/// Applies global flags on top of the config file.
fn with_overrides(mut cfg: LpcapConfig, debugger: Option<String>) -> LpcapConfig {
    if let Some(addr) = debugger {
        cfg.debugger_address = addr;
    }
    cfg
}

#[cfg(test)]
mod tests;
