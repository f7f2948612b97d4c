//! `lpcap id <url>` – print the profile identifier of a URL.

use lpcap_core::profile_id;
use std::process::ExitCode;

/// Prints the identifier; exits with failure when there is none so scripts can branch.
pub fn run_id(url: &str) -> ExitCode {
    match profile_id::extract(url) {
        Some(id) => {
            println!("{id}");
            ExitCode::SUCCESS
        }
        None => {
            eprintln!("No LinkedIn profile identifier in: {url}");
            ExitCode::FAILURE
        }
    }
}
