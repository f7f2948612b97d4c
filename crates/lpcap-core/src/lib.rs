pub mod config;
pub mod logging;

pub mod browser;
pub mod capture;
pub mod profile_id;
