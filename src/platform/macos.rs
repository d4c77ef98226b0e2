// unibrowser-sync platform paths for macOS
// Config:  ~/Library/Application Support/unibrowser-sync
// Chrome:  ~/Library/Application Support/Google/Chrome/Default
// Firefox: ~/Library/Application Support/Firefox

use std::env;
use std::path::PathBuf;

/// Returns `~/Library/Application Support`.
fn application_support() -> PathBuf {
    PathBuf::from(env::var("HOME").unwrap_or_else(|_| String::from("/tmp")))
        .join("Library")
        .join("Application Support")
}

pub fn get_config_dir() -> PathBuf {
    application_support().join("unibrowser-sync")
}

pub fn default_chrome_profile_dir() -> PathBuf {
    application_support()
        .join("Google")
        .join("Chrome")
        .join("Default")
}

pub fn firefox_data_dir() -> PathBuf {
    application_support().join("Firefox")
}
