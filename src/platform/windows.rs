// unibrowser-sync platform paths for Windows
// Config:  %APPDATA%/unibrowser-sync
// Chrome:  %LOCALAPPDATA%/Google/Chrome/User Data/Default
// Firefox: %APPDATA%/Mozilla/Firefox

use std::env;
use std::path::PathBuf;

fn appdata() -> PathBuf {
    PathBuf::from(
        env::var("APPDATA").unwrap_or_else(|_| String::from("C:\\Users\\Default\\AppData\\Roaming")),
    )
}

fn local_appdata() -> PathBuf {
    PathBuf::from(
        env::var("LOCALAPPDATA").unwrap_or_else(|_| String::from("C:\\Users\\Default\\AppData\\Local")),
    )
}

/// Returns the configuration directory for unibrowser-sync on Windows.
/// `%APPDATA%/unibrowser-sync`
pub fn get_config_dir() -> PathBuf {
    appdata().join("unibrowser-sync")
}

pub fn default_chrome_profile_dir() -> PathBuf {
    local_appdata()
        .join("Google")
        .join("Chrome")
        .join("User Data")
        .join("Default")
}

pub fn firefox_data_dir() -> PathBuf {
    appdata().join("Mozilla").join("Firefox")
}
