// unibrowser-sync platform paths for Linux
// Config:  ~/.config/unibrowser-sync
// Chrome:  ~/.config/google-chrome/Default
// Firefox: ~/.mozilla/firefox

use std::env;
use std::path::PathBuf;

fn home_dir() -> PathBuf {
    PathBuf::from(env::var("HOME").unwrap_or_else(|_| String::from("/tmp")))
}

/// Uses `$XDG_CONFIG_HOME` if set, otherwise `~/.config`.
fn xdg_config_home() -> PathBuf {
    match env::var("XDG_CONFIG_HOME") {
        Ok(xdg) if !xdg.is_empty() => PathBuf::from(xdg),
        _ => home_dir().join(".config"),
    }
}

/// Returns the configuration directory for unibrowser-sync on Linux.
pub fn get_config_dir() -> PathBuf {
    xdg_config_home().join("unibrowser-sync")
}

/// Returns the default Chrome profile directory on Linux.
pub fn default_chrome_profile_dir() -> PathBuf {
    xdg_config_home().join("google-chrome").join("Default")
}

/// Returns the directory holding Firefox's `profiles.ini` on Linux.
pub fn firefox_data_dir() -> PathBuf {
    home_dir().join(".mozilla").join("firefox")
}
