// unibrowser-sync platform layer
// The host capability trait, the native host built from a browser profile on disk,
// and platform-specific paths for Windows, macOS, and Linux.
//
// Uses `cfg(target_os)` for conditional compilation to select the correct
// platform-specific path implementation at compile time.

use std::path::PathBuf;

pub mod alarms;
pub mod chromium;
#[cfg(feature = "firefox")]
pub mod firefox;
pub mod host;
pub mod http;
pub mod native;

#[cfg(target_os = "linux")]
mod linux;

#[cfg(target_os = "macos")]
mod macos;

#[cfg(target_os = "windows")]
mod windows;

/// Returns the platform-specific configuration directory for unibrowser-sync.
///
/// - **Linux**: `~/.config/unibrowser-sync` (or `$XDG_CONFIG_HOME/unibrowser-sync`)
/// - **macOS**: `~/Library/Application Support/unibrowser-sync`
/// - **Windows**: `%APPDATA%/unibrowser-sync`
pub fn get_config_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        linux::get_config_dir()
    }
    #[cfg(target_os = "macos")]
    {
        macos::get_config_dir()
    }
    #[cfg(target_os = "windows")]
    {
        windows::get_config_dir()
    }
}

/// Returns the directory of Chrome's default profile, which holds `Bookmarks`.
pub fn default_chrome_profile_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        linux::default_chrome_profile_dir()
    }
    #[cfg(target_os = "macos")]
    {
        macos::default_chrome_profile_dir()
    }
    #[cfg(target_os = "windows")]
    {
        windows::default_chrome_profile_dir()
    }
}

/// Returns the directory holding Firefox's `profiles.ini`.
pub fn firefox_data_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        linux::firefox_data_dir()
    }
    #[cfg(target_os = "macos")]
    {
        macos::firefox_data_dir()
    }
    #[cfg(target_os = "windows")]
    {
        windows::firefox_data_dir()
    }
}
