//! unibrowser-sync: mirrors a browser profile's bookmarks to a remote collector.
//!
//! This library crate exposes all modules for use by the binary and integration tests.

pub mod app;
pub mod event_loop;
pub mod event_router;
pub mod platform;
pub mod services;
pub mod types;
