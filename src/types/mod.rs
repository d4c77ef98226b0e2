// unibrowser-sync shared type definitions
// Each submodule defines plain data used across services, platform and router.

pub mod bookmark;
pub mod config;
pub mod errors;
pub mod message;
pub mod settings;
pub mod sync;
