// unibrowser-sync services
// Host-independent logic: flattening, payload building, sync execution, timer scheduling, settings.

pub mod auto_sync_scheduler;
pub mod payload_builder;
pub mod settings_store;
pub mod sync_executor;
pub mod tree_flattener;
