pub mod snapshot_manager;
pub use snapshot_manager::*;
