pub mod api;
pub use api::*;

pub mod io_error;
pub use io_error::*;

pub mod run_error;
pub use run_error::*;
