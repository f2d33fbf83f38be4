pub mod holding;
pub use holding::*;

pub mod holding_set;
pub use holding_set::*;

pub mod change;
pub use change::*;

pub mod managers;
pub use managers::*;
