pub mod buildings;
pub mod errors;
pub mod resources;
pub mod tribe;
pub mod units;

pub use errors::{GameError, ScanError};
pub use resources::{ResourceKind, Resources};
