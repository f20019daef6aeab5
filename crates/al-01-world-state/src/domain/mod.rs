pub mod errors;
pub mod simulator;
pub mod snapshot;

pub use errors::*;
pub use simulator::*;
pub use snapshot::*;
