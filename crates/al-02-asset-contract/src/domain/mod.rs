pub mod contract;
pub mod entities;
pub mod functions;

pub use contract::*;
pub use entities::*;
pub use functions::*;
