pub mod entities;
pub mod errors;
pub mod validation;

pub use entities::*;
pub use errors::*;
pub use validation::*;
