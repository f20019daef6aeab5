pub mod args;
pub mod config;
pub mod error;
pub mod methods;

pub use args::*;
pub use config::*;
pub use error::*;
pub use methods::*;
