pub mod committer;
pub mod service;

pub use committer::Committer;
pub use service::{OrderingHandle, OrderingService, OrderingStats};
