pub mod notifier;

pub use notifier::{cleanup_task, CommitNotifier};
