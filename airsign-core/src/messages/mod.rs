//! Pending message storage

pub mod queue;

pub use queue::{MessageQueue, QUEUE_CAPACITY};
