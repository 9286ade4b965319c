//! Logging infrastructure for structured console and file output.

mod logger;
mod subscriber;
mod types;
mod utils;

pub use logger::Logger;
pub use subscriber::init_subscriber;
pub use types::Log;

#[cfg(test)]
pub(crate) use types::test_support::{Entry, RecordingLog};
