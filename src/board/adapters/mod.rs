//! Adapter implementations of the board ports.

pub mod memory;
mod tracing_notifier;

pub use tracing_notifier::TracingNotifier;
