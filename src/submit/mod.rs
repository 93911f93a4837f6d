//! Submit collaborators that receive finished forms

mod sink;
mod traits;

pub use sink::{JsonFileSink, LogSink};
pub use traits::{SubmitReceipt, SubmitSink};

#[cfg(test)]
pub use traits::MockSubmitSink;
