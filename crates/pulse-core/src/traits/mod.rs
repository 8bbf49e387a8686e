//! Seams between the collection engine, its backends, and report output.

mod sink;
mod transport;

pub use sink::ReportSink;
pub use transport::Transport;
