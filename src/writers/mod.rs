//! Writer implementations

pub mod color;
pub mod fan_out;
pub mod sink;
pub mod writer;

pub use color::ColorWriter;
pub use fan_out::FanOutWriter;
pub use sink::Sink;
pub use writer::Writer;

pub use crate::core::LogWriter;
