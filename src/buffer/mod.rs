//! Byte sinks and sources the codec reads from and writes to
//!
//! Buffers are owned by the caller for the duration of one encode or
//! decode. The codec only needs append on the write side and sequential
//! reads, plus an optional capacity query, on the read side.

mod sink;
mod source;

pub use sink::Sink;
pub use source::{SliceReader, Source, StreamReader};
