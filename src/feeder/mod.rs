mod bufreader;
mod push;
mod slice;
mod transcoding;

pub use bufreader::BufReaderJsonFeeder;
pub use push::{PushError, PushJsonFeeder};
pub use slice::SliceJsonFeeder;
pub use transcoding::TranscodingFeeder;

use thiserror::Error;

use crate::unicode::TranscodeError;

#[derive(Error, Debug)]
pub enum FillError {
    #[error("{0}")]
    Io(#[from] std::io::Error),
}

/// A feeder can be used to provide more input data to the
/// [`JsonParser`](crate::JsonParser).
pub trait JsonFeeder {
    /// Determine if the feeder has input data that can be parsed
    fn has_input(&self) -> bool;

    /// Check if the end of the JSON text has been reached
    fn is_done(&self) -> bool;

    /// Decode and return the next character to be parsed
    fn next_input(&mut self) -> Option<u8>;

    /// Consume and return a pending transcoding error, if this feeder
    /// normalizes a non-UTF-8 source encoding and one of its code units
    /// turned out to be malformed (see [`TranscodingFeeder`]). Feeders that
    /// hand out raw bytes directly never fail this way and keep the default.
    fn take_error(&mut self) -> Option<TranscodeError> {
        None
    }
}
