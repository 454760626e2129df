//! Streaming decoder for COBS and COBS/R framed byte streams.
//!
//! [Consistent Overhead Byte Stuffing][cobs] (COBS) encodes arbitrary data so
//! that it never contains a zero byte, freeing `0x00` to act as an
//! unambiguous frame delimiter on the wire. COBS/R is the reduced-overhead
//! variant that reuses the final length code as a data byte when possible.
//!
//! This crate decodes such streams. It has two layers:
//!
//! - [`cobs`]: pure functions that unstuff one complete, already-delimited
//!   buffer ([`cobs::decode_cobs`], [`cobs::decode_cobsr`]).
//! - [`FrameAccumulator`]: a state machine that consumes one timestamped byte
//!   event at a time, splits the stream on `0x00`, optionally discards a
//!   fixed number of prefix bytes after each delimiter, and emits one
//!   [`TimedFrame`] per non-empty frame — the decoded payload or a
//!   [`DecodeError`], bracketed by the capture interval the frame occupied.
//!
//! Decode errors are recoverable: a malformed frame is reported and the very
//! next delimiter starts a fresh decode attempt. Encoding is out of scope.
//!
//! ```
//! use cobs_decoder::{Encoding, FrameAccumulator, TimedByte};
//!
//! let mut acc = FrameAccumulator::new(Encoding::Cobs, 0);
//! let mut frames = vec![];
//! for (i, &value) in [0x03, b'a', b'b', 0x00].iter().enumerate() {
//!     let t = i as u64;
//!     if let Some(frame) = acc.on_byte(TimedByte { value, start: t, end: t + 1 }) {
//!         frames.push(frame);
//!     }
//! }
//! assert_eq!(frames.len(), 1);
//! assert_eq!(frames[0].data.as_deref(), Ok(&b"ab"[..]));
//! ```
//!
//! [cobs]: https://en.wikipedia.org/wiki/Consistent_Overhead_Byte_Stuffing

use std::{error, fmt};

use serde::Serialize;

pub mod cobs;
mod stream;

pub use stream::{FrameAccumulator, TimedByte, TimedFrame, DELIMITER};

/// Why a stuffed buffer failed to decode.
///
/// Both kinds are recoverable; they terminate the interpretation of one
/// frame and never affect the frames that follow it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DecodeError {
    /// A literal zero byte appeared inside the stuffed data, either as a
    /// length code or within a chunk. Zero is reserved for the frame
    /// delimiter and never valid inside a frame.
    ZeroByte,
    /// A length code declared more payload bytes than remain in the buffer.
    /// The COBS/R decoder never produces this; it reinterprets the condition
    /// as the final payload byte.
    Truncated,
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::ZeroByte => f.write_str("zero byte found in input"),
            DecodeError::Truncated => f.write_str("not enough input bytes for length code"),
        }
    }
}

impl error::Error for DecodeError {}

/// Which byte-stuffing variant a stream carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Encoding {
    /// Plain COBS: exactly one overhead byte per 254 payload bytes.
    Cobs,
    /// COBS/R: the final length code may double as the final payload byte,
    /// saving one byte of overhead on average.
    CobsR,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages() {
        assert_eq!(DecodeError::ZeroByte.to_string(), "zero byte found in input");
        assert_eq!(
            DecodeError::Truncated.to_string(),
            "not enough input bytes for length code"
        );
    }
}
