//! Frame accumulation over a timestamped byte stream.

use log::{debug, trace};
use serde::Serialize;

use crate::{cobs, DecodeError, Encoding};

/// Reserved frame boundary value. Never valid inside a stuffed frame.
pub const DELIMITER: u8 = 0x00;

/// Largest supported count of prefix bytes discarded after a delimiter.
const MAX_PREFIX_BYTES: usize = 10;

/// One raw byte event from the capture source.
///
/// Timestamps are opaque to the decoder; it only stores and returns them.
/// They must be totally ordered and monotonically non-decreasing across the
/// stream for the emitted intervals to be meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimedByte<T> {
    /// Raw byte value.
    pub value: u8,
    /// When this byte started on the wire.
    pub start: T,
    /// When this byte ended on the wire.
    pub end: T,
}

/// One frame's decode result, tagged with the capture interval it occupied.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimedFrame<T> {
    /// Start of the first byte of the frame.
    pub start: T,
    /// End of the last byte before the delimiter.
    pub end: T,
    /// The unstuffed payload, or why decoding failed.
    pub data: Result<Vec<u8>, DecodeError>,
}

/// Splits a timestamped byte stream on `0x00` delimiters and decodes each
/// frame.
///
/// One accumulator corresponds to exactly one logical byte stream. Bytes are
/// buffered until a delimiter arrives; the buffered frame (minus a fixed
/// number of prefix bytes) is then decoded with the configured [`Encoding`]
/// and emitted as a [`TimedFrame`]. A delimiter with nothing buffered is
/// silently absorbed. Decode failures only terminate the current frame; the
/// next delimiter starts a fresh, independent decode attempt.
///
/// Construction leaves the accumulator in the same state as [`reset`]; reuse
/// across unrelated streams requires an explicit [`reset`] in between.
///
/// [`reset`]: FrameAccumulator::reset
pub struct FrameAccumulator<T> {
    encoding: Encoding,
    prefix_bytes: usize,
    received: Vec<u8>,
    frame_start: Option<T>,
    frame_end: Option<T>,
}

impl<T: Copy> FrameAccumulator<T> {
    /// Creates an accumulator for one stream.
    ///
    /// `prefix_bytes` is the number of bytes discarded immediately after
    /// each delimiter, used to skip a fixed-width frame header external to
    /// the stuffing scheme. Both parameters are fixed for the lifetime of
    /// the accumulator.
    ///
    /// # Panics
    ///
    /// Panics if `prefix_bytes` exceeds 10.
    pub fn new(encoding: Encoding, prefix_bytes: usize) -> Self {
        assert!(
            prefix_bytes <= MAX_PREFIX_BYTES,
            "prefix byte count must be at most {MAX_PREFIX_BYTES}"
        );
        Self {
            encoding,
            prefix_bytes,
            received: Vec::new(),
            frame_start: None,
            frame_end: None,
        }
    }

    /// The byte-stuffing variant this stream carries.
    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// The number of bytes discarded after each delimiter.
    pub fn prefix_bytes(&self) -> usize {
        self.prefix_bytes
    }

    /// Consumes one byte event, in stream order.
    ///
    /// Returns a frame only when `byte` is the delimiter and the bytes
    /// buffered since the previous delimiter decode to something (or fail to
    /// decode); otherwise the byte is buffered and `None` is returned.
    pub fn on_byte(&mut self, byte: TimedByte<T>) -> Option<TimedFrame<T>> {
        let start = *self.frame_start.get_or_insert(byte.start);

        if byte.value != DELIMITER {
            self.received.push(byte.value);
            self.frame_end = Some(byte.end);
            return None;
        }

        // Strip the configured prefix. A frame shorter than the prefix is
        // left alone rather than discarded.
        if self.received.len() >= self.prefix_bytes {
            self.received.drain(..self.prefix_bytes);
        }

        let frame = match (&self.received[..], self.frame_end) {
            ([], _) | (_, None) => None,
            (stuffed, Some(end)) => {
                let data = cobs::decode(stuffed, self.encoding);
                match &data {
                    Ok(payload) => trace!("decoded frame of {} bytes", payload.len()),
                    Err(e) => debug!("frame failed to decode: {e}"),
                }
                Some(TimedFrame { start, end, data })
            }
        };

        // The delimiter's start time primes the next frame; it stands in
        // until that frame's first data byte arrives.
        self.received.clear();
        self.frame_start = Some(byte.start);
        self.frame_end = None;

        frame
    }

    /// Consumes a batch of byte events and collects every emitted frame.
    pub fn on_bytes(&mut self, bytes: impl IntoIterator<Item = TimedByte<T>>) -> Vec<TimedFrame<T>> {
        bytes.into_iter().filter_map(|b| self.on_byte(b)).collect()
    }

    /// Returns the accumulator to its freshly constructed state.
    ///
    /// Required before feeding an unrelated stream into the same instance.
    pub fn reset(&mut self) {
        self.received.clear();
        self.frame_start = None;
        self.frame_end = None;
    }
}
