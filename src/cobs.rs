//! Unstuffing of complete COBS / COBS/R buffers.

use crate::{DecodeError, Encoding};

/// Decode one complete stuffed buffer.
///
/// `input` must hold a full frame's encoded bytes with the `0x00` delimiter
/// already removed; decoding partial frames is not possible. An empty input
/// decodes to an empty payload.
///
/// The two variants share the same length-prefixed chunk-copy loop and
/// differ only in how the final chunk may end: a length code that claims
/// more bytes than remain is an error under [`Encoding::Cobs`], while under
/// [`Encoding::CobsR`] the length code itself is the last payload byte.
pub fn decode(input: &[u8], encoding: Encoding) -> Result<Vec<u8>, DecodeError> {
    let mut out = Vec::with_capacity(input.len());
    let mut idx = 0;

    if input.is_empty() {
        return Ok(out);
    }

    loop {
        let length = usize::from(input[idx]);
        if length == 0 {
            return Err(DecodeError::ZeroByte);
        }
        idx += 1;
        let end = idx + length - 1;

        // A final chunk that overruns the buffer still contributes the bytes
        // it does have before the boundary is judged.
        let chunk = &input[idx..end.min(input.len())];
        if chunk.contains(&0) {
            return Err(DecodeError::ZeroByte);
        }
        out.extend_from_slice(chunk);
        idx = end;

        if idx > input.len() {
            return match encoding {
                Encoding::Cobs => Err(DecodeError::Truncated),
                Encoding::CobsR => {
                    out.push(length as u8);
                    Ok(out)
                }
            };
        }
        if idx == input.len() {
            return Ok(out);
        }
        // More chunks follow. A 0xff code means the chunk was cut at maximum
        // length and no zero is implied after it.
        if length < 0xff {
            out.push(0);
        }
    }
}

/// Decode a buffer stuffed with plain COBS.
pub fn decode_cobs(input: &[u8]) -> Result<Vec<u8>, DecodeError> {
    decode(input, Encoding::Cobs)
}

/// Decode a buffer stuffed with COBS/R.
pub fn decode_cobsr(input: &[u8]) -> Result<Vec<u8>, DecodeError> {
    decode(input, Encoding::CobsR)
}
