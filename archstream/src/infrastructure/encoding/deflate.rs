// /////////////////////////////////////////////////////////////////////////////
// archstream
// Copyright (c) 2025 A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Incremental raw-DEFLATE wrapper over [`flate2::Compress`], sized for the
//! encoder's one-chunk-in, zero-or-more-chunks-out streaming shape. Plain
//! one-shot helpers (`flate2::write::DeflateEncoder` over a `Vec`) assume the
//! whole payload is available at once; this core never buffers a whole
//! entry, so compression has to be driven chunk-by-chunk instead.

use archstream_domain::StreamError;
use flate2::{Compress, Compression, FlushCompress, Status};

const OUTPUT_BUFFER_SIZE: usize = 32 * 1024;
/// Bound on `compress()` calls per `finish()` invocation. `Finish` always
/// reaches `StreamEnd` within a handful of calls for any real zlib build;
/// this only guards against a misbehaving or future incompatible backend.
const MAX_FINISH_ITERATIONS: usize = 1024;

pub fn new_compressor() -> Compress {
    Compress::new(Compression::default(), false)
}

/// Feeds `input` through the compressor with [`FlushCompress::None`],
/// returning whatever bytes the compressor chose to emit now. Zlib may
/// buffer internally and emit nothing for a given chunk; that is not an
/// error, just backpressure the caller passes through.
pub fn compress_chunk(compressor: &mut Compress, input: &[u8]) -> Result<Vec<u8>, StreamError> {
    let mut output = Vec::new();
    let mut buf = [0u8; OUTPUT_BUFFER_SIZE];
    let mut offset = 0usize;

    loop {
        let before_in = compressor.total_in();
        let before_out = compressor.total_out();
        let status = compressor
            .compress(&input[offset..], &mut buf, FlushCompress::None)
            .map_err(|e| StreamError::encoding_overflow(format!("deflate compress failed: {e}")))?;
        let consumed = (compressor.total_in() - before_in) as usize;
        let produced = (compressor.total_out() - before_out) as usize;
        offset += consumed;
        output.extend_from_slice(&buf[..produced]);

        if matches!(status, Status::StreamEnd) {
            break;
        }
        if offset >= input.len() && produced == 0 {
            break;
        }
    }
    Ok(output)
}

/// Drains the compressor with [`FlushCompress::Finish`] until it reports
/// [`Status::StreamEnd`], emitting the final deflate block (required even
/// for a zero-byte entry).
pub fn finish(compressor: &mut Compress) -> Result<Vec<u8>, StreamError> {
    let mut output = Vec::new();
    let mut buf = [0u8; OUTPUT_BUFFER_SIZE];

    for _ in 0..MAX_FINISH_ITERATIONS {
        let before_out = compressor.total_out();
        let status = compressor
            .compress(&[], &mut buf, FlushCompress::Finish)
            .map_err(|e| StreamError::encoding_overflow(format!("deflate finish failed: {e}")))?;
        let produced = (compressor.total_out() - before_out) as usize;
        output.extend_from_slice(&buf[..produced]);
        if matches!(status, Status::StreamEnd) {
            return Ok(output);
        }
    }
    Err(StreamError::encoding_overflow(
        "deflate stream did not terminate within the expected number of finish passes",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::read::DeflateDecoder;
    use std::io::Read;

    #[test]
    fn round_trips_through_chunked_compression() {
        let mut compressor = new_compressor();
        let mut compressed = Vec::new();
        compressed.extend(compress_chunk(&mut compressor, b"hello, ").unwrap());
        compressed.extend(compress_chunk(&mut compressor, b"world!").unwrap());
        compressed.extend(finish(&mut compressor).unwrap());

        let mut decoder = DeflateDecoder::new(&compressed[..]);
        let mut out = String::new();
        decoder.read_to_string(&mut out).unwrap();
        assert_eq!(out, "hello, world!");
    }

    #[test]
    fn empty_input_still_produces_a_terminated_stream() {
        let mut compressor = new_compressor();
        let compressed = finish(&mut compressor).unwrap();

        let mut decoder = DeflateDecoder::new(&compressed[..]);
        let mut out = Vec::new();
        decoder.read_to_end(&mut out).unwrap();
        assert!(out.is_empty());
    }
}
