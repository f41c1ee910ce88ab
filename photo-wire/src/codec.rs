// SPDX-License-Identifier: MIT
//! Compression codec with format auto-detection on decode
//!
//! Decoding tries every framing the upstream producers are known to emit.
//! Encoding always produces zlib-framed output.

use std::io::{Read, Write};

use flate2::read::{DeflateDecoder, GzDecoder, ZlibDecoder};
use flate2::write::ZlibEncoder;
use flate2::Compression;

use crate::error::CodecError;

/// Byte offset where the raw deflate fallback starts reading
const RAW_DEFLATE_OFFSET: usize = 2;

/// Decoding strategies, tried in declaration order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DecodeStrategy {
    /// zlib header + deflate body + adler32 trailer
    Zlib,
    /// Bare deflate body after skipping a 2-byte header
    RawDeflate,
    /// gzip member
    Gzip,
}

impl DecodeStrategy {
    /// Get all strategies in the order they are attempted
    pub fn all() -> &'static [DecodeStrategy] {
        &[
            DecodeStrategy::Zlib,
            DecodeStrategy::RawDeflate,
            DecodeStrategy::Gzip,
        ]
    }

    /// Get the name of the strategy
    pub fn name(&self) -> &'static str {
        match self {
            DecodeStrategy::Zlib => "zlib",
            DecodeStrategy::RawDeflate => "raw-deflate",
            DecodeStrategy::Gzip => "gzip",
        }
    }

    fn decode(&self, data: &[u8]) -> std::io::Result<Vec<u8>> {
        // zlib typically achieves 2-4x on JSON
        let mut out = Vec::with_capacity(data.len().saturating_mul(3).max(1024));
        match self {
            DecodeStrategy::Zlib => {
                ZlibDecoder::new(data).read_to_end(&mut out)?;
            }
            DecodeStrategy::RawDeflate => {
                let body = data.get(RAW_DEFLATE_OFFSET..).ok_or_else(|| {
                    std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "missing header")
                })?;
                DeflateDecoder::new(body).read_to_end(&mut out)?;
            }
            DecodeStrategy::Gzip => {
                GzDecoder::new(data).read_to_end(&mut out)?;
            }
        }
        Ok(out)
    }
}

impl std::fmt::Display for DecodeStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Decompress a payload, returning the first successful strategy's output
pub fn decompress(data: &[u8]) -> Result<Vec<u8>, CodecError> {
    decompress_with_strategy(data).map(|(out, _)| out)
}

/// Decompress a payload and report which strategy succeeded
pub fn decompress_with_strategy(data: &[u8]) -> Result<(Vec<u8>, DecodeStrategy), CodecError> {
    let mut last_error = String::from("no strategy attempted");

    for strategy in DecodeStrategy::all() {
        match strategy.decode(data) {
            Ok(out) => {
                tracing::trace!(strategy = %strategy, in_len = data.len(), out_len = out.len(), "payload decoded");
                return Ok((out, *strategy));
            }
            Err(e) => {
                tracing::trace!(strategy = %strategy, error = %e, "decode strategy failed");
                last_error = format!("{}: {}", strategy, e);
            }
        }
    }

    Err(CodecError::Decode(last_error))
}

/// Compress a payload as a zlib stream
pub fn compress(data: &[u8]) -> Result<Vec<u8>, CodecError> {
    // JSON scene documents compress to well under half their size
    let estimated_size = (data.len() / 2).max(256);
    let mut encoder = ZlibEncoder::new(Vec::with_capacity(estimated_size), Compression::default());
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}
