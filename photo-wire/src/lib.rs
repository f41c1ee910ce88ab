// SPDX-License-Identifier: MIT
//! # Photo Wire
//!
//! Wire-level plumbing for room photo packets: the compression codec and the
//! length-prefixed envelope that carries the compressed scene document inside
//! an otherwise opaque packet buffer.
//!
//! ## Envelope Layout
//!
//! ```text
//! Room Photo Envelope
//! ===================
//!
//! [opaque prefix]              (payload_offset bytes, preserved verbatim)
//! Length: i32 big-endian       (4 bytes)
//! Payload: compressed JSON     (length bytes)
//! [opaque suffix]              (remaining bytes, preserved verbatim)
//! ```
//!
//! ## Codec
//!
//! Producers upstream are inconsistent about framing, so decoding tries, in
//! order:
//!
//! 1. zlib-framed inflate
//! 2. raw deflate starting at byte offset 2
//! 3. gzip
//!
//! Encoding always produces zlib-framed output.
//!
//! ## Usage
//!
//! ```rust
//! use photo_wire::{compress, decompress, Envelope};
//!
//! let compressed = compress(br#"{"planes":[]}"#).unwrap();
//! let packet = photo_wire::frame(&compressed).unwrap();
//!
//! let envelope = Envelope::parse(&packet, 0).unwrap();
//! let text = decompress(envelope.payload()).unwrap();
//! assert_eq!(text, br#"{"planes":[]}"#);
//! ```

pub mod codec;
pub mod envelope;
pub mod error;

pub use codec::{compress, decompress, decompress_with_strategy, DecodeStrategy};
pub use envelope::{frame, read_short_string, write_short_string, Envelope, LENGTH_PREFIX_SIZE};
pub use error::{CodecError, FramingError};
