// SPDX-License-Identifier: MIT
//! Length-prefixed envelope carried inside a packet buffer
//!
//! The compressed document sits at a fixed offset behind a big-endian `i32`
//! length. Bytes before the prefix and after the payload belong to the host
//! and are preserved verbatim when the payload is replaced.

use bytes::{Buf, BufMut};

use crate::error::FramingError;

/// Size of the big-endian length prefix in bytes
pub const LENGTH_PREFIX_SIZE: usize = 4;

/// Size of the big-endian length prefix of a short string
const SHORT_STRING_PREFIX_SIZE: usize = 2;

/// Borrowed view of a packet split around its length-prefixed payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Envelope<'a> {
    prefix: &'a [u8],
    payload: &'a [u8],
    suffix: &'a [u8],
}

impl<'a> Envelope<'a> {
    /// Split `packet` at `offset` and validate the declared payload length
    pub fn parse(packet: &'a [u8], offset: usize) -> Result<Self, FramingError> {
        let needed = offset.saturating_add(LENGTH_PREFIX_SIZE);
        if packet.len() < needed {
            return Err(FramingError::TooShort {
                needed,
                actual: packet.len(),
            });
        }

        let (prefix, mut rest) = packet.split_at(offset);
        let declared = rest.get_i32();
        if declared < 0 {
            return Err(FramingError::NegativeLength(declared));
        }

        let declared = declared as usize;
        if declared > rest.len() {
            return Err(FramingError::Truncated {
                declared,
                available: rest.len(),
            });
        }

        let (payload, suffix) = rest.split_at(declared);
        Ok(Self {
            prefix,
            payload,
            suffix,
        })
    }

    /// Compressed payload bytes (without the length prefix)
    pub fn payload(&self) -> &'a [u8] {
        self.payload
    }

    /// Host bytes before the length prefix
    pub fn prefix(&self) -> &'a [u8] {
        self.prefix
    }

    /// Host bytes after the payload
    pub fn suffix(&self) -> &'a [u8] {
        self.suffix
    }

    /// Rebuild the full packet around a replacement payload
    pub fn rebuild(&self, payload: &[u8]) -> Result<Vec<u8>, FramingError> {
        let length = i32::try_from(payload.len())
            .map_err(|_| FramingError::PayloadTooLarge(payload.len()))?;

        let mut buffer = Vec::with_capacity(
            self.prefix.len() + LENGTH_PREFIX_SIZE + payload.len() + self.suffix.len(),
        );
        buffer.put_slice(self.prefix);
        buffer.put_i32(length);
        buffer.put_slice(payload);
        buffer.put_slice(self.suffix);
        Ok(buffer)
    }
}

/// Frame a payload behind its length prefix with no surrounding host bytes
pub fn frame(payload: &[u8]) -> Result<Vec<u8>, FramingError> {
    Envelope {
        prefix: &[],
        payload: &[],
        suffix: &[],
    }
    .rebuild(payload)
}

/// Read a `u16`-length-prefixed UTF-8 string from the start of `data`
pub fn read_short_string(data: &[u8]) -> Result<String, FramingError> {
    if data.len() < SHORT_STRING_PREFIX_SIZE {
        return Err(FramingError::TooShort {
            needed: SHORT_STRING_PREFIX_SIZE,
            actual: data.len(),
        });
    }

    let mut rest = data;
    let declared = rest.get_u16() as usize;
    if declared > rest.len() {
        return Err(FramingError::Truncated {
            declared,
            available: rest.len(),
        });
    }

    Ok(String::from_utf8(rest[..declared].to_vec())?)
}

/// Write a `u16`-length-prefixed UTF-8 string
pub fn write_short_string(value: &str) -> Result<Vec<u8>, FramingError> {
    let length =
        u16::try_from(value.len()).map_err(|_| FramingError::PayloadTooLarge(value.len()))?;
    let mut buffer = Vec::with_capacity(SHORT_STRING_PREFIX_SIZE + value.len());
    buffer.put_u16(length);
    buffer.put_slice(value.as_bytes());
    Ok(buffer)
}
