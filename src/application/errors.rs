//! Error type for the interception pipeline
//!
//! Every variant is scoped to one packet. Whether the packet is blocked or
//! forwarded depends on the variant, see [`PipelineError::fails_closed`].

use thiserror::Error;

use crate::domain::errors::DomainError;
use photo_wire::{CodecError, FramingError};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Framing error: {0}")]
    Framing(#[from] FramingError),

    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),

    #[error("Photo error: {0}")]
    Parse(#[from] DomainError),
}

impl PipelineError {
    /// Whether the packet must be blocked rather than forwarded untouched.
    ///
    /// Corrupt framing or an undecodable payload never reaches the server.
    /// A photo that decodes but does not parse is left alone.
    pub fn fails_closed(&self) -> bool {
        !matches!(self, PipelineError::Parse(_))
    }

    /// Short label used in log fields and blocked-packet events
    pub fn kind(&self) -> &'static str {
        match self {
            PipelineError::Framing(_) => "framing",
            PipelineError::Codec(_) => "codec",
            PipelineError::Parse(_) => "parse",
        }
    }
}
