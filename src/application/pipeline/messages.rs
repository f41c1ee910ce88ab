use std::fmt;

use serde_json::Value;

use crate::domain::entities::{NonEditorCounts, PrimitiveSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Server to client
    Incoming,
    /// Client to server
    Outgoing,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Incoming => write!(f, "incoming"),
            Direction::Outgoing => write!(f, "outgoing"),
        }
    }
}

/// Semantic name resolved from a packet header
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageName {
    RenderRoom,
    RenderRoomThumbnail,
    CameraStorageUrl,
    Other(String),
}

impl MessageName {
    pub fn from_name(name: &str) -> Self {
        match name {
            "RenderRoom" => MessageName::RenderRoom,
            "RenderRoomThumbnail" => MessageName::RenderRoomThumbnail,
            "CameraStorageUrl" => MessageName::CameraStorageUrl,
            other => MessageName::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            MessageName::RenderRoom => "RenderRoom",
            MessageName::RenderRoomThumbnail => "RenderRoomThumbnail",
            MessageName::CameraStorageUrl => "CameraStorageUrl",
            MessageName::Other(name) => name,
        }
    }

    /// Whether the message carries a compressed photo
    pub fn is_render(&self) -> bool {
        matches!(
            self,
            MessageName::RenderRoom | MessageName::RenderRoomThumbnail
        )
    }
}

impl fmt::Display for MessageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One packet handed over by the transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterceptedPacket {
    pub direction: Direction,
    pub name: MessageName,
    pub bytes: Vec<u8>,
}

impl InterceptedPacket {
    pub fn new(direction: Direction, name: MessageName, bytes: Vec<u8>) -> Self {
        Self {
            direction,
            name,
            bytes,
        }
    }

    pub fn outgoing(name: MessageName, bytes: Vec<u8>) -> Self {
        Self::new(Direction::Outgoing, name, bytes)
    }

    pub fn incoming(name: MessageName, bytes: Vec<u8>) -> Self {
        Self::new(Direction::Incoming, name, bytes)
    }
}

/// What the transport should do with a packet
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Forward,
    Block,
    Replace(Vec<u8>),
}

/// Editor switches that decide what happens to render packets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mode {
    /// Keep a copy of every photo that passes
    pub capture: bool,
    /// Rewrite photos with the applied primitives
    pub inject: bool,
    /// Editor content is ready to be injected
    pub edit: bool,
    /// Block render packets that were not rewritten
    pub suppress: bool,
}

impl Mode {
    pub fn injects(&self) -> bool {
        self.inject && self.edit
    }
}

impl Default for Mode {
    fn default() -> Self {
        Self {
            capture: true,
            inject: false,
            edit: false,
            suppress: false,
        }
    }
}

/// Editor to pipeline
#[derive(Debug, Clone, PartialEq)]
pub enum EditorCommand {
    SetMode(Mode),
    /// Full replacement primitive set to inject from now on
    Apply(PrimitiveSet),
    /// Forget the applied set and the last capture
    Clear,
}

/// Copy of a captured photo's content
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureSnapshot {
    pub primitives: PrimitiveSet,
    pub filters: Vec<Value>,
    pub room_id: i64,
    pub thumbnail: bool,
}

impl CaptureSnapshot {
    pub fn non_editor_counts(&self) -> NonEditorCounts {
        self.primitives.non_editor_counts()
    }
}

/// Pipeline to editor
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineEvent {
    Captured(CaptureSnapshot),
    /// Preview URL the server assigned to a stored photo
    ServerPreview(String),
    Blocked {
        message: MessageName,
        reason: String,
    },
    Replaced {
        message: MessageName,
        planes: usize,
        sprites: usize,
    },
}
