//! Interception pipeline: routes packets by direction and message name,
//! captures photos for the editor and rewrites them when injecting.

mod interceptor;
mod messages;

pub use interceptor::{EditorHandle, Interceptor, InterceptorSettings};
pub use messages::{
    CaptureSnapshot, Direction, EditorCommand, InterceptedPacket, MessageName, Mode,
    PipelineEvent, Verdict,
};
