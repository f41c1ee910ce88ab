use std::sync::Arc;

use tokio::sync::mpsc::{self, error::TryRecvError, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info, warn};

use super::messages::{
    CaptureSnapshot, Direction, EditorCommand, InterceptedPacket, MessageName, Mode,
    PipelineEvent, Verdict,
};
use crate::application::composition::merge_for_injection;
use crate::application::errors::PipelineError;
use crate::application::ports::PhotoEncoder;
use crate::domain::entities::{Document, PrimitiveSet};
use photo_wire::{read_short_string, Envelope};

/// Values the interceptor needs from configuration
#[derive(Debug, Clone, PartialEq)]
pub struct InterceptorSettings {
    /// Where the length-prefixed payload starts inside the packet
    pub payload_offset: usize,
    pub preview_base_url: String,
    /// Zoom written into every injected photo
    pub force_zoom: Option<f64>,
}

/// Editor side of the channels to an [`Interceptor`]
pub struct EditorHandle {
    commands: UnboundedSender<EditorCommand>,
    events: UnboundedReceiver<PipelineEvent>,
}

impl EditorHandle {
    /// Queue a command; `false` once the interceptor is gone
    pub fn send(&self, command: EditorCommand) -> bool {
        self.commands.send(command).is_ok()
    }

    /// Next queued event, if any
    pub fn try_recv(&mut self) -> Option<PipelineEvent> {
        self.events.try_recv().ok()
    }

    /// Wait for the next event; `None` once the interceptor is gone
    pub async fn recv(&mut self) -> Option<PipelineEvent> {
        self.events.recv().await
    }

    /// Everything queued so far
    pub fn drain(&mut self) -> Vec<PipelineEvent> {
        std::iter::from_fn(|| self.try_recv()).collect()
    }
}

/// Packet-by-packet state machine between the transport and the editor.
///
/// The editor never touches this state directly. It sends [`EditorCommand`]s,
/// which are applied before the next packet is looked at, and receives copies
/// of what was captured as [`PipelineEvent`]s.
pub struct Interceptor {
    settings: InterceptorSettings,
    encoder: Arc<dyn PhotoEncoder>,
    mode: Mode,
    last_capture: Option<CaptureSnapshot>,
    applied: Option<PrimitiveSet>,
    commands: UnboundedReceiver<EditorCommand>,
    events: UnboundedSender<PipelineEvent>,
}

impl Interceptor {
    pub fn new(
        settings: InterceptorSettings,
        encoder: Arc<dyn PhotoEncoder>,
    ) -> (Self, EditorHandle) {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::unbounded_channel();

        let interceptor = Self {
            settings,
            encoder,
            mode: Mode::default(),
            last_capture: None,
            applied: None,
            commands: command_rx,
            events: event_tx,
        };
        let handle = EditorHandle {
            commands: command_tx,
            events: event_rx,
        };
        (interceptor, handle)
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn last_capture(&self) -> Option<&CaptureSnapshot> {
        self.last_capture.as_ref()
    }

    /// Resolve one packet completely before the next one is accepted
    pub fn intercept(&mut self, packet: &InterceptedPacket) -> Verdict {
        self.drain_commands();

        match (packet.direction, &packet.name) {
            (Direction::Outgoing, name) if name.is_render() => self.handle_render(packet),
            (Direction::Incoming, MessageName::CameraStorageUrl) => {
                self.handle_storage_url(packet);
                Verdict::Forward
            }
            _ => Verdict::Forward,
        }
    }

    fn drain_commands(&mut self) {
        loop {
            match self.commands.try_recv() {
                Ok(EditorCommand::SetMode(mode)) => {
                    debug!(?mode, "Mode changed");
                    self.mode = mode;
                }
                Ok(EditorCommand::Apply(primitives)) => {
                    debug!(
                        planes = primitives.planes.len(),
                        sprites = primitives.sprites.len(),
                        "Primitives applied"
                    );
                    self.applied = Some(primitives);
                }
                Ok(EditorCommand::Clear) => {
                    self.applied = None;
                    self.last_capture = None;
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
    }

    fn handle_render(&mut self, packet: &InterceptedPacket) -> Verdict {
        match self.transform_render(packet) {
            Ok(Some(bytes)) => Verdict::Replace(bytes),
            Ok(None) if self.mode.suppress => {
                debug!(message = %packet.name, "Render packet suppressed");
                Verdict::Block
            }
            Ok(None) => Verdict::Forward,
            Err(e) if e.fails_closed() => {
                warn!(
                    direction = %packet.direction,
                    message = %packet.name,
                    payload_len = packet.bytes.len(),
                    kind = e.kind(),
                    "Blocking render packet: {}",
                    e
                );
                self.emit(PipelineEvent::Blocked {
                    message: packet.name.clone(),
                    reason: e.to_string(),
                });
                Verdict::Block
            }
            Err(e) if self.mode.suppress => {
                warn!(message = %packet.name, "Suppressing unparsed photo: {}", e);
                Verdict::Block
            }
            Err(e) => {
                warn!(message = %packet.name, "Forwarding unparsed photo: {}", e);
                Verdict::Forward
            }
        }
    }

    /// Capture and, when injecting, rewrite one render packet.
    ///
    /// `Ok(None)` means the packet itself needs no change.
    fn transform_render(
        &mut self,
        packet: &InterceptedPacket,
    ) -> Result<Option<Vec<u8>>, PipelineError> {
        let envelope = Envelope::parse(&packet.bytes, self.settings.payload_offset)?;
        let raw = photo_wire::decompress(envelope.payload())?;
        // Invalid sequences become U+FFFD rather than failing the packet
        let text = String::from_utf8_lossy(&raw).into_owned();
        let mut document = Document::parse(&text)?;

        if self.mode.capture {
            let snapshot = CaptureSnapshot {
                primitives: document.snapshot(),
                filters: document.filters().to_vec(),
                room_id: document.room_id(),
                thumbnail: packet.name == MessageName::RenderRoomThumbnail,
            };
            debug!(
                message = %packet.name,
                room_id = snapshot.room_id,
                planes = snapshot.primitives.planes.len(),
                sprites = snapshot.primitives.sprites.len(),
                "Captured photo"
            );
            self.emit(PipelineEvent::Captured(snapshot.clone()));
            self.last_capture = Some(snapshot);
        }

        if !self.mode.injects() {
            return Ok(None);
        }
        let Some(applied) = self.applied.as_ref() else {
            return Ok(None);
        };

        let merged = match &self.last_capture {
            Some(capture) => {
                document.set_filters(capture.filters.clone());
                merge_for_injection(applied, &capture.primitives)
            }
            None => merge_for_injection(applied, &document.snapshot()),
        };
        let (planes, sprites) = (merged.planes.len(), merged.sprites.len());
        document.set_primitives(merged);
        if let Some(zoom) = self.settings.force_zoom {
            document.force_zoom(zoom);
        }

        let text = self.encoder.encode(&document);
        let compressed = photo_wire::compress(text.as_bytes())?;
        let rebuilt = envelope.rebuild(&compressed)?;

        info!(
            message = %packet.name,
            room_id = document.room_id(),
            planes,
            sprites,
            payload_len = compressed.len(),
            "Injected photo"
        );
        self.emit(PipelineEvent::Replaced {
            message: packet.name.clone(),
            planes,
            sprites,
        });
        Ok(Some(rebuilt))
    }

    fn handle_storage_url(&mut self, packet: &InterceptedPacket) {
        let body = packet
            .bytes
            .get(self.settings.payload_offset..)
            .unwrap_or_default();
        match read_short_string(body) {
            Ok(path) if !path.is_empty() => {
                let url = format!("{}{}", self.settings.preview_base_url, path);
                debug!(%url, "Server preview available");
                self.emit(PipelineEvent::ServerPreview(url));
            }
            Ok(_) => {}
            Err(e) => debug!("Unreadable storage URL: {}", e),
        }
    }

    fn emit(&self, event: PipelineEvent) {
        // A dropped editor only means nobody is listening
        let _ = self.events.send(event);
    }
}
