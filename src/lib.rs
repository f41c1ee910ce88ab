//! # Room Photo - Room-Photo Transform Engine
//!
//! Intercepts compressed room photos travelling inside game packets, replaces
//! their visual content with a caller-supplied image drawn as capacity-bounded
//! planes and sprites, and re-encodes them in the exact layout the photo
//! service accepts.
//!
//! ## Architecture Layers
//!
//! - **Domain**: the photo document, its primitives and the RGBA raster
//! - **Application**: ports, pixel quantization, capacity planning,
//!   composition and the interception pipeline
//! - **Infrastructure**: checksum serializer, system clock, file-backed assets
//!
//! The wire layer (compression codec and packet envelope) lives in the
//! `photo-wire` crate.
//!
//! ## Example Usage
//!
//! ```no_run
//! use std::sync::Arc;
//! use room_photo::application::pipeline::{InterceptedPacket, Interceptor, MessageName};
//! use room_photo::infrastructure::{ChecksumPhotoEncoder, SystemClock};
//! use room_photo::Config;
//!
//! let config = Config::from_env();
//! let encoder = Arc::new(ChecksumPhotoEncoder::new(Arc::new(SystemClock)));
//! let (mut interceptor, mut editor) = Interceptor::new(config.interceptor_settings(), encoder);
//!
//! let packet = InterceptedPacket::outgoing(MessageName::RenderRoom, std::fs::read("photo.bin").unwrap());
//! let verdict = interceptor.intercept(&packet);
//! for event in editor.drain() {
//!     println!("{:?}", event);
//! }
//! # let _ = verdict;
//! ```

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use application::{pipeline, planner, ports, quantize};
pub use config::Config;
pub use domain::errors as domain_errors;
pub use domain::{entities, value_objects};
