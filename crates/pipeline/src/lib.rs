//! Audio adapters for the interview turn pipeline
//!
//! Three adapters sit between the turn orchestrator and the outside world:
//! - [`FfmpegConverter`] - recorded container -> canonical 16 kHz mono WAV
//! - [`HttpSttAdapter`] - canonical WAV -> recognized text
//! - [`HttpTtsAdapter`] - response text -> stored MP3 artifact
//!
//! All three are pure request/response: no retries, no cross-call state,
//! and any temporary file they stage is removed before they return.

pub mod media;
pub mod stt;
pub mod tts;

pub use media::{FfmpegConfig, FfmpegConverter};
pub use stt::{HttpSttAdapter, HttpSttConfig};
pub use tts::{HttpTtsAdapter, HttpTtsConfig};
