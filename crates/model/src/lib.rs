//! RPC client for the hosted AI interview model
//!
//! The interview brain lives in an externally hosted model reached over a
//! gradio-style JSON API. This crate owns the wire format and the
//! connection lifecycle; everything conversational travels in the payload.

pub mod client;

pub use client::{HostedInterviewModel, HostedModelConfig};
