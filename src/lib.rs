//! Quillboard - Message board and AI text-processing backend
//!
//! This crate implements a small message board with hosted authentication and
//! an LLM-backed text-processing experiment: a two-step pipeline (plan, then
//! execute against an AI provider) with session-scoped conversation state,
//! delivered synchronously over HTTP or streamed over a WebSocket channel.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
