//! Contains data structures for requests to, and events from, the Cohere API.
//!
//! This module defines the chat and generate request bodies, the generation
//! configuration shared by a client, and the events emitted while streaming.

pub mod chat;
mod config;
mod event;
pub mod generate;
mod http;
pub mod models;
mod shared;

pub use config::*;
pub use event::*;
pub use http::*;
pub use shared::*;
