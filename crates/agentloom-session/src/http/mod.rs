//! HTTP transport for the agent chat endpoint.
//!
//! Implements `ReplyTransport` by POSTing the request as JSON and reading
//! the reply back as Server-Sent Events.

mod client;
mod config;
mod wire;


pub use client::HttpTransport;
pub use config::HttpTransportConfig;
