//! MCP bridge for the Teamwork.com project-management API.
//!
//! The crate is split into two layers:
//!
//! - [`twapi`]: a typed client for the Teamwork REST API. Each domain object
//!   (project, task, milestone, ...) exposes request entities that know their
//!   own URL, query rules and body envelope; [`twapi::Engine`] dispatches any
//!   of them in a single authenticated HTTP round trip.
//! - [`mcp`]: the Model Context Protocol adapter. It publishes the entity
//!   catalog as MCP tools and `twapi://` resources over the rmcp Streamable
//!   HTTP transport.

pub mod config;
pub mod mcp;
pub mod twapi;
