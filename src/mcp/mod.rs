//! MCP surface of the bridge.
//!
//! [`TeamworkMcp`] is the protocol handler: one instance per MCP session,
//! all sharing the HTTP [`Engine`](crate::twapi::Engine). Tools live under
//! [`tools`], browsable `twapi://` URIs under [`resources`], and
//! [`create_mcp_service`] wires the handler into an Axum router over the
//! streamable-HTTP transport.

pub mod resources;
pub mod server;
mod service;
pub mod tools;

#[cfg(test)]
mod resources_test;
#[cfg(test)]
mod server_test;
#[cfg(test)]
pub(crate) mod test_stub;

pub use server::TeamworkMcp;
pub use service::create_mcp_service;
