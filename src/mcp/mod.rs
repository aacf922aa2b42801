//! MCP protocol layer for the BDL gateway
//!
//! Everything protocol-shaped lives here:
//!
//! - [`registry`] - the fixed catalog of the six BDL query tools, including
//!   the argument-to-query translation each tool needs
//! - [`protocol`] - JSON-RPC envelope helpers and the typed `initialize`
//!   reply
//! - [`dispatcher`] - routes one decoded message to one reply (or none)
//!
//! The layer is stateless: a [`dispatcher::Dispatcher`] holds only the
//! upstream client configuration, and every message is handled
//! independently.

pub mod dispatcher;
pub mod protocol;
pub mod registry;

pub use dispatcher::{DispatchOutcome, Dispatcher};
pub use registry::{find_tool, list_descriptors, tools, ToolSpec, UpstreamQuery};
