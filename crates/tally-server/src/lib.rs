//! Tally MCP server
//!
//! Exposes the budget tools over the Model Context Protocol so an LLM agent
//! can record transactions, manage categories and rules, and run the
//! analysis tools conversationally.

pub mod mcp;

pub use mcp::{start_mcp_server, TallyMcpServer};
