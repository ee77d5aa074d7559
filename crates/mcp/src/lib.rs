// MCP (Model Context Protocol) server for Hong Kong Observatory weather data
// Exposes the `get_weather` tool to agent clients over stdio

pub mod config;
pub mod protocol;
pub mod server;
pub mod tools;

pub use config::{McpConfig, Overrides};
pub use server::McpServer;
