// MCP (Model Context Protocol) server for Monarch Money
// Exposes read-only financial queries as tools over JSON-RPC/stdio

pub mod config;
pub mod protocol;
pub mod server;
pub mod session;
pub mod tools;

#[cfg(test)]
pub(crate) mod testing;

pub use config::ServerConfig;
pub use server::McpServer;
pub use session::SessionManager;
