//! MCP server exposing the LM Studio tools over stdio
//!
//! Speaks JSON-RPC 2.0, one message per line:
//!
//! 1. `initialize` returns server info and the `tools` capability
//! 2. `tools/list` returns `health_check`, `list_models`,
//!    `get_current_model` and `chat_completion`
//! 3. `tools/call` runs one tool against the configured server
//! 4. Loop until stdin EOF

pub mod server;
pub mod tools;

pub use server::{McpError, McpServer, PROTOCOL_VERSION, SERVER_NAME, run_stdio};
pub use tools::{LmStudioTools, ToolCallError, ToolOutput};
