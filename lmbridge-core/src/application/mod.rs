pub mod discovery;
pub mod integration;
pub mod mcp;
pub mod selection;
