pub mod diagnose;
pub mod mcp;
pub mod setup;

/// Short prompt used by `diagnose` to confirm a model answers at all
pub const DIAGNOSE_PROMPT: &str = "Hello";
pub const DIAGNOSE_MAX_TOKENS: u32 = 5;

/// Prompt used by `setup` before the launch config is written
pub const SETUP_PROMPT: &str = "Hello, respond with just 'OK' if you're working.";
pub const SETUP_MAX_TOKENS: u32 = 10;

/// Prompt used by `test` against every chat model
pub const TEST_PROMPT: &str = "Say 'WORKING' if you can respond";
pub const TEST_MAX_TOKENS: u32 = 5;

/// Verification prompts are sent deterministically
pub const VERIFY_TEMPERATURE: f32 = 0.0;
