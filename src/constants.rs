// src/constants.rs
//! Domain constants that define the operational boundaries of the system.
//!
//! Reading these constants should tell you how the service talks to its two
//! upstreams: which API versions it pins, which model drafts the post, and
//! how long the draft may be.

// ---------------------------------------------------------------------------
// Notion API
// ---------------------------------------------------------------------------

/// Notion API version sent with every request.
pub const NOTION_VERSION: &str = "2022-06-28";

/// Base URL of the Notion REST API.
pub const NOTION_API_BASE_URL: &str = "https://api.notion.com/v1";

// ---------------------------------------------------------------------------
// Anthropic Messages API
// ---------------------------------------------------------------------------

/// Anthropic API version sent with every request.
pub const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Endpoint of the Anthropic Messages API.
pub const ANTHROPIC_MESSAGES_URL: &str = "https://api.anthropic.com/v1/messages";

/// Model that drafts the post.
pub const GENERATION_MODEL: &str = "claude-3-5-sonnet-20241022";

/// Upper bound on the length of a drafted post, in output tokens.
pub const GENERATION_MAX_TOKENS: u32 = 2000;

// ---------------------------------------------------------------------------
// HTTP surface
// ---------------------------------------------------------------------------

/// Address the service binds to when `--bind` is not given.
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:3000";

// ---------------------------------------------------------------------------
// Error display
// ---------------------------------------------------------------------------

/// Maximum characters shown when previewing error response bodies.
pub const ERROR_BODY_PREVIEW_LENGTH: usize = 200;
