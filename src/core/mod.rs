//! # Core Module
//!
//! Configuration, embed payloads and the reply-state aware response adapter.
//!
//! - **Version**: 2.0.0
//! - **Since**: 0.7.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 2.0.0: Response adapter tracks reply state; add embeds module
//! - 1.0.0: Initial creation with config module

pub mod config;
pub mod embeds;
pub mod response;

// Re-export commonly used items
pub use config::{Config, ConfigError};
pub use embeds::{error_embed, EmbedPayload};
pub use response::{
    respond, truncate_for_embed, truncate_for_message, Reply, ResponsePayload, Suggestions,
    EMBED_LIMIT, MESSAGE_LIMIT,
};
