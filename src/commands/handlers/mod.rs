//! Per-command handler implementations
//!
//! Every command the bot publishes is listed in [`create_all_commands`].
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.0.0: ping, about, pick

pub mod about;
pub mod pick;
pub mod ping;

use std::sync::Arc;

use super::handler::SlashCommand;

/// Create all command handlers
///
/// Returns the handler set ready to be loaded with CommandRegistry.
pub fn create_all_commands() -> Vec<Arc<dyn SlashCommand>> {
    vec![
        Arc::new(ping::PingCommand),
        Arc::new(about::AboutCommand),
        Arc::new(pick::PickCommand),
    ]
}
