//! Slash command handler trait
//!
//! - **Version**: 2.0.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 2.0.0: Handlers declare their own definition and return a Reply
//! - 1.0.0: Initial implementation for modular command handling

use anyhow::Result;
use async_trait::async_trait;
use serenity::builder::CreateApplicationCommand;

use crate::core::response::{Reply, Suggestions};
use crate::interaction::InteractionContext;

/// Trait for slash command handlers
///
/// Each command is one implementation. The definition is published to Discord
/// at ready time and its name keys the dispatch table.
///
/// # Example
///
/// ```ignore
/// pub struct PingCommand;
///
/// #[async_trait]
/// impl SlashCommand for PingCommand {
///     fn definition(&self) -> CreateApplicationCommand {
///         CreateApplicationCommand::default()
///             .name("ping")
///             .description("Check that the bot is alive")
///             .to_owned()
///     }
///
///     async fn execute(&self, _ctx: &InteractionContext) -> Result<Reply> {
///         Ok(Reply::text("Pong!"))
///     }
/// }
/// ```
#[async_trait]
pub trait SlashCommand: Send + Sync {
    /// Declarative command schema published to Discord
    fn definition(&self) -> CreateApplicationCommand;

    /// Run the command. Errors are reported to the user as a generic error embed.
    async fn execute(&self, ctx: &InteractionContext) -> Result<Reply>;

    /// Suggestions for an option with autocomplete enabled
    ///
    /// Commands without autocomplete keep the default, which sends nothing.
    async fn autocomplete(&self, _ctx: &InteractionContext) -> Result<Suggestions> {
        Ok(Suggestions::Empty)
    }
}
