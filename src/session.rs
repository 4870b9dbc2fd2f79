//! # Session Lifecycle
//!
//! Ready-time setup (command publication, operating guild lookup) and the
//! terminal channel policy for inbound messages.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.0.0: Session context, degraded-mode startup, terminal channel cleanup

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::{debug, error, info};
use std::sync::Arc;

use crate::commands::{CommandDescriptor, CommandRegistry};
use crate::core::Config;

/// Session-level calls against Discord
///
/// Implemented over serenity's HTTP client in [`crate::gateway`].
#[async_trait]
pub trait Platform: Send + Sync {
    async fn fetch_guild(&self, guild_id: u64) -> Result<GuildSummary>;

    /// Replace the full set of published application commands
    async fn set_commands(&self, commands: &[CommandDescriptor]) -> Result<()>;

    async fn delete_message(&self, channel_id: u64, message_id: u64) -> Result<()>;
}

/// The operating guild as resolved at ready time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuildSummary {
    pub id: u64,
    pub name: String,
}

/// Application context shared by every interaction of one gateway session
///
/// Created by [`on_ready`]; interactions are only routed once a session
/// exists, so handlers can rely on it being initialized.
#[derive(Debug, Clone)]
pub struct Session {
    pub config: Arc<Config>,
    pub bot_user_id: u64,
    /// `None` when the guild could not be fetched (degraded mode)
    pub guild: Option<GuildSummary>,
    pub started_at: DateTime<Utc>,
}

impl Session {
    pub fn new(
        config: Arc<Config>,
        bot_user_id: u64,
        guild: Option<GuildSummary>,
        started_at: DateTime<Utc>,
    ) -> Self {
        Self {
            config,
            bot_user_id,
            guild,
            started_at,
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.guild.is_none()
    }

    pub fn uptime(&self) -> chrono::Duration {
        Utc::now() - self.started_at
    }
}

/// Publish commands and resolve the operating guild.
///
/// Neither failure aborts startup: both are logged and the session continues
/// in degraded mode.
pub async fn on_ready(
    platform: &dyn Platform,
    commands: &CommandRegistry,
    config: Arc<Config>,
    bot_user_id: u64,
    started_at: DateTime<Utc>,
) -> Session {
    match platform.set_commands(commands.descriptors()).await {
        Ok(()) => info!("✅ Published {} application commands", commands.len()),
        Err(e) => error!("❌ Failed to publish application commands: {e:#}"),
    }

    let guild = match platform.fetch_guild(config.guild_id).await {
        Ok(guild) => {
            info!("🏠 Operating in guild {} ({})", guild.name, guild.id);
            Some(guild)
        }
        Err(e) => {
            error!(
                "\n\n=== [ CRITICAL ] ===\n\nCould not fetch guild {}: {e:#}\nMaybe the bot isn't in the server? Most features will not work properly.\n\n=== [ -------- ] ===\n",
                config.guild_id
            );
            None
        }
    };

    info!("The Akasha System is online.");
    Session::new(config, bot_user_id, guild, started_at)
}

/// The parts of a created message the lifecycle looks at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InboundMessage {
    pub id: u64,
    pub channel_id: u64,
    pub author_id: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageAction {
    Ignored,
    Deleted,
}

/// Delete every message posted to the terminal channel, except the bot's own
pub async fn on_message(
    platform: &dyn Platform,
    session: &Session,
    message: InboundMessage,
) -> Result<MessageAction> {
    if message.author_id == session.bot_user_id {
        return Ok(MessageAction::Ignored);
    }
    if message.channel_id != session.config.terminal_channel_id {
        return Ok(MessageAction::Ignored);
    }

    platform
        .delete_message(message.channel_id, message.id)
        .await?;
    debug!(
        "Deleted message {} from terminal channel {}",
        message.id, message.channel_id
    );
    Ok(MessageAction::Deleted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::handlers::create_all_commands;
    use crate::testing::{test_config, RecordingPlatform, BOT_ID, GUILD_ID, TERMINAL_ID};

    fn registry() -> CommandRegistry {
        CommandRegistry::load(create_all_commands()).unwrap()
    }

    #[tokio::test]
    async fn test_ready_publishes_commands_and_resolves_guild() {
        let platform = RecordingPlatform::with_guild("HQ");
        let commands = registry();

        let session = on_ready(&platform, &commands, test_config(), BOT_ID, Utc::now()).await;

        assert_eq!(
            platform.published().await,
            vec![commands.descriptors().iter().map(|d| d.name.clone()).collect::<Vec<_>>()]
        );
        assert_eq!(
            session.guild,
            Some(GuildSummary {
                id: GUILD_ID,
                name: "HQ".to_string()
            })
        );
        assert!(!session.is_degraded());
    }

    #[tokio::test]
    async fn test_ready_continues_when_guild_unreachable() {
        let platform = RecordingPlatform::default();

        let session = on_ready(&platform, &registry(), test_config(), BOT_ID, Utc::now()).await;

        assert!(session.is_degraded());
        assert_eq!(platform.published().await.len(), 1);
    }

    #[tokio::test]
    async fn test_ready_continues_when_publish_fails() {
        let platform = RecordingPlatform::with_guild("HQ").failing_publish();

        let session = on_ready(&platform, &registry(), test_config(), BOT_ID, Utc::now()).await;

        assert!(platform.published().await.is_empty());
        assert!(!session.is_degraded());
    }

    fn session() -> Session {
        Session::new(test_config(), BOT_ID, None, Utc::now())
    }

    #[tokio::test]
    async fn test_terminal_channel_message_is_deleted() {
        let platform = RecordingPlatform::default();
        let message = InboundMessage {
            id: 5,
            channel_id: TERMINAL_ID,
            author_id: 77,
        };

        let action = on_message(&platform, &session(), message).await.unwrap();

        assert_eq!(action, MessageAction::Deleted);
        assert_eq!(platform.deleted().await, vec![(TERMINAL_ID, 5)]);
    }

    #[tokio::test]
    async fn test_own_messages_are_never_deleted() {
        let platform = RecordingPlatform::default();
        let message = InboundMessage {
            id: 5,
            channel_id: TERMINAL_ID,
            author_id: BOT_ID,
        };

        let action = on_message(&platform, &session(), message).await.unwrap();

        assert_eq!(action, MessageAction::Ignored);
        assert!(platform.deleted().await.is_empty());
    }

    #[tokio::test]
    async fn test_other_channels_are_left_alone() {
        let platform = RecordingPlatform::default();
        let message = InboundMessage {
            id: 5,
            channel_id: TERMINAL_ID + 1,
            author_id: 77,
        };

        let action = on_message(&platform, &session(), message).await.unwrap();

        assert_eq!(action, MessageAction::Ignored);
        assert!(platform.deleted().await.is_empty());
    }
}
