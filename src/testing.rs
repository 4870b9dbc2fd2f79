//! Recording test doubles for the Discord seams

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::commands::CommandDescriptor;
use crate::core::response::{AutocompleteChoice, ResponsePayload};
use crate::core::Config;
use crate::interaction::{InteractionContext, InteractionData, InteractionResponder};
use crate::session::{GuildSummary, Platform, Session};

pub const BOT_ID: u64 = 1000;
pub const GUILD_ID: u64 = 2000;
pub const TERMINAL_ID: u64 = 3000;

pub fn test_config() -> Arc<Config> {
    Arc::new(Config {
        discord_token: "test-token".to_string(),
        guild_id: GUILD_ID,
        terminal_channel_id: TERMINAL_ID,
        log_level: "debug".to_string(),
    })
}

/// Context over a degraded-mode session (no guild)
pub fn context_for(data: InteractionData, responder: Arc<RecordingResponder>) -> InteractionContext {
    let session = Arc::new(Session::new(test_config(), BOT_ID, None, Utc::now()));
    InteractionContext::new(data, session, responder)
}

/// One call made through the responder
#[derive(Debug, Clone, PartialEq)]
pub enum Sent {
    Reply(ResponsePayload),
    Defer { ephemeral: bool },
    EditOriginal(ResponsePayload),
    Followup(ResponsePayload),
    Choices(Vec<AutocompleteChoice>),
}

#[derive(Default)]
pub struct RecordingResponder {
    sent: Mutex<Vec<Sent>>,
    fail: bool,
}

impl RecordingResponder {
    /// Responder whose every call fails without recording
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub async fn sent(&self) -> Vec<Sent> {
        self.sent.lock().await.clone()
    }

    async fn record(&self, call: Sent) -> Result<()> {
        if self.fail {
            return Err(anyhow!("responder unavailable"));
        }
        self.sent.lock().await.push(call);
        Ok(())
    }
}

#[async_trait]
impl InteractionResponder for RecordingResponder {
    async fn reply(&self, payload: &ResponsePayload) -> Result<()> {
        self.record(Sent::Reply(payload.clone())).await
    }

    async fn defer(&self, ephemeral: bool) -> Result<()> {
        self.record(Sent::Defer { ephemeral }).await
    }

    async fn edit_original(&self, payload: &ResponsePayload) -> Result<()> {
        self.record(Sent::EditOriginal(payload.clone())).await
    }

    async fn followup(&self, payload: &ResponsePayload) -> Result<()> {
        self.record(Sent::Followup(payload.clone())).await
    }

    async fn respond_choices(&self, choices: &[AutocompleteChoice]) -> Result<()> {
        self.record(Sent::Choices(choices.to_vec())).await
    }
}

#[derive(Default)]
pub struct RecordingPlatform {
    guild_name: Option<String>,
    fail_publish: bool,
    published: Mutex<Vec<Vec<String>>>,
    deleted: Mutex<Vec<(u64, u64)>>,
}

impl RecordingPlatform {
    pub fn with_guild(name: &str) -> Self {
        Self {
            guild_name: Some(name.to_string()),
            ..Self::default()
        }
    }

    pub fn failing_publish(mut self) -> Self {
        self.fail_publish = true;
        self
    }

    /// Names of each published command set
    pub async fn published(&self) -> Vec<Vec<String>> {
        self.published.lock().await.clone()
    }

    /// `(channel, message)` pairs deleted so far
    pub async fn deleted(&self) -> Vec<(u64, u64)> {
        self.deleted.lock().await.clone()
    }
}

#[async_trait]
impl Platform for RecordingPlatform {
    async fn fetch_guild(&self, guild_id: u64) -> Result<GuildSummary> {
        let name = self
            .guild_name
            .clone()
            .ok_or_else(|| anyhow!("Unknown Guild"))?;
        Ok(GuildSummary { id: guild_id, name })
    }

    async fn set_commands(&self, commands: &[CommandDescriptor]) -> Result<()> {
        if self.fail_publish {
            return Err(anyhow!("Missing Access"));
        }
        self.published
            .lock()
            .await
            .push(commands.iter().map(|c| c.name.clone()).collect());
        Ok(())
    }

    async fn delete_message(&self, channel_id: u64, message_id: u64) -> Result<()> {
        self.deleted.lock().await.push((channel_id, message_id));
        Ok(())
    }
}
