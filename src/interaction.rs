//! Per-interaction context handed to every handler
//!
//! An [`InteractionContext`] is built from a single inbound gateway event. It
//! carries the event's data, the shared [`Session`], the responder used to
//! answer, and the interaction's response state. Nothing in it outlives the
//! interaction.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.0.0: Interaction data, response state and the responder seam

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::core::response::{AutocompleteChoice, ResponsePayload};
use crate::session::Session;

/// Interaction types the router distinguishes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionKind {
    Command,
    Autocomplete,
    Component,
    ModalSubmit,
    /// Anything newer than this router knows about
    Unknown,
}

impl InteractionKind {
    /// Label used in log lines
    pub fn label(self) -> &'static str {
        match self {
            InteractionKind::Command => "slash command",
            InteractionKind::Autocomplete => "autocomplete",
            InteractionKind::Component => "component",
            InteractionKind::ModalSubmit => "modal submit",
            InteractionKind::Unknown => "unknown interaction",
        }
    }
}

/// Where an interaction stands with respect to Discord's reply rules
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseState {
    Unanswered,
    Deferred { ephemeral: bool },
    Replied,
}

/// A resolved command option (subcommand options are flattened)
#[derive(Debug, Clone, PartialEq)]
pub struct CommandOption {
    pub name: String,
    pub value: Option<Value>,
    /// Set on the option the user is typing into during autocomplete
    pub focused: bool,
}

/// Data carried by one inbound interaction
#[derive(Debug, Clone, PartialEq)]
pub struct InteractionData {
    pub kind: InteractionKind,
    pub command_name: Option<String>,
    pub options: Vec<CommandOption>,
    pub custom_id: Option<String>,
    /// Selected values of a select menu
    pub values: Vec<String>,
    /// Text inputs of a submitted modal, keyed by input custom id
    pub fields: HashMap<String, String>,
    pub user_id: u64,
    pub channel_id: u64,
    pub guild_id: Option<u64>,
}

impl InteractionData {
    fn base(kind: InteractionKind, user_id: u64) -> Self {
        Self {
            kind,
            command_name: None,
            options: Vec::new(),
            custom_id: None,
            values: Vec::new(),
            fields: HashMap::new(),
            user_id,
            channel_id: 0,
            guild_id: None,
        }
    }

    pub fn command(name: &str, user_id: u64) -> Self {
        Self {
            command_name: Some(name.to_string()),
            ..Self::base(InteractionKind::Command, user_id)
        }
    }

    pub fn autocomplete(name: &str, user_id: u64) -> Self {
        Self {
            command_name: Some(name.to_string()),
            ..Self::base(InteractionKind::Autocomplete, user_id)
        }
    }

    pub fn component(custom_id: &str, user_id: u64) -> Self {
        Self {
            custom_id: Some(custom_id.to_string()),
            ..Self::base(InteractionKind::Component, user_id)
        }
    }

    pub fn modal_submit(custom_id: &str, user_id: u64) -> Self {
        Self {
            custom_id: Some(custom_id.to_string()),
            ..Self::base(InteractionKind::ModalSubmit, user_id)
        }
    }

    pub fn unknown(user_id: u64) -> Self {
        Self::base(InteractionKind::Unknown, user_id)
    }

    pub fn with_option(mut self, name: &str, value: Value, focused: bool) -> Self {
        self.options.push(CommandOption {
            name: name.to_string(),
            value: Some(value),
            focused,
        });
        self
    }

    pub fn with_field(mut self, custom_id: &str, value: &str) -> Self {
        self.fields.insert(custom_id.to_string(), value.to_string());
        self
    }

    pub fn in_channel(mut self, channel_id: u64, guild_id: Option<u64>) -> Self {
        self.channel_id = channel_id;
        self.guild_id = guild_id;
        self
    }
}

/// The calls available for answering a single interaction
///
/// Implemented over serenity in [`crate::gateway`]; the response adapter in
/// [`crate::core::response`] picks which one to use.
#[async_trait]
pub trait InteractionResponder: Send + Sync {
    /// Initial reply to the interaction
    async fn reply(&self, payload: &ResponsePayload) -> Result<()>;

    /// Acknowledge now, answer later through [`Self::edit_original`]
    async fn defer(&self, ephemeral: bool) -> Result<()>;

    /// Replace the deferred (or initial) reply
    async fn edit_original(&self, payload: &ResponsePayload) -> Result<()>;

    /// Additional message after the interaction was answered
    async fn followup(&self, payload: &ResponsePayload) -> Result<()>;

    /// Autocomplete suggestions
    async fn respond_choices(&self, choices: &[AutocompleteChoice]) -> Result<()>;
}

/// Everything a handler gets to see about the interaction it serves
pub struct InteractionContext {
    pub data: InteractionData,
    pub session: Arc<Session>,
    /// Correlates log lines of one interaction
    pub trace_id: Uuid,
    pub(crate) responder: Arc<dyn InteractionResponder>,
    pub(crate) response_state: Mutex<ResponseState>,
}

impl InteractionContext {
    pub fn new(
        data: InteractionData,
        session: Arc<Session>,
        responder: Arc<dyn InteractionResponder>,
    ) -> Self {
        Self {
            data,
            session,
            trace_id: Uuid::new_v4(),
            responder,
            response_state: Mutex::new(ResponseState::Unanswered),
        }
    }

    pub fn kind(&self) -> InteractionKind {
        self.data.kind
    }

    pub fn user_id(&self) -> u64 {
        self.data.user_id
    }

    pub fn channel_id(&self) -> u64 {
        self.data.channel_id
    }

    pub fn command_name(&self) -> Option<&str> {
        self.data.command_name.as_deref()
    }

    pub fn custom_id(&self) -> Option<&str> {
        self.data.custom_id.as_deref()
    }

    fn option(&self, name: &str) -> Option<&Value> {
        self.data
            .options
            .iter()
            .find(|opt| opt.name == name)
            .and_then(|opt| opt.value.as_ref())
    }

    pub fn string_option(&self, name: &str) -> Option<&str> {
        self.option(name).and_then(|v| v.as_str())
    }

    pub fn integer_option(&self, name: &str) -> Option<i64> {
        self.option(name).and_then(|v| v.as_i64())
    }

    /// Current text of the option being autocompleted
    pub fn focused_value(&self) -> Option<&str> {
        self.data
            .options
            .iter()
            .find(|opt| opt.focused)
            .and_then(|opt| opt.value.as_ref())
            .and_then(|v| v.as_str())
    }

    /// Value of a modal text input
    pub fn field(&self, custom_id: &str) -> Option<&str> {
        self.data.fields.get(custom_id).map(String::as_str)
    }

    /// Values picked in a select menu
    pub fn values(&self) -> &[String] {
        &self.data.values
    }

    pub async fn state(&self) -> ResponseState {
        *self.response_state.lock().await
    }

    /// Acknowledge the interaction so the handler may take longer than
    /// Discord's initial response window. No-op once answered or deferred.
    pub async fn defer(&self, ephemeral: bool) -> Result<()> {
        let mut state = self.response_state.lock().await;
        if *state == ResponseState::Unanswered {
            self.responder.defer(ephemeral).await?;
            *state = ResponseState::Deferred { ephemeral };
        }
        Ok(())
    }

    /// Send suggestions for an autocomplete interaction
    pub(crate) async fn respond_choices(&self, choices: &[AutocompleteChoice]) -> Result<()> {
        self.responder.respond_choices(choices).await
    }
}
