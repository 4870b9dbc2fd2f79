//! Embed payloads for Discord responses
//!
//! Handlers describe embeds as plain data; the gateway turns them into
//! serenity builders when the response is sent.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.0.0: Embed payload, error embed and serenity conversion

use serde::{Deserialize, Serialize};
use serenity::builder::CreateEmbed;

use crate::core::response::truncate_for_embed;

/// Discord's standard red (`Colors.Red`)
pub const ERROR_COLOR: u32 = 0xED4245;
/// Accent used for informational embeds
pub const INFO_COLOR: u32 = 0x5865F2;

pub const COMMAND_ERROR_DESCRIPTION: &str = "An error occurred executing this command.";
pub const COMPONENT_ERROR_DESCRIPTION: &str = "An error occurred with this interaction.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    #[serde(default)]
    pub inline: bool,
}

/// A single embed in a response
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<EmbedField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footer: Option<String>,
}

impl EmbedPayload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn color(mut self, color: u32) -> Self {
        self.color = Some(color);
        self
    }

    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>, inline: bool) -> Self {
        self.fields.push(EmbedField {
            name: name.into(),
            value: value.into(),
            inline,
        });
        self
    }

    pub fn footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = Some(footer.into());
        self
    }
}

/// The generic embed shown when a handler fails
pub fn error_embed(description: &str) -> EmbedPayload {
    EmbedPayload::new()
        .title("Error")
        .description(description)
        .color(ERROR_COLOR)
}

impl From<&EmbedPayload> for CreateEmbed {
    fn from(payload: &EmbedPayload) -> Self {
        let mut embed = CreateEmbed::default();
        if let Some(title) = &payload.title {
            embed.title(title);
        }
        if let Some(description) = &payload.description {
            embed.description(truncate_for_embed(description));
        }
        if let Some(color) = payload.color {
            embed.color(color);
        }
        for field in &payload.fields {
            embed.field(&field.name, &field.value, field.inline);
        }
        if let Some(footer) = &payload.footer {
            embed.footer(|f| f.text(footer));
        }
        embed
    }
}
