//! # Serenity Gateway Adapters
//!
//! Binds the core to serenity: the HTTP-backed [`Platform`], the
//! per-interaction [`InteractionResponder`], and conversion of gateway
//! payloads into [`InteractionData`] / [`InboundMessage`].
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serenity::builder::{
    CreateComponents, CreateEmbed, CreateInteractionResponseData,
    CreateInteractionResponseFollowup, EditInteractionResponse,
};
use serenity::http::Http;
use serenity::model::application::command::Command;
use serenity::model::application::component::{ActionRowComponent, ButtonStyle as SerenityButtonStyle};
use serenity::model::application::interaction::application_command::{
    ApplicationCommandInteraction, CommandDataOption,
};
use serenity::model::application::interaction::autocomplete::AutocompleteInteraction;
use serenity::model::application::interaction::message_component::MessageComponentInteraction;
use serenity::model::application::interaction::modal::ModalSubmitInteraction;
use serenity::model::application::interaction::{Interaction, InteractionResponseType};
use serenity::model::channel::Message;
use serenity::model::gateway::Activity;
use serenity::model::id::{ChannelId, MessageId};
use serenity::model::user::OnlineStatus;
use std::sync::Arc;

use crate::commands::CommandDescriptor;
use crate::core::response::{AutocompleteChoice, Button, ButtonStyle, ResponsePayload};
use crate::interaction::{CommandOption, InteractionData, InteractionResponder};
use crate::session::{GuildSummary, InboundMessage, Platform};

/// Discord allows five buttons per action row
const BUTTONS_PER_ROW: usize = 5;

/// What the bot is shown as listening to
pub const LISTENING_TO: &str = "your inquiries";

/// Presence sent when the gateway connection is identified
pub fn presence() -> (Activity, OnlineStatus) {
    (Activity::listening(LISTENING_TO), OnlineStatus::Online)
}

/// Session-level calls over serenity's HTTP client
pub struct SerenityPlatform {
    http: Arc<Http>,
}

impl SerenityPlatform {
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }
}

#[async_trait]
impl Platform for SerenityPlatform {
    async fn fetch_guild(&self, guild_id: u64) -> Result<GuildSummary> {
        let guild = self.http.get_guild(guild_id).await?;
        Ok(GuildSummary {
            id: guild.id.0,
            name: guild.name,
        })
    }

    async fn set_commands(&self, commands: &[CommandDescriptor]) -> Result<()> {
        Command::set_global_application_commands(&self.http, |builder| {
            for command in commands {
                builder.add_application_command(command.schema.clone());
            }
            builder
        })
        .await?;
        Ok(())
    }

    async fn delete_message(&self, channel_id: u64, message_id: u64) -> Result<()> {
        ChannelId(channel_id)
            .delete_message(&self.http, MessageId(message_id))
            .await?;
        Ok(())
    }
}

/// A serenity interaction the router knows how to answer
pub enum SerenityInteraction {
    Command(ApplicationCommandInteraction),
    Autocomplete(AutocompleteInteraction),
    Component(MessageComponentInteraction),
    Modal(ModalSubmitInteraction),
}

/// Answers one interaction through serenity
pub struct SerenityResponder {
    http: Arc<Http>,
    interaction: SerenityInteraction,
}

impl SerenityResponder {
    pub fn new(http: Arc<Http>, interaction: SerenityInteraction) -> Self {
        Self { http, interaction }
    }
}

/// Run `$body` against whichever message-capable interaction this is.
/// Autocomplete interactions can only answer with choices.
macro_rules! with_message_interaction {
    ($responder:expr, |$interaction:ident| $body:expr) => {
        match &$responder.interaction {
            SerenityInteraction::Command($interaction) => $body,
            SerenityInteraction::Component($interaction) => $body,
            SerenityInteraction::Modal($interaction) => $body,
            SerenityInteraction::Autocomplete(_) => {
                return Err(anyhow!("autocomplete interactions can only answer with choices"))
            }
        }
    };
}

#[async_trait]
impl InteractionResponder for SerenityResponder {
    async fn reply(&self, payload: &ResponsePayload) -> Result<()> {
        with_message_interaction!(self, |interaction| {
            interaction
                .create_interaction_response(&self.http, |response| {
                    response
                        .kind(InteractionResponseType::ChannelMessageWithSource)
                        .interaction_response_data(|data| fill_response_data(data, payload))
                })
                .await?
        });
        Ok(())
    }

    async fn defer(&self, ephemeral: bool) -> Result<()> {
        with_message_interaction!(self, |interaction| {
            interaction
                .create_interaction_response(&self.http, |response| {
                    response
                        .kind(InteractionResponseType::DeferredChannelMessageWithSource)
                        .interaction_response_data(|data| data.ephemeral(ephemeral))
                })
                .await?
        });
        Ok(())
    }

    async fn edit_original(&self, payload: &ResponsePayload) -> Result<()> {
        with_message_interaction!(self, |interaction| {
            interaction
                .edit_original_interaction_response(&self.http, |edit| fill_edit(edit, payload))
                .await?
        });
        Ok(())
    }

    async fn followup(&self, payload: &ResponsePayload) -> Result<()> {
        with_message_interaction!(self, |interaction| {
            interaction
                .create_followup_message(&self.http, |followup| fill_followup(followup, payload))
                .await?
        });
        Ok(())
    }

    async fn respond_choices(&self, choices: &[AutocompleteChoice]) -> Result<()> {
        let SerenityInteraction::Autocomplete(autocomplete) = &self.interaction else {
            return Err(anyhow!("only autocomplete interactions answer with choices"));
        };
        autocomplete
            .create_autocomplete_response(&self.http, |response| {
                for choice in choices {
                    response.add_string_choice(&choice.name, &choice.value);
                }
                response
            })
            .await?;
        Ok(())
    }
}

fn fill_response_data<'a, 'b>(
    data: &'b mut CreateInteractionResponseData<'a>,
    payload: &ResponsePayload,
) -> &'b mut CreateInteractionResponseData<'a> {
    if let Some(content) = &payload.content {
        data.content(content);
    }
    for embed in &payload.embeds {
        data.add_embed(CreateEmbed::from(embed));
    }
    if !payload.buttons.is_empty() {
        data.components(|c| {
            *c = action_rows(&payload.buttons);
            c
        });
    }
    data.ephemeral(payload.ephemeral)
}

fn fill_followup<'a, 'b>(
    followup: &'b mut CreateInteractionResponseFollowup<'a>,
    payload: &ResponsePayload,
) -> &'b mut CreateInteractionResponseFollowup<'a> {
    if let Some(content) = &payload.content {
        followup.content(content);
    }
    for embed in &payload.embeds {
        followup.add_embed(CreateEmbed::from(embed));
    }
    if !payload.buttons.is_empty() {
        followup.components(|c| {
            *c = action_rows(&payload.buttons);
            c
        });
    }
    followup.ephemeral(payload.ephemeral)
}

// Ephemerality of an edited reply is fixed when it was deferred.
fn fill_edit<'a>(
    edit: &'a mut EditInteractionResponse,
    payload: &ResponsePayload,
) -> &'a mut EditInteractionResponse {
    if let Some(content) = &payload.content {
        edit.content(content);
    }
    for embed in &payload.embeds {
        edit.add_embed(CreateEmbed::from(embed));
    }
    if !payload.buttons.is_empty() {
        edit.components(|c| {
            *c = action_rows(&payload.buttons);
            c
        });
    }
    edit
}

fn action_rows(buttons: &[Button]) -> CreateComponents {
    let mut components = CreateComponents::default();
    for row_buttons in buttons.chunks(BUTTONS_PER_ROW) {
        components.create_action_row(|row| {
            for button in row_buttons {
                row.create_button(|btn| {
                    btn.custom_id(&button.custom_id)
                        .label(&button.label)
                        .style(button_style(button.style))
                });
            }
            row
        });
    }
    components
}

fn button_style(style: ButtonStyle) -> SerenityButtonStyle {
    match style {
        ButtonStyle::Primary => SerenityButtonStyle::Primary,
        ButtonStyle::Secondary => SerenityButtonStyle::Secondary,
        ButtonStyle::Success => SerenityButtonStyle::Success,
        ButtonStyle::Danger => SerenityButtonStyle::Danger,
    }
}

/// Split a gateway interaction into routable data and the handle used to
/// answer it. Interaction types the router does not know have no handle.
pub fn split_interaction(interaction: Interaction) -> (InteractionData, Option<SerenityInteraction>) {
    match interaction {
        Interaction::ApplicationCommand(command) => {
            let mut data = InteractionData::command(&command.data.name, command.user.id.0)
                .in_channel(command.channel_id.0, command.guild_id.map(|g| g.0));
            data.options = flatten_options(&command.data.options);
            (data, Some(SerenityInteraction::Command(command)))
        }
        Interaction::Autocomplete(autocomplete) => {
            let mut data = InteractionData::autocomplete(&autocomplete.data.name, autocomplete.user.id.0)
                .in_channel(autocomplete.channel_id.0, autocomplete.guild_id.map(|g| g.0));
            data.options = flatten_options(&autocomplete.data.options);
            (data, Some(SerenityInteraction::Autocomplete(autocomplete)))
        }
        Interaction::MessageComponent(component) => {
            let mut data = InteractionData::component(&component.data.custom_id, component.user.id.0)
                .in_channel(component.channel_id.0, component.guild_id.map(|g| g.0));
            data.values = component.data.values.clone();
            (data, Some(SerenityInteraction::Component(component)))
        }
        Interaction::ModalSubmit(modal) => {
            let mut data = InteractionData::modal_submit(&modal.data.custom_id, modal.user.id.0)
                .in_channel(modal.channel_id.0, modal.guild_id.map(|g| g.0));
            for row in &modal.data.components {
                for component in &row.components {
                    if let ActionRowComponent::InputText(input) = component {
                        data.fields.insert(input.custom_id.clone(), input.value.clone());
                    }
                }
            }
            (data, Some(SerenityInteraction::Modal(modal)))
        }
        _ => (InteractionData::unknown(0), None),
    }
}

/// Subcommand groups nest their options; handlers only see the leaves
fn flatten_options(options: &[CommandDataOption]) -> Vec<CommandOption> {
    let mut flat = Vec::new();
    for option in options {
        if option.options.is_empty() {
            flat.push(CommandOption {
                name: option.name.clone(),
                value: option.value.clone(),
                focused: option.focused,
            });
        } else {
            flat.extend(flatten_options(&option.options));
        }
    }
    flat
}

impl From<&Message> for InboundMessage {
    fn from(message: &Message) -> Self {
        InboundMessage {
            id: message.id.0,
            channel_id: message.channel_id.0,
            author_id: message.author.id.0,
        }
    }
}
