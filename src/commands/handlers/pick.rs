//! /pick - choose a topic, then confirm it with an owner-locked button
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

use anyhow::Result;
use async_trait::async_trait;
use serenity::builder::CreateApplicationCommand;
use serenity::model::application::command::CommandOptionType;

use crate::commands::handler::SlashCommand;
use crate::core::response::{Button, ButtonStyle, Reply, ResponsePayload, Suggestions};
use crate::custom_id::RoutedId;
use crate::interaction::InteractionContext;

/// Topics offered by autocomplete
pub const TOPICS: &[&str] = &[
    "announcements",
    "artifacts",
    "characters",
    "events",
    "guides",
    "lore",
    "off-topic",
    "support",
    "theorycrafting",
    "updates",
];

pub struct PickCommand;

#[async_trait]
impl SlashCommand for PickCommand {
    fn definition(&self) -> CreateApplicationCommand {
        CreateApplicationCommand::default()
            .name("pick")
            .description("Pick a topic to follow")
            .create_option(|option| {
                option
                    .name("topic")
                    .description("The topic to pick")
                    .kind(CommandOptionType::String)
                    .required(true)
                    .set_autocomplete(true)
            })
            .to_owned()
    }

    async fn execute(&self, ctx: &InteractionContext) -> Result<Reply> {
        let topic = ctx.string_option("topic").unwrap_or_default();

        if !is_known_topic(topic) {
            return Ok(ResponsePayload::text(format!("`{topic}` is not a topic I know."))
                .ephemeral()
                .into());
        }

        let confirm = RoutedId::new("confirm")
            .owned_by(ctx.user_id())
            .arg(topic)
            .encode()?;
        let dismiss = RoutedId::new("dismiss").encode()?;

        Ok(ResponsePayload::text(format!("Follow **{topic}**?"))
            .button(Button::new(confirm, "Confirm", ButtonStyle::Success))
            .button(Button::new(dismiss, "Dismiss", ButtonStyle::Secondary))
            .into())
    }

    async fn autocomplete(&self, ctx: &InteractionContext) -> Result<Suggestions> {
        let typed = ctx.focused_value().unwrap_or_default().to_lowercase();
        let matches: Vec<&str> = TOPICS
            .iter()
            .copied()
            .filter(|topic| topic.contains(typed.as_str()))
            .collect();
        Ok(matches.into())
    }
}

pub fn is_known_topic(topic: &str) -> bool {
    TOPICS.contains(&topic)
}
