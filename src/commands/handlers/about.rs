//! /about - bot status embed
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

use anyhow::Result;
use async_trait::async_trait;
use serenity::builder::CreateApplicationCommand;

use crate::commands::handler::SlashCommand;
use crate::core::embeds::{EmbedPayload, INFO_COLOR};
use crate::core::response::{Reply, ResponsePayload};
use crate::interaction::InteractionContext;

pub struct AboutCommand;

#[async_trait]
impl SlashCommand for AboutCommand {
    fn definition(&self) -> CreateApplicationCommand {
        CreateApplicationCommand::default()
            .name("about")
            .description("Show bot status")
            .to_owned()
    }

    async fn execute(&self, ctx: &InteractionContext) -> Result<Reply> {
        let session = &ctx.session;

        let guild = session
            .guild
            .as_ref()
            .map(|g| g.name.clone())
            .unwrap_or_else(|| "unavailable".to_string());

        let embed = EmbedPayload::new()
            .title("The Akasha System")
            .color(INFO_COLOR)
            .field("Uptime", format_uptime(session.uptime().num_seconds()), true)
            .field("Guild", guild, true)
            .footer(format!(
                "Online since {}",
                session.started_at.format("%Y-%m-%d %H:%M UTC")
            ));

        Ok(ResponsePayload::embed(embed).ephemeral().into())
    }
}

fn format_uptime(total_seconds: i64) -> String {
    let total_seconds = total_seconds.max(0);
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    format!("{hours}h {minutes}m {seconds}s")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interaction::InteractionData;
    use crate::testing::{context_for, RecordingResponder};
    use std::sync::Arc;

    #[test]
    fn test_format_uptime() {
        assert_eq!(format_uptime(0), "0h 0m 0s");
        assert_eq!(format_uptime(3725), "1h 2m 5s");
        assert_eq!(format_uptime(-5), "0h 0m 0s");
    }

    #[tokio::test]
    async fn test_about_reports_degraded_guild() {
        let ctx = context_for(
            InteractionData::command("about", 1),
            Arc::new(RecordingResponder::default()),
        );

        let payload = AboutCommand.execute(&ctx).await.unwrap().into_payload().unwrap();

        assert!(payload.ephemeral);
        let embed = &payload.embeds[0];
        assert_eq!(embed.title.as_deref(), Some("The Akasha System"));
        let guild = embed.fields.iter().find(|f| f.name == "Guild").unwrap();
        assert_eq!(guild.value, "unavailable");
    }
}
