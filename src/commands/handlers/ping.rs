//! /ping

use anyhow::Result;
use async_trait::async_trait;
use serenity::builder::CreateApplicationCommand;

use crate::commands::handler::SlashCommand;
use crate::core::response::Reply;
use crate::interaction::InteractionContext;

pub struct PingCommand;

#[async_trait]
impl SlashCommand for PingCommand {
    fn definition(&self) -> CreateApplicationCommand {
        CreateApplicationCommand::default()
            .name("ping")
            .description("Check that the bot is responsive")
            .to_owned()
    }

    async fn execute(&self, _ctx: &InteractionContext) -> Result<Reply> {
        Ok(Reply::text("Pong!"))
    }
}
