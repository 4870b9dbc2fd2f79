//! `confirm:<topic>` - confirmation button rendered by /pick

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use log::info;
use std::sync::Arc;

use crate::commands::handlers::pick::is_known_topic;
use crate::components::handler::ComponentHandler;
use crate::core::response::{Reply, ResponsePayload};
use crate::interaction::InteractionContext;

pub struct ConfirmComponent;

pub fn create() -> Arc<dyn ComponentHandler> {
    Arc::new(ConfirmComponent)
}

#[async_trait]
impl ComponentHandler for ConfirmComponent {
    async fn handle(&self, ctx: &InteractionContext, args: &[String]) -> Result<Reply> {
        let topic = args
            .first()
            .ok_or_else(|| anyhow!("confirm button carries no topic"))?;

        if !is_known_topic(topic) {
            return Ok(ResponsePayload::text(format!("`{topic}` is no longer available."))
                .ephemeral()
                .into());
        }

        info!("[{}] User {} picked topic {topic}", ctx.trace_id, ctx.user_id());
        Ok(Reply::text(format!("You picked **{topic}**.")))
    }
}
