//! `dismiss` - acknowledges and closes a prompt for whoever clicks it

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

use crate::components::handler::ComponentHandler;
use crate::core::response::{Reply, ResponsePayload};
use crate::interaction::InteractionContext;

pub struct DismissComponent;

pub fn create() -> Arc<dyn ComponentHandler> {
    Arc::new(DismissComponent)
}

#[async_trait]
impl ComponentHandler for DismissComponent {
    async fn handle(&self, _ctx: &InteractionContext, _args: &[String]) -> Result<Reply> {
        Ok(ResponsePayload::text("Dismissed.").ephemeral().into())
    }
}
