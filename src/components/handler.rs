//! Component handler trait

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

use crate::core::response::Reply;
use crate::interaction::InteractionContext;

/// Trait for routed component handlers
///
/// `args` are the positional segments that followed the key in the custom id,
/// passed through verbatim.
#[async_trait]
pub trait ComponentHandler: Send + Sync {
    async fn handle(&self, ctx: &InteractionContext, args: &[String]) -> Result<Reply>;
}

/// Constructs a handler the first time its key is resolved
pub type ComponentFactory = fn() -> Arc<dyn ComponentHandler>;
