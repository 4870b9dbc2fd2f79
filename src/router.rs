//! # Interaction Router
//!
//! Stateless dispatch of one interaction at a time, keyed on its type:
//!
//! - command: look up the handler by name, run it contained, send its reply
//! - autocomplete: look up the handler by name, send its suggestions
//! - component / modal submit: decode the routed custom id, check ownership,
//!   resolve the component handler by key, run it contained, send its reply
//! - anything else: ignore
//!
//! Routing misses are silent. Handler failures are answered with a generic
//! ephemeral error embed and then returned to the caller so the process-level
//! sink still sees them. Autocomplete failures are returned as-is. A contained
//! panic is still reported by the process panic hook before it is caught.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

use anyhow::{anyhow, Result};
use futures_util::FutureExt;
use log::{debug, warn};
use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;

use crate::commands::CommandRegistry;
use crate::components::ComponentRegistry;
use crate::core::embeds::{error_embed, COMMAND_ERROR_DESCRIPTION, COMPONENT_ERROR_DESCRIPTION};
use crate::core::response::{respond, Reply, ResponsePayload};
use crate::custom_id;
use crate::interaction::{InteractionContext, InteractionKind};

/// Why an interaction was dropped without a response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoutingMiss {
    UnknownCommand,
    /// Component custom id without the routing sentinel
    NotRouted,
    /// Component owned by another user
    NotOwner,
    UnknownComponent,
    UnknownInteraction,
}

/// How an interaction was handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    Ignored(RoutingMiss),
    /// Handler ran and returned nothing to send
    Silent,
    Responded,
}

pub struct InteractionRouter {
    commands: CommandRegistry,
    components: ComponentRegistry,
}

impl InteractionRouter {
    pub fn new(commands: CommandRegistry, components: ComponentRegistry) -> Self {
        Self {
            commands,
            components,
        }
    }

    pub fn commands(&self) -> &CommandRegistry {
        &self.commands
    }

    /// Route one interaction. An `Err` is a handler or autocomplete failure
    /// meant for the process-wide error sink; the user has already been
    /// notified where possible.
    pub async fn dispatch(&self, ctx: &InteractionContext) -> Result<Dispatch> {
        let outcome = match ctx.kind() {
            InteractionKind::Command => self.dispatch_command(ctx).await,
            InteractionKind::Autocomplete => self.dispatch_autocomplete(ctx).await,
            InteractionKind::Component | InteractionKind::ModalSubmit => {
                self.dispatch_component(ctx).await
            }
            InteractionKind::Unknown => Ok(Dispatch::Ignored(RoutingMiss::UnknownInteraction)),
        };

        if let Ok(Dispatch::Ignored(miss)) = &outcome {
            debug!(
                "[{}] Ignored {:?} interaction from {}: {miss:?}",
                ctx.trace_id,
                ctx.kind(),
                ctx.user_id()
            );
        }
        outcome
    }

    async fn dispatch_command(&self, ctx: &InteractionContext) -> Result<Dispatch> {
        let Some(command) = ctx.command_name().and_then(|name| self.commands.get(name)) else {
            return Ok(Dispatch::Ignored(RoutingMiss::UnknownCommand));
        };

        debug!(
            "[{}] /{} from user {}",
            ctx.trace_id,
            ctx.command_name().unwrap_or_default(),
            ctx.user_id()
        );
        contained(ctx, COMMAND_ERROR_DESCRIPTION, command.execute(ctx)).await
    }

    async fn dispatch_autocomplete(&self, ctx: &InteractionContext) -> Result<Dispatch> {
        let Some(command) = ctx.command_name().and_then(|name| self.commands.get(name)) else {
            return Ok(Dispatch::Ignored(RoutingMiss::UnknownCommand));
        };

        match command.autocomplete(ctx).await?.into_choices() {
            Some(choices) => {
                ctx.respond_choices(&choices).await?;
                Ok(Dispatch::Responded)
            }
            None => Ok(Dispatch::Silent),
        }
    }

    async fn dispatch_component(&self, ctx: &InteractionContext) -> Result<Dispatch> {
        let Some(routed) = ctx.custom_id().and_then(custom_id::decode) else {
            return Ok(Dispatch::Ignored(RoutingMiss::NotRouted));
        };
        if !routed.is_actionable_by(ctx.user_id()) {
            return Ok(Dispatch::Ignored(RoutingMiss::NotOwner));
        }
        let Some(handler) = self.components.resolve(&routed.key) else {
            return Ok(Dispatch::Ignored(RoutingMiss::UnknownComponent));
        };

        debug!(
            "[{}] Component '{}' ({} args) from user {}",
            ctx.trace_id,
            routed.key,
            routed.args.len(),
            ctx.user_id()
        );
        contained(ctx, COMPONENT_ERROR_DESCRIPTION, handler.handle(ctx, &routed.args)).await
    }
}

/// Run a handler and deliver its reply. On any failure (error or panic, in
/// the handler or while sending) try once to show the user a generic error
/// embed, then return the original failure.
async fn contained<F>(ctx: &InteractionContext, error_description: &str, invocation: F) -> Result<Dispatch>
where
    F: Future<Output = Result<Reply>>,
{
    let outcome = match AssertUnwindSafe(invocation).catch_unwind().await {
        Ok(Ok(reply)) => deliver(ctx, reply).await,
        Ok(Err(error)) => Err(error),
        Err(panic) => Err(anyhow!("handler panicked: {}", panic_message(panic.as_ref()))),
    };

    if outcome.is_err() {
        let notice = ResponsePayload::embed(error_embed(error_description)).ephemeral();
        if let Err(send_error) = respond(ctx, notice).await {
            warn!(
                "[{}] Could not deliver error notice: {send_error:#}",
                ctx.trace_id
            );
        }
    }
    outcome
}

async fn deliver(ctx: &InteractionContext, reply: Reply) -> Result<Dispatch> {
    match reply.into_payload() {
        Some(payload) => {
            respond(ctx, payload).await?;
            Ok(Dispatch::Responded)
        }
        None => Ok(Dispatch::Silent),
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> &str {
    if let Some(message) = panic.downcast_ref::<&str>() {
        *message
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.as_str()
    } else {
        "non-string panic payload"
    }
}
