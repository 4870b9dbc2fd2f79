// Core layer - configuration, embeds and the response adapter
pub mod core;

// Interaction model and routing
pub mod custom_id;
pub mod interaction;
pub mod router;
pub mod session;

// Handler sets
pub mod commands;
pub mod components;

// Serenity bindings for the seams above
pub mod gateway;

#[cfg(test)]
mod testing;

pub use core::Config;
pub use router::{Dispatch, InteractionRouter, RoutingMiss};
