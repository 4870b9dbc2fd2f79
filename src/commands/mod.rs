//! # Command System
//!
//! Slash command handlers, their loader and the name-keyed dispatch table.
//!
//! - **Version**: 3.0.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 3.0.0: Handlers return replies; registry doubles as the command loader
//! - 1.0.0: Initial modular command structure

pub mod handler;
pub mod handlers;
pub mod registry;

pub use handler::SlashCommand;
pub use registry::{CommandDescriptor, CommandRegistry, LoadError};
