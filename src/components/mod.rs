//! # Component System
//!
//! Handlers for routed buttons, selects and modals, resolved by the key
//! embedded in the component's custom id (see [`crate::custom_id`]).
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false

pub mod handler;
pub mod handlers;
pub mod registry;

pub use handler::{ComponentFactory, ComponentHandler};
pub use registry::ComponentRegistry;
