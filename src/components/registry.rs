//! Component handler registry
//!
//! Keys are registered up front with a constructor; the handler itself is
//! built on first use and cached for every later interaction.

use dashmap::DashMap;
use log::debug;
use std::collections::HashMap;
use std::sync::Arc;

use super::handler::{ComponentFactory, ComponentHandler};
use crate::commands::LoadError;
use crate::custom_id::SENTINEL;

#[derive(Default)]
pub struct ComponentRegistry {
    factories: HashMap<&'static str, ComponentFactory>,
    resolved: DashMap<&'static str, Arc<dyn ComponentHandler>>,
}

impl ComponentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register every `(key, constructor)` pair, failing on the first bad key
    pub fn load(components: Vec<(&'static str, ComponentFactory)>) -> Result<Self, LoadError> {
        let mut registry = Self::new();
        for (key, factory) in components {
            if key.is_empty() || key.contains(SENTINEL) {
                return Err(LoadError::InvalidComponentKey(key.to_string()));
            }
            if registry.factories.insert(key, factory).is_some() {
                return Err(LoadError::DuplicateComponent(key.to_string()));
            }
        }
        Ok(registry)
    }

    /// Handler for `key`, constructing it on first use
    pub fn resolve(&self, key: &str) -> Option<Arc<dyn ComponentHandler>> {
        let (&key, factory) = self.factories.get_key_value(key)?;

        if let Some(handler) = self.resolved.get(key) {
            return Some(Arc::clone(handler.value()));
        }

        let handler = self
            .resolved
            .entry(key)
            .or_insert_with(|| {
                debug!("Constructing component handler '{key}'");
                factory()
            })
            .value()
            .clone();
        Some(handler)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.factories.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}
