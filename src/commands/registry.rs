//! Command handler registry
//!
//! Loads the handler set once at startup into the published descriptor list
//! and the name-keyed dispatch table. A malformed definition aborts loading.
//!
//! - **Version**: 2.0.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 2.0.0: Validating loader producing descriptors alongside the dispatch table
//! - 1.0.0: Initial implementation for handler dispatch

use regex::Regex;
use serde_json::Value;
use serenity::builder::CreateApplicationCommand;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};
use thiserror::Error;

use super::handler::SlashCommand;

/// Discord's `type` value for chat input (slash) commands
const CHAT_INPUT_TYPE: u64 = 1;

/// Reasons the handler set cannot be loaded
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LoadError {
    #[error("command #{0} has no name")]
    MissingName(usize),
    #[error("command name {0:?} is not a valid slash command name")]
    InvalidName(String),
    #[error("command {0:?} has no description")]
    MissingDescription(String),
    #[error("command {0:?} is defined more than once")]
    DuplicateCommand(String),
    #[error("component key {0:?} must be non-empty and free of ':'")]
    InvalidComponentKey(String),
    #[error("component {0:?} is registered more than once")]
    DuplicateComponent(String),
}

fn slash_name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[-_\p{Ll}\p{N}]{1,32}$").unwrap())
}

/// A command definition as published to Discord
#[derive(Clone)]
pub struct CommandDescriptor {
    pub name: String,
    pub schema: CreateApplicationCommand,
}

impl CommandDescriptor {
    fn from_definition(index: usize, schema: CreateApplicationCommand) -> Result<Self, LoadError> {
        let name = schema
            .0
            .get("name")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or(LoadError::MissingName(index))?;

        let is_slash = schema
            .0
            .get("type")
            .and_then(Value::as_u64)
            .map_or(true, |kind| kind == CHAT_INPUT_TYPE);

        if is_slash {
            if !slash_name_pattern().is_match(&name) {
                return Err(LoadError::InvalidName(name));
            }
            let has_description = schema
                .0
                .get("description")
                .and_then(Value::as_str)
                .is_some_and(|d| !d.is_empty());
            if !has_description {
                return Err(LoadError::MissingDescription(name));
            }
        } else if name.is_empty() || name.chars().count() > 32 {
            return Err(LoadError::InvalidName(name));
        }

        Ok(Self { name, schema })
    }
}

/// Registry mapping command names to handlers
///
/// # Example
///
/// ```ignore
/// let registry = CommandRegistry::load(create_all_commands())?;
/// platform.set_commands(registry.descriptors()).await?;
///
/// if let Some(command) = registry.get("ping") {
///     let reply = command.execute(&ctx).await?;
/// }
/// ```
#[derive(Clone, Default)]
pub struct CommandRegistry {
    descriptors: Vec<CommandDescriptor>,
    handlers: HashMap<String, Arc<dyn SlashCommand>>,
}

impl CommandRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and register every command, failing on the first bad one
    pub fn load(commands: Vec<Arc<dyn SlashCommand>>) -> Result<Self, LoadError> {
        let mut registry = Self::new();
        for (index, command) in commands.into_iter().enumerate() {
            let descriptor = CommandDescriptor::from_definition(index, command.definition())?;
            if registry.handlers.contains_key(&descriptor.name) {
                return Err(LoadError::DuplicateCommand(descriptor.name));
            }
            registry
                .handlers
                .insert(descriptor.name.clone(), command);
            registry.descriptors.push(descriptor);
        }
        Ok(registry)
    }

    /// Definitions to publish, in load order
    pub fn descriptors(&self) -> &[CommandDescriptor] {
        &self.descriptors
    }

    /// Get handler for a command name
    pub fn get(&self, name: &str) -> Option<Arc<dyn SlashCommand>> {
        self.handlers.get(name).cloned()
    }

    /// Check if a command is registered
    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Registered command names, in load order
    pub fn command_names(&self) -> impl Iterator<Item = &str> {
        self.descriptors.iter().map(|d| d.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::response::Reply;
    use crate::interaction::InteractionContext;
    use anyhow::Result;
    use async_trait::async_trait;
    use serenity::model::application::command::CommandType;

    struct MockCommand {
        definition: CreateApplicationCommand,
    }

    impl MockCommand {
        fn named(name: &str) -> Arc<dyn SlashCommand> {
            Arc::new(Self {
                definition: CreateApplicationCommand::default()
                    .name(name)
                    .description("test command")
                    .to_owned(),
            })
        }

        fn with_definition(definition: CreateApplicationCommand) -> Arc<dyn SlashCommand> {
            Arc::new(Self { definition })
        }
    }

    #[async_trait]
    impl SlashCommand for MockCommand {
        fn definition(&self) -> CreateApplicationCommand {
            self.definition.clone()
        }

        async fn execute(&self, _ctx: &InteractionContext) -> Result<Reply> {
            Ok(Reply::Empty)
        }
    }

    #[test]
    fn test_registry_new_is_empty() {
        let registry = CommandRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
        assert!(registry.descriptors().is_empty());
    }

    #[test]
    fn test_load_builds_descriptors_and_table() {
        let registry =
            CommandRegistry::load(vec![MockCommand::named("ping"), MockCommand::named("pick")])
                .unwrap();

        assert_eq!(registry.len(), 2);
        assert!(registry.contains("ping"));
        assert!(registry.get("pick").is_some());
        assert!(registry.get("missing").is_none());
        assert_eq!(
            registry.command_names().collect::<Vec<_>>(),
            vec!["ping", "pick"]
        );
    }

    #[test]
    fn test_load_rejects_duplicates() {
        let err = CommandRegistry::load(vec![MockCommand::named("ping"), MockCommand::named("ping")])
            .err()
            .unwrap();
        assert_eq!(err, LoadError::DuplicateCommand("ping".to_string()));
    }

    #[test]
    fn test_load_rejects_missing_name() {
        let nameless = MockCommand::with_definition(
            CreateApplicationCommand::default()
                .description("no name")
                .to_owned(),
        );
        let err = CommandRegistry::load(vec![MockCommand::named("ok"), nameless])
            .err()
            .unwrap();
        assert_eq!(err, LoadError::MissingName(1));
    }

    #[test]
    fn test_load_rejects_invalid_slash_names() {
        let long = "x".repeat(33);
        for name in ["Ping", "has space", "", long.as_str()] {
            let err = CommandRegistry::load(vec![MockCommand::named(name)])
                .err()
                .unwrap();
            assert_eq!(err, LoadError::InvalidName(name.to_string()));
        }
    }

    #[test]
    fn test_load_rejects_missing_description() {
        let command = MockCommand::with_definition(CreateApplicationCommand::default().name("bare").to_owned());
        let err = CommandRegistry::load(vec![command]).err().unwrap();
        assert_eq!(err, LoadError::MissingDescription("bare".to_string()));
    }

    #[test]
    fn test_context_menu_names_may_contain_spaces() {
        let command = MockCommand::with_definition(
            CreateApplicationCommand::default()
                .name("Report Message")
                .kind(CommandType::Message)
                .to_owned(),
        );
        let registry = CommandRegistry::load(vec![command]).unwrap();
        assert!(registry.contains("Report Message"));
    }
}
