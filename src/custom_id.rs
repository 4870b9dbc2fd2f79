//! # Routed Component Identifiers
//!
//! Buttons, selects and modals that should be routed back to a component
//! handler carry a custom id of the form
//!
//! ```text
//! :<owner id>:<key>:<arg>:<arg>...
//! ```
//!
//! The leading `:` marks the id as routed. An empty owner segment means any
//! user may trigger the component; otherwise only the owner can. `:` is a hard
//! delimiter and is rejected inside segments at encode time.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.0.0: Encode/decode with ownership check

use thiserror::Error;

/// Marks a custom id as routed, and separates its segments
pub const SENTINEL: char = ':';
/// Discord's custom id length limit (characters)
pub const MAX_CUSTOM_ID_LEN: usize = 100;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CustomIdError {
    #[error("component key must not be empty")]
    EmptyKey,
    #[error("{segment} {value:?} contains the ':' delimiter")]
    ContainsDelimiter { segment: &'static str, value: String },
    #[error("custom id is {0} characters long, Discord allows {MAX_CUSTOM_ID_LEN}")]
    TooLong(usize),
}

/// Decoded form of a routed custom id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutedId {
    /// User allowed to trigger the component, `None` for anyone
    pub owner: Option<String>,
    pub key: String,
    pub args: Vec<String>,
}

impl RoutedId {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            owner: None,
            key: key.into(),
            args: Vec::new(),
        }
    }

    pub fn owned_by(mut self, user_id: u64) -> Self {
        self.owner = Some(user_id.to_string());
        self
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Whether `user_id` may trigger this component
    pub fn is_actionable_by(&self, user_id: u64) -> bool {
        match &self.owner {
            Some(owner) => *owner == user_id.to_string(),
            None => true,
        }
    }

    pub fn encode(&self) -> Result<String, CustomIdError> {
        encode(self.owner.as_deref(), &self.key, &self.args)
    }
}

/// Build a routed custom id
pub fn encode<S: AsRef<str>>(
    owner: Option<&str>,
    key: &str,
    args: &[S],
) -> Result<String, CustomIdError> {
    if key.is_empty() {
        return Err(CustomIdError::EmptyKey);
    }

    let owner = owner.unwrap_or("");
    check_segment("owner", owner)?;
    check_segment("key", key)?;
    for arg in args {
        check_segment("argument", arg.as_ref())?;
    }

    let mut id = String::new();
    id.push(SENTINEL);
    id.push_str(owner);
    id.push(SENTINEL);
    id.push_str(key);
    for arg in args {
        id.push(SENTINEL);
        id.push_str(arg.as_ref());
    }

    let len = id.chars().count();
    if len > MAX_CUSTOM_ID_LEN {
        return Err(CustomIdError::TooLong(len));
    }
    Ok(id)
}

fn check_segment(segment: &'static str, value: &str) -> Result<(), CustomIdError> {
    if value.contains(SENTINEL) {
        return Err(CustomIdError::ContainsDelimiter {
            segment,
            value: value.to_string(),
        });
    }
    Ok(())
}

/// Parse a custom id; `None` means it is not routed by this bot.
///
/// A routed id without a key segment decodes with an empty key, which never
/// matches a registered component.
pub fn decode(raw: &str) -> Option<RoutedId> {
    let rest = raw.strip_prefix(SENTINEL)?;
    let mut segments = rest.split(SENTINEL);

    let owner = segments
        .next()
        .filter(|owner| !owner.is_empty())
        .map(str::to_string);
    let key = segments.next().unwrap_or_default().to_string();
    let args = segments.map(str::to_string).collect();

    Some(RoutedId { owner, key, args })
}
