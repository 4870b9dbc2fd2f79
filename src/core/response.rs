//! Handler replies and the response adapter
//!
//! Handlers return a [`Reply`] (or [`Suggestions`] for autocomplete); this
//! module normalizes those values once and decides whether a payload goes out
//! as the initial reply, an edit of a deferred reply, or a follow-up.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.0.0: Reply/Suggestions normalization, state-aware respond()

use anyhow::Result;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::core::embeds::EmbedPayload;
use crate::interaction::{InteractionContext, ResponseState};

/// Discord embed description limit, in characters
pub const EMBED_LIMIT: usize = 4096;
/// Discord message content limit, in characters
pub const MESSAGE_LIMIT: usize = 2000;
/// Discord accepts at most this many autocomplete choices
pub const MAX_AUTOCOMPLETE_CHOICES: usize = 25;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonStyle {
    Primary,
    #[default]
    Secondary,
    Success,
    Danger,
}

/// A button rendered under a response message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Button {
    pub custom_id: String,
    pub label: String,
    #[serde(default)]
    pub style: ButtonStyle,
}

impl Button {
    pub fn new(custom_id: impl Into<String>, label: impl Into<String>, style: ButtonStyle) -> Self {
        Self {
            custom_id: custom_id.into(),
            label: label.into(),
            style,
        }
    }
}

/// Platform-neutral response body
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponsePayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub embeds: Vec<EmbedPayload>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub buttons: Vec<Button>,
    #[serde(default)]
    pub ephemeral: bool,
}

impl ResponsePayload {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::default()
        }
    }

    pub fn embed(embed: EmbedPayload) -> Self {
        Self {
            embeds: vec![embed],
            ..Self::default()
        }
    }

    pub fn ephemeral(mut self) -> Self {
        self.ephemeral = true;
        self
    }

    pub fn button(mut self, button: Button) -> Self {
        self.buttons.push(button);
        self
    }

    /// Clamp content to what Discord accepts
    fn clamped(mut self) -> Self {
        if let Some(content) = self.content.take() {
            self.content = Some(truncate_for_message(&content));
        }
        self
    }
}

/// What a command or component handler produced
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Reply {
    /// Nothing to send; the handler answered on its own or chose silence
    #[default]
    Empty,
    /// Shorthand for a payload with only `content`
    Text(String),
    Structured(ResponsePayload),
}

impl Reply {
    pub fn text(content: impl Into<String>) -> Self {
        Reply::Text(content.into())
    }

    /// Normalize into a payload, or `None` when nothing should be sent.
    ///
    /// An empty string counts as no reply.
    pub fn into_payload(self) -> Option<ResponsePayload> {
        match self {
            Reply::Empty => None,
            Reply::Text(content) if content.is_empty() => None,
            Reply::Text(content) => Some(ResponsePayload::text(content)),
            Reply::Structured(payload) => Some(payload),
        }
    }
}

impl From<&str> for Reply {
    fn from(content: &str) -> Self {
        Reply::Text(content.to_string())
    }
}

impl From<String> for Reply {
    fn from(content: String) -> Self {
        Reply::Text(content)
    }
}

impl From<ResponsePayload> for Reply {
    fn from(payload: ResponsePayload) -> Self {
        Reply::Structured(payload)
    }
}

impl From<EmbedPayload> for Reply {
    fn from(embed: EmbedPayload) -> Self {
        Reply::Structured(ResponsePayload::embed(embed))
    }
}

/// A single autocomplete suggestion as sent to Discord
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutocompleteChoice {
    pub name: String,
    pub value: String,
}

/// A suggestion as returned by a handler
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Choice {
    /// Used as both the displayed name and the submitted value
    Text(String),
    Pair { name: String, value: String },
}

impl From<&str> for Choice {
    fn from(value: &str) -> Self {
        Choice::Text(value.to_string())
    }
}

impl From<String> for Choice {
    fn from(value: String) -> Self {
        Choice::Text(value)
    }
}

impl From<Choice> for AutocompleteChoice {
    fn from(choice: Choice) -> Self {
        match choice {
            Choice::Text(value) => AutocompleteChoice {
                name: value.clone(),
                value,
            },
            Choice::Pair { name, value } => AutocompleteChoice { name, value },
        }
    }
}

/// What an autocomplete handler produced
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Suggestions {
    #[default]
    Empty,
    One(Choice),
    Many(Vec<Choice>),
}

impl Suggestions {
    /// Normalize into the choice list to send, or `None` when nothing should be sent
    pub fn into_choices(self) -> Option<Vec<AutocompleteChoice>> {
        let choices = match self {
            Suggestions::Empty => return None,
            Suggestions::One(choice) => vec![choice],
            Suggestions::Many(choices) => choices,
        };
        Some(
            choices
                .into_iter()
                .take(MAX_AUTOCOMPLETE_CHOICES)
                .map(AutocompleteChoice::from)
                .collect(),
        )
    }
}

impl<T: Into<Choice>> From<Vec<T>> for Suggestions {
    fn from(choices: Vec<T>) -> Self {
        Suggestions::Many(choices.into_iter().map(Into::into).collect())
    }
}

/// Send `payload` for the interaction, choosing the call from its response state.
///
/// - unanswered: initial reply
/// - deferred: edit of the deferred original
/// - replied: follow-up message
pub async fn respond(ctx: &InteractionContext, payload: ResponsePayload) -> Result<()> {
    let payload = payload.clamped();
    let mut state = ctx.response_state.lock().await;

    match *state {
        ResponseState::Unanswered => {
            ctx.responder.reply(&payload).await?;
            *state = ResponseState::Replied;
        }
        ResponseState::Deferred { .. } => {
            ctx.responder.edit_original(&payload).await?;
            *state = ResponseState::Replied;
        }
        ResponseState::Replied => {
            ctx.responder.followup(&payload).await?;
        }
    }

    debug!("[{}] Response sent", ctx.trace_id);
    Ok(())
}

/// Truncate text to fit embed limit, adding ellipsis if needed
pub fn truncate_for_embed(text: &str) -> String {
    truncate_with_ellipsis(text, EMBED_LIMIT)
}

/// Truncate text to fit message limit, adding ellipsis if needed
pub fn truncate_for_message(text: &str) -> String {
    truncate_with_ellipsis(text, MESSAGE_LIMIT)
}

// Discord counts limits in characters, not bytes
fn truncate_with_ellipsis(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }
    let kept: String = text.chars().take(limit.saturating_sub(3)).collect();
    format!("{kept}...")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interaction::InteractionData;
    use crate::testing::{context_for, RecordingResponder, Sent};
    use std::sync::Arc;

    #[test]
    fn test_text_reply_becomes_content_only_payload() {
        let payload = Reply::from("done").into_payload().unwrap();
        assert_eq!(payload.content.as_deref(), Some("done"));
        assert!(payload.embeds.is_empty());
        assert!(!payload.ephemeral);
    }

    #[test]
    fn test_empty_replies_send_nothing() {
        assert_eq!(Reply::Empty.into_payload(), None);
        assert_eq!(Reply::text("").into_payload(), None);
    }

    #[test]
    fn test_structured_reply_passes_through() {
        let payload = ResponsePayload::embed(EmbedPayload::new().title("T")).ephemeral();
        assert_eq!(
            Reply::from(payload.clone()).into_payload(),
            Some(payload)
        );
    }

    #[test]
    fn test_string_suggestions_expand_to_name_value_pairs() {
        let choices = Suggestions::from(vec!["a", "b"]).into_choices().unwrap();
        assert_eq!(
            choices,
            vec![
                AutocompleteChoice { name: "a".into(), value: "a".into() },
                AutocompleteChoice { name: "b".into(), value: "b".into() },
            ]
        );
    }

    #[test]
    fn test_single_suggestion_is_wrapped() {
        let choices = Suggestions::One(Choice::Pair {
            name: "Label".into(),
            value: "v".into(),
        })
        .into_choices()
        .unwrap();
        assert_eq!(
            choices,
            vec![AutocompleteChoice { name: "Label".into(), value: "v".into() }]
        );
    }

    #[test]
    fn test_suggestions_capped_at_platform_limit() {
        let many: Vec<String> = (0..40).map(|i| i.to_string()).collect();
        let choices = Suggestions::from(many).into_choices().unwrap();
        assert_eq!(choices.len(), MAX_AUTOCOMPLETE_CHOICES);
        assert_eq!(choices[0].value, "0");
    }

    #[test]
    fn test_empty_suggestions_send_nothing() {
        assert_eq!(Suggestions::Empty.into_choices(), None);
        assert_eq!(
            Suggestions::Many(Vec::new()).into_choices(),
            Some(Vec::new())
        );
    }

    #[test]
    fn test_truncate_for_message_counts_characters() {
        let fits = "é".repeat(1500);
        assert_eq!(truncate_for_message(&fits), fits);

        let exact = "é".repeat(MESSAGE_LIMIT);
        assert_eq!(truncate_for_message(&exact), exact);

        let truncated = truncate_for_message(&"é".repeat(2500));
        assert_eq!(truncated.chars().count(), MESSAGE_LIMIT);
        assert!(truncated.ends_with("..."));
        assert!(truncated.starts_with("ééé"));
    }

    #[test]
    fn test_truncate_for_embed_counts_characters() {
        let fits = "日".repeat(EMBED_LIMIT);
        assert_eq!(truncate_for_embed(&fits), fits);

        let truncated = truncate_for_embed(&"日".repeat(EMBED_LIMIT + 1));
        assert_eq!(truncated.chars().count(), EMBED_LIMIT);
    }

    #[tokio::test]
    async fn test_respond_sends_multibyte_content_verbatim() {
        let responder = Arc::new(RecordingResponder::default());
        let ctx = context_for(InteractionData::command("ping", 1), responder.clone());
        let content = "é".repeat(1500);

        respond(&ctx, ResponsePayload::text(content.clone())).await.unwrap();

        assert_eq!(
            responder.sent().await,
            vec![Sent::Reply(ResponsePayload::text(content))]
        );
    }

    #[tokio::test]
    async fn test_respond_replies_then_follows_up() {
        let responder = Arc::new(RecordingResponder::default());
        let ctx = context_for(InteractionData::command("ping", 1), responder.clone());

        respond(&ctx, ResponsePayload::text("first")).await.unwrap();
        respond(&ctx, ResponsePayload::text("second")).await.unwrap();

        assert_eq!(
            responder.sent().await,
            vec![
                Sent::Reply(ResponsePayload::text("first")),
                Sent::Followup(ResponsePayload::text("second")),
            ]
        );
        assert_eq!(ctx.state().await, ResponseState::Replied);
    }

    #[tokio::test]
    async fn test_respond_edits_deferred_reply() {
        let responder = Arc::new(RecordingResponder::default());
        let ctx = context_for(InteractionData::command("slow", 1), responder.clone());

        ctx.defer(true).await.unwrap();
        respond(&ctx, ResponsePayload::text("late")).await.unwrap();

        assert_eq!(
            responder.sent().await,
            vec![
                Sent::Defer { ephemeral: true },
                Sent::EditOriginal(ResponsePayload::text("late")),
            ]
        );
    }

    #[tokio::test]
    async fn test_respond_truncates_long_content() {
        let responder = Arc::new(RecordingResponder::default());
        let ctx = context_for(InteractionData::command("long", 1), responder.clone());

        respond(&ctx, ResponsePayload::text("x".repeat(5000)))
            .await
            .unwrap();

        match &responder.sent().await[0] {
            Sent::Reply(payload) => {
                assert_eq!(payload.content.as_ref().unwrap().len(), MESSAGE_LIMIT)
            }
            other => panic!("unexpected call: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_failed_reply_leaves_state_unanswered() {
        let responder = Arc::new(RecordingResponder::failing());
        let ctx = context_for(InteractionData::command("ping", 1), responder);

        assert!(respond(&ctx, ResponsePayload::text("x")).await.is_err());
        assert_eq!(ctx.state().await, ResponseState::Unanswered);
    }
}
