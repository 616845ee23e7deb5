//! One assistant conversation.
//!
//! A turn is split in two so that callers driving the request elsewhere (for
//! example on a blocking pool) can still keep the busy flag honest:
//! [`ChatSession::begin_turn`] records the user message and returns the
//! payload to send, [`ChatSession::finish_turn`] records the outcome.
//! [`ChatSession::submit`] does both around a blocking gateway call.

use tracing::debug;

use crate::assistant::AssistantGateway;
use crate::config;
use crate::error::{Result, TcgpError};
use crate::models::{ApiMessage, ChatContextData, ChatMessage, ChatResponse};
use crate::prompt;

/// A prepared request: truncated history ending with the new user turn.
#[derive(Debug, Clone)]
pub struct PendingTurn {
    pub messages: Vec<ApiMessage>,
    pub system_prompt: String,
}

#[derive(Debug, Clone)]
pub struct ChatSession {
    messages: Vec<ChatMessage>,
    is_loading: bool,
    error: Option<String>,
    history_limit: usize,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new(config::DEFAULT_HISTORY_LIMIT)
    }
}

impl ChatSession {
    /// Empty session that replays at most `history_limit` earlier messages.
    pub fn new(history_limit: usize) -> Self {
        Self {
            messages: Vec::new(),
            is_loading: false,
            error: None,
            history_limit,
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Message of the last failed turn, if not yet dismissed.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn history_limit(&self) -> usize {
        self.history_limit
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    /// Drop the whole conversation.
    pub fn clear(&mut self) {
        self.messages.clear();
        self.error = None;
    }

    /// The last `history_limit` messages in wire form.
    pub fn recent_history(&self) -> Vec<ApiMessage> {
        let start = self.messages.len().saturating_sub(self.history_limit);
        self.messages[start..].iter().map(ChatMessage::to_api).collect()
    }

    /// Send `text` and record the reply.
    ///
    /// Errors from the gateway are stored in [`error`](Self::error) as well as
    /// returned; the user message stays in the conversation so it can be sent
    /// again.
    pub fn submit(
        &mut self,
        gateway: &AssistantGateway,
        text: &str,
        context: &ChatContextData,
    ) -> Result<&ChatMessage> {
        let turn = self.begin_turn(text, context)?;
        let outcome = gateway.send(&turn.messages, &turn.system_prompt);
        self.finish_turn(outcome)
    }

    /// Record the user message and build the request for it.
    ///
    /// Fails with [`TcgpError::InvalidArgument`] for blank input and with
    /// [`TcgpError::Busy`] while another turn is in flight.
    pub fn begin_turn(&mut self, text: &str, context: &ChatContextData) -> Result<PendingTurn> {
        let text = text.trim();
        if text.is_empty() {
            return Err(TcgpError::InvalidArgument("message is empty".into()));
        }
        if self.is_loading {
            return Err(TcgpError::Busy);
        }

        let mut messages = self.recent_history();
        let user = ChatMessage::user(text);
        messages.push(user.to_api());
        self.messages.push(user);
        self.is_loading = true;
        self.error = None;

        debug!(turns = messages.len(), "chat turn started");
        Ok(PendingTurn {
            messages,
            system_prompt: prompt::build_system_prompt(context),
        })
    }

    /// Record the outcome of the turn started by [`begin_turn`](Self::begin_turn).
    pub fn finish_turn(&mut self, outcome: Result<ChatResponse>) -> Result<&ChatMessage> {
        self.is_loading = false;
        match outcome {
            Ok(response) => {
                let reply = ChatMessage::assistant(response.text, response.filter_action);
                self.messages.push(reply);
                let last = self.messages.len() - 1;
                Ok(&self.messages[last])
            }
            Err(e) => {
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }
}
