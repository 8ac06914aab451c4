#[cfg(test)]
#[path = "app_state_test.rs"]
mod tests;

use ratatui::prelude::Rect;

use super::clipboard::ClipboardWriter;
use super::BubbleList;
use super::Scroll;
use crate::domain::models::ChatApiError;
use crate::domain::models::ChatReply;
use crate::domain::models::ChatRequest;
use crate::domain::models::Endpoint;
use crate::domain::models::Message;
use crate::domain::models::MessageType;
use crate::domain::models::Role;

pub const FALLBACK_REPLY: &str = "I didn’t get a reply. Try again?";
pub const OFFLINE_WARNING: &str = "⚠️ I couldn’t reach the server. If you just deployed the backend, it may be waking up (free tiers can sleep). Try again in 20–30 seconds.";

/// Shortcuts offered while the conversation is empty, as `(label, question)`.
pub const QUICK_ASKS: [(&str, &str); 2] = [
    ("Ask about S3", "What is Amazon S3?"),
    ("Ask about IAM", "Explain IAM roles with an example"),
];

#[derive(Debug, PartialEq, Eq)]
pub enum IgnoreReason {
    EmptyInput,
    RequestInFlight,
    ConversationStarted,
}

#[derive(Debug, PartialEq, Eq)]
pub enum Submission {
    /// Nothing changed.
    Ignored(IgnoreReason),
    /// The user message was appended and this request must be sent, with the
    /// result handed back through [`AppState::resolve`].
    Pending(ChatRequest),
}

#[derive(Debug, PartialEq, Eq)]
pub enum CopyOutcome {
    Copied,
    NothingToCopy,
    ClipboardUnavailable(String),
}

pub struct AppState {
    pub bubble_list: BubbleList,
    pub composer_focused: bool,
    pub connected: bool,
    pub endpoint: Endpoint,
    pub error: String,
    pub input: String,
    pub last_known_height: u16,
    pub last_known_width: u16,
    pub loading: bool,
    pub messages: Vec<Message>,
    pub notice: Option<String>,
    pub scroll: Scroll,
}

impl AppState {
    pub fn new(endpoint: Endpoint) -> AppState {
        return AppState {
            bubble_list: BubbleList::default(),
            composer_focused: true,
            connected: true,
            endpoint,
            error: "".to_string(),
            input: "".to_string(),
            last_known_height: 0,
            last_known_width: 0,
            loading: false,
            messages: vec![],
            notice: None,
            scroll: Scroll::default(),
        };
    }

    /// First half of a submission. Uses `text` when given, otherwise the
    /// composer input. The user message is appended before any network
    /// result exists, so the conversation is always in send order.
    pub fn begin_submit(&mut self, text: Option<&str>) -> Submission {
        let message = text.unwrap_or(&self.input).trim().to_string();
        if message.is_empty() {
            return Submission::Ignored(IgnoreReason::EmptyInput);
        }
        if self.loading {
            return Submission::Ignored(IgnoreReason::RequestInFlight);
        }

        self.error = "".to_string();
        self.connected = true;
        self.loading = true;
        self.input = "".to_string();
        self.notice = None;
        self.composer_focused = false;
        self.add_message(Message::new(Role::User, &message));

        return Submission::Pending(ChatRequest::new(&message));
    }

    /// Second half of a submission. Every failure ends up as UI state plus a
    /// synthetic assistant message; nothing is propagated.
    pub fn resolve(&mut self, result: Result<ChatReply, ChatApiError>) {
        match result {
            Ok(reply) => {
                let text = reply.text().unwrap_or(FALLBACK_REPLY).to_string();
                self.add_message(Message::new(Role::Assistant, &text));
            }
            Err(err) => {
                self.connected = false;
                self.error = err.to_string();
                self.add_message(Message::new_with_type(
                    Role::Assistant,
                    MessageType::Error,
                    OFFLINE_WARNING,
                ));
            }
        }

        self.loading = false;
        self.composer_focused = true;
    }

    /// Sends one of the [`QUICK_ASKS`] questions. Only offered before the
    /// first message.
    pub fn quick_ask(&mut self, index: usize) -> Submission {
        if !self.messages.is_empty() {
            return Submission::Ignored(IgnoreReason::ConversationStarted);
        }

        match QUICK_ASKS.get(index) {
            Some((_, question)) => return self.begin_submit(Some(question)),
            None => return Submission::Ignored(IgnoreReason::EmptyInput),
        }
    }

    pub fn clear(&mut self) {
        self.messages.clear();
        self.error = "".to_string();
        self.notice = None;
        // The composer stays hidden until the in-flight reply resolves.
        self.composer_focused = !self.loading;
        self.sync_dependants();
        self.scroll.last();
    }

    pub fn last_reply(&self) -> Option<&Message> {
        return self
            .messages
            .iter()
            .rev()
            .find(|message| return message.role == Role::Assistant);
    }

    pub fn copy_last_reply(&mut self, clipboard: &dyn ClipboardWriter) -> CopyOutcome {
        let text = match self.last_reply() {
            Some(message) => message.text.to_string(),
            None => {
                self.notice = Some("No reply to copy yet.".to_string());
                return CopyOutcome::NothingToCopy;
            }
        };

        if let Err(err) = clipboard.write_text(text) {
            tracing::warn!(err = ?err, "Failed to copy last reply");
            self.notice = Some(format!("Clipboard is unavailable: {err}"));
            return CopyOutcome::ClipboardUnavailable(err.to_string());
        }

        self.notice = Some("Copied last reply to clipboard.".to_string());
        return CopyOutcome::Copied;
    }

    pub fn set_input(&mut self, text: &str) {
        self.input = text.to_string();
    }

    pub fn set_notice(&mut self, text: &str) {
        self.notice = Some(text.to_string());
    }

    pub fn status_line(&self) -> String {
        let activity = if self.loading {
            "Assistant is typing…"
        } else if self.connected {
            "Ready"
        } else {
            "Reconnect and try again"
        };

        let connection = if self.connected {
            "Connected"
        } else {
            "Offline"
        };

        let api = if self.endpoint.is_local() {
            "Local API"
        } else {
            "Production API"
        };

        return format!(
            "{activity} | {connection} • {api} • {}",
            self.endpoint.display_host()
        );
    }

    pub fn set_rect(&mut self, rect: Rect) {
        self.last_known_width = rect.width;
        self.last_known_height = rect.height;
        self.sync_dependants();
    }

    fn add_message(&mut self, message: Message) {
        self.messages.push(message);
        self.sync_dependants();
        self.scroll.last();
    }

    fn sync_dependants(&mut self) {
        self.bubble_list
            .set_messages(&self.messages, self.last_known_width.into());

        self.scroll.set_state(
            u16::try_from(self.bubble_list.len()).unwrap_or(u16::MAX),
            self.last_known_height,
        );
    }
}
