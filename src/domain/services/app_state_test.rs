use std::cell::RefCell;

use anyhow::bail;
use anyhow::Result;

use super::AppState;
use super::CopyOutcome;
use super::IgnoreReason;
use super::Submission;
use super::FALLBACK_REPLY;
use super::OFFLINE_WARNING;
use super::QUICK_ASKS;
use crate::domain::models::ChatApiError;
use crate::domain::models::ChatReply;
use crate::domain::models::ChatRequest;
use crate::domain::models::Endpoint;
use crate::domain::models::Message;
use crate::domain::models::MessageType;
use crate::domain::models::Role;
use crate::domain::services::clipboard::ClipboardWriter;

impl Default for AppState {
    fn default() -> AppState {
        let mut app_state = AppState::new(Endpoint::new("http://localhost:8081"));
        app_state.last_known_width = 100;
        app_state.last_known_height = 300;
        return app_state;
    }
}

#[derive(Default)]
struct FakeClipboard {
    written: RefCell<Vec<String>>,
}

impl ClipboardWriter for FakeClipboard {
    fn write_text(&self, text: String) -> Result<()> {
        self.written.borrow_mut().push(text);
        return Ok(());
    }
}

struct BrokenClipboard {}

impl ClipboardWriter for BrokenClipboard {
    fn write_text(&self, _text: String) -> Result<()> {
        bail!("no display");
    }
}

fn reply(text: &str) -> Result<ChatReply, ChatApiError> {
    return Ok(ChatReply {
        reply: Some(text.to_string()),
    });
}

mod begin_submit {
    use super::*;

    #[test]
    fn it_appends_user_message_before_reply() {
        let mut app_state = AppState::default();
        app_state.set_input("  What is Amazon S3?  ");

        let submission = app_state.begin_submit(None);

        assert_eq!(
            submission,
            Submission::Pending(ChatRequest::new("What is Amazon S3?"))
        );
        assert_eq!(
            app_state.messages,
            vec![Message::new(Role::User, "What is Amazon S3?")]
        );
        assert!(app_state.loading);
        assert!(app_state.connected);
        assert!(!app_state.composer_focused);
        assert_eq!(app_state.input, "");
    }

    #[test]
    fn it_prefers_override_text_and_clears_input() {
        let mut app_state = AppState::default();
        app_state.set_input("draft");

        let submission = app_state.begin_submit(Some("Explain IAM roles with an example"));

        assert_eq!(
            submission,
            Submission::Pending(ChatRequest::new("Explain IAM roles with an example"))
        );
        assert_eq!(app_state.input, "");
        assert_eq!(app_state.messages.len(), 1);
    }

    #[test]
    fn it_resets_error_and_connection() {
        let mut app_state = AppState::default();
        app_state.begin_submit(Some("first"));
        app_state.resolve(Err(ChatApiError::status(503, "")));
        assert!(!app_state.connected);

        app_state.begin_submit(Some("second"));

        assert!(app_state.connected);
        assert_eq!(app_state.error, "");
        assert!(app_state.loading);
    }

    #[test]
    fn it_ignores_empty_input() {
        let mut app_state = AppState::default();

        assert_eq!(
            app_state.begin_submit(Some("")),
            Submission::Ignored(IgnoreReason::EmptyInput)
        );
        assert!(app_state.messages.is_empty());
        assert!(!app_state.loading);
        assert!(app_state.connected);
        assert!(app_state.composer_focused);
    }

    #[test]
    fn it_ignores_whitespace_input() {
        let mut app_state = AppState::default();
        app_state.set_input("   ");

        assert_eq!(
            app_state.begin_submit(None),
            Submission::Ignored(IgnoreReason::EmptyInput)
        );
        assert!(app_state.messages.is_empty());
        assert_eq!(app_state.input, "   ");
        assert!(!app_state.loading);
    }

    #[test]
    fn it_rejects_overlapping_requests() {
        let mut app_state = AppState::default();
        app_state.begin_submit(Some("first"));
        app_state.set_input("second");

        assert_eq!(
            app_state.begin_submit(None),
            Submission::Ignored(IgnoreReason::RequestInFlight)
        );
        assert_eq!(app_state.messages.len(), 1);
        assert_eq!(app_state.input, "second");
        assert!(app_state.loading);
    }
}

mod resolve {
    use super::*;

    #[test]
    fn it_appends_reply() {
        let mut app_state = AppState::default();
        app_state.begin_submit(Some("hi"));
        app_state.resolve(reply("X"));

        assert_eq!(
            app_state.messages,
            vec![
                Message::new(Role::User, "hi"),
                Message::new(Role::Assistant, "X")
            ]
        );
        assert!(!app_state.loading);
        assert!(app_state.connected);
        assert!(app_state.composer_focused);
        assert_eq!(app_state.error, "");
    }

    #[test]
    fn it_appends_fallback_for_empty_body() {
        let mut app_state = AppState::default();
        app_state.begin_submit(Some("hi"));
        app_state.resolve(Ok(ChatReply::from_body("")));

        assert_eq!(app_state.messages.len(), 2);
        assert_eq!(app_state.messages[1].text, FALLBACK_REPLY);
        assert_eq!(app_state.messages[1].role, Role::Assistant);
        assert_eq!(app_state.error, "");
        assert!(!app_state.loading);
    }

    #[test]
    fn it_appends_fallback_for_empty_reply() {
        let mut app_state = AppState::default();
        app_state.begin_submit(Some("hi"));
        app_state.resolve(reply(""));

        assert_eq!(app_state.messages[1].text, FALLBACK_REPLY);
    }

    #[test]
    fn it_handles_server_errors() {
        let mut app_state = AppState::default();
        app_state.begin_submit(Some("hi"));
        app_state.resolve(Err(ChatApiError::status(500, "boom")));

        assert!(app_state.error.contains("500"));
        assert!(app_state.error.contains("boom"));
        assert!(!app_state.connected);
        assert!(!app_state.loading);
        assert!(app_state.composer_focused);
        assert_eq!(app_state.messages.len(), 2);
        assert_eq!(app_state.messages[1].role, Role::Assistant);
        assert_eq!(app_state.messages[1].text, OFFLINE_WARNING);
        assert_eq!(app_state.messages[1].message_type(), MessageType::Error);
    }

    #[test]
    fn it_keeps_send_order() {
        let mut app_state = AppState::default();
        app_state.begin_submit(Some("one"));
        app_state.resolve(reply("1"));
        app_state.begin_submit(Some("two"));
        app_state.resolve(reply("2"));

        let texts = app_state
            .messages
            .iter()
            .map(|message| return message.text.as_str())
            .collect::<Vec<&str>>();
        assert_eq!(texts, vec!["one", "1", "two", "2"]);
    }
}

mod clear {
    use super::*;

    #[test]
    fn it_clears_messages_and_error() {
        let mut app_state = AppState::default();
        app_state.begin_submit(Some("hi"));
        app_state.resolve(Err(ChatApiError::status(500, "boom")));

        app_state.clear();

        assert!(app_state.messages.is_empty());
        assert_eq!(app_state.error, "");
        assert!(app_state.composer_focused);
        assert_eq!(app_state.bubble_list.len(), 0);
    }

    #[test]
    fn it_keeps_composer_hidden_while_reply_is_pending() {
        let mut app_state = AppState::default();
        app_state.begin_submit(Some("hi"));

        app_state.clear();
        assert!(app_state.loading);
        assert!(!app_state.composer_focused);

        app_state.resolve(reply("hello"));
        assert!(app_state.composer_focused);
    }

    #[test]
    fn it_clears_empty_state() {
        let mut app_state = AppState::default();
        app_state.clear();

        assert!(app_state.messages.is_empty());
        assert_eq!(app_state.error, "");
    }
}

mod quick_ask {
    use super::*;

    #[test]
    fn it_sends_the_quick_question() {
        let mut app_state = AppState::default();
        app_state.set_input("half typed");

        let submission = app_state.quick_ask(1);

        assert_eq!(
            submission,
            Submission::Pending(ChatRequest::new("Explain IAM roles with an example"))
        );
        assert_eq!(app_state.input, "");
        assert_eq!(
            app_state.messages,
            vec![Message::new(Role::User, "Explain IAM roles with an example")]
        );
    }

    #[test]
    fn it_ignores_quick_asks_once_conversation_started() {
        let mut app_state = AppState::default();
        app_state.begin_submit(Some("hi"));
        app_state.resolve(reply("hello"));

        assert_eq!(
            app_state.quick_ask(0),
            Submission::Ignored(IgnoreReason::ConversationStarted)
        );
        assert_eq!(app_state.messages.len(), 2);
    }

    #[test]
    fn it_ignores_unknown_quick_asks() {
        let mut app_state = AppState::default();
        assert_eq!(
            app_state.quick_ask(QUICK_ASKS.len()),
            Submission::Ignored(IgnoreReason::EmptyInput)
        );
        assert!(app_state.messages.is_empty());
    }
}

mod copy_last_reply {
    use super::*;

    #[test]
    fn it_copies_last_assistant_message() {
        let mut app_state = AppState::default();
        app_state.begin_submit(Some("hi"));
        app_state.resolve(reply("hello"));

        let clipboard = FakeClipboard::default();
        let outcome = app_state.copy_last_reply(&clipboard);

        assert_eq!(outcome, CopyOutcome::Copied);
        assert_eq!(*clipboard.written.borrow(), vec!["hello".to_string()]);
    }

    #[test]
    fn it_copies_most_recent_reply() {
        let mut app_state = AppState::default();
        app_state.begin_submit(Some("one"));
        app_state.resolve(reply("first"));
        app_state.begin_submit(Some("two"));
        app_state.resolve(reply("second"));
        app_state.begin_submit(Some("three"));

        let clipboard = FakeClipboard::default();
        app_state.copy_last_reply(&clipboard);

        assert_eq!(*clipboard.written.borrow(), vec!["second".to_string()]);
    }

    #[test]
    fn it_is_noop_without_reply() {
        let mut app_state = AppState::default();
        app_state.begin_submit(Some("hi"));

        let clipboard = FakeClipboard::default();
        let outcome = app_state.copy_last_reply(&clipboard);

        assert_eq!(outcome, CopyOutcome::NothingToCopy);
        assert!(clipboard.written.borrow().is_empty());
        assert_eq!(app_state.messages.len(), 1);
    }

    #[test]
    fn it_reports_clipboard_failures() {
        let mut app_state = AppState::default();
        app_state.begin_submit(Some("hi"));
        app_state.resolve(reply("hello"));

        let outcome = app_state.copy_last_reply(&BrokenClipboard {});

        assert_eq!(
            outcome,
            CopyOutcome::ClipboardUnavailable("no display".to_string())
        );
        assert_eq!(app_state.messages.len(), 2);
    }
}

mod status_line {
    use super::*;

    #[test]
    fn it_shows_ready() {
        let app_state = AppState::default();
        insta::assert_snapshot!(app_state.status_line(), @"Ready | Connected • Local API • localhost:8081");
    }

    #[test]
    fn it_shows_typing() {
        let mut app_state = AppState::new(Endpoint::new("https://chat-api.onrender.com"));
        app_state.begin_submit(Some("hi"));
        insta::assert_snapshot!(app_state.status_line(), @"Assistant is typing… | Connected • Production API • chat-api.onrender.com");
    }

    #[test]
    fn it_shows_offline() {
        let mut app_state = AppState::default();
        app_state.begin_submit(Some("hi"));
        app_state.resolve(Err(ChatApiError::status(500, "boom")));
        insta::assert_snapshot!(app_state.status_line(), @"Reconnect and try again | Offline • Local API • localhost:8081");
    }
}
