#[cfg(test)]
#[path = "actions_test.rs"]
mod tests;

use std::sync::Arc;

use anyhow::Result;
use tokio::sync::mpsc;

use crate::domain::models::Action;
use crate::domain::models::Backend;
use crate::domain::models::BackendBox;
use crate::domain::models::ChatRequest;
use crate::domain::models::Event;

pub fn help_text() -> String {
    let text = r#"
COMMANDS:
- /clear (/cl) - Clears the conversation and any error.
- /copy (/c) - Copies the most recent assistant reply to your clipboard.
- /quit /exit (/q) - Exit.
- /help (/h) - Shows this help.

HOTKEYS:
- Enter - Send your question.
- F1 / F2 - Ask about S3 / IAM while the conversation is empty.
- Up arrow - Scroll up
- Down arrow - Scroll down
- CTRL+U - Page up
- CTRL+D - Page down
- CTRL+L - Clear the conversation.
- CTRL+Y - Copy the most recent assistant reply.
- CTRL+C - Exit.
        "#;

    return text.trim().to_string();
}

async fn send_request(
    backend: Arc<dyn Backend + Send + Sync>,
    request: ChatRequest,
    tx: mpsc::UnboundedSender<Event>,
) -> Result<()> {
    let res = backend.send_message(request).await;
    if let Err(err) = &res {
        tracing::error!(error = %err, "Chat request failed");
    }

    tx.send(Event::BackendReply(res))?;
    return Ok(());
}

pub struct ActionsService {}

impl ActionsService {
    pub async fn start(
        backend: BackendBox,
        tx: mpsc::UnboundedSender<Event>,
        rx: &mut mpsc::UnboundedReceiver<Action>,
    ) -> Result<()> {
        let backend: Arc<dyn Backend + Send + Sync> = Arc::from(backend);

        while let Some(action) = rx.recv().await {
            match action {
                Action::BackendRequest(request) => {
                    // Requests are never cancelled; a finished worker reports
                    // back through the event channel.
                    tokio::spawn(send_request(backend.clone(), request, tx.clone()));
                }
            }
        }

        return Ok(());
    }
}
