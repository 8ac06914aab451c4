use anyhow::anyhow;
use anyhow::Result;
use once_cell::sync::OnceCell;
use tokio::sync::mpsc;

static SENDER: OnceCell<mpsc::UnboundedSender<String>> = OnceCell::new();

/// Anything that can take text for the system clipboard.
pub trait ClipboardWriter {
    fn write_text(&self, text: String) -> Result<()>;
}

pub struct ClipboardService {}

impl ClipboardService {
    pub async fn start() -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<String>();
        SENDER
            .set(tx)
            .map_err(|_| return anyhow!("Clipboard service was already started."))?;
        let mut clipboard = arboard::Clipboard::new()?;

        while let Some(text) = rx.recv().await {
            if let Err(err) = clipboard.set_text(text) {
                tracing::warn!(err = ?err, "Failed to write to the clipboard");
            }
        }

        return Ok(());
    }

    pub fn healthcheck() -> Result<()> {
        if SENDER.get().is_some() {
            return Ok(());
        }

        arboard::Clipboard::new()?;
        return Ok(());
    }

    pub fn set(text: String) -> Result<()> {
        if let Some(tx) = SENDER.get() {
            tx.send(text)?;
            return Ok(());
        }

        return Err(anyhow!("Clipboard service is not initialized."));
    }
}

/// Writes through the background [`ClipboardService`].
#[derive(Default)]
pub struct SystemClipboard {}

impl ClipboardWriter for SystemClipboard {
    fn write_text(&self, text: String) -> Result<()> {
        return ClipboardService::set(text);
    }
}
