use std::sync::{Arc, Mutex};

use arboard::Clipboard;
use color_eyre::Result;
use color_eyre::eyre::eyre;
use tokio::sync::mpsc::UnboundedSender;

use crate::app::AppMessage;
use crate::ui::toast::ToastType;

/// Shared environment for commands.
///
/// Provides access to the clipboard and app messaging. Clone is cheap
/// (Arc-based) so the app hands one to every spawned command.
#[derive(Clone)]
pub struct CommandEnv {
    clipboard: Arc<Mutex<Option<Clipboard>>>,
    app_tx: UnboundedSender<AppMessage>,
}

impl CommandEnv {
    #[must_use]
    pub fn new(app_tx: UnboundedSender<AppMessage>) -> Self {
        Self {
            clipboard: Arc::new(Mutex::new(None)),
            app_tx,
        }
    }

    /// Copy text to the system clipboard.
    ///
    /// On Linux, clipboard contents are only available while the owning
    /// process holds the clipboard, so one shared instance lives for the
    /// whole application rather than per copy.
    pub fn set_clipboard(&self, text: &str) -> Result<()> {
        let mut guard = self
            .clipboard
            .lock()
            .map_err(|e| eyre!("Failed to lock clipboard: {e}"))?;

        if guard.is_none() {
            *guard = Some(Clipboard::new()?);
        }
        if let Some(clipboard) = guard.as_mut() {
            clipboard.set_text(text)?;
        }
        Ok(())
    }

    /// Show a toast notification.
    pub fn show_toast(&self, message: impl Into<String>, toast_type: ToastType) {
        let _ = self.app_tx.send(AppMessage::ShowToast {
            message: message.into(),
            toast_type,
        });
    }
}
