use async_trait::async_trait;
use color_eyre::Result;

use crate::commands::{Command, CommandEnv};
use crate::ui::toast::ToastType;

/// Copies text to the system clipboard and confirms with a toast.
pub struct CopyToClipboardCmd {
    text: String,
    toast_message: String,
}

impl CopyToClipboardCmd {
    pub fn new(text: impl Into<String>, toast_message: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            toast_message: toast_message.into(),
        }
    }
}

#[async_trait]
impl Command for CopyToClipboardCmd {
    fn name(&self) -> String {
        "Copying to clipboard".to_string()
    }

    async fn execute(self: Box<Self>, env: CommandEnv) -> Result<()> {
        env.set_clipboard(&self.text)?;
        env.show_toast(self.toast_message, ToastType::Success);
        Ok(())
    }
}
