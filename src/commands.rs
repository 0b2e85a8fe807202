//! Async command pattern for side effects.
//!
//! Commands represent async operations that run outside the main event
//! loop. Screens return them from their update and the app spawns each
//! one, reporting failures as toasts. Results flow back to the screen
//! through a channel captured at construction.

mod clipboard;
mod env;

use async_trait::async_trait;
use color_eyre::Result;

pub use clipboard::CopyToClipboardCmd;
pub use env::CommandEnv;

/// Async command that performs side effects.
#[async_trait]
pub trait Command: Send {
    /// Human-readable name for failure reporting.
    /// Include context like theme keys or product names.
    fn name(&self) -> String;

    /// Execute the command.
    async fn execute(self: Box<Self>, env: CommandEnv) -> Result<()>;
}
