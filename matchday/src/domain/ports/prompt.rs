//! Port for the unsaved-changes confirmation.
//!
//! The prompt is a request/response exchange resolved by explicit user
//! action. Implementations surface a dialog and resolve the future when
//! the user answers; nothing here blocks.

use async_trait::async_trait;

use crate::domain::settings::SettingsTab;

/// What the user is about to abandon edits for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscardContext {
    /// Switching to another settings tab.
    TabSwitch(SettingsTab),
    /// Leaving the settings surface.
    Exit,
}

/// Yes/no confirmation shown before discarding unsaved changes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DiscardChangesPrompt: Send + Sync {
    /// Ask whether unsaved changes may be discarded. `true` confirms.
    async fn confirm_discard(&self, context: DiscardContext) -> bool;
}

/// Fixture prompt answering with a fixed decision.
#[derive(Debug, Clone, Copy)]
pub struct FixtureDiscardPrompt {
    /// Decision returned from every prompt.
    pub confirm: bool,
}

#[async_trait]
impl DiscardChangesPrompt for FixtureDiscardPrompt {
    async fn confirm_discard(&self, _context: DiscardContext) -> bool {
        self.confirm
    }
}
