//! Orchestration of the settings surface over the ports.
//!
//! The service owns no state of its own: the [`SettingsForm`] is the
//! single writer-visible state container, and every async outcome flows
//! back into it. Provider failures are normalized before anything is
//! surfaced.

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::auth::{PasswordChange, SignInCredentials};
use super::auth_errors::{self, NormalizedAuthError, normalize};
use super::ports::{
    AuthGateway, AuthSession, DiscardChangesPrompt, DiscardContext, DocumentStoreError,
    ProfileStore,
};
use super::settings::{
    NavigationOutcome, NavigationResolution, NavigationTarget, SaveFailure, SaveStart,
    SettingsForm, SettingsTab,
};

/// Failures surfaced by [`SettingsService::load_form`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    /// The profile document does not exist.
    #[error("no profile document for user {user_id}")]
    ProfileMissing {
        /// User whose profile was requested.
        user_id: String,
    },
    /// The document store failed.
    #[error(transparent)]
    Store(#[from] DocumentStoreError),
}

/// Outcome of a save attempt, mirrored by the form's own state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The draft was persisted and the form committed.
    Saved,
    /// A save was already in flight; this submit was dropped.
    AlreadySaving,
    /// Nothing was dirty.
    NothingToSave,
    /// Validation failures block saving.
    InvalidFields,
    /// The store rejected the save; the failure is on the form.
    Failed,
}

/// Outcome of a guarded tab switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabSwitchOutcome {
    /// The tab changed.
    Switched,
    /// The user kept their unsaved changes; the tab did not change.
    Cancelled,
}

/// Outcome of a guarded exit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitOutcome {
    /// The surface was left and the form unmounted.
    Exited,
    /// The user stayed.
    Cancelled,
}

/// Message shown when the store rejects a profile save. Store details are
/// logged, never rendered.
const SAVE_FAILED_BANNER: &str = "Could not save your changes. Please try again.";

/// Settings surface service.
#[derive(Clone)]
pub struct SettingsService<P, A, C> {
    profiles: Arc<P>,
    auth: Arc<A>,
    prompt: Arc<C>,
}

impl<P, A, C> SettingsService<P, A, C> {
    /// Create a service over the given ports.
    pub fn new(profiles: Arc<P>, auth: Arc<A>, prompt: Arc<C>) -> Self {
        Self {
            profiles,
            auth,
            prompt,
        }
    }
}

impl<P, A, C> SettingsService<P, A, C>
where
    P: ProfileStore,
    A: AuthGateway,
    C: DiscardChangesPrompt,
{
    /// Load the user's profile and seed a settings form from it.
    pub async fn load_form(&self, user_id: &str) -> Result<SettingsForm, SettingsError> {
        let profile = self
            .profiles
            .load_profile(user_id)
            .await?
            .ok_or_else(|| SettingsError::ProfileMissing {
                user_id: user_id.to_owned(),
            })?;
        Ok(SettingsForm::for_profile(&profile))
    }

    /// Persist the form's dirty draft.
    ///
    /// At most one save runs per form; a submit while one is in flight is
    /// dropped. Failures land on the form as a page banner so the UI has
    /// a single source of truth.
    pub async fn save(&self, form: &mut SettingsForm, user_id: &str) -> SaveOutcome {
        let draft = match form.begin_save() {
            SaveStart::Started(draft) => draft,
            SaveStart::AlreadySaving => return SaveOutcome::AlreadySaving,
            SaveStart::NothingToSave => return SaveOutcome::NothingToSave,
            SaveStart::InvalidFields => return SaveOutcome::InvalidFields,
        };

        match self.profiles.save_profile(user_id, &draft).await {
            Ok(()) => {
                info!(user_id, "profile saved");
                form.complete_save(Ok(()));
                SaveOutcome::Saved
            }
            Err(error) => {
                warn!(user_id, %error, "profile save failed");
                form.complete_save(Err(SaveFailure::Page {
                    message: SAVE_FAILED_BANNER.to_owned(),
                }));
                SaveOutcome::Failed
            }
        }
    }

    /// Switch tabs, asking for confirmation when edits would be lost.
    pub async fn switch_tab(&self, form: &mut SettingsForm, tab: SettingsTab) -> TabSwitchOutcome {
        match form.request_tab_switch(tab) {
            NavigationOutcome::Completed => TabSwitchOutcome::Switched,
            NavigationOutcome::ConfirmationRequired(_) => {
                let confirmed = self
                    .prompt
                    .confirm_discard(DiscardContext::TabSwitch(tab))
                    .await;
                match form.resolve_navigation(confirmed) {
                    NavigationResolution::Navigated(_) => TabSwitchOutcome::Switched,
                    NavigationResolution::Cancelled | NavigationResolution::NonePending => {
                        debug!(tab = %tab, "tab switch cancelled");
                        TabSwitchOutcome::Cancelled
                    }
                }
            }
        }
    }

    /// Leave the settings surface, asking for confirmation when edits
    /// would be lost. Unmounts the form on exit.
    pub async fn exit(&self, form: &mut SettingsForm) -> ExitOutcome {
        let outcome = match form.request_exit() {
            NavigationOutcome::Completed => ExitOutcome::Exited,
            NavigationOutcome::ConfirmationRequired(_) => {
                let confirmed = self.prompt.confirm_discard(DiscardContext::Exit).await;
                match form.resolve_navigation(confirmed) {
                    NavigationResolution::Navigated(NavigationTarget::Exit) => ExitOutcome::Exited,
                    NavigationResolution::Navigated(NavigationTarget::Tab(_))
                    | NavigationResolution::Cancelled
                    | NavigationResolution::NonePending => ExitOutcome::Cancelled,
                }
            }
        };
        if outcome == ExitOutcome::Exited {
            form.unmount();
        }
        outcome
    }

    /// Establish a session, normalizing provider failures.
    pub async fn sign_in(
        &self,
        credentials: &SignInCredentials,
    ) -> Result<AuthSession, NormalizedAuthError> {
        self.auth
            .sign_in(credentials)
            .await
            .map_err(|error| normalize(&error))
    }

    /// Change the account password.
    ///
    /// When the provider demands fresh credentials, reauthenticate with
    /// `reauth` and retry exactly once. Retryability of other failures is
    /// whatever the normalization table says; no attempt counting happens
    /// here.
    pub async fn change_password(
        &self,
        change: &PasswordChange,
        reauth: Option<&SignInCredentials>,
    ) -> Result<(), NormalizedAuthError> {
        match self.auth.change_password(change).await {
            Ok(()) => Ok(()),
            Err(error) if auth_errors::requires_reauthentication(&error.code) => {
                let Some(credentials) = reauth else {
                    return Err(normalize(&error));
                };
                debug!("reauthenticating before password change");
                self.auth
                    .reauthenticate(credentials)
                    .await
                    .map_err(|reauth_error| normalize(&reauth_error))?;
                self.auth
                    .change_password(change)
                    .await
                    .map_err(|retry_error| normalize(&retry_error))
            }
            Err(error) => Err(normalize(&error)),
        }
    }
}

#[cfg(test)]
#[path = "settings_service_tests.rs"]
mod tests;
