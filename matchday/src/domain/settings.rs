//! Settings form state machine.
//!
//! One [`SettingsForm`] is created when the settings surface mounts and
//! discarded when it unmounts; nothing else writes to it. The machine
//! tracks per-field dirtiness and validity, serializes saves through a
//! single in-flight slot, and gates tab switches and back-navigation
//! behind an unsaved-changes confirmation. The confirmation itself is a
//! request/response exchange: the machine parks the pending navigation
//! and an explicit yes/no resolution completes or cancels it, so no UI
//! dialog ever blocks the state.

use serde::Serialize;

use super::profile::ProfileDocument;
use super::validation::{
    self, CommentPolicy, ValidationResult, validate_display_name, validate_email,
    validate_username,
};

/// Maximum biography length, in characters.
pub const BIO_MAX_LENGTH: usize = 160;

/// Tabs on the settings surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SettingsTab {
    /// Profile details.
    #[default]
    Profile,
    /// Email and password management.
    Account,
    /// Notification toggles.
    Notifications,
    /// Privacy controls.
    Privacy,
}

impl SettingsTab {
    /// Stable string form used by routing and telemetry.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Profile => "profile",
            Self::Account => "account",
            Self::Notifications => "notifications",
            Self::Privacy => "privacy",
        }
    }
}

impl std::fmt::Display for SettingsTab {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Editable fields on the settings form.
///
/// Password changes do not pass through the field map; they use the
/// zeroized credential types in [`super::auth`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SettingsField {
    /// Public display name.
    DisplayName,
    /// Unique handle.
    Username,
    /// Contact email.
    Email,
    /// Free-form biography.
    Bio,
}

impl SettingsField {
    /// Every field, in render order.
    pub const ALL: [Self; 4] = [Self::DisplayName, Self::Username, Self::Email, Self::Bio];

    /// Run the field's validator over a candidate value.
    #[must_use]
    pub fn validate(self, value: &str) -> ValidationResult {
        match self {
            Self::DisplayName => validate_display_name(value),
            Self::Username => validate_username(value),
            Self::Email => validate_email(value),
            Self::Bio => validation::validate_comment_with(&bio_policy(), value),
        }
    }
}

fn bio_policy() -> CommentPolicy {
    CommentPolicy {
        max_length: Some(BIO_MAX_LENGTH),
        allow_empty: true,
        ..CommentPolicy::default()
    }
}

/// Per-field edit state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldState {
    value: String,
    initial: String,
    touched: bool,
    dirty: bool,
    error: Option<String>,
}

impl FieldState {
    fn pristine(value: String) -> Self {
        Self {
            initial: value.clone(),
            value,
            touched: false,
            dirty: false,
            error: None,
        }
    }

    /// Current value.
    #[must_use]
    pub fn value(&self) -> &str {
        self.value.as_str()
    }

    /// `true` once the user has edited the field at least once.
    #[must_use]
    pub const fn touched(&self) -> bool {
        self.touched
    }

    /// `true` while the value differs from the last loaded or saved one.
    #[must_use]
    pub const fn dirty(&self) -> bool {
        self.dirty
    }

    /// Validation message for the current value, if any.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    fn reset_to_initial(&mut self) {
        self.value = self.initial.clone();
        self.touched = false;
        self.dirty = false;
        self.error = None;
    }

    fn commit(&mut self) {
        self.initial = self.value.clone();
        self.dirty = false;
    }
}

/// Values captured from the form for persistence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileDraft {
    /// Display name value.
    pub display_name: String,
    /// Username value.
    pub username: String,
    /// Email value.
    pub email: String,
    /// Biography value.
    pub bio: String,
}

/// Coarse lifecycle phase of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    /// Nothing unsaved.
    Idle,
    /// Unsaved edits present.
    Editing,
    /// A save is in flight; edits and further submits are ignored.
    Saving,
}

/// Where a guarded navigation is headed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationTarget {
    /// Another settings tab.
    Tab(SettingsTab),
    /// Leaving the settings surface entirely.
    Exit,
}

/// Result of requesting a navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationOutcome {
    /// Navigation applied immediately; nothing was dirty.
    Completed,
    /// Unsaved edits exist; the navigation is parked until
    /// [`SettingsForm::resolve_navigation`] is called.
    ConfirmationRequired(NavigationTarget),
}

/// Result of resolving a parked navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationResolution {
    /// Edits were discarded and the navigation applied.
    Navigated(NavigationTarget),
    /// The user declined; state is untouched.
    Cancelled,
    /// No navigation was pending.
    NonePending,
}

/// Result of an edit attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    /// The field was updated and revalidated.
    Applied,
    /// Ignored: a save is in flight.
    RejectedWhileSaving,
}

/// Result of a save attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveStart {
    /// The save slot was taken; persist this draft.
    Started(ProfileDraft),
    /// A save is already in flight; the submit is dropped, not queued.
    AlreadySaving,
    /// Nothing is dirty.
    NothingToSave,
    /// At least one field is invalid; fix fields before saving.
    InvalidFields,
}

/// Failure surfaced when a save resolves unsuccessfully.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveFailure {
    /// Attributable to one field.
    Field {
        /// Field at fault.
        field: SettingsField,
        /// Message to render beside it.
        message: String,
    },
    /// Not attributable to a field; rendered as a page banner.
    Page {
        /// Banner message.
        message: String,
    },
}

/// State container for the settings surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsForm {
    active_tab: SettingsTab,
    display_name: FieldState,
    username: FieldState,
    email: FieldState,
    bio: FieldState,
    phase: FormPhase,
    pending_navigation: Option<NavigationTarget>,
    page_error: Option<String>,
    mounted: bool,
}

impl SettingsForm {
    /// Build a form seeded from a loaded profile.
    #[must_use]
    pub fn for_profile(profile: &ProfileDocument) -> Self {
        Self {
            active_tab: SettingsTab::default(),
            display_name: FieldState::pristine(profile.display_name.clone()),
            username: FieldState::pristine(profile.username.clone()),
            email: FieldState::pristine(profile.email.clone()),
            bio: FieldState::pristine(profile.bio.clone()),
            phase: FormPhase::Idle,
            pending_navigation: None,
            page_error: None,
            mounted: true,
        }
    }

    /// Currently visible tab.
    #[must_use]
    pub const fn active_tab(&self) -> SettingsTab {
        self.active_tab
    }

    /// Current lifecycle phase.
    #[must_use]
    pub const fn phase(&self) -> FormPhase {
        self.phase
    }

    /// State of one field.
    #[must_use]
    pub const fn field(&self, key: SettingsField) -> &FieldState {
        match key {
            SettingsField::DisplayName => &self.display_name,
            SettingsField::Username => &self.username,
            SettingsField::Email => &self.email,
            SettingsField::Bio => &self.bio,
        }
    }

    fn field_mut(&mut self, key: SettingsField) -> &mut FieldState {
        match key {
            SettingsField::DisplayName => &mut self.display_name,
            SettingsField::Username => &mut self.username,
            SettingsField::Email => &mut self.email,
            SettingsField::Bio => &mut self.bio,
        }
    }

    /// `true` while any field holds unsaved changes.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        SettingsField::ALL.iter().any(|key| self.field(*key).dirty)
    }

    /// `true` while every field passes its validator.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        SettingsField::ALL
            .iter()
            .all(|key| self.field(*key).error.is_none())
    }

    /// `true` while a save is in flight.
    #[must_use]
    pub fn is_saving(&self) -> bool {
        self.phase == FormPhase::Saving
    }

    /// `true` until [`SettingsForm::unmount`] is called.
    #[must_use]
    pub const fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Page-level failure banner, if one is showing.
    #[must_use]
    pub fn page_error(&self) -> Option<&str> {
        self.page_error.as_deref()
    }

    /// Navigation parked behind the unsaved-changes confirmation.
    #[must_use]
    pub const fn pending_navigation(&self) -> Option<NavigationTarget> {
        self.pending_navigation
    }

    /// Apply a field edit: mark it touched, recompute dirtiness and
    /// validity, and roll the phase forward. Ignored while saving.
    pub fn edit(&mut self, key: SettingsField, value: impl Into<String>) -> EditOutcome {
        if self.phase == FormPhase::Saving {
            return EditOutcome::RejectedWhileSaving;
        }
        self.page_error = None;
        let state = self.field_mut(key);
        state.value = value.into();
        state.touched = true;
        state.dirty = state.value != state.initial;
        state.error = key.validate(&state.value).error;
        self.phase = if self.is_dirty() {
            FormPhase::Editing
        } else {
            FormPhase::Idle
        };
        EditOutcome::Applied
    }

    /// Snapshot of the current field values.
    #[must_use]
    pub fn draft(&self) -> ProfileDraft {
        ProfileDraft {
            display_name: self.display_name.value.clone(),
            username: self.username.value.clone(),
            email: self.email.value.clone(),
            bio: self.bio.value.clone(),
        }
    }

    /// Try to take the save slot.
    #[must_use]
    pub fn begin_save(&mut self) -> SaveStart {
        if self.phase == FormPhase::Saving {
            return SaveStart::AlreadySaving;
        }
        if !self.is_dirty() {
            return SaveStart::NothingToSave;
        }
        if !self.is_valid() {
            return SaveStart::InvalidFields;
        }
        self.phase = FormPhase::Saving;
        self.page_error = None;
        SaveStart::Started(self.draft())
    }

    /// Resolve the in-flight save.
    ///
    /// Success commits every field and returns to `Idle`; failure returns
    /// to `Editing` with the error surfaced per-field or as a banner. A
    /// resolution arriving after [`SettingsForm::unmount`], or with no
    /// save in flight, is ignored.
    pub fn complete_save(&mut self, outcome: Result<(), SaveFailure>) {
        if !self.mounted || self.phase != FormPhase::Saving {
            return;
        }
        match outcome {
            Ok(()) => {
                for key in SettingsField::ALL {
                    self.field_mut(key).commit();
                }
                self.phase = FormPhase::Idle;
                self.page_error = None;
            }
            Err(SaveFailure::Field { field, message }) => {
                self.field_mut(field).error = Some(message);
                self.phase = FormPhase::Editing;
            }
            Err(SaveFailure::Page { message }) => {
                self.page_error = Some(message);
                self.phase = FormPhase::Editing;
            }
        }
    }

    /// Request a switch to another tab.
    pub fn request_tab_switch(&mut self, tab: SettingsTab) -> NavigationOutcome {
        if tab == self.active_tab {
            return NavigationOutcome::Completed;
        }
        self.request_navigation(NavigationTarget::Tab(tab))
    }

    /// Request leaving the settings surface.
    pub fn request_exit(&mut self) -> NavigationOutcome {
        self.request_navigation(NavigationTarget::Exit)
    }

    fn request_navigation(&mut self, target: NavigationTarget) -> NavigationOutcome {
        if self.is_dirty() {
            self.pending_navigation = Some(target);
            return NavigationOutcome::ConfirmationRequired(target);
        }
        self.apply_navigation(target);
        NavigationOutcome::Completed
    }

    fn apply_navigation(&mut self, target: NavigationTarget) {
        if let NavigationTarget::Tab(tab) = target {
            self.active_tab = tab;
        }
    }

    /// Resolve the parked navigation with the user's decision.
    pub fn resolve_navigation(&mut self, confirmed: bool) -> NavigationResolution {
        let Some(target) = self.pending_navigation.take() else {
            return NavigationResolution::NonePending;
        };
        if !confirmed {
            return NavigationResolution::Cancelled;
        }
        self.discard_edits();
        self.apply_navigation(target);
        NavigationResolution::Navigated(target)
    }

    /// Throw away unsaved edits and return every field to its last
    /// committed value.
    pub fn discard_edits(&mut self) {
        for key in SettingsField::ALL {
            self.field_mut(key).reset_to_initial();
        }
        self.phase = FormPhase::Idle;
        self.page_error = None;
    }

    /// Mark the surface unmounted; late save resolutions are dropped.
    pub fn unmount(&mut self) {
        self.mounted = false;
    }
}

#[cfg(test)]
#[path = "settings_tests.rs"]
mod tests;
