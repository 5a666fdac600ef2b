//! Domain types and services.
//!
//! Purpose: keep validation rules, auth error normalization, engagement
//! hygiene, and settings form state independent of any UI framework or
//! transport. Inbound surfaces render what these modules return; outbound
//! adapters implement the [`ports`] traits.

pub mod auth;
pub mod auth_errors;
pub mod ports;
pub mod posts;
pub mod profile;
pub mod settings;
pub mod settings_service;
pub mod validation;

pub use auth::{CredentialValidationError, PasswordChange, SignInCredentials};
pub use auth_errors::{
    AuthErrorCode, NormalizedAuthError, ProviderError, Severity, is_validation_error, normalize,
    requires_reauthentication,
};
pub use posts::{FeedService, PostDocument, rank_posts};
pub use profile::ProfileDocument;
pub use settings::{
    EditOutcome, FieldState, FormPhase, NavigationOutcome, NavigationResolution, NavigationTarget,
    ProfileDraft, SaveFailure, SaveStart, SettingsField, SettingsForm, SettingsTab,
};
pub use settings_service::{ExitOutcome, SaveOutcome, SettingsError, SettingsService, TabSwitchOutcome};
pub use validation::{
    CommentPolicy, PasswordPolicy, PasswordRequirements, PasswordStrength, ValidationResult,
    validate_comment, validate_comment_with, validate_display_name, validate_email,
    validate_password, validate_password_with, validate_username,
};
