//! Normalization of auth provider failures into fixed user-facing
//! messages.
//!
//! The provider reports failures as opaque codes with free-text messages.
//! The raw message may embed PII (commonly the account email), so it is
//! never shown: normalization substitutes the fixed entry from an
//! immutable lookup table, constructed once and shared by reference. Codes
//! the table does not know degrade to a generic retryable entry rather
//! than failing.

use std::collections::HashMap;
use std::sync::OnceLock;

use serde::Serialize;

/// Raw failure reported by the auth provider.
///
/// `Display` deliberately prints only the code; the provider message is
/// kept solely so adapters can log it at their own discretion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderError {
    /// Provider error code, optionally prefixed `auth/`.
    pub code: String,
    /// Raw provider message. Never surfaced to users.
    pub message: Option<String>,
}

impl ProviderError {
    /// Build a provider error from a bare code.
    #[must_use]
    pub fn from_code(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: None,
        }
    }
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "auth provider error: {}", self.code)
    }
}

impl std::error::Error for ProviderError {}

/// Stable identifier for a known provider failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AuthErrorCode {
    /// Password did not match the account.
    WrongPassword,
    /// No account exists for the identifier.
    UserNotFound,
    /// The account has been administratively disabled.
    UserDisabled,
    /// The email is already registered.
    EmailAlreadyInUse,
    /// The provider rejected the password as too weak.
    WeakPassword,
    /// The email failed the provider's address check.
    InvalidEmail,
    /// The request never reached the provider.
    NetworkRequestFailed,
    /// The provider throttled the client.
    TooManyRequests,
    /// A sensitive operation needs fresh credentials.
    RequiresRecentLogin,
}

impl AuthErrorCode {
    /// Parse a provider code string, stripping an optional `auth/` prefix.
    /// Unknown codes return `None` and take the generic fallback path.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let code = raw.strip_prefix("auth/").unwrap_or(raw);
        match code {
            "wrong-password" => Some(Self::WrongPassword),
            "user-not-found" => Some(Self::UserNotFound),
            "user-disabled" => Some(Self::UserDisabled),
            "email-already-in-use" => Some(Self::EmailAlreadyInUse),
            "weak-password" => Some(Self::WeakPassword),
            "invalid-email" => Some(Self::InvalidEmail),
            "network-request-failed" => Some(Self::NetworkRequestFailed),
            "too-many-requests" => Some(Self::TooManyRequests),
            "requires-recent-login" => Some(Self::RequiresRecentLogin),
            _ => None,
        }
    }

    /// `true` only for malformed-input-class codes: the user must fix a
    /// field, not an account or connection.
    #[must_use]
    pub const fn is_validation_error(self) -> bool {
        matches!(self, Self::InvalidEmail | Self::WeakPassword)
    }

    /// `true` only for the code demanding fresh credentials before a
    /// sensitive operation.
    #[must_use]
    pub const fn requires_reauthentication(self) -> bool {
        matches!(self, Self::RequiresRecentLogin)
    }
}

/// How prominently a normalized failure should be rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Blocking failure.
    Error,
    /// The user can correct and continue.
    Warning,
    /// Procedural notice.
    Info,
}

/// User-facing rendering of a provider failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedAuthError {
    /// Fixed message from the lookup table; never provider text.
    pub message: String,
    /// Suggested next step, when one exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    /// Rendering severity.
    pub severity: Severity,
    /// Whether retrying the same input can succeed. Fixed per code;
    /// retrying never changes a wrong password, but a flaky network can
    /// recover.
    pub can_retry: bool,
}

fn entry(
    message: &str,
    action: Option<&str>,
    severity: Severity,
    can_retry: bool,
) -> NormalizedAuthError {
    NormalizedAuthError {
        message: message.to_owned(),
        action: action.map(str::to_owned),
        severity,
        can_retry,
    }
}

/// The code → message table, built once on first use.
fn message_table() -> &'static HashMap<AuthErrorCode, NormalizedAuthError> {
    static TABLE: OnceLock<HashMap<AuthErrorCode, NormalizedAuthError>> = OnceLock::new();
    TABLE.get_or_init(|| {
        HashMap::from([
            (
                AuthErrorCode::WrongPassword,
                entry(
                    "Incorrect password.",
                    Some("Try again or reset your password."),
                    Severity::Error,
                    false,
                ),
            ),
            (
                AuthErrorCode::UserNotFound,
                entry(
                    "No account found with this email.",
                    Some("Check the address or create an account."),
                    Severity::Error,
                    false,
                ),
            ),
            (
                AuthErrorCode::UserDisabled,
                entry(
                    "This account has been disabled.",
                    Some("Contact support to restore access."),
                    Severity::Error,
                    false,
                ),
            ),
            (
                AuthErrorCode::EmailAlreadyInUse,
                entry(
                    "An account with this email already exists.",
                    Some("Sign in instead."),
                    Severity::Error,
                    false,
                ),
            ),
            (
                AuthErrorCode::WeakPassword,
                entry(
                    "That password is too weak.",
                    Some("Use at least 8 characters with mixed case and a number."),
                    Severity::Warning,
                    false,
                ),
            ),
            (
                AuthErrorCode::InvalidEmail,
                entry(
                    "Please enter a valid email address.",
                    None,
                    Severity::Warning,
                    false,
                ),
            ),
            (
                AuthErrorCode::NetworkRequestFailed,
                entry(
                    "Network error. Check your connection.",
                    Some("Retry once you are back online."),
                    Severity::Warning,
                    true,
                ),
            ),
            (
                AuthErrorCode::TooManyRequests,
                entry(
                    "Too many attempts. Please wait a moment.",
                    Some("Try again shortly."),
                    Severity::Warning,
                    true,
                ),
            ),
            (
                AuthErrorCode::RequiresRecentLogin,
                entry(
                    "Please sign in again to continue.",
                    Some("Re-enter your password to confirm this change."),
                    Severity::Info,
                    false,
                ),
            ),
        ])
    })
}

fn generic_failure() -> NormalizedAuthError {
    entry(
        "Something went wrong. Please try again.",
        None,
        Severity::Error,
        true,
    )
}

/// Normalize a provider failure into its fixed user-facing entry.
///
/// The provider's own message text is discarded unconditionally.
///
/// # Examples
/// ```
/// use matchday::domain::{ProviderError, normalize};
///
/// let raw = ProviderError {
///     code: "auth/wrong-password".to_owned(),
///     message: Some("password mismatch for user@example.com".to_owned()),
/// };
/// let shown = normalize(&raw);
/// assert_eq!(shown.message, "Incorrect password.");
/// ```
#[must_use]
pub fn normalize(error: &ProviderError) -> NormalizedAuthError {
    AuthErrorCode::parse(&error.code)
        .and_then(|code| message_table().get(&code))
        .cloned()
        .unwrap_or_else(generic_failure)
}

/// Fixed entry for a known code, bypassing string parsing. Used when the
/// domain itself decides a failure class (e.g. local email validation
/// before sign-in).
#[must_use]
pub fn normalized_for(code: AuthErrorCode) -> NormalizedAuthError {
    message_table().get(&code).cloned().unwrap_or_else(generic_failure)
}

/// `true` when the raw provider code is a malformed-input failure.
#[must_use]
pub fn is_validation_error(raw_code: &str) -> bool {
    AuthErrorCode::parse(raw_code).is_some_and(AuthErrorCode::is_validation_error)
}

/// `true` when the raw provider code demands reauthentication.
#[must_use]
pub fn requires_reauthentication(raw_code: &str) -> bool {
    AuthErrorCode::parse(raw_code).is_some_and(AuthErrorCode::requires_reauthentication)
}

#[cfg(test)]
#[path = "auth_errors_tests.rs"]
mod tests;
