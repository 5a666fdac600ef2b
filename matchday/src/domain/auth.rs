//! Authentication primitives: sign-in and password-change credentials.
//!
//! Keep inbound payload parsing outside the domain by exposing
//! constructors that validate string inputs before a service talks to the
//! auth gateway. Password material is held in zeroizing buffers so it is
//! wiped when the credentials drop.

use std::fmt;

use zeroize::Zeroizing;

use super::validation::validate_password;

/// Domain error returned when credential values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialValidationError {
    /// Email was missing or blank once trimmed.
    EmptyEmail,
    /// Password was blank.
    EmptyPassword,
    /// Current password was blank.
    EmptyCurrentPassword,
    /// Replacement password failed the password validator.
    WeakNewPassword {
        /// Message from the failed password rule.
        message: String,
    },
    /// Replacement password matches the current one.
    UnchangedPassword,
}

impl fmt::Display for CredentialValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
            Self::EmptyCurrentPassword => write!(f, "current password must not be empty"),
            Self::WeakNewPassword { message } => write!(f, "new password rejected: {message}"),
            Self::UnchangedPassword => {
                write!(f, "new password must differ from the current password")
            }
        }
    }
}

impl std::error::Error for CredentialValidationError {}

/// Validated sign-in credentials.
///
/// ## Invariants
/// - `email` is trimmed and non-empty after trimming.
/// - `password` is non-empty but retains caller-provided whitespace to
///   avoid surprising credential comparisons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignInCredentials {
    email: String,
    password: Zeroizing<String>,
}

impl SignInCredentials {
    /// Construct credentials from raw email/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, CredentialValidationError> {
        let normalized = email.trim();
        if normalized.is_empty() {
            return Err(CredentialValidationError::EmptyEmail);
        }
        if password.is_empty() {
            return Err(CredentialValidationError::EmptyPassword);
        }
        Ok(Self {
            email: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Email string suitable for provider lookups.
    #[must_use]
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Password string provided by the caller.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Validated password-change request.
///
/// The replacement password must pass the password validator before the
/// provider is ever contacted; provider-side `weak-password` rejections
/// still normalize as usual.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordChange {
    current: Zeroizing<String>,
    replacement: Zeroizing<String>,
}

impl PasswordChange {
    /// Construct a password change from the current and replacement
    /// passwords.
    pub fn try_from_parts(
        current: &str,
        replacement: &str,
    ) -> Result<Self, CredentialValidationError> {
        if current.is_empty() {
            return Err(CredentialValidationError::EmptyCurrentPassword);
        }
        let check = validate_password(replacement);
        if let Some(message) = check.error {
            return Err(CredentialValidationError::WeakNewPassword { message });
        }
        if current == replacement {
            return Err(CredentialValidationError::UnchangedPassword);
        }
        Ok(Self {
            current: Zeroizing::new(current.to_owned()),
            replacement: Zeroizing::new(replacement.to_owned()),
        })
    }

    /// The password being replaced.
    #[must_use]
    pub fn current(&self) -> &str {
        self.current.as_str()
    }

    /// The replacement password.
    #[must_use]
    pub fn replacement(&self) -> &str {
        self.replacement.as_str()
    }
}
