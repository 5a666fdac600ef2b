//! Form input validators shared by the settings, composer, and auth
//! surfaces.
//!
//! Validators are pure and synchronous: raw string in, [`ValidationResult`]
//! out, no I/O. Each rule carries its own user-facing message and the
//! first failing rule wins, so a value violating several rules reports
//! only the highest-priority one. Failures are values, never errors —
//! the UI renders them next to the field that produced them.

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

/// Default minimum password length.
pub const PASSWORD_MIN_LENGTH: usize = 8;
/// Default maximum comment length, in characters.
pub const COMMENT_MAX_LENGTH: usize = 500;
/// Minimum allowed username length.
pub const USERNAME_MIN: usize = 3;
/// Maximum allowed username length.
pub const USERNAME_MAX: usize = 30;
/// Minimum allowed display name length.
pub const DISPLAY_NAME_MIN: usize = 3;
/// Maximum allowed display name length.
pub const DISPLAY_NAME_MAX: usize = 32;

/// Extra characters beyond the minimum before length counts toward
/// password strength.
const STRONG_LENGTH_MARGIN: usize = 4;
/// Score for meeting the four base password rules.
const PASSWORD_BASE_SCORE: u8 = 60;
/// Score added per optional password class satisfied.
const OPTIONAL_CLASS_SCORE: u8 = 20;
/// Longest tolerated run of one repeated character in a comment.
const MAX_CHAR_RUN: usize = 5;

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        let pattern = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Qualitative password strength bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PasswordStrength {
    /// Meets the base rules and nothing more.
    Weak,
    /// One optional class satisfied.
    Medium,
    /// Every optional class satisfied.
    Strong,
}

impl PasswordStrength {
    /// Bucket a 0–100 strength score.
    #[must_use]
    pub const fn from_score(score: u8) -> Self {
        if score < 70 {
            Self::Weak
        } else if score < 90 {
            Self::Medium
        } else {
            Self::Strong
        }
    }
}

/// Checklist of password rules, met or not, for rendering next to the
/// password field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordRequirements {
    /// Length meets the policy minimum.
    pub min_length: bool,
    /// Contains a lowercase letter.
    pub has_lowercase: bool,
    /// Contains an uppercase letter.
    pub has_uppercase: bool,
    /// Contains a digit.
    pub has_number: bool,
    /// Contains a non-alphanumeric character.
    pub has_special_char: bool,
}

impl PasswordRequirements {
    fn inspect(policy: &PasswordPolicy, raw: &str) -> Self {
        Self {
            min_length: raw.chars().count() >= policy.min_length,
            has_lowercase: raw.chars().any(|c| c.is_ascii_lowercase()),
            has_uppercase: raw.chars().any(|c| c.is_ascii_uppercase()),
            has_number: raw.chars().any(|c| c.is_ascii_digit()),
            has_special_char: raw.chars().any(|c| !c.is_alphanumeric()),
        }
    }
}

/// Outcome of a single validation call.
///
/// Produced fresh per call and never mutated afterwards. Only password
/// validation populates the strength fields; everything else reports
/// validity and at most one message.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    /// `true` when every applicable rule passed.
    pub is_valid: bool,
    /// Message for the highest-priority failed rule.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Concrete improvements for a valid-but-improvable password.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<Vec<String>>,
    /// Qualitative password strength.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strength: Option<PasswordStrength>,
    /// Password strength score, 0–100.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<u8>,
    /// Password rule checklist.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requirements: Option<PasswordRequirements>,
}

impl ValidationResult {
    /// A passing result with no extra detail.
    #[must_use]
    pub const fn valid() -> Self {
        Self {
            is_valid: true,
            error: None,
            suggestions: None,
            strength: None,
            score: None,
            requirements: None,
        }
    }

    /// A failing result carrying the rule's message.
    #[must_use]
    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            error: Some(message.into()),
            suggestions: None,
            strength: None,
            score: None,
            requirements: None,
        }
    }

    fn with_requirements(mut self, requirements: PasswordRequirements) -> Self {
        self.requirements = Some(requirements);
        self
    }
}

/// Password rule configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordPolicy {
    /// Minimum password length, in characters.
    pub min_length: usize,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            min_length: PASSWORD_MIN_LENGTH,
        }
    }
}

/// Comment rule configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentPolicy {
    /// Minimum comment length, in characters.
    pub min_length: Option<usize>,
    /// Maximum comment length, in characters; `None` uses
    /// [`COMMENT_MAX_LENGTH`].
    pub max_length: Option<usize>,
    /// Case-insensitive substrings that reject the comment.
    pub forbidden_words: Vec<String>,
    /// Require at least one letter or digit.
    pub require_alphanumeric: bool,
    /// Accept an empty comment.
    pub allow_empty: bool,
}

/// Validate an email address.
#[must_use]
pub fn validate_email(raw: &str) -> ValidationResult {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return ValidationResult::invalid("Email is required");
    }
    if !email_regex().is_match(trimmed) {
        return ValidationResult::invalid("Please enter a valid email address");
    }
    ValidationResult::valid()
}

/// Validate a password against the default policy.
///
/// # Examples
/// ```
/// use matchday::domain::{PasswordStrength, validate_password};
///
/// let result = validate_password("Goalline9!striker");
/// assert!(result.is_valid);
/// assert_eq!(result.strength, Some(PasswordStrength::Strong));
/// ```
#[must_use]
pub fn validate_password(raw: &str) -> ValidationResult {
    validate_password_with(&PasswordPolicy::default(), raw)
}

/// Validate a password against an explicit policy.
///
/// Rules apply in order — empty, length, lowercase, uppercase, number —
/// and the first unmet rule's message is the one reported. Every result,
/// passing or failing, carries the full requirements checklist. Valid
/// passwords are additionally scored on two optional classes: a special
/// character, and length at least four characters beyond the minimum.
#[must_use]
pub fn validate_password_with(policy: &PasswordPolicy, raw: &str) -> ValidationResult {
    let requirements = PasswordRequirements::inspect(policy, raw);
    if raw.is_empty() {
        return ValidationResult::invalid("Password is required").with_requirements(requirements);
    }
    if !requirements.min_length {
        return ValidationResult::invalid(format!(
            "Password must be at least {} characters",
            policy.min_length
        ))
        .with_requirements(requirements);
    }
    if !requirements.has_lowercase {
        return ValidationResult::invalid("Password must contain at least one lowercase letter")
            .with_requirements(requirements);
    }
    if !requirements.has_uppercase {
        return ValidationResult::invalid("Password must contain at least one uppercase letter")
            .with_requirements(requirements);
    }
    if !requirements.has_number {
        return ValidationResult::invalid("Password must contain at least one number")
            .with_requirements(requirements);
    }

    let comfortable_length = policy.min_length + STRONG_LENGTH_MARGIN;
    let is_long = raw.chars().count() >= comfortable_length;
    let classes = u8::from(requirements.has_special_char) + u8::from(is_long);
    let score = PASSWORD_BASE_SCORE + OPTIONAL_CLASS_SCORE * classes;

    let mut suggestions = Vec::new();
    if !requirements.has_special_char {
        suggestions.push("Add a symbol for a stronger password".to_owned());
    }
    if !is_long {
        suggestions.push(format!(
            "Use {comfortable_length} or more characters for a stronger password"
        ));
    }

    ValidationResult {
        is_valid: true,
        error: None,
        suggestions: (!suggestions.is_empty()).then_some(suggestions),
        strength: Some(PasswordStrength::from_score(score)),
        score: Some(score),
        requirements: Some(requirements),
    }
}

/// Validate a username.
///
/// Rules apply in order: length, charset, edge characters.
#[must_use]
pub fn validate_username(raw: &str) -> ValidationResult {
    let length = raw.chars().count();
    if length < USERNAME_MIN || length > USERNAME_MAX {
        return ValidationResult::invalid(format!(
            "Username must be between {USERNAME_MIN} and {USERNAME_MAX} characters"
        ));
    }
    let allowed = |c: char| c.is_ascii_alphanumeric() || c == '_' || c == '-';
    if !raw.chars().all(allowed) {
        return ValidationResult::invalid(
            "Username may only contain letters, numbers, underscores, and hyphens",
        );
    }
    let edge = |c: char| c == '_' || c == '-';
    if raw.starts_with(edge) || raw.ends_with(edge) {
        return ValidationResult::invalid(
            "Username cannot start or end with an underscore or hyphen",
        );
    }
    ValidationResult::valid()
}

/// Validate a display name.
#[must_use]
pub fn validate_display_name(raw: &str) -> ValidationResult {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return ValidationResult::invalid("Display name is required");
    }
    let length = trimmed.chars().count();
    if length < DISPLAY_NAME_MIN || length > DISPLAY_NAME_MAX {
        return ValidationResult::invalid(format!(
            "Display name must be between {DISPLAY_NAME_MIN} and {DISPLAY_NAME_MAX} characters"
        ));
    }
    let allowed = |c: char| c.is_alphanumeric() || c == ' ' || c == '_';
    if !trimmed.chars().all(allowed) {
        return ValidationResult::invalid(
            "Display name may only contain letters, numbers, spaces, or underscores",
        );
    }
    ValidationResult::valid()
}

/// Validate comment text against the default policy.
#[must_use]
pub fn validate_comment(raw: &str) -> ValidationResult {
    validate_comment_with(&CommentPolicy::default(), raw)
}

/// Validate comment text against an explicit policy.
///
/// The forbidden-word rule reports a generic message; the matched word is
/// never echoed back.
#[must_use]
pub fn validate_comment_with(policy: &CommentPolicy, raw: &str) -> ValidationResult {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        if policy.allow_empty {
            return ValidationResult::valid();
        }
        return ValidationResult::invalid("Comment cannot be empty");
    }

    let length = trimmed.chars().count();
    if let Some(min) = policy.min_length {
        if length < min {
            return ValidationResult::invalid(format!(
                "Comment must be at least {min} characters"
            ));
        }
    }
    let max = policy.max_length.unwrap_or(COMMENT_MAX_LENGTH);
    if length > max {
        return ValidationResult::invalid(format!("Comment cannot exceed {max} characters"));
    }

    let lowered = trimmed.to_lowercase();
    let contains_forbidden = policy
        .forbidden_words
        .iter()
        .filter(|word| !word.is_empty())
        .any(|word| lowered.contains(&word.to_lowercase()));
    if contains_forbidden {
        return ValidationResult::invalid("Comment contains inappropriate content");
    }

    if has_excessive_run(trimmed) {
        return ValidationResult::invalid("Comment looks like spam");
    }

    if policy.require_alphanumeric && !trimmed.chars().any(char::is_alphanumeric) {
        return ValidationResult::invalid("Comment must contain letters or numbers");
    }

    ValidationResult::valid()
}

/// `true` when any single character repeats more than [`MAX_CHAR_RUN`]
/// times consecutively.
fn has_excessive_run(text: &str) -> bool {
    let mut previous: Option<char> = None;
    let mut run = 0usize;
    for c in text.chars() {
        if previous == Some(c) {
            run += 1;
        } else {
            previous = Some(c);
            run = 1;
        }
        if run > MAX_CHAR_RUN {
            return true;
        }
    }
    false
}

#[cfg(test)]
#[path = "validation_tests.rs"]
mod tests;
