//! Tests for the form input validators.

use super::*;
use rstest::rstest;

#[rstest]
#[case("", "Email is required")]
#[case("   ", "Email is required")]
#[case("not-an-email", "Please enter a valid email address")]
#[case("missing@domain", "Please enter a valid email address")]
#[case("two@@at.com", "Please enter a valid email address")]
fn email_failures(#[case] raw: &str, #[case] expected: &str) {
    let result = validate_email(raw);
    assert!(!result.is_valid);
    assert_eq!(result.error.as_deref(), Some(expected));
}

#[rstest]
#[case("sam@example.com")]
#[case("  padded@example.com  ")]
#[case("first.last@club.co.uk")]
fn email_successes(#[case] raw: &str) {
    assert!(validate_email(raw).is_valid);
}

#[rstest]
#[case("", "Password is required")]
#[case("aB1", "Password must be at least 8 characters")]
// Multiple rules violated: only the highest-priority message surfaces.
#[case("abc", "Password must be at least 8 characters")]
#[case("ALLUPPER1", "Password must contain at least one lowercase letter")]
#[case("alllower1", "Password must contain at least one uppercase letter")]
#[case("NoNumbersHere", "Password must contain at least one number")]
fn password_first_failing_rule_wins(#[case] raw: &str, #[case] expected: &str) {
    let result = validate_password(raw);
    assert!(!result.is_valid);
    assert_eq!(result.error.as_deref(), Some(expected));
    assert!(result.requirements.is_some());
    assert!(result.strength.is_none());
}

#[rstest]
#[case("Abcdef12", PasswordStrength::Weak, 60)]
#[case("Abcdef12!", PasswordStrength::Medium, 80)]
#[case("Abcdefghijk12", PasswordStrength::Medium, 80)]
#[case("Abcdefghijk12!", PasswordStrength::Strong, 100)]
fn password_strength_buckets(
    #[case] raw: &str,
    #[case] strength: PasswordStrength,
    #[case] score: u8,
) {
    let result = validate_password(raw);
    assert!(result.is_valid);
    assert_eq!(result.strength, Some(strength));
    assert_eq!(result.score, Some(score));
}

#[test]
fn valid_password_always_has_defined_strength() {
    for raw in ["Abcdef12", "Zyxwvu98", "Qwerty12345!"] {
        let result = validate_password(raw);
        assert!(result.is_valid);
        assert!(result.strength.is_some(), "no strength for {raw}");
        assert!(result.score.is_some());
    }
}

#[test]
fn password_suggestions_name_unmet_optional_classes() {
    let result = validate_password("Abcdef12");
    let suggestions = result.suggestions.unwrap();
    assert_eq!(suggestions.len(), 2);

    let strong = validate_password("Abcdefghijk12!");
    assert!(strong.suggestions.is_none());
}

#[test]
fn password_respects_policy_minimum() {
    let policy = PasswordPolicy { min_length: 12 };
    let result = validate_password_with(&policy, "Abcdef12");
    assert_eq!(
        result.error.as_deref(),
        Some("Password must be at least 12 characters")
    );
}

#[rstest]
#[case("ab", "Username must be between 3 and 30 characters")]
#[case("", "Username must be between 3 and 30 characters")]
#[case(
    "a-very-long-username-over-the-cap",
    "Username must be between 3 and 30 characters"
)]
#[case(
    "bad name",
    "Username may only contain letters, numbers, underscores, and hyphens"
)]
#[case(
    "nope!",
    "Username may only contain letters, numbers, underscores, and hyphens"
)]
#[case("_edge", "Username cannot start or end with an underscore or hyphen")]
#[case("edge-", "Username cannot start or end with an underscore or hyphen")]
fn username_failures(#[case] raw: &str, #[case] expected: &str) {
    let result = validate_username(raw);
    assert_eq!(result.error.as_deref(), Some(expected));
}

#[rstest]
#[case("sam")]
#[case("sam_striker-09")]
#[case("a1b")]
fn username_successes(#[case] raw: &str) {
    assert!(validate_username(raw).is_valid);
}

#[rstest]
#[case("Sam Striker")]
#[case("keeper_99")]
fn display_name_successes(#[case] raw: &str) {
    assert!(validate_display_name(raw).is_valid);
}

#[rstest]
#[case("", "Display name is required")]
#[case("ab", "Display name must be between 3 and 32 characters")]
#[case(
    "no@symbols",
    "Display name may only contain letters, numbers, spaces, or underscores"
)]
fn display_name_failures(#[case] raw: &str, #[case] expected: &str) {
    assert_eq!(validate_display_name(raw).error.as_deref(), Some(expected));
}

#[test]
fn comment_empty_handling_follows_policy() {
    assert_eq!(
        validate_comment("  ").error.as_deref(),
        Some("Comment cannot be empty")
    );
    let lenient = CommentPolicy {
        allow_empty: true,
        ..CommentPolicy::default()
    };
    assert!(validate_comment_with(&lenient, "").is_valid);
}

#[test]
fn comment_length_bounds() {
    let long = "a ".repeat(300);
    assert_eq!(
        validate_comment(&long).error.as_deref(),
        Some("Comment cannot exceed 500 characters")
    );

    let policy = CommentPolicy {
        min_length: Some(10),
        ..CommentPolicy::default()
    };
    assert_eq!(
        validate_comment_with(&policy, "short").error.as_deref(),
        Some("Comment must be at least 10 characters")
    );
}

#[test]
fn forbidden_words_match_case_insensitively_without_echo() {
    let policy = CommentPolicy {
        forbidden_words: vec!["ringer".to_owned()],
        ..CommentPolicy::default()
    };
    let result = validate_comment_with(&policy, "They fielded a RINGER again");
    let message = result.error.unwrap();
    assert_eq!(message, "Comment contains inappropriate content");
    assert!(!message.to_lowercase().contains("ringer"));
}

#[rstest]
#[case("gooooooal", true)]
#[case("goooooal", false)]
#[case("!!!!!!", true)]
fn repeated_character_heuristic(#[case] raw: &str, #[case] spam: bool) {
    let result = validate_comment(raw);
    assert_eq!(
        result.error.as_deref() == Some("Comment looks like spam"),
        spam
    );
}

#[test]
fn alphanumeric_requirement_is_opt_in() {
    assert!(validate_comment("?!?").is_valid);
    let strict = CommentPolicy {
        require_alphanumeric: true,
        ..CommentPolicy::default()
    };
    assert_eq!(
        validate_comment_with(&strict, "?!?").error.as_deref(),
        Some("Comment must contain letters or numbers")
    );
}
