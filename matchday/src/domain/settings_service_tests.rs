//! Tests for the settings service.

use std::sync::Arc;

use super::*;
use crate::domain::auth::{PasswordChange, SignInCredentials};
use crate::domain::auth_errors::ProviderError;
use crate::domain::ports::{
    DocumentStoreError, FixtureAuthGateway, FixtureDiscardPrompt, FixtureProfileStore,
    MockAuthGateway, MockDiscardChangesPrompt, MockProfileStore, ProfileStore,
};
use crate::domain::profile::ProfileDocument;
use crate::domain::settings::{FormPhase, SaveStart, SettingsField, SettingsForm, SettingsTab};
use mockall::Sequence;

fn profile() -> ProfileDocument {
    ProfileDocument {
        user_id: "user-1".to_owned(),
        display_name: "Sam Striker".to_owned(),
        username: "sam_striker".to_owned(),
        email: "sam@example.com".to_owned(),
        bio: String::new(),
        updated_at: None,
    }
}

fn service_with_profiles<P: ProfileStore>(
    profiles: P,
) -> SettingsService<P, FixtureAuthGateway, FixtureDiscardPrompt> {
    SettingsService::new(
        Arc::new(profiles),
        Arc::new(FixtureAuthGateway),
        Arc::new(FixtureDiscardPrompt { confirm: true }),
    )
}

fn service_with_auth(
    auth: MockAuthGateway,
) -> SettingsService<FixtureProfileStore, MockAuthGateway, FixtureDiscardPrompt> {
    SettingsService::new(
        Arc::new(FixtureProfileStore::default()),
        Arc::new(auth),
        Arc::new(FixtureDiscardPrompt { confirm: true }),
    )
}

fn service_with_prompt(
    prompt: MockDiscardChangesPrompt,
) -> SettingsService<FixtureProfileStore, FixtureAuthGateway, MockDiscardChangesPrompt> {
    SettingsService::new(
        Arc::new(FixtureProfileStore::with_profile(profile())),
        Arc::new(FixtureAuthGateway),
        Arc::new(prompt),
    )
}

#[tokio::test]
async fn load_form_seeds_fields_from_the_profile() {
    let service = service_with_profiles(FixtureProfileStore::with_profile(profile()));
    let form = service.load_form("user-1").await.expect("profile exists");
    assert_eq!(form.field(SettingsField::Email).value(), "sam@example.com");
    assert!(!form.is_dirty());
}

#[tokio::test]
async fn load_form_reports_a_missing_profile() {
    let service = service_with_profiles(FixtureProfileStore::default());
    let error = service.load_form("user-1").await.expect_err("no profile");
    assert_eq!(
        error,
        SettingsError::ProfileMissing {
            user_id: "user-1".to_owned(),
        }
    );
}

#[tokio::test]
async fn save_persists_the_draft_and_commits_the_form() {
    let store = FixtureProfileStore::with_profile(profile());
    let service = SettingsService::new(
        Arc::new(store),
        Arc::new(FixtureAuthGateway),
        Arc::new(FixtureDiscardPrompt { confirm: true }),
    );
    let mut form = service.load_form("user-1").await.expect("profile exists");
    form.edit(SettingsField::Bio, "Five-a-side on Thursdays");

    let outcome = service.save(&mut form, "user-1").await;
    assert_eq!(outcome, SaveOutcome::Saved);
    assert_eq!(form.phase(), FormPhase::Idle);
    assert!(!form.is_dirty());
}

#[tokio::test]
async fn save_surfaces_store_failures_as_a_page_banner() {
    let mut profiles = MockProfileStore::new();
    profiles.expect_save_profile().times(1).returning(|_, _| {
        Err(DocumentStoreError::Query {
            message: "quota exceeded".to_owned(),
        })
    });
    let service = SettingsService::new(
        Arc::new(profiles),
        Arc::new(FixtureAuthGateway),
        Arc::new(FixtureDiscardPrompt { confirm: true }),
    );

    let mut form = SettingsForm::for_profile(&profile());
    form.edit(SettingsField::Bio, "unsaved");

    let outcome = service.save(&mut form, "user-1").await;
    assert_eq!(outcome, SaveOutcome::Failed);
    assert_eq!(form.phase(), FormPhase::Editing);
    assert_eq!(
        form.page_error(),
        Some("Could not save your changes. Please try again.")
    );
    // The store detail is logged, never rendered.
    assert!(!form.page_error().unwrap_or_default().contains("quota"));
}

#[tokio::test]
async fn save_drops_a_submit_while_one_is_in_flight() {
    let service = service_with_profiles(FixtureProfileStore::with_profile(profile()));
    let mut form = SettingsForm::for_profile(&profile());
    form.edit(SettingsField::Bio, "dirty");

    // Occupy the save slot as an in-flight save would.
    assert!(matches!(form.begin_save(), SaveStart::Started(_)));
    assert_eq!(
        service.save(&mut form, "user-1").await,
        SaveOutcome::AlreadySaving
    );
}

#[tokio::test]
async fn clean_tab_switches_never_reach_the_prompt() {
    let mut prompt = MockDiscardChangesPrompt::new();
    prompt.expect_confirm_discard().times(0);
    let service = service_with_prompt(prompt);

    let mut form = SettingsForm::for_profile(&profile());
    let outcome = service.switch_tab(&mut form, SettingsTab::Account).await;
    assert_eq!(outcome, TabSwitchOutcome::Switched);
    assert_eq!(form.active_tab(), SettingsTab::Account);
}

#[tokio::test]
async fn declined_prompt_keeps_the_tab_and_the_edits() {
    let mut prompt = MockDiscardChangesPrompt::new();
    prompt
        .expect_confirm_discard()
        .times(1)
        .returning(|_| false);
    let service = service_with_prompt(prompt);

    let mut form = SettingsForm::for_profile(&profile());
    form.edit(SettingsField::Bio, "unsaved");

    let outcome = service.switch_tab(&mut form, SettingsTab::Account).await;
    assert_eq!(outcome, TabSwitchOutcome::Cancelled);
    assert_eq!(form.active_tab(), SettingsTab::Profile);
    assert!(form.is_dirty());
}

#[tokio::test]
async fn confirmed_prompt_discards_edits_and_switches() {
    let mut prompt = MockDiscardChangesPrompt::new();
    prompt.expect_confirm_discard().times(1).returning(|_| true);
    let service = service_with_prompt(prompt);

    let mut form = SettingsForm::for_profile(&profile());
    form.edit(SettingsField::Bio, "unsaved");

    let outcome = service.switch_tab(&mut form, SettingsTab::Privacy).await;
    assert_eq!(outcome, TabSwitchOutcome::Switched);
    assert_eq!(form.active_tab(), SettingsTab::Privacy);
    assert!(!form.is_dirty());
}

#[tokio::test]
async fn exit_unmounts_the_form_when_confirmed() {
    let service = service_with_profiles(FixtureProfileStore::with_profile(profile()));
    let mut form = SettingsForm::for_profile(&profile());
    form.edit(SettingsField::Bio, "unsaved");

    let outcome = service.exit(&mut form).await;
    assert_eq!(outcome, ExitOutcome::Exited);
    assert!(!form.is_mounted());
}

#[tokio::test]
async fn sign_in_normalizes_provider_failures() {
    let mut auth = MockAuthGateway::new();
    auth.expect_sign_in().times(1).returning(|_| {
        Err(ProviderError {
            code: "auth/wrong-password".to_owned(),
            message: Some("rejected for sam@example.com".to_owned()),
        })
    });
    let service = service_with_auth(auth);

    let credentials = SignInCredentials::try_from_parts("sam@example.com", "Wrong1pass")
        .expect("credentials are well formed");
    let error = service
        .sign_in(&credentials)
        .await
        .expect_err("provider rejected the password");
    assert_eq!(error.message, "Incorrect password.");
    assert!(!error.message.contains("sam@example.com"));
}

#[tokio::test]
async fn change_password_reauthenticates_and_retries_once() {
    let mut auth = MockAuthGateway::new();
    let mut seq = Sequence::new();
    auth.expect_change_password()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Err(ProviderError::from_code("auth/requires-recent-login")));
    auth.expect_reauthenticate()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok(()));
    auth.expect_change_password()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok(()));
    let service = service_with_auth(auth);

    let change =
        PasswordChange::try_from_parts("OldPass1", "NewPass2!").expect("change is well formed");
    let reauth = SignInCredentials::try_from_parts("sam@example.com", "OldPass1")
        .expect("credentials are well formed");

    service
        .change_password(&change, Some(&reauth))
        .await
        .expect("reauth-then-retry should succeed");
}

#[tokio::test]
async fn change_password_without_reauth_credentials_surfaces_the_entry() {
    let mut auth = MockAuthGateway::new();
    auth.expect_change_password()
        .times(1)
        .returning(|_| Err(ProviderError::from_code("auth/requires-recent-login")));
    let service = service_with_auth(auth);

    let change =
        PasswordChange::try_from_parts("OldPass1", "NewPass2!").expect("change is well formed");
    let error = service
        .change_password(&change, None)
        .await
        .expect_err("no credentials to reauthenticate with");
    assert_eq!(error.message, "Please sign in again to continue.");
}

#[tokio::test]
async fn change_password_normalizes_other_failures_without_retrying() {
    let mut auth = MockAuthGateway::new();
    auth.expect_change_password()
        .times(1)
        .returning(|_| Err(ProviderError::from_code("auth/wrong-password")));
    auth.expect_reauthenticate().times(0);
    let service = service_with_auth(auth);

    let change =
        PasswordChange::try_from_parts("OldPass1", "NewPass2!").expect("change is well formed");
    let error = service
        .change_password(&change, None)
        .await
        .expect_err("wrong current password");
    assert_eq!(error.message, "Incorrect password.");
    assert!(!error.can_retry);
}
