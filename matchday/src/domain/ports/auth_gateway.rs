//! Port for the hosted auth provider.

use async_trait::async_trait;

use crate::domain::auth::{PasswordChange, SignInCredentials};
use crate::domain::auth_errors::ProviderError;

/// Session material returned by a successful sign-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSession {
    /// Provider-issued user id.
    pub user_id: String,
    /// Email the session was established with.
    pub email: String,
}

/// Operations the auth provider exposes to this layer.
///
/// Every failure carries the provider's `{code, message}` pair; callers
/// normalize it before anything reaches a user.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// Establish a session.
    async fn sign_in(&self, credentials: &SignInCredentials)
    -> Result<AuthSession, ProviderError>;

    /// Replace the current user's password.
    async fn change_password(&self, change: &PasswordChange) -> Result<(), ProviderError>;

    /// Re-prove credentials ahead of a sensitive operation.
    async fn reauthenticate(&self, credentials: &SignInCredentials) -> Result<(), ProviderError>;
}

/// Fixture gateway that accepts every operation.
///
/// Use in tests where provider behaviour is not under test.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureAuthGateway;

#[async_trait]
impl AuthGateway for FixtureAuthGateway {
    async fn sign_in(
        &self,
        credentials: &SignInCredentials,
    ) -> Result<AuthSession, ProviderError> {
        Ok(AuthSession {
            user_id: "fixture-user".to_owned(),
            email: credentials.email().to_owned(),
        })
    }

    async fn change_password(&self, _change: &PasswordChange) -> Result<(), ProviderError> {
        Ok(())
    }

    async fn reauthenticate(
        &self,
        _credentials: &SignInCredentials,
    ) -> Result<(), ProviderError> {
        Ok(())
    }
}
