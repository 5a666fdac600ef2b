//! Domain ports for the external collaborators.
//!
//! The auth provider and document store are hosted services; the prompt
//! is owned by whichever UI embeds the domain. Adapters implement these
//! traits, tests use the generated mocks or the public fixtures.

mod auth_gateway;
mod document_store;
mod prompt;

pub use auth_gateway::{AuthGateway, AuthSession, FixtureAuthGateway};
#[cfg(test)]
pub use auth_gateway::MockAuthGateway;
pub use document_store::{
    DocumentStoreError, FixturePostStore, FixtureProfileStore, PostStore, ProfileStore,
};
#[cfg(test)]
pub use document_store::{MockPostStore, MockProfileStore};
pub use prompt::{DiscardChangesPrompt, DiscardContext, FixtureDiscardPrompt};
#[cfg(test)]
pub use prompt::MockDiscardChangesPrompt;
