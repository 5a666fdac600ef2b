//! Domain layer for the Matchday community application.
//!
//! Matchday's UI surfaces (profile, feed, events, settings) talk to a
//! hosted document store and auth provider. This crate owns the logic in
//! between: synchronous input validators, normalization of provider auth
//! errors into fixed user-facing messages, hygiene for engagement data
//! read from the store, and the settings form state machine with its
//! unsaved-changes navigation guard. Everything network-bound goes
//! through the ports in [`domain::ports`]; the crate defines no transport
//! of its own.

pub mod domain;
