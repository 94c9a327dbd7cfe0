//! # Bitva client
//!
//! `bitva` is the client side of the Bitva trading platform: an authenticated HTTP
//! client for the platform API, a route guard that decides whether a protected view may
//! be shown, and a command-line front end over both.
//!
//! ## Session
//!
//! Credentials live in a [`session::SessionStore`] injected into every consumer. The
//! CLI uses a JSON file; tests and embedders can use the in-memory store. The store is
//! read fresh on every request and every guard check.
//!
//! ## Token lifecycle
//!
//! - **Sign-in** persists the access token and display identity, and sets a default
//!   bearer header on the client.
//! - **Every request** carries `Authorization: Bearer <token>` from the store.
//! - **Any 401** purges the stored token and the default header before the error
//!   reaches the caller.
//! - **Sign-out** clears the local session whether or not the API acknowledged it.
//!
//! The guard only decodes the token's `exp` claim; it never verifies signatures.
//! Revocation is enforced by the API.

pub mod api;
pub mod cli;
pub mod features;
pub mod guard;
pub mod session;

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);
