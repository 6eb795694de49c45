//! Core components of the `evds-rs` client.
//!
//! This module contains the foundational building blocks of the library, including:
//! - The main [`EvdsClient`] and its builder.
//! - The primary [`EvdsError`] type.
//! - The injectable capabilities the request pipeline relies on: response cache,
//!   credential store and default dates.

/// Response cache capability and the in-memory implementation.
pub mod cache;
/// The main client (`EvdsClient`), builder, and configuration.
pub mod client;
/// API key persistence.
pub mod credentials;
/// Wire date format and default date providers.
pub mod dates;
/// The primary error type (`EvdsError`) for the crate.
pub mod error;

#[cfg(feature = "dataframe")]
pub mod dataframe;

#[cfg(feature = "test-mode")]
pub(crate) mod fixtures;

pub(crate) mod net;

// convenient re-exports so most code can just `use crate::core::EvdsClient`
pub use cache::{MemoryCache, ResponseCache};
pub use client::{EvdsClient, EvdsClientBuilder};
pub use credentials::{CredentialStore, EnvCredentialStore, FileCredentialStore, MemoryCredentialStore};
pub use dates::{DateDefaults, FixedDates, SystemDates};
pub use error::EvdsError;
