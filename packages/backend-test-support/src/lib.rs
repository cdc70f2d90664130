//! Shared helpers for the pokedeck backend test binaries.
//!
//! Logging bootstrap for integration tests and generators for values that
//! must stay unique across a test run (usernames, emails).

pub mod logging;
pub mod unique_helpers;
