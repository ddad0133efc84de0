//! Integration tests for the Suriya back office.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the back-office server against a platform backend
//! cargo run -p suriya-admin
//!
//! # Run integration tests
//! cargo test -p suriya-integration-tests -- --ignored
//! ```
//!
//! Tests live in `tests/` and are `#[ignore]`d by default because they need
//! a running server and a reachable platform backend.

#![cfg_attr(not(test), forbid(unsafe_code))]
