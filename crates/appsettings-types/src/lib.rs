//! Shared types and the store adapter trait for the appsettings engine.
//!
//! This crate holds what both the core engine and the store adapter crates need:
//! the fatal error type and the interface to a hierarchical key-value store.
//! Adapter crates depend on this crate only, never on the engine.

#![forbid(unsafe_code)]

pub mod error;
pub mod prelude;
pub mod store_adapter;

// vim: ts=4
