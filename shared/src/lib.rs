//! Shared domain types for the POS billing core
//!
//! This crate holds the entities exchanged between the billing engine and
//! the external stores (catalog, room directory, ticket store, order store,
//! pricing configuration), plus small utilities for timestamps and
//! identifier tokens. It contains no business logic; the consolidation,
//! invoice arithmetic, and session state machine live in `pos-engine`.

pub mod models;
pub mod util;

pub use models::*;
