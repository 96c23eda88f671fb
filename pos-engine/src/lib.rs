//! POS Billing Engine
//!
//! The operational core of the point-of-sale workflow: it merges the
//! kitchen order tickets open against one table into a deduplicated bill,
//! derives the discount/tax breakdown under a fixed arithmetic order, and
//! governs the table occupancy lifecycle that bounds when ordering,
//! consolidation, and settlement are legal.
//!
//! # Architecture
//!
//! ```text
//! select_table ──▶ TableSession
//!       │
//!       ▼
//! new_ticket ──▶ TicketStore (status: preparing)
//!       │
//!       ▼
//! preview_bill ──▶ consolidation ──▶ billing ──▶ BillPreview
//!       │
//!       ▼
//! finalize_bill ──▶ OrderStore.create ─▶ TicketStore.close ─▶ table freed
//! ```
//!
//! Everything external (catalog, room directory, ticket store, order
//! store, pricing configuration) sits behind the async traits in
//! [`stores`]. The engine treats every read as a stale snapshot and
//! re-fetches immediately before computing.

pub mod billing;
pub mod consolidation;
pub mod receipt;
pub mod session;
pub mod stores;

// Re-exports
pub use billing::compute_breakdown;
pub use consolidation::{consolidate, ProductCatalog};
pub use receipt::{Invoice, KotSlip};
pub use session::{BillPreview, EngineError, EngineResult, FinalizedBill, PosEngine, TableSession};
pub use stores::{
    CatalogStore, OrderStore, PricingConfigStore, RoomDirectory, StoreError, StoreResult,
    TicketStore,
};
