//! Boundary contracts for the external stores
//!
//! Rooms, tables, products, tickets, orders, and the pricing configuration
//! all live in a remote data store shared across terminals. The engine
//! only ever sees them through these traits, treats every read as a stale
//! snapshot, and re-fetches immediately before computing.
//!
//! Read failures must surface as errors, never as an empty result that
//! the operator could mistake for "no open tickets".

pub mod memory;

use async_trait::async_trait;
use shared::models::{
    Category, Order, OrderCreate, OrderItem, PricingPolicy, Product, Room, StoreProfile,
    TableStatus, Ticket,
};
use thiserror::Error;

/// External store failures
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("store call timed out: {0}")]
    Timeout(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("store rejected the request: {0}")]
    Rejected(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Read-only product catalog
#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn get_products(&self) -> StoreResult<Vec<Product>>;
    async fn get_categories(&self) -> StoreResult<Vec<Category>>;
}

/// Room/table directory with current occupancy status.
///
/// `set_table_status` is invoked only by the state machine's open and
/// finalize transitions; ownership of the actual mutation lives in the
/// external store, the engine issues the intent.
#[async_trait]
pub trait RoomDirectory: Send + Sync {
    async fn get_rooms(&self) -> StoreResult<Vec<Room>>;
    async fn set_table_status(&self, table_id: &str, status: TableStatus) -> StoreResult<()>;
}

/// Kitchen order ticket store
#[async_trait]
pub trait TicketStore: Send + Sync {
    async fn get_open_tickets(&self, table_id: &str) -> StoreResult<Vec<Ticket>>;
    async fn create_ticket(
        &self,
        table_id: &str,
        room_id: &str,
        items: Vec<OrderItem>,
    ) -> StoreResult<Ticket>;
    async fn close_tickets(&self, ticket_ids: &[String]) -> StoreResult<()>;
}

/// Finalized order store
#[async_trait]
pub trait OrderStore: Send + Sync {
    async fn create_order(&self, order: OrderCreate) -> StoreResult<Order>;
}

/// Pricing and company identity configuration
#[async_trait]
pub trait PricingConfigStore: Send + Sync {
    async fn load_policy(&self) -> StoreResult<PricingPolicy>;
    async fn save_policy(&self, policy: PricingPolicy) -> StoreResult<()>;
    async fn load_profile(&self) -> StoreResult<StoreProfile>;
    async fn save_profile(&self, profile: StoreProfile) -> StoreResult<()>;
}
