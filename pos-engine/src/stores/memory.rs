//! In-memory store implementations
//!
//! Backing stores for the engine's own tests and for embedding without a
//! remote data store. Each write-capable store carries a fault switch so
//! the finalize failure paths (abort, reconciliation) are exercisable.

use super::{
    CatalogStore, OrderStore, PricingConfigStore, RoomDirectory, StoreError, StoreResult,
    TicketStore,
};
use async_trait::async_trait;
use parking_lot::RwLock;
use shared::models::{
    Category, Order, OrderCreate, OrderItem, PricingPolicy, Product, Room, StoreProfile,
    TableStatus, Ticket, TicketStatus,
};
use shared::util::now_millis;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

/// Fixed catalog snapshot
#[derive(Default)]
pub struct InMemoryCatalog {
    products: RwLock<Vec<Product>>,
    categories: RwLock<Vec<Category>>,
}

impl InMemoryCatalog {
    pub fn new(products: Vec<Product>, categories: Vec<Category>) -> Self {
        Self {
            products: RwLock::new(products),
            categories: RwLock::new(categories),
        }
    }

    pub fn replace_products(&self, products: Vec<Product>) {
        *self.products.write() = products;
    }
}

#[async_trait]
impl CatalogStore for InMemoryCatalog {
    async fn get_products(&self) -> StoreResult<Vec<Product>> {
        Ok(self.products.read().clone())
    }

    async fn get_categories(&self) -> StoreResult<Vec<Category>> {
        Ok(self.categories.read().clone())
    }
}

/// Room directory with mutable table status
#[derive(Default)]
pub struct InMemoryRoomDirectory {
    rooms: RwLock<Vec<Room>>,
    fail_status_writes: AtomicBool,
}

impl InMemoryRoomDirectory {
    pub fn new(rooms: Vec<Room>) -> Self {
        Self {
            rooms: RwLock::new(rooms),
            fail_status_writes: AtomicBool::new(false),
        }
    }

    /// Make subsequent `set_table_status` calls fail.
    pub fn set_fail_status_writes(&self, fail: bool) {
        self.fail_status_writes.store(fail, Ordering::SeqCst);
    }

    /// Current status of a table, for assertions.
    pub fn table_status(&self, table_id: &str) -> Option<TableStatus> {
        self.rooms
            .read()
            .iter()
            .flat_map(|r| r.tables.iter())
            .find(|t| t.id == table_id)
            .map(|t| t.status)
    }
}

#[async_trait]
impl RoomDirectory for InMemoryRoomDirectory {
    async fn get_rooms(&self) -> StoreResult<Vec<Room>> {
        Ok(self.rooms.read().clone())
    }

    async fn set_table_status(&self, table_id: &str, status: TableStatus) -> StoreResult<()> {
        if self.fail_status_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable(
                "room directory rejected status write".to_string(),
            ));
        }
        let mut rooms = self.rooms.write();
        for room in rooms.iter_mut() {
            if let Some(table) = room.tables.iter_mut().find(|t| t.id == table_id) {
                table.status = status;
                return Ok(());
            }
        }
        Err(StoreError::NotFound(format!("table {table_id}")))
    }
}

/// Ticket store with sequential KOT numbering
#[derive(Default)]
pub struct InMemoryTicketStore {
    tickets: RwLock<Vec<Ticket>>,
    seq: AtomicU64,
    fail_closes: AtomicBool,
}

impl InMemoryTicketStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent `close_tickets` calls fail without mutating state.
    pub fn set_fail_closes(&self, fail: bool) {
        self.fail_closes.store(fail, Ordering::SeqCst);
    }

    /// Status of a ticket by id, for assertions.
    pub fn ticket_status(&self, ticket_id: &str) -> Option<TicketStatus> {
        self.tickets
            .read()
            .iter()
            .find(|t| t.id == ticket_id)
            .map(|t| t.status)
    }
}

#[async_trait]
impl TicketStore for InMemoryTicketStore {
    async fn get_open_tickets(&self, table_id: &str) -> StoreResult<Vec<Ticket>> {
        Ok(self
            .tickets
            .read()
            .iter()
            .filter(|t| t.table_id == table_id && t.is_open())
            .cloned()
            .collect())
    }

    async fn create_ticket(
        &self,
        table_id: &str,
        room_id: &str,
        items: Vec<OrderItem>,
    ) -> StoreResult<Ticket> {
        let seq = self.seq.fetch_add(1, Ordering::SeqCst) + 1;
        let ticket = Ticket {
            id: format!("kot-{seq}"),
            kot_number: format!("KOT-{seq:04}"),
            table_id: table_id.to_string(),
            room_id: room_id.to_string(),
            created_at: now_millis(),
            items,
            status: TicketStatus::Preparing,
        };
        self.tickets.write().push(ticket.clone());
        Ok(ticket)
    }

    async fn close_tickets(&self, ticket_ids: &[String]) -> StoreResult<()> {
        if self.fail_closes.load(Ordering::SeqCst) {
            return Err(StoreError::Timeout(
                "ticket store did not acknowledge close".to_string(),
            ));
        }
        let mut tickets = self.tickets.write();
        for id in ticket_ids {
            match tickets.iter_mut().find(|t| t.id == *id) {
                Some(ticket) => ticket.status = TicketStatus::Closed,
                None => return Err(StoreError::NotFound(format!("ticket {id}"))),
            }
        }
        Ok(())
    }
}

/// Order store assigning sequential ids
#[derive(Default)]
pub struct InMemoryOrderStore {
    orders: RwLock<Vec<Order>>,
    fail_creates: AtomicBool,
}

impl InMemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent `create_order` calls fail.
    pub fn set_fail_creates(&self, fail: bool) {
        self.fail_creates.store(fail, Ordering::SeqCst);
    }

    pub fn orders(&self) -> Vec<Order> {
        self.orders.read().clone()
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn create_order(&self, order: OrderCreate) -> StoreResult<Order> {
        if self.fail_creates.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable(
                "order store unavailable".to_string(),
            ));
        }
        let order = Order {
            id: format!("order-{}", uuid::Uuid::new_v4()),
            table_id: order.table_id,
            room_id: order.room_id,
            ticket_ids: order.ticket_ids,
            lines: order.lines,
            breakdown: order.breakdown,
            payment_method: order.payment_method,
            created_at: now_millis(),
        };
        self.orders.write().push(order.clone());
        Ok(order)
    }
}

/// Pricing policy and store profile holder
pub struct InMemoryPricingConfig {
    policy: RwLock<PricingPolicy>,
    profile: RwLock<StoreProfile>,
}

impl InMemoryPricingConfig {
    pub fn new(policy: PricingPolicy, profile: StoreProfile) -> Self {
        Self {
            policy: RwLock::new(policy),
            profile: RwLock::new(profile),
        }
    }
}

impl Default for InMemoryPricingConfig {
    fn default() -> Self {
        Self::new(PricingPolicy::default(), StoreProfile::default())
    }
}

#[async_trait]
impl PricingConfigStore for InMemoryPricingConfig {
    async fn load_policy(&self) -> StoreResult<PricingPolicy> {
        Ok(*self.policy.read())
    }

    async fn save_policy(&self, policy: PricingPolicy) -> StoreResult<()> {
        *self.policy.write() = policy;
        Ok(())
    }

    async fn load_profile(&self) -> StoreResult<StoreProfile> {
        Ok(self.profile.read().clone())
    }

    async fn save_profile(&self, profile: StoreProfile) -> StoreResult<()> {
        *self.profile.write() = profile;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_ticket_store_numbering_and_open_filter() {
        let store = InMemoryTicketStore::new();
        let a = store
            .create_ticket("t7", "room-1", vec![])
            .await
            .unwrap();
        let b = store
            .create_ticket("t7", "room-1", vec![])
            .await
            .unwrap();
        assert_eq!(a.kot_number, "KOT-0001");
        assert_eq!(b.kot_number, "KOT-0002");

        store.close_tickets(&[a.id.clone()]).await.unwrap();
        let open = store.get_open_tickets("t7").await.unwrap();
        assert_eq!(open.len(), 1);
        assert_eq!(open[0].id, b.id);
    }

    #[tokio::test]
    async fn test_close_unknown_ticket_is_not_found() {
        let store = InMemoryTicketStore::new();
        let err = store
            .close_tickets(&["kot-missing".to_string()])
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_fail_closes_leaves_tickets_untouched() {
        let store = InMemoryTicketStore::new();
        let t = store
            .create_ticket("t7", "room-1", vec![])
            .await
            .unwrap();
        store.set_fail_closes(true);
        assert!(store.close_tickets(&[t.id.clone()]).await.is_err());
        assert_eq!(store.ticket_status(&t.id), Some(TicketStatus::Preparing));
    }
}
