//! Table/Room Session State Machine
//!
//! Governs which operations are legal given current table occupancy:
//!
//! ```text
//! available ──select_table──▶ occupied (tickets open)
//!     ▲                            │
//!     │                      preview_bill (read-only, repeatable)
//!     │                            │
//!     └────────finalize_bill───────┘
//! ```
//!
//! `reserved` is reachable only through an external reservation action and
//! blocks new sessions. A table never terminates; it cycles between
//! available and occupied indefinitely.
//!
//! Session state is an explicit [`TableSession`] context passed into every
//! operation. There is no ambient current-table global, so two terminals
//! driving two engines cannot leak sessions into each other.

mod error;
pub use error::{EngineError, EngineResult};

use crate::billing::compute_breakdown;
use crate::consolidation::{consolidate, ProductCatalog};
use crate::receipt::{self, Invoice, KotSlip};
use crate::stores::{CatalogStore, OrderStore, PricingConfigStore, RoomDirectory, TicketStore};
use shared::models::{
    BillDraft, Order, OrderCreate, OrderItem, PaymentMethod, PricingBreakdown, Room, TableStatus,
    Ticket,
};
use std::sync::Arc;

/// Maximum quantity a single order item may carry
const MAX_QUANTITY: i32 = 9999;

/// Session context bound to one (room, table) pair.
///
/// Created by [`PosEngine::select_table`]; every subsequent operation
/// takes it explicitly. Carries the display names so receipts need no
/// directory round-trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSession {
    pub room_id: String,
    pub table_id: String,
    pub room_name: String,
    pub table_number: String,
}

/// A recomputable bill preview: the consolidated draft plus the derived
/// pricing breakdown. Never mutates persisted state.
#[derive(Debug, Clone, PartialEq)]
pub struct BillPreview {
    pub draft: BillDraft,
    pub breakdown: PricingBreakdown,
}

/// Result of a successful finalization
#[derive(Debug, Clone)]
pub struct FinalizedBill {
    pub order: Order,
    pub invoice: Invoice,
}

/// The engine owning the boundary stores.
///
/// Single-operator from its own perspective; the stores behind it are
/// shared across terminals, so every read is treated as a stale snapshot
/// and re-fetched immediately before computing.
pub struct PosEngine {
    catalog: Arc<dyn CatalogStore>,
    directory: Arc<dyn RoomDirectory>,
    tickets: Arc<dyn TicketStore>,
    orders: Arc<dyn OrderStore>,
    config: Arc<dyn PricingConfigStore>,
}

impl PosEngine {
    pub fn new(
        catalog: Arc<dyn CatalogStore>,
        directory: Arc<dyn RoomDirectory>,
        tickets: Arc<dyn TicketStore>,
        orders: Arc<dyn OrderStore>,
        config: Arc<dyn PricingConfigStore>,
    ) -> Self {
        Self {
            catalog,
            directory,
            tickets,
            orders,
            config,
        }
    }

    /// Active rooms with their tables, for the selection surface.
    pub async fn rooms(&self) -> EngineResult<Vec<Room>> {
        let rooms = self.directory.get_rooms().await?;
        Ok(rooms.into_iter().filter(|r| r.is_active).collect())
    }

    /// Begin (or re-enter) a session on a table.
    ///
    /// Legal for an available table (new session) and for an occupied one
    /// (continuing an existing session from any terminal). Reserved
    /// tables are blocked until the external reservation is lifted.
    pub async fn select_table(&self, room_id: &str, table_id: &str) -> EngineResult<TableSession> {
        let rooms = self.directory.get_rooms().await?;
        let room = rooms
            .iter()
            .find(|r| r.id == room_id && r.is_active)
            .ok_or_else(|| EngineError::RoomNotFound(room_id.to_string()))?;
        let table = room
            .table(table_id)
            .ok_or_else(|| EngineError::TableNotFound(table_id.to_string()))?;

        if table.status == TableStatus::Reserved {
            return Err(EngineError::TableReserved(table_id.to_string()));
        }

        tracing::info!(
            room = %room.name,
            table = %table.table_number,
            status = ?table.status,
            "table session started"
        );

        Ok(TableSession {
            room_id: room.id.clone(),
            table_id: table.id.clone(),
            room_name: room.name.clone(),
            table_number: table.table_number.clone(),
        })
    }

    /// Submit a new kitchen order ticket for the session's table.
    ///
    /// The ticket is immutable after creation; a correction is another
    /// ticket. The first ticket on an available table flips it to
    /// occupied; an already-occupied table keeps its status.
    pub async fn new_ticket(
        &self,
        session: &TableSession,
        items: Vec<OrderItem>,
    ) -> EngineResult<Ticket> {
        validate_items(&items)?;

        // Read the current status before creating, so the occupy write
        // only happens on the available → occupied edge.
        let was_available = self
            .table_status(&session.table_id)
            .await?
            .ok_or_else(|| EngineError::TableNotFound(session.table_id.clone()))?
            == TableStatus::Available;

        let ticket = self
            .tickets
            .create_ticket(&session.table_id, &session.room_id, items)
            .await?;

        if was_available {
            self.directory
                .set_table_status(&session.table_id, TableStatus::Occupied)
                .await?;
        }

        tracing::info!(
            kot = %ticket.kot_number,
            table = %session.table_number,
            items = ticket.items.len(),
            "ticket created"
        );

        Ok(ticket)
    }

    /// Consolidate the table's open tickets and derive the payable amount.
    ///
    /// Pure read path: re-fetches tickets, catalog, and policy, computes,
    /// and mutates nothing. Always legal while the session is active,
    /// including with zero open tickets (empty draft). Calling it twice
    /// with no ticket changes in between yields identical previews.
    pub async fn preview_bill(&self, session: &TableSession) -> EngineResult<BillPreview> {
        self.build_preview(session, PaymentMethod::default()).await
    }

    /// Commit the bill: persist an order, close the contributing tickets,
    /// free the table.
    ///
    /// The three external writes are awaited strictly in that order. A
    /// failure before the order is persisted aborts with no state change;
    /// a failure after it returns [`EngineError::ReconciliationRequired`]
    /// naming the persisted order, because ticket/table state now
    /// disagrees with the order record. The table is deliberately left
    /// occupied in that case.
    pub async fn finalize_bill(
        &self,
        session: &TableSession,
        payment_method: PaymentMethod,
    ) -> EngineResult<FinalizedBill> {
        let preview = self.build_preview(session, payment_method).await?;
        if preview.draft.is_empty() {
            return Err(EngineError::EmptyBill(session.table_id.clone()));
        }

        // All reads complete before the first write.
        let profile = self.config.load_profile().await?;

        let order = self
            .orders
            .create_order(OrderCreate {
                table_id: session.table_id.clone(),
                room_id: session.room_id.clone(),
                ticket_ids: preview.draft.ticket_ids.clone(),
                lines: preview.draft.lines.clone(),
                breakdown: preview.breakdown.clone(),
                payment_method,
            })
            .await?;

        // Point of no return: the order record is durable. Anything that
        // fails from here on is a reconciliation problem, not a rollback.
        if let Err(e) = self.tickets.close_tickets(&preview.draft.ticket_ids).await {
            tracing::error!(
                order_id = %order.id,
                error = %e,
                "order persisted but tickets were not closed"
            );
            return Err(EngineError::ReconciliationRequired {
                order_id: order.id,
                reason: format!("failed to close tickets: {e}"),
            });
        }

        if let Err(e) = self
            .directory
            .set_table_status(&session.table_id, TableStatus::Available)
            .await
        {
            tracing::error!(
                order_id = %order.id,
                error = %e,
                "order persisted and tickets closed but table was not freed"
            );
            return Err(EngineError::ReconciliationRequired {
                order_id: order.id,
                reason: format!("failed to free table: {e}"),
            });
        }

        let invoice = receipt::build_invoice(&profile, session, &preview.draft, &preview.breakdown);

        tracing::info!(
            order_id = %order.id,
            invoice = %invoice.invoice_number,
            table = %session.table_number,
            grand_total = preview.breakdown.grand_total,
            "bill finalized"
        );

        Ok(FinalizedBill { order, invoice })
    }

    /// Abandon the session without finalizing.
    ///
    /// Touches nothing: an occupied table with open tickets stays
    /// occupied, and the tickets remain open for the next session on the
    /// same table.
    pub fn cancel_session(&self, session: TableSession) {
        tracing::info!(table = %session.table_number, "session cancelled");
        drop(session);
    }

    /// Assemble the printable slip for a ticket, resolving product names
    /// against a fresh catalog snapshot.
    pub async fn kot_slip(
        &self,
        session: &TableSession,
        ticket: &Ticket,
    ) -> EngineResult<KotSlip> {
        let profile = self.config.load_profile().await?;
        let catalog = ProductCatalog::new(self.catalog.get_products().await?);
        Ok(receipt::build_kot_slip(&profile, session, ticket, &catalog))
    }

    async fn build_preview(
        &self,
        session: &TableSession,
        payment_method: PaymentMethod,
    ) -> EngineResult<BillPreview> {
        // Fresh snapshots on every run; the stores are shared with other
        // terminals and anything cached at session start may be stale.
        let catalog = ProductCatalog::new(self.catalog.get_products().await?);
        let open_tickets = self.tickets.get_open_tickets(&session.table_id).await?;
        let policy = self.config.load_policy().await?;

        let draft = consolidate(&open_tickets, &catalog, payment_method);
        if draft.skipped_items > 0 {
            tracing::warn!(
                table = %session.table_number,
                skipped = draft.skipped_items,
                "order items dropped: product missing from catalog snapshot"
            );
        }

        let breakdown = compute_breakdown(draft.subtotal, &policy);
        Ok(BillPreview { draft, breakdown })
    }

    async fn table_status(&self, table_id: &str) -> EngineResult<Option<TableStatus>> {
        let rooms = self.directory.get_rooms().await?;
        Ok(rooms
            .iter()
            .flat_map(|r| r.tables.iter())
            .find(|t| t.id == table_id)
            .map(|t| t.status))
    }
}

fn validate_items(items: &[OrderItem]) -> EngineResult<()> {
    if items.is_empty() {
        return Err(EngineError::Validation(
            "a ticket needs at least one item".to_string(),
        ));
    }
    for item in items {
        if item.quantity <= 0 {
            return Err(EngineError::Validation(format!(
                "quantity must be positive, got {} for {}",
                item.quantity, item.product_id
            )));
        }
        if item.quantity > MAX_QUANTITY {
            return Err(EngineError::Validation(format!(
                "quantity exceeds maximum allowed ({}), got {}",
                MAX_QUANTITY, item.quantity
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_items_rejects_empty() {
        assert!(matches!(
            validate_items(&[]),
            Err(EngineError::Validation(_))
        ));
    }

    #[test]
    fn test_validate_items_rejects_non_positive_quantity() {
        let items = vec![OrderItem {
            product_id: "p1".to_string(),
            quantity: 0,
            special_instructions: None,
        }];
        assert!(matches!(
            validate_items(&items),
            Err(EngineError::Validation(_))
        ));
    }

    #[test]
    fn test_validate_items_rejects_excessive_quantity() {
        let items = vec![OrderItem {
            product_id: "p1".to_string(),
            quantity: MAX_QUANTITY + 1,
            special_instructions: None,
        }];
        assert!(matches!(
            validate_items(&items),
            Err(EngineError::Validation(_))
        ));
    }

    #[test]
    fn test_validate_items_accepts_normal_batch() {
        let items = vec![
            OrderItem {
                product_id: "p1".to_string(),
                quantity: 2,
                special_instructions: Some("extra spicy".to_string()),
            },
            OrderItem {
                product_id: "p2".to_string(),
                quantity: 1,
                special_instructions: None,
            },
        ];
        assert!(validate_items(&items).is_ok());
    }
}
