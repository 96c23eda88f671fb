//! Kitchen Order Ticket Model

use serde::{Deserialize, Serialize};

/// Ticket status.
///
/// `Preparing` and `Ready` tickets are "open" and contribute to the next
/// consolidation; `Closed` tickets belong to a finalized order and never
/// contribute again.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TicketStatus {
    #[default]
    Preparing,
    Ready,
    Closed,
}

/// One line of an operator-submitted order batch
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderItem {
    /// Product reference (String ID)
    pub product_id: String,
    /// Positive quantity
    pub quantity: i32,
    /// Free-text note routed to the kitchen ("no onions")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_instructions: Option<String>,
}

/// Kitchen Order Ticket entity.
///
/// The item list is fixed at creation; a correction is a new ticket. Only
/// the status field transitions afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ticket {
    pub id: String,
    /// Display token assigned by the ticket store ("KOT-0012")
    pub kot_number: String,
    pub table_id: String,
    pub room_id: String,
    /// Creation timestamp (epoch millis)
    pub created_at: i64,
    pub items: Vec<OrderItem>,
    pub status: TicketStatus,
}

impl Ticket {
    /// Open tickets are the consolidation input set.
    pub fn is_open(&self) -> bool {
        matches!(self.status, TicketStatus::Preparing | TicketStatus::Ready)
    }
}
