//! Order Model
//!
//! The persisted result of finalizing a bill. Created exactly once per
//! finalization; the contributing tickets are closed in the same logical
//! transaction and can never feed another order.

use super::billing::{ConsolidatedLine, PaymentMethod, PricingBreakdown};
use serde::{Deserialize, Serialize};

/// Finalized order entity (assigned its id by the order store)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub table_id: String,
    pub room_id: String,
    /// Tickets settled by this order
    pub ticket_ids: Vec<String>,
    pub lines: Vec<ConsolidatedLine>,
    pub breakdown: PricingBreakdown,
    pub payment_method: PaymentMethod,
    /// Creation timestamp (epoch millis)
    pub created_at: i64,
}

/// Create order payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCreate {
    pub table_id: String,
    pub room_id: String,
    pub ticket_ids: Vec<String>,
    pub lines: Vec<ConsolidatedLine>,
    pub breakdown: PricingBreakdown,
    pub payment_method: PaymentMethod,
}
