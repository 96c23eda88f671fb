//! Printable document assembly
//!
//! The external renderer turns these into 80mm receipts and QR codes; its
//! only input is a complete, already-computed document. Nothing here
//! re-derives an amount: every monetary field is copied from the
//! breakdown that finalization produced, so a reprint always matches the
//! committed invoice.

use crate::consolidation::ProductCatalog;
use crate::session::TableSession;
use serde::{Deserialize, Serialize};
use shared::models::{
    BillDraft, ConsolidatedLine, PaymentMethod, PricingBreakdown, StoreProfile, Ticket,
};
use shared::util::{invoice_number, now_millis};

/// A finalized invoice document
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Invoice {
    /// Dense token assigned at issuance, unique within operational
    /// timescales
    pub invoice_number: String,
    /// Company identity header
    pub store: StoreProfile,
    pub room_name: String,
    pub table_number: String,
    pub payment_method: PaymentMethod,
    pub lines: Vec<ConsolidatedLine>,
    pub breakdown: PricingBreakdown,
    /// Sum of line quantities (receipt footer)
    pub total_items: i32,
    /// Issuance timestamp (epoch millis)
    pub issued_at: i64,
}

impl Invoice {
    /// Machine-readable payload for the invoice QR code.
    pub fn qr_payload(&self) -> String {
        format!(
            "INV:{},AMT:{:.2},COMP:{},ROOM:{},TABLE:{}",
            self.invoice_number,
            self.breakdown.grand_total,
            self.store.name,
            self.room_name,
            self.table_number
        )
    }
}

/// One line of a kitchen slip
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SlipItem {
    pub name: String,
    pub quantity: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
}

/// A printable kitchen order ticket slip
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KotSlip {
    pub kot_number: String,
    pub store: StoreProfile,
    pub room_name: String,
    pub table_number: String,
    /// Ticket creation timestamp (epoch millis)
    pub created_at: i64,
    pub items: Vec<SlipItem>,
}

impl KotSlip {
    /// Machine-readable payload for the slip QR code.
    pub fn qr_payload(&self) -> String {
        format!("KOT:{},TABLE:{}", self.kot_number, self.table_number)
    }
}

/// Assemble the invoice document for a finalized bill.
pub fn build_invoice(
    profile: &StoreProfile,
    session: &TableSession,
    draft: &BillDraft,
    breakdown: &PricingBreakdown,
) -> Invoice {
    Invoice {
        invoice_number: invoice_number(),
        store: profile.clone(),
        room_name: session.room_name.clone(),
        table_number: session.table_number.clone(),
        payment_method: draft.payment_method,
        lines: draft.lines.clone(),
        breakdown: breakdown.clone(),
        total_items: draft.total_items(),
        issued_at: now_millis(),
    }
}

/// Assemble the kitchen slip for a ticket, resolving product names from
/// the catalog snapshot. A product missing from the snapshot falls back
/// to its raw id, since the kitchen still needs to see the line.
pub fn build_kot_slip(
    profile: &StoreProfile,
    session: &TableSession,
    ticket: &Ticket,
    catalog: &ProductCatalog,
) -> KotSlip {
    let items = ticket
        .items
        .iter()
        .map(|item| SlipItem {
            name: catalog
                .get(&item.product_id)
                .map(|p| p.name.clone())
                .unwrap_or_else(|| item.product_id.clone()),
            quantity: item.quantity,
            instructions: item.special_instructions.clone(),
        })
        .collect();

    KotSlip {
        kot_number: ticket.kot_number.clone(),
        store: profile.clone(),
        room_name: session.room_name.clone(),
        table_number: session.table_number.clone(),
        created_at: ticket.created_at,
        items,
    }
}
