//! Billing types: consolidated lines, bill drafts, pricing breakdowns

use serde::{Deserialize, Serialize};

/// Settlement method chosen at finalization
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    #[default]
    Cash,
    Card,
    Upi,
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            PaymentMethod::Cash => "Cash",
            PaymentMethod::Card => "Card",
            PaymentMethod::Upi => "UPI",
        };
        f.write_str(label)
    }
}

/// One per-product line of a consolidated bill.
///
/// Derived, never persisted directly; rebuilt on every consolidation from
/// the open tickets. Name and unit price are snapshots of the catalog at
/// consolidation time so the invoice document needs no further lookups.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConsolidatedLine {
    pub product_id: String,
    pub name: String,
    pub unit_price: f64,
    /// Summed quantity across all contributing tickets
    pub quantity: i32,
    /// quantity × unit_price, rounded to 2 decimal places
    pub line_total: f64,
}

/// Discount/tax breakdown derived from a subtotal.
///
/// Every field is already rounded to 2 decimal places; consumers must not
/// re-derive any of them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PricingBreakdown {
    pub subtotal: f64,
    pub discount_percent: f64,
    pub discount: f64,
    pub after_discount: f64,
    pub tax_percent: f64,
    pub tax: f64,
    pub grand_total: f64,
}

/// An unfinalized, recomputable preview of the amount owed for a table's
/// open tickets. Ephemeral: exists only while a bill is being previewed or
/// finalized.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BillDraft {
    /// Lines in first-seen product order
    pub lines: Vec<ConsolidatedLine>,
    /// Sum of line totals, rounded to 2 decimal places
    pub subtotal: f64,
    /// Every open ticket that fed this draft (closed on finalize)
    pub ticket_ids: Vec<String>,
    /// Order items dropped because their product was missing from the
    /// catalog snapshot. Surfaced to the operator, not fatal
    pub skipped_items: u32,
    pub payment_method: PaymentMethod,
}

impl BillDraft {
    /// Total item count across all lines (invoice footer).
    pub fn total_items(&self) -> i32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// A draft with no billable lines cannot be finalized.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_method_display() {
        assert_eq!(PaymentMethod::Cash.to_string(), "Cash");
        assert_eq!(PaymentMethod::Upi.to_string(), "UPI");
    }

    #[test]
    fn test_payment_method_wire_format() {
        let json = serde_json::to_string(&PaymentMethod::Card).unwrap();
        assert_eq!(json, "\"CARD\"");
    }

    #[test]
    fn test_total_items_sums_line_quantities() {
        let draft = BillDraft {
            lines: vec![
                ConsolidatedLine {
                    product_id: "p1".to_string(),
                    name: "Paneer Tikka".to_string(),
                    unit_price: 180.0,
                    quantity: 3,
                    line_total: 540.0,
                },
                ConsolidatedLine {
                    product_id: "p2".to_string(),
                    name: "Naan".to_string(),
                    unit_price: 40.0,
                    quantity: 3,
                    line_total: 120.0,
                },
            ],
            subtotal: 660.0,
            ticket_ids: vec!["kot-1".to_string(), "kot-2".to_string()],
            skipped_items: 0,
            payment_method: PaymentMethod::Cash,
        };
        assert_eq!(draft.total_items(), 6);
        assert!(!draft.is_empty());
    }
}
