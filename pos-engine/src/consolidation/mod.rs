//! Order Consolidation Engine
//!
//! Merges all open kitchen order tickets for one table into per-product
//! summed lines. A pure projection over the supplied snapshot: it mutates
//! neither tickets nor tables, and is rebuilt from scratch on every
//! request rather than cached.

use crate::billing::{round_money, to_decimal, to_f64};
use rust_decimal::prelude::*;
use shared::models::{BillDraft, ConsolidatedLine, PaymentMethod, Product, Ticket};
use std::collections::HashMap;

/// A point-in-time view of the product catalog, indexed by product id.
///
/// Inactive products are dropped at construction so an order item
/// referencing a retired product is treated the same as one referencing a
/// deleted product: excluded from the draft and counted.
#[derive(Debug, Clone, Default)]
pub struct ProductCatalog {
    by_id: HashMap<String, Product>,
}

impl ProductCatalog {
    pub fn new(products: impl IntoIterator<Item = Product>) -> Self {
        let by_id = products
            .into_iter()
            .filter(|p| p.is_active)
            .map(|p| (p.id.clone(), p))
            .collect();
        Self { by_id }
    }

    pub fn get(&self, product_id: &str) -> Option<&Product> {
        self.by_id.get(product_id)
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

// Per-product accumulator; monetary sum stays Decimal until emission.
struct LineAcc {
    product_id: String,
    name: String,
    unit_price: f64,
    quantity: i32,
    amount: Decimal,
}

/// Merge the open tickets of one table into a [`BillDraft`].
///
/// - Tickets that are not open (closed) are ignored even if present.
/// - An empty ticket set yields an empty draft with zero subtotal.
/// - Order items whose product cannot be resolved against the catalog
///   snapshot, or whose quantity is not positive, are excluded and
///   counted in `skipped_items`.
/// - Lines are emitted in first-seen product order. The ordering carries
///   no billing meaning; it only keeps the operator display stable.
///
/// The merge is commutative and associative over tickets: the subtotal
/// equals Σ price × quantity over every contributing order item no matter
/// how the tickets are grouped or ordered.
pub fn consolidate(
    tickets: &[Ticket],
    catalog: &ProductCatalog,
    payment_method: PaymentMethod,
) -> BillDraft {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut accs: Vec<LineAcc> = Vec::new();
    let mut ticket_ids = Vec::new();
    let mut skipped_items = 0u32;

    for ticket in tickets.iter().filter(|t| t.is_open()) {
        ticket_ids.push(ticket.id.clone());
        for item in &ticket.items {
            let Some(product) = catalog.get(&item.product_id) else {
                skipped_items += 1;
                continue;
            };
            if item.quantity <= 0 {
                skipped_items += 1;
                continue;
            }

            let contribution = to_decimal(product.price) * Decimal::from(item.quantity);
            match index.get(&item.product_id) {
                Some(&i) => {
                    accs[i].quantity += item.quantity;
                    accs[i].amount += contribution;
                }
                None => {
                    index.insert(item.product_id.clone(), accs.len());
                    accs.push(LineAcc {
                        product_id: product.id.clone(),
                        name: product.name.clone(),
                        unit_price: product.price,
                        quantity: item.quantity,
                        amount: contribution,
                    });
                }
            }
        }
    }

    let mut subtotal = Decimal::ZERO;
    let lines = accs
        .into_iter()
        .map(|acc| {
            let line_total = round_money(acc.amount);
            subtotal += line_total;
            ConsolidatedLine {
                product_id: acc.product_id,
                name: acc.name,
                unit_price: acc.unit_price,
                quantity: acc.quantity,
                line_total: to_f64(line_total),
            }
        })
        .collect();

    BillDraft {
        lines,
        subtotal: to_f64(subtotal),
        ticket_ids,
        skipped_items,
        payment_method,
    }
}
