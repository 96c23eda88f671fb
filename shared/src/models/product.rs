//! Product Model

use serde::{Deserialize, Serialize};

/// Product entity, supplied by the external catalog.
///
/// Immutable from the engine's perspective: a consolidation run works
/// against one catalog snapshot and never writes back.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    /// Unit price (non-negative)
    pub price: f64,
    /// Category reference (String ID)
    pub category: String,
    pub is_active: bool,
}

/// Product category entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
}
