//! Dining Table Model

use serde::{Deserialize, Serialize};

/// Table occupancy status.
///
/// Wire format follows the room directory: lowercase strings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TableStatus {
    #[default]
    Available,
    Occupied,
    Reserved,
}

/// Dining table entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiningTable {
    pub id: String,
    /// Parent room reference (String ID)
    pub room_id: String,
    /// Display number shown on tickets and invoices
    pub table_number: String,
    /// Descriptive tag: "regular", "booth", "high-top", "outdoor"
    pub table_type: String,
    pub seating_capacity: i32,
    pub status: TableStatus,
}

impl DiningTable {
    /// A table accepts a new session only while available.
    pub fn is_available(&self) -> bool {
        self.status == TableStatus::Available
    }
}
