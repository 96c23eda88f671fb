//! Room Model

use super::dining_table::{DiningTable, TableStatus};
use serde::{Deserialize, Serialize};

/// Room entity (dining hall, terrace, private room)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    pub id: String,
    pub name: String,
    pub is_active: bool,
    /// Tables in display order
    pub tables: Vec<DiningTable>,
}

/// Per-room occupancy counters for the operator surface
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct RoomOccupancy {
    pub occupied: usize,
    pub available: usize,
    pub reserved: usize,
}

impl Room {
    /// Count tables per status.
    pub fn occupancy(&self) -> RoomOccupancy {
        let mut counts = RoomOccupancy::default();
        for table in &self.tables {
            match table.status {
                TableStatus::Occupied => counts.occupied += 1,
                TableStatus::Available => counts.available += 1,
                TableStatus::Reserved => counts.reserved += 1,
            }
        }
        counts
    }

    /// Find a table by id.
    pub fn table(&self, table_id: &str) -> Option<&DiningTable> {
        self.tables.iter().find(|t| t.id == table_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(id: &str, status: TableStatus) -> DiningTable {
        DiningTable {
            id: id.to_string(),
            room_id: "room-1".to_string(),
            table_number: id.to_string(),
            table_type: "regular".to_string(),
            seating_capacity: 4,
            status,
        }
    }

    #[test]
    fn test_occupancy_counts() {
        let room = Room {
            id: "room-1".to_string(),
            name: "Main Hall".to_string(),
            is_active: true,
            tables: vec![
                table("t1", TableStatus::Occupied),
                table("t2", TableStatus::Available),
                table("t3", TableStatus::Available),
                table("t4", TableStatus::Reserved),
            ],
        };

        let counts = room.occupancy();
        assert_eq!(counts.occupied, 1);
        assert_eq!(counts.available, 2);
        assert_eq!(counts.reserved, 1);
    }

    #[test]
    fn test_table_lookup() {
        let room = Room {
            id: "room-1".to_string(),
            name: "Main Hall".to_string(),
            is_active: true,
            tables: vec![table("t1", TableStatus::Available)],
        };
        assert!(room.table("t1").is_some());
        assert!(room.table("t9").is_none());
    }
}
