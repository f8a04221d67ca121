use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Room {
    pub name: String,
    /// Seats. Kept with the room but not consumed by the slot calculation.
    pub capacity: u32,
}

/// The fixed physical rooms, in the order they were configured.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RoomInventory {
    rooms: Vec<Room>,
}

impl RoomInventory {
    pub fn new(rooms: Vec<Room>) -> Self {
        Self { rooms }
    }

    pub fn count(&self) -> u32 {
        self.rooms.len() as u32
    }

    pub fn total_seats(&self) -> u64 {
        self.rooms.iter().map(|r| r.capacity as u64).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_and_seats() {
        let inventory = RoomInventory::new(vec![
            Room { name: "208".to_string(), capacity: 30 },
            Room { name: "202".to_string(), capacity: 100 },
        ]);

        assert_eq!(inventory.count(), 2);
        assert_eq!(inventory.total_seats(), 130);
        assert_eq!(RoomInventory::default().count(), 0);
    }

    #[test]
    fn test_total_seats_beyond_u32() {
        let inventory = RoomInventory::new(vec![
            Room { name: "A".to_string(), capacity: u32::MAX },
            Room { name: "B".to_string(), capacity: u32::MAX },
        ]);

        assert_eq!(inventory.total_seats(), 2 * u32::MAX as u64);
    }
}
