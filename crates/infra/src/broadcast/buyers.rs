use mandi_core::BuyerId;
use uuid::Uuid;

/// A simulated buyer. Identity only; no buyer state is kept anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Buyer {
    pub id: BuyerId,
    pub name: &'static str,
}

const fn buyer(id: u128, name: &'static str) -> Buyer {
    Buyer {
        id: BuyerId::from_uuid(Uuid::from_u128(id)),
        name,
    }
}

/// Fixed buyer pool the simulator draws from.
pub const BUYERS: [Buyer; 6] = [
    buyer(0x0191_0000_0000_7000_8000_0000_0000_0001, "Reliance Fresh"),
    buyer(0x0191_0000_0000_7000_8000_0000_0000_0002, "BigBasket"),
    buyer(0x0191_0000_0000_7000_8000_0000_0000_0003, "Azadpur Mandi Traders"),
    buyer(0x0191_0000_0000_7000_8000_0000_0000_0004, "Ninjacart"),
    buyer(0x0191_0000_0000_7000_8000_0000_0000_0005, "DeHaat Aggregator"),
    buyer(0x0191_0000_0000_7000_8000_0000_0000_0006, "Local Kirana Co-op"),
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn pool_ids_and_names_are_unique() {
        let ids: HashSet<BuyerId> = BUYERS.iter().map(|b| b.id).collect();
        let names: HashSet<&str> = BUYERS.iter().map(|b| b.name).collect();
        assert_eq!(ids.len(), BUYERS.len());
        assert_eq!(names.len(), BUYERS.len());
    }
}
