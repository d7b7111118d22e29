//! Member entity.

use serde::Serialize;

use crate::{Address, Entity, MemberId, OrderId};

/// A registered customer.
///
/// `orders` is the reverse side of `Order::member`. It is kept for
/// navigation inside the service and never serialized.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Member {
    id: MemberId,
    name: String,
    address: Address,
    #[serde(skip)]
    orders: Vec<OrderId>,
}

impl Member {
    /// Creates a member without any orders.
    pub fn new(id: MemberId, name: impl Into<String>, address: Address) -> Self {
        Self {
            id,
            name: name.into(),
            address,
            orders: Vec::new(),
        }
    }

    /// Attaches the ids of the member's orders.
    pub fn with_orders(mut self, orders: Vec<OrderId>) -> Self {
        self.orders = orders;
        self
    }

    pub fn id(&self) -> MemberId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    /// Returns the ids of the member's orders.
    pub fn orders(&self) -> &[OrderId] {
        &self.orders
    }
}

impl Entity for Member {
    type Id = MemberId;
    const NAME: &'static str = "Member";

    fn id(&self) -> MemberId {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member() -> Member {
        Member::new(
            MemberId::new(1),
            "userA",
            Address::new("Seoul", "1 Main St", "11111"),
        )
        .with_orders(vec![OrderId::new(4), OrderId::new(11)])
    }

    #[test]
    fn test_orders_back_reference() {
        let member = member();
        assert_eq!(member.orders(), &[OrderId::new(4), OrderId::new(11)]);
    }

    #[test]
    fn test_orders_never_serialized() {
        let json = serde_json::to_value(member()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": 1,
                "name": "userA",
                "address": {"city": "Seoul", "street": "1 Main St", "zipcode": "11111"}
            })
        );
    }
}
