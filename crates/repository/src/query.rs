use chrono::NaiveDateTime;
use common::OrderId;
use domain::{Address, OrderStatus};
use serde::Serialize;

/// Flat order row filled directly by the projection query.
///
/// Holds only copies of scalar columns and the delivery address, never an
/// entity or a reference.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSimpleQueryDto {
    pub order_id: OrderId,
    pub name: String,
    pub order_date: NaiveDateTime,
    pub order_status: OrderStatus,
    pub address: Address,
}

impl OrderSimpleQueryDto {
    pub fn new(
        order_id: OrderId,
        name: impl Into<String>,
        order_date: NaiveDateTime,
        order_status: OrderStatus,
        address: Address,
    ) -> Self {
        Self {
            order_id,
            name: name.into(),
            order_date,
            order_status,
            address,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn serializes_five_flat_fields() {
        let dto = OrderSimpleQueryDto::new(
            OrderId::new(4),
            "userA",
            NaiveDate::from_ymd_opt(2024, 3, 1)
                .unwrap()
                .and_hms_opt(9, 30, 0)
                .unwrap(),
            OrderStatus::Order,
            Address::new("Seoul", "1 Main St", "11111"),
        );

        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "orderId": 4,
                "name": "userA",
                "orderDate": "2024-03-01T09:30:00",
                "orderStatus": "ORDER",
                "address": {"city": "Seoul", "street": "1 Main St", "zipcode": "11111"}
            })
        );
    }
}
