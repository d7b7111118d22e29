//! Delivery entity and its status.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Address, DeliveryId, DomainError, Entity};

/// Shipping progress of a delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeliveryStatus {
    /// Waiting to be shipped.
    #[default]
    Ready,
    /// Delivered.
    Comp,
}

impl DeliveryStatus {
    /// Returns the stored/serialized name of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryStatus::Ready => "READY",
            DeliveryStatus::Comp => "COMP",
        }
    }
}

impl std::fmt::Display for DeliveryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeliveryStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "READY" => Ok(DeliveryStatus::Ready),
            "COMP" => Ok(DeliveryStatus::Comp),
            other => Err(DomainError::UnknownStatus {
                kind: "delivery status",
                value: other.to_string(),
            }),
        }
    }
}

/// Where and how an order is shipped.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Delivery {
    id: DeliveryId,
    address: Address,
    status: DeliveryStatus,
}

impl Delivery {
    pub fn new(id: DeliveryId, address: Address, status: DeliveryStatus) -> Self {
        Self {
            id,
            address,
            status,
        }
    }

    pub fn id(&self) -> DeliveryId {
        self.id
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn status(&self) -> DeliveryStatus {
        self.status
    }
}

impl Entity for Delivery {
    type Id = DeliveryId;
    const NAME: &'static str = "Delivery";

    fn id(&self) -> DeliveryId {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trips_through_str() {
        for status in [DeliveryStatus::Ready, DeliveryStatus::Comp] {
            assert_eq!(status.as_str().parse::<DeliveryStatus>().unwrap(), status);
        }
    }

    #[test]
    fn test_unknown_status() {
        let err = "SHIPPED".parse::<DeliveryStatus>().unwrap_err();
        assert!(matches!(err, DomainError::UnknownStatus { .. }));
    }

    #[test]
    fn test_json_shape() {
        let delivery = Delivery::new(
            DeliveryId::new(5),
            Address::new("Seoul", "1 Main St", "11111"),
            DeliveryStatus::Ready,
        );
        let json = serde_json::to_value(&delivery).unwrap();
        assert_eq!(json["id"], 5);
        assert_eq!(json["status"], "READY");
        assert_eq!(json["address"]["city"], "Seoul");
    }
}
