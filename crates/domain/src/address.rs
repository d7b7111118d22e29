//! Address value object.

use serde::{Deserialize, Serialize};

/// A postal address embedded in members and deliveries.
///
/// Addresses have no identity of their own and cannot be changed once
/// built; replacing an address means constructing a new one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Address {
    city: String,
    street: String,
    zipcode: String,
}

impl Address {
    /// Creates a new address.
    pub fn new(
        city: impl Into<String>,
        street: impl Into<String>,
        zipcode: impl Into<String>,
    ) -> Self {
        Self {
            city: city.into(),
            street: street.into(),
            zipcode: zipcode.into(),
        }
    }

    /// Returns the city.
    pub fn city(&self) -> &str {
        &self.city
    }

    /// Returns the street.
    pub fn street(&self) -> &str {
        &self.street
    }

    /// Returns the postal code.
    pub fn zipcode(&self) -> &str {
        &self.zipcode
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} ({})", self.city, self.street, self.zipcode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let address = Address::new("Seoul", "1 Main St", "11111");
        assert_eq!(address.city(), "Seoul");
        assert_eq!(address.street(), "1 Main St");
        assert_eq!(address.zipcode(), "11111");
    }

    #[test]
    fn test_json_shape() {
        let address = Address::new("Jinju", "2 River Rd", "22222");
        let json = serde_json::to_value(&address).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"city": "Jinju", "street": "2 River Rd", "zipcode": "22222"})
        );
    }

    #[test]
    fn test_display() {
        let address = Address::new("Seoul", "1 Main St", "11111");
        assert_eq!(address.to_string(), "Seoul 1 Main St (11111)");
    }
}
