//! Shared types used across the simple-order service crates.

pub mod types;

pub use types::{DeliveryId, MemberId, OrderId};
