//! Domain layer for the simple-order service.
//!
//! This crate provides the entities exposed by the listing endpoints:
//! - `Member`, `Delivery` and `Order` entities with typed identifiers
//! - `Address`, an immutable value object embedded in members and deliveries
//! - `Ref<T>`, an explicit deferred-load reference between entities
//!
//! Persistence mapping lives in the `repository` crate; nothing here knows
//! how rows are stored or fetched.

pub mod address;
pub mod delivery;
pub mod entity;
pub mod error;
pub mod member;
pub mod order;

pub use address::Address;
pub use common::{DeliveryId, MemberId, OrderId};
pub use delivery::{Delivery, DeliveryStatus};
pub use entity::{Entity, Ref};
pub use error::DomainError;
pub use member::Member;
pub use order::{Order, OrderStatus};
