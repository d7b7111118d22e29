use async_trait::async_trait;
use chrono::NaiveDateTime;
use common::{DeliveryId, MemberId, OrderId};
use domain::{Address, Delivery, DeliveryStatus, Member, Order, OrderStatus};

use crate::{OrderSearch, OrderSimpleQueryDto, Result, Session};

/// Data for a member about to be stored. The store assigns the id.
#[derive(Debug, Clone)]
pub struct NewMember {
    pub name: String,
    pub address: Address,
}

impl NewMember {
    pub fn new(name: impl Into<String>, address: Address) -> Self {
        Self {
            name: name.into(),
            address,
        }
    }
}

/// Data for a delivery about to be stored.
#[derive(Debug, Clone)]
pub struct NewDelivery {
    pub address: Address,
    pub status: DeliveryStatus,
}

impl NewDelivery {
    /// Creates a delivery that is ready to ship.
    pub fn ready(address: Address) -> Self {
        Self {
            address,
            status: DeliveryStatus::Ready,
        }
    }
}

/// Data for an order about to be stored.
///
/// The member and the delivery must already exist, and the delivery must
/// not belong to another order.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub member_id: MemberId,
    pub delivery_id: DeliveryId,
    pub order_date: NaiveDateTime,
    pub status: OrderStatus,
}

impl NewOrder {
    /// Creates a placed order.
    pub fn placed(member_id: MemberId, delivery_id: DeliveryId, order_date: NaiveDateTime) -> Self {
        Self {
            member_id,
            delivery_id,
            order_date,
            status: OrderStatus::Order,
        }
    }
}

/// Core trait for order storage.
///
/// Every read method issues exactly one query against the backing store.
/// All implementations must be thread-safe (Send + Sync).
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Stores a member and returns its generated id.
    async fn save_member(&self, member: NewMember) -> Result<MemberId>;

    /// Stores a delivery and returns its generated id.
    async fn save_delivery(&self, delivery: NewDelivery) -> Result<DeliveryId>;

    /// Stores an order and returns its generated id.
    ///
    /// Fails with `NotFound` if the member or delivery is missing and with
    /// `DeliveryAlreadyAssigned` if another order owns the delivery.
    async fn save_order(&self, order: NewOrder) -> Result<OrderId>;

    /// Loads a single member, including the ids of its orders.
    async fn find_member(&self, id: MemberId) -> Result<Member>;

    /// Loads a single delivery.
    async fn find_delivery(&self, id: DeliveryId) -> Result<Delivery>;

    /// Loads orders matching `search`, ordered by id and capped at
    /// `search::MAX_RESULTS`.
    ///
    /// Member and delivery references are left unloaded.
    async fn find_all(&self, search: &OrderSearch) -> Result<Vec<Order>>;

    /// Loads every order together with its member and delivery in a single
    /// joined query. References come back loaded.
    async fn find_all_with_member_delivery(&self) -> Result<Vec<Order>>;

    /// Selects the flat listing columns of every order straight into
    /// `OrderSimpleQueryDto` rows.
    async fn find_order_dtos(&self) -> Result<Vec<OrderSimpleQueryDto>>;
}

/// Extension trait providing convenience methods for repositories.
pub trait OrderRepositoryExt: OrderRepository {
    /// Opens a request-scoped session on this repository.
    fn session(&self) -> Session<'_, Self> {
        Session::new(self)
    }
}

// Blanket implementation for all OrderRepository implementations
impl<T: OrderRepository + ?Sized> OrderRepositoryExt for T {}
