//! Order entity.
//!
//! An order points at exactly one member and one delivery. Both links are
//! `Ref`s: a plain order query leaves them unloaded, a fetch-join query
//! fills them in, and a session can load them afterwards.

mod status;

pub use status::OrderStatus;

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::{Delivery, DomainError, Entity, Member, OrderId, Ref};

/// A customer order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    id: OrderId,
    member: Ref<Member>,
    delivery: Ref<Delivery>,
    order_date: NaiveDateTime,
    status: OrderStatus,
}

impl Order {
    pub fn new(
        id: OrderId,
        member: Ref<Member>,
        delivery: Ref<Delivery>,
        order_date: NaiveDateTime,
        status: OrderStatus,
    ) -> Self {
        Self {
            id,
            member,
            delivery,
            order_date,
            status,
        }
    }

    pub fn id(&self) -> OrderId {
        self.id
    }

    pub fn order_date(&self) -> NaiveDateTime {
        self.order_date
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    /// Returns the member, failing if the reference was never loaded.
    pub fn member(&self) -> Result<&Member, DomainError> {
        self.member.get()
    }

    /// Returns the delivery, failing if the reference was never loaded.
    pub fn delivery(&self) -> Result<&Delivery, DomainError> {
        self.delivery.get()
    }

    pub fn member_ref(&self) -> &Ref<Member> {
        &self.member
    }

    pub fn member_ref_mut(&mut self) -> &mut Ref<Member> {
        &mut self.member
    }

    pub fn delivery_ref(&self) -> &Ref<Delivery> {
        &self.delivery
    }

    pub fn delivery_ref_mut(&mut self) -> &mut Ref<Delivery> {
        &mut self.delivery
    }

    /// Returns true if both the member and the delivery are loaded.
    pub fn is_initialized(&self) -> bool {
        self.member.is_loaded() && self.delivery.is_loaded()
    }
}

impl Entity for Order {
    type Id = OrderId;
    const NAME: &'static str = "Order";

    fn id(&self) -> OrderId {
        self.id
    }
}
