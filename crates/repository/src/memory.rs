use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use common::{DeliveryId, MemberId, OrderId};
use domain::{Address, Delivery, Member, Order, OrderStatus, Ref};
use tokio::sync::RwLock;

use crate::search::MAX_RESULTS;
use crate::{
    NewDelivery, NewMember, NewOrder, OrderRepository, OrderSearch, OrderSimpleQueryDto,
    RepositoryError, Result,
};

#[derive(Debug, Clone)]
struct MemberRow {
    name: String,
    address: Address,
}

#[derive(Debug, Clone)]
struct OrderRow {
    member_id: MemberId,
    delivery_id: DeliveryId,
    order_date: NaiveDateTime,
    status: OrderStatus,
}

#[derive(Default)]
struct Tables {
    sequence: i64,
    members: BTreeMap<MemberId, MemberRow>,
    deliveries: BTreeMap<DeliveryId, Delivery>,
    orders: BTreeMap<OrderId, OrderRow>,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.sequence += 1;
        self.sequence
    }

    fn member(&self, id: MemberId) -> Result<Member> {
        let row = self
            .members
            .get(&id)
            .ok_or_else(|| RepositoryError::not_found("Member", id))?;
        let orders = self
            .orders
            .iter()
            .filter(|(_, order)| order.member_id == id)
            .map(|(order_id, _)| *order_id)
            .collect();
        Ok(Member::new(id, row.name.clone(), row.address.clone()).with_orders(orders))
    }

    fn delivery(&self, id: DeliveryId) -> Result<Delivery> {
        self.deliveries
            .get(&id)
            .cloned()
            .ok_or_else(|| RepositoryError::not_found("Delivery", id))
    }
}

/// In-memory order store for testing and local runs.
///
/// This implementation keeps every table in memory and provides the
/// same interface as the PostgreSQL implementation, including the shared
/// id sequence and the foreign-key checks on orders.
#[derive(Clone, Default)]
pub struct InMemoryOrderStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryOrderStore {
    /// Creates a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the total number of orders stored.
    pub async fn order_count(&self) -> usize {
        self.tables.read().await.orders.len()
    }

    /// Removes every row and restarts the id sequence.
    pub async fn clear(&self) {
        *self.tables.write().await = Tables::default();
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderStore {
    async fn save_member(&self, member: NewMember) -> Result<MemberId> {
        let mut tables = self.tables.write().await;
        let id = MemberId::new(tables.next_id());
        tables.members.insert(
            id,
            MemberRow {
                name: member.name,
                address: member.address,
            },
        );
        tracing::debug!(member_id = %id, "member saved");
        Ok(id)
    }

    async fn save_delivery(&self, delivery: NewDelivery) -> Result<DeliveryId> {
        let mut tables = self.tables.write().await;
        let id = DeliveryId::new(tables.next_id());
        tables
            .deliveries
            .insert(id, Delivery::new(id, delivery.address, delivery.status));
        tracing::debug!(delivery_id = %id, "delivery saved");
        Ok(id)
    }

    async fn save_order(&self, order: NewOrder) -> Result<OrderId> {
        let mut tables = self.tables.write().await;

        if !tables.members.contains_key(&order.member_id) {
            return Err(RepositoryError::not_found("Member", order.member_id));
        }
        if !tables.deliveries.contains_key(&order.delivery_id) {
            return Err(RepositoryError::not_found("Delivery", order.delivery_id));
        }
        if tables
            .orders
            .values()
            .any(|existing| existing.delivery_id == order.delivery_id)
        {
            return Err(RepositoryError::DeliveryAlreadyAssigned(order.delivery_id));
        }

        let id = OrderId::new(tables.next_id());
        tables.orders.insert(
            id,
            OrderRow {
                member_id: order.member_id,
                delivery_id: order.delivery_id,
                order_date: order.order_date,
                status: order.status,
            },
        );
        tracing::debug!(order_id = %id, "order saved");
        Ok(id)
    }

    async fn find_member(&self, id: MemberId) -> Result<Member> {
        tracing::debug!(member_id = %id, "select member");
        self.tables.read().await.member(id)
    }

    async fn find_delivery(&self, id: DeliveryId) -> Result<Delivery> {
        tracing::debug!(delivery_id = %id, "select delivery");
        self.tables.read().await.delivery(id)
    }

    async fn find_all(&self, search: &OrderSearch) -> Result<Vec<Order>> {
        tracing::debug!(?search, "select orders");
        let tables = self.tables.read().await;

        let mut orders = Vec::new();
        for (id, row) in &tables.orders {
            // Inner join on member, as the SQL store does for the name filter
            let Some(member) = tables.members.get(&row.member_id) else {
                continue;
            };
            if !search.matches(row.status, &member.name) {
                continue;
            }
            orders.push(Order::new(
                *id,
                Ref::unloaded(row.member_id),
                Ref::unloaded(row.delivery_id),
                row.order_date,
                row.status,
            ));
            if orders.len() == MAX_RESULTS {
                break;
            }
        }
        Ok(orders)
    }

    async fn find_all_with_member_delivery(&self) -> Result<Vec<Order>> {
        tracing::debug!("select orders join fetch member, delivery");
        let tables = self.tables.read().await;

        tables
            .orders
            .iter()
            .take(MAX_RESULTS)
            .map(|(id, row)| -> Result<Order> {
                Ok(Order::new(
                    *id,
                    Ref::loaded(tables.member(row.member_id)?),
                    Ref::loaded(tables.delivery(row.delivery_id)?),
                    row.order_date,
                    row.status,
                ))
            })
            .collect()
    }

    async fn find_order_dtos(&self) -> Result<Vec<OrderSimpleQueryDto>> {
        tracing::debug!("select order listing columns");
        let tables = self.tables.read().await;

        tables
            .orders
            .iter()
            .take(MAX_RESULTS)
            .map(|(id, row)| -> Result<OrderSimpleQueryDto> {
                let member = tables
                    .members
                    .get(&row.member_id)
                    .ok_or_else(|| RepositoryError::not_found("Member", row.member_id))?;
                let delivery = tables
                    .deliveries
                    .get(&row.delivery_id)
                    .ok_or_else(|| RepositoryError::not_found("Delivery", row.delivery_id))?;
                Ok(OrderSimpleQueryDto::new(
                    *id,
                    member.name.clone(),
                    row.order_date,
                    row.status,
                    delivery.address().clone(),
                ))
            })
            .collect()
    }
}
