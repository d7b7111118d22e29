//! Request-scoped persistence context.

use std::collections::HashMap;

use common::{DeliveryId, MemberId};
use domain::{Delivery, Member, Order};

use crate::{OrderRepository, Result};

/// A unit of work over a repository, opened per request and dropped when
/// the request ends.
///
/// The session resolves deferred references on demand and keeps every
/// member and delivery it fetched in an identity map, so each entity is
/// queried at most once per session. Orders sharing a member therefore
/// cost one member query, not one per order.
pub struct Session<'r, R: OrderRepository + ?Sized> {
    repository: &'r R,
    members: HashMap<MemberId, Member>,
    deliveries: HashMap<DeliveryId, Delivery>,
}

impl<'r, R: OrderRepository + ?Sized> Session<'r, R> {
    /// Opens an empty session.
    pub fn new(repository: &'r R) -> Self {
        Self {
            repository,
            members: HashMap::new(),
            deliveries: HashMap::new(),
        }
    }

    /// Returns a member, querying the repository on first access.
    pub async fn member(&mut self, id: MemberId) -> Result<Member> {
        if let Some(member) = self.members.get(&id) {
            return Ok(member.clone());
        }
        let member = self.repository.find_member(id).await?;
        self.members.insert(id, member.clone());
        Ok(member)
    }

    /// Returns a delivery, querying the repository on first access.
    pub async fn delivery(&mut self, id: DeliveryId) -> Result<Delivery> {
        if let Some(delivery) = self.deliveries.get(&id) {
            return Ok(delivery.clone());
        }
        let delivery = self.repository.find_delivery(id).await?;
        self.deliveries.insert(id, delivery.clone());
        Ok(delivery)
    }

    /// Loads the member and delivery of `order` if they are still unloaded.
    #[tracing::instrument(skip(self, order), fields(order_id = %order.id()))]
    pub async fn initialize(&mut self, order: &mut Order) -> Result<()> {
        if !order.member_ref().is_loaded() {
            let member = self.member(order.member_ref().id()).await?;
            order.member_ref_mut().load(member)?;
        }
        if !order.delivery_ref().is_loaded() {
            let delivery = self.delivery(order.delivery_ref().id()).await?;
            order.delivery_ref_mut().load(delivery)?;
        }
        Ok(())
    }

    /// Initializes every order in `orders`.
    pub async fn initialize_all(&mut self, orders: &mut [Order]) -> Result<()> {
        for order in orders.iter_mut() {
            self.initialize(order).await?;
        }
        Ok(())
    }

    /// Returns the number of distinct entities held by the session.
    pub fn cached_entities(&self) -> usize {
        self.members.len() + self.deliveries.len()
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use domain::Address;

    use super::*;
    use crate::{
        CountingRepository, InMemoryOrderStore, NewDelivery, NewMember, NewOrder, OrderSearch,
        OrderRepositoryExt,
    };

    fn date() -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    async fn seed_shared_member(store: &InMemoryOrderStore, orders: usize) -> MemberId {
        let address = Address::new("Seoul", "1 Main St", "11111");
        let member_id = store
            .save_member(NewMember::new("userA", address.clone()))
            .await
            .unwrap();
        for _ in 0..orders {
            let delivery_id = store
                .save_delivery(NewDelivery::ready(address.clone()))
                .await
                .unwrap();
            store
                .save_order(NewOrder::placed(member_id, delivery_id, date()))
                .await
                .unwrap();
        }
        member_id
    }

    #[tokio::test]
    async fn initialize_loads_both_references() {
        let store = InMemoryOrderStore::new();
        let member_id = seed_shared_member(&store, 1).await;

        let mut orders = store.find_all(&OrderSearch::new()).await.unwrap();
        let mut session = store.session();
        session.initialize(&mut orders[0]).await.unwrap();

        assert!(orders[0].is_initialized());
        assert_eq!(orders[0].member().unwrap().id(), member_id);
        assert_eq!(session.cached_entities(), 2);
    }

    #[tokio::test]
    async fn shared_member_is_fetched_once() {
        let store = CountingRepository::new(InMemoryOrderStore::new());
        seed_shared_member(store.inner(), 3).await;

        let mut orders = store.find_all(&OrderSearch::new()).await.unwrap();
        let mut session = store.session();
        session.initialize_all(&mut orders).await.unwrap();

        // 1 order query + 1 member query + 3 delivery queries
        assert_eq!(store.query_count(), 5);
        assert!(orders.iter().all(Order::is_initialized));
    }

    #[tokio::test]
    async fn initialize_skips_loaded_references() {
        let store = CountingRepository::new(InMemoryOrderStore::new());
        seed_shared_member(store.inner(), 2).await;

        let mut orders = store.find_all_with_member_delivery().await.unwrap();
        store.reset();

        let mut session = store.session();
        session.initialize_all(&mut orders).await.unwrap();

        assert_eq!(store.query_count(), 0);
        assert_eq!(session.cached_entities(), 0);
    }

    #[tokio::test]
    async fn missing_member_is_reported() {
        let store = InMemoryOrderStore::new();
        let mut session = store.session();

        let err = session.member(MemberId::new(99)).await.unwrap_err();
        assert!(matches!(
            err,
            crate::RepositoryError::NotFound {
                entity: "Member",
                ..
            }
        ));
    }
}
