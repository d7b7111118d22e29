//! Query-count instrumentation.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use common::{DeliveryId, MemberId, OrderId};
use domain::{Delivery, Member, Order};

use crate::{
    NewDelivery, NewMember, NewOrder, OrderRepository, OrderSearch, OrderSimpleQueryDto, Result,
};

/// Repository decorator that counts read queries.
///
/// Each read call on the wrapped repository is one query. The count is
/// shared between clones, so tests can hand one clone to the router and
/// inspect another. Every read also increments the
/// `repository_queries_total` metric labelled with the operation name.
/// Writes are passed through uncounted.
#[derive(Clone)]
pub struct CountingRepository<R> {
    inner: R,
    queries: Arc<AtomicUsize>,
}

impl<R: OrderRepository> CountingRepository<R> {
    /// Wraps `inner` with a fresh counter.
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            queries: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Returns the wrapped repository.
    pub fn inner(&self) -> &R {
        &self.inner
    }

    /// Returns the number of read queries issued since creation or the last reset.
    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    /// Resets the query counter to zero.
    pub fn reset(&self) {
        self.queries.store(0, Ordering::SeqCst);
    }

    fn record(&self, operation: &'static str) {
        self.queries.fetch_add(1, Ordering::SeqCst);
        metrics::counter!("repository_queries_total", "operation" => operation).increment(1);
    }
}

#[async_trait]
impl<R: OrderRepository> OrderRepository for CountingRepository<R> {
    async fn save_member(&self, member: NewMember) -> Result<MemberId> {
        self.inner.save_member(member).await
    }

    async fn save_delivery(&self, delivery: NewDelivery) -> Result<DeliveryId> {
        self.inner.save_delivery(delivery).await
    }

    async fn save_order(&self, order: NewOrder) -> Result<OrderId> {
        self.inner.save_order(order).await
    }

    async fn find_member(&self, id: MemberId) -> Result<Member> {
        self.record("find_member");
        self.inner.find_member(id).await
    }

    async fn find_delivery(&self, id: DeliveryId) -> Result<Delivery> {
        self.record("find_delivery");
        self.inner.find_delivery(id).await
    }

    async fn find_all(&self, search: &OrderSearch) -> Result<Vec<Order>> {
        self.record("find_all");
        self.inner.find_all(search).await
    }

    async fn find_all_with_member_delivery(&self) -> Result<Vec<Order>> {
        self.record("find_all_with_member_delivery");
        self.inner.find_all_with_member_delivery().await
    }

    async fn find_order_dtos(&self) -> Result<Vec<OrderSimpleQueryDto>> {
        self.record("find_order_dtos");
        self.inner.find_order_dtos().await
    }
}
