//! Demo data loaded at startup.

use chrono::Local;
use domain::Address;
use repository::{NewDelivery, NewMember, NewOrder, OrderRepository, OrderSearch};

/// Stores two members, each with one order shipped to their own address.
///
/// Does nothing if the store already holds orders. Returns true when data
/// was written.
#[tracing::instrument(skip(repository))]
pub async fn init_db<R: OrderRepository + ?Sized>(repository: &R) -> repository::Result<bool> {
    if !repository.find_all(&OrderSearch::new()).await?.is_empty() {
        tracing::info!("store already holds orders, skipping demo data");
        return Ok(false);
    }

    place_order(repository, "userA", Address::new("Seoul", "1", "1111")).await?;
    place_order(repository, "userB", Address::new("Jinju", "2", "2222")).await?;

    tracing::info!("demo data loaded");
    Ok(true)
}

async fn place_order<R: OrderRepository + ?Sized>(
    repository: &R,
    name: &str,
    address: Address,
) -> repository::Result<()> {
    let member_id = repository
        .save_member(NewMember::new(name, address.clone()))
        .await?;
    let delivery_id = repository
        .save_delivery(NewDelivery::ready(address))
        .await?;
    repository
        .save_order(NewOrder::placed(
            member_id,
            delivery_id,
            Local::now().naive_local(),
        ))
        .await?;
    Ok(())
}
