//! Order repository for the simple-order service.
//!
//! Provides the four ways the listing endpoints read orders:
//! - `find_all` + `Session::initialize`: plain query, references loaded one by one
//! - `find_all_with_member_delivery`: one fetch-join query
//! - `find_order_dtos`: one projection query straight into `OrderSimpleQueryDto`
//!
//! `InMemoryOrderStore` and `PostgresOrderStore` implement the same
//! `OrderRepository` trait; `CountingRepository` wraps either one to count
//! the read queries a request issues.

pub mod counting;
pub mod error;
pub mod memory;
pub mod postgres;
pub mod query;
pub mod search;
pub mod session;
pub mod store;

pub use counting::CountingRepository;
pub use error::{RepositoryError, Result};
pub use memory::InMemoryOrderStore;
pub use postgres::PostgresOrderStore;
pub use query::OrderSimpleQueryDto;
pub use search::{MAX_RESULTS, OrderSearch};
pub use session::Session;
pub use store::{NewDelivery, NewMember, NewOrder, OrderRepository, OrderRepositoryExt};
