use async_trait::async_trait;
use chrono::NaiveDateTime;
use common::{DeliveryId, MemberId, OrderId};
use domain::{Address, Delivery, DeliveryStatus, Member, Order, OrderStatus, Ref};
use sqlx::{PgPool, Row, postgres::PgRow};

use crate::search::MAX_RESULTS;
use crate::{
    NewDelivery, NewMember, NewOrder, OrderRepository, OrderSearch, OrderSimpleQueryDto,
    RepositoryError, Result,
};

/// Columns of a member row, aliased with an `m_` prefix, plus the ids of
/// the member's orders.
const MEMBER_COLUMNS: &str = r#"
    m.member_id AS m_member_id, m.name AS m_name,
    m.city AS m_city, m.street AS m_street, m.zipcode AS m_zipcode,
    ARRAY(SELECT mo.order_id FROM orders mo WHERE mo.member_id = m.member_id ORDER BY mo.order_id) AS m_order_ids
"#;

/// Columns of a delivery row, aliased with a `d_` prefix.
const DELIVERY_COLUMNS: &str = r#"
    d.delivery_id AS d_delivery_id,
    d.city AS d_city, d.street AS d_street, d.zipcode AS d_zipcode,
    d.status AS d_status
"#;

/// PostgreSQL-backed order store.
#[derive(Clone)]
pub struct PostgresOrderStore {
    pool: PgPool,
}

impl PostgresOrderStore {
    /// Creates a new PostgreSQL order store.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Runs the database migrations.
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("../../migrations").run(&self.pool).await?;
        Ok(())
    }

    fn row_to_address(row: &PgRow, prefix: &str) -> Result<Address> {
        Ok(Address::new(
            row.try_get::<String, _>(format!("{prefix}city").as_str())?,
            row.try_get::<String, _>(format!("{prefix}street").as_str())?,
            row.try_get::<String, _>(format!("{prefix}zipcode").as_str())?,
        ))
    }

    fn row_to_member(row: &PgRow) -> Result<Member> {
        let order_ids: Vec<i64> = row.try_get("m_order_ids")?;
        Ok(Member::new(
            MemberId::new(row.try_get("m_member_id")?),
            row.try_get::<String, _>("m_name")?,
            Self::row_to_address(row, "m_")?,
        )
        .with_orders(order_ids.into_iter().map(OrderId::new).collect()))
    }

    fn row_to_delivery(row: &PgRow) -> Result<Delivery> {
        let status: String = row.try_get("d_status")?;
        Ok(Delivery::new(
            DeliveryId::new(row.try_get("d_delivery_id")?),
            Self::row_to_address(row, "d_")?,
            status.parse::<DeliveryStatus>()?,
        ))
    }

    fn row_to_order(row: &PgRow, member: Ref<Member>, delivery: Ref<Delivery>) -> Result<Order> {
        let status: String = row.try_get("status")?;
        Ok(Order::new(
            OrderId::new(row.try_get("order_id")?),
            member,
            delivery,
            row.try_get::<NaiveDateTime, _>("order_date")?,
            status.parse::<OrderStatus>()?,
        ))
    }

    /// Maps constraint violations on `orders` to repository errors.
    fn order_insert_error(err: sqlx::Error, order: &NewOrder) -> RepositoryError {
        if let sqlx::Error::Database(ref db_err) = err {
            match db_err.constraint() {
                Some("orders_member_id_fkey") => {
                    return RepositoryError::not_found("Member", order.member_id);
                }
                Some("orders_delivery_id_fkey") => {
                    return RepositoryError::not_found("Delivery", order.delivery_id);
                }
                Some("orders_delivery_id_key") => {
                    return RepositoryError::DeliveryAlreadyAssigned(order.delivery_id);
                }
                _ => {}
            }
        }
        RepositoryError::Database(err)
    }
}

#[async_trait]
impl OrderRepository for PostgresOrderStore {
    async fn save_member(&self, member: NewMember) -> Result<MemberId> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO member (member_id, name, city, street, zipcode)
            VALUES (nextval('entity_seq'), $1, $2, $3, $4)
            RETURNING member_id
            "#,
        )
        .bind(&member.name)
        .bind(member.address.city())
        .bind(member.address.street())
        .bind(member.address.zipcode())
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(member_id = id, "member saved");
        Ok(MemberId::new(id))
    }

    async fn save_delivery(&self, delivery: NewDelivery) -> Result<DeliveryId> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO delivery (delivery_id, city, street, zipcode, status)
            VALUES (nextval('entity_seq'), $1, $2, $3, $4)
            RETURNING delivery_id
            "#,
        )
        .bind(delivery.address.city())
        .bind(delivery.address.street())
        .bind(delivery.address.zipcode())
        .bind(delivery.status.as_str())
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(delivery_id = id, "delivery saved");
        Ok(DeliveryId::new(id))
    }

    async fn save_order(&self, order: NewOrder) -> Result<OrderId> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO orders (order_id, member_id, delivery_id, order_date, status)
            VALUES (nextval('entity_seq'), $1, $2, $3, $4)
            RETURNING order_id
            "#,
        )
        .bind(order.member_id.as_i64())
        .bind(order.delivery_id.as_i64())
        .bind(order.order_date)
        .bind(order.status.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| Self::order_insert_error(e, &order))?;

        tracing::debug!(order_id = id, "order saved");
        Ok(OrderId::new(id))
    }

    async fn find_member(&self, id: MemberId) -> Result<Member> {
        let sql = format!("SELECT {MEMBER_COLUMNS} FROM member m WHERE m.member_id = $1");
        tracing::debug!(member_id = %id, "select member");

        let row = sqlx::query(&sql)
            .bind(id.as_i64())
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| RepositoryError::not_found("Member", id))?;

        Self::row_to_member(&row)
    }

    async fn find_delivery(&self, id: DeliveryId) -> Result<Delivery> {
        let sql = format!("SELECT {DELIVERY_COLUMNS} FROM delivery d WHERE d.delivery_id = $1");
        tracing::debug!(delivery_id = %id, "select delivery");

        let row = sqlx::query(&sql)
            .bind(id.as_i64())
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| RepositoryError::not_found("Delivery", id))?;

        Self::row_to_delivery(&row)
    }

    async fn find_all(&self, search: &OrderSearch) -> Result<Vec<Order>> {
        let mut sql = String::from(
            "SELECT o.order_id, o.member_id, o.delivery_id, o.order_date, o.status \
             FROM orders o JOIN member m ON m.member_id = o.member_id WHERE 1=1",
        );
        let mut param_count = 0;

        // Build dynamic query
        if search.order_status.is_some() {
            param_count += 1;
            sql.push_str(&format!(" AND o.status = ${param_count}"));
        }
        if search.member_name_filter().is_some() {
            param_count += 1;
            sql.push_str(&format!(" AND strpos(m.name, ${param_count}) > 0"));
        }
        sql.push_str(&format!(" ORDER BY o.order_id ASC LIMIT {MAX_RESULTS}"));
        tracing::debug!(?search, "select orders");

        let mut query = sqlx::query(&sql);
        if let Some(status) = search.order_status {
            query = query.bind(status.as_str());
        }
        if let Some(name) = search.member_name_filter() {
            query = query.bind(name);
        }

        let rows = query.fetch_all(&self.pool).await?;
        rows.iter()
            .map(|row| -> Result<Order> {
                let member = Ref::unloaded(MemberId::new(row.try_get("member_id")?));
                let delivery = Ref::unloaded(DeliveryId::new(row.try_get("delivery_id")?));
                Self::row_to_order(row, member, delivery)
            })
            .collect()
    }

    async fn find_all_with_member_delivery(&self) -> Result<Vec<Order>> {
        let sql = format!(
            "SELECT o.order_id, o.order_date, o.status, {MEMBER_COLUMNS}, {DELIVERY_COLUMNS} \
             FROM orders o \
             JOIN member m ON m.member_id = o.member_id \
             JOIN delivery d ON d.delivery_id = o.delivery_id \
             ORDER BY o.order_id ASC LIMIT {MAX_RESULTS}"
        );
        tracing::debug!("select orders join fetch member, delivery");

        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;
        rows.iter()
            .map(|row| -> Result<Order> {
                let member = Ref::loaded(Self::row_to_member(row)?);
                let delivery = Ref::loaded(Self::row_to_delivery(row)?);
                Self::row_to_order(row, member, delivery)
            })
            .collect()
    }

    async fn find_order_dtos(&self) -> Result<Vec<OrderSimpleQueryDto>> {
        tracing::debug!("select order listing columns");
        let sql = format!(
            "SELECT o.order_id, m.name, o.order_date, o.status, \
                    d.city AS d_city, d.street AS d_street, d.zipcode AS d_zipcode \
             FROM orders o \
             JOIN member m ON m.member_id = o.member_id \
             JOIN delivery d ON d.delivery_id = o.delivery_id \
             ORDER BY o.order_id ASC LIMIT {MAX_RESULTS}"
        );
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;

        rows.iter()
            .map(|row| -> Result<OrderSimpleQueryDto> {
                let status: String = row.try_get("status")?;
                Ok(OrderSimpleQueryDto::new(
                    OrderId::new(row.try_get("order_id")?),
                    row.try_get::<String, _>("name")?,
                    row.try_get::<NaiveDateTime, _>("order_date")?,
                    status.parse::<OrderStatus>()?,
                    Self::row_to_address(row, "d_")?,
                ))
            })
            .collect()
    }
}
