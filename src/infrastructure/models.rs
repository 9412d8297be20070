use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::schema::{deliveries, items, members, order_items, orders};

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Insertable, AsChangeset)]
#[diesel(table_name = members)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct MemberRow {
    pub id: Uuid,
    pub name: String,
    pub city: String,
    pub street: String,
    pub zipcode: String,
}

/// Single-table row for every item variant; `dtype` tells which columns apply.
#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Insertable, AsChangeset)]
#[diesel(table_name = items)]
#[diesel(treat_none_as_null = true)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ItemRow {
    pub id: Uuid,
    pub dtype: String,
    pub name: String,
    pub price: BigDecimal,
    pub stock_quantity: i32,
    pub author: Option<String>,
    pub isbn: Option<String>,
    pub artist: Option<String>,
    pub etc: Option<String>,
    pub director: Option<String>,
    pub actor: Option<String>,
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Insertable)]
#[diesel(table_name = deliveries)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct DeliveryRow {
    pub id: Uuid,
    pub city: String,
    pub street: String,
    pub zipcode: String,
    pub status: String,
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Insertable, Associations)]
#[diesel(table_name = orders)]
#[diesel(belongs_to(MemberRow, foreign_key = member_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrderRow {
    pub id: Uuid,
    pub member_id: Uuid,
    pub delivery_id: Uuid,
    pub status: String,
    pub order_date: DateTime<Utc>,
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Insertable, Associations)]
#[diesel(table_name = order_items)]
#[diesel(belongs_to(OrderRow, foreign_key = order_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrderItemRow {
    pub id: Uuid,
    pub order_id: Uuid,
    pub item_id: Uuid,
    pub order_price: BigDecimal,
    pub count: i32,
}
