use std::collections::HashMap;

use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::address::Address;
use crate::domain::delivery::{Delivery, DeliveryStatus};
use crate::domain::errors::DomainError;
use crate::domain::item::{Item, ItemKind};
use crate::domain::member::Member;
use crate::domain::order::{Order, OrderItem, OrderSearch, OrderStatus};
use crate::domain::ports::{Store, UnitOfWork};
use crate::schema::{deliveries, items, members, order_items, orders};

use super::models::{DeliveryRow, ItemRow, MemberRow, OrderItemRow, OrderRow};

// ── Error conversions (infrastructure concern only) ──────────────────────────

impl From<diesel::result::Error> for DomainError {
    fn from(e: diesel::result::Error) -> Self {
        match e {
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
                DomainError::IllegalState(info.message().to_string())
            }
            other => DomainError::Internal(other.to_string()),
        }
    }
}

impl From<r2d2::Error> for DomainError {
    fn from(e: r2d2::Error) -> Self {
        DomainError::Internal(e.to_string())
    }
}

// ── Row mapping ──────────────────────────────────────────────────────────────

impl From<&Member> for MemberRow {
    fn from(m: &Member) -> Self {
        MemberRow {
            id: m.id(),
            name: m.name().to_string(),
            city: m.address().city().to_string(),
            street: m.address().street().to_string(),
            zipcode: m.address().zipcode().to_string(),
        }
    }
}

impl From<MemberRow> for Member {
    fn from(r: MemberRow) -> Self {
        Member::restore(r.id, r.name, Address::new(r.city, r.street, r.zipcode))
    }
}

impl From<&Item> for ItemRow {
    fn from(item: &Item) -> Self {
        let mut row = ItemRow {
            id: item.id(),
            dtype: item.kind().dtype().to_string(),
            name: item.name().to_string(),
            price: item.price().clone(),
            stock_quantity: item.stock_quantity(),
            author: None,
            isbn: None,
            artist: None,
            etc: None,
            director: None,
            actor: None,
        };
        match item.kind() {
            ItemKind::Book { author, isbn } => {
                row.author = Some(author.clone());
                row.isbn = Some(isbn.clone());
            }
            ItemKind::Album { artist, etc } => {
                row.artist = Some(artist.clone());
                row.etc = Some(etc.clone());
            }
            ItemKind::Movie { director, actor } => {
                row.director = Some(director.clone());
                row.actor = Some(actor.clone());
            }
        }
        row
    }
}

impl TryFrom<ItemRow> for Item {
    type Error = DomainError;

    fn try_from(r: ItemRow) -> Result<Self, Self::Error> {
        let kind = match r.dtype.as_str() {
            "B" => ItemKind::Book {
                author: r.author.unwrap_or_default(),
                isbn: r.isbn.unwrap_or_default(),
            },
            "A" => ItemKind::Album {
                artist: r.artist.unwrap_or_default(),
                etc: r.etc.unwrap_or_default(),
            },
            "M" => ItemKind::Movie {
                director: r.director.unwrap_or_default(),
                actor: r.actor.unwrap_or_default(),
            },
            other => {
                return Err(DomainError::Internal(format!(
                    "item {} has unknown dtype '{}'",
                    r.id, other
                )))
            }
        };
        Ok(Item::restore(r.id, r.name, r.price, r.stock_quantity, kind))
    }
}

fn delivery_row(d: &Delivery) -> DeliveryRow {
    DeliveryRow {
        id: d.id(),
        city: d.address().city().to_string(),
        street: d.address().street().to_string(),
        zipcode: d.address().zipcode().to_string(),
        status: d.status().as_str().to_string(),
    }
}

fn assemble_order(
    row: OrderRow,
    delivery: DeliveryRow,
    lines: Vec<OrderItemRow>,
) -> Result<Order, DomainError> {
    let delivery_status: DeliveryStatus = delivery
        .status
        .parse()
        .map_err(|e: DomainError| DomainError::Internal(e.to_string()))?;
    let status: OrderStatus = row
        .status
        .parse()
        .map_err(|e: DomainError| DomainError::Internal(e.to_string()))?;

    let delivery = Delivery::restore(
        delivery.id,
        Address::new(delivery.city, delivery.street, delivery.zipcode),
        delivery_status,
    );
    let lines = lines
        .into_iter()
        .map(|l| OrderItem::restore(l.id, l.order_id, l.item_id, l.order_price, l.count))
        .collect();

    Ok(Order::restore(
        row.id,
        row.member_id,
        delivery,
        lines,
        row.order_date,
        status,
    ))
}

// ── Store ────────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DieselStore {
    pool: DbPool,
}

impl DieselStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl Store for DieselStore {
    fn transaction<T, F>(&self, work: F) -> Result<T, DomainError>
    where
        F: FnOnce(&mut dyn UnitOfWork) -> Result<T, DomainError>,
    {
        let mut pooled = self.pool.get()?;
        let conn: &mut PgConnection = &mut pooled;

        conn.transaction::<_, DomainError, _>(|conn| {
            let mut uow = DieselUnitOfWork { conn };
            work(&mut uow)
        })
    }
}

struct DieselUnitOfWork<'c> {
    conn: &'c mut PgConnection,
}

impl DieselUnitOfWork<'_> {
    fn load_order(&mut self, row: Option<OrderRow>) -> Result<Option<Order>, DomainError> {
        let Some(row) = row else {
            return Ok(None);
        };

        let delivery: DeliveryRow = deliveries::table
            .filter(deliveries::id.eq(row.delivery_id))
            .select(DeliveryRow::as_select())
            .first(self.conn)?;

        let lines: Vec<OrderItemRow> = OrderItemRow::belonging_to(&row)
            .select(OrderItemRow::as_select())
            .load(self.conn)?;

        assemble_order(row, delivery, lines).map(Some)
    }
}

impl UnitOfWork for DieselUnitOfWork<'_> {
    fn find_member(&mut self, id: Uuid) -> Result<Option<Member>, DomainError> {
        let row: Option<MemberRow> = members::table
            .filter(members::id.eq(id))
            .select(MemberRow::as_select())
            .first(self.conn)
            .optional()?;
        Ok(row.map(Member::from))
    }

    fn find_members(&mut self) -> Result<Vec<Member>, DomainError> {
        let rows: Vec<MemberRow> = members::table
            .select(MemberRow::as_select())
            .order((members::name.asc(), members::id.asc()))
            .load(self.conn)?;
        Ok(rows.into_iter().map(Member::from).collect())
    }

    fn find_members_by_name(&mut self, name: &str) -> Result<Vec<Member>, DomainError> {
        let rows: Vec<MemberRow> = members::table
            .filter(members::name.eq(name))
            .select(MemberRow::as_select())
            .load(self.conn)?;
        Ok(rows.into_iter().map(Member::from).collect())
    }

    fn save_member(&mut self, member: &Member) -> Result<(), DomainError> {
        let row = MemberRow::from(member);
        diesel::insert_into(members::table)
            .values(&row)
            .on_conflict(members::id)
            .do_update()
            .set(&row)
            .execute(self.conn)
            .map_err(|e| match e {
                DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                    DomainError::IllegalState(format!("member '{}' already exists", row.name))
                }
                other => other.into(),
            })?;
        Ok(())
    }

    fn find_item(&mut self, id: Uuid) -> Result<Option<Item>, DomainError> {
        let row: Option<ItemRow> = items::table
            .filter(items::id.eq(id))
            .select(ItemRow::as_select())
            .first(self.conn)
            .optional()?;
        row.map(Item::try_from).transpose()
    }

    fn find_item_for_update(&mut self, id: Uuid) -> Result<Option<Item>, DomainError> {
        let row: Option<ItemRow> = items::table
            .filter(items::id.eq(id))
            .select(ItemRow::as_select())
            .for_update()
            .first(self.conn)
            .optional()?;
        row.map(Item::try_from).transpose()
    }

    fn find_items(&mut self) -> Result<Vec<Item>, DomainError> {
        items::table
            .select(ItemRow::as_select())
            .order((items::name.asc(), items::id.asc()))
            .load::<ItemRow>(self.conn)?
            .into_iter()
            .map(Item::try_from)
            .collect()
    }

    fn save_item(&mut self, item: &Item) -> Result<(), DomainError> {
        let row = ItemRow::from(item);
        diesel::insert_into(items::table)
            .values(&row)
            .on_conflict(items::id)
            .do_update()
            .set(&row)
            .execute(self.conn)?;
        Ok(())
    }

    fn find_order(&mut self, id: Uuid) -> Result<Option<Order>, DomainError> {
        let row: Option<OrderRow> = orders::table
            .filter(orders::id.eq(id))
            .select(OrderRow::as_select())
            .first(self.conn)
            .optional()?;
        self.load_order(row)
    }

    fn find_order_for_update(&mut self, id: Uuid) -> Result<Option<Order>, DomainError> {
        let row: Option<OrderRow> = orders::table
            .filter(orders::id.eq(id))
            .select(OrderRow::as_select())
            .for_update()
            .first(self.conn)
            .optional()?;
        self.load_order(row)
    }

    fn find_orders(&mut self, search: &OrderSearch) -> Result<Vec<Order>, DomainError> {
        let mut query = orders::table
            .inner_join(members::table)
            .select(OrderRow::as_select())
            .order(orders::order_date.desc())
            .into_boxed();
        if let Some(name) = &search.member_name {
            query = query.filter(members::name.eq(name.clone()));
        }
        if let Some(status) = search.order_status {
            query = query.filter(orders::status.eq(status.as_str()));
        }
        let rows: Vec<OrderRow> = query.load(self.conn)?;

        let delivery_ids: Vec<Uuid> = rows.iter().map(|o| o.delivery_id).collect();
        let mut delivery_rows: HashMap<Uuid, DeliveryRow> = deliveries::table
            .filter(deliveries::id.eq_any(delivery_ids))
            .select(DeliveryRow::as_select())
            .load::<DeliveryRow>(self.conn)?
            .into_iter()
            .map(|d| (d.id, d))
            .collect();

        let lines = OrderItemRow::belonging_to(&rows)
            .select(OrderItemRow::as_select())
            .load::<OrderItemRow>(self.conn)?
            .grouped_by(&rows);

        rows.into_iter()
            .zip(lines)
            .map(|(row, lines)| {
                let delivery = delivery_rows.remove(&row.delivery_id).ok_or_else(|| {
                    DomainError::Internal(format!("order {} has no delivery row", row.id))
                })?;
                assemble_order(row, delivery, lines)
            })
            .collect()
    }

    fn save_order(&mut self, order: &Order) -> Result<(), DomainError> {
        let delivery = delivery_row(order.delivery());
        diesel::insert_into(deliveries::table)
            .values(&delivery)
            .on_conflict(deliveries::id)
            .do_update()
            .set(deliveries::status.eq(&delivery.status))
            .execute(self.conn)?;

        diesel::insert_into(orders::table)
            .values(&OrderRow {
                id: order.id(),
                member_id: order.member_id(),
                delivery_id: order.delivery().id(),
                status: order.status().as_str().to_string(),
                order_date: order.order_date(),
            })
            .on_conflict(orders::id)
            .do_update()
            .set(orders::status.eq(order.status().as_str()))
            .execute(self.conn)?;

        // Order lines never change after creation.
        let lines: Vec<OrderItemRow> = order
            .order_items()
            .iter()
            .map(|l| OrderItemRow {
                id: l.id(),
                order_id: order.id(),
                item_id: l.item_id(),
                order_price: l.order_price().clone(),
                count: l.count(),
            })
            .collect();
        diesel::insert_into(order_items::table)
            .values(&lines)
            .on_conflict(order_items::id)
            .do_nothing()
            .execute(self.conn)?;

        Ok(())
    }
}
