use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use bigdecimal::{BigDecimal, Zero};
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::delivery::{Delivery, DeliveryStatus};
use super::errors::DomainError;
use super::item::Item;
use super::member::Member;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
    Order,
    Cancel,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Order => "ORDER",
            OrderStatus::Cancel => "CANCEL",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ORDER" => Ok(OrderStatus::Order),
            "CANCEL" => Ok(OrderStatus::Cancel),
            other => Err(DomainError::InvalidInput(format!(
                "unknown order status '{}'",
                other
            ))),
        }
    }
}

/// Filter for order listings. Empty fields match everything.
#[derive(Debug, Clone, Default)]
pub struct OrderSearch {
    pub member_name: Option<String>,
    pub order_status: Option<OrderStatus>,
}

/// One line of an order: a price snapshot and a count for a single item.
///
/// The item itself is referenced by id only; it outlives the order.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderItem {
    id: Uuid,
    order_id: Option<Uuid>,
    item_id: Uuid,
    order_price: BigDecimal,
    count: i32,
}

impl OrderItem {
    /// Takes `count` units out of `item`'s stock and records the line.
    pub fn create_order_item(
        item: &mut Item,
        order_price: BigDecimal,
        count: i32,
    ) -> Result<Self, DomainError> {
        if count < 1 {
            return Err(DomainError::InvalidInput(format!(
                "order count must be at least 1, got {}",
                count
            )));
        }
        item.remove_stock(count)?;
        Ok(Self {
            id: Uuid::new_v4(),
            order_id: None,
            item_id: item.id(),
            order_price,
            count,
        })
    }

    pub(crate) fn restore(
        id: Uuid,
        order_id: Uuid,
        item_id: Uuid,
        order_price: BigDecimal,
        count: i32,
    ) -> Self {
        Self {
            id,
            order_id: Some(order_id),
            item_id,
            order_price,
            count,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Owning order, set once the line is attached by [`Order::create_order`].
    pub fn order_id(&self) -> Option<Uuid> {
        self.order_id
    }

    pub fn item_id(&self) -> Uuid {
        self.item_id
    }

    pub fn order_price(&self) -> &BigDecimal {
        &self.order_price
    }

    pub fn count(&self) -> i32 {
        self.count
    }

    pub fn total_price(&self) -> BigDecimal {
        &self.order_price * BigDecimal::from(self.count)
    }

    /// Puts the consumed units back. Not idempotent: call once per line.
    pub fn cancel(&self, item: &mut Item) -> Result<(), DomainError> {
        if item.id() != self.item_id {
            return Err(DomainError::Internal(format!(
                "order item {} does not reference item {}",
                self.id,
                item.id()
            )));
        }
        item.add_stock(self.count)?;
        Ok(())
    }
}

/// Aggregate root owning its delivery and order lines.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    id: Uuid,
    member_id: Uuid,
    delivery: Delivery,
    order_items: Vec<OrderItem>,
    order_date: DateTime<Utc>,
    status: OrderStatus,
}

impl Order {
    pub fn create_order(
        member: &Member,
        delivery: Delivery,
        order_items: Vec<OrderItem>,
    ) -> Result<Self, DomainError> {
        if order_items.is_empty() {
            return Err(DomainError::InvalidInput(
                "an order needs at least one order item".to_string(),
            ));
        }
        let id = Uuid::new_v4();
        let order_items = order_items
            .into_iter()
            .map(|mut line| {
                line.order_id = Some(id);
                line
            })
            .collect();
        Ok(Self {
            id,
            member_id: member.id(),
            delivery,
            order_items,
            order_date: Utc::now(),
            status: OrderStatus::Order,
        })
    }

    pub(crate) fn restore(
        id: Uuid,
        member_id: Uuid,
        delivery: Delivery,
        order_items: Vec<OrderItem>,
        order_date: DateTime<Utc>,
        status: OrderStatus,
    ) -> Self {
        Self {
            id,
            member_id,
            delivery,
            order_items,
            order_date,
            status,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn member_id(&self) -> Uuid {
        self.member_id
    }

    pub fn delivery(&self) -> &Delivery {
        &self.delivery
    }

    pub fn order_items(&self) -> &[OrderItem] {
        &self.order_items
    }

    pub fn order_date(&self) -> DateTime<Utc> {
        self.order_date
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn total_price(&self) -> BigDecimal {
        self.order_items
            .iter()
            .fold(BigDecimal::zero(), |acc, line| acc + line.total_price())
    }

    /// Ids of every item referenced by this order's lines.
    pub fn item_ids(&self) -> Vec<Uuid> {
        let mut ids: Vec<Uuid> = self.order_items.iter().map(OrderItem::item_id).collect();
        ids.sort();
        ids.dedup();
        ids
    }

    /// Cancels the order and restores stock on every referenced item.
    ///
    /// `items` must contain every item named by [`Order::item_ids`]. Stock is
    /// restored on copies first, so neither the order nor `items` changes
    /// unless every line can be cancelled.
    pub fn cancel(&mut self, items: &mut HashMap<Uuid, Item>) -> Result<(), DomainError> {
        if self.delivery.status() == DeliveryStatus::Comp {
            return Err(DomainError::IllegalState(
                "order has already been delivered and cannot be cancelled".to_string(),
            ));
        }
        if self.status == OrderStatus::Cancel {
            return Err(DomainError::IllegalState(
                "order is already cancelled".to_string(),
            ));
        }
        let mut restored: HashMap<Uuid, Item> = HashMap::new();
        for line in &self.order_items {
            let item = match restored.entry(line.item_id) {
                Entry::Occupied(slot) => slot.into_mut(),
                Entry::Vacant(slot) => slot.insert(
                    items
                        .get(&line.item_id)
                        .cloned()
                        .ok_or(DomainError::NotFound("Item"))?,
                ),
            };
            line.cancel(item)?;
        }

        items.extend(restored);
        self.status = OrderStatus::Cancel;
        Ok(())
    }

    /// Marks the delivery as completed. Cancelled orders never ship.
    pub fn complete_delivery(&mut self) -> Result<(), DomainError> {
        if self.status == OrderStatus::Cancel {
            return Err(DomainError::IllegalState(
                "cancelled order cannot be delivered".to_string(),
            ));
        }
        self.delivery.complete()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::address::Address;
    use crate::domain::item::ItemKind;

    fn book(price: i32, stock: i32) -> Item {
        Item::new(
            "JPA",
            BigDecimal::from(price),
            stock,
            ItemKind::Book {
                author: "kim".to_string(),
                isbn: "123".to_string(),
            },
        )
        .expect("valid item")
    }

    fn member() -> Member {
        Member::new("kim", Address::new("Seoul", "Hangang-daero 1", "04000")).expect("valid member")
    }

    fn place(member: &Member, lines: Vec<OrderItem>) -> Order {
        let delivery = Delivery::new(member.address().clone());
        Order::create_order(member, delivery, lines).expect("valid order")
    }

    #[test]
    fn create_order_item_consumes_stock_and_snapshots_price() {
        let mut item = book(100, 10);
        let price = item.price().clone();
        let line = OrderItem::create_order_item(&mut item, price, 3)
            .expect("enough stock");

        assert_eq!(item.stock_quantity(), 7);
        assert_eq!(line.order_price(), &BigDecimal::from(100));
        assert_eq!(line.total_price(), BigDecimal::from(300));

        item.change("JPA", BigDecimal::from(999)).expect("reprice");
        assert_eq!(line.order_price(), &BigDecimal::from(100));
    }

    #[test]
    fn create_then_cancel_line_restores_stock_exactly() {
        let mut item = book(100, 10);
        let line = OrderItem::create_order_item(&mut item, BigDecimal::from(100), 4)
            .expect("enough stock");
        line.cancel(&mut item).expect("cancel line");
        assert_eq!(item.stock_quantity(), 10);
    }

    #[test]
    fn create_order_item_rejects_short_stock_and_zero_count() {
        let mut item = book(100, 2);
        let err = OrderItem::create_order_item(&mut item, BigDecimal::from(100), 5).unwrap_err();
        assert!(matches!(err, DomainError::StockInsufficient { .. }));
        let err = OrderItem::create_order_item(&mut item, BigDecimal::from(100), 0).unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(_)));
        assert_eq!(item.stock_quantity(), 2);
    }

    #[test]
    fn create_order_attaches_lines_and_starts_in_order_state() {
        let m = member();
        let mut a = book(100, 10);
        let mut b = book(250, 5);
        let order = place(
            &m,
            vec![
                OrderItem::create_order_item(&mut a, BigDecimal::from(100), 3).expect("line a"),
                OrderItem::create_order_item(&mut b, BigDecimal::from(250), 2).expect("line b"),
            ],
        );

        assert_eq!(order.status(), OrderStatus::Order);
        assert_eq!(order.member_id(), m.id());
        assert_eq!(order.delivery().status(), DeliveryStatus::Ready);
        assert_eq!(order.delivery().address(), m.address());
        assert!(order
            .order_items()
            .iter()
            .all(|l| l.order_id() == Some(order.id())));
        assert_eq!(order.total_price(), BigDecimal::from(800));
    }

    #[test]
    fn create_order_without_lines_is_rejected() {
        let m = member();
        let err = Order::create_order(&m, Delivery::new(m.address().clone()), vec![]).unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(_)));
    }

    #[test]
    fn cancel_restores_stock_for_every_line() {
        let m = member();
        let mut a = book(100, 10);
        let mut b = book(250, 5);
        let lines = vec![
            OrderItem::create_order_item(&mut a, BigDecimal::from(100), 3).expect("line a"),
            OrderItem::create_order_item(&mut b, BigDecimal::from(250), 5).expect("line b"),
        ];
        let mut order = place(&m, lines);
        let (a_id, b_id) = (a.id(), b.id());
        let mut items: HashMap<Uuid, Item> = [(a_id, a), (b_id, b)].into_iter().collect();

        order.cancel(&mut items).expect("cancel");

        assert_eq!(order.status(), OrderStatus::Cancel);
        assert_eq!(items[&a_id].stock_quantity(), 10);
        assert_eq!(items[&b_id].stock_quantity(), 5);
    }

    #[test]
    fn cancel_after_delivery_completed_changes_nothing() {
        let m = member();
        let mut item = book(100, 10);
        let line = OrderItem::create_order_item(&mut item, BigDecimal::from(100), 3).expect("line");
        let mut order = place(&m, vec![line]);
        order.complete_delivery().expect("ship");
        let mut items: HashMap<Uuid, Item> = [(item.id(), item)].into_iter().collect();

        let err = order.cancel(&mut items).unwrap_err();

        assert!(matches!(err, DomainError::IllegalState(_)));
        assert_eq!(order.status(), OrderStatus::Order);
        assert_eq!(order.delivery().status(), DeliveryStatus::Comp);
        assert!(items.values().all(|i| i.stock_quantity() == 7));
    }

    #[test]
    fn second_cancel_is_rejected_without_restoring_twice() {
        let m = member();
        let mut item = book(100, 10);
        let line = OrderItem::create_order_item(&mut item, BigDecimal::from(100), 3).expect("line");
        let mut order = place(&m, vec![line]);
        let mut items: HashMap<Uuid, Item> = [(item.id(), item)].into_iter().collect();

        order.cancel(&mut items).expect("first cancel");
        let err = order.cancel(&mut items).unwrap_err();

        assert!(matches!(err, DomainError::IllegalState(_)));
        assert!(items.values().all(|i| i.stock_quantity() == 10));
    }

    #[test]
    fn cancel_with_missing_item_mutates_nothing() {
        let m = member();
        let mut item = book(100, 10);
        let line = OrderItem::create_order_item(&mut item, BigDecimal::from(100), 3).expect("line");
        let mut order = place(&m, vec![line]);

        let err = order.cancel(&mut HashMap::new()).unwrap_err();

        assert_eq!(err, DomainError::NotFound("Item"));
        assert_eq!(order.status(), OrderStatus::Order);
    }

    #[test]
    fn cancel_failing_on_a_later_line_leaves_order_and_stock_untouched() {
        let m = member();
        let mut a = book(100, 10);
        let mut b = book(250, 5);
        let lines = vec![
            OrderItem::create_order_item(&mut a, BigDecimal::from(100), 3).expect("line a"),
            OrderItem::create_order_item(&mut b, BigDecimal::from(250), 5).expect("line b"),
        ];
        let mut order = place(&m, lines);
        b.add_stock(i32::MAX).expect("restock b to the limit");
        let (a_id, b_id) = (a.id(), b.id());
        let mut items: HashMap<Uuid, Item> = [(a_id, a), (b_id, b)].into_iter().collect();

        let err = order.cancel(&mut items).unwrap_err();

        assert!(matches!(err, DomainError::InvalidInput(_)));
        assert_eq!(order.status(), OrderStatus::Order);
        assert_eq!(items[&a_id].stock_quantity(), 7);
        assert_eq!(items[&b_id].stock_quantity(), i32::MAX);
    }

    #[test]
    fn cancel_restores_stock_once_per_line_sharing_an_item() {
        let m = member();
        let mut item = book(100, 10);
        let lines = vec![
            OrderItem::create_order_item(&mut item, BigDecimal::from(100), 2).expect("line 1"),
            OrderItem::create_order_item(&mut item, BigDecimal::from(100), 3).expect("line 2"),
        ];
        let mut order = place(&m, lines);
        let id = item.id();
        let mut items: HashMap<Uuid, Item> = [(id, item)].into_iter().collect();

        order.cancel(&mut items).expect("cancel");

        assert_eq!(items[&id].stock_quantity(), 10);
    }

    #[test]
    fn cancelled_order_cannot_be_delivered() {
        let m = member();
        let mut item = book(100, 10);
        let line = OrderItem::create_order_item(&mut item, BigDecimal::from(100), 1).expect("line");
        let mut order = place(&m, vec![line]);
        let mut items: HashMap<Uuid, Item> = [(item.id(), item)].into_iter().collect();
        order.cancel(&mut items).expect("cancel");

        let err = order.complete_delivery().unwrap_err();
        assert!(matches!(err, DomainError::IllegalState(_)));
        assert_eq!(order.delivery().status(), DeliveryStatus::Ready);
    }

    #[test]
    fn order_status_round_trips_through_text() {
        assert_eq!("CANCEL".parse::<OrderStatus>(), Ok(OrderStatus::Cancel));
        assert_eq!(OrderStatus::Order.to_string(), "ORDER");
        assert!("PENDING".parse::<OrderStatus>().is_err());
    }
}
