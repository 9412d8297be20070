use std::collections::HashMap;

use uuid::Uuid;

use crate::domain::delivery::Delivery;
use crate::domain::errors::DomainError;
use crate::domain::order::{Order, OrderItem, OrderSearch};
use crate::domain::ports::Store;

pub struct OrderService<S> {
    store: S,
}

impl<S: Store> OrderService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Places a single-line order for `count` units of an item and returns
    /// the new order id. Stock is taken in the same transaction.
    pub fn order(&self, member_id: Uuid, item_id: Uuid, count: i32) -> Result<Uuid, DomainError> {
        self.store
            .transaction(|uow| {
                let member = uow
                    .find_member(member_id)?
                    .ok_or(DomainError::NotFound("Member"))?;
                let mut item = uow
                    .find_item_for_update(item_id)?
                    .ok_or(DomainError::NotFound("Item"))?;

                let delivery = Delivery::new(member.address().clone());
                let price = item.price().clone();
                let order_item = OrderItem::create_order_item(&mut item, price, count)?;
                let order = Order::create_order(&member, delivery, vec![order_item])?;

                uow.save_order(&order)?;
                uow.save_item(&item)?;
                Ok(order.id())
            })
            .inspect(|order_id| {
                log::info!(
                    "Order {} placed: member={} item={} count={}",
                    order_id,
                    member_id,
                    item_id,
                    count
                )
            })
            .inspect_err(|e| {
                log::warn!(
                    "Order rejected: member={} item={} count={}: {}",
                    member_id,
                    item_id,
                    count,
                    e
                )
            })
    }

    /// Cancels an order and puts its stock back.
    pub fn cancel_order(&self, order_id: Uuid) -> Result<(), DomainError> {
        self.store
            .transaction(|uow| {
                let mut order = uow
                    .find_order_for_update(order_id)?
                    .ok_or(DomainError::NotFound("Order"))?;

                let mut items = HashMap::new();
                for item_id in order.item_ids() {
                    let item = uow
                        .find_item_for_update(item_id)?
                        .ok_or(DomainError::NotFound("Item"))?;
                    items.insert(item_id, item);
                }

                order.cancel(&mut items)?;

                uow.save_order(&order)?;
                for item in items.values() {
                    uow.save_item(item)?;
                }
                Ok(())
            })
            .inspect(|_| log::info!("Order {} cancelled", order_id))
            .inspect_err(|e| log::warn!("Cancel of order {} rejected: {}", order_id, e))
    }

    /// Marks the order's delivery as completed (shipped).
    pub fn complete_delivery(&self, order_id: Uuid) -> Result<(), DomainError> {
        self.store
            .transaction(|uow| {
                let mut order = uow
                    .find_order_for_update(order_id)?
                    .ok_or(DomainError::NotFound("Order"))?;
                order.complete_delivery()?;
                uow.save_order(&order)
            })
            .inspect(|_| log::info!("Delivery of order {} completed", order_id))
            .inspect_err(|e| {
                log::warn!("Delivery completion of order {} rejected: {}", order_id, e)
            })
    }

    pub fn find_order(&self, order_id: Uuid) -> Result<Order, DomainError> {
        self.store.transaction(|uow| {
            uow.find_order(order_id)?
                .ok_or(DomainError::NotFound("Order"))
        })
    }

    pub fn find_orders(&self, search: &OrderSearch) -> Result<Vec<Order>, DomainError> {
        self.store.transaction(|uow| uow.find_orders(search))
    }
}
