use std::cmp::Ordering;

use bigdecimal::BigDecimal;
use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::item::Item;
use crate::domain::ports::Store;

/// New values for an existing item.
#[derive(Debug, Clone)]
pub struct ItemUpdate {
    pub name: String,
    pub price: BigDecimal,
    pub stock_quantity: i32,
}

pub struct ItemService<S> {
    store: S,
}

impl<S: Store> ItemService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Inserts or overwrites the item and returns its id.
    pub fn save_item(&self, item: Item) -> Result<Uuid, DomainError> {
        self.store
            .transaction(|uow| {
                uow.save_item(&item)?;
                Ok(item.id())
            })
            .inspect(|id| log::info!("Item {} saved: {}", id, item.describe()))
    }

    /// Renames and reprices an item and moves its stock to the requested
    /// level through the regular stock operations.
    pub fn update_item(&self, item_id: Uuid, update: ItemUpdate) -> Result<Item, DomainError> {
        self.store
            .transaction(|uow| {
                let mut item = uow
                    .find_item_for_update(item_id)?
                    .ok_or(DomainError::NotFound("Item"))?;

                if update.stock_quantity < 0 {
                    return Err(DomainError::InvalidInput(
                        "stock quantity must not be negative".to_string(),
                    ));
                }
                item.change(update.name, update.price)?;
                let delta = update.stock_quantity - item.stock_quantity();
                match delta.cmp(&0) {
                    Ordering::Greater => {
                        item.add_stock(delta)?;
                    }
                    Ordering::Less => {
                        item.remove_stock(-delta)?;
                    }
                    Ordering::Equal => {}
                }

                uow.save_item(&item)?;
                Ok(item)
            })
            .inspect(|item| log::info!("Item {} updated: {}", item_id, item.describe()))
            .inspect_err(|e| log::warn!("Update of item {} rejected: {}", item_id, e))
    }

    pub fn find_one(&self, item_id: Uuid) -> Result<Item, DomainError> {
        self.store
            .transaction(|uow| uow.find_item(item_id)?.ok_or(DomainError::NotFound("Item")))
    }

    pub fn find_items(&self) -> Result<Vec<Item>, DomainError> {
        self.store.transaction(|uow| uow.find_items())
    }
}
