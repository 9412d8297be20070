use uuid::Uuid;

use super::errors::DomainError;
use super::item::Item;
use super::member::Member;
use super::order::{Order, OrderSearch};

/// Entity access inside one open transaction.
///
/// Nothing is tracked implicitly: every changed entity must be handed back
/// through one of the `save_*` calls before the transaction ends.
pub trait UnitOfWork {
    fn find_member(&mut self, id: Uuid) -> Result<Option<Member>, DomainError>;
    fn find_members(&mut self) -> Result<Vec<Member>, DomainError>;
    fn find_members_by_name(&mut self, name: &str) -> Result<Vec<Member>, DomainError>;
    fn save_member(&mut self, member: &Member) -> Result<(), DomainError>;

    fn find_item(&mut self, id: Uuid) -> Result<Option<Item>, DomainError>;
    /// Loads the item and holds a write lock on it until the transaction ends.
    fn find_item_for_update(&mut self, id: Uuid) -> Result<Option<Item>, DomainError>;
    fn find_items(&mut self) -> Result<Vec<Item>, DomainError>;
    fn save_item(&mut self, item: &Item) -> Result<(), DomainError>;

    fn find_order(&mut self, id: Uuid) -> Result<Option<Order>, DomainError>;
    /// Loads the whole aggregate and holds a write lock on the order row.
    fn find_order_for_update(&mut self, id: Uuid) -> Result<Option<Order>, DomainError>;
    fn find_orders(&mut self, search: &OrderSearch) -> Result<Vec<Order>, DomainError>;
    /// Saves the order together with its delivery and order items.
    fn save_order(&mut self, order: &Order) -> Result<(), DomainError>;
}

pub trait Store: Send + Sync + 'static {
    /// Runs `work` in a single transaction: committed when it returns `Ok`,
    /// rolled back when it returns `Err`.
    fn transaction<T, F>(&self, work: F) -> Result<T, DomainError>
    where
        F: FnOnce(&mut dyn UnitOfWork) -> Result<T, DomainError>;
}
