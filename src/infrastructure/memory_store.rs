use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::item::Item;
use crate::domain::member::Member;
use crate::domain::order::{Order, OrderSearch};
use crate::domain::ports::{Store, UnitOfWork};

#[derive(Debug, Clone, Default)]
struct Tables {
    members: HashMap<Uuid, Member>,
    items: HashMap<Uuid, Item>,
    orders: HashMap<Uuid, Order>,
}

/// Process-local store. Each transaction works on a private copy of the
/// tables, which replaces the shared state only on success.
///
/// Every transaction, read-only ones included, clones all three tables, so a
/// call costs time proportional to everything stored. Meant for tests and
/// small data sets.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Store for InMemoryStore {
    fn transaction<T, F>(&self, work: F) -> Result<T, DomainError>
    where
        F: FnOnce(&mut dyn UnitOfWork) -> Result<T, DomainError>,
    {
        // Holding the lock for the whole call serializes transactions.
        let mut committed = self
            .tables
            .lock()
            .map_err(|_| DomainError::Internal("in-memory store lock poisoned".to_string()))?;

        let mut uow = InMemoryUnitOfWork {
            tables: committed.clone(),
        };
        let result = work(&mut uow)?;
        *committed = uow.tables;
        Ok(result)
    }
}

struct InMemoryUnitOfWork {
    tables: Tables,
}

impl UnitOfWork for InMemoryUnitOfWork {
    fn find_member(&mut self, id: Uuid) -> Result<Option<Member>, DomainError> {
        Ok(self.tables.members.get(&id).cloned())
    }

    fn find_members(&mut self) -> Result<Vec<Member>, DomainError> {
        let mut members: Vec<Member> = self.tables.members.values().cloned().collect();
        members.sort_by(|a, b| a.name().cmp(b.name()).then(a.id().cmp(&b.id())));
        Ok(members)
    }

    fn find_members_by_name(&mut self, name: &str) -> Result<Vec<Member>, DomainError> {
        Ok(self
            .tables
            .members
            .values()
            .filter(|m| m.name() == name)
            .cloned()
            .collect())
    }

    fn save_member(&mut self, member: &Member) -> Result<(), DomainError> {
        self.tables.members.insert(member.id(), member.clone());
        Ok(())
    }

    fn find_item(&mut self, id: Uuid) -> Result<Option<Item>, DomainError> {
        Ok(self.tables.items.get(&id).cloned())
    }

    fn find_item_for_update(&mut self, id: Uuid) -> Result<Option<Item>, DomainError> {
        self.find_item(id)
    }

    fn find_items(&mut self) -> Result<Vec<Item>, DomainError> {
        let mut items: Vec<Item> = self.tables.items.values().cloned().collect();
        items.sort_by(|a, b| a.name().cmp(b.name()).then(a.id().cmp(&b.id())));
        Ok(items)
    }

    fn save_item(&mut self, item: &Item) -> Result<(), DomainError> {
        self.tables.items.insert(item.id(), item.clone());
        Ok(())
    }

    fn find_order(&mut self, id: Uuid) -> Result<Option<Order>, DomainError> {
        Ok(self.tables.orders.get(&id).cloned())
    }

    fn find_order_for_update(&mut self, id: Uuid) -> Result<Option<Order>, DomainError> {
        self.find_order(id)
    }

    fn find_orders(&mut self, search: &OrderSearch) -> Result<Vec<Order>, DomainError> {
        let members = &self.tables.members;
        let mut orders: Vec<Order> = self
            .tables
            .orders
            .values()
            .filter(|o| {
                search
                    .order_status
                    .map_or(true, |status| o.status() == status)
            })
            .filter(|o| match &search.member_name {
                Some(name) => members
                    .get(&o.member_id())
                    .is_some_and(|m| m.name() == name),
                None => true,
            })
            .cloned()
            .collect();
        orders.sort_by(|a, b| b.order_date().cmp(&a.order_date()));
        Ok(orders)
    }

    fn save_order(&mut self, order: &Order) -> Result<(), DomainError> {
        self.tables.orders.insert(order.id(), order.clone());
        Ok(())
    }
}
