use bigdecimal::{BigDecimal, Zero};
use uuid::Uuid;

use super::errors::DomainError;

/// Catalog-specific attributes of an item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemKind {
    Book { author: String, isbn: String },
    Album { artist: String, etc: String },
    Movie { director: String, actor: String },
}

impl ItemKind {
    /// Discriminator stored alongside the item row.
    pub fn dtype(&self) -> &'static str {
        match self {
            ItemKind::Book { .. } => "B",
            ItemKind::Album { .. } => "A",
            ItemKind::Movie { .. } => "M",
        }
    }
}

/// A stock-bearing catalog entry.
///
/// `stock_quantity` is only ever changed through [`Item::add_stock`] and
/// [`Item::remove_stock`], so it can never go negative.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    id: Uuid,
    name: String,
    price: BigDecimal,
    stock_quantity: i32,
    kind: ItemKind,
}

impl Item {
    pub fn new(
        name: impl Into<String>,
        price: BigDecimal,
        stock_quantity: i32,
        kind: ItemKind,
    ) -> Result<Self, DomainError> {
        let name = name.into();
        validate_name(&name)?;
        validate_price(&price)?;
        if stock_quantity < 0 {
            return Err(DomainError::InvalidInput(
                "stock quantity must not be negative".to_string(),
            ));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            name,
            price,
            stock_quantity,
            kind,
        })
    }

    pub(crate) fn restore(
        id: Uuid,
        name: String,
        price: BigDecimal,
        stock_quantity: i32,
        kind: ItemKind,
    ) -> Self {
        Self {
            id,
            name,
            price,
            stock_quantity,
            kind,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> &BigDecimal {
        &self.price
    }

    pub fn stock_quantity(&self) -> i32 {
        self.stock_quantity
    }

    pub fn kind(&self) -> &ItemKind {
        &self.kind
    }

    /// Human readable label, e.g. `Book "JPA" by kim`.
    pub fn describe(&self) -> String {
        match &self.kind {
            ItemKind::Book { author, .. } => format!("Book \"{}\" by {}", self.name, author),
            ItemKind::Album { artist, .. } => format!("Album \"{}\" by {}", self.name, artist),
            ItemKind::Movie { director, .. } => {
                format!("Movie \"{}\" directed by {}", self.name, director)
            }
        }
    }

    /// Increases stock and returns the new quantity.
    pub fn add_stock(&mut self, quantity: i32) -> Result<i32, DomainError> {
        validate_quantity(quantity)?;
        self.stock_quantity = self
            .stock_quantity
            .checked_add(quantity)
            .ok_or_else(|| DomainError::InvalidInput("stock quantity overflow".to_string()))?;
        Ok(self.stock_quantity)
    }

    /// Decreases stock and returns the new quantity. Stock is untouched on error.
    pub fn remove_stock(&mut self, quantity: i32) -> Result<i32, DomainError> {
        validate_quantity(quantity)?;
        if quantity > self.stock_quantity {
            return Err(DomainError::StockInsufficient {
                requested: quantity,
                available: self.stock_quantity,
            });
        }
        self.stock_quantity -= quantity;
        Ok(self.stock_quantity)
    }

    /// Renames and reprices the item. Stock is changed separately.
    pub fn change(&mut self, name: impl Into<String>, price: BigDecimal) -> Result<(), DomainError> {
        let name = name.into();
        validate_name(&name)?;
        validate_price(&price)?;
        self.name = name;
        self.price = price;
        Ok(())
    }
}

fn validate_name(name: &str) -> Result<(), DomainError> {
    if name.trim().is_empty() {
        return Err(DomainError::InvalidInput(
            "item name must not be blank".to_string(),
        ));
    }
    Ok(())
}

fn validate_price(price: &BigDecimal) -> Result<(), DomainError> {
    if price <= &BigDecimal::zero() {
        return Err(DomainError::InvalidInput(format!(
            "price must be positive, got {}",
            price
        )));
    }
    Ok(())
}

fn validate_quantity(quantity: i32) -> Result<(), DomainError> {
    if quantity <= 0 {
        return Err(DomainError::InvalidInput(format!(
            "quantity must be positive, got {}",
            quantity
        )));
    }
    Ok(())
}
