use uuid::Uuid;

use super::address::Address;
use super::errors::DomainError;

#[derive(Debug, Clone, PartialEq)]
pub struct Member {
    id: Uuid,
    name: String,
    address: Address,
}

impl Member {
    pub fn new(name: impl Into<String>, address: Address) -> Result<Self, DomainError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::InvalidInput(
                "member name must not be blank".to_string(),
            ));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            name,
            address,
        })
    }

    /// Rehydrates a member loaded from storage.
    pub(crate) fn restore(id: Uuid, name: String, address: Address) -> Self {
        Self { id, name, address }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn address(&self) -> &Address {
        &self.address
    }
}
