use uuid::Uuid;

use crate::domain::address::Address;
use crate::domain::errors::DomainError;
use crate::domain::member::Member;
use crate::domain::ports::Store;

pub struct MemberService<S> {
    store: S,
}

impl<S: Store> MemberService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Registers a new member. Names are unique.
    pub fn join(&self, name: &str, address: Address) -> Result<Uuid, DomainError> {
        self.store
            .transaction(|uow| {
                if !uow.find_members_by_name(name)?.is_empty() {
                    return Err(DomainError::IllegalState(format!(
                        "member '{}' already exists",
                        name
                    )));
                }
                let member = Member::new(name, address)?;
                uow.save_member(&member)?;
                Ok(member.id())
            })
            .inspect(|id| log::info!("Member {} joined as '{}'", id, name))
            .inspect_err(|e| log::warn!("Join of '{}' rejected: {}", name, e))
    }

    pub fn find_members(&self) -> Result<Vec<Member>, DomainError> {
        self.store.transaction(|uow| uow.find_members())
    }

    pub fn find_one(&self, member_id: Uuid) -> Result<Member, DomainError> {
        self.store.transaction(|uow| {
            uow.find_member(member_id)?
                .ok_or(DomainError::NotFound("Member"))
        })
    }
}
