use std::fmt;
use std::str::FromStr;

use uuid::Uuid;

use super::address::Address;
use super::errors::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryStatus {
    Ready,
    Comp,
}

impl DeliveryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryStatus::Ready => "READY",
            DeliveryStatus::Comp => "COMP",
        }
    }
}

impl fmt::Display for DeliveryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeliveryStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "READY" => Ok(DeliveryStatus::Ready),
            "COMP" => Ok(DeliveryStatus::Comp),
            other => Err(DomainError::InvalidInput(format!(
                "unknown delivery status '{}'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Delivery {
    id: Uuid,
    address: Address,
    status: DeliveryStatus,
}

impl Delivery {
    /// A delivery always starts out `READY`.
    pub fn new(address: Address) -> Self {
        Self {
            id: Uuid::new_v4(),
            address,
            status: DeliveryStatus::Ready,
        }
    }

    pub(crate) fn restore(id: Uuid, address: Address, status: DeliveryStatus) -> Self {
        Self {
            id,
            address,
            status,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn status(&self) -> DeliveryStatus {
        self.status
    }

    /// READY -> COMP. COMP is terminal.
    pub(crate) fn complete(&mut self) -> Result<(), DomainError> {
        if self.status == DeliveryStatus::Comp {
            return Err(DomainError::IllegalState(
                "delivery is already completed".to_string(),
            ));
        }
        self.status = DeliveryStatus::Comp;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_ready_then_completes_once() {
        let mut delivery = Delivery::new(Address::new("Seoul", "Jong-ro 1", "03000"));
        assert_eq!(delivery.status(), DeliveryStatus::Ready);

        delivery.complete().expect("first completion succeeds");
        assert_eq!(delivery.status(), DeliveryStatus::Comp);

        let err = delivery.complete().unwrap_err();
        assert!(matches!(err, DomainError::IllegalState(_)));
        assert_eq!(delivery.status(), DeliveryStatus::Comp);
    }

    #[test]
    fn status_parses_its_own_text() {
        for status in [DeliveryStatus::Ready, DeliveryStatus::Comp] {
            assert_eq!(status.to_string().parse::<DeliveryStatus>(), Ok(status));
        }
        assert!("SHIPPED".parse::<DeliveryStatus>().is_err());
    }
}
