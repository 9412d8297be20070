/// Postal address embedded in members and deliveries.
///
/// All three parts are fixed at construction; there are no setters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Address {
    city: String,
    street: String,
    zipcode: String,
}

impl Address {
    pub fn new(
        city: impl Into<String>,
        street: impl Into<String>,
        zipcode: impl Into<String>,
    ) -> Self {
        Self {
            city: city.into(),
            street: street.into(),
            zipcode: zipcode.into(),
        }
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn street(&self) -> &str {
        &self.street
    }

    pub fn zipcode(&self) -> &str {
        &self.zipcode
    }
}
