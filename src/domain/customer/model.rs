//! Customer domain entity

use uuid::Uuid;

use crate::domain::DomainResult;
use crate::shared::errors::DomainError;

/// Rental customer
#[derive(Debug, Clone)]
pub struct Customer {
    pub id: Uuid,
    /// National personal identity number, unique
    pub personal_number: String,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub deleted: bool,
    /// Optimistic concurrency token, bumped by the store on every write
    pub version: i32,
}

impl Customer {
    pub fn new(
        personal_number: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: Option<String>,
        phone_number: Option<String>,
    ) -> DomainResult<Self> {
        let personal_number = personal_number.into();
        if personal_number.trim().is_empty() {
            return Err(DomainError::InvalidArgument(
                "personal number must not be empty".to_string(),
            ));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            personal_number,
            first_name: first_name.into(),
            last_name: last_name.into(),
            email,
            phone_number,
            deleted: false,
            version: 0,
        })
    }

    pub fn update_first_name(&mut self, first_name: impl Into<String>) {
        self.first_name = first_name.into();
    }

    pub fn update_last_name(&mut self, last_name: impl Into<String>) {
        self.last_name = last_name.into();
    }

    pub fn update_email(&mut self, email: Option<String>) {
        self.email = email;
    }

    pub fn update_phone_number(&mut self, phone_number: Option<String>) {
        self.phone_number = phone_number;
    }

    /// Privacy erasure: blank every personal field and mark the row
    /// deleted. Historical bookings keep their rows; the store clears
    /// their customer reference separately.
    pub fn erase(&mut self) {
        self.personal_number = String::new();
        self.first_name = String::new();
        self.last_name = String::new();
        self.email = None;
        self.phone_number = None;
        self.deleted = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_customer_requires_personal_number() {
        assert!(Customer::new("", "Anna", "Svensson", None, None).is_err());
        assert!(Customer::new("   ", "Anna", "Svensson", None, None).is_err());
    }

    #[test]
    fn erase_wipes_all_personal_data() {
        let mut c = Customer::new(
            "19900101-1234",
            "Anna",
            "Svensson",
            Some("anna@example.com".to_string()),
            Some("+46701234567".to_string()),
        )
        .unwrap();
        c.erase();
        assert!(c.deleted);
        assert!(c.personal_number.is_empty());
        assert!(c.first_name.is_empty());
        assert!(c.last_name.is_empty());
        assert!(c.email.is_none());
        assert!(c.phone_number.is_none());
    }
}
