//! Customer master-data service

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::domain::customer::Customer;
use crate::domain::{DomainError, DomainResult, RepositoryProvider};

/// Partial update of customer contact data. `None` leaves a field
/// untouched; the nullable fields use a nested Option to distinguish
/// "clear" from "keep".
#[derive(Debug, Default)]
pub struct CustomerUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<Option<String>>,
    pub phone_number: Option<Option<String>>,
}

pub struct CustomerService {
    repos: Arc<dyn RepositoryProvider>,
}

impl CustomerService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    pub async fn create_customer(
        &self,
        personal_number: &str,
        first_name: &str,
        last_name: &str,
        email: Option<String>,
        phone_number: Option<String>,
    ) -> DomainResult<Customer> {
        let customer = Customer::new(personal_number, first_name, last_name, email, phone_number)?;
        if self
            .repos
            .customers()
            .find_by_personal_number(&customer.personal_number)
            .await?
            .is_some()
        {
            return Err(DomainError::Conflict(format!(
                "customer with personal number {} already exists",
                customer.personal_number
            )));
        }
        self.repos.customers().save(&customer).await?;
        info!(customer_id = %customer.id, "Customer created");
        Ok(customer)
    }

    pub async fn get_customer(&self, id: Uuid) -> DomainResult<Customer> {
        self.repos
            .customers()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::NotFound {
                entity: "Customer",
                field: "id",
                value: id.to_string(),
            })
    }

    pub async fn get_by_personal_number(&self, personal_number: &str) -> DomainResult<Customer> {
        self.repos
            .customers()
            .find_by_personal_number(personal_number)
            .await?
            .ok_or_else(|| DomainError::NotFound {
                entity: "Customer",
                field: "personal_number",
                value: personal_number.to_string(),
            })
    }

    pub async fn list_customers(&self) -> DomainResult<Vec<Customer>> {
        self.repos.customers().find_all().await
    }

    pub async fn update_customer(&self, id: Uuid, update: CustomerUpdate) -> DomainResult<Customer> {
        let mut customer = self.get_customer(id).await?;
        if let Some(first_name) = update.first_name {
            customer.update_first_name(first_name);
        }
        if let Some(last_name) = update.last_name {
            customer.update_last_name(last_name);
        }
        if let Some(email) = update.email {
            customer.update_email(email);
        }
        if let Some(phone_number) = update.phone_number {
            customer.update_phone_number(phone_number);
        }
        self.repos.customers().update(&customer).await?;
        customer.version += 1;
        Ok(customer)
    }

    /// Privacy erasure: blanks every personal field, marks the row
    /// deleted and clears the customer reference on historical
    /// bookings. The booking rows themselves are untouched.
    pub async fn erase_customer(&self, id: Uuid) -> DomainResult<()> {
        let mut customer = self.get_customer(id).await?;
        if customer.deleted {
            return Ok(());
        }
        customer.erase();
        self.repos.customers().erase(&customer).await?;
        info!(customer_id = %customer.id, "Customer erased");
        Ok(())
    }
}
