//! Customer repository interface

use async_trait::async_trait;
use uuid::Uuid;

use super::model::Customer;
use crate::domain::DomainResult;

#[async_trait]
pub trait CustomerRepository: Send + Sync {
    async fn save(&self, customer: &Customer) -> DomainResult<()>;
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Customer>>;
    /// Lookup by personal number; erased customers are excluded.
    async fn find_by_personal_number(&self, personal_number: &str)
        -> DomainResult<Option<Customer>>;
    async fn find_all(&self) -> DomainResult<Vec<Customer>>;
    /// Version-guarded update. A stale version token surfaces as `Conflict`.
    async fn update(&self, customer: &Customer) -> DomainResult<()>;
    /// Persist an erased customer and clear the customer reference on
    /// all of their bookings, in one transaction.
    async fn erase(&self, customer: &Customer) -> DomainResult<()>;
}
