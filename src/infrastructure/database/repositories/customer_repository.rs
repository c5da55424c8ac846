//! SeaORM implementation of CustomerRepository

use async_trait::async_trait;
use log::debug;
use sea_orm::sea_query::Expr;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use uuid::Uuid;

use crate::domain::customer::{Customer, CustomerRepository};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::{booking, customer};

use super::map_db_err;

pub struct SeaOrmCustomerRepository {
    db: DatabaseConnection,
}

impl SeaOrmCustomerRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: customer::Model) -> Customer {
    Customer {
        id: m.id,
        personal_number: m.personal_number,
        first_name: m.first_name,
        last_name: m.last_name,
        email: m.email,
        phone_number: m.phone_number,
        deleted: m.deleted,
        version: m.version,
    }
}

fn domain_to_active(c: &Customer, version: i32) -> customer::ActiveModel {
    customer::ActiveModel {
        id: Set(c.id),
        personal_number: Set(c.personal_number.clone()),
        first_name: Set(c.first_name.clone()),
        last_name: Set(c.last_name.clone()),
        email: Set(c.email.clone()),
        phone_number: Set(c.phone_number.clone()),
        deleted: Set(c.deleted),
        version: Set(version),
    }
}

async fn update_guarded<C: sea_orm::ConnectionTrait>(conn: &C, c: &Customer) -> DomainResult<()> {
    let mut active = domain_to_active(c, c.version + 1);
    active.id = NotSet;
    let res = customer::Entity::update_many()
        .set(active)
        .filter(customer::Column::Id.eq(c.id))
        .filter(customer::Column::Version.eq(c.version))
        .exec(conn)
        .await
        .map_err(map_db_err)?;
    if res.rows_affected == 0 {
        return Err(DomainError::Conflict(format!(
            "customer {} was modified concurrently",
            c.id
        )));
    }
    Ok(())
}

// ── CustomerRepository impl ─────────────────────────────────────

#[async_trait]
impl CustomerRepository for SeaOrmCustomerRepository {
    async fn save(&self, c: &Customer) -> DomainResult<()> {
        debug!("Saving customer: {}", c.id);
        domain_to_active(c, c.version)
            .insert(&self.db)
            .await
            .map_err(map_db_err)?;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Customer>> {
        let model = customer::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(map_db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_by_personal_number(
        &self,
        personal_number: &str,
    ) -> DomainResult<Option<Customer>> {
        let model = customer::Entity::find()
            .filter(customer::Column::PersonalNumber.eq(personal_number))
            .filter(customer::Column::Deleted.eq(false))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_all(&self) -> DomainResult<Vec<Customer>> {
        let models = customer::Entity::find()
            .filter(customer::Column::Deleted.eq(false))
            .order_by_asc(customer::Column::LastName)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn update(&self, c: &Customer) -> DomainResult<()> {
        debug!("Updating customer: {}", c.id);
        update_guarded(&self.db, c).await
    }

    async fn erase(&self, c: &Customer) -> DomainResult<()> {
        debug!("Erasing customer: {}", c.id);
        let txn = self.db.begin().await.map_err(map_db_err)?;
        let result = async {
            update_guarded(&txn, c).await?;
            // Historical bookings keep their rows with the customer
            // reference cleared, mirroring the set-null FK semantics.
            booking::Entity::update_many()
                .col_expr(booking::Column::CustomerId, Expr::value(Option::<Uuid>::None))
                .filter(booking::Column::CustomerId.eq(c.id))
                .exec(&txn)
                .await
                .map_err(map_db_err)?;
            Ok(())
        }
        .await;
        match result {
            Ok(()) => txn.commit().await.map_err(map_db_err),
            Err(e) => {
                let _ = txn.rollback().await;
                Err(e)
            }
        }
    }
}
