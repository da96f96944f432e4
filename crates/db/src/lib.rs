//! Persistence layer of the club membership platform.
//!
//! Each module describes a single `sea-orm` entity, with the exception of
//! [`listing`], which implements the club listing search.

pub mod application;
pub mod club;
pub mod listing;
pub mod payment;
pub mod review;
pub mod user;

use std::error::Error;

use async_trait::async_trait;
pub use sea_orm::{
    sea_query, ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait, Database,
    DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait, Order, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, QueryTrait, StatementBuilder, TransactionError,
    TransactionTrait, TryGetableMany,
};
pub use time::{OffsetDateTime, PrimitiveDateTime};

/// Current UTC time as a timestamp suitable for model columns.
pub fn current_timestamp() -> PrimitiveDateTime {
    let now = OffsetDateTime::now_utc();

    PrimitiveDateTime::new(now.date(), now.time())
}

pub trait TransactionErrorExt<T, E> {
    /// Convert transaction [`Result`] into a [`Result`] with
    /// a custom error.
    fn into_raw_result(self) -> Result<T, E>;
}

impl<T, E> TransactionErrorExt<T, E> for Result<T, TransactionError<E>>
where
    E: Error + From<DbErr>,
{
    fn into_raw_result(self) -> Result<T, E> {
        match self {
            Ok(val) => Ok(val),
            Err(TransactionError::Connection(err)) => Err(err.into()),
            Err(TransactionError::Transaction(err)) => Err(err),
        }
    }
}

#[async_trait]
pub trait SelectExt {
    /// Check if at least one record that satisfies a query.
    async fn exists<C: ConnectionTrait + Send>(self, db: &C) -> Result<bool, DbErr>;
}

#[async_trait]
impl<T> SelectExt for T
where
    T: QueryTrait<QueryStatement = sea_query::SelectStatement> + Send,
{
    async fn exists<C: ConnectionTrait + Send>(self, db: &C) -> Result<bool, DbErr> {
        use sea_query::{Expr, Query};

        let mut query = self.into_query();

        // SQLite rejects an EXISTS subquery without selected columns.
        query.expr(1);

        let stmt = StatementBuilder::build(
            Query::select().expr(Expr::exists(query)),
            &db.get_database_backend(),
        );

        db.query_one(stmt)
            .await?
            .ok_or_else(|| DbErr::Custom(String::from("EXISTS query returned no rows")))?
            .try_get_by_index(0)
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::{
        ActiveValue, ColumnTrait, ConnectionTrait, Database, DatabaseConnection, EntityTrait,
        QueryFilter, QuerySelect, Schema,
    };

    use crate::{current_timestamp, user, SelectExt};

    async fn users_table() -> DatabaseConnection {
        let db = Database::connect("sqlite::memory:")
            .await
            .expect("unable to create test database");

        let backend = db.get_database_backend();
        let table = Schema::new(backend).create_table_from_entity(user::Entity);

        db.execute(backend.build(&table))
            .await
            .expect("unable to create users table");

        db
    }

    fn by_email(email: &str) -> impl SelectExt {
        user::Entity::find()
            .select_only()
            .filter(user::Column::Email.eq(email))
    }

    #[tokio::test]
    async fn exists() {
        let db = users_table().await;

        assert!(!by_email("student@example.com").exists(&db).await.unwrap());

        user::Entity::insert(user::ActiveModel {
            name: ActiveValue::Set(String::from("Ada")),
            email: ActiveValue::Set(String::from("student@example.com")),
            role: ActiveValue::Set(user::Role::Student),
            created_at: ActiveValue::Set(current_timestamp()),
            ..Default::default()
        })
        .exec_without_returning(&db)
        .await
        .unwrap();

        assert!(by_email("student@example.com").exists(&db).await.unwrap());
        assert!(!by_email("other@example.com").exists(&db).await.unwrap());
    }
}
