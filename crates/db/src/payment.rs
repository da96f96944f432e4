//! Completed payment transaction.
//!
//! Payments are recorded after the payment provider confirmed a transaction
//! on the client side. The transaction identifier is unique, so replaying
//! the same confirmation does not count a fee twice.

use sea_orm::entity::prelude::*;

/// Payment transaction model.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "payments")]
pub struct Model {
    /// Unique payment identifier.
    #[sea_orm(primary_key)]
    pub id: i64,

    /// Payment provider transaction identifier.
    #[sea_orm(unique)]
    pub transaction_id: String,

    /// Email of the paying user.
    pub email: String,

    /// Paid amount, in major currency units.
    pub amount: f64,

    /// Related club identifier.
    pub club_id: Option<i64>,

    /// Related application identifier.
    pub application_id: Option<i64>,

    /// Payment record creation timestamp.
    pub created_at: TimeDateTime,
}

/// Payment model relations.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
