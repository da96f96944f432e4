//! Membership application.
//!
//! An application keeps a snapshot of the club it was submitted to, so
//! listing edits do not rewrite application history.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Membership application model.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "applications")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub club_id: i64,
    pub club_name: String,
    pub university_name: String,
    pub fees: f64,

    /// Email of the moderator that published the related club.
    pub moderator_email: String,

    /// Applicant email.
    pub applicant: String,
    pub user_name: String,
    pub applied_date: TimeDateTime,
    pub status: Status,
    pub payment: PaymentStatus,
    pub feedback: Option<String>,
}

/// Application review status.
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "i16", db_type = "Integer")]
#[serde(rename_all = "snake_case")]
pub enum Status {
    #[sea_orm(num_value = 0)]
    Pending,
    #[sea_orm(num_value = 1)]
    Processing,
    #[sea_orm(num_value = 2)]
    Completed,
    #[sea_orm(num_value = 3)]
    Rejected,
}

impl Status {
    /// Parse a status value received from a client.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(Status::Pending),
            "processing" => Some(Status::Processing),
            "completed" => Some(Status::Completed),
            "rejected" => Some(Status::Rejected),
            _ => None,
        }
    }
}

/// Application fee payment status.
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "i16", db_type = "Integer")]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    #[sea_orm(num_value = 0)]
    Unpaid,
    #[sea_orm(num_value = 1)]
    Paid,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::club::Entity",
        from = "Column::ClubId",
        to = "super::club::Column::Id"
    )]
    Club,
}

impl Related<super::club::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Club.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
