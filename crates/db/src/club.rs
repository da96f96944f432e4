//! Club (or scholarship) listing.
//!
//! Listings are published by moderators and browsed through the listing
//! search, see [`crate::listing`] for the query semantics.

use sea_orm::entity::prelude::*;

/// Club listing model.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "clubs")]
pub struct Model {
    /// Unique club identifier.
    #[sea_orm(primary_key)]
    pub id: i64,

    /// Club display name.
    pub club_name: String,

    /// Owning university name.
    pub university_name: String,

    /// Owning university country.
    pub university_country: String,

    /// Owning university city.
    pub university_city: Option<String>,

    /// Club category, matched exactly by the listing search.
    pub category: String,

    /// Free-form description.
    pub description: Option<String>,

    /// Cover image URL.
    pub image: Option<String>,

    /// Application fee.
    pub application_fees: f64,

    /// Publication timestamp.
    pub posted_date: TimeDateTime,

    /// Email of the user that published this club.
    pub posted_user_email: String,
}

/// Club model relations.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::application::Entity")]
    Applications,

    #[sea_orm(has_many = "super::review::Entity")]
    Reviews,
}

impl Related<super::application::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Applications.def()
    }
}

impl Related<super::review::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reviews.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
