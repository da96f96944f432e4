//! Club review left by a member.

use sea_orm::entity::prelude::*;

/// Review model.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "reviews")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub club_id: i64,
    pub club_name: String,
    pub university_name: String,
    pub user_name: String,
    pub user_email: String,
    pub user_image: Option<String>,

    /// Email of the moderator that published the reviewed club.
    pub posted_by_email: String,

    /// Rating in range from 1 to 5.
    pub rating_point: i16,
    pub review_comment: String,
    pub review_date: TimeDateTime,
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
