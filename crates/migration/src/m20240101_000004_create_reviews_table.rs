use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Reviews::Table)
                    .col(
                        ColumnDef::new(Reviews::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Reviews::ClubId).big_integer().not_null())
                    .col(ColumnDef::new(Reviews::ClubName).string().not_null())
                    .col(ColumnDef::new(Reviews::UniversityName).string().not_null())
                    .col(ColumnDef::new(Reviews::UserName).string().not_null())
                    .col(ColumnDef::new(Reviews::UserEmail).string().not_null())
                    .col(ColumnDef::new(Reviews::UserImage).string())
                    .col(ColumnDef::new(Reviews::PostedByEmail).string().not_null())
                    .col(ColumnDef::new(Reviews::RatingPoint).small_integer().not_null())
                    .col(ColumnDef::new(Reviews::ReviewComment).text().not_null())
                    .col(ColumnDef::new(Reviews::ReviewDate).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Reviews::Table, Reviews::ClubId)
                            .to(crate::Clubs::Table, crate::Clubs::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Reviews::Table).to_owned())
            .await
    }
}

/// Learn more at https://docs.rs/sea-query#iden
#[derive(Iden)]
enum Reviews {
    Table,
    Id,
    ClubId,
    ClubName,
    UniversityName,
    UserName,
    UserEmail,
    UserImage,
    PostedByEmail,
    RatingPoint,
    ReviewComment,
    ReviewDate,
}
