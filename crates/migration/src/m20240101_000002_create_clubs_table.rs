use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Clubs::Table)
                    .col(
                        ColumnDef::new(Clubs::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Clubs::ClubName).string().not_null())
                    .col(ColumnDef::new(Clubs::UniversityName).string().not_null())
                    .col(ColumnDef::new(Clubs::UniversityCountry).string().not_null())
                    .col(ColumnDef::new(Clubs::UniversityCity).string())
                    .col(ColumnDef::new(Clubs::Category).string().not_null())
                    .col(ColumnDef::new(Clubs::Description).text())
                    .col(ColumnDef::new(Clubs::Image).string())
                    .col(
                        ColumnDef::new(Clubs::ApplicationFees)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(ColumnDef::new(Clubs::PostedDate).timestamp().not_null())
                    .col(ColumnDef::new(Clubs::PostedUserEmail).string().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("clubs_category_idx")
                    .table(Clubs::Table)
                    .col(Clubs::Category)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("clubs_posted_user_email_idx")
                    .table(Clubs::Table)
                    .col(Clubs::PostedUserEmail)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Clubs::Table).to_owned())
            .await
    }
}

/// Learn more at https://docs.rs/sea-query#iden
#[derive(Iden)]
pub(crate) enum Clubs {
    Table,
    Id,
    ClubName,
    UniversityName,
    UniversityCountry,
    UniversityCity,
    Category,
    Description,
    Image,
    ApplicationFees,
    PostedDate,
    PostedUserEmail,
}
