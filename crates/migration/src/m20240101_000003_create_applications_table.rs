use db::application::{PaymentStatus, Status};
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Applications::Table)
                    .col(
                        ColumnDef::new(Applications::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Applications::ClubId).big_integer().not_null())
                    .col(ColumnDef::new(Applications::ClubName).string().not_null())
                    .col(
                        ColumnDef::new(Applications::UniversityName)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Applications::Fees).double().not_null())
                    .col(
                        ColumnDef::new(Applications::ModeratorEmail)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Applications::Applicant).string().not_null())
                    .col(ColumnDef::new(Applications::UserName).string().not_null())
                    .col(
                        ColumnDef::new(Applications::AppliedDate)
                            .timestamp()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Applications::Status)
                            .small_integer()
                            .not_null()
                            .default(Status::Pending),
                    )
                    .col(
                        ColumnDef::new(Applications::Payment)
                            .small_integer()
                            .not_null()
                            .default(PaymentStatus::Unpaid),
                    )
                    .col(ColumnDef::new(Applications::Feedback).text())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("applications_applicant_idx")
                    .table(Applications::Table)
                    .col(Applications::Applicant)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Applications::Table).to_owned())
            .await
    }
}

/// Learn more at https://docs.rs/sea-query#iden
#[derive(Iden)]
enum Applications {
    Table,
    Id,
    ClubId,
    ClubName,
    UniversityName,
    Fees,
    ModeratorEmail,
    Applicant,
    UserName,
    AppliedDate,
    Status,
    Payment,
    Feedback,
}
