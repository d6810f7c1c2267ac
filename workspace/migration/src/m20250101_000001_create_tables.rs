use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Categories::Table)
                    .if_not_exists()
                    .col(pk_auto(Categories::Id))
                    .col(integer(Categories::UserId))
                    .col(string(Categories::Name))
                    .col(string_null(Categories::Icon))
                    .col(string_null(Categories::Color))
                    .col(timestamp_with_time_zone(Categories::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(MonthlyIncome::Table)
                    .if_not_exists()
                    .col(pk_auto(MonthlyIncome::Id))
                    .col(integer(MonthlyIncome::UserId))
                    .col(integer(MonthlyIncome::Year))
                    .col(integer(MonthlyIncome::Month))
                    .col(decimal(MonthlyIncome::Amount).decimal_len(16, 4))
                    .col(string_null(MonthlyIncome::Description))
                    .col(timestamp_with_time_zone(MonthlyIncome::CreatedAt))
                    .col(timestamp_with_time_zone(MonthlyIncome::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        // category_id carries no foreign key
        manager
            .create_table(
                Table::create()
                    .table(Expenses::Table)
                    .if_not_exists()
                    .col(pk_auto(Expenses::Id))
                    .col(integer(Expenses::UserId))
                    .col(integer(Expenses::CategoryId))
                    .col(integer(Expenses::Year))
                    .col(integer(Expenses::Month))
                    .col(string_null(Expenses::GroupId))
                    .col(boolean(Expenses::Paid).default(false))
                    .col(string_len(Expenses::Type, 16))
                    .col(string(Expenses::Description))
                    .col(decimal(Expenses::Amount).decimal_len(16, 4))
                    .col(timestamp_with_time_zone(Expenses::CreatedAt))
                    .col(timestamp_with_time_zone(Expenses::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_expenses_user_period")
                    .table(Expenses::Table)
                    .col(Expenses::UserId)
                    .col(Expenses::Year)
                    .col(Expenses::Month)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_expenses_user_group")
                    .table(Expenses::Table)
                    .col(Expenses::UserId)
                    .col(Expenses::GroupId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Reports::Table)
                    .if_not_exists()
                    .col(pk_auto(Reports::Id))
                    .col(integer(Reports::UserId))
                    .col(integer(Reports::Year))
                    .col(integer(Reports::Month))
                    .col(string(Reports::FileUrl))
                    .col(string(Reports::FileKey))
                    .col(timestamp_with_time_zone(Reports::CreatedAt))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Reports::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Expenses::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(MonthlyIncome::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Categories::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Categories {
    Table,
    Id,
    UserId,
    Name,
    Icon,
    Color,
    CreatedAt,
}

#[derive(DeriveIden)]
enum MonthlyIncome {
    Table,
    Id,
    UserId,
    Year,
    Month,
    Amount,
    Description,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Expenses {
    Table,
    Id,
    UserId,
    CategoryId,
    Year,
    Month,
    GroupId,
    Paid,
    Type,
    Description,
    Amount,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Reports {
    Table,
    Id,
    UserId,
    Year,
    Month,
    FileUrl,
    FileKey,
    CreatedAt,
}
