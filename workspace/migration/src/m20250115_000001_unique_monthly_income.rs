use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

const INDEX_NAME: &str = "uq_monthly_income_user_period";

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Income upserts resolve conflicts on this index
        manager
            .create_index(
                Index::create()
                    .name(INDEX_NAME)
                    .table(MonthlyIncome::Table)
                    .col(MonthlyIncome::UserId)
                    .col(MonthlyIncome::Year)
                    .col(MonthlyIncome::Month)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(INDEX_NAME)
                    .table(MonthlyIncome::Table)
                    .to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
enum MonthlyIncome {
    Table,
    UserId,
    Year,
    Month,
}
