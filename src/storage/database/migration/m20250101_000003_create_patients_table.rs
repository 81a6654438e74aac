use sea_orm_migration::prelude::*;

use super::m20250101_000001_create_accounts_table::Accounts;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Patients::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Patients::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Patients::Name).string().not_null())
                    .col(ColumnDef::new(Patients::Cpf).string().not_null().unique_key())
                    .col(ColumnDef::new(Patients::BirthDate).date().not_null())
                    .col(ColumnDef::new(Patients::Phone).string().null())
                    .col(ColumnDef::new(Patients::Address).string().null())
                    .col(ColumnDef::new(Patients::SusCard).string().null())
                    .col(
                        ColumnDef::new(Patients::AccountId)
                            .uuid()
                            .not_null()
                            .unique_key(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_patients_account_id")
                            .from(Patients::Table, Patients::AccountId)
                            .to(Accounts::Table, Accounts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_patients_name")
                    .table(Patients::Table)
                    .col(Patients::Name)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Patients::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Patients {
    Table,
    Id,
    Name,
    Cpf,
    BirthDate,
    Phone,
    Address,
    SusCard,
    AccountId,
}
