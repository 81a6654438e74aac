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
                    .table(Doctors::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Doctors::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Doctors::Name).string().not_null())
                    .col(ColumnDef::new(Doctors::Crm).string().not_null().unique_key())
                    .col(ColumnDef::new(Doctors::Specialty).string().not_null())
                    .col(ColumnDef::new(Doctors::Phone).string().null())
                    .col(
                        ColumnDef::new(Doctors::AccountId)
                            .uuid()
                            .not_null()
                            .unique_key(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_doctors_account_id")
                            .from(Doctors::Table, Doctors::AccountId)
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
                    .name("idx_doctors_name")
                    .table(Doctors::Table)
                    .col(Doctors::Name)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Doctors::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Doctors {
    Table,
    Id,
    Name,
    Crm,
    Specialty,
    Phone,
    AccountId,
}
