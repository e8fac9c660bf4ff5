//! Initial schema migration.
//!
//! Creates the complete schema for the shop bookkeeper:
//!
//! - `user_roles`: one role per caller identity
//! - `user_profiles`: one profile per caller identity
//! - `daily_records`: income and expense entries (distinguished by `kind`)
//! - `sales`: sales transactions with their write-time total
//! - `purchases`: purchase records with their write-time total
//! - `supplier_loans`: money lent to suppliers, repaid at most once
//! - `advance_payments`: advances paid to suppliers, settled at most once
//!
//! Every record table is scoped by `owner`; the auto-increment `id` gives the
//! insertion order that settlement indices refer to.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

// ─────────────────────────────────────────────────────────────────────────────
// Table identifiers
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Iden)]
enum UserRoles {
    Table,
    Identity,
    Role,
}

#[derive(Iden)]
enum UserProfiles {
    Table,
    Identity,
    Name,
}

#[derive(Iden)]
enum DailyRecords {
    Table,
    Id,
    Owner,
    Kind,
    RecordedAt,
    Category,
    Description,
    Amount,
}

#[derive(Iden)]
enum Sales {
    Table,
    Id,
    Owner,
    RecordedAt,
    ItemName,
    Quantity,
    UnitPrice,
    TotalAmount,
    CustomerName,
}

#[derive(Iden)]
enum Purchases {
    Table,
    Id,
    Owner,
    RecordedAt,
    ItemName,
    Quantity,
    UnitCost,
    TotalCost,
    SupplierName,
}

#[derive(Iden)]
enum SupplierLoans {
    Table,
    Id,
    Owner,
    RecordedAt,
    SupplierName,
    Amount,
    Purpose,
    Repaid,
}

#[derive(Iden)]
enum AdvancePayments {
    Table,
    Id,
    Owner,
    RecordedAt,
    SupplierName,
    Amount,
    Purpose,
    Settled,
}

// ─────────────────────────────────────────────────────────────────────────────
// Migration implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ───────────────────────────────────────────────────────────────────
        // 1. Roles and profiles
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(UserRoles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UserRoles::Identity)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(UserRoles::Role)
                            .string()
                            .not_null()
                            .default("user"),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(UserProfiles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UserProfiles::Identity)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(UserProfiles::Name).string().not_null())
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 2. Daily records (income + expense)
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(DailyRecords::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DailyRecords::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(DailyRecords::Owner).string().not_null())
                    .col(ColumnDef::new(DailyRecords::Kind).string().not_null())
                    .col(
                        ColumnDef::new(DailyRecords::RecordedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(DailyRecords::Category).string().not_null())
                    .col(ColumnDef::new(DailyRecords::Description).string().not_null())
                    .col(ColumnDef::new(DailyRecords::Amount).double().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-daily_records-owner_kind")
                    .table(DailyRecords::Table)
                    .col(DailyRecords::Owner)
                    .col(DailyRecords::Kind)
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 3. Sales
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Sales::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Sales::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Sales::Owner).string().not_null())
                    .col(
                        ColumnDef::new(Sales::RecordedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Sales::ItemName).string().not_null())
                    .col(ColumnDef::new(Sales::Quantity).big_integer().not_null())
                    .col(ColumnDef::new(Sales::UnitPrice).double().not_null())
                    .col(ColumnDef::new(Sales::TotalAmount).double().not_null())
                    .col(ColumnDef::new(Sales::CustomerName).string())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-sales-owner")
                    .table(Sales::Table)
                    .col(Sales::Owner)
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 4. Purchases
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Purchases::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Purchases::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Purchases::Owner).string().not_null())
                    .col(
                        ColumnDef::new(Purchases::RecordedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Purchases::ItemName).string().not_null())
                    .col(ColumnDef::new(Purchases::Quantity).big_integer().not_null())
                    .col(ColumnDef::new(Purchases::UnitCost).double().not_null())
                    .col(ColumnDef::new(Purchases::TotalCost).double().not_null())
                    .col(ColumnDef::new(Purchases::SupplierName).string())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-purchases-owner")
                    .table(Purchases::Table)
                    .col(Purchases::Owner)
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 5. Supplier loans
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(SupplierLoans::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SupplierLoans::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(SupplierLoans::Owner).string().not_null())
                    .col(
                        ColumnDef::new(SupplierLoans::RecordedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SupplierLoans::SupplierName)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(SupplierLoans::Amount).double().not_null())
                    .col(ColumnDef::new(SupplierLoans::Purpose).string().not_null())
                    .col(
                        ColumnDef::new(SupplierLoans::Repaid)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-supplier_loans-owner")
                    .table(SupplierLoans::Table)
                    .col(SupplierLoans::Owner)
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 6. Advance payments
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(AdvancePayments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AdvancePayments::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(AdvancePayments::Owner).string().not_null())
                    .col(
                        ColumnDef::new(AdvancePayments::RecordedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AdvancePayments::SupplierName)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(AdvancePayments::Amount).double().not_null())
                    .col(ColumnDef::new(AdvancePayments::Purpose).string().not_null())
                    .col(
                        ColumnDef::new(AdvancePayments::Settled)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-advance_payments-owner")
                    .table(AdvancePayments::Table)
                    .col(AdvancePayments::Owner)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AdvancePayments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(SupplierLoans::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Purchases::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Sales::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(DailyRecords::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(UserProfiles::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(UserRoles::Table).to_owned())
            .await?;
        Ok(())
    }
}
