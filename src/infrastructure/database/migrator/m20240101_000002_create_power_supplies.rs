//! Migration to create power_supplies table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PowerSupplies::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PowerSupplies::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(PowerSupplies::Name).string_len(100).not_null())
                    .col(ColumnDef::new(PowerSupplies::Brand).string_len(50).not_null().default(""))
                    .col(ColumnDef::new(PowerSupplies::Model).string_len(50).not_null().default(""))
                    .col(ColumnDef::new(PowerSupplies::Power).integer().not_null().default(0))
                    .col(
                        ColumnDef::new(PowerSupplies::Efficiency)
                            .string_len(20)
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(PowerSupplies::Modular)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(PowerSupplies::Price).decimal_len(10, 2).not_null())
                    .col(ColumnDef::new(PowerSupplies::Stock).integer().not_null().default(0))
                    .col(ColumnDef::new(PowerSupplies::Description).text().not_null())
                    .col(ColumnDef::new(PowerSupplies::Status).integer().not_null().default(1))
                    .col(
                        ColumnDef::new(PowerSupplies::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PowerSupplies::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_power_supplies_brand")
                    .table(PowerSupplies::Table)
                    .col(PowerSupplies::Brand)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_power_supplies_power")
                    .table(PowerSupplies::Table)
                    .col(PowerSupplies::Power)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PowerSupplies::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum PowerSupplies {
    Table,
    Id,
    Name,
    Brand,
    Model,
    Power,
    Efficiency,
    Modular,
    Price,
    Stock,
    Description,
    Status,
    CreatedAt,
    UpdatedAt,
}
