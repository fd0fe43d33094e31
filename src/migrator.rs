use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240601_000001_create_warehouses_table::Migration),
            Box::new(m20240601_000002_create_articles_table::Migration),
            Box::new(m20240601_000003_create_movement_types_table::Migration),
            Box::new(m20240601_000004_create_users_table::Migration),
            Box::new(m20240601_000005_create_business_partners_table::Migration),
            Box::new(m20240601_000006_create_document_types_table::Migration),
            Box::new(m20240601_000007_create_vouchers_table::Migration),
            Box::new(m20240601_000008_create_voucher_lines_table::Migration),
            Box::new(m20240601_000009_create_stock_balances_table::Migration),
            Box::new(m20240601_000010_create_kardex_entries_table::Migration),
            Box::new(m20240601_000011_seed_movement_types::Migration),
        ]
    }
}

// Migration implementations

mod m20240601_000001_create_warehouses_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240601_000001_create_warehouses_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Warehouses::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Warehouses::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Warehouses::Code).string_len(6).not_null())
                        .col(ColumnDef::new(Warehouses::Name).string_len(50).not_null())
                        .col(ColumnDef::new(Warehouses::Kind).string_len(1).not_null())
                        .col(
                            ColumnDef::new(Warehouses::IsActive)
                                .boolean()
                                .not_null()
                                .default(true),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .unique()
                        .name("idx_warehouses_code")
                        .table(Warehouses::Table)
                        .col(Warehouses::Code)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Warehouses::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum Warehouses {
        Table,
        Id,
        Code,
        Name,
        Kind,
        IsActive,
    }
}

mod m20240601_000002_create_articles_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240601_000002_create_articles_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Articles::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Articles::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Articles::Code).string_len(12).not_null())
                        .col(ColumnDef::new(Articles::Name).string_len(200).not_null())
                        .col(ColumnDef::new(Articles::UnitCode).string_len(4).not_null())
                        .col(ColumnDef::new(Articles::CategoryId).integer().not_null())
                        .col(
                            ColumnDef::new(Articles::UnitPrice)
                                .decimal_len(12, 4)
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(Articles::IsActive)
                                .boolean()
                                .not_null()
                                .default(true),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .unique()
                        .name("idx_articles_code")
                        .table(Articles::Table)
                        .col(Articles::Code)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_articles_category_id")
                        .table(Articles::Table)
                        .col(Articles::CategoryId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Articles::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum Articles {
        Table,
        Id,
        Code,
        Name,
        UnitCode,
        CategoryId,
        UnitPrice,
        IsActive,
    }
}

mod m20240601_000003_create_movement_types_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240601_000003_create_movement_types_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(MovementTypes::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(MovementTypes::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(MovementTypes::Code).string_len(3).not_null())
                        .col(
                            ColumnDef::new(MovementTypes::Description)
                                .string_len(90)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(MovementTypes::Factor)
                                .small_integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(MovementTypes::IsActive)
                                .boolean()
                                .not_null()
                                .default(true),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .unique()
                        .name("idx_movement_types_code")
                        .table(MovementTypes::Table)
                        .col(MovementTypes::Code)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(MovementTypes::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum MovementTypes {
        Table,
        Id,
        Code,
        Description,
        Factor,
        IsActive,
    }
}

mod m20240601_000004_create_users_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240601_000004_create_users_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Users::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Users::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Users::Username).string_len(30).not_null())
                        .col(ColumnDef::new(Users::FullName).string_len(120).not_null())
                        .col(
                            ColumnDef::new(Users::IsActive)
                                .boolean()
                                .not_null()
                                .default(true),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .unique()
                        .name("idx_users_username")
                        .table(Users::Table)
                        .col(Users::Username)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Users::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum Users {
        Table,
        Id,
        Username,
        FullName,
        IsActive,
    }
}

mod m20240601_000005_create_business_partners_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240601_000005_create_business_partners_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(BusinessPartners::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(BusinessPartners::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(BusinessPartners::Name)
                                .string_len(120)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(BusinessPartners::TaxId)
                                .string_len(20)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(BusinessPartners::IsSupplier)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(
                            ColumnDef::new(BusinessPartners::IsCustomer)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(
                            ColumnDef::new(BusinessPartners::IsActive)
                                .boolean()
                                .not_null()
                                .default(true),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .unique()
                        .name("idx_business_partners_name")
                        .table(BusinessPartners::Table)
                        .col(BusinessPartners::Name)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(BusinessPartners::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum BusinessPartners {
        Table,
        Id,
        Name,
        TaxId,
        IsSupplier,
        IsCustomer,
        IsActive,
    }
}

mod m20240601_000006_create_document_types_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240601_000006_create_document_types_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(DocumentTypes::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(DocumentTypes::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(DocumentTypes::Code)
                                .string_len(6)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(DocumentTypes::Name)
                                .string_len(30)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(DocumentTypes::IsActive)
                                .boolean()
                                .not_null()
                                .default(true),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .unique()
                        .name("idx_document_types_code")
                        .table(DocumentTypes::Table)
                        .col(DocumentTypes::Code)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(DocumentTypes::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum DocumentTypes {
        Table,
        Id,
        Code,
        Name,
        IsActive,
    }
}

mod m20240601_000007_create_vouchers_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240601_000007_create_vouchers_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Vouchers::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Vouchers::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Vouchers::Code).string_len(12).not_null())
                        .col(ColumnDef::new(Vouchers::WarehouseId).integer().not_null())
                        .col(
                            ColumnDef::new(Vouchers::MovementTypeId)
                                .integer()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Vouchers::UserId).integer().not_null())
                        .col(ColumnDef::new(Vouchers::PartnerId).integer().null())
                        .col(ColumnDef::new(Vouchers::DocumentTypeId).integer().null())
                        .col(
                            ColumnDef::new(Vouchers::DocumentSeries)
                                .string_len(4)
                                .null(),
                        )
                        .col(
                            ColumnDef::new(Vouchers::DocumentNumber)
                                .string_len(20)
                                .null(),
                        )
                        .col(
                            ColumnDef::new(Vouchers::VoucherDate)
                                .timestamp()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Vouchers::RegisteredAt)
                                .timestamp()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Vouchers::IsActive)
                                .boolean()
                                .not_null()
                                .default(true),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .unique()
                        .name("idx_vouchers_code")
                        .table(Vouchers::Table)
                        .col(Vouchers::Code)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_vouchers_warehouse_id")
                        .table(Vouchers::Table)
                        .col(Vouchers::WarehouseId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_vouchers_movement_type_id")
                        .table(Vouchers::Table)
                        .col(Vouchers::MovementTypeId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_vouchers_voucher_date")
                        .table(Vouchers::Table)
                        .col(Vouchers::VoucherDate)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Vouchers::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum Vouchers {
        Table,
        Id,
        Code,
        WarehouseId,
        MovementTypeId,
        UserId,
        PartnerId,
        DocumentTypeId,
        DocumentSeries,
        DocumentNumber,
        VoucherDate,
        RegisteredAt,
        IsActive,
    }
}

mod m20240601_000008_create_voucher_lines_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240601_000008_create_voucher_lines_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(VoucherLines::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(VoucherLines::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(VoucherLines::VoucherId)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(VoucherLines::ItemNumber)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(VoucherLines::ArticleId)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(VoucherLines::Quantity)
                                .decimal_len(12, 4)
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(VoucherLines::UnitCost)
                                .decimal_len(12, 4)
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(VoucherLines::IsActive)
                                .boolean()
                                .not_null()
                                .default(true),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_voucher_lines_voucher_id")
                        .table(VoucherLines::Table)
                        .col(VoucherLines::VoucherId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_voucher_lines_article_id")
                        .table(VoucherLines::Table)
                        .col(VoucherLines::ArticleId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(VoucherLines::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum VoucherLines {
        Table,
        Id,
        VoucherId,
        ItemNumber,
        ArticleId,
        Quantity,
        UnitCost,
        IsActive,
    }
}

mod m20240601_000009_create_stock_balances_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240601_000009_create_stock_balances_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            // Composite key: one row per (warehouse, article) pair, locked
            // row-level during line application.
            manager
                .create_table(
                    Table::create()
                        .table(StockBalances::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(StockBalances::WarehouseId)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(StockBalances::ArticleId)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(StockBalances::Quantity)
                                .decimal_len(12, 4)
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(StockBalances::AverageCost)
                                .decimal_len(16, 4)
                                .not_null()
                                .default(0),
                        )
                        .primary_key(
                            Index::create()
                                .name("pk_stock_balances")
                                .col(StockBalances::WarehouseId)
                                .col(StockBalances::ArticleId),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(StockBalances::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum StockBalances {
        Table,
        WarehouseId,
        ArticleId,
        Quantity,
        AverageCost,
    }
}

mod m20240601_000010_create_kardex_entries_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240601_000010_create_kardex_entries_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(KardexEntries::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(KardexEntries::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(KardexEntries::WarehouseId)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(KardexEntries::ArticleId)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(KardexEntries::VoucherLineId)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(KardexEntries::RecordedAt)
                                .timestamp()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(KardexEntries::Quantity)
                                .decimal_len(12, 4)
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(KardexEntries::UnitCost)
                                .decimal_len(16, 4)
                                .not_null()
                                .default(0),
                        )
                        .to_owned(),
                )
                .await?;

            // Range-read index for the kardex reporting path.
            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_kardex_entries_pair_recorded_at")
                        .table(KardexEntries::Table)
                        .col(KardexEntries::WarehouseId)
                        .col(KardexEntries::ArticleId)
                        .col(KardexEntries::RecordedAt)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_kardex_entries_voucher_line_id")
                        .table(KardexEntries::Table)
                        .col(KardexEntries::VoucherLineId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(KardexEntries::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum KardexEntries {
        Table,
        Id,
        WarehouseId,
        ArticleId,
        VoucherLineId,
        RecordedAt,
        Quantity,
        UnitCost,
    }
}

mod m20240601_000011_seed_movement_types {

    use sea_orm_migration::prelude::*;

    use super::m20240601_000003_create_movement_types_table::MovementTypes;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240601_000011_seed_movement_types"
        }
    }

    /// Canonical movement-type catalogue. Ingress codes start with I,
    /// egress codes with S; the factor column is what the ledger reads.
    const CATALOGUE: &[(&str, &str, i16)] = &[
        ("I00", "OPENING INVENTORY", 1),
        ("I01", "INGRESS BY PURCHASE", 1),
        ("I03", "INGRESS BY TRANSFER", 1),
        ("I04", "INGRESS BY SUPPLIER RETURN", 1),
        ("I05", "INGRESS BY CONSIGNMENT", 1),
        ("I08", "INGRESS BY INVENTORY ADJUSTMENT", 1),
        ("I09", "INGRESS BY PRODUCTION", 1),
        ("I14", "INGRESS BY WAREHOUSE RETURN", 1),
        ("I30", "INGRESS BY DONATION", 1),
        ("I39", "INGRESS BY SALES RETURN", 1),
        ("S01", "EGRESS BY INTERNAL CONSUMPTION", -1),
        ("S02", "EGRESS BY PRODUCT SALE", -1),
        ("S03", "EGRESS BY TRANSFER", -1),
        ("S04", "EGRESS BY SUPPLIER RETURN", -1),
        ("S08", "EGRESS BY INVENTORY ADJUSTMENT", -1),
        ("S14", "EGRESS BY INVENTORY WRITE-OFF", -1),
        ("S16", "EGRESS BY MATERIAL SALE", -1),
        ("S20", "EGRESS BY GIFT", -1),
        ("S21", "EGRESS BY DONATION", -1),
        ("S35", "EGRESS BY THEFT", -1),
        ("S40", "EGRESS BY SAMPLE CONSUMPTION", -1),
    ];

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            let mut insert = Query::insert()
                .into_table(MovementTypes::Table)
                .columns([
                    MovementTypes::Code,
                    MovementTypes::Description,
                    MovementTypes::Factor,
                    MovementTypes::IsActive,
                ])
                .to_owned();

            for (code, description, factor) in CATALOGUE {
                insert.values_panic([
                    (*code).into(),
                    (*description).into(),
                    (*factor).into(),
                    true.into(),
                ]);
            }

            manager.exec_stmt(insert).await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .exec_stmt(Query::delete().from_table(MovementTypes::Table).to_owned())
                .await
        }
    }
}
