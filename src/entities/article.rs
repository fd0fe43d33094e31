use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Inventory item master record. Unit and category CRUD live outside the
/// core, so both are carried as plain reference columns here.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "articles")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub code: String,
    pub name: String,
    pub unit_code: String,
    pub category_id: i32,
    #[sea_orm(column_type = "Decimal(Some((12, 4)))")]
    pub unit_price: Decimal,
    pub is_active: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::voucher_line::Entity")]
    VoucherLines,
    #[sea_orm(has_many = "super::stock_balance::Entity")]
    StockBalances,
}

impl Related<super::voucher_line::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::VoucherLines.def()
    }
}

impl Related<super::stock_balance::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StockBalances.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
