use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Physical storage location stock is tracked against.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "warehouses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub code: String,
    pub name: String,
    pub kind: WarehouseKind,
    pub is_active: bool,
}

/// Closed set of warehouse categories, stored as a one-letter discriminant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(1))")]
pub enum WarehouseKind {
    #[sea_orm(string_value = "G")]
    General,
    #[sea_orm(string_value = "M")]
    Materials,
    #[sea_orm(string_value = "P")]
    RawMaterial,
    #[sea_orm(string_value = "T")]
    Finished,
    #[sea_orm(string_value = "O")]
    Other,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::voucher::Entity")]
    Vouchers,
    #[sea_orm(has_many = "super::stock_balance::Entity")]
    StockBalances,
}

impl Related<super::voucher::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Vouchers.def()
    }
}

impl Related<super::stock_balance::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StockBalances.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
