use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Append-only audit row, one per applied voucher line. `quantity` carries
/// the movement sign; `unit_cost` is the cost the movement was booked at
/// (line cost on ingress, running average on egress). Rows are never
/// updated or deleted once written.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "kardex_entries")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub warehouse_id: i32,
    pub article_id: i32,
    pub voucher_line_id: i32,
    pub recorded_at: DateTime<Utc>,
    #[sea_orm(column_type = "Decimal(Some((12, 4)))")]
    pub quantity: Decimal,
    #[sea_orm(column_type = "Decimal(Some((16, 4)))")]
    pub unit_cost: Decimal,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::warehouse::Entity",
        from = "Column::WarehouseId",
        to = "super::warehouse::Column::Id"
    )]
    Warehouse,
    #[sea_orm(
        belongs_to = "super::article::Entity",
        from = "Column::ArticleId",
        to = "super::article::Column::Id"
    )]
    Article,
    #[sea_orm(
        belongs_to = "super::voucher_line::Entity",
        from = "Column::VoucherLineId",
        to = "super::voucher_line::Column::Id"
    )]
    VoucherLine,
}

impl Related<super::warehouse::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Warehouse.def()
    }
}

impl Related<super::article::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Article.def()
    }
}

impl Related<super::voucher_line::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::VoucherLine.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
