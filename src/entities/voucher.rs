use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Voucher header: one inventory movement event against a single warehouse
/// under a single movement type. Owns a collection of lines; inactivation
/// cascades to them.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "vouchers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub code: String,
    pub warehouse_id: i32,
    pub movement_type_id: i32,
    pub user_id: i32,
    pub partner_id: Option<i32>,
    pub document_type_id: Option<i32>,
    pub document_series: Option<String>,
    pub document_number: Option<String>,
    pub voucher_date: DateTime<Utc>,
    pub registered_at: DateTime<Utc>,
    pub is_active: bool,
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
        belongs_to = "super::movement_type::Entity",
        from = "Column::MovementTypeId",
        to = "super::movement_type::Column::Id"
    )]
    MovementType,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::business_partner::Entity",
        from = "Column::PartnerId",
        to = "super::business_partner::Column::Id"
    )]
    Partner,
    #[sea_orm(
        belongs_to = "super::document_type::Entity",
        from = "Column::DocumentTypeId",
        to = "super::document_type::Column::Id"
    )]
    DocumentType,
    #[sea_orm(has_many = "super::voucher_line::Entity")]
    Lines,
}

impl Related<super::warehouse::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Warehouse.def()
    }
}

impl Related<super::movement_type::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MovementType.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::business_partner::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Partner.def()
    }
}

impl Related<super::document_type::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DocumentType.def()
    }
}

impl Related<super::voucher_line::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Lines.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
