use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Catalogue of movement kinds (purchase ingress, sale egress, transfer, ...).
///
/// `factor` is +1 for ingress and -1 for egress and is the sole determinant
/// of a voucher line's sign.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "movement_types")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub code: String,
    pub description: String,
    pub factor: i16,
    pub is_active: bool,
}

impl Model {
    pub fn is_ingress(&self) -> bool {
        self.factor > 0
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::voucher::Entity")]
    Vouchers,
}

impl Related<super::voucher::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Vouchers.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
