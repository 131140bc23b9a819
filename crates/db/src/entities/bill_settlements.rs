//! `SeaORM` Entity for the bill_settlements table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "bill_settlements")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub bill_id: i64,
    pub folio_no: String,
    pub payment_mode: String,
    pub amount: Decimal,
    pub payment_date: Date,
    pub reference_no: Option<String>,
    pub remarks: Option<String>,
    pub user_id: Option<i64>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::fo_bills::Entity",
        from = "Column::BillId",
        to = "super::fo_bills::Column::Id"
    )]
    FoBills,
}

impl Related<super::fo_bills::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FoBills.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
