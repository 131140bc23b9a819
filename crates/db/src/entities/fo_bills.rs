//! `SeaORM` Entity for the fo_bills table (front-office bills).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "fo_bills")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub bill_no: String,
    pub folio_no: String,
    pub guest_name: Option<String>,
    pub room_no: Option<String>,
    pub bill_date: Date,
    pub gross_amount: Decimal,
    pub tax_amount: Decimal,
    pub net_amount: Decimal,
    pub advance_adjusted: Decimal,
    pub balance_due: Decimal,
    pub is_settled: bool,
    pub remarks: Option<String>,
    pub user_id: Option<i64>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::bill_settlements::Entity")]
    BillSettlements,
}

impl Related<super::bill_settlements::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BillSettlements.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
