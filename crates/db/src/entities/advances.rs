//! `SeaORM` Entity for the advances table.
//!
//! At least one of `folio_no` / `reservation_no` is always present; which
//! ones are set determines the payment scenario (pre-checkin, post-checkin,
//! walk-in).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "advances")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub folio_no: Option<String>,
    pub reservation_no: Option<String>,
    pub guest_name: String,
    pub payment_mode: String,
    pub amount: Decimal,
    pub payment_date: Date,
    pub reference_no: Option<String>,
    pub room_no: Option<String>,
    pub remarks: Option<String>,
    pub user_id: Option<i64>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
