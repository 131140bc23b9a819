//! `SeaORM` Entity for the post_transactions table (posted charges).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::ChargeStatus;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "post_transactions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub folio_no: String,
    pub reservation_no: Option<String>,
    pub room_no: Option<String>,
    pub guest_name: Option<String>,
    pub trans_date: Date,
    /// Account head the charge is posted under (ROOM_RENT, RESTAURANT, ...).
    pub acc_head: String,
    pub voucher_no: Option<String>,
    pub amount: Decimal,
    pub narration: Option<String>,
    pub status: ChargeStatus,
    pub user_id: Option<i64>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
