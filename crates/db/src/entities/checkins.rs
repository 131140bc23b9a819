//! `SeaORM` Entity for the checkins table.
//!
//! A checkin row is the folio: every advance, charge, and bill references
//! its `folio_no`.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::CheckinStatus;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "checkins")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub folio_no: String,
    pub guest_name: String,
    pub contact_no: Option<String>,
    pub email: Option<String>,
    pub check_in_date: Date,
    pub check_out_date: Option<Date>,
    pub room_no: String,
    pub rate: Option<Decimal>,
    pub no_of_persons: Option<i32>,
    pub reservation_no: Option<String>,
    pub status: CheckinStatus,
    pub audit_date: Date,
    pub remarks: Option<String>,
    pub user_id: Option<i64>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
