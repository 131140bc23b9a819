//! `SeaORM` Entity for the reservations table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::ReservationStatus;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "reservations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub reservation_no: String,
    pub guest_name: String,
    pub contact_no: Option<String>,
    pub email: Option<String>,
    pub from_date: Date,
    pub to_date: Date,
    pub no_of_rooms: i32,
    pub total_pax: Option<i32>,
    pub rate: Option<Decimal>,
    pub tax: Option<Decimal>,
    pub is_tax_inclusive: bool,
    pub total_amount: Option<Decimal>,
    pub selected_room: Option<String>,
    pub status: ReservationStatus,
    pub is_checkin_done: bool,
    pub remarks: Option<String>,
    pub user_id: Option<i64>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
