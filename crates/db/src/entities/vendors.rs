//! `SeaORM` Entity for the vendors table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::VendorStatus;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "vendors")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub service_type: String,
    pub contact_person: Option<String>,
    pub contact_no: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    /// 1 to 5, unset until first rated.
    pub rating: Option<i32>,
    pub status: VendorStatus,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
