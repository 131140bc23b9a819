//! `SeaORM` Entity for the housekeeping_tasks table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::TaskStatus;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "housekeeping_tasks")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub room_no: String,
    pub task_type: String,
    pub task_date: Date,
    pub assigned_to: Option<String>,
    pub status: TaskStatus,
    pub notes: Option<String>,
    pub completed_at: Option<DateTimeWithTimeZone>,
    pub user_id: Option<i64>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
