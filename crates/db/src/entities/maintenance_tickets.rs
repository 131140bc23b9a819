//! `SeaORM` Entity for the maintenance_tickets table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::{TicketPriority, TicketStatus};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "maintenance_tickets")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub ticket_no: String,
    pub room_no: Option<String>,
    pub area: Option<String>,
    pub description: String,
    pub priority: TicketPriority,
    pub status: TicketStatus,
    pub reported_by: Option<String>,
    pub assigned_to: Option<String>,
    pub vendor_id: Option<i64>,
    pub reported_date: Date,
    pub resolved_at: Option<DateTimeWithTimeZone>,
    pub resolution_notes: Option<String>,
    pub user_id: Option<i64>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
