//! `SeaORM` entity definitions for the hotel schema.

pub mod advances;
pub mod bill_settlements;
pub mod checkins;
pub mod fo_bills;
pub mod housekeeping_tasks;
pub mod maintenance_tickets;
pub mod post_transactions;
pub mod reservations;
pub mod rooms;
pub mod sea_orm_active_enums;
pub mod users;
pub mod vendors;
