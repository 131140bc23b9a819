//! Core business logic for Innkeep.
//!
//! This crate holds the folio reconciliation rules, advance scenario
//! classification, payment mode handling, and password hashing. It has no
//! web or database dependencies so every rule here is testable in isolation.

pub mod auth;
pub mod billing;
pub mod payment;

pub use billing::scenario::AdvanceScenario;
pub use billing::summary::{AdvanceLine, BillStatus, ChargeLine, Reconciliation, SettlementLine};
pub use payment::PaymentMode;
