//! Folio billing rules.
//!
//! A folio accumulates posted charges and is offset by advance payments and
//! bill settlements. Everything here works on plain decimal lines so the
//! arithmetic is independent of how the rows are stored.

pub mod journey;
pub mod scenario;
pub mod summary;
