//! Document number formats for folios, reservations, and maintenance tickets.
//!
//! All front-office documents share the same numbering scheme:
//! `<PREFIX>/YYYYMM/NNNN` with a monthly 4-digit sequence. Walk-in guests
//! without a reservation get an ad hoc `WI<epoch-millis>` folio instead.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// The kind of document a number identifies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentKind {
    /// Guest folio opened at check-in (`FOL/...`).
    Folio,
    /// Reservation (`RES/...`).
    Reservation,
    /// Front-office bill generated at checkout (`BIL/...`).
    Bill,
    /// Maintenance ticket (`MNT/...`).
    MaintenanceTicket,
}

impl DocumentKind {
    /// Returns the document prefix.
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Folio => "FOL",
            Self::Reservation => "RES",
            Self::Bill => "BIL",
            Self::MaintenanceTicket => "MNT",
        }
    }
}

/// A formatted document number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentNo(String);

impl DocumentNo {
    /// Formats the next number in the monthly sequence.
    ///
    /// `existing_in_month` is the count of documents already carrying the
    /// current month's prefix; the new number uses `existing_in_month + 1`.
    #[must_use]
    pub fn next_in_month(kind: DocumentKind, date: NaiveDate, existing_in_month: u64) -> Self {
        let seq = existing_in_month + 1;
        Self(format!(
            "{}/{:04}{:02}/{:04}",
            kind.prefix(),
            date.year(),
            date.month(),
            seq
        ))
    }

    /// The month prefix (`FOL/202501/`) used to count existing documents.
    #[must_use]
    pub fn month_prefix(kind: DocumentKind, date: NaiveDate) -> String {
        format!("{}/{:04}{:02}/", kind.prefix(), date.year(), date.month())
    }

    /// Builds a walk-in folio number from a timestamp (`WI<epoch-millis>`).
    #[must_use]
    pub fn walk_in_folio(at: DateTime<Utc>) -> Self {
        Self(format!("WI{}", at.timestamp_millis()))
    }

    /// Wraps an already-formatted number (e.g. read back from the database).
    #[must_use]
    pub fn from_string(value: String) -> Self {
        Self(value)
    }

    /// Returns the number as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the number, returning the inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for DocumentNo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;

    #[rstest]
    #[case(DocumentKind::Folio, 0, "FOL/202501/0001")]
    #[case(DocumentKind::Folio, 41, "FOL/202501/0042")]
    #[case(DocumentKind::Reservation, 7, "RES/202501/0008")]
    #[case(DocumentKind::Bill, 2, "BIL/202501/0003")]
    #[case(DocumentKind::MaintenanceTicket, 999, "MNT/202501/1000")]
    fn next_in_month_formats_sequence(
        #[case] kind: DocumentKind,
        #[case] existing: u64,
        #[case] expected: &str,
    ) {
        let date = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        assert_eq!(DocumentNo::next_in_month(kind, date, existing).as_str(), expected);
    }

    #[test]
    fn month_prefix_pads_month() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        assert_eq!(
            DocumentNo::month_prefix(DocumentKind::Folio, date),
            "FOL/202503/"
        );
    }

    #[test]
    fn walk_in_folio_uses_epoch_millis() {
        let at = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let folio = DocumentNo::walk_in_folio(at);
        assert_eq!(folio.as_str(), format!("WI{}", at.timestamp_millis()));
        assert!(folio.as_str().starts_with("WI"));
    }

    #[test]
    fn sequence_rolls_over_across_months() {
        let jan = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
        let feb = NaiveDate::from_ymd_opt(2025, 2, 1).unwrap();
        let last_of_jan = DocumentNo::next_in_month(DocumentKind::Folio, jan, 122);
        let first_of_feb = DocumentNo::next_in_month(DocumentKind::Folio, feb, 0);
        assert_eq!(last_of_jan.as_str(), "FOL/202501/0123");
        assert_eq!(first_of_feb.as_str(), "FOL/202502/0001");
    }
}
