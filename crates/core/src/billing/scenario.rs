//! Advance payment scenario classification.
//!
//! An advance is linked to a reservation, a folio, or both. Which references
//! are present tells us where in the guest lifecycle the payment happened.

use serde::{Deserialize, Serialize};

/// Where in the guest lifecycle an advance payment was taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AdvanceScenario {
    /// Reservation only: paid before check-in, no folio exists yet.
    PreCheckin,
    /// Folio and reservation: paid after check-in for a reserved guest.
    PostCheckin,
    /// Folio only: walk-in guest, never had a reservation.
    WalkIn,
    /// Neither reference present; should be rejected at validation time.
    Unclassified,
}

impl AdvanceScenario {
    /// Classifies an advance from the presence of its references.
    ///
    /// Empty or whitespace-only strings count as absent, matching how the
    /// front desk sends blank form fields.
    #[must_use]
    pub fn classify(folio_no: Option<&str>, reservation_no: Option<&str>) -> Self {
        let has_folio = folio_no.is_some_and(|f| !f.trim().is_empty());
        let has_reservation = reservation_no.is_some_and(|r| !r.trim().is_empty());

        match (has_folio, has_reservation) {
            (false, true) => Self::PreCheckin,
            (true, true) => Self::PostCheckin,
            (true, false) => Self::WalkIn,
            (false, false) => Self::Unclassified,
        }
    }

    /// Returns the wire label for the scenario.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PreCheckin => "PRE_CHECKIN",
            Self::PostCheckin => "POST_CHECKIN",
            Self::WalkIn => "WALK_IN",
            Self::Unclassified => "UNCLASSIFIED",
        }
    }
}

impl std::fmt::Display for AdvanceScenario {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(None, Some("RES/202501/0001"), AdvanceScenario::PreCheckin)]
    #[case(Some("FOL/202501/0001"), Some("RES/202501/0001"), AdvanceScenario::PostCheckin)]
    #[case(Some("FOL/202501/0001"), None, AdvanceScenario::WalkIn)]
    #[case(Some("WI1735689600000"), None, AdvanceScenario::WalkIn)]
    #[case(None, None, AdvanceScenario::Unclassified)]
    fn classifies_by_reference_presence(
        #[case] folio: Option<&str>,
        #[case] reservation: Option<&str>,
        #[case] expected: AdvanceScenario,
    ) {
        assert_eq!(AdvanceScenario::classify(folio, reservation), expected);
    }

    #[rstest]
    #[case(Some(""), Some("RES/202501/0001"), AdvanceScenario::PreCheckin)]
    #[case(Some("   "), None, AdvanceScenario::Unclassified)]
    #[case(Some("FOL/202501/0001"), Some("  "), AdvanceScenario::WalkIn)]
    fn blank_strings_count_as_absent(
        #[case] folio: Option<&str>,
        #[case] reservation: Option<&str>,
        #[case] expected: AdvanceScenario,
    ) {
        assert_eq!(AdvanceScenario::classify(folio, reservation), expected);
    }

    #[test]
    fn wire_labels_are_stable() {
        assert_eq!(AdvanceScenario::PreCheckin.as_str(), "PRE_CHECKIN");
        assert_eq!(AdvanceScenario::PostCheckin.as_str(), "POST_CHECKIN");
        assert_eq!(AdvanceScenario::WalkIn.as_str(), "WALK_IN");
    }
}
