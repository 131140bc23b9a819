//! Guest journey: a date-ordered timeline of payments and charges.

use rust_decimal::Decimal;
use serde::Serialize;

use super::summary::{AdvanceLine, ChargeLine};

/// What kind of activity a timeline event records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JourneyEventKind {
    /// An advance payment came in.
    AdvancePayment,
    /// A charge was posted.
    Charge,
}

/// One event in a guest's financial timeline.
#[derive(Debug, Clone, Serialize)]
pub struct JourneyEvent {
    /// Event kind.
    #[serde(rename = "type")]
    pub kind: JourneyEventKind,
    /// Event date.
    pub date: chrono::NaiveDate,
    /// Amount moved.
    pub amount: Decimal,
    /// Payment mode (advances) or account head (charges).
    pub detail: String,
    /// Remarks or narration, when present.
    pub note: Option<String>,
    /// Row ID of the source record.
    pub id: i64,
}

/// The full financial picture of one guest stay.
#[derive(Debug, Clone, Serialize)]
pub struct GuestJourney {
    /// Sum of all advances.
    pub total_advances: Decimal,
    /// Sum of all charges.
    pub total_charges: Decimal,
    /// `total_charges - total_advances`; may be negative.
    pub net_amount: Decimal,
    /// Number of advance events.
    pub advance_count: usize,
    /// Number of charge events.
    pub charge_count: usize,
    /// All events, sorted by date (payments before charges on the same day).
    pub timeline: Vec<JourneyEvent>,
}

impl GuestJourney {
    /// Builds the journey from the guest's advance and charge lines.
    #[must_use]
    pub fn build(advances: &[AdvanceLine], charges: &[ChargeLine]) -> Self {
        let total_advances: Decimal = advances.iter().map(|a| a.amount).sum();
        let total_charges: Decimal = charges.iter().map(|c| c.amount).sum();

        let mut timeline: Vec<JourneyEvent> = Vec::with_capacity(advances.len() + charges.len());

        for advance in advances {
            timeline.push(JourneyEvent {
                kind: JourneyEventKind::AdvancePayment,
                date: advance.payment_date,
                amount: advance.amount,
                detail: advance.payment_mode.clone(),
                note: advance.remarks.clone(),
                id: advance.id,
            });
        }

        for charge in charges {
            timeline.push(JourneyEvent {
                kind: JourneyEventKind::Charge,
                date: charge.trans_date,
                amount: charge.amount,
                detail: charge.acc_head.clone(),
                note: charge.narration.clone(),
                id: charge.id,
            });
        }

        timeline.sort_by(|a, b| a.date.cmp(&b.date).then(a.kind.cmp(&b.kind)));

        Self {
            total_advances,
            total_charges,
            net_amount: total_charges - total_advances,
            advance_count: advances.len(),
            charge_count: charges.len(),
            timeline,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, d).unwrap()
    }

    fn advance_on(d: u32, amount: Decimal) -> AdvanceLine {
        AdvanceLine {
            id: i64::from(d),
            payment_mode: "Cash".to_string(),
            amount,
            payment_date: day(d),
            folio_no: Some("FOL/202501/0001".to_string()),
            reservation_no: None,
            remarks: None,
        }
    }

    fn charge_on(d: u32, amount: Decimal) -> ChargeLine {
        ChargeLine {
            id: i64::from(d),
            acc_head: "ROOM_RENT".to_string(),
            amount,
            trans_date: day(d),
            narration: None,
        }
    }

    #[test]
    fn timeline_is_sorted_by_date() {
        let journey = GuestJourney::build(
            &[advance_on(10, dec!(500)), advance_on(2, dec!(1000))],
            &[charge_on(5, dec!(2000)), charge_on(1, dec!(300))],
        );

        let dates: Vec<u32> = journey
            .timeline
            .iter()
            .map(|e| chrono::Datelike::day(&e.date))
            .collect();
        assert_eq!(dates, vec![1, 2, 5, 10]);
    }

    #[test]
    fn same_day_payment_sorts_before_charge() {
        let journey = GuestJourney::build(
            &[advance_on(3, dec!(500))],
            &[charge_on(3, dec!(700))],
        );

        assert_eq!(journey.timeline[0].kind, JourneyEventKind::AdvancePayment);
        assert_eq!(journey.timeline[1].kind, JourneyEventKind::Charge);
    }

    #[test]
    fn totals_and_net() {
        let journey = GuestJourney::build(
            &[advance_on(1, dec!(1000))],
            &[charge_on(2, dec!(1500)), charge_on(3, dec!(250))],
        );

        assert_eq!(journey.total_advances, dec!(1000));
        assert_eq!(journey.total_charges, dec!(1750));
        assert_eq!(journey.net_amount, dec!(750));
        assert_eq!(journey.advance_count, 1);
        assert_eq!(journey.charge_count, 2);
    }

    #[test]
    fn empty_journey() {
        let journey = GuestJourney::build(&[], &[]);
        assert!(journey.timeline.is_empty());
        assert_eq!(journey.net_amount, dec!(0));
    }
}
