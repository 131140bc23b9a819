//! Folio reconciliation: charges minus advances minus settlements.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;

use super::scenario::AdvanceScenario;

/// A posted charge against a folio.
#[derive(Debug, Clone, Serialize)]
pub struct ChargeLine {
    /// Row ID of the post-transaction.
    pub id: i64,
    /// Account head the charge was posted under (e.g. `ROOM_RENT`).
    pub acc_head: String,
    /// Charge amount.
    pub amount: Decimal,
    /// Transaction date.
    pub trans_date: chrono::NaiveDate,
    /// Free-text narration.
    pub narration: Option<String>,
}

/// An advance payment recorded against a folio or reservation.
#[derive(Debug, Clone, Serialize)]
pub struct AdvanceLine {
    /// Row ID of the advance.
    pub id: i64,
    /// Payment mode label (already normalized).
    pub payment_mode: String,
    /// Paid amount.
    pub amount: Decimal,
    /// Payment date.
    pub payment_date: chrono::NaiveDate,
    /// Folio reference, if the guest was checked in.
    pub folio_no: Option<String>,
    /// Reservation reference, if the guest had one.
    pub reservation_no: Option<String>,
    /// Free-text remarks.
    pub remarks: Option<String>,
}

impl AdvanceLine {
    /// Classifies this advance into its lifecycle scenario.
    #[must_use]
    pub fn scenario(&self) -> AdvanceScenario {
        AdvanceScenario::classify(self.folio_no.as_deref(), self.reservation_no.as_deref())
    }
}

/// A settlement recorded against a generated bill.
#[derive(Debug, Clone, Serialize)]
pub struct SettlementLine {
    /// Row ID of the settlement.
    pub id: i64,
    /// Payment mode label.
    pub payment_mode: String,
    /// Settled amount.
    pub amount: Decimal,
    /// Settlement date.
    pub payment_date: chrono::NaiveDate,
}

/// Outcome of reconciling a folio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BillStatus {
    /// The guest still owes money.
    PaymentDue,
    /// Payments exceed charges; the excess goes back to the guest.
    RefundDue,
    /// Charges and payments match exactly.
    Settled,
}

impl BillStatus {
    /// Returns the wire label for the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PaymentDue => "PAYMENT_DUE",
            Self::RefundDue => "REFUND_DUE",
            Self::Settled => "SETTLED",
        }
    }
}

/// A reconciled folio: totals, groupings, and the resulting status.
#[derive(Debug, Clone, Serialize)]
pub struct Reconciliation {
    /// Sum of all posted charges.
    pub gross_charges: Decimal,
    /// Sum of all advance payments.
    pub total_advances: Decimal,
    /// Sum of all bill settlements.
    pub total_settlements: Decimal,
    /// `gross_charges - total_advances - total_settlements`; may be negative.
    pub net_amount: Decimal,
    /// Amount still owed; never negative.
    pub balance_due: Decimal,
    /// Amount to refund; never negative.
    pub excess_advance: Decimal,
    /// Status derived from the sign of `net_amount`.
    pub status: BillStatus,
    /// Charge totals grouped by account head.
    pub charges_by_acc_head: BTreeMap<String, Decimal>,
    /// Advance totals grouped by payment mode.
    pub advances_by_mode: BTreeMap<String, Decimal>,
    /// Advance totals grouped by lifecycle scenario.
    pub advances_by_scenario: BTreeMap<AdvanceScenario, Decimal>,
    /// Number of charge lines.
    pub charge_count: usize,
    /// Number of advance lines.
    pub advance_count: usize,
    /// Number of settlement lines.
    pub settlement_count: usize,
}

impl Reconciliation {
    /// Reconciles a folio from its charge, advance, and settlement lines.
    ///
    /// The balance can never go negative: an overpaid folio reports zero
    /// balance and a positive `excess_advance` instead.
    #[must_use]
    pub fn compute(
        charges: &[ChargeLine],
        advances: &[AdvanceLine],
        settlements: &[SettlementLine],
    ) -> Self {
        let gross_charges: Decimal = charges.iter().map(|c| c.amount).sum();
        let total_advances: Decimal = advances.iter().map(|a| a.amount).sum();
        let total_settlements: Decimal = settlements.iter().map(|s| s.amount).sum();

        let net_amount = gross_charges - total_advances - total_settlements;
        let balance_due = net_amount.max(Decimal::ZERO);
        let excess_advance = (-net_amount).max(Decimal::ZERO);

        let status = if balance_due > Decimal::ZERO {
            BillStatus::PaymentDue
        } else if excess_advance > Decimal::ZERO {
            BillStatus::RefundDue
        } else {
            BillStatus::Settled
        };

        let mut charges_by_acc_head: BTreeMap<String, Decimal> = BTreeMap::new();
        for charge in charges {
            *charges_by_acc_head
                .entry(charge.acc_head.clone())
                .or_default() += charge.amount;
        }

        let mut advances_by_mode: BTreeMap<String, Decimal> = BTreeMap::new();
        let mut advances_by_scenario: BTreeMap<AdvanceScenario, Decimal> = BTreeMap::new();
        for advance in advances {
            *advances_by_mode
                .entry(advance.payment_mode.clone())
                .or_default() += advance.amount;
            *advances_by_scenario.entry(advance.scenario()).or_default() += advance.amount;
        }

        Self {
            gross_charges,
            total_advances,
            total_settlements,
            net_amount,
            balance_due,
            excess_advance,
            status,
            charges_by_acc_head,
            advances_by_mode,
            advances_by_scenario,
            charge_count: charges.len(),
            advance_count: advances.len(),
            settlement_count: settlements.len(),
        }
    }
}
