//! Payment modes accepted at the front desk.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a payment mode string cannot be recognized.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid payment mode: {0}")]
pub struct InvalidPaymentMode(pub String);

/// The accepted payment modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMode {
    /// Cash at the desk.
    Cash,
    /// Credit card.
    CreditCard,
    /// Debit card.
    DebitCard,
    /// UPI transfer.
    Upi,
    /// Bank transfer / net banking.
    BankTransfer,
    /// Cheque.
    Cheque,
}

impl PaymentMode {
    /// All modes, in display order.
    pub const ALL: [Self; 6] = [
        Self::Cash,
        Self::CreditCard,
        Self::DebitCard,
        Self::Upi,
        Self::BankTransfer,
        Self::Cheque,
    ];

    /// The canonical label stored in the database and shown on bills.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Cash => "Cash",
            Self::CreditCard => "Credit Card",
            Self::DebitCard => "Debit Card",
            Self::Upi => "UPI",
            Self::BankTransfer => "Bank Transfer",
            Self::Cheque => "Cheque",
        }
    }

    /// Parses a user-supplied mode, case-insensitively, accepting the
    /// aliases the old front-desk clients send.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPaymentMode` when the string matches no known mode.
    pub fn parse(input: &str) -> Result<Self, InvalidPaymentMode> {
        match input.trim().to_lowercase().as_str() {
            "cash" => Ok(Self::Cash),
            "credit card" | "creditcard" | "card" => Ok(Self::CreditCard),
            "debit card" | "debitcard" => Ok(Self::DebitCard),
            "upi" => Ok(Self::Upi),
            "bank transfer" | "banktransfer" | "netbanking" | "net banking" => {
                Ok(Self::BankTransfer)
            }
            "cheque" | "check" => Ok(Self::Cheque),
            _ => Err(InvalidPaymentMode(input.to_string())),
        }
    }
}

impl std::fmt::Display for PaymentMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for PaymentMode {
    type Err = InvalidPaymentMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("cash", PaymentMode::Cash)]
    #[case("Cash", PaymentMode::Cash)]
    #[case("CASH", PaymentMode::Cash)]
    #[case("credit card", PaymentMode::CreditCard)]
    #[case("creditcard", PaymentMode::CreditCard)]
    #[case("card", PaymentMode::CreditCard)]
    #[case("Debit Card", PaymentMode::DebitCard)]
    #[case("upi", PaymentMode::Upi)]
    #[case("UPI", PaymentMode::Upi)]
    #[case("netbanking", PaymentMode::BankTransfer)]
    #[case("Bank Transfer", PaymentMode::BankTransfer)]
    #[case("check", PaymentMode::Cheque)]
    #[case("cheque", PaymentMode::Cheque)]
    #[case("  cash  ", PaymentMode::Cash)]
    fn parses_known_modes(#[case] input: &str, #[case] expected: PaymentMode) {
        assert_eq!(PaymentMode::parse(input).unwrap(), expected);
    }

    #[rstest]
    #[case("bitcoin")]
    #[case("")]
    #[case("cash money")]
    fn rejects_unknown_modes(#[case] input: &str) {
        assert!(PaymentMode::parse(input).is_err());
    }

    #[test]
    fn labels_round_trip() {
        for mode in PaymentMode::ALL {
            assert_eq!(PaymentMode::parse(mode.label()).unwrap(), mode);
        }
    }
}
