//! End-to-end billing flow: advances, charges, reconciliation, bill,
//! settlement. This is the money path, so it gets the thickest coverage.

mod common;

use chrono::Datelike;
use rust_decimal::Decimal;

use innkeep_core::billing::journey::JourneyEventKind;
use innkeep_core::{AdvanceScenario, BillStatus};
use innkeep_db::repositories::{
    AdvanceError, AdvanceRepository, BillingError, BillingRepository, CheckinRepository,
    CreateAdvanceInput, CreateChargeInput, CreateSettlementInput, PostTransactionRepository,
    UpdateAdvanceInput,
};

use common::{seed_reservation, seed_room, setup_db, today};

fn advance_input(mode: &str, amount: i64) -> CreateAdvanceInput {
    CreateAdvanceInput {
        folio_no: None,
        reservation_no: None,
        guest_name: String::new(),
        payment_mode: mode.to_string(),
        amount: Decimal::from(amount),
        payment_date: today(),
        reference_no: None,
        room_no: None,
        remarks: None,
        user_id: None,
    }
}

fn charge_input(folio_no: &str, acc_head: &str, amount: i64) -> CreateChargeInput {
    CreateChargeInput {
        folio_no: folio_no.to_string(),
        trans_date: today(),
        acc_head: acc_head.to_string(),
        voucher_no: None,
        amount: Decimal::from(amount),
        narration: None,
        user_id: None,
    }
}

/// Books, takes a deposit, checks in, and returns the folio number.
async fn seed_stay(db: &sea_orm::DatabaseConnection) -> String {
    seed_room(db, "101").await;
    let reservation_no = seed_reservation(db, "Asha Rao").await;

    AdvanceRepository::new(db.clone())
        .create_pre_checkin(&reservation_no, advance_input("upi", 1000))
        .await
        .unwrap();

    let checkin = CheckinRepository::new(db.clone())
        .create_from_reservation(&reservation_no, Some("101".to_string()), None)
        .await
        .unwrap();
    checkin.folio_no
}

#[tokio::test]
async fn statement_reconciles_charges_and_both_advance_kinds() {
    let db = setup_db().await;
    let folio_no = seed_stay(&db).await;

    let advances = AdvanceRepository::new(db.clone());
    advances
        .create_post_checkin(&folio_no, advance_input("cash", 1500))
        .await
        .unwrap();

    let charges = PostTransactionRepository::new(db.clone());
    charges
        .create_charge(charge_input(&folio_no, "ROOM_RENT", 3000))
        .await
        .unwrap();
    charges
        .create_charge(charge_input(&folio_no, "RESTAURANT", 450))
        .await
        .unwrap();

    let statement = BillingRepository::new(db)
        .folio_statement(&folio_no)
        .await
        .unwrap();
    let recon = &statement.reconciliation;

    // The pre-check-in deposit is reservation-linked but still counts.
    assert_eq!(statement.advances.len(), 2);
    assert_eq!(recon.gross_charges, Decimal::from(3450));
    assert_eq!(recon.total_advances, Decimal::from(2500));
    assert_eq!(recon.balance_due, Decimal::from(950));
    assert_eq!(recon.excess_advance, Decimal::ZERO);
    assert_eq!(recon.status, BillStatus::PaymentDue);

    assert_eq!(
        recon.advances_by_scenario[&AdvanceScenario::PreCheckin],
        Decimal::from(1000)
    );
    assert_eq!(
        recon.advances_by_scenario[&AdvanceScenario::PostCheckin],
        Decimal::from(1500)
    );
    assert_eq!(recon.charges_by_acc_head["ROOM_RENT"], Decimal::from(3000));
    assert_eq!(recon.advances_by_mode["UPI"], Decimal::from(1000));
    assert_eq!(recon.advances_by_mode["Cash"], Decimal::from(1500));
}

#[tokio::test]
async fn cancelled_charges_drop_out_of_the_statement() {
    let db = setup_db().await;
    let folio_no = seed_stay(&db).await;

    let charges = PostTransactionRepository::new(db.clone());
    charges
        .create_charge(charge_input(&folio_no, "ROOM_RENT", 3000))
        .await
        .unwrap();
    let minibar = charges
        .create_charge(charge_input(&folio_no, "MINIBAR", 700))
        .await
        .unwrap();
    charges.cancel_charge(minibar.id).await.unwrap();

    let statement = BillingRepository::new(db)
        .folio_statement(&folio_no)
        .await
        .unwrap();
    assert_eq!(statement.charges.len(), 1);
    assert_eq!(statement.reconciliation.gross_charges, Decimal::from(3000));
}

#[tokio::test]
async fn overpaid_folio_reports_refund_due() {
    let db = setup_db().await;
    let folio_no = seed_stay(&db).await;

    PostTransactionRepository::new(db.clone())
        .create_charge(charge_input(&folio_no, "ROOM_RENT", 600))
        .await
        .unwrap();

    let statement = BillingRepository::new(db)
        .folio_statement(&folio_no)
        .await
        .unwrap();
    let recon = &statement.reconciliation;

    assert_eq!(recon.net_amount, Decimal::from(-400));
    assert_eq!(recon.balance_due, Decimal::ZERO);
    assert_eq!(recon.excess_advance, Decimal::from(400));
    assert_eq!(recon.status, BillStatus::RefundDue);
}

#[tokio::test]
async fn final_bill_freezes_the_reconciliation() {
    let db = setup_db().await;
    let folio_no = seed_stay(&db).await;

    PostTransactionRepository::new(db.clone())
        .create_charge(charge_input(&folio_no, "ROOM_RENT", 3000))
        .await
        .unwrap();

    let billing = BillingRepository::new(db);
    let bill = billing
        .generate_final_bill(&folio_no, None, None)
        .await
        .unwrap();

    let prefix = format!("BIL/{:04}{:02}/", today().year(), today().month());
    assert!(bill.bill_no.starts_with(&prefix));
    assert_eq!(bill.gross_amount, Decimal::from(3000));
    assert_eq!(bill.advance_adjusted, Decimal::from(1000));
    assert_eq!(bill.balance_due, Decimal::from(2000));
    assert!(!bill.is_settled);

    // One bill per folio.
    let err = billing
        .generate_final_bill(&folio_no, None, None)
        .await
        .unwrap_err();
    assert!(matches!(err, BillingError::AlreadyBilled(_)));
}

#[tokio::test]
async fn settlements_accumulate_and_flip_the_bill_settled() {
    let db = setup_db().await;
    let folio_no = seed_stay(&db).await;

    PostTransactionRepository::new(db.clone())
        .create_charge(charge_input(&folio_no, "ROOM_RENT", 3000))
        .await
        .unwrap();

    let billing = BillingRepository::new(db);
    billing
        .generate_final_bill(&folio_no, None, None)
        .await
        .unwrap();

    billing
        .create_settlement(CreateSettlementInput {
            folio_no: folio_no.clone(),
            payment_mode: "card".to_string(),
            amount: Decimal::from(1200),
            payment_date: today(),
            reference_no: Some("SLIP-1".to_string()),
            remarks: None,
            user_id: None,
        })
        .await
        .unwrap();

    let bill = billing.get_bill_by_folio(&folio_no).await.unwrap();
    assert!(!bill.is_settled);

    billing
        .create_settlement(CreateSettlementInput {
            folio_no: folio_no.clone(),
            payment_mode: "cash".to_string(),
            amount: Decimal::from(800),
            payment_date: today(),
            reference_no: None,
            remarks: None,
            user_id: None,
        })
        .await
        .unwrap();

    let bill = billing.get_bill_by_folio(&folio_no).await.unwrap();
    assert!(bill.is_settled);

    // The statement now nets to zero through the settlements.
    let statement = billing.folio_statement(&folio_no).await.unwrap();
    assert_eq!(statement.reconciliation.total_settlements, Decimal::from(2000));
    assert_eq!(statement.reconciliation.status, BillStatus::Settled);

    // Settled bills take no further money.
    let err = billing
        .create_settlement(CreateSettlementInput {
            folio_no,
            payment_mode: "cash".to_string(),
            amount: Decimal::from(1),
            payment_date: today(),
            reference_no: None,
            remarks: None,
            user_id: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, BillingError::AlreadySettled(_)));
}

#[tokio::test]
async fn settlement_requires_a_generated_bill() {
    let db = setup_db().await;
    let folio_no = seed_stay(&db).await;

    let err = BillingRepository::new(db)
        .create_settlement(CreateSettlementInput {
            folio_no,
            payment_mode: "cash".to_string(),
            amount: Decimal::from(100),
            payment_date: today(),
            reference_no: None,
            remarks: None,
            user_id: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, BillingError::NoBillForFolio(_)));
}

#[tokio::test]
async fn guest_journey_orders_payments_before_charges() {
    let db = setup_db().await;
    let folio_no = seed_stay(&db).await;

    PostTransactionRepository::new(db.clone())
        .create_charge(charge_input(&folio_no, "ROOM_RENT", 3000))
        .await
        .unwrap();

    let journey = BillingRepository::new(db)
        .guest_journey(&folio_no)
        .await
        .unwrap();

    assert_eq!(journey.advance_count, 1);
    assert_eq!(journey.charge_count, 1);
    assert_eq!(journey.net_amount, Decimal::from(2000));
    assert_eq!(journey.timeline[0].kind, JourneyEventKind::AdvancePayment);
    assert_eq!(journey.timeline[1].kind, JourneyEventKind::Charge);
}

#[tokio::test]
async fn walk_in_advance_gets_an_ad_hoc_folio() {
    let db = setup_db().await;
    let repo = AdvanceRepository::new(db);

    let mut input = advance_input("cash", 500);
    input.guest_name = "Walk-in Guest".to_string();
    let advance = repo.create_walk_in(input).await.unwrap();

    let folio = advance.folio_no.unwrap();
    assert!(folio.starts_with("WI"));
    assert!(folio.len() > 2);
    assert_eq!(advance.reservation_no, None);
    assert_eq!(advance.payment_mode, "Cash");
}

#[tokio::test]
async fn advance_validation_rejects_bad_input() {
    let db = setup_db().await;
    let repo = AdvanceRepository::new(db);

    // No reference at all.
    let mut input = advance_input("cash", 500);
    input.guest_name = "Nobody".to_string();
    let err = repo.create_advance(input).await.unwrap_err();
    assert!(matches!(err, AdvanceError::MissingReference));

    // Unknown payment mode.
    let mut input = advance_input("bitcoin", 500);
    input.reservation_no = Some("RES/202501/0001".to_string());
    let err = repo.create_advance(input).await.unwrap_err();
    assert!(matches!(err, AdvanceError::InvalidPaymentMode(_)));

    // Zero amount.
    let mut input = advance_input("cash", 0);
    input.reservation_no = Some("RES/202501/0001".to_string());
    let err = repo.create_advance(input).await.unwrap_err();
    assert!(matches!(err, AdvanceError::NonPositiveAmount(_)));
}

#[tokio::test]
async fn advance_requires_live_references() {
    let db = setup_db().await;
    let repo = AdvanceRepository::new(db);

    // A folio with no checkin behind it never shows on a statement, so the
    // money would vanish. Reject it at intake.
    let mut input = advance_input("cash", 500);
    input.folio_no = Some("FOL/209901/0042".to_string());
    let err = repo.create_advance(input).await.unwrap_err();
    assert!(matches!(err, AdvanceError::FolioNotFound(_)));

    // Same for a reservation that was never booked.
    let mut input = advance_input("cash", 500);
    input.reservation_no = Some("RES/209901/0042".to_string());
    let err = repo.create_advance(input).await.unwrap_err();
    assert!(matches!(err, AdvanceError::ReservationNotFound(_)));
}

#[tokio::test]
async fn advance_rejects_a_folio_paired_with_the_wrong_reservation() {
    let db = setup_db().await;
    let folio_no = seed_stay(&db).await;
    let other_reservation = seed_reservation(&db, "Vikram Shah").await;

    let mut input = advance_input("cash", 500);
    input.folio_no = Some(folio_no);
    input.reservation_no = Some(other_reservation);
    let err = AdvanceRepository::new(db)
        .create_advance(input)
        .await
        .unwrap_err();
    assert!(matches!(err, AdvanceError::UnlinkedReferences { .. }));
}

#[tokio::test]
async fn advance_payment_date_cannot_precede_the_stay() {
    let db = setup_db().await;
    let folio_no = seed_stay(&db).await;
    let repo = AdvanceRepository::new(db.clone());

    // Dated before the check-in.
    let mut input = advance_input("cash", 500);
    input.folio_no = Some(folio_no);
    input.payment_date = today() - chrono::Days::new(1);
    let err = repo.create_advance(input).await.unwrap_err();
    assert!(matches!(err, AdvanceError::PaymentBeforeCheckin { .. }));

    // Dated before the reservation arrival.
    let reservation_no = seed_reservation(&db, "Vikram Shah").await;
    let mut input = advance_input("upi", 500);
    input.reservation_no = Some(reservation_no);
    input.payment_date = today() - chrono::Days::new(1);
    let err = repo.create_advance(input).await.unwrap_err();
    assert!(matches!(err, AdvanceError::PaymentBeforeArrival { .. }));
}

#[tokio::test]
async fn advance_update_revalidates_the_payment_date() {
    let db = setup_db().await;
    let folio_no = seed_stay(&db).await;
    let repo = AdvanceRepository::new(db);

    let mut input = advance_input("cash", 500);
    input.folio_no = Some(folio_no);
    let advance = repo.create_advance(input).await.unwrap();

    let err = repo
        .update_advance(
            advance.id,
            UpdateAdvanceInput {
                payment_date: Some(today() - chrono::Days::new(1)),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AdvanceError::PaymentBeforeCheckin { .. }));
}

#[tokio::test]
async fn advance_fills_guest_details_from_the_checkin() {
    let db = setup_db().await;
    let folio_no = seed_stay(&db).await;

    let mut input = advance_input("cash", 500);
    input.folio_no = Some(folio_no);
    let advance = AdvanceRepository::new(db)
        .create_advance(input)
        .await
        .unwrap();

    assert_eq!(advance.guest_name, "Asha Rao");
    assert_eq!(advance.room_no.as_deref(), Some("101"));
}
