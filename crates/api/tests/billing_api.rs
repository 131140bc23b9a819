//! End-to-end money flow over HTTP: advances at each lifecycle stage,
//! posted charges, folio reconciliation, the final bill, and settlements.

mod common;

use axum::http::StatusCode;
use axum::Router;
use chrono::{Days, Utc};
use rust_decimal::Decimal;
use serde_json::{json, Value};

use common::{get, money, post, setup_app};

fn dec(n: i64) -> Decimal {
    Decimal::from(n)
}

fn encode(document_no: &str) -> String {
    document_no.replace('/', "%2F")
}

/// Books a reservation, takes a pre-check-in deposit, checks the guest
/// into `room_no`, and returns the folio number.
async fn seed_stay(app: &Router, guest_name: &str, room_no: &str, deposit: i64) -> String {
    let (status, _) = post(
        app,
        "/api/v1/rooms",
        json!({
            "room_no": room_no,
            "floor": 1,
            "room_type": "DELUXE",
            "rate": 2500,
            "max_occupancy": 2,
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let today = Utc::now().date_naive();
    let (status, body) = post(
        app,
        "/api/v1/reservations",
        json!({
            "guest_name": guest_name,
            "from_date": today.to_string(),
            "to_date": (today + Days::new(2)).to_string(),
            "rate": 2500,
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let reservation_no = body["reservation"]["reservation_no"]
        .as_str()
        .unwrap()
        .to_string();

    if deposit > 0 {
        let (status, body) = post(
            app,
            "/api/v1/payment-workflow/advances/pre-checkin",
            json!({
                "reservation_no": reservation_no,
                "payment_mode": "upi",
                "amount": deposit,
            }),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["scenario"], "PRE_CHECKIN");
    }

    let (status, body) = post(
        app,
        "/api/v1/checkins/from-reservation",
        json!({ "reservation_no": reservation_no, "room_no": room_no }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["checkin"]["folio_no"].as_str().unwrap().to_string()
}

async fn post_charge(app: &Router, folio_no: &str, acc_head: &str, amount: i64) -> Value {
    let (status, body) = post(
        app,
        "/api/v1/post-transactions",
        json!({ "folio_no": folio_no, "acc_head": acc_head, "amount": amount }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["charge"].clone()
}

#[tokio::test]
async fn folio_summary_reconciles_both_advance_kinds() {
    let app = setup_app().await;
    let folio_no = seed_stay(&app, "Meera Iyer", "101", 1000).await;

    let (status, body) = post(
        &app,
        "/api/v1/payment-workflow/advances/post-checkin",
        json!({ "folio_no": folio_no, "payment_mode": "cash", "amount": 1500 }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["scenario"], "POST_CHECKIN");

    post_charge(&app, &folio_no, "ROOM_RENT", 3000).await;
    post_charge(&app, &folio_no, "RESTAURANT", 450).await;

    let (status, body) = get(
        &app,
        &format!("/api/v1/billing/folio/{}/summary", encode(&folio_no)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let recon = &body["statement"]["reconciliation"];
    assert_eq!(money(&recon["gross_charges"]), dec(3450));
    assert_eq!(money(&recon["total_advances"]), dec(2500));
    assert_eq!(money(&recon["balance_due"]), dec(950));
    assert_eq!(recon["status"], "PAYMENT_DUE");
    assert_eq!(money(&recon["advances_by_mode"]["UPI"]), dec(1000));
    assert_eq!(money(&recon["advances_by_mode"]["Cash"]), dec(1500));
}

#[tokio::test]
async fn workflow_summary_breaks_advances_down_by_scenario() {
    let app = setup_app().await;
    let folio_no = seed_stay(&app, "Kabir Shah", "102", 1000).await;

    let (status, _) = post(
        &app,
        "/api/v1/payment-workflow/advances/post-checkin",
        json!({ "folio_no": folio_no, "payment_mode": "card", "amount": 1500 }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = get(
        &app,
        &format!("/api/v1/payment-workflow/folio/{}/summary", encode(&folio_no)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(money(&body["total_advances"]), dec(2500));
    assert_eq!(body["advance_count"], 2);
    assert_eq!(money(&body["advances_by_scenario"]["PRE_CHECKIN"]), dec(1000));
    assert_eq!(money(&body["advances_by_scenario"]["POST_CHECKIN"]), dec(1500));
}

#[tokio::test]
async fn final_bill_freezes_the_folio_and_settlements_close_it() {
    let app = setup_app().await;
    let folio_no = seed_stay(&app, "Devika Rao", "103", 1000).await;
    post_charge(&app, &folio_no, "ROOM_RENT", 3000).await;
    let encoded = encode(&folio_no);

    let (status, body) = post(
        &app,
        &format!("/api/v1/billing/folio/{encoded}/final-bill"),
        json!({}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let bill = &body["bill"];
    assert!(bill["bill_no"].as_str().unwrap().starts_with("BIL/"));
    assert_eq!(money(&bill["gross_amount"]), dec(3000));
    assert_eq!(money(&bill["advance_adjusted"]), dec(1000));
    assert_eq!(money(&bill["balance_due"]), dec(2000));
    assert_eq!(bill["is_settled"], false);

    // Each folio gets at most one bill.
    let (status, body) = post(
        &app,
        &format!("/api/v1/billing/folio/{encoded}/final-bill"),
        json!({}),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "billing_conflict");

    let (status, _) = post(
        &app,
        "/api/v1/billing/settlements",
        json!({ "folio_no": folio_no, "payment_mode": "card", "amount": 1200 }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = get(&app, &format!("/api/v1/billing/folio/{encoded}/bill")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["bill"]["is_settled"], false);

    let (status, _) = post(
        &app,
        "/api/v1/billing/settlements",
        json!({ "folio_no": folio_no, "payment_mode": "cash", "amount": 800 }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = get(&app, &format!("/api/v1/billing/folio/{encoded}/bill")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["bill"]["is_settled"], true);

    let (status, body) = get(
        &app,
        &format!("/api/v1/billing/folio/{encoded}/settlements"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["settlements"].as_array().unwrap().len(), 2);

    // A settled bill takes no more money.
    let (status, _) = post(
        &app,
        "/api/v1/billing/settlements",
        json!({ "folio_no": folio_no, "payment_mode": "cash", "amount": 1 }),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn cancelled_charges_drop_out_of_the_summary() {
    let app = setup_app().await;
    let folio_no = seed_stay(&app, "Nisha Patel", "104", 0).await;
    post_charge(&app, &folio_no, "ROOM_RENT", 2000).await;
    let minibar = post_charge(&app, &folio_no, "MINIBAR", 600).await;

    let id = minibar["id"].as_i64().unwrap();
    let (status, _) = post(&app, &format!("/api/v1/post-transactions/{id}/cancel"), json!({})).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = get(
        &app,
        &format!("/api/v1/billing/folio/{}/summary", encode(&folio_no)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        money(&body["statement"]["reconciliation"]["gross_charges"]),
        dec(2000)
    );
}

#[tokio::test]
async fn walk_in_advance_mints_a_folio() {
    let app = setup_app().await;

    let (status, body) = post(
        &app,
        "/api/v1/payment-workflow/advances/walk-in",
        json!({
            "guest_name": "Walkin Guest",
            "payment_mode": "cash",
            "amount": 750,
        }),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["scenario"], "WALK_IN");
    let advance = &body["advance"];
    assert!(advance["folio_no"].as_str().unwrap().starts_with("WI"));
    assert!(advance["reservation_no"].is_null());
    // The mode is normalized to its canonical label.
    assert_eq!(advance["payment_mode"], "Cash");
}

#[tokio::test]
async fn advance_validation_maps_to_bad_request() {
    let app = setup_app().await;

    // Neither folio nor reservation reference.
    let (status, body) = post(
        &app,
        "/api/v1/advances",
        json!({ "guest_name": "Nobody", "payment_mode": "cash", "amount": 100 }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_advance");

    // Unknown payment mode.
    let (status, _) = post(
        &app,
        "/api/v1/payment-workflow/advances/walk-in",
        json!({ "guest_name": "Nobody", "payment_mode": "bitcoin", "amount": 100 }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Non-positive amount.
    let (status, _) = post(
        &app,
        "/api/v1/payment-workflow/advances/walk-in",
        json!({ "guest_name": "Nobody", "payment_mode": "cash", "amount": 0 }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn advance_against_an_unknown_folio_is_not_found() {
    let app = setup_app().await;

    let (status, body) = post(
        &app,
        "/api/v1/advances",
        json!({
            "folio_no": "FOL/209901/0042",
            "guest_name": "Nobody",
            "payment_mode": "cash",
            "amount": 100,
        }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
}

#[tokio::test]
async fn summaries_for_unknown_folios_return_not_found() {
    let app = setup_app().await;

    let (status, _) = get(&app, "/api/v1/billing/folio/FOL%2F209901%2F9999/summary").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = get(&app, "/api/v1/billing/folio/FOL%2F209901%2F9999/bill").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
