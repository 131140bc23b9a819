//! Reservation lifecycle against in-memory SQLite.

mod common;

use chrono::Datelike;
use rust_decimal::Decimal;

use innkeep_db::repositories::{
    ReservationError, ReservationFilter, ReservationRepository, UpdateReservationInput,
};
use innkeep_db::entities::sea_orm_active_enums::ReservationStatus;
use innkeep_shared::types::PageRequest;

use common::{reservation_input, setup_db, today};

#[tokio::test]
async fn create_assigns_monthly_sequence_numbers() {
    let db = setup_db().await;
    let repo = ReservationRepository::new(db);

    let first = repo
        .create_reservation(reservation_input("Asha Rao"))
        .await
        .unwrap();
    let second = repo
        .create_reservation(reservation_input("Vikram Shah"))
        .await
        .unwrap();

    let prefix = format!("RES/{:04}{:02}/", today().year(), today().month());
    assert_eq!(first.reservation_no, format!("{prefix}0001"));
    assert_eq!(second.reservation_no, format!("{prefix}0002"));
    assert_eq!(first.status, ReservationStatus::Booked);
    assert!(!first.is_checkin_done);
}

#[tokio::test]
async fn rejects_inverted_stay_dates() {
    let db = setup_db().await;
    let repo = ReservationRepository::new(db);

    let mut input = reservation_input("Asha Rao");
    input.to_date = input.from_date - chrono::Days::new(1);

    let err = repo.create_reservation(input).await.unwrap_err();
    assert!(matches!(err, ReservationError::InvalidStayDates { .. }));
}

#[tokio::test]
async fn get_by_number_and_update() {
    let db = setup_db().await;
    let repo = ReservationRepository::new(db);

    let created = repo
        .create_reservation(reservation_input("Asha Rao"))
        .await
        .unwrap();

    let fetched = repo
        .get_by_reservation_no(&created.reservation_no)
        .await
        .unwrap();
    assert_eq!(fetched.id, created.id);

    let updated = repo
        .update_reservation(
            created.id,
            UpdateReservationInput {
                no_of_rooms: Some(2),
                total_amount: Some(Decimal::from(10000)),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.no_of_rooms, 2);
    assert_eq!(updated.total_amount, Some(Decimal::from(10000)));
    assert_eq!(updated.guest_name, "Asha Rao");
}

#[tokio::test]
async fn cancel_marks_status_and_blocks_update() {
    let db = setup_db().await;
    let repo = ReservationRepository::new(db);

    let created = repo
        .create_reservation(reservation_input("Asha Rao"))
        .await
        .unwrap();

    let cancelled = repo.cancel_reservation(created.id).await.unwrap();
    assert_eq!(cancelled.status, ReservationStatus::Cancelled);

    let err = repo
        .update_reservation(created.id, UpdateReservationInput::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ReservationError::Cancelled(_)));
}

#[tokio::test]
async fn list_filters_by_status_and_guest() {
    let db = setup_db().await;
    let repo = ReservationRepository::new(db);

    let kept = repo
        .create_reservation(reservation_input("Asha Rao"))
        .await
        .unwrap();
    let dropped = repo
        .create_reservation(reservation_input("Vikram Shah"))
        .await
        .unwrap();
    repo.cancel_reservation(dropped.id).await.unwrap();

    let booked = repo
        .list_reservations(
            ReservationFilter {
                status: Some(ReservationStatus::Booked),
                ..Default::default()
            },
            &PageRequest::default(),
        )
        .await
        .unwrap();
    assert_eq!(booked.data.len(), 1);
    assert_eq!(booked.data[0].id, kept.id);
    assert_eq!(booked.meta.total, 1);

    let by_name = repo
        .list_reservations(
            ReservationFilter {
                guest_name: Some("Vikram".to_string()),
                ..Default::default()
            },
            &PageRequest::default(),
        )
        .await
        .unwrap();
    assert_eq!(by_name.data.len(), 1);
    assert_eq!(by_name.data[0].id, dropped.id);
}

#[tokio::test]
async fn list_pages_through_results() {
    let db = setup_db().await;
    let repo = ReservationRepository::new(db);

    for i in 0..5 {
        repo.create_reservation(reservation_input(&format!("Guest {i}")))
            .await
            .unwrap();
    }

    let page = PageRequest { page: 2, per_page: 2 };
    let listed = repo
        .list_reservations(ReservationFilter::default(), &page)
        .await
        .unwrap();

    assert_eq!(listed.data.len(), 2);
    assert_eq!(listed.meta.total, 5);
    assert_eq!(listed.meta.total_pages, 3);
    assert_eq!(listed.meta.page, 2);
}

#[tokio::test]
async fn arrivals_lists_todays_booked_guests() {
    let db = setup_db().await;
    let repo = ReservationRepository::new(db);

    repo.create_reservation(reservation_input("Asha Rao"))
        .await
        .unwrap();

    let mut later = reservation_input("Vikram Shah");
    later.from_date = today() + chrono::Days::new(5);
    later.to_date = today() + chrono::Days::new(7);
    repo.create_reservation(later).await.unwrap();

    let arrivals = repo.list_arrivals(today()).await.unwrap();
    assert_eq!(arrivals.len(), 1);
    assert_eq!(arrivals[0].guest_name, "Asha Rao");
}

#[tokio::test]
async fn missing_reservation_is_not_found() {
    let db = setup_db().await;
    let repo = ReservationRepository::new(db);

    let err = repo.get_reservation(999).await.unwrap_err();
    assert!(matches!(err, ReservationError::NotFound(999)));

    let err = repo.get_by_reservation_no("RES/209901/0001").await.unwrap_err();
    assert!(matches!(err, ReservationError::NotFoundByNo(_)));
}
