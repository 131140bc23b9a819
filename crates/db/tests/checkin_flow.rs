//! Check-in and checkout lifecycle against in-memory SQLite.

mod common;

use chrono::Datelike;
use rust_decimal::Decimal;

use innkeep_db::entities::sea_orm_active_enums::{
    CheckinStatus, ReservationStatus, RoomStatus,
};
use innkeep_db::repositories::{
    CheckinError, CheckinRepository, ReservationRepository, RoomRepository,
};

use common::{checkin_input, seed_reservation, seed_room, setup_db, today};

#[tokio::test]
async fn walk_up_checkin_opens_folio_and_occupies_room() {
    let db = setup_db().await;
    seed_room(&db, "101").await;
    let repo = CheckinRepository::new(db.clone());

    let checkin = repo
        .create_checkin(checkin_input("Asha Rao", "101"))
        .await
        .unwrap();

    let prefix = format!("FOL/{:04}{:02}/", today().year(), today().month());
    assert_eq!(checkin.folio_no, format!("{prefix}0001"));
    assert_eq!(checkin.status, CheckinStatus::CheckedIn);
    // Rate falls back to the room's rate.
    assert_eq!(checkin.rate, Some(Decimal::from(2500)));

    let room = RoomRepository::new(db).get_by_room_no("101").await.unwrap();
    assert_eq!(room.status, RoomStatus::Occupied);
    assert_eq!(room.current_folio, Some(checkin.folio_no));
}

#[tokio::test]
async fn occupied_room_rejects_second_checkin() {
    let db = setup_db().await;
    seed_room(&db, "101").await;
    let repo = CheckinRepository::new(db);

    repo.create_checkin(checkin_input("Asha Rao", "101"))
        .await
        .unwrap();

    let err = repo
        .create_checkin(checkin_input("Vikram Shah", "101"))
        .await
        .unwrap_err();
    assert!(matches!(err, CheckinError::RoomNotAvailable(_)));
}

#[tokio::test]
async fn unknown_room_rejects_checkin() {
    let db = setup_db().await;
    let repo = CheckinRepository::new(db);

    let err = repo
        .create_checkin(checkin_input("Asha Rao", "404"))
        .await
        .unwrap_err();
    assert!(matches!(err, CheckinError::RoomNotFound(_)));
}

#[tokio::test]
async fn checkin_from_reservation_links_and_claims_it() {
    let db = setup_db().await;
    seed_room(&db, "101").await;
    let reservation_no = seed_reservation(&db, "Asha Rao").await;
    let repo = CheckinRepository::new(db.clone());

    let checkin = repo
        .create_from_reservation(&reservation_no, Some("101".to_string()), None)
        .await
        .unwrap();
    assert_eq!(checkin.reservation_no, Some(reservation_no.clone()));
    assert_eq!(checkin.guest_name, "Asha Rao");

    let reservation = ReservationRepository::new(db)
        .get_by_reservation_no(&reservation_no)
        .await
        .unwrap();
    assert_eq!(reservation.status, ReservationStatus::CheckedIn);
    assert!(reservation.is_checkin_done);

    // A second check-in against the same reservation must fail.
    let err = repo
        .create_from_reservation(&reservation_no, Some("101".to_string()), None)
        .await
        .unwrap_err();
    assert!(matches!(err, CheckinError::ReservationAlreadyUsed(_)));
}

#[tokio::test]
async fn reservation_checkin_needs_a_room() {
    let db = setup_db().await;
    let reservation_no = seed_reservation(&db, "Asha Rao").await;
    let repo = CheckinRepository::new(db);

    let err = repo
        .create_from_reservation(&reservation_no, None, None)
        .await
        .unwrap_err();
    assert!(matches!(err, CheckinError::NoRoomAssigned(_)));
}

#[tokio::test]
async fn checkout_closes_folio_and_releases_room_dirty() {
    let db = setup_db().await;
    seed_room(&db, "101").await;
    let repo = CheckinRepository::new(db.clone());

    let checkin = repo
        .create_checkin(checkin_input("Asha Rao", "101"))
        .await
        .unwrap();

    let out = repo.checkout(&checkin.folio_no).await.unwrap();
    assert_eq!(out.status, CheckinStatus::CheckedOut);
    assert_eq!(out.check_out_date, Some(today()));

    let room = RoomRepository::new(db).get_by_room_no("101").await.unwrap();
    assert_eq!(room.status, RoomStatus::Dirty);
    assert_eq!(room.current_folio, None);

    let err = repo.checkout(&checkin.folio_no).await.unwrap_err();
    assert!(matches!(err, CheckinError::AlreadyCheckedOut(_)));
}

#[tokio::test]
async fn active_and_due_today_lists() {
    let db = setup_db().await;
    seed_room(&db, "101").await;
    seed_room(&db, "102").await;
    let repo = CheckinRepository::new(db);

    let mut due_today = checkin_input("Asha Rao", "101");
    due_today.check_out_date = Some(today());
    repo.create_checkin(due_today).await.unwrap();

    let staying = repo
        .create_checkin(checkin_input("Vikram Shah", "102"))
        .await
        .unwrap();

    let active = repo.list_active().await.unwrap();
    assert_eq!(active.len(), 2);

    let due = repo.list_due_on(today()).await.unwrap();
    assert_eq!(due.len(), 1);
    assert_eq!(due[0].guest_name, "Asha Rao");

    // Checked-out folios drop off both lists.
    repo.checkout(&staying.folio_no).await.unwrap();
    let active = repo.list_active().await.unwrap();
    assert_eq!(active.len(), 1);
}

#[tokio::test]
async fn folio_lookup_round_trips() {
    let db = setup_db().await;
    seed_room(&db, "101").await;
    let repo = CheckinRepository::new(db);

    let checkin = repo
        .create_checkin(checkin_input("Asha Rao", "101"))
        .await
        .unwrap();

    let by_folio = repo.get_by_folio_no(&checkin.folio_no).await.unwrap();
    assert_eq!(by_folio.id, checkin.id);

    let err = repo.get_by_folio_no("FOL/209901/0001").await.unwrap_err();
    assert!(matches!(err, CheckinError::FolioNotFound(_)));
}
