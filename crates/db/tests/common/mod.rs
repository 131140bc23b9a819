//! Shared setup for repository integration tests.
//!
//! Tests run against in-memory SQLite with the full migration applied.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;

use innkeep_db::migration::Migrator;
use innkeep_db::repositories::{
    CheckinRepository, CreateCheckinInput, CreateReservationInput, CreateRoomInput,
    ReservationRepository, RoomRepository,
};

pub async fn setup_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("failed to open sqlite");
    Migrator::up(&db, None).await.expect("migration failed");
    db
}

pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

pub async fn seed_room(db: &DatabaseConnection, room_no: &str) {
    RoomRepository::new(db.clone())
        .create_room(CreateRoomInput {
            room_no: room_no.to_string(),
            floor: 1,
            room_type: "DELUXE".to_string(),
            rate: Decimal::from(2500),
            max_occupancy: 2,
            description: None,
        })
        .await
        .expect("failed to seed room");
}

pub fn reservation_input(guest_name: &str) -> CreateReservationInput {
    CreateReservationInput {
        guest_name: guest_name.to_string(),
        contact_no: Some("9876543210".to_string()),
        email: None,
        from_date: today(),
        to_date: today() + chrono::Days::new(2),
        no_of_rooms: 1,
        total_pax: Some(2),
        rate: Some(Decimal::from(2500)),
        tax: None,
        is_tax_inclusive: false,
        total_amount: Some(Decimal::from(5000)),
        selected_room: None,
        remarks: None,
        user_id: None,
    }
}

pub fn checkin_input(guest_name: &str, room_no: &str) -> CreateCheckinInput {
    CreateCheckinInput {
        guest_name: guest_name.to_string(),
        contact_no: None,
        email: None,
        check_in_date: today(),
        check_out_date: Some(today() + chrono::Days::new(2)),
        room_no: room_no.to_string(),
        rate: None,
        no_of_persons: Some(2),
        reservation_no: None,
        remarks: None,
        user_id: None,
    }
}

/// Checks a walk-up guest into `room_no`, returning the folio number.
pub async fn seed_checkin(db: &DatabaseConnection, guest_name: &str, room_no: &str) -> String {
    seed_room(db, room_no).await;
    let checkin = CheckinRepository::new(db.clone())
        .create_checkin(checkin_input(guest_name, room_no))
        .await
        .expect("failed to seed checkin");
    checkin.folio_no
}

/// Books a reservation for `guest_name`, returning the reservation number.
pub async fn seed_reservation(db: &DatabaseConnection, guest_name: &str) -> String {
    let reservation = ReservationRepository::new(db.clone())
        .create_reservation(reservation_input(guest_name))
        .await
        .expect("failed to seed reservation");
    reservation.reservation_no
}
