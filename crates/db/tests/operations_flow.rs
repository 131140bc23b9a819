//! Housekeeping, maintenance, vendor, and staff account flows.

mod common;

use chrono::Datelike;

use innkeep_db::entities::sea_orm_active_enums::{
    RoomStatus, TaskStatus, TicketPriority, TicketStatus, UserRole,
};
use innkeep_db::repositories::{
    CheckinRepository, CreateTaskInput, CreateTicketInput, CreateVendorInput,
    HousekeepingError, HousekeepingRepository, MaintenanceError, MaintenanceRepository,
    RegisterUserInput, RoomRepository, TaskFilter, TicketFilter, UserError, UserRepository,
    VendorError, VendorRepository,
};

use common::{checkin_input, seed_room, setup_db, today};

fn task_input(room_no: &str) -> CreateTaskInput {
    CreateTaskInput {
        room_no: room_no.to_string(),
        task_type: "CLEANING".to_string(),
        task_date: today(),
        assigned_to: None,
        notes: None,
        user_id: None,
    }
}

fn ticket_input(room_no: &str) -> CreateTicketInput {
    CreateTicketInput {
        room_no: Some(room_no.to_string()),
        area: None,
        description: "AC not cooling".to_string(),
        priority: TicketPriority::High,
        reported_by: Some("Front Desk".to_string()),
        user_id: None,
    }
}

#[tokio::test]
async fn completing_a_cleaning_task_returns_the_room_to_the_pool() {
    let db = setup_db().await;
    seed_room(&db, "101").await;

    // Occupy and check out so the room is dirty.
    let checkins = CheckinRepository::new(db.clone());
    let checkin = checkins
        .create_checkin(checkin_input("Asha Rao", "101"))
        .await
        .unwrap();
    checkins.checkout(&checkin.folio_no).await.unwrap();

    let repo = HousekeepingRepository::new(db.clone());
    let task = repo.create_task(task_input("101")).await.unwrap();
    assert_eq!(task.status, TaskStatus::Pending);

    let task = repo.assign_task(task.id, "Meena".to_string()).await.unwrap();
    assert_eq!(task.status, TaskStatus::InProgress);
    assert_eq!(task.assigned_to, Some("Meena".to_string()));

    let task = repo
        .complete_task(task.id, Some("Done".to_string()))
        .await
        .unwrap();
    assert_eq!(task.status, TaskStatus::Completed);
    assert!(task.completed_at.is_some());

    let room = RoomRepository::new(db).get_by_room_no("101").await.unwrap();
    assert_eq!(room.status, RoomStatus::Vacant);

    let err = repo.complete_task(task.id, None).await.unwrap_err();
    assert!(matches!(err, HousekeepingError::AlreadyCompleted(_)));
}

#[tokio::test]
async fn task_requires_an_existing_room() {
    let db = setup_db().await;
    let repo = HousekeepingRepository::new(db);

    let err = repo.create_task(task_input("404")).await.unwrap_err();
    assert!(matches!(err, HousekeepingError::RoomNotFound(_)));
}

#[tokio::test]
async fn task_list_filters_by_status() {
    let db = setup_db().await;
    seed_room(&db, "101").await;
    seed_room(&db, "102").await;
    let repo = HousekeepingRepository::new(db);

    let first = repo.create_task(task_input("101")).await.unwrap();
    repo.create_task(task_input("102")).await.unwrap();
    repo.complete_task(first.id, None).await.unwrap();

    let pending = repo
        .list_tasks(TaskFilter {
            status: Some(TaskStatus::Pending),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].room_no, "102");
}

#[tokio::test]
async fn ticket_lifecycle_runs_to_completion() {
    let db = setup_db().await;
    seed_room(&db, "101").await;
    let repo = MaintenanceRepository::new(db.clone());

    let ticket = repo.create_ticket(ticket_input("101")).await.unwrap();
    let prefix = format!("MNT/{:04}{:02}/", today().year(), today().month());
    assert_eq!(ticket.ticket_no, format!("{prefix}0001"));
    assert_eq!(ticket.status, TicketStatus::Pending);

    let vendor = VendorRepository::new(db)
        .create_vendor(CreateVendorInput {
            name: "CoolFix".to_string(),
            service_type: "HVAC".to_string(),
            contact_person: None,
            contact_no: None,
            email: None,
            address: None,
        })
        .await
        .unwrap();

    let ticket = repo
        .assign_ticket(ticket.id, None, Some(vendor.id))
        .await
        .unwrap();
    assert_eq!(ticket.status, TicketStatus::Assigned);
    assert_eq!(ticket.vendor_id, Some(vendor.id));

    let ticket = repo.start_ticket(ticket.id).await.unwrap();
    assert_eq!(ticket.status, TicketStatus::InProgress);

    let ticket = repo
        .complete_ticket(ticket.id, Some("Gas refilled".to_string()))
        .await
        .unwrap();
    assert_eq!(ticket.status, TicketStatus::Completed);
    assert!(ticket.resolved_at.is_some());

    let err = repo.start_ticket(ticket.id).await.unwrap_err();
    assert!(matches!(err, MaintenanceError::AlreadyClosed(_)));
}

#[tokio::test]
async fn ticket_assignment_validates_the_vendor() {
    let db = setup_db().await;
    seed_room(&db, "101").await;
    let repo = MaintenanceRepository::new(db);

    let ticket = repo.create_ticket(ticket_input("101")).await.unwrap();
    let err = repo
        .assign_ticket(ticket.id, None, Some(999))
        .await
        .unwrap_err();
    assert!(matches!(err, MaintenanceError::VendorNotFound(999)));
}

#[tokio::test]
async fn ticket_list_filters_by_priority() {
    let db = setup_db().await;
    seed_room(&db, "101").await;
    let repo = MaintenanceRepository::new(db);

    repo.create_ticket(ticket_input("101")).await.unwrap();
    let mut low = ticket_input("101");
    low.priority = TicketPriority::Low;
    low.description = "Squeaky door".to_string();
    repo.create_ticket(low).await.unwrap();

    let high = repo
        .list_tickets(TicketFilter {
            priority: Some(TicketPriority::High),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(high.len(), 1);
    assert_eq!(high[0].description, "AC not cooling");
}

#[tokio::test]
async fn vendor_rating_is_bounded() {
    let db = setup_db().await;
    let repo = VendorRepository::new(db);

    let vendor = repo
        .create_vendor(CreateVendorInput {
            name: "CoolFix".to_string(),
            service_type: "HVAC".to_string(),
            contact_person: None,
            contact_no: None,
            email: None,
            address: None,
        })
        .await
        .unwrap();
    assert_eq!(vendor.rating, None);

    let rated = repo.rate_vendor(vendor.id, 4).await.unwrap();
    assert_eq!(rated.rating, Some(4));

    let err = repo.rate_vendor(vendor.id, 6).await.unwrap_err();
    assert!(matches!(err, VendorError::InvalidRating(6)));
    let err = repo.rate_vendor(vendor.id, 0).await.unwrap_err();
    assert!(matches!(err, VendorError::InvalidRating(0)));
}

#[tokio::test]
async fn register_and_login_round_trip() {
    let db = setup_db().await;
    let repo = UserRepository::new(db);

    let user = repo
        .register(RegisterUserInput {
            username: "frontdesk".to_string(),
            email: "desk@example.com".to_string(),
            password: "correct horse".to_string(),
            full_name: Some("Front Desk".to_string()),
            role: UserRole::Staff,
        })
        .await
        .unwrap();
    assert_ne!(user.password_hash, "correct horse");

    let verified = repo
        .verify_credentials("frontdesk", "correct horse")
        .await
        .unwrap();
    assert_eq!(verified.id, user.id);

    let err = repo
        .verify_credentials("frontdesk", "wrong")
        .await
        .unwrap_err();
    assert!(matches!(err, UserError::InvalidCredentials));

    let err = repo
        .register(RegisterUserInput {
            username: "frontdesk".to_string(),
            email: "other@example.com".to_string(),
            password: "pw".to_string(),
            full_name: None,
            role: UserRole::Staff,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, UserError::DuplicateUsername(_)));
}
