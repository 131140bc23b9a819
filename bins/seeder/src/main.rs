//! Database seeder for Innkeep development and testing.
//!
//! Seeds the room inventory, a default admin account, and a small vendor
//! directory for local development and testing purposes.
//!
//! Usage: cargo run --bin seeder

use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;

use innkeep_db::entities::sea_orm_active_enums::UserRole;
use innkeep_db::repositories::{
    CreateRoomInput, CreateVendorInput, RegisterUserInput, RoomError, RoomRepository, UserError,
    UserRepository, VendorRepository,
};

/// Default admin credentials for a fresh development database.
const ADMIN_USERNAME: &str = "admin";
const ADMIN_PASSWORD: &str = "admin123";

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    println!("Connecting to database...");
    let db = innkeep_db::connect(&database_url)
        .await
        .expect("Failed to connect to database");

    println!("Seeding admin account...");
    seed_admin(&db).await;

    println!("Seeding rooms...");
    seed_rooms(&db).await;

    println!("Seeding vendors...");
    seed_vendors(&db).await;

    println!("Seeding complete!");
}

/// Seeds the default admin account for development.
async fn seed_admin(db: &DatabaseConnection) {
    let repo = UserRepository::new(db.clone());

    let input = RegisterUserInput {
        username: ADMIN_USERNAME.to_string(),
        email: "admin@innkeep.dev".to_string(),
        password: ADMIN_PASSWORD.to_string(),
        full_name: Some("Administrator".to_string()),
        role: UserRole::Admin,
    };

    match repo.register(input).await {
        Ok(user) => println!("  Created admin account: {}", user.username),
        Err(UserError::DuplicateUsername(_) | UserError::DuplicateEmail(_)) => {
            println!("  Admin account already exists, skipping...");
        }
        Err(e) => eprintln!("Failed to seed admin account: {e}"),
    }
}

/// Seeds three floors of rooms across the standard room types.
async fn seed_rooms(db: &DatabaseConnection) {
    let repo = RoomRepository::new(db.clone());

    // (floor, room type, nightly rate, max occupancy)
    let floors = [
        (1, "STANDARD", 1500, 2),
        (2, "DELUXE", 2500, 3),
        (3, "SUITE", 4500, 4),
    ];

    let mut inserted = 0;
    for (floor, room_type, rate, max_occupancy) in floors {
        for unit in 1..=10 {
            let room_no = format!("{floor}{unit:02}");
            let input = CreateRoomInput {
                room_no: room_no.clone(),
                floor,
                room_type: room_type.to_string(),
                rate: Decimal::from(rate),
                max_occupancy,
                description: None,
            };

            match repo.create_room(input).await {
                Ok(_) => inserted += 1,
                Err(RoomError::DuplicateRoomNo(_)) => {}
                Err(e) => eprintln!("Failed to seed room {room_no}: {e}"),
            }
        }
    }

    println!("  Inserted {inserted} rooms");
}

/// Seeds a small vendor directory for the maintenance module.
async fn seed_vendors(db: &DatabaseConnection) {
    let repo = VendorRepository::new(db.clone());

    let existing = match repo.list_vendors(None).await {
        Ok(vendors) => vendors,
        Err(e) => {
            eprintln!("Failed to list vendors: {e}");
            return;
        }
    };
    if !existing.is_empty() {
        println!("  Vendors already exist, skipping...");
        return;
    }

    let vendors = [
        ("AquaFix Plumbing", "PLUMBING", "Suresh Kumar"),
        ("BrightSpark Electricals", "ELECTRICAL", "Anita Desai"),
        ("CoolBreeze HVAC", "HVAC", "Ravi Menon"),
        ("FreshFold Laundry", "LAUNDRY", "Priya Sharma"),
    ];

    let mut inserted = 0;
    for (name, service_type, contact_person) in vendors {
        let input = CreateVendorInput {
            name: name.to_string(),
            service_type: service_type.to_string(),
            contact_person: Some(contact_person.to_string()),
            contact_no: None,
            email: None,
            address: None,
        };

        match repo.create_vendor(input).await {
            Ok(_) => inserted += 1,
            Err(e) => eprintln!("Failed to seed vendor {name}: {e}"),
        }
    }

    println!("  Inserted {inserted} vendors");
}
