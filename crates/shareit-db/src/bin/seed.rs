//! # Seed Data Generator
//!
//! Populates the database with users, items and a few waiting bookings for
//! manual testing of the API.
//!
//! ## Usage
//! ```bash
//! # 10 users (default)
//! cargo run -p shareit-db --bin seed
//!
//! # Custom amount and database path
//! cargo run -p shareit-db --bin seed -- --users 50 --db ./data/shareit.db
//! ```
//!
//! Each user owns three items (the third one unavailable) and requests a
//! booking on the first item of the next user, starting tomorrow.

use chrono::Duration;
use shareit_core::validation::validate_booking_request;
use shareit_core::{Clock, NewBooking, SystemClock};
use shareit_db::repository::item::NewItem;
use shareit_db::{Database, DbConfig};
use std::env;

const FIRST_NAMES: &[&str] = &[
    "Anna", "Boris", "Dasha", "Egor", "Irina", "Kirill", "Lena", "Maxim", "Nina", "Oleg",
    "Polina", "Roman", "Sveta", "Timur", "Vera",
];

const ITEMS: &[(&str, &str)] = &[
    ("Cordless drill", "18V, two batteries"),
    ("Camping tent", "Sleeps four"),
    ("Road bike", "Size M, lights included"),
    ("Projector", "Full HD with HDMI cable"),
    ("Kayak", "Single seat, paddle included"),
    ("Ladder", "Aluminium, 3 m"),
    ("Pressure washer", "Works with garden hose"),
    ("Snowboard", "156 cm, bindings included"),
    ("Sewing machine", "Basic stitches"),
    ("Board game set", "Catan, Carcassonne, Dixit"),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut users: usize = 10;
    let mut db_path = String::from("./data/shareit.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--users" | "-u" => {
                if i + 1 < args.len() {
                    users = args[i + 1].parse().unwrap_or(10);
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("ShareIt Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -u, --users <N>    Number of users to generate (default: 10)");
                println!("  -d, --db <PATH>    Database file path (default: ./data/shareit.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 ShareIt Seed Data Generator");
    println!("==============================");
    println!("Database: {}", db_path);
    println!("Users:    {}", users);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.users().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} users", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    let started = std::time::Instant::now();

    let mut first_items = Vec::with_capacity(users);
    let mut user_ids = Vec::with_capacity(users);

    for n in 0..users {
        let name = FIRST_NAMES[n % FIRST_NAMES.len()];
        let email = format!("{}{}@shareit.dev", name.to_lowercase(), n);
        let user = db.users().insert(name, &email).await?;

        for k in 0..3 {
            let (item_name, description) = ITEMS[(n * 3 + k) % ITEMS.len()];
            let item = db
                .items()
                .insert(
                    user.id,
                    &NewItem {
                        name: item_name.to_string(),
                        description: description.to_string(),
                        available: k != 2,
                    },
                )
                .await?;

            if k == 0 {
                first_items.push(item);
            }
        }

        user_ids.push(user.id);
    }

    println!("✓ Generated {} users with {} items", users, users * 3);

    let now = SystemClock.now();
    let mut bookings = 0;

    if users > 1 {
        for (n, booker_id) in user_ids.iter().enumerate() {
            let item = &first_items[(n + 1) % users];
            let start = now + Duration::days(1 + n as i64);
            let request = NewBooking {
                item_id: item.id,
                start: Some(start),
                end: Some(start + Duration::days(2)),
            };

            let period = validate_booking_request(*booker_id, &item.snapshot(), &request, now.date())?;
            db.bookings().insert(item.id, *booker_id, &period).await?;
            bookings += 1;
        }
    }

    println!("✓ Generated {} waiting bookings", bookings);
    println!();
    println!("✓ Seed complete in {:?}", started.elapsed());

    Ok(())
}
