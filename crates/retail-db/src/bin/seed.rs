//! # Seed Data Generator
//!
//! Populates the database with sample users, stores and products. The
//! terminal can only register customers, so managers and the admin have to
//! come from somewhere.
//!
//! ## Usage
//! ```bash
//! # Seed a local SQLite file (default)
//! cargo run -p retail-db --bin seed
//!
//! # Seed PostgreSQL
//! cargo run -p retail-db --bin seed -- --db postgres://me@localhost:5432/shop
//!
//! # More stores per manager
//! cargo run -p retail-db --bin seed -- --stores 4
//! ```
//!
//! ## Generated Data
//! - One admin (`admin` / `admin`)
//! - Managers `manager1..3` (password `manager`), each with their own stores
//! - Customers `customer1..5` (password `customer`)
//! - Every store stocks the same catalogue with varying units and prices

use std::env;

use anyhow::{bail, Context};
use retail_core::{NewStore, NewUser, Point, Product, UserRole};
use retail_db::migrations::migration_status;
use retail_db::{Database, DbConfig};

/// Catalogue every store carries: (name, base price).
const CATALOGUE: &[(&str, i32)] = &[
    ("Widget", 5),
    ("Gadget", 20),
    ("Gizmo", 100),
    ("Sprocket", 3),
    ("Doohickey", 12),
    ("Thingamajig", 45),
    ("Whatsit", 8),
    ("Contraption", 250),
];

/// Manager home locations. Stores are placed around them.
const MANAGERS: &[(&str, f64, f64)] = &[
    ("manager1", 10.0, 10.0),
    ("manager2", 50.0, 50.0),
    ("manager3", 85.0, 20.0),
];

/// Customer home locations.
const CUSTOMERS: &[(&str, f64, f64)] = &[
    ("customer1", 12.0, 14.0),
    ("customer2", 48.0, 55.0),
    ("customer3", 80.0, 25.0),
    ("customer4", 30.0, 30.0),
    ("customer5", 95.0, 95.0),
];

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut stores_per_manager: usize = 2;
    let mut db_url = String::from("sqlite://retail_dev.db?mode=rwc");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--stores" | "-s" => {
                if i + 1 < args.len() {
                    stores_per_manager = args[i + 1]
                        .parse()
                        .with_context(|| format!("invalid store count '{}'", args[i + 1]))?;
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_url = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Retail Store Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -s, --stores <N>   Stores per manager (default: 2)");
                println!("  -d, --db <URL>     Database URL (default: sqlite://retail_dev.db?mode=rwc)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            other => bail!("unknown argument '{other}' (try --help)"),
        }
        i += 1;
    }

    println!("🌱 Retail Store Seed Data Generator");
    println!("==================================");
    println!("Stores per manager: {}", stores_per_manager);
    println!();

    let db = Database::new(DbConfig::new(&db_url))
        .await
        .context("could not open the database")?;

    let (total, applied) = migration_status(db.pool(), db.backend()).await?;
    println!("✓ Connected to {}", db.server_version().await?);
    println!("✓ Migrations applied ({applied}/{total})");

    // Check existing data
    let existing = db.stores().list_all().await?.len();
    if existing > 0 {
        println!("⚠ Database already has {} stores", existing);
        println!("  Skipping seed to avoid duplicates.");
        return Ok(());
    }

    println!();
    println!("Creating users...");

    let admin = create_user(&db, "admin", "admin", (50.0, 50.0), UserRole::Admin).await?;
    println!("  admin      #{:<3} (admin/admin)", admin.id);

    let mut managers = Vec::new();
    for (name, lat, lon) in MANAGERS {
        let manager = create_user(&db, name, "manager", (*lat, *lon), UserRole::Manager).await?;
        println!("  manager    #{:<3} ({}/manager)", manager.id, name);
        managers.push(manager);
    }

    for (name, lat, lon) in CUSTOMERS {
        let customer = create_user(&db, name, "customer", (*lat, *lon), UserRole::Customer).await?;
        println!("  customer   #{:<3} ({}/customer)", customer.id, name);
    }

    println!();
    println!("Creating stores and products...");

    let mut seed = 0usize;
    let mut products = 0usize;
    for manager in &managers {
        for n in 0..stores_per_manager {
            seed += 1;

            // Spread stores in a small ring around the manager
            let offset = (n as f64) * 7.0;
            let location = Point::new(
                (manager.location.latitude + offset).min(100.0),
                (manager.location.longitude + offset / 2.0).min(100.0),
            );

            let store = db
                .stores()
                .create(&NewStore {
                    name: format!("{} Store {}", capitalize(&manager.name), n + 1),
                    location,
                    manager_id: Some(manager.id),
                })
                .await?;

            for (idx, (name, base_price)) in CATALOGUE.iter().enumerate() {
                let product = Product {
                    store_id: store.id,
                    name: name.to_string(),
                    units: ((seed * 37 + idx * 13) % 150) as i32,
                    price_per_unit: base_price + ((seed + idx) % 4) as i32,
                };

                if let Err(e) = db.products().create(&product).await {
                    eprintln!("Failed to insert {} for store {}: {}", product.name, store.id, e);
                    continue;
                }
                products += 1;
            }

            println!(
                "  #{:<3} {:<22} ({:>5.1}, {:>5.1})",
                store.id, store.name, store.location.latitude, store.location.longitude
            );
        }
    }

    println!();
    println!("✓ Created {} stores and {} products", managers.len() * stores_per_manager, products);
    println!("✓ Seed complete!");

    db.close().await;
    Ok(())
}

async fn create_user(
    db: &Database,
    name: &str,
    password: &str,
    (latitude, longitude): (f64, f64),
    role: UserRole,
) -> anyhow::Result<retail_core::User> {
    let user = db
        .users()
        .create(&NewUser {
            name: name.to_string(),
            password: password.to_string(),
            location: Point::new(latitude, longitude),
            role,
        })
        .await
        .with_context(|| format!("could not create user '{name}'"))?;

    Ok(user)
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
