//! # Seed Data Generator
//!
//! Loads a demo ice-cream catalog for development.
//!
//! ## Usage
//! ```bash
//! # Catalog only
//! cargo run -p heladeria-db --bin seed
//!
//! # Catalog plus a few sales booked today
//! cargo run -p heladeria-db --bin seed -- --with-sales
//!
//! # Specify database path
//! cargo run -p heladeria-db --bin seed -- --db ./data/heladeria.db
//! ```

use chrono::Utc;
use heladeria_core::Money;
use heladeria_db::{Database, DbConfig, NewSale};
use std::env;

/// Demo catalog: (category, name, price in cents)
const CATALOG: &[(&str, &str, i64)] = &[
    ("Cones", "Vanilla Cone", 250),
    ("Cones", "Chocolate Cone", 250),
    ("Cones", "Strawberry Cone", 275),
    ("Cones", "Dulce de Leche Cone", 300),
    ("Cups", "Small Cup", 300),
    ("Cups", "Medium Cup", 425),
    ("Cups", "Large Cup", 550),
    ("Paletas", "Mango Paleta", 200),
    ("Paletas", "Lime Paleta", 180),
    ("Paletas", "Coconut Paleta", 220),
    ("Specials", "Banana Split", 695),
    ("Specials", "Brownie Sundae", 650),
    ("Specials", "Milkshake", 495),
    ("Toppings", "Sprinkles", 50),
    ("Toppings", "Hot Fudge", 75),
];

/// Demo customers: (name, address, phone)
const CUSTOMERS: &[(&str, Option<&str>, Option<&str>)] = &[
    ("Ana Torres", Some("Calle Luna 12"), Some("555-0101")),
    ("Luis Pérez", None, Some("555-0144")),
    ("Marta Díaz", Some("Av. del Sol 300"), None),
];

/// Demo sales for today: (index into CATALOG, quantity)
const TODAY_SALES: &[(usize, i64)] = &[(0, 3), (4, 1), (10, 2), (13, 4)];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./heladeria_dev.db");
    let mut with_sales = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--with-sales" | "-s" => with_sales = true,
            "--help" | "-h" => {
                println!("Heladería Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./heladeria_dev.db)");
                println!("  -s, --with-sales   Also book a few sales under today's date");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("Heladería Seed Data Generator");
    println!("=============================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;
    println!("✓ Connected to database");

    let existing = db.products().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} products", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        db.close().await;
        return Ok(());
    }

    let mut product_ids = Vec::with_capacity(CATALOG.len());
    for (category, name, cents) in CATALOG {
        let product = db
            .products()
            .insert(name, Some(category), Money::from_cents(*cents))
            .await?;
        product_ids.push(product.id);
    }
    println!("✓ Added {} products", product_ids.len());

    for (name, address, phone) in CUSTOMERS {
        db.customers().insert(name, *address, *phone).await?;
    }
    println!("✓ Added {} customers", CUSTOMERS.len());

    if with_sales {
        let today = Utc::now().date_naive();

        for (index, quantity) in TODAY_SALES {
            let Some(product_id) = product_ids.get(*index) else {
                continue;
            };
            db.sales()
                .record_sale(&NewSale::new(*product_id, *quantity, today))
                .await?;
        }

        let total = db.sales().daily_total(today).await?;
        println!("✓ Booked {} sales for {} ({})", TODAY_SALES.len(), today, total);
    }

    db.close().await;

    println!();
    println!("✓ Seed complete!");

    Ok(())
}
