//! # Seed Data Loader
//!
//! Loads the demo catalog (two products, two coupons) into a database.
//!
//! ## Usage
//! ```bash
//! # Seed ./till_dev.db
//! cargo run -p till-db --bin till-seed
//!
//! # Specify database path
//! cargo run -p till-db --bin till-seed -- --db ./data/till.db
//! ```
//!
//! Existing rows are left alone: a product or coupon that is already
//! present is reported and skipped.

use std::env;

use till_core::memory::{demo_coupons, demo_products};
use till_db::{Database, DbConfig, DbError};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./till_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Till Checkout Seed Loader");
                println!();
                println!("Usage: till-seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./till_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            other => {
                eprintln!("Ignoring unknown argument: {}", other);
            }
        }
        i += 1;
    }

    println!("Till Checkout Seed Loader");
    println!("=========================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;
    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let products = db.products();
    for product in demo_products() {
        match products.insert(&product).await {
            Ok(()) => println!("  + product {} ({})", product.id, product.description),
            Err(DbError::UniqueViolation { .. }) => {
                println!("  = product {} already present", product.id)
            }
            Err(e) => return Err(e.into()),
        }
    }

    let coupons = db.coupons();
    for coupon in demo_coupons() {
        match coupons.insert(&coupon).await {
            Ok(()) => println!(
                "  + coupon {} ({}% until {})",
                coupon.code, coupon.percentage, coupon.expires_at
            ),
            Err(DbError::UniqueViolation { .. }) => {
                println!("  = coupon {} already present", coupon.code)
            }
            Err(e) => return Err(e.into()),
        }
    }

    println!();
    println!(
        "✓ Seed complete: {} products, {} coupons",
        products.count().await?,
        coupons.count().await?
    );

    db.close().await;
    Ok(())
}
