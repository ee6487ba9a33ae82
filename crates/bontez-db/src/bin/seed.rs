//! # Seed Data Generator
//!
//! Populates the database with development data: the supplier brands the
//! shop stocks, the standard product catalog, a handful of clients, and a
//! few sales across every payment method.
//!
//! ## Usage
//! ```bash
//! # Seed the default database file
//! cargo run -p bontez-db --bin seed
//!
//! # Specify database path
//! cargo run -p bontez-db --bin seed -- --db ./data/bontez.db
//! ```

use std::env;

use bontez_core::PaymentMethod;
use bontez_db::repository::accessory::AccessorySaleInput;
use bontez_db::repository::product::NewProduct;
use bontez_db::repository::sale::{NewSale, NewSaleItem};
use bontez_db::{Database, DbConfig};
use chrono::{Duration, Utc};

/// (name, chart color) for each supplier brand.
const SUPPLIERS: &[(&str, &str)] = &[
    ("Top Gas", "red"),
    ("K-Gas", "black"),
    ("Total Gas", "orange"),
    ("Rubis Gas", "green"),
    ("OiLibya Gas", "brown"),
    ("Men Gas", "maroon"),
    ("Hashi Gas", "yellow"),
    ("Hass Gas", "blue"),
];

/// (name, category, price in whole shillings, description, branded)
/// Branded products hang off the first supplier; accessories are unbranded.
const PRODUCTS: &[(&str, &str, i64, &str, bool)] = &[
    (
        "Gas Cylinder 6Kg - New",
        "cylinder_6kg",
        3200,
        "New 6Kg gas cylinder with gas",
        true,
    ),
    (
        "Gas Cylinder 12Kg - New",
        "cylinder_12kg",
        5500,
        "New 12Kg gas cylinder with gas",
        true,
    ),
    (
        "Gas Cylinder 6Kg - Refill",
        "cylinder_6kg_refill",
        1200,
        "6Kg gas cylinder refill/swap",
        true,
    ),
    (
        "Gas Cylinder 12Kg - Refill",
        "cylinder_12kg_refill",
        2600,
        "12Kg gas cylinder refill/swap",
        true,
    ),
    ("Grill", "accessory_grill", 350, "Gas grill", false),
    (
        "Burner (Ksh 300)",
        "accessory_burner",
        300,
        "Gas burner - Standard",
        false,
    ),
    (
        "Burner (Ksh 350)",
        "accessory_burner",
        350,
        "Gas burner - Medium",
        false,
    ),
    (
        "Burner (Ksh 450)",
        "accessory_burner",
        450,
        "Gas burner - Large",
        false,
    ),
    (
        "Burner (Ksh 600)",
        "accessory_burner",
        600,
        "Gas burner - Premium",
        false,
    ),
    (
        "Regulator 6Kg",
        "accessory_regulator",
        500,
        "Gas regulator for 6Kg cylinder",
        false,
    ),
    (
        "Regulator 13Kg",
        "accessory_regulator",
        700,
        "Gas regulator for 13Kg cylinder",
        false,
    ),
    (
        "Hose Pipe 1.5M",
        "accessory_pipe",
        300,
        "Gas hose pipe 1.5 meters",
        false,
    ),
];

/// (name, phone, email, address)
const CLIENTS: &[(&str, &str, &str, &str)] = &[
    (
        "John Kariuki",
        "0712345678",
        "john@example.com",
        "Nairobi, Westlands",
    ),
    (
        "Mary Ochieng",
        "0701234567",
        "mary@example.com",
        "Mombasa, Tudor",
    ),
    (
        "Peter Kamau",
        "0722233445",
        "peter@example.com",
        "Kisumu, Nyalenda",
    ),
    (
        "Alice Wanjiru",
        "0798765432",
        "alice@example.com",
        "Nakuru, Menengai",
    ),
    (
        "Joseph Kipchoge",
        "0756789012",
        "joseph@example.com",
        "Eldoret, Kapsabet",
    ),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./bontez_dev.db");

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
                println!("Bontez Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./bontez_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Bontez Seed Data Generator");
    println!("=============================");
    println!("Database: {}", db_path);
    println!();

    // Connect to database
    let config = DbConfig::new(&db_path);
    let db = Database::new(config).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    // Check existing data
    let existing = db.suppliers().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} suppliers", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    println!();
    println!("Seeding suppliers...");
    let mut supplier_ids = Vec::with_capacity(SUPPLIERS.len());
    for (name, color) in SUPPLIERS {
        let supplier = db.suppliers().create(name, color).await?;
        supplier_ids.push(supplier.id);
    }
    println!("  {} suppliers", supplier_ids.len());

    println!("Seeding products...");
    let mut product_ids = Vec::with_capacity(PRODUCTS.len());
    for (name, category, price_shillings, description, branded) in PRODUCTS {
        let product = db
            .products()
            .create(NewProduct {
                name: name.to_string(),
                supplier_id: branded.then(|| supplier_ids[0]),
                category: category.to_string(),
                price_cents: price_shillings * 100,
                description: Some(description.to_string()),
            })
            .await?;
        product_ids.push(product.id);
    }
    println!("  {} products", product_ids.len());

    println!("Seeding clients...");
    let mut client_ids = Vec::with_capacity(CLIENTS.len());
    for (name, phone, email, address) in CLIENTS {
        let client = db
            .clients()
            .create(name, phone, Some(email), Some(address))
            .await?;
        client_ids.push(client.id);
    }
    println!("  {} clients", client_ids.len());

    println!("Seeding sales...");
    // Cash sale: one new 6Kg cylinder, today
    db.sales()
        .create_sale(NewSale {
            client_id: client_ids[0],
            supplier_id: Some(supplier_ids[0]),
            payment_method: PaymentMethod::Cash,
            mobile_money_code: None,
            items: vec![NewSaleItem {
                product_id: product_ids[0],
                quantity: 1,
            }],
            notes: None,
            num_installments: None,
            sale_date: None,
        })
        .await?;

    // Mobile-money sale: one new 12Kg cylinder, today
    db.sales()
        .create_sale(NewSale {
            client_id: client_ids[1],
            supplier_id: Some(supplier_ids[1]),
            payment_method: PaymentMethod::MobileMoney,
            mobile_money_code: Some("ABC123XYZ".to_string()),
            items: vec![NewSaleItem {
                product_id: product_ids[1],
                quantity: 1,
            }],
            notes: None,
            num_installments: None,
            sale_date: None,
        })
        .await?;

    // Installment sale: 12Kg refill + regulator, five days ago, half paid
    let installment_sale = db
        .sales()
        .create_sale(NewSale {
            client_id: client_ids[2],
            supplier_id: Some(supplier_ids[2]),
            payment_method: PaymentMethod::Installment,
            mobile_money_code: None,
            items: vec![
                NewSaleItem {
                    product_id: product_ids[3],
                    quantity: 2,
                },
                NewSaleItem {
                    product_id: product_ids[10],
                    quantity: 1,
                },
            ],
            notes: Some("3 installments".to_string()),
            num_installments: None,
            sale_date: Some(Utc::now() - Duration::days(5)),
        })
        .await?;
    let half = bontez_core::Money::from_cents(installment_sale.sale.total_cents / 2);
    db.sales()
        .record_payment(installment_sale.sale.id, half)
        .await?;

    println!("  3 sales");

    println!("Seeding today's accessory ledger...");
    db.accessories()
        .create(
            Utc::now().date_naive(),
            AccessorySaleInput {
                grill_quantity: 1,
                grill_total_cents: 35_000,
                burner_450_quantity: 2,
                burner_450_total_cents: 90_000,
                regulator_6kg_quantity: 1,
                regulator_6kg_total_cents: 50_000,
                hose_quantity: 2,
                hose_total_cents: 60_000,
                notes: Some("seeded entry".to_string()),
                ..Default::default()
            },
        )
        .await?;

    println!();
    println!("Verifying reports...");
    let dashboard = db.reports().dashboard().await?;
    println!(
        "  Dashboard: {} clients, revenue {} cents, pending {} cents",
        dashboard.stats.total_clients,
        dashboard.stats.total_revenue_cents,
        dashboard.stats.pending_balance_cents
    );
    let breakdown = db.reports().daily_breakdown(None).await?;
    println!("  Daily breakdown: {} supplier buckets", breakdown.labels.len());

    println!();
    println!("✓ Seed complete!");

    Ok(())
}
