//! Seed script for development: populates a fresh database with sample data
//! for every admin list page.
//!
//! Usage: `cargo run --bin seed`
//!
//! Requires the `DATABASE_URL` environment variable (reads .env).

use chrono::{Duration, NaiveDate, Utc};
use sqlx::PgPool;

const MENU: &[&str] = &[
    "Jollof Rice",
    "Fried Plantain",
    "Suya Platter",
    "Egusi Soup",
    "Chin Chin",
    "Puff Puff",
];

const NAMES: &[&str] = &[
    "Adaeze Okafor",
    "Tunde Bakare",
    "Ifeoma Nwosu",
    "Segun Adeyemi",
    "Zainab Musa",
    "Kelechi Obi",
    "Funmi Alade",
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let db_url = std::env::var("DATABASE_URL")?;
    let pool = caterdesk::db::create_pool(&db_url, 5).await?;

    caterdesk::db::run_migrations(&pool).await?;

    println!("=== caterdesk Seed Script ===");

    seed_blog_posts(&pool).await?;
    seed_catering_requests(&pool).await?;
    seed_feedback(&pool).await?;
    seed_customers_and_orders(&pool).await?;
    seed_reviews(&pool).await?;

    println!("\n=== Seed complete! ===");
    Ok(())
}

async fn table_count(pool: &PgPool, table: &str) -> anyhow::Result<i64> {
    let count = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await?;
    Ok(count)
}

fn email_for(name: &str) -> String {
    format!("{}@example.com", name.to_lowercase().replace(' ', "."))
}

async fn seed_blog_posts(pool: &PgPool) -> anyhow::Result<()> {
    let count = table_count(pool, "blog_posts").await?;
    if count > 0 {
        println!("[skip] Blog posts already exist ({count})");
        return Ok(());
    }

    let categories = ["recipes", "events", "news"];
    for n in 0..50 {
        let dish = MENU[n % MENU.len()];
        let status = match n % 5 {
            0 => "draft",
            4 => "archived",
            _ => "published",
        };
        let created_at = Utc::now() - Duration::days(n as i64 * 3);
        sqlx::query(
            "INSERT INTO blog_posts (title, slug, category, author, content, status, published_at, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(format!("{dish} notes #{n}"))
        .bind(format!("{}-notes-{n}", dish.to_lowercase().replace(' ', "-")))
        .bind(categories[n % categories.len()])
        .bind(NAMES[n % NAMES.len()])
        .bind(format!("How our kitchen prepares {dish} for large events."))
        .bind(status)
        .bind((status == "published").then_some(created_at))
        .bind(created_at)
        .execute(pool)
        .await?;
    }

    println!("[done] Created 50 blog posts");
    Ok(())
}

async fn seed_catering_requests(pool: &PgPool) -> anyhow::Result<()> {
    let count = table_count(pool, "catering_requests").await?;
    if count > 0 {
        println!("[skip] Catering requests already exist ({count})");
        return Ok(());
    }

    let statuses = ["pending", "quoted", "confirmed", "completed", "cancelled"];
    let event_types = ["wedding", "corporate", "birthday", "funeral"];
    let today = Utc::now().date_naive();
    for n in 0..23 {
        let name = NAMES[n % NAMES.len()];
        let event_date: NaiveDate = today + Duration::days(n as i64 * 4 - 20);
        sqlx::query(
            "INSERT INTO catering_requests (contact_name, email, phone, event_type, event_date, guest_count, status)
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(name)
        .bind(email_for(name))
        .bind(format!("+234 80{n:02} 555 0{n:03}"))
        .bind(event_types[n % event_types.len()])
        .bind(event_date)
        .bind(40 + (n as i32) * 15)
        .bind(statuses[n % statuses.len()])
        .execute(pool)
        .await?;
    }

    println!("[done] Created 23 catering requests");
    Ok(())
}

async fn seed_feedback(pool: &PgPool) -> anyhow::Result<()> {
    let count = table_count(pool, "feedback").await?;
    if count > 0 {
        println!("[skip] Feedback already exists ({count})");
        return Ok(());
    }

    let messages = [
        "The jollof was perfect for our office lunch",
        "Delivery arrived 40 minutes late",
        "Portions were generous, will order again",
        "Please add more vegetarian options",
    ];
    for (n, message) in messages.iter().cycle().take(16).enumerate() {
        let name = NAMES[n % NAMES.len()];
        sqlx::query(
            "INSERT INTO feedback (name, email, rating, message, status)
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(name)
        .bind(email_for(name))
        .bind((n % 5) as i32 + 1)
        .bind(*message)
        .bind(if n % 3 == 0 { "new" } else { "read" })
        .execute(pool)
        .await?;
    }

    println!("[done] Created 16 feedback messages");
    Ok(())
}

async fn seed_customers_and_orders(pool: &PgPool) -> anyhow::Result<()> {
    let count = table_count(pool, "customers").await?;
    if count > 0 {
        println!("[skip] Customers already exist ({count})");
        return Ok(());
    }

    let mut order_number: i32 = 1;
    for (i, name) in NAMES.iter().enumerate() {
        let orders = (i % 4) as i32 + 1;
        let customer_id: uuid::Uuid = sqlx::query_scalar(
            "INSERT INTO customers (full_name, email, phone, status, order_count)
             VALUES ($1, $2, $3, $4, $5) RETURNING id",
        )
        .bind(*name)
        .bind(email_for(name))
        .bind(format!("+234 81{i} 000 1234"))
        .bind(if i == 5 { "suspended" } else { "active" })
        .bind(orders)
        .fetch_one(pool)
        .await?;

        for j in 0..orders {
            sqlx::query(
                "INSERT INTO orders (order_number, customer_id, customer_name, customer_email,
                 total_amount_minor, status, payment_status, created_at)
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
            )
            .bind(format!("ORD-{order_number:05}"))
            .bind(customer_id)
            .bind(*name)
            .bind(email_for(name))
            .bind(850_000_i64 + i64::from(j) * 125_000)
            .bind(if j == 0 { "delivered" } else { "pending" })
            .bind(if j == 0 { "paid" } else { "unpaid" })
            .bind(Utc::now() - Duration::hours(i64::from(order_number) * 7))
            .execute(pool)
            .await?;
            order_number += 1;
        }
    }

    println!(
        "[done] Created {} customers and {} orders",
        NAMES.len(),
        order_number - 1
    );
    Ok(())
}

async fn seed_reviews(pool: &PgPool) -> anyhow::Result<()> {
    let count = table_count(pool, "reviews").await?;
    if count > 0 {
        println!("[skip] Reviews already exist ({count})");
        return Ok(());
    }

    for n in 0..12 {
        sqlx::query(
            "INSERT INTO reviews (customer_name, menu_item, rating, comment, status)
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(NAMES[n % NAMES.len()])
        .bind(MENU[n % MENU.len()])
        .bind((n % 5) as i32 + 1)
        .bind(format!("Tried the {} at a party", MENU[n % MENU.len()]))
        .bind(["pending", "approved", "rejected"][n % 3])
        .execute(pool)
        .await?;
    }

    println!("[done] Created 12 reviews");
    Ok(())
}
