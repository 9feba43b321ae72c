//! Demo data seeding and administrator bootstrap.

use chrono::Utc;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::auth::hash_password;
use crate::config::InstallConfig;
use crate::db::{NewUser, User, UserRepository};
use crate::{Database, DealershipError, Result};

/// Counts of the records inserted by [`seed`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub users: usize,
    pub brands: usize,
    pub models: usize,
    pub cars: usize,
    pub sales: usize,
}

const DEMO_USERS: &[(&str, &str, &str, bool)] = &[
    ("Admin", "admin@example.com", "senhaAdmin", true),
    ("Usuário Comum 1", "usuario1@example.com", "senhaUsuario1", false),
    ("Usuário Comum 2", "usuario2@example.com", "senhaUsuario2", false),
    ("Usuário Comum 3", "usuario3@example.com", "senhaUsuario3", false),
    ("Usuário Comum 4", "usuario4@example.com", "senhaUsuario4", false),
];

const DEMO_BRANDS: &[&str] = &["Toyota", "Honda", "Chevrolet", "Ford", "Volkswagen"];

const DEMO_MODELS: &[&str] = &["Corolla", "Civic", "Cruze", "Focus", "Golf"];

const DEMO_CARS: &[(i32, &str, f64)] = &[
    (2022, "Preto", 80000.0),
    (2021, "Branco", 75000.0),
    (2023, "Prata", 85000.0),
    (2020, "Azul", 70000.0),
    (2022, "Vermelho", 90000.0),
];

/// Buyer (index into `DEMO_USERS`) for each demo car.
const DEMO_BUYERS: &[usize] = &[1, 0, 1, 2, 3];

/// Serializes seeding within the process. SQLite would otherwise refuse to
/// upgrade the second deferred transaction to a writer.
static SEED_LOCK: Mutex<()> = Mutex::const_new(());

/// Wipe every table and insert the demo data set.
///
/// Runs in a single transaction, so a failure leaves the previous data in
/// place. Concurrent calls run one after the other.
pub async fn seed(db: &Database) -> Result<SeedSummary> {
    info!("Seeding demo data");

    // Hashing happens before the transaction so it never holds the write lock.
    let mut hashes = Vec::with_capacity(DEMO_USERS.len());
    for (_, _, password, _) in DEMO_USERS {
        hashes.push(hash_password(password).map_err(|e| DealershipError::Internal(e.to_string()))?);
    }

    let _guard = SEED_LOCK.lock().await;
    let mut tx = db.pool().begin().await?;

    // Called through `Executor` directly: `RawSql::execute` makes this future
    // fail the `Send` check axum handlers need.
    sqlx::Executor::execute(
        &mut *tx,
        sqlx::raw_sql(
            "DELETE FROM sales; DELETE FROM cars; DELETE FROM models; \
             DELETE FROM brands; DELETE FROM users; \
             DELETE FROM sqlite_sequence WHERE name IN ('sales', 'cars', 'models', 'brands', 'users');",
        ),
    )
    .await?;

    let mut summary = SeedSummary::default();

    let mut user_ids = Vec::with_capacity(DEMO_USERS.len());
    for ((name, email, _, is_admin), hash) in DEMO_USERS.iter().zip(&hashes) {
        let result =
            sqlx::query("INSERT INTO users (name, email, password, is_admin) VALUES (?, ?, ?, ?)")
                .bind(*name)
                .bind(*email)
                .bind(hash)
                .bind(*is_admin)
                .execute(&mut *tx)
                .await?;
        user_ids.push(result.last_insert_rowid());
    }
    summary.users = user_ids.len();

    let mut car_ids = Vec::with_capacity(DEMO_CARS.len());
    for ((brand_name, model_name), (year, color, price)) in
        DEMO_BRANDS.iter().zip(DEMO_MODELS).zip(DEMO_CARS)
    {
        let brand_id = sqlx::query("INSERT INTO brands (name) VALUES (?)")
            .bind(*brand_name)
            .execute(&mut *tx)
            .await?
            .last_insert_rowid();
        let model_id = sqlx::query("INSERT INTO models (name, brand_id) VALUES (?, ?)")
            .bind(*model_name)
            .bind(brand_id)
            .execute(&mut *tx)
            .await?
            .last_insert_rowid();
        let car_id =
            sqlx::query("INSERT INTO cars (model_id, year, color, price) VALUES (?, ?, ?, ?)")
                .bind(model_id)
                .bind(*year)
                .bind(*color)
                .bind(*price)
                .execute(&mut *tx)
                .await?
                .last_insert_rowid();
        car_ids.push(car_id);
        summary.brands += 1;
        summary.models += 1;
    }
    summary.cars = car_ids.len();

    let now = Utc::now();
    for (car_id, buyer_index) in car_ids.iter().zip(DEMO_BUYERS) {
        sqlx::query("INSERT INTO sales (car_id, buyer_id, sold_at) VALUES (?, ?, ?)")
            .bind(*car_id)
            .bind(user_ids[*buyer_index])
            .bind(now)
            .execute(&mut *tx)
            .await?;
        summary.sales += 1;
    }

    tx.commit().await?;

    info!(?summary, "Demo data seeded");
    Ok(summary)
}

/// Create the configured administrator when no administrator exists yet.
///
/// Does nothing when an administrator is already present or no password
/// is configured. Returns the created user, if any.
pub async fn ensure_default_admin(db: &Database, config: &InstallConfig) -> Result<Option<User>> {
    let repo = UserRepository::new(db.pool());

    if repo.admin_exists().await? {
        return Ok(None);
    }
    if config.admin_password.is_empty() {
        warn!("No administrator exists and install.admin_password is not set");
        return Ok(None);
    }

    let hash = hash_password(&config.admin_password)
        .map_err(|e| DealershipError::Internal(e.to_string()))?;
    let admin = repo
        .create(&NewUser::new(&config.admin_name, &config.admin_email, hash).admin())
        .await?;

    info!(user_id = admin.id, email = %admin.email, "Created default administrator");
    Ok(Some(admin))
}
