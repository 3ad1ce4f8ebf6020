pub mod courses;
pub mod enrollments;
pub mod students;

use std::str::FromStr;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

/// Which of the two parallel table sets an operation works on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Catalog {
    /// `students`, `courses`, `enrollments`
    Current,
    /// `alunos`, `cursos`, `matriculas`
    Legacy,
}

impl Catalog {
    pub fn students(self) -> &'static str {
        match self {
            Catalog::Current => "students",
            Catalog::Legacy => "alunos",
        }
    }

    pub fn courses(self) -> &'static str {
        match self {
            Catalog::Current => "courses",
            Catalog::Legacy => "cursos",
        }
    }

    pub fn enrollments(self) -> &'static str {
        match self {
            Catalog::Current => "enrollments",
            Catalog::Legacy => "matriculas",
        }
    }
}

pub async fn connect(database_url: &str, max_connections: u32) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;

    migrate(&pool).await?;
    Ok(pool)
}

/// Single-connection in-memory database with the schema applied.
/// Every connection to `:memory:` is a separate database, so the pool
/// must never open a second one.
pub async fn connect_in_memory() -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;

    migrate(&pool).await?;
    Ok(pool)
}

pub async fn migrate(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| sqlx::Error::Migrate(Box::new(e)))
}
