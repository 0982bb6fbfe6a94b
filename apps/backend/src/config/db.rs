//! Database configuration from the environment.

use std::env;

use crate::error::AppError;

/// In-memory SQLite URL used by the test profile.
pub const TEST_DB_URL: &str = "sqlite::memory:";

/// Database profile enum for different environments
#[derive(Debug, Clone, PartialEq)]
pub enum DbProfile {
    /// Production: Postgres, configured via environment variables
    Prod,
    /// Test/demo: in-memory SQLite, no environment required
    Test,
}

/// Resolve a database URL for the given profile.
///
/// The prod profile honors `DATABASE_URL` when set and otherwise composes a
/// Postgres URL from `POSTGRES_HOST`, `POSTGRES_PORT`, `APP_DB_USER`,
/// `APP_DB_PASSWORD`, and `DARTS_DB`.
pub fn db_url(profile: DbProfile) -> Result<String, AppError> {
    match profile {
        DbProfile::Test => Ok(TEST_DB_URL.to_string()),
        DbProfile::Prod => {
            if let Ok(url) = env::var("DATABASE_URL") {
                return Ok(url);
            }
            let host = env::var("POSTGRES_HOST").unwrap_or_else(|_| "localhost".to_string());
            let port = env::var("POSTGRES_PORT").unwrap_or_else(|_| "5432".to_string());
            let username = must_var("APP_DB_USER")?;
            let password = must_var("APP_DB_PASSWORD")?;
            let db_name = must_var("DARTS_DB")?;
            Ok(format!(
                "postgresql://{username}:{password}@{host}:{port}/{db_name}"
            ))
        }
    }
}

/// Get required environment variable or return error
fn must_var(name: &str) -> Result<String, AppError> {
    env::var(name)
        .map_err(|_| AppError::config(format!("Required environment variable '{name}' is not set")))
}
