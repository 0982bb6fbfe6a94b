//! Application state and its builder (used by binaries and tests).

use sea_orm::DatabaseConnection;

use crate::config::db::{db_url, DbProfile};
use crate::error::AppError;
use crate::infra::db::bootstrap_db;
use crate::infra::notify::{null_notifier, SharedNotifier};

/// Shared state: the database handle and the change-notification port.
#[derive(Clone)]
pub struct AppState {
    db: DatabaseConnection,
    notifier: SharedNotifier,
}

impl AppState {
    pub fn new(db: DatabaseConnection, notifier: SharedNotifier) -> Self {
        Self { db, notifier }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    pub fn notifier(&self) -> SharedNotifier {
        self.notifier.clone()
    }
}

/// Builder for creating AppState instances.
pub struct StateBuilder {
    db_profile: Option<DbProfile>,
    db_url_override: Option<String>,
    notifier: Option<SharedNotifier>,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            db_profile: None,
            db_url_override: None,
            notifier: None,
        }
    }

    pub fn with_db(mut self, profile: DbProfile) -> Self {
        self.db_profile = Some(profile);
        self
    }

    /// Explicit URL; takes precedence over the profile.
    pub fn with_db_url(mut self, url: impl Into<String>) -> Self {
        self.db_url_override = Some(url.into());
        self
    }

    pub fn with_notifier(mut self, notifier: SharedNotifier) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub async fn build(self) -> Result<AppState, AppError> {
        let url = match self.db_url_override {
            Some(url) => url,
            None => {
                let profile = self.db_profile.ok_or_else(|| {
                    AppError::config("StateBuilder needs a DB profile or an explicit URL")
                })?;
                db_url(profile)?
            }
        };

        // single entrypoint: connect + migrate
        let conn = bootstrap_db(&url).await?;
        let notifier = self.notifier.unwrap_or_else(null_notifier);
        Ok(AppState::new(conn, notifier))
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
