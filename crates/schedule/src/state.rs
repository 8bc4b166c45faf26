//! Application state with repository-based storage.
//!
//! Shared by every request handler. Handlers only see the repository traits;
//! the concrete store is kept for the readiness probe.

use std::{sync::Arc, time::Duration};

use schedule_core::storage::{RepositoryError, SubjectRepository, TaskRepository};

use crate::{config::Config, storage::SqliteRepository};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Subject repository.
    pub subject_repo: Arc<dyn SubjectRepository>,
    /// Task repository.
    pub task_repo: Arc<dyn TaskRepository>,
    store: Arc<SqliteRepository>,
    /// Upper bound for a single request.
    pub request_timeout: Duration,
}

impl AppState {
    /// Creates the state around an opened SQLite repository.
    pub fn new(repo: SqliteRepository, config: &Config) -> Self {
        let store = Arc::new(repo);

        Self {
            subject_repo: store.clone(),
            task_repo: store.clone(),
            store,
            request_timeout: config.request_timeout(),
        }
    }

    /// Opens the database named in `config`, creating the schema if needed.
    pub async fn open(config: &Config) -> Result<Self, RepositoryError> {
        let repo = SqliteRepository::new(&config.sqlite_path).await?;
        Ok(Self::new(repo, config))
    }

    /// Checks that the store answers queries.
    pub async fn ping(&self) -> Result<(), RepositoryError> {
        self.store.ping().await
    }
}
