use std::time::Duration;

use async_trait::async_trait;
use migration::{Migrator, MigratorTrait};
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, Statement,
};
use tracing::{debug, info};

use crate::{
    config::Settings,
    error::{ConnectionError, RepoResult},
    schema::{self, EvaluationSchema},
};

/// Hands out database sessions. Every call yields a fresh session which the
/// caller owns and drops when its statement is done.
#[async_trait]
pub trait ConnectionProvider: Send + Sync {
    async fn open(&self) -> Result<DatabaseConnection, ConnectionError>;
}

#[derive(Clone, Debug)]
pub struct DatabaseProvider {
    url: String,
}

impl DatabaseProvider {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

#[async_trait]
impl ConnectionProvider for DatabaseProvider {
    async fn open(&self) -> Result<DatabaseConnection, ConnectionError> {
        if self.url.trim().is_empty() {
            return Err(ConnectionError::NotConfigured);
        }

        let mut options = ConnectOptions::new(self.url.clone());
        options
            .max_connections(1)
            .min_connections(0)
            .connect_timeout(Duration::from_secs(10))
            .sqlx_logging(false);

        Database::connect(options).await.map_err(ConnectionError::Unreachable)
    }
}

/// One-time startup work: pragmas, migrations and the evaluation schema profile.
pub async fn prepare(
    provider: &dyn ConnectionProvider,
    settings: &Settings,
) -> RepoResult<EvaluationSchema> {
    let db = provider.open().await?;

    if db.get_database_backend() == DatabaseBackend::Sqlite {
        for pragma in ["PRAGMA journal_mode=WAL", "PRAGMA synchronous=NORMAL"] {
            db.execute(Statement::from_string(DatabaseBackend::Sqlite, pragma.to_string()))
                .await?;
        }
    }

    if settings.database.migrate {
        debug!("running migrations");
        Migrator::up(&db, None).await?;
    }

    let profile = schema::resolve(&db, &settings.schema).await?;
    info!(
        subject = profile.subject.column(),
        date_column = profile.date_column.as_deref().unwrap_or("-"),
        "evaluation schema resolved"
    );

    Ok(profile)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn empty_url_is_not_configured() {
        let provider = DatabaseProvider::new("  ");
        let err = provider.open().await.unwrap_err();
        assert!(matches!(err, ConnectionError::NotConfigured));
    }

    #[tokio::test]
    async fn unreachable_database_is_a_connection_error() {
        let dir = tempfile::tempdir().unwrap();
        // mode=ro refuses to create the missing file
        let url = format!("sqlite://{}?mode=ro", dir.path().join("missing.db").display());
        let err = DatabaseProvider::new(url).open().await.unwrap_err();
        assert!(matches!(err, ConnectionError::Unreachable(_)));
    }

    #[tokio::test]
    async fn prepare_migrates_and_resolves_default_profile() {
        let db = crate::testing::TestDb::new().await;
        let profile = db.schema.clone();
        assert_eq!(profile.subject, schema::EvaluationSubject::Movie);
        assert_eq!(profile.date_column.as_deref(), Some("evaluation_date"));
    }
}
