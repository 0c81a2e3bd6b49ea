//! Database connection and initialization.

use std::sync::Arc;

use sea_orm::{ConnectOptions, Database as SeaDatabase, DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;

use common::DatabaseConfig;

use super::migrations::Migrator;

/// Database wrapper for connection pool management
pub struct Database {
    connection: Arc<DatabaseConnection>,
}

impl Database {
    /// Open the connection pool and run pending migrations.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, DbErr> {
        let db = Self::connect_without_migrations(config).await?;

        // Run pending migrations
        Migrator::up(db.connection.as_ref(), None).await?;
        tracing::info!("Database connected and migrations applied");

        Ok(db)
    }

    /// Open the connection pool without running migrations (for CLI commands).
    pub async fn connect_without_migrations(config: &DatabaseConfig) -> Result<Self, DbErr> {
        let connection = SeaDatabase::connect(connect_options(config)).await?;
        Ok(Self {
            connection: Arc::new(connection),
        })
    }

    /// Shared handle to the connection pool.
    pub fn get_connection(&self) -> Arc<DatabaseConnection> {
        Arc::clone(&self.connection)
    }

    /// Run pending migrations.
    pub async fn run_migrations(&self) -> Result<(), DbErr> {
        Migrator::up(self.connection.as_ref(), None).await
    }

    /// Rollback the last migration.
    pub async fn rollback_migration(&self) -> Result<(), DbErr> {
        Migrator::down(self.connection.as_ref(), Some(1)).await
    }

    /// Get migration status (list all migrations with applied status).
    pub async fn migration_status(&self) -> Result<Vec<(String, bool)>, DbErr> {
        use sea_orm::{EntityTrait, QueryOrder};
        use sea_orm_migration::seaql_migrations;

        let applied: std::collections::HashSet<String> = seaql_migrations::Entity::find()
            .order_by_asc(seaql_migrations::Column::Version)
            .all(self.connection.as_ref())
            .await?
            .into_iter()
            .map(|m| m.version)
            .collect();

        Ok(Migrator::migrations()
            .iter()
            .map(|m| {
                let name = m.name().to_string();
                let is_applied = applied.contains(&name);
                (name, is_applied)
            })
            .collect())
    }

    /// Reset database and run all migrations fresh.
    pub async fn fresh_migrations(&self) -> Result<(), DbErr> {
        Migrator::fresh(self.connection.as_ref()).await
    }

    /// Close the pool, waiting for checked-out connections to be returned.
    ///
    /// The pool is only closed once every other handle has been dropped;
    /// otherwise it is left to close when the last handle goes away.
    pub async fn close(self) -> Result<(), DbErr> {
        match Arc::try_unwrap(self.connection) {
            Ok(connection) => connection.close().await,
            Err(shared) => {
                tracing::warn!(
                    handles = Arc::strong_count(&shared),
                    "Database pool still in use, skipping explicit close"
                );
                Ok(())
            }
        }
    }
}

/// Pool options derived from configuration.
fn connect_options(config: &DatabaseConfig) -> ConnectOptions {
    let mut options = ConnectOptions::new(config.url.clone());
    options
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .connect_timeout(config.connect_timeout())
        .acquire_timeout(config.connect_timeout())
        .sqlx_logging(false);
    options
}
