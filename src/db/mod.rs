use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::{
    postgres::{PgConnectOptions, PgConnection},
    Connection,
};

use crate::{
    config::Config,
    errors::{AppError, AppResult},
};

/// Connection factory for the relational store. Nothing is pooled: every
/// caller opens its own connection and closes it when done.
#[derive(Clone, Debug)]
pub struct Database {
    options: PgConnectOptions,
    connect_timeout: Duration,
}

impl Database {
    pub fn from_config(config: &Config) -> Self {
        let options = PgConnectOptions::new()
            .host(&config.db_host)
            .port(config.db_port)
            .username(&config.db_user)
            .password(config.db_password.expose_secret())
            .database(&config.db_name);

        Self {
            options,
            connect_timeout: config.db_connect_timeout,
        }
    }

    pub async fn connect(&self) -> AppResult<PgConnection> {
        let connection = tokio::time::timeout(
            self.connect_timeout,
            PgConnection::connect_with(&self.options),
        )
        .await
        .map_err(|_| {
            AppError::DatabaseError(format!(
                "timed out after {}s connecting to the database",
                self.connect_timeout.as_secs()
            ))
        })??;

        Ok(connection)
    }

    pub async fn health_check(&self) -> AppResult<()> {
        let mut connection = self.connect().await?;
        let ping = connection.ping().await;
        release(connection).await;
        ping?;
        Ok(())
    }
}

/// Closes a connection, logging rather than failing if the goodbye is lost.
pub async fn release(connection: PgConnection) {
    if let Err(e) = connection.close().await {
        log::warn!("Failed to close database connection cleanly: {}", e);
    }
}
