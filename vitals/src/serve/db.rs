/// Database connection pool using tokio-postgres.
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio_postgres::{Client, NoTls};

use super::config::Config;

/// Single shared connection, reopened when the backend drops it.
pub struct Pool {
    config: Config,
    client: Mutex<Option<Arc<Client>>>,
}

impl Pool {
    pub fn new(config: Config) -> Arc<Self> {
        Arc::new(Self {
            config,
            client: Mutex::new(None),
        })
    }

    /// Get a database client, reconnecting if needed.
    pub async fn get(&self) -> Result<Arc<Client>, tokio_postgres::Error> {
        let mut guard = self.client.lock().await;

        if let Some(client) = guard.as_ref() {
            if !client.is_closed() {
                return Ok(Arc::clone(client));
            }
            tracing::warn!("database connection closed, reconnecting");
        }

        let client = Arc::new(self.connect().await?);
        *guard = Some(Arc::clone(&client));
        Ok(client)
    }

    async fn connect(&self) -> Result<Client, tokio_postgres::Error> {
        let (client, connection) = tokio_postgres::connect(&self.config.database_url, NoTls).await?;

        // Spawn the connection handler
        tokio::spawn(async move {
            if let Err(e) = connection.await {
                tracing::error!("database connection error: {}", e);
            }
        });

        Ok(client)
    }
}
