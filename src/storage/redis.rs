//! # Redis
//!
//! Document store for RSVP records.
//!
//! ## Layout
//!
//! - `{prefix}:rsvps`: hash, record id → JSON document
//! - `{prefix}:rsvps:order`: list of ids in insertion order
//!
//! Inserts and deletes touch both keys in one `MULTI`/`EXEC` pipeline.
//! The connection is opened on first use, so the server starts even when
//! Redis is down and each request reports the failure on its own.

use redis::{
    Client,
    aio::{ConnectionManager, ConnectionManagerConfig},
};
use tokio::sync::OnceCell;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{NewRsvp, Rsvp};
use crate::storage::{RsvpStore, parse_id};

/// RSVP store backed by a Redis server.
pub struct RedisStore {
    client: Client,
    connection: OnceCell<ConnectionManager>,
    records_key: String,
    order_key: String,
}

impl RedisStore {
    /// Create a store for `redis_url`, namespacing keys under `prefix`.
    ///
    /// Only the URL is checked here; no connection is made yet.
    pub fn open(redis_url: &str, prefix: &str) -> Result<Self> {
        let client = Client::open(redis_url)?;
        Ok(Self {
            client,
            connection: OnceCell::new(),
            records_key: format!("{prefix}:rsvps"),
            order_key: format!("{prefix}:rsvps:order"),
        })
    }

    /// Shared connection, established on first call. A failed attempt is
    /// retried by the next call.
    async fn connection(&self) -> Result<ConnectionManager> {
        let manager = self
            .connection
            .get_or_try_init(|| async {
                let config = ConnectionManagerConfig::new().set_number_of_retries(1);
                let manager = self.client.get_connection_manager_with_config(config).await?;
                log::info!("Connected to Redis");
                Ok::<_, redis::RedisError>(manager)
            })
            .await?;
        Ok(manager.clone())
    }

    /// Check the server answers.
    pub async fn ping(&self) -> Result<()> {
        let mut con = self.connection().await?;
        let _: String = redis::cmd("PING").query_async(&mut con).await?;
        Ok(())
    }
}

#[async_trait]
impl RsvpStore for RedisStore {
    async fn list(&self) -> Result<Vec<Rsvp>> {
        let mut con = self.connection().await?;

        let ids: Vec<String> = redis::cmd("LRANGE")
            .arg(&self.order_key)
            .arg(0)
            .arg(-1)
            .query_async(&mut con)
            .await?;
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let documents: Vec<Option<String>> = redis::cmd("HMGET")
            .arg(&self.records_key)
            .arg(&ids)
            .query_async(&mut con)
            .await?;

        let mut records = Vec::with_capacity(documents.len());
        for document in documents.into_iter().flatten() {
            records.push(serde_json::from_str(&document)?);
        }
        Ok(records)
    }

    async fn insert(&self, new: NewRsvp) -> Result<Rsvp> {
        let rsvp = Rsvp::from_new(new);
        let id = rsvp.id.to_string();
        let document = serde_json::to_string(&rsvp)?;

        let mut con = self.connection().await?;
        let (): () = redis::pipe()
            .atomic()
            .hset(&self.records_key, &id, document)
            .ignore()
            .rpush(&self.order_key, &id)
            .ignore()
            .query_async(&mut con)
            .await?;

        log::debug!("Stored RSVP {id}");
        Ok(rsvp)
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        let id = parse_id(id)?.to_string();

        let mut con = self.connection().await?;
        let (removed, _): (i64, i64) = redis::pipe()
            .atomic()
            .hdel(&self.records_key, &id)
            .lrem(&self.order_key, 0, &id)
            .query_async(&mut con)
            .await?;
        Ok(removed > 0)
    }
}
