//! Redis-backed chat session state.
//!
//! The bot keeps one session per client phone number. Sessions expire on
//! their own; the availability resolver never reads them, so all schedule
//! computation stays stateless.

use redis::{AsyncCommands, Client};
use serde::{de::DeserializeOwned, Serialize};

use crate::{
    config::RedisConfig,
    error::{AppError, AppResult},
};

#[derive(Clone)]
pub struct SessionService {
    client: Client,
    ttl_seconds: u64,
    dedup_ttl_seconds: u64,
    rate_limit_messages: i64,
    rate_limit_window_seconds: i64,
}

impl SessionService {
    /// Create a new session service and verify the connection
    pub async fn new(config: &RedisConfig) -> AppResult<Self> {
        let client = Client::open(config.url.as_str())
            .map_err(|e| AppError::Internal(format!("Failed to create Redis client: {}", e)))?;

        let mut conn = client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| AppError::Internal(format!("Failed to connect to Redis: {}", e)))?;

        redis::cmd("PING")
            .query_async::<_, String>(&mut conn)
            .await
            .map_err(|e| AppError::Internal(format!("Redis connection test failed: {}", e)))?;

        Ok(Self {
            client,
            ttl_seconds: config.session_ttl_seconds,
            dedup_ttl_seconds: config.dedup_ttl_seconds,
            rate_limit_messages: config.rate_limit_messages,
            rate_limit_window_seconds: config.rate_limit_window_seconds,
        })
    }

    fn key(phone: &str) -> String {
        format!("session:{}", phone)
    }

    /// Load the session state for a phone number, if one is active
    pub async fn get<T: DeserializeOwned>(&self, phone: &str) -> AppResult<Option<T>> {
        let mut conn = self
            .client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| AppError::Internal(format!("Failed to get Redis connection: {}", e)))?;

        let raw: Option<String> = conn
            .get(Self::key(phone))
            .await
            .map_err(|e| AppError::Internal(format!("Failed to read session: {}", e)))?;

        match raw {
            Some(raw) => {
                let state = serde_json::from_str(&raw)
                    .map_err(|e| AppError::Internal(format!("Corrupt session state: {}", e)))?;
                Ok(Some(state))
            }
            None => Ok(None),
        }
    }

    /// Store the session state for a phone number, refreshing its TTL
    pub async fn set<T: Serialize>(&self, phone: &str, state: &T) -> AppResult<()> {
        let mut conn = self
            .client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| AppError::Internal(format!("Failed to get Redis connection: {}", e)))?;

        let raw = serde_json::to_string(state)
            .map_err(|e| AppError::Internal(format!("Failed to serialize session: {}", e)))?;

        conn.set_ex::<_, _, ()>(Self::key(phone), raw, self.ttl_seconds)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to store session: {}", e)))?;

        Ok(())
    }

    /// Record a gateway message delivery; false means this exact message
    /// was already processed and the webhook is a redelivery
    pub async fn register_message(
        &self,
        phone: &str,
        message_id: &str,
        timestamp: i64,
    ) -> AppResult<bool> {
        let mut conn = self
            .client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| AppError::Internal(format!("Failed to get Redis connection: {}", e)))?;

        let key = format!("msg:{}:{}:{}", phone, message_id, timestamp);
        let stored: Option<String> = redis::cmd("SET")
            .arg(&key)
            .arg("processed")
            .arg("NX")
            .arg("EX")
            .arg(self.dedup_ttl_seconds)
            .query_async(&mut conn)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to register message: {}", e)))?;

        Ok(stored.is_some())
    }

    /// Count an inbound message against the phone's rate window; false
    /// means the limit is exceeded
    pub async fn within_rate_limit(&self, phone: &str) -> AppResult<bool> {
        let mut conn = self
            .client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| AppError::Internal(format!("Failed to get Redis connection: {}", e)))?;

        let key = format!("rate:{}", phone);
        let count: i64 = conn
            .incr(&key, 1)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to count message: {}", e)))?;
        if count == 1 {
            conn.expire::<_, ()>(&key, self.rate_limit_window_seconds)
                .await
                .map_err(|e| AppError::Internal(format!("Failed to set rate window: {}", e)))?;
        }

        Ok(count <= self.rate_limit_messages)
    }

    /// Drop the session for a phone number
    pub async fn clear(&self, phone: &str) -> AppResult<()> {
        let mut conn = self
            .client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| AppError::Internal(format!("Failed to get Redis connection: {}", e)))?;

        let _: () = conn
            .del(Self::key(phone))
            .await
            .map_err(|e| AppError::Internal(format!("Failed to clear session: {}", e)))?;

        Ok(())
    }
}
