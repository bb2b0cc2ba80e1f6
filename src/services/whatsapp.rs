//! Outbound WhatsApp messaging through the Evolution API gateway

use serde_json::json;

use crate::{
    config::WhatsAppConfig,
    error::{AppError, AppResult},
};

#[derive(Clone)]
pub struct WhatsAppService {
    client: reqwest::Client,
    config: WhatsAppConfig,
}

impl WhatsAppService {
    pub fn new(config: WhatsAppConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Send a text message to a phone number.
    ///
    /// The gateway answers 201 on accepted sends; anything else is surfaced
    /// as a gateway fault.
    pub async fn send_text(&self, number: &str, text: &str) -> AppResult<()> {
        let payload = json!({
            "number": number,
            "text": text,
            "delay": self.config.send_delay_ms,
        });

        let response = self
            .client
            .post(&self.config.api_url)
            .header("apikey", &self.config.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| AppError::Gateway(format!("Failed to reach WhatsApp gateway: {}", e)))?;

        if response.status() != reqwest::StatusCode::CREATED {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(%status, %body, "WhatsApp gateway rejected message");
            return Err(AppError::Gateway(format!(
                "WhatsApp gateway returned {}",
                status
            )));
        }

        tracing::debug!(number, "WhatsApp message sent");
        Ok(())
    }
}
