//! Envío de notificaciones al canal externo
//!
//! El motor de decisión no conoce el transporte: habla contra el trait
//! `NotificationSender`. En producción el transporte es un webhook HTTP
//! (email/push viven del otro lado); sin webhook configurado se cae a un
//! sender que solo loguea.

use std::sync::Arc;

use anyhow::{anyhow, Result};
use async_trait::async_trait;

use crate::dto::notification_dto::NotificationPayload;

#[async_trait]
pub trait NotificationSender: Send + Sync {
    async fn send(&self, payload: &NotificationPayload) -> Result<()>;
}

/// Sender real: POST JSON al webhook configurado
pub struct WebhookSender {
    webhook_url: String,
    client: reqwest::Client,
}

impl WebhookSender {
    pub fn new(webhook_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            webhook_url,
            client,
        }
    }
}

#[async_trait]
impl NotificationSender for WebhookSender {
    async fn send(&self, payload: &NotificationPayload) -> Result<()> {
        log::info!(
            "📨 Sending {} notification for schedule {}",
            payload.kind,
            payload.schedule_id
        );

        let response = self
            .client
            .post(&self.webhook_url)
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            log::error!(
                "❌ Notification webhook failed with status {}: {}",
                status,
                error_text
            );
            return Err(anyhow!("Webhook returned status {}", status));
        }

        log::info!("✅ Notification delivered for schedule {}", payload.schedule_id);
        Ok(())
    }
}

/// Sender de respaldo: deja la notificación en el log y nada más
pub struct LogSender;

#[async_trait]
impl NotificationSender for LogSender {
    async fn send(&self, payload: &NotificationPayload) -> Result<()> {
        log::info!(
            "🔔 [{}] {} - {}",
            payload.kind,
            payload.vehicle_name,
            payload.message
        );
        Ok(())
    }
}

/// Elegir el transporte según la configuración
pub fn sender_from_config(webhook_url: Option<&str>) -> Arc<dyn NotificationSender> {
    match webhook_url {
        Some(url) if !url.trim().is_empty() => Arc::new(WebhookSender::new(url.to_string())),
        _ => {
            log::warn!("⚠️ NOTIFY_WEBHOOK_URL no configurada, las notificaciones solo se loguean");
            Arc::new(LogSender)
        }
    }
}
