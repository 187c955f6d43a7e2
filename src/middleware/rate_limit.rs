//! Middleware de Rate Limiting
//!
//! Este módulo limita la velocidad de requests por IP. Los pases de
//! notificación son operaciones de lote y no deben dispararse sin control.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

use crate::config::EnvironmentConfig;
use crate::utils::errors::AppError;

/// Información de rate limiting por IP
#[derive(Debug, Clone)]
struct RateLimitInfo {
    requests: u32,
    window_start: Instant,
}

/// Estado global del rate limiting
#[derive(Clone)]
pub struct RateLimitState {
    requests: Arc<RwLock<HashMap<String, RateLimitInfo>>>,
    max_requests: u32,
    window_duration: Duration,
}

impl RateLimitState {
    /// Crear nuevo estado de rate limiting
    pub fn new(config: &EnvironmentConfig) -> Self {
        Self {
            requests: Arc::new(RwLock::new(HashMap::new())),
            max_requests: config.rate_limit_requests,
            window_duration: Duration::from_secs(config.rate_limit_window),
        }
    }

    /// Verificar si una IP ha excedido el límite
    pub async fn check_rate_limit(&self, ip: &str) -> Result<(), AppError> {
        let mut requests = self.requests.write().await;
        let now = Instant::now();

        // Limpiar entradas expiradas
        requests.retain(|_, info| now.duration_since(info.window_start) < self.window_duration);

        let info = requests.entry(ip.to_string()).or_insert(RateLimitInfo {
            requests: 0,
            window_start: now,
        });

        // Reiniciar la ventana si ya expiró
        if now.duration_since(info.window_start) >= self.window_duration {
            info.requests = 1;
            info.window_start = now;
            return Ok(());
        }

        if info.requests >= self.max_requests {
            return Err(AppError::RateLimitExceeded);
        }

        info.requests += 1;
        Ok(())
    }
}

/// Middleware de rate limiting
pub async fn rate_limit_middleware(
    State(rate_limit_state): State<RateLimitState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    // Extraer IP del cliente (simplificado - en producción usarías headers reales)
    let ip = request
        .headers()
        .get("x-forwarded-for")
        .and_then(|h| h.to_str().ok())
        .unwrap_or("unknown")
        .split(',')
        .next()
        .unwrap_or("unknown")
        .trim();

    rate_limit_state.check_rate_limit(ip).await?;

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config(max_requests: u32, window_secs: u64) -> EnvironmentConfig {
        EnvironmentConfig {
            environment: "test".to_string(),
            port: 3000,
            host: "0.0.0.0".to_string(),
            cors_origins: vec!["*".to_string()],
            rate_limit_requests: max_requests,
            rate_limit_window: window_secs,
            notify_webhook_url: None,
        }
    }

    #[tokio::test]
    async fn test_allows_requests_under_limit() {
        let state = RateLimitState::new(&test_config(3, 60));

        for _ in 0..3 {
            assert!(state.check_rate_limit("10.0.0.1").await.is_ok());
        }
    }

    #[tokio::test]
    async fn test_rejects_requests_over_limit() {
        let state = RateLimitState::new(&test_config(2, 60));

        assert!(state.check_rate_limit("10.0.0.2").await.is_ok());
        assert!(state.check_rate_limit("10.0.0.2").await.is_ok());
        assert!(matches!(
            state.check_rate_limit("10.0.0.2").await,
            Err(AppError::RateLimitExceeded)
        ));
    }

    #[tokio::test]
    async fn test_limits_are_per_ip() {
        let state = RateLimitState::new(&test_config(1, 60));

        assert!(state.check_rate_limit("10.0.0.3").await.is_ok());
        assert!(state.check_rate_limit("10.0.0.4").await.is_ok());
        assert!(state.check_rate_limit("10.0.0.3").await.is_err());
    }
}
