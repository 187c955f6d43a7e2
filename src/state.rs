//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum.

use sqlx::PgPool;
use std::sync::Arc;

use crate::config::environment::EnvironmentConfig;
use crate::config::scheduling::SchedulingConfig;
use crate::services::notification_sender::NotificationSender;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: EnvironmentConfig,
    pub scheduling: SchedulingConfig,
    pub sender: Arc<dyn NotificationSender>,
}

impl AppState {
    pub fn new(
        pool: PgPool,
        config: EnvironmentConfig,
        scheduling: SchedulingConfig,
        sender: Arc<dyn NotificationSender>,
    ) -> Self {
        Self {
            pool,
            config,
            scheduling,
            sender,
        }
    }
}
