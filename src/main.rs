mod config;
mod state;
mod database;
mod services;
mod utils;
mod models;
mod middleware;
mod controllers;
mod repositories;
mod routes;
mod dto;

use anyhow::Result;
use axum::{response::Json, routing::get, Router};
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info};
use dotenvy::dotenv;
use serde_json::json;

use config::environment::EnvironmentConfig;
use config::scheduling::SchedulingConfig;
use state::*;
use database::DatabaseConnection;
use middleware::cors::{cors_middleware, cors_middleware_with_origins};
use middleware::rate_limit::RateLimitState;
use services::notification_sender::sender_from_config;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    info!("🔧 Vehicle Maintenance Scheduler - Motor de Mantenimiento Preventivo");
    info!("====================================================================");

    // Inicializar base de datos
    let db_connection = match DatabaseConnection::new_default().await {
        Ok(conn) => conn,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };

    let pool = db_connection.pool().clone();

    // Configuración del entorno y del motor de programación
    let env_config = EnvironmentConfig::default();
    let scheduling_config = SchedulingConfig::from_env();

    // Canal de salida de notificaciones (webhook o log)
    let sender = sender_from_config(env_config.notify_webhook_url.as_deref());

    // Rate limiting para los pases de notificación
    let rate_limit_state = RateLimitState::new(&env_config);

    // CORS: permisivo en desarrollo, orígenes explícitos en producción
    let cors = if env_config.is_production() {
        cors_middleware_with_origins(env_config.cors_origins.clone())
    } else {
        cors_middleware()
    };

    let addr: SocketAddr = env_config.server_url().parse()?;
    let app_state = AppState::new(pool, env_config, scheduling_config, sender);

    let app = Router::new()
        .route("/test", get(test_endpoint))
        .nest("/api/vehicle", routes::vehicle_routes::create_vehicle_router())
        .nest(
            "/api/definition",
            routes::definition_routes::create_definition_router(),
        )
        .nest(
            "/api/schedule",
            routes::schedule_routes::create_schedule_router(),
        )
        .nest(
            "/api/completion",
            routes::completion_routes::create_completion_router(),
        )
        .nest(
            "/api/notification",
            routes::notification_routes::create_notification_router(rate_limit_state),
        )
        .layer(cors)
        .with_state(app_state);

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /test - Endpoint de prueba");
    info!("🚗 Endpoints - Vehicle:");
    info!("   POST /api/vehicle - Crear vehículo");
    info!("   GET  /api/vehicle/owner/:owner_id - Vehículos por dueño");
    info!("   GET  /api/vehicle/:id - Obtener vehículo");
    info!("   PUT  /api/vehicle/:id/mileage - Actualizar kilometraje");
    info!("📚 Endpoints - Definition:");
    info!("   POST /api/definition - Crear definición de mantenimiento");
    info!("   GET  /api/definition - Listar definiciones");
    info!("   GET  /api/definition/:id - Obtener definición");
    info!("📋 Endpoints - Schedule:");
    info!("   POST /api/schedule - Adjuntar mantenimiento a un equipo");
    info!("   GET  /api/schedule/vehicle/:vehicle_id - Schedules por vehículo");
    info!("   GET  /api/schedule/:id - Obtener schedule con estado recalculado");
    info!("   DELETE /api/schedule/:id - Eliminar schedule");
    info!("   POST /api/schedule/:id/completion - Registrar completación");
    info!("   GET  /api/schedule/:id/completion - Historial de completaciones");
    info!("🧾 Endpoints - Completion:");
    info!("   PUT  /api/completion/:id/attachments - Actualizar adjuntos");
    info!("   DELETE /api/completion/:id - Eliminar registro y re-anclar");
    info!("🔔 Endpoints - Notification:");
    info!("   POST /api/notification/daily-run - Pase diario de recordatorios");
    info!("   POST /api/notification/overdue-run - Pase de escalamiento de vencidos");
    info!("   GET  /api/notification/settings/:user_id - Preferencias de usuario");
    info!("   PUT  /api/notification/settings/:user_id - Actualizar preferencias");

    // Iniciar servidor en background
    let server_handle = tokio::spawn(async move {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| {
                error!("❌ Error del servidor: {}", e);
                e
            })
    });

    // Esperar a que el servidor termine
    if let Err(e) = server_handle.await? {
        error!("❌ Servidor terminó con error: {}", e);
    }

    info!("👋 Servidor terminado");
    Ok(())
}

/// Endpoint de prueba simple
async fn test_endpoint() -> Json<serde_json::Value> {
    Json(json!({
        "message": "¡API de mantenimiento preventivo funcionando correctamente!",
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "service": "maintenance-scheduler"
    }))
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
