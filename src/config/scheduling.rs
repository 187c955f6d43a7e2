//! Configuración del motor de programación
//!
//! Ventanas de "próximo a vencer", cortes de severidad de vencidos,
//! umbrales de recordatorio por defecto y límites de propagación de
//! kilometraje. Todo es configuración inyectada explícitamente: el motor
//! no lee estado global.

use std::env;

/// Parámetros de negocio del motor de mantenimiento
#[derive(Debug, Clone)]
pub struct SchedulingConfig {
    /// Días de anticipación para marcar un schedule como due_soon
    pub due_soon_window_days: i64,
    /// Kilómetros de anticipación para marcar un schedule como due_soon
    pub due_soon_window_km: f64,
    /// Días de atraso a partir de los cuales warning pasa a urgent
    pub overdue_urgent_days: i64,
    /// Días de atraso a partir de los cuales urgent pasa a critical
    pub overdue_critical_days: i64,
    /// Kilómetros de atraso a partir de los cuales warning pasa a urgent
    pub overdue_urgent_km: f64,
    /// Kilómetros de atraso a partir de los cuales urgent pasa a critical
    pub overdue_critical_km: f64,
    /// Umbrales días-antes cuando el usuario no configuró los suyos
    pub default_reminder_days: Vec<i32>,
    /// Ventana mínima entre propagaciones de kilometraje al vehículo
    pub mileage_propagation_cooldown_minutes: i64,
    /// Diferencia de km que fuerza la propagación aunque rija el cooldown
    pub mileage_propagation_margin_km: f64,
    /// Tamaño de lote del pase de notificaciones
    pub notification_chunk_size: usize,
}

impl Default for SchedulingConfig {
    fn default() -> Self {
        Self {
            due_soon_window_days: 30,
            due_soon_window_km: 1000.0,
            overdue_urgent_days: 15,
            overdue_critical_days: 60,
            overdue_urgent_km: 500.0,
            overdue_critical_km: 2000.0,
            default_reminder_days: vec![7, 3, 1, 0],
            mileage_propagation_cooldown_minutes: 60,
            mileage_propagation_margin_km: 100.0,
            notification_chunk_size: 10,
        }
    }
}

impl SchedulingConfig {
    /// Cargar la configuración con overrides opcionales de entorno
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            due_soon_window_days: env_or("DUE_SOON_WINDOW_DAYS", defaults.due_soon_window_days),
            due_soon_window_km: env_or("DUE_SOON_WINDOW_KM", defaults.due_soon_window_km),
            overdue_urgent_days: env_or("OVERDUE_URGENT_DAYS", defaults.overdue_urgent_days),
            overdue_critical_days: env_or("OVERDUE_CRITICAL_DAYS", defaults.overdue_critical_days),
            overdue_urgent_km: env_or("OVERDUE_URGENT_KM", defaults.overdue_urgent_km),
            overdue_critical_km: env_or("OVERDUE_CRITICAL_KM", defaults.overdue_critical_km),
            default_reminder_days: env::var("DEFAULT_REMINDER_DAYS")
                .ok()
                .and_then(|raw| parse_days_list(&raw))
                .unwrap_or(defaults.default_reminder_days),
            mileage_propagation_cooldown_minutes: env_or(
                "MILEAGE_PROPAGATION_COOLDOWN_MINUTES",
                defaults.mileage_propagation_cooldown_minutes,
            ),
            mileage_propagation_margin_km: env_or(
                "MILEAGE_PROPAGATION_MARGIN_KM",
                defaults.mileage_propagation_margin_km,
            ),
            notification_chunk_size: env_or(
                "NOTIFICATION_CHUNK_SIZE",
                defaults.notification_chunk_size,
            ),
        }
    }
}

/// Leer una variable opcional de entorno, cayendo al default si falta o no parsea
fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|raw| raw.trim().parse().ok())
        .unwrap_or(default)
}

/// Parsear una lista "7,3,1,0" de días-antes; descarta valores negativos
fn parse_days_list(raw: &str) -> Option<Vec<i32>> {
    let days: Vec<i32> = raw
        .split(',')
        .filter_map(|part| part.trim().parse::<i32>().ok())
        .filter(|d| *d >= 0)
        .collect();

    if days.is_empty() {
        None
    } else {
        Some(days)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_ordered() {
        let config = SchedulingConfig::default();
        assert!(config.overdue_urgent_days < config.overdue_critical_days);
        assert!(config.overdue_urgent_km < config.overdue_critical_km);
        assert!(config.due_soon_window_days > 0);
        assert_eq!(config.default_reminder_days, vec![7, 3, 1, 0]);
    }

    #[test]
    fn test_parse_days_list() {
        assert_eq!(parse_days_list("7,3,1,0"), Some(vec![7, 3, 1, 0]));
        assert_eq!(parse_days_list(" 14 , 7 "), Some(vec![14, 7]));
        assert_eq!(parse_days_list("-3"), None);
        assert_eq!(parse_days_list(""), None);
    }
}
