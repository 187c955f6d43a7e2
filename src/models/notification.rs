//! Modelos del ledger de notificaciones
//!
//! El ledger garantiza a-lo-sumo-una notificación por clave de dedupe.
//! La clave es (user, schedule, fecha, tipo, valor disparador); la
//! restricción UNIQUE de la tabla es el único árbitro ante corridas
//! concurrentes del pase diario.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Tipo de pase que originó la notificación
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Reminder,
    Overdue,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::Reminder => "reminder",
            NotificationKind::Overdue => "overdue",
        }
    }
}

/// Estado del intento de envío registrado en el ledger
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SendStatus {
    Attempting,
    Sent,
    Failed,
}

impl SendStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SendStatus::Attempting => "attempting",
            SendStatus::Sent => "sent",
            SendStatus::Failed => "failed",
        }
    }
}

/// Clave de dedupe de una notificación candidata.
///
/// `trigger_value` lleva el umbral de días como texto ("7", "3", ...) para
/// los reminders, o el nombre de la severidad ("warning", "critical", ...)
/// para los avisos de vencido. Guardarlo como TEXT NOT NULL evita el
/// problema de NULL-distinto-de-NULL en la restricción UNIQUE.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LedgerKey {
    pub user_id: Uuid,
    pub schedule_id: Uuid,
    pub notify_date: NaiveDate,
    pub kind: NotificationKind,
    pub trigger_value: String,
}

/// Preferencias de notificación por usuario
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserNotificationSettings {
    pub user_id: Uuid,
    pub reminder_days_before: Vec<i32>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names_stay_stable() {
        // estos textos forman la clave de dedupe y las filas del ledger;
        // renombrarlos rompería la continuidad de claves ya persistidas
        assert_eq!(NotificationKind::Reminder.as_str(), "reminder");
        assert_eq!(NotificationKind::Overdue.as_str(), "overdue");
        assert_eq!(SendStatus::Attempting.as_str(), "attempting");
        assert_eq!(SendStatus::Sent.as_str(), "sent");
        assert_eq!(SendStatus::Failed.as_str(), "failed");
    }

    #[test]
    fn test_ledger_key_equality_is_full_tuple() {
        let base = LedgerKey {
            user_id: Uuid::nil(),
            schedule_id: Uuid::nil(),
            notify_date: NaiveDate::from_ymd_opt(2024, 7, 8).unwrap(),
            kind: NotificationKind::Reminder,
            trigger_value: "7".to_string(),
        };
        let other_threshold = LedgerKey {
            trigger_value: "3".to_string(),
            ..base.clone()
        };
        assert_ne!(base, other_threshold);
    }
}
