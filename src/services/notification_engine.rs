//! Motor de decisión de notificaciones
//!
//! Pase batch diario: recorre los schedules con vencimiento, arma los
//! candidatos (umbral exacto de días-antes para recordatorios, tier de
//! severidad para vencidos) y los despacha reclamando primero la clave en
//! el ledger de dedupe. Correr el pase dos veces el mismo día no duplica
//! envíos: el perdedor de cada clave cuenta como skipped_duplicate.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use futures::future;
use rust_decimal::prelude::ToPrimitive;
use sqlx::PgPool;
use uuid::Uuid;

use crate::config::SchedulingConfig;
use crate::dto::notification_dto::NotificationPayload;
use crate::models::notification::{LedgerKey, NotificationKind};
use crate::models::schedule::ScheduleStatus;
use crate::repositories::schedule_repository::DueScheduleRow;
use crate::repositories::{LedgerRepository, ScheduleRepository, SettingsRepository};
use crate::services::notification_sender::NotificationSender;
use crate::services::urgency_service::UrgencyClassifier;
use crate::utils::errors::{AppError, AppResult};

/// Ledger de dedupe visto desde el motor. `claim` devuelve None cuando la
/// clave ya fue tomada hoy, que se trata como "ya atendida", nunca como error.
#[async_trait]
pub trait LedgerStore: Send + Sync {
    async fn claim(&self, key: &LedgerKey) -> Result<Option<Uuid>, AppError>;
    async fn mark_sent(&self, entry_id: Uuid) -> Result<(), AppError>;
    async fn mark_failed(&self, entry_id: Uuid, error_message: &str) -> Result<(), AppError>;
}

/// Notificación lista para despachar: clave de dedupe + payload
#[derive(Debug, Clone)]
pub struct NotificationCandidate {
    pub key: LedgerKey,
    pub payload: NotificationPayload,
}

/// Resumen agregado de una corrida del pase
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    pub candidates: usize,
    pub sent: usize,
    pub failed: usize,
    pub skipped_duplicate: usize,
}

enum DispatchOutcome {
    Sent,
    Failed,
    SkippedDuplicate,
}

pub struct NotificationEngine {
    schedules: ScheduleRepository,
    settings: SettingsRepository,
    ledger: LedgerRepository,
    sender: Arc<dyn NotificationSender>,
    classifier: UrgencyClassifier,
    config: SchedulingConfig,
}

impl NotificationEngine {
    pub fn new(
        pool: PgPool,
        config: SchedulingConfig,
        sender: Arc<dyn NotificationSender>,
    ) -> Self {
        Self {
            schedules: ScheduleRepository::new(pool.clone()),
            settings: SettingsRepository::new(pool.clone()),
            ledger: LedgerRepository::new(pool),
            sender,
            classifier: UrgencyClassifier::new(config.clone()),
            config,
        }
    }

    /// Pase diario de recordatorios: umbral exacto de días-antes
    pub async fn run_daily_pass(&self, today: NaiveDate) -> AppResult<RunSummary> {
        tracing::info!("🚀 Iniciando pase de recordatorios para {}", today);

        let rows = self.schedules.find_for_reminder_pass().await?;
        let thresholds = self.resolve_thresholds(&rows).await?;
        let candidates = Self::reminder_candidates(
            &rows,
            &thresholds,
            &self.config.default_reminder_days,
            today,
        );

        let summary = Self::dispatch_candidates(
            candidates,
            &self.ledger,
            self.sender.as_ref(),
            self.config.notification_chunk_size,
        )
        .await;

        tracing::info!(
            "✅ Pase de recordatorios completado: {} candidatos, {} enviados, {} duplicados, {} fallidos",
            summary.candidates,
            summary.sent,
            summary.skipped_duplicate,
            summary.failed
        );
        Ok(summary)
    }

    /// Pase de escalamiento de vencidos: una notificación por tier por día
    pub async fn run_overdue_pass(&self, today: NaiveDate) -> AppResult<RunSummary> {
        tracing::info!("🚀 Iniciando pase de vencidos para {}", today);

        let rows = self.schedules.find_for_overdue_pass().await?;
        let candidates = Self::overdue_candidates(&rows, &self.classifier, today);

        let summary = Self::dispatch_candidates(
            candidates,
            &self.ledger,
            self.sender.as_ref(),
            self.config.notification_chunk_size,
        )
        .await;

        tracing::info!(
            "✅ Pase de vencidos completado: {} candidatos, {} enviados, {} duplicados, {} fallidos",
            summary.candidates,
            summary.sent,
            summary.skipped_duplicate,
            summary.failed
        );
        Ok(summary)
    }

    /// Umbrales días-antes por dueño, cayendo a los defaults de configuración
    async fn resolve_thresholds(
        &self,
        rows: &[DueScheduleRow],
    ) -> AppResult<HashMap<Uuid, Vec<i32>>> {
        let mut thresholds = HashMap::new();
        for row in rows {
            if thresholds.contains_key(&row.owner_id) {
                continue;
            }
            let days = self
                .settings
                .find_by_user(row.owner_id)
                .await?
                .map(|s| s.reminder_days_before)
                .unwrap_or_else(|| self.config.default_reminder_days.clone());
            thresholds.insert(row.owner_id, days);
        }
        Ok(thresholds)
    }

    /// Armar candidatos de recordatorio. Un schedule es candidato para el
    /// umbral `t` exactamente cuando faltan `t` días enteros para su
    /// vencimiento (igualdad estricta, no rango).
    pub fn reminder_candidates(
        rows: &[DueScheduleRow],
        thresholds: &HashMap<Uuid, Vec<i32>>,
        default_thresholds: &[i32],
        today: NaiveDate,
    ) -> Vec<NotificationCandidate> {
        let mut candidates = Vec::new();

        for row in rows {
            let due_date = match row.next_due_date {
                Some(due) => due.date_naive(),
                None => continue,
            };
            let days_until_due = (due_date - today).num_days();

            let user_thresholds = thresholds
                .get(&row.owner_id)
                .map(|v| v.as_slice())
                .unwrap_or(default_thresholds);

            for threshold in user_thresholds {
                if days_until_due != *threshold as i64 {
                    continue;
                }

                let message = match *threshold {
                    0 => format!(
                        "El mantenimiento '{}' de {} vence hoy",
                        row.title, row.vehicle_name
                    ),
                    1 => format!(
                        "El mantenimiento '{}' de {} vence mañana",
                        row.title, row.vehicle_name
                    ),
                    days => format!(
                        "El mantenimiento '{}' de {} vence en {} días",
                        row.title, row.vehicle_name, days
                    ),
                };

                candidates.push(NotificationCandidate {
                    key: LedgerKey {
                        user_id: row.owner_id,
                        schedule_id: row.id,
                        notify_date: today,
                        kind: NotificationKind::Reminder,
                        trigger_value: threshold.to_string(),
                    },
                    payload: NotificationPayload {
                        user_id: row.owner_id,
                        schedule_id: row.id,
                        vehicle_name: row.vehicle_name.clone(),
                        title: row.title.clone(),
                        kind: NotificationKind::Reminder.as_str().to_string(),
                        trigger_value: threshold.to_string(),
                        due_date: Some(due_date),
                        message,
                    },
                });
            }
        }

        candidates
    }

    /// Armar candidatos de escalamiento. La clave va por tier de severidad:
    /// el primer pase del día que observa un tier lo notifica y los
    /// siguientes caen en el dedupe.
    pub fn overdue_candidates(
        rows: &[DueScheduleRow],
        classifier: &UrgencyClassifier,
        today: NaiveDate,
    ) -> Vec<NotificationCandidate> {
        let now = today.and_time(NaiveTime::MIN).and_utc();
        let mut candidates = Vec::new();

        for row in rows {
            let urgency = classifier.classify(
                row.next_due_date,
                row.next_due_mileage.as_ref().and_then(|d| d.to_f64()),
                now,
                row.vehicle_mileage.as_ref().and_then(|d| d.to_f64()),
            );

            if urgency.status != ScheduleStatus::Overdue {
                continue;
            }
            let severity = match urgency.severity {
                Some(severity) => severity,
                None => continue,
            };

            let mut magnitudes = Vec::new();
            if let Some(days) = urgency.days_until_due.filter(|d| *d < 0) {
                magnitudes.push(format!("{} días de atraso", -days));
            }
            if let Some(km) = urgency.km_until_due.filter(|km| *km < 0.0) {
                magnitudes.push(format!("{:.0} km pasados", -km));
            }

            let message = format!(
                "El mantenimiento '{}' de {} está vencido ({})",
                row.title,
                row.vehicle_name,
                magnitudes.join(", ")
            );

            candidates.push(NotificationCandidate {
                key: LedgerKey {
                    user_id: row.owner_id,
                    schedule_id: row.id,
                    notify_date: today,
                    kind: NotificationKind::Overdue,
                    trigger_value: severity.as_str().to_string(),
                },
                payload: NotificationPayload {
                    user_id: row.owner_id,
                    schedule_id: row.id,
                    vehicle_name: row.vehicle_name.clone(),
                    title: row.title.clone(),
                    kind: NotificationKind::Overdue.as_str().to_string(),
                    trigger_value: severity.as_str().to_string(),
                    due_date: row.next_due_date.map(|d| d.date_naive()),
                    message,
                },
            });
        }

        candidates
    }

    /// Despachar candidatos en lotes concurrentes. Cada candidato reclama su
    /// clave, envía y sella el resultado; el fallo de uno no frena al resto.
    pub async fn dispatch_candidates(
        candidates: Vec<NotificationCandidate>,
        ledger: &dyn LedgerStore,
        sender: &dyn NotificationSender,
        chunk_size: usize,
    ) -> RunSummary {
        let mut summary = RunSummary {
            candidates: candidates.len(),
            ..Default::default()
        };

        for chunk in candidates.chunks(chunk_size.max(1)) {
            let outcomes = future::join_all(
                chunk
                    .iter()
                    .map(|candidate| Self::dispatch_one(candidate, ledger, sender)),
            )
            .await;

            for outcome in outcomes {
                match outcome {
                    DispatchOutcome::Sent => summary.sent += 1,
                    DispatchOutcome::Failed => summary.failed += 1,
                    DispatchOutcome::SkippedDuplicate => summary.skipped_duplicate += 1,
                }
            }
        }

        summary
    }

    async fn dispatch_one(
        candidate: &NotificationCandidate,
        ledger: &dyn LedgerStore,
        sender: &dyn NotificationSender,
    ) -> DispatchOutcome {
        let entry_id = match ledger.claim(&candidate.key).await {
            Ok(Some(entry_id)) => entry_id,
            Ok(None) => {
                tracing::debug!(
                    "⏭️ Notificación ya atendida hoy: schedule {} trigger {}",
                    candidate.key.schedule_id,
                    candidate.key.trigger_value
                );
                return DispatchOutcome::SkippedDuplicate;
            }
            Err(e) => {
                tracing::error!(
                    "❌ Error reclamando clave del ledger para schedule {}: {}",
                    candidate.key.schedule_id,
                    e
                );
                return DispatchOutcome::Failed;
            }
        };

        match sender.send(&candidate.payload).await {
            Ok(()) => {
                if let Err(e) = ledger.mark_sent(entry_id).await {
                    tracing::error!("❌ Error sellando envío en el ledger: {}", e);
                }
                DispatchOutcome::Sent
            }
            Err(send_error) => {
                tracing::warn!(
                    "❌ Fallo el envío para schedule {}: {}",
                    candidate.key.schedule_id,
                    send_error
                );
                if let Err(e) = ledger.mark_failed(entry_id, &send_error.to_string()).await {
                    tracing::error!("❌ Error sellando fallo en el ledger: {}", e);
                }
                DispatchOutcome::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal::Decimal;
    use std::collections::HashSet;
    use std::sync::Mutex;

    struct MemoryLedger {
        claimed: Mutex<HashSet<LedgerKey>>,
        failures: Mutex<Vec<String>>,
    }

    impl MemoryLedger {
        fn new() -> Self {
            Self {
                claimed: Mutex::new(HashSet::new()),
                failures: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl LedgerStore for MemoryLedger {
        async fn claim(&self, key: &LedgerKey) -> Result<Option<Uuid>, AppError> {
            let mut claimed = self.claimed.lock().unwrap();
            if claimed.contains(key) {
                return Ok(None);
            }
            claimed.insert(key.clone());
            Ok(Some(Uuid::new_v4()))
        }

        async fn mark_sent(&self, _entry_id: Uuid) -> Result<(), AppError> {
            Ok(())
        }

        async fn mark_failed(&self, _entry_id: Uuid, error_message: &str) -> Result<(), AppError> {
            self.failures.lock().unwrap().push(error_message.to_string());
            Ok(())
        }
    }

    struct RecordingSender {
        sent: Mutex<Vec<NotificationPayload>>,
        fail_schedules: HashSet<Uuid>,
    }

    impl RecordingSender {
        fn new() -> Self {
            Self {
                sent: Mutex::new(Vec::new()),
                fail_schedules: HashSet::new(),
            }
        }

        fn failing_for(schedule_id: Uuid) -> Self {
            let mut sender = Self::new();
            sender.fail_schedules.insert(schedule_id);
            sender
        }
    }

    #[async_trait]
    impl NotificationSender for RecordingSender {
        async fn send(&self, payload: &NotificationPayload) -> anyhow::Result<()> {
            if self.fail_schedules.contains(&payload.schedule_id) {
                return Err(anyhow::anyhow!("smtp connection refused"));
            }
            self.sent.lock().unwrap().push(payload.clone());
            Ok(())
        }
    }

    fn day(year: i32, month: u32, dom: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, dom).unwrap()
    }

    fn row(
        schedule_id: Uuid,
        owner_id: Uuid,
        due: Option<DateTime<Utc>>,
        due_km: Option<f64>,
        vehicle_km: Option<f64>,
    ) -> DueScheduleRow {
        DueScheduleRow {
            id: schedule_id,
            vehicle_id: Uuid::new_v4(),
            owner_id,
            vehicle_name: "Kangoo taller".to_string(),
            title: "Cambio de aceite".to_string(),
            next_due_date: due,
            next_due_mileage: due_km.and_then(Decimal::from_f64_retain),
            vehicle_mileage: vehicle_km.and_then(Decimal::from_f64_retain),
        }
    }

    fn candidate(schedule_id: Uuid, threshold: i32, today: NaiveDate) -> NotificationCandidate {
        let owner = Uuid::new_v4();
        NotificationCandidate {
            key: LedgerKey {
                user_id: owner,
                schedule_id,
                notify_date: today,
                kind: NotificationKind::Reminder,
                trigger_value: threshold.to_string(),
            },
            payload: NotificationPayload {
                user_id: owner,
                schedule_id,
                vehicle_name: "Kangoo taller".to_string(),
                title: "Cambio de aceite".to_string(),
                kind: "reminder".to_string(),
                trigger_value: threshold.to_string(),
                due_date: None,
                message: "test".to_string(),
            },
        }
    }

    #[test]
    fn test_reminder_matches_exact_threshold_only() {
        let today = day(2024, 7, 1);
        let owner = Uuid::new_v4();
        let rows = vec![
            // vence en exactamente 7 días: candidato para el umbral 7
            row(
                Uuid::new_v4(),
                owner,
                Some(Utc.with_ymd_and_hms(2024, 7, 8, 9, 30, 0).unwrap()),
                None,
                None,
            ),
            // vence en 5 días: ningún umbral de {7,3,1,0} matchea
            row(
                Uuid::new_v4(),
                owner,
                Some(Utc.with_ymd_and_hms(2024, 7, 6, 0, 0, 0).unwrap()),
                None,
                None,
            ),
        ];

        let candidates = NotificationEngine::reminder_candidates(
            &rows,
            &HashMap::new(),
            &[7, 3, 1, 0],
            today,
        );

        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].key.trigger_value, "7");
        assert_eq!(candidates[0].key.kind, NotificationKind::Reminder);
        assert_eq!(candidates[0].key.notify_date, today);
    }

    #[test]
    fn test_reminder_due_today_hits_threshold_zero() {
        let today = day(2024, 7, 1);
        let rows = vec![row(
            Uuid::new_v4(),
            Uuid::new_v4(),
            Some(Utc.with_ymd_and_hms(2024, 7, 1, 18, 0, 0).unwrap()),
            None,
            None,
        )];

        let candidates =
            NotificationEngine::reminder_candidates(&rows, &HashMap::new(), &[7, 3, 1, 0], today);

        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].key.trigger_value, "0");
        assert!(candidates[0].payload.message.contains("vence hoy"));
    }

    #[test]
    fn test_user_thresholds_override_defaults() {
        let today = day(2024, 7, 1);
        let owner = Uuid::new_v4();
        let rows = vec![row(
            Uuid::new_v4(),
            owner,
            Some(Utc.with_ymd_and_hms(2024, 7, 8, 0, 0, 0).unwrap()),
            None,
            None,
        )];

        // el usuario solo quiere aviso 14 días antes: a 7 días no hay candidato
        let mut thresholds = HashMap::new();
        thresholds.insert(owner, vec![14]);

        let candidates =
            NotificationEngine::reminder_candidates(&rows, &thresholds, &[7, 3, 1, 0], today);
        assert!(candidates.is_empty());
    }

    #[test]
    fn test_overdue_candidates_are_keyed_by_tier() {
        let today = day(2024, 7, 20);
        let classifier = UrgencyClassifier::new(SchedulingConfig::default());

        let rows = vec![
            // 5 días tarde: warning
            row(
                Uuid::new_v4(),
                Uuid::new_v4(),
                Some(Utc.with_ymd_and_hms(2024, 7, 15, 0, 0, 0).unwrap()),
                None,
                None,
            ),
            // 2500 km pasado: critical
            row(
                Uuid::new_v4(),
                Uuid::new_v4(),
                None,
                Some(30000.0),
                Some(32500.0),
            ),
            // vence en el futuro: no es candidato
            row(
                Uuid::new_v4(),
                Uuid::new_v4(),
                Some(Utc.with_ymd_and_hms(2024, 9, 1, 0, 0, 0).unwrap()),
                None,
                None,
            ),
        ];

        let candidates = NotificationEngine::overdue_candidates(&rows, &classifier, today);

        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].key.trigger_value, "warning");
        assert_eq!(candidates[1].key.trigger_value, "critical");
        assert!(candidates
            .iter()
            .all(|c| c.key.kind == NotificationKind::Overdue));
    }

    #[tokio::test]
    async fn test_second_dispatch_skips_duplicates() {
        let today = day(2024, 7, 1);
        let ledger = MemoryLedger::new();
        let sender = RecordingSender::new();
        let repeated = candidate(Uuid::new_v4(), 7, today);

        let first = NotificationEngine::dispatch_candidates(
            vec![repeated.clone()],
            &ledger,
            &sender,
            10,
        )
        .await;
        assert_eq!(first.sent, 1);
        assert_eq!(first.skipped_duplicate, 0);

        // misma clave, segunda corrida del día: nadie vuelve a enviar
        let second = NotificationEngine::dispatch_candidates(
            vec![repeated],
            &ledger,
            &sender,
            10,
        )
        .await;
        assert_eq!(second.sent, 0);
        assert_eq!(second.skipped_duplicate, 1);
        assert_eq!(sender.sent.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_send_failure_is_recorded_and_isolated() {
        let today = day(2024, 7, 1);
        let ledger = MemoryLedger::new();
        let failing_id = Uuid::new_v4();
        let healthy_id = Uuid::new_v4();
        let sender = RecordingSender::failing_for(failing_id);

        let summary = NotificationEngine::dispatch_candidates(
            vec![
                candidate(failing_id, 7, today),
                candidate(healthy_id, 3, today),
            ],
            &ledger,
            &sender,
            10,
        )
        .await;

        assert_eq!(summary.sent, 1);
        assert_eq!(summary.failed, 1);

        let failures = ledger.failures.lock().unwrap();
        assert_eq!(failures.len(), 1);
        assert!(failures[0].contains("smtp"));
    }

    #[tokio::test]
    async fn test_chunked_dispatch_covers_every_candidate() {
        let today = day(2024, 7, 1);
        let ledger = MemoryLedger::new();
        let sender = RecordingSender::new();

        let candidates: Vec<_> = (0..25)
            .map(|_| candidate(Uuid::new_v4(), 7, today))
            .collect();

        let summary =
            NotificationEngine::dispatch_candidates(candidates, &ledger, &sender, 10).await;

        assert_eq!(summary.candidates, 25);
        assert_eq!(summary.sent, 25);
        assert_eq!(sender.sent.lock().unwrap().len(), 25);
    }

    #[test]
    fn test_distance_only_schedule_produces_no_reminder() {
        // sin fecha de vencimiento no hay eje temporal que recordar
        let today = day(2024, 7, 1);
        let rows = vec![row(
            Uuid::new_v4(),
            Uuid::new_v4(),
            None,
            Some(30000.0),
            Some(29000.0),
        )];

        let candidates =
            NotificationEngine::reminder_candidates(&rows, &HashMap::new(), &[7, 3, 1, 0], today);
        assert!(candidates.is_empty());
    }
}
