//! Services module
//!
//! Lógica de negocio del motor de mantenimiento: cálculo puro de
//! vencimientos y urgencia, ciclo de vida de schedules y el pase batch
//! de notificaciones con su dedupe.

pub mod due_date_service;
pub mod notification_engine;
pub mod notification_sender;
pub mod schedule_lifecycle;
pub mod urgency_service;

pub use due_date_service::{DueDateCalculator, NextDue};
pub use notification_engine::{LedgerStore, NotificationEngine, RunSummary};
pub use notification_sender::{sender_from_config, LogSender, NotificationSender, WebhookSender};
pub use schedule_lifecycle::{AttachSource, ScheduleLifecycle};
pub use urgency_service::{ScheduleUrgency, UrgencyClassifier};
