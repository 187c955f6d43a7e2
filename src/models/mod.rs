//! Modelos de dominio del motor de mantenimiento

pub mod completion;
pub mod definition;
pub mod notification;
pub mod recurrence;
pub mod schedule;
pub mod vehicle;

pub use completion::CompletionRecord;
pub use definition::MaintenanceDefinition;
pub use notification::{LedgerKey, NotificationKind, SendStatus, UserNotificationSettings};
pub use recurrence::{IntervalUnit, RecurrenceRule, TimeInterval};
pub use schedule::{MaintenanceSchedule, OverdueSeverity, ScheduleStatus};
pub use vehicle::Vehicle;
