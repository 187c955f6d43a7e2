//! Acceso a datos: un repositorio por tabla

pub mod completion_repository;
pub mod definition_repository;
pub mod ledger_repository;
pub mod schedule_repository;
pub mod settings_repository;
pub mod vehicle_repository;

pub use completion_repository::CompletionRepository;
pub use definition_repository::DefinitionRepository;
pub use ledger_repository::LedgerRepository;
pub use schedule_repository::{DueScheduleRow, ScheduleRepository};
pub use settings_repository::SettingsRepository;
pub use vehicle_repository::VehicleRepository;
