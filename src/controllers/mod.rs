//! Controllers: validación de entrada y mapeo requests → services

pub mod definition_controller;
pub mod notification_controller;
pub mod schedule_controller;
pub mod vehicle_controller;

pub use definition_controller::DefinitionController;
pub use notification_controller::NotificationController;
pub use schedule_controller::ScheduleController;
pub use vehicle_controller::VehicleController;
