pub mod completion_routes;
pub mod definition_routes;
pub mod notification_routes;
pub mod schedule_routes;
pub mod vehicle_routes;
