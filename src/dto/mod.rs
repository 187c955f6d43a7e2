//! DTOs de requests y responses de la API

pub mod completion_dto;
pub mod definition_dto;
pub mod notification_dto;
pub mod schedule_dto;
pub mod vehicle_dto;
