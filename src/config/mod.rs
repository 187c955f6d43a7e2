//! Configuración del proyecto
//!
//! Este módulo contiene la configuración de variables de entorno
//! y los parámetros del motor de programación.

pub mod environment;
pub mod scheduling;

pub use environment::*;
pub use scheduling::*;
