//! Modelo de RecurrenceRule
//!
//! Regla de recurrencia declarativa: intervalo de tiempo opcional y/o
//! intervalo de distancia opcional. Tipo de valor puro; la única lógica
//! que lleva es su propia validación.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Unidad del intervalo de tiempo - se almacena como TEXT en el schema
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum IntervalUnit {
    Days,
    Weeks,
    Months,
    Years,
}

impl IntervalUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            IntervalUnit::Days => "days",
            IntervalUnit::Weeks => "weeks",
            IntervalUnit::Months => "months",
            IntervalUnit::Years => "years",
        }
    }

    pub fn parse(value: &str) -> Option<IntervalUnit> {
        match value {
            "days" => Some(IntervalUnit::Days),
            "weeks" => Some(IntervalUnit::Weeks),
            "months" => Some(IntervalUnit::Months),
            "years" => Some(IntervalUnit::Years),
            _ => None,
        }
    }
}

/// Intervalo de tiempo de una regla (ej. cada 6 meses)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct TimeInterval {
    pub value: u32,
    pub unit: IntervalUnit,
}

/// Regla de recurrencia ya resuelta (sin referencia a definición ni a custom)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecurrenceRule {
    pub time_interval: Option<TimeInterval>,
    pub distance_interval_km: Option<f64>,
}

impl RecurrenceRule {
    /// Armar la regla desde las columnas resueltas de un registro
    pub fn from_columns(
        time_value: Option<i32>,
        time_unit: Option<&str>,
        distance_km: Option<Decimal>,
    ) -> RecurrenceRule {
        let time_interval = match (time_value, time_unit.and_then(IntervalUnit::parse)) {
            (Some(value), Some(unit)) if value > 0 => Some(TimeInterval {
                value: value as u32,
                unit,
            }),
            _ => None,
        };

        RecurrenceRule {
            time_interval,
            distance_interval_km: distance_km.and_then(|d| d.to_f64()),
        }
    }

    /// Invariante: al menos uno de los dos intervalos debe estar presente
    /// y ambos deben ser positivos
    pub fn validate(&self) -> Result<(), String> {
        if !self.has_time_interval() && !self.has_distance_interval() {
            return Err(
                "La regla de recurrencia necesita un intervalo de tiempo o de kilometraje"
                    .to_string(),
            );
        }

        if let Some(interval) = &self.time_interval {
            if interval.value == 0 {
                return Err("El intervalo de tiempo debe ser mayor a cero".to_string());
            }
        }

        if let Some(km) = self.distance_interval_km {
            if km <= 0.0 {
                return Err("El intervalo de kilometraje debe ser mayor a cero".to_string());
            }
        }

        Ok(())
    }

    pub fn has_time_interval(&self) -> bool {
        self.time_interval.is_some()
    }

    pub fn has_distance_interval(&self) -> bool {
        self.distance_interval_km.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_without_intervals_is_rejected() {
        let rule = RecurrenceRule {
            time_interval: None,
            distance_interval_km: None,
        };
        assert!(rule.validate().is_err());
    }

    #[test]
    fn test_rule_with_single_interval_is_valid() {
        let time_only = RecurrenceRule {
            time_interval: Some(TimeInterval {
                value: 6,
                unit: IntervalUnit::Months,
            }),
            distance_interval_km: None,
        };
        assert!(time_only.validate().is_ok());

        let distance_only = RecurrenceRule {
            time_interval: None,
            distance_interval_km: Some(10000.0),
        };
        assert!(distance_only.validate().is_ok());
    }

    #[test]
    fn test_rule_with_nonpositive_values_is_rejected() {
        let zero_time = RecurrenceRule {
            time_interval: Some(TimeInterval {
                value: 0,
                unit: IntervalUnit::Days,
            }),
            distance_interval_km: None,
        };
        assert!(zero_time.validate().is_err());

        let negative_km = RecurrenceRule {
            time_interval: None,
            distance_interval_km: Some(-500.0),
        };
        assert!(negative_km.validate().is_err());
    }

    #[test]
    fn test_interval_unit_parse() {
        assert_eq!(IntervalUnit::parse("months"), Some(IntervalUnit::Months));
        assert_eq!(IntervalUnit::parse("fortnights"), None);
        assert_eq!(IntervalUnit::Months.as_str(), "months");
    }

    #[test]
    fn test_from_columns_ignores_incomplete_time_interval() {
        // valor sin unidad no produce intervalo de tiempo
        let rule = RecurrenceRule::from_columns(Some(6), None, None);
        assert!(rule.time_interval.is_none());

        let rule = RecurrenceRule::from_columns(Some(6), Some("months"), None);
        assert_eq!(
            rule.time_interval,
            Some(TimeInterval {
                value: 6,
                unit: IntervalUnit::Months
            })
        );
    }
}
