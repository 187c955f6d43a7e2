//! Servicio de cálculo de próximo vencimiento
//!
//! Función pura: regla + ancla de completación + kilometraje actual →
//! próxima fecha y/o próximo kilometraje de vencimiento. La aritmética de
//! meses y años respeta el calendario real (31 de enero + 1 mes cae en el
//! último día de febrero, no en marzo).

use chrono::{DateTime, Duration, Months, Utc};

use crate::models::recurrence::{IntervalUnit, RecurrenceRule, TimeInterval};

/// Resultado del cálculo: cada eje puede quedar sin definir si no es computable
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NextDue {
    pub next_due_date: Option<DateTime<Utc>>,
    pub next_due_mileage: Option<f64>,
}

pub struct DueDateCalculator;

impl DueDateCalculator {
    /// Calcular el próximo vencimiento desde un ancla.
    ///
    /// - Eje temporal: ancla + intervalo, con aritmética de calendario.
    /// - Eje de distancia: ancla de kilometraje + intervalo; si el schedule
    ///   nunca registró kilometraje se usa el odómetro actual como base.
    ///   Sin ninguna de las dos bases el eje queda sin definir y el
    ///   schedule sigue siendo válido.
    pub fn compute_next_due(
        rule: &RecurrenceRule,
        anchor_date: DateTime<Utc>,
        anchor_mileage: Option<f64>,
        current_mileage: Option<f64>,
    ) -> NextDue {
        let next_due_date = rule
            .time_interval
            .and_then(|interval| Self::advance_date(anchor_date, interval));

        let next_due_mileage = rule
            .distance_interval_km
            .and_then(|interval_km| anchor_mileage.or(current_mileage).map(|base| base + interval_km));

        NextDue {
            next_due_date,
            next_due_mileage,
        }
    }

    /// Avanzar una fecha exactamente un intervalo según su unidad
    fn advance_date(anchor: DateTime<Utc>, interval: TimeInterval) -> Option<DateTime<Utc>> {
        match interval.unit {
            IntervalUnit::Days => anchor.checked_add_signed(Duration::days(interval.value as i64)),
            IntervalUnit::Weeks => anchor.checked_add_signed(Duration::weeks(interval.value as i64)),
            IntervalUnit::Months => anchor.checked_add_months(Months::new(interval.value)),
            IntervalUnit::Years => interval
                .value
                .checked_mul(12)
                .and_then(|months| anchor.checked_add_months(Months::new(months))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date(year: i32, month: u32, day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap()
    }

    fn time_rule(value: u32, unit: IntervalUnit) -> RecurrenceRule {
        RecurrenceRule {
            time_interval: Some(TimeInterval { value, unit }),
            distance_interval_km: None,
        }
    }

    fn distance_rule(km: f64) -> RecurrenceRule {
        RecurrenceRule {
            time_interval: None,
            distance_interval_km: Some(km),
        }
    }

    #[test]
    fn test_six_months_from_mid_january() {
        let result = DueDateCalculator::compute_next_due(
            &time_rule(6, IntervalUnit::Months),
            date(2024, 1, 15),
            None,
            None,
        );
        assert_eq!(result.next_due_date, Some(date(2024, 7, 15)));
        assert_eq!(result.next_due_mileage, None);
    }

    #[test]
    fn test_month_end_clamps_instead_of_overflowing() {
        // 31 de enero + 1 mes cae el 29 de febrero (2024 es bisiesto), no el 2/3 de marzo
        let result = DueDateCalculator::compute_next_due(
            &time_rule(1, IntervalUnit::Months),
            date(2024, 1, 31),
            None,
            None,
        );
        assert_eq!(result.next_due_date, Some(date(2024, 2, 29)));

        let result = DueDateCalculator::compute_next_due(
            &time_rule(1, IntervalUnit::Months),
            date(2023, 1, 31),
            None,
            None,
        );
        assert_eq!(result.next_due_date, Some(date(2023, 2, 28)));
    }

    #[test]
    fn test_days_and_weeks_advance_exactly() {
        let result = DueDateCalculator::compute_next_due(
            &time_rule(90, IntervalUnit::Days),
            date(2024, 1, 1),
            None,
            None,
        );
        assert_eq!(result.next_due_date, Some(date(2024, 3, 31)));

        let result = DueDateCalculator::compute_next_due(
            &time_rule(2, IntervalUnit::Weeks),
            date(2024, 3, 1),
            None,
            None,
        );
        assert_eq!(result.next_due_date, Some(date(2024, 3, 15)));
    }

    #[test]
    fn test_years_preserve_calendar_date() {
        let result = DueDateCalculator::compute_next_due(
            &time_rule(2, IntervalUnit::Years),
            date(2024, 5, 10),
            None,
            None,
        );
        assert_eq!(result.next_due_date, Some(date(2026, 5, 10)));
    }

    #[test]
    fn test_distance_advances_from_anchor_mileage() {
        let result = DueDateCalculator::compute_next_due(
            &distance_rule(10000.0),
            date(2024, 1, 1),
            Some(20000.0),
            Some(21500.0),
        );
        assert_eq!(result.next_due_mileage, Some(30000.0));
        assert_eq!(result.next_due_date, None);
    }

    #[test]
    fn test_distance_falls_back_to_current_mileage() {
        // sin completaciones con kilometraje, la base es el odómetro actual
        let result = DueDateCalculator::compute_next_due(
            &distance_rule(10000.0),
            date(2024, 1, 1),
            None,
            Some(31500.0),
        );
        assert_eq!(result.next_due_mileage, Some(41500.0));
    }

    #[test]
    fn test_distance_without_any_mileage_stays_unset() {
        let result = DueDateCalculator::compute_next_due(
            &distance_rule(10000.0),
            date(2024, 1, 1),
            None,
            None,
        );
        assert_eq!(result.next_due_mileage, None);
        assert_eq!(result.next_due_date, None);
    }

    #[test]
    fn test_combined_rule_computes_both_axes() {
        let rule = RecurrenceRule {
            time_interval: Some(TimeInterval {
                value: 1,
                unit: IntervalUnit::Years,
            }),
            distance_interval_km: Some(15000.0),
        };
        let result =
            DueDateCalculator::compute_next_due(&rule, date(2024, 3, 20), Some(48000.0), None);
        assert_eq!(result.next_due_date, Some(date(2025, 3, 20)));
        assert_eq!(result.next_due_mileage, Some(63000.0));
    }
}
