//! Servicio de clasificación de urgencia
//!
//! Función pura: próximos vencimientos + fecha/kilometraje actual →
//! estado (pending / due_soon / overdue), días y km restantes, y severidad
//! si está vencido. Semántica OR entre ejes: basta que uno esté pasado
//! para que el schedule esté vencido.

use chrono::{DateTime, Utc};

use crate::config::SchedulingConfig;
use crate::models::schedule::{OverdueSeverity, ScheduleStatus};

/// Resultado de la clasificación de un schedule
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScheduleUrgency {
    pub status: ScheduleStatus,
    /// Días enteros hasta el vencimiento (negativo si ya pasó)
    pub days_until_due: Option<i64>,
    /// Kilómetros hasta el vencimiento (negativo si ya pasó)
    pub km_until_due: Option<f64>,
    /// Severidad, solo presente cuando el estado es overdue
    pub severity: Option<OverdueSeverity>,
}

pub struct UrgencyClassifier {
    config: SchedulingConfig,
}

impl UrgencyClassifier {
    pub fn new(config: SchedulingConfig) -> Self {
        Self { config }
    }

    /// Clasificar un schedule contra la fecha y el odómetro de hoy.
    ///
    /// Los días se comparan a granularidad de fecha (se descarta la hora);
    /// un vencimiento hoy mismo cuenta como due_soon, no como overdue.
    /// El eje de distancia solo participa si el vehículo reportó odómetro.
    pub fn classify(
        &self,
        next_due_date: Option<DateTime<Utc>>,
        next_due_mileage: Option<f64>,
        today: DateTime<Utc>,
        current_mileage: Option<f64>,
    ) -> ScheduleUrgency {
        let days_until_due =
            next_due_date.map(|due| (due.date_naive() - today.date_naive()).num_days());

        let km_until_due = match (next_due_mileage, current_mileage) {
            (Some(due_km), Some(current_km)) => Some(due_km - current_km),
            _ => None,
        };

        let date_overdue = days_until_due.map(|d| d < 0).unwrap_or(false);
        let km_overdue = km_until_due.map(|km| km < 0.0).unwrap_or(false);

        if date_overdue || km_overdue {
            let severity = self.severity_for(days_until_due, km_until_due);
            return ScheduleUrgency {
                status: ScheduleStatus::Overdue,
                days_until_due,
                km_until_due,
                severity: Some(severity),
            };
        }

        let date_soon = days_until_due
            .map(|d| d <= self.config.due_soon_window_days)
            .unwrap_or(false);
        let km_soon = km_until_due
            .map(|km| km <= self.config.due_soon_window_km)
            .unwrap_or(false);

        let status = if date_soon || km_soon {
            ScheduleStatus::DueSoon
        } else {
            ScheduleStatus::Pending
        };

        ScheduleUrgency {
            status,
            days_until_due,
            km_until_due,
            severity: None,
        }
    }

    /// Severidad de un vencimiento: cada eje vencido aporta un tier según su
    /// magnitud y se toma el más severo de los dos
    fn severity_for(&self, days_until_due: Option<i64>, km_until_due: Option<f64>) -> OverdueSeverity {
        let day_tier = days_until_due.filter(|d| *d < 0).map(|d| {
            let overdue_days = -d;
            if overdue_days >= self.config.overdue_critical_days {
                OverdueSeverity::Critical
            } else if overdue_days >= self.config.overdue_urgent_days {
                OverdueSeverity::Urgent
            } else {
                OverdueSeverity::Warning
            }
        });

        let km_tier = km_until_due.filter(|km| *km < 0.0).map(|km| {
            let overdue_km = -km;
            if overdue_km >= self.config.overdue_critical_km {
                OverdueSeverity::Critical
            } else if overdue_km >= self.config.overdue_urgent_km {
                OverdueSeverity::Urgent
            } else {
                OverdueSeverity::Warning
            }
        });

        match (day_tier, km_tier) {
            (Some(a), Some(b)) => a.max(b),
            (Some(a), None) => a,
            (None, Some(b)) => b,
            (None, None) => OverdueSeverity::Warning,
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

    fn classifier() -> UrgencyClassifier {
        UrgencyClassifier::new(SchedulingConfig::default())
    }

    #[test]
    fn test_six_month_rule_five_days_late_is_warning() {
        // vencía el 15 de julio, hoy es 20 de julio
        let urgency = classifier().classify(Some(date(2024, 7, 15)), None, date(2024, 7, 20), None);
        assert_eq!(urgency.status, ScheduleStatus::Overdue);
        assert_eq!(urgency.days_until_due, Some(-5));
        assert_eq!(urgency.severity, Some(OverdueSeverity::Warning));
    }

    #[test]
    fn test_mileage_overdue_by_1500_km() {
        let urgency = classifier().classify(None, Some(30000.0), date(2024, 7, 20), Some(31500.0));
        assert_eq!(urgency.status, ScheduleStatus::Overdue);
        assert_eq!(urgency.km_until_due, Some(-1500.0));
        assert_eq!(urgency.severity, Some(OverdueSeverity::Urgent));
    }

    #[test]
    fn test_overdue_wins_when_either_axis_passed() {
        // fecha pasada pero kilometraje todavía lejos: igual está vencido
        let urgency = classifier().classify(
            Some(date(2024, 7, 1)),
            Some(50000.0),
            date(2024, 7, 20),
            Some(40000.0),
        );
        assert_eq!(urgency.status, ScheduleStatus::Overdue);
    }

    #[test]
    fn test_due_today_is_due_soon_not_overdue() {
        let urgency = classifier().classify(Some(date(2024, 7, 20)), None, date(2024, 7, 20), None);
        assert_eq!(urgency.days_until_due, Some(0));
        assert_eq!(urgency.status, ScheduleStatus::DueSoon);
        assert_eq!(urgency.severity, None);
    }

    #[test]
    fn test_due_soon_window_boundaries() {
        let inside = classifier().classify(Some(date(2024, 8, 10)), None, date(2024, 7, 20), None);
        assert_eq!(inside.status, ScheduleStatus::DueSoon);

        let outside = classifier().classify(Some(date(2024, 9, 20)), None, date(2024, 7, 20), None);
        assert_eq!(outside.status, ScheduleStatus::Pending);
    }

    #[test]
    fn test_severity_takes_the_worse_axis() {
        // 5 días tarde (warning) pero 2500 km pasado (critical)
        let urgency = classifier().classify(
            Some(date(2024, 7, 15)),
            Some(30000.0),
            date(2024, 7, 20),
            Some(32500.0),
        );
        assert_eq!(urgency.severity, Some(OverdueSeverity::Critical));
    }

    #[test]
    fn test_time_of_day_is_ignored_for_day_counts() {
        let due = Utc.with_ymd_and_hms(2024, 7, 21, 1, 0, 0).unwrap();
        let today = Utc.with_ymd_and_hms(2024, 7, 20, 23, 59, 0).unwrap();
        let urgency = classifier().classify(Some(due), None, today, None);
        assert_eq!(urgency.days_until_due, Some(1));
    }

    #[test]
    fn test_mileage_axis_without_odometer_does_not_classify() {
        // eje de distancia sin odómetro reportado: no puede vencer por km
        let urgency = classifier().classify(None, Some(30000.0), date(2024, 7, 20), None);
        assert_eq!(urgency.status, ScheduleStatus::Pending);
        assert_eq!(urgency.km_until_due, None);
    }

    #[test]
    fn test_no_axes_defined_stays_pending() {
        let urgency = classifier().classify(None, None, date(2024, 7, 20), None);
        assert_eq!(urgency.status, ScheduleStatus::Pending);
        assert_eq!(urgency.severity, None);
    }

    #[test]
    fn test_reclassification_is_stable_for_same_inputs() {
        let c = classifier();
        let first = c.classify(
            Some(date(2024, 7, 15)),
            Some(30000.0),
            date(2024, 7, 20),
            Some(29000.0),
        );
        let second = c.classify(
            Some(date(2024, 7, 15)),
            Some(30000.0),
            date(2024, 7, 20),
            Some(29000.0),
        );
        assert_eq!(first, second);
    }
}
