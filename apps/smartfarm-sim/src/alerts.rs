use serde::{Deserialize, Serialize};

use crate::classify::{ventilation_temperature_band, StatusBand};
use crate::snapshot::SensorSnapshot;

const ETHYLENE_CRITICAL_ABOVE: f64 = 3.0;
const ETHYLENE_NOMINAL_MAX: f64 = 1.5;
const TEMPERATURE_ALERT_LOW: f64 = 18.0;
const TEMPERATURE_ALERT_HIGH: f64 = 28.0;
const TEMPERATURE_NOMINAL: (f64, f64) = (20.0, 26.0);
const EXHAUST_ABOVE_C: f64 = 26.0;
const INTAKE_BELOW_C: f64 = 22.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertSeverity {
    Critical,
    Warning,
    Ok,
}

impl AlertSeverity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::Warning => "warning",
            Self::Ok => "ok",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    EthyleneRipening,
    TemperatureOutOfRange,
    AllNominal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    pub severity: AlertSeverity,
    pub kind: AlertKind,
}

impl Alert {
    pub fn message(&self) -> &'static str {
        match self.kind {
            AlertKind::EthyleneRipening => "ethylene indicates accelerated ripening",
            AlertKind::TemperatureOutOfRange => "temperature outside optimal range",
            AlertKind::AllNominal => "all systems nominal",
        }
    }
}

impl std::fmt::Display for Alert {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.severity.as_str(), self.message())
    }
}

/// Advisory banners for the current snapshot. Each rule is evaluated on its own; nothing
/// is remembered between calls.
pub fn derive_alerts(snapshot: &SensorSnapshot) -> Vec<Alert> {
    let mut alerts = Vec::new();

    if snapshot.ethylene_level > ETHYLENE_CRITICAL_ABOVE {
        alerts.push(Alert {
            severity: AlertSeverity::Critical,
            kind: AlertKind::EthyleneRipening,
        });
    }

    if snapshot.temperature < TEMPERATURE_ALERT_LOW || snapshot.temperature > TEMPERATURE_ALERT_HIGH
    {
        alerts.push(Alert {
            severity: AlertSeverity::Warning,
            kind: AlertKind::TemperatureOutOfRange,
        });
    }

    let (low, high) = TEMPERATURE_NOMINAL;
    if snapshot.ethylene_level <= ETHYLENE_NOMINAL_MAX
        && snapshot.temperature >= low
        && snapshot.temperature <= high
    {
        alerts.push(Alert {
            severity: AlertSeverity::Ok,
            kind: AlertKind::AllNominal,
        });
    }

    alerts
}

/// System status lines of the ventilation view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VentilationNotice {
    TemperatureOptimal,
    ExhaustingHotAir,
    PullingFreshAir,
}

pub fn ventilation_notices(temperature: f64) -> Vec<VentilationNotice> {
    let mut notices = Vec::new();
    if ventilation_temperature_band(temperature) == StatusBand::Optimal {
        notices.push(VentilationNotice::TemperatureOptimal);
    }
    if temperature > EXHAUST_ABOVE_C {
        notices.push(VentilationNotice::ExhaustingHotAir);
    }
    if temperature < INTAKE_BELOW_C {
        notices.push(VentilationNotice::PullingFreshAir);
    }
    notices
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(temperature: f64, ethylene_level: f64) -> SensorSnapshot {
        SensorSnapshot {
            temperature,
            ethylene_level,
            ..SensorSnapshot::default()
        }
    }

    fn kinds(alerts: &[Alert]) -> Vec<AlertKind> {
        alerts.iter().map(|alert| alert.kind).collect()
    }

    #[test]
    fn seed_snapshot_has_no_alerts() {
        assert!(derive_alerts(&SensorSnapshot::default()).is_empty());
    }

    #[test]
    fn high_ethylene_is_critical() {
        let alerts = derive_alerts(&snapshot(24.0, 3.2));
        assert_eq!(kinds(&alerts), vec![AlertKind::EthyleneRipening]);
        assert_eq!(alerts[0].severity, AlertSeverity::Critical);
        assert_eq!(
            alerts[0].to_string(),
            "critical: ethylene indicates accelerated ripening"
        );
    }

    #[test]
    fn ethylene_at_threshold_does_not_fire() {
        assert!(derive_alerts(&snapshot(24.0, 3.0)).is_empty());
    }

    #[test]
    fn temperature_out_of_range_warns_on_both_sides() {
        for temperature in [17.5, 28.5] {
            let alerts = derive_alerts(&snapshot(temperature, 2.0));
            assert_eq!(kinds(&alerts), vec![AlertKind::TemperatureOutOfRange]);
            assert_eq!(alerts[0].severity, AlertSeverity::Warning);
        }
        assert!(derive_alerts(&snapshot(18.0, 2.0)).is_empty());
        assert!(derive_alerts(&snapshot(28.0, 2.0)).is_empty());
    }

    #[test]
    fn nominal_banner_needs_low_ethylene_and_comfortable_temperature() {
        let alerts = derive_alerts(&snapshot(22.0, 1.2));
        assert_eq!(kinds(&alerts), vec![AlertKind::AllNominal]);
        assert_eq!(alerts[0].to_string(), "ok: all systems nominal");

        assert!(derive_alerts(&snapshot(27.0, 1.2)).is_empty());
        assert!(derive_alerts(&snapshot(22.0, 1.6)).is_empty());
    }

    #[test]
    fn nominal_banner_bounds_are_inclusive() {
        for temperature in [20.0, 26.0] {
            assert_eq!(
                kinds(&derive_alerts(&snapshot(temperature, 1.5))),
                vec![AlertKind::AllNominal]
            );
        }
        assert!(derive_alerts(&snapshot(19.99, 1.5)).is_empty());
        assert!(derive_alerts(&snapshot(26.01, 1.5)).is_empty());
        assert!(derive_alerts(&snapshot(24.0, 1.51)).is_empty());
    }

    #[test]
    fn rules_fire_independently() {
        let alerts = derive_alerts(&snapshot(30.0, 4.0));
        assert_eq!(
            kinds(&alerts),
            vec![AlertKind::EthyleneRipening, AlertKind::TemperatureOutOfRange]
        );
    }

    #[test]
    fn ventilation_notices_follow_temperature() {
        assert_eq!(
            ventilation_notices(24.0),
            vec![VentilationNotice::TemperatureOptimal]
        );
        assert_eq!(
            ventilation_notices(27.0),
            vec![VentilationNotice::ExhaustingHotAir]
        );
        assert_eq!(
            ventilation_notices(21.0),
            vec![VentilationNotice::PullingFreshAir]
        );
        assert_eq!(
            ventilation_notices(26.0),
            vec![VentilationNotice::TemperatureOptimal]
        );
    }
}
