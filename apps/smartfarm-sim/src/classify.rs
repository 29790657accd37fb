use clap::ValueEnum;
use serde::{Deserialize, Serialize};

const TEMPERATURE_OPTIMAL: (f64, f64) = (20.0, 26.0);
const TEMPERATURE_WARNING: (f64, f64) = (18.0, 28.0);
const HUMIDITY_OPTIMAL: (f64, f64) = (55.0, 70.0);
const HUMIDITY_WARNING: (f64, f64) = (45.0, 80.0);
const ETHYLENE_OPTIMAL_MAX: f64 = 1.5;
const ETHYLENE_WARNING_MAX: f64 = 3.0;

const VENTILATION_OPTIMAL: (f64, f64) = (22.0, 26.0);
const VENTILATION_CRITICAL_LOW: f64 = 20.0;
const VENTILATION_CRITICAL_HIGH: f64 = 28.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    Temperature,
    Humidity,
    Ethylene,
}

impl MetricKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Temperature => "temperature",
            Self::Humidity => "humidity",
            Self::Ethylene => "ethylene",
        }
    }
}

impl std::fmt::Display for MetricKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Three-level severity band shown as a badge next to each metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusBand {
    Optimal,
    Warning,
    Critical,
}

impl StatusBand {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Optimal => "optimal",
            Self::Warning => "warning",
            Self::Critical => "critical",
        }
    }

    /// Warning and critical share the destructive badge; only optimal stays neutral.
    pub fn is_alarming(self) -> bool {
        !matches!(self, Self::Optimal)
    }
}

impl std::fmt::Display for StatusBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

fn within(value: f64, (low, high): (f64, f64)) -> bool {
    value >= low && value <= high
}

/// Maps a reading to its dashboard severity band. Bands are checked in order and the
/// written bounds are inclusive.
pub fn classify(value: f64, kind: MetricKind) -> StatusBand {
    match kind {
        MetricKind::Temperature => {
            if within(value, TEMPERATURE_OPTIMAL) {
                StatusBand::Optimal
            } else if within(value, TEMPERATURE_WARNING) {
                StatusBand::Warning
            } else {
                StatusBand::Critical
            }
        }
        MetricKind::Humidity => {
            if within(value, HUMIDITY_OPTIMAL) {
                StatusBand::Optimal
            } else if within(value, HUMIDITY_WARNING) {
                StatusBand::Warning
            } else {
                StatusBand::Critical
            }
        }
        // No lower bound: a zero reading is still optimal.
        MetricKind::Ethylene => {
            if value <= ETHYLENE_OPTIMAL_MAX {
                StatusBand::Optimal
            } else if value <= ETHYLENE_WARNING_MAX {
                StatusBand::Warning
            } else {
                StatusBand::Critical
            }
        }
    }
}

/// Temperature band used by the ventilation view, which is narrower on the optimal side
/// than the dashboard band.
pub fn ventilation_temperature_band(value: f64) -> StatusBand {
    if within(value, VENTILATION_OPTIMAL) {
        StatusBand::Optimal
    } else if value > VENTILATION_CRITICAL_HIGH || value < VENTILATION_CRITICAL_LOW {
        StatusBand::Critical
    } else {
        StatusBand::Warning
    }
}
