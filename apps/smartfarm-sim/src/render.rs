use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::str::FromStr;

use crate::alerts::{
    derive_alerts, ventilation_notices, AlertKind, AlertSeverity, VentilationNotice,
};
use crate::classify::{classify, ventilation_temperature_band, MetricKind, StatusBand};
use crate::control::FanDirection;
use crate::error::ParseEnumError;
use crate::i18n::{dashboard_strings, ventilation_strings, Locale};
use crate::snapshot::SensorSnapshot;

const ETHYLENE_GAUGE_MAX_PPM: f64 = 5.0;
const GAUGE_WIDTH: usize = 20;
const LABEL_WIDTH: usize = 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum View {
    #[default]
    Dashboard,
    Ventilation,
}

impl View {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Ventilation => "ventilation",
        }
    }
}

impl std::fmt::Display for View {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for View {
    type Err = ParseEnumError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "dashboard" | "home" => Ok(Self::Dashboard),
            "ventilation" | "fan" | "airflow" => Ok(Self::Ventilation),
            _ => Err(ParseEnumError {
                what: "view",
                value: raw.trim().to_string(),
                expected: "dashboard, ventilation",
            }),
        }
    }
}

pub fn render(view: View, snapshot: &SensorSnapshot, locale: Locale) -> String {
    match view {
        View::Dashboard => render_dashboard(snapshot, locale),
        View::Ventilation => render_ventilation(snapshot, locale),
    }
}

/// Fill of the ethylene bar: 0..=5 ppm mapped onto 0..=100 %.
pub fn ethylene_gauge_percent(ethylene_level: f64) -> f64 {
    (ethylene_level / ETHYLENE_GAUGE_MAX_PPM * 100.0).clamp(0.0, 100.0)
}

fn gauge(percent: f64) -> String {
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * GAUGE_WIDTH as f64).round() as usize;
    format!(
        "[{}{}]",
        "#".repeat(filled),
        "-".repeat(GAUGE_WIDTH - filled)
    )
}

fn badge(band: StatusBand, optimal: &str, warning: &str, critical: &str) -> String {
    let label = match band {
        StatusBand::Optimal => optimal,
        StatusBand::Warning => warning,
        StatusBand::Critical => critical,
    };
    if band.is_alarming() {
        format!("[!{label}!]")
    } else {
        format!("[{label}]")
    }
}

fn heading(out: &mut String, title: &str, subtitle: &str) {
    let _ = writeln!(out, "== {title} ==");
    let _ = writeln!(out, "{subtitle}");
    out.push('\n');
}

fn row(out: &mut String, label: &str, value: &str) {
    let _ = writeln!(out, "  {label:<width$}{value}", width = LABEL_WIDTH);
}

pub fn render_dashboard(snapshot: &SensorSnapshot, locale: Locale) -> String {
    let t = dashboard_strings(locale);
    let band_badge = |band| badge(band, t.optimal, t.warning, t.critical);
    let switch = |on: bool| if on { t.on } else { t.off };
    let mut out = String::new();

    heading(&mut out, t.title, t.subtitle);

    let ethylene_band = classify(snapshot.ethylene_level, MetricKind::Ethylene);
    row(
        &mut out,
        t.ethylene,
        &format!(
            "{:.1} ppm  {}",
            snapshot.ethylene_level,
            band_badge(ethylene_band)
        ),
    );
    row(
        &mut out,
        "",
        &format!(
            "{} 0-{ETHYLENE_GAUGE_MAX_PPM:.0} ppm",
            gauge(ethylene_gauge_percent(snapshot.ethylene_level))
        ),
    );
    row(
        &mut out,
        t.temperature,
        &format!(
            "{:.1}°C  {}",
            snapshot.temperature,
            band_badge(classify(snapshot.temperature, MetricKind::Temperature))
        ),
    );
    row(
        &mut out,
        t.humidity,
        &format!(
            "{:.0}%  {}",
            snapshot.humidity,
            band_badge(classify(snapshot.humidity, MetricKind::Humidity))
        ),
    );
    row(&mut out, t.airflow, &format!("{:.0}%", snapshot.airflow_level));
    out.push('\n');

    let _ = writeln!(out, "{}", t.controls);
    row(&mut out, t.ventilation, switch(snapshot.ventilation_on));
    row(
        &mut out,
        t.auto_vent,
        if snapshot.auto_ventilation_on {
            t.active
        } else {
            t.inactive
        },
    );
    row(&mut out, t.irrigation, switch(snapshot.irrigation_on));
    row(&mut out, t.lighting, switch(snapshot.lighting_on));
    out.push('\n');

    let _ = writeln!(out, "{}", t.alerts);
    let alerts = derive_alerts(snapshot);
    if alerts.is_empty() {
        let _ = writeln!(out, "  {}", t.no_alerts);
    }
    for alert in alerts {
        let marker = match alert.severity {
            AlertSeverity::Critical => "!!",
            AlertSeverity::Warning => " !",
            AlertSeverity::Ok => "ok",
        };
        let message = match alert.kind {
            AlertKind::EthyleneRipening => t.ethylene_alert,
            AlertKind::TemperatureOutOfRange => t.temp_alert,
            AlertKind::AllNominal => t.nominal,
        };
        let _ = writeln!(out, "  {marker} {message}");
    }

    out
}

pub fn render_ventilation(snapshot: &SensorSnapshot, locale: Locale) -> String {
    let t = ventilation_strings(locale);
    let mut out = String::new();

    heading(&mut out, t.title, t.subtitle);

    let band = ventilation_temperature_band(snapshot.temperature);
    row(
        &mut out,
        t.temperature,
        &format!(
            "{:.1}°C  {}",
            snapshot.temperature,
            badge(band, t.optimal, t.warning, t.critical)
        ),
    );

    let (direction_label, arrow) = match snapshot.fan_direction {
        FanDirection::Clockwise => (t.clockwise, "(cw)"),
        FanDirection::Anticlockwise => (t.anticlockwise, "(ccw)"),
    };
    row(&mut out, t.fan_control, &format!("{direction_label} {arrow}"));
    row(
        &mut out,
        t.fan_speed,
        &format!("{}%", snapshot.fan_speed_percent),
    );
    row(
        &mut out,
        t.airflow_level,
        &format!(
            "{:.0}%  {}",
            snapshot.airflow_level,
            gauge(snapshot.airflow_level)
        ),
    );
    out.push('\n');

    if snapshot.auto_ventilation_on {
        let _ = writeln!(out, "{}", t.auto_mode);
        row(&mut out, t.auto_mode, t.active);
        let _ = writeln!(out, "  {}", t.auto_mode_desc);
    } else {
        let _ = writeln!(out, "{}", t.manual_control);
        row(&mut out, t.auto_mode, t.inactive);
        let _ = writeln!(out, "  {}", t.manual_mode_desc);
        row(&mut out, t.fan_direction, "`fan flip`");
        row(
            &mut out,
            t.fan_speed,
            &format!("`fan -`  {}%  `fan +`", snapshot.fan_speed_percent),
        );
    }
    out.push('\n');

    let _ = writeln!(out, "{}", t.system_status);
    for notice in ventilation_notices(snapshot.temperature) {
        let line = match notice {
            VentilationNotice::TemperatureOptimal => format!("ok {}", t.temp_optimal),
            VentilationNotice::ExhaustingHotAir => format!(" ! {}", t.temp_high),
            VentilationNotice::PullingFreshAir => format!(" ~ {}", t.temp_low),
        };
        let _ = writeln!(out, "  {line}");
    }

    out
}
