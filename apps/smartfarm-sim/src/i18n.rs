use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::ParseEnumError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Es,
    Hi,
}

impl Locale {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Es => "es",
            Self::Hi => "hi",
        }
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Locale {
    type Err = ParseEnumError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Self::En),
            "es" => Ok(Self::Es),
            "hi" => Ok(Self::Hi),
            _ => Err(ParseEnumError {
                what: "locale",
                value: raw.trim().to_string(),
                expected: "en, es, hi",
            }),
        }
    }
}

pub struct DashboardStrings {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub temperature: &'static str,
    pub humidity: &'static str,
    pub ethylene: &'static str,
    pub airflow: &'static str,
    pub controls: &'static str,
    pub ventilation: &'static str,
    pub irrigation: &'static str,
    pub lighting: &'static str,
    pub auto_vent: &'static str,
    pub alerts: &'static str,
    pub optimal: &'static str,
    pub warning: &'static str,
    pub critical: &'static str,
    pub ethylene_alert: &'static str,
    pub temp_alert: &'static str,
    pub nominal: &'static str,
    pub no_alerts: &'static str,
    pub active: &'static str,
    pub inactive: &'static str,
    pub on: &'static str,
    pub off: &'static str,
}

pub struct VentilationStrings {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub temperature: &'static str,
    pub fan_control: &'static str,
    pub fan_speed: &'static str,
    pub fan_direction: &'static str,
    pub airflow_level: &'static str,
    pub auto_mode: &'static str,
    pub manual_control: &'static str,
    pub clockwise: &'static str,
    pub anticlockwise: &'static str,
    pub optimal: &'static str,
    pub warning: &'static str,
    pub critical: &'static str,
    pub active: &'static str,
    pub inactive: &'static str,
    pub system_status: &'static str,
    pub temp_optimal: &'static str,
    pub temp_high: &'static str,
    pub temp_low: &'static str,
    pub auto_mode_desc: &'static str,
    pub manual_mode_desc: &'static str,
}

static DASHBOARD_EN: DashboardStrings = DashboardStrings {
    title: "Smart Farm Control Center",
    subtitle: "Real-time monitoring and control system",
    temperature: "Temperature",
    humidity: "Humidity",
    ethylene: "Ethylene Gas",
    airflow: "Airflow",
    controls: "System Controls",
    ventilation: "Ventilation",
    irrigation: "Irrigation",
    lighting: "LED Lighting",
    auto_vent: "Auto Ventilation",
    alerts: "System Alerts",
    optimal: "Optimal",
    warning: "Warning",
    critical: "Critical",
    ethylene_alert: "Ethylene levels indicate accelerated ripening",
    temp_alert: "Temperature outside optimal range",
    nominal: "All systems operating within optimal parameters",
    no_alerts: "No active alerts",
    active: "Active",
    inactive: "Inactive",
    on: "ON",
    off: "OFF",
};

static DASHBOARD_ES: DashboardStrings = DashboardStrings {
    title: "Centro de Control Agrícola Inteligente",
    subtitle: "Sistema de monitoreo y control en tiempo real",
    temperature: "Temperatura",
    humidity: "Humedad",
    ethylene: "Gas Etileno",
    airflow: "Flujo de Aire",
    controls: "Controles del Sistema",
    ventilation: "Ventilación",
    irrigation: "Riego",
    lighting: "Iluminación LED",
    auto_vent: "Ventilación Automática",
    alerts: "Alertas del Sistema",
    optimal: "Óptimo",
    warning: "Advertencia",
    critical: "Crítico",
    ethylene_alert: "Los niveles de etileno indican maduración acelerada",
    temp_alert: "Temperatura fuera del rango óptimo",
    nominal: "Todos los sistemas operan dentro de parámetros óptimos",
    no_alerts: "Sin alertas activas",
    active: "Activo",
    inactive: "Inactivo",
    on: "ENCENDIDO",
    off: "APAGADO",
};

static VENTILATION_EN: VentilationStrings = VentilationStrings {
    title: "Smart Airflow Control",
    subtitle: "Temperature-Based Fan Logic System",
    temperature: "Current Temperature",
    fan_control: "Fan Control Panel",
    fan_speed: "Fan Speed",
    fan_direction: "Fan Direction",
    airflow_level: "Airflow Level",
    auto_mode: "Auto Mode",
    manual_control: "Manual Control",
    clockwise: "Clockwise (Exhaust)",
    anticlockwise: "Anticlockwise (Intake)",
    optimal: "Optimal",
    warning: "Warning",
    critical: "Critical",
    active: "Active",
    inactive: "Inactive",
    system_status: "System Status",
    temp_optimal: "Temperature within optimal range",
    temp_high: "High temperature - Fan exhausting hot air",
    temp_low: "Low temperature - Fan pulling fresh air",
    auto_mode_desc: "Smart logic manages airflow automatically",
    manual_mode_desc: "Manual control of fan direction and speed",
};

static VENTILATION_HI: VentilationStrings = VentilationStrings {
    title: "स्मार्ट वायुप्रवाह नियंत्रण",
    subtitle: "तापमान-आधारित पंखा तर्क प्रणाली",
    temperature: "वर्तमान तापमान",
    fan_control: "पंखा नियंत्रण पैनल",
    fan_speed: "पंखे की गति",
    fan_direction: "पंखे की दिशा",
    airflow_level: "वायुप्रवाह स्तर",
    auto_mode: "स्वचालित मोड",
    manual_control: "मैन्युअल नियंत्रण",
    clockwise: "दक्षिणावर्त (निकास)",
    anticlockwise: "वामावर्त (सेवन)",
    optimal: "उत्तम",
    warning: "चेतावनी",
    critical: "गंभीर",
    active: "सक्रिय",
    inactive: "निष्क्रिय",
    system_status: "सिस्टम स्थिति",
    temp_optimal: "तापमान उत्तम सीमा में",
    temp_high: "उच्च तापमान - पंखा गर्म हवा निकाल रहा है",
    temp_low: "कम तापमान - पंखा ताजी हवा खींच रहा है",
    auto_mode_desc: "स्मार्ट तर्क स्वचालित रूप से वायुप्रवाह प्रबंधित करता है",
    manual_mode_desc: "पंखे की दिशा और गति का मैन्युअल नियंत्रण",
};

/// The dashboard ships English and Spanish; other locales read the English table.
pub fn dashboard_strings(locale: Locale) -> &'static DashboardStrings {
    match locale {
        Locale::Es => &DASHBOARD_ES,
        Locale::En | Locale::Hi => &DASHBOARD_EN,
    }
}

/// The ventilation view ships English and Hindi; other locales read the English table.
pub fn ventilation_strings(locale: Locale) -> &'static VentilationStrings {
    match locale {
        Locale::Hi => &VENTILATION_HI,
        Locale::En | Locale::Es => &VENTILATION_EN,
    }
}
