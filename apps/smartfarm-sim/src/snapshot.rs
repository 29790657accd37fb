use serde::{Deserialize, Serialize};

use crate::control::{FanDirection, FanSetting, MAX_FAN_SPEED};

pub const SEED_TEMPERATURE_C: f64 = 24.5;
pub const SEED_HUMIDITY_PERCENT: f64 = 62.0;
pub const SEED_ETHYLENE_PPM: f64 = 2.3;
pub const SEED_AIRFLOW_PERCENT: f64 = 82.0;
pub const SEED_FAN_SPEED_PERCENT: u8 = 75;

/// Step applied by the manual faster/slower buttons.
pub const FAN_SPEED_STEP: i16 = 10;

/// Latest simulated readings plus the actuator switches. Replaced field by field on each
/// generator tick and by user actions; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorSnapshot {
    pub temperature: f64,
    pub humidity: f64,
    pub ethylene_level: f64,
    pub airflow_level: f64,
    pub ventilation_on: bool,
    pub irrigation_on: bool,
    pub lighting_on: bool,
    pub auto_ventilation_on: bool,
    pub fan_direction: FanDirection,
    pub fan_speed_percent: u8,
}

impl Default for SensorSnapshot {
    fn default() -> Self {
        Self {
            temperature: SEED_TEMPERATURE_C,
            humidity: SEED_HUMIDITY_PERCENT,
            ethylene_level: SEED_ETHYLENE_PPM,
            airflow_level: SEED_AIRFLOW_PERCENT,
            ventilation_on: false,
            irrigation_on: true,
            lighting_on: true,
            auto_ventilation_on: true,
            fan_direction: FanDirection::Clockwise,
            fan_speed_percent: SEED_FAN_SPEED_PERCENT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Control {
    Ventilation,
    Irrigation,
    Lighting,
    AutoVentilation,
}

impl Control {
    pub const ALL: [Control; 4] = [
        Control::Ventilation,
        Control::Irrigation,
        Control::Lighting,
        Control::AutoVentilation,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ventilation => "ventilation",
            Self::Irrigation => "irrigation",
            Self::Lighting => "lighting",
            Self::AutoVentilation => "auto",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "ventilation" | "vent" => Some(Self::Ventilation),
            "irrigation" | "water" => Some(Self::Irrigation),
            "lighting" | "light" | "lights" => Some(Self::Lighting),
            "auto" | "auto-ventilation" | "autovent" => Some(Self::AutoVentilation),
            _ => None,
        }
    }
}

impl std::fmt::Display for Control {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    Applied,
    /// Manual fan actions are ignored while automatic ventilation owns the fan.
    IgnoredAutoMode,
}

impl SensorSnapshot {
    pub fn control(&self, control: Control) -> bool {
        match control {
            Control::Ventilation => self.ventilation_on,
            Control::Irrigation => self.irrigation_on,
            Control::Lighting => self.lighting_on,
            Control::AutoVentilation => self.auto_ventilation_on,
        }
    }

    /// Flips the switch and returns its new state.
    pub fn toggle(&mut self, control: Control) -> bool {
        let slot = match control {
            Control::Ventilation => &mut self.ventilation_on,
            Control::Irrigation => &mut self.irrigation_on,
            Control::Lighting => &mut self.lighting_on,
            Control::AutoVentilation => &mut self.auto_ventilation_on,
        };
        *slot = !*slot;
        *slot
    }

    pub fn nudge_fan_speed(&mut self, delta: i16) -> ActionOutcome {
        if self.auto_ventilation_on {
            return ActionOutcome::IgnoredAutoMode;
        }
        let next = i16::from(self.fan_speed_percent)
            .saturating_add(delta)
            .clamp(0, i16::from(MAX_FAN_SPEED));
        self.fan_speed_percent = next as u8;
        ActionOutcome::Applied
    }

    pub fn flip_fan_direction(&mut self) -> ActionOutcome {
        if self.auto_ventilation_on {
            return ActionOutcome::IgnoredAutoMode;
        }
        self.fan_direction = self.fan_direction.flipped();
        ActionOutcome::Applied
    }

    pub fn fan_setting(&self) -> FanSetting {
        FanSetting {
            direction: self.fan_direction,
            speed_percent: self.fan_speed_percent,
        }
    }

    pub(crate) fn apply_fan_setting(&mut self, setting: FanSetting) {
        self.fan_direction = setting.direction;
        self.fan_speed_percent = setting.speed_percent.min(MAX_FAN_SPEED);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manual() -> SensorSnapshot {
        SensorSnapshot {
            auto_ventilation_on: false,
            ..SensorSnapshot::default()
        }
    }

    #[test]
    fn seed_values_match_session_start() {
        let snapshot = SensorSnapshot::default();
        assert_eq!(snapshot.temperature, 24.5);
        assert_eq!(snapshot.humidity, 62.0);
        assert_eq!(snapshot.ethylene_level, 2.3);
        assert_eq!(snapshot.airflow_level, 82.0);
        assert!(!snapshot.ventilation_on);
        assert!(snapshot.irrigation_on);
        assert!(snapshot.lighting_on);
        assert!(snapshot.auto_ventilation_on);
        assert_eq!(snapshot.fan_direction, FanDirection::Clockwise);
        assert_eq!(snapshot.fan_speed_percent, 75);
    }

    #[test]
    fn toggling_twice_restores_every_control() {
        let original = SensorSnapshot::default();
        for control in Control::ALL {
            let mut snapshot = original.clone();
            let flipped = snapshot.toggle(control);
            assert_eq!(flipped, !original.control(control));
            snapshot.toggle(control);
            assert_eq!(snapshot, original, "control {control}");
        }
    }

    #[test]
    fn fan_speed_saturates_at_bounds() {
        let mut snapshot = manual();
        for _ in 0..5 {
            snapshot.nudge_fan_speed(FAN_SPEED_STEP);
        }
        assert_eq!(snapshot.fan_speed_percent, 100);

        for _ in 0..15 {
            snapshot.nudge_fan_speed(-FAN_SPEED_STEP);
        }
        assert_eq!(snapshot.fan_speed_percent, 0);
    }

    #[test]
    fn extreme_nudges_saturate_instead_of_overflowing() {
        let mut snapshot = manual();
        assert_eq!(snapshot.nudge_fan_speed(i16::MAX), ActionOutcome::Applied);
        assert_eq!(snapshot.fan_speed_percent, 100);
        assert_eq!(snapshot.nudge_fan_speed(i16::MIN), ActionOutcome::Applied);
        assert_eq!(snapshot.fan_speed_percent, 0);
    }

    #[test]
    fn manual_actions_are_ignored_in_auto_mode() {
        let mut snapshot = SensorSnapshot::default();
        assert_eq!(
            snapshot.nudge_fan_speed(FAN_SPEED_STEP),
            ActionOutcome::IgnoredAutoMode
        );
        assert_eq!(snapshot.flip_fan_direction(), ActionOutcome::IgnoredAutoMode);
        assert_eq!(snapshot, SensorSnapshot::default());
    }

    #[test]
    fn manual_flip_changes_direction() {
        let mut snapshot = manual();
        assert_eq!(snapshot.flip_fan_direction(), ActionOutcome::Applied);
        assert_eq!(snapshot.fan_direction, FanDirection::Anticlockwise);
    }

    #[test]
    fn control_names_parse_with_aliases() {
        assert_eq!(Control::parse("Lighting"), Some(Control::Lighting));
        assert_eq!(Control::parse(" vent "), Some(Control::Ventilation));
        assert_eq!(Control::parse("auto"), Some(Control::AutoVentilation));
        assert_eq!(Control::parse("water"), Some(Control::Irrigation));
        assert_eq!(Control::parse("heater"), None);
    }
}
