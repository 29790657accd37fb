use clap::ValueEnum;
use serde::{Deserialize, Serialize};

const EXHAUST_ABOVE_C: f64 = 26.0;
const INTAKE_BELOW_C: f64 = 22.0;
const EXHAUST_BASE_SPEED: f64 = 60.0;
const INTAKE_BASE_SPEED: f64 = 80.0;
const INTAKE_MIN_SPEED: f64 = 30.0;
const SPEED_PER_DEGREE: f64 = 10.0;
const CIRCULATION_SPEED: u8 = 50;

pub const MAX_FAN_SPEED: u8 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum FanDirection {
    /// Exhausts hot air.
    Clockwise,
    /// Pulls fresh air in.
    Anticlockwise,
}

impl FanDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Clockwise => "clockwise",
            Self::Anticlockwise => "anticlockwise",
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Self::Clockwise => Self::Anticlockwise,
            Self::Anticlockwise => Self::Clockwise,
        }
    }
}

impl std::fmt::Display for FanDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FanSetting {
    pub direction: FanDirection,
    pub speed_percent: u8,
}

/// Derives the fan setting for automatic mode from the latest temperature.
///
/// Inside the 22..=26 °C comfort window the fan keeps its previous direction and runs at
/// normal circulation speed.
pub fn auto_adjust(temperature: f64, previous: FanDirection) -> FanSetting {
    if temperature > EXHAUST_ABOVE_C {
        let speed = (EXHAUST_BASE_SPEED + (temperature - EXHAUST_ABOVE_C) * SPEED_PER_DEGREE)
            .min(f64::from(MAX_FAN_SPEED));
        FanSetting {
            direction: FanDirection::Clockwise,
            speed_percent: to_percent(speed),
        }
    } else if temperature < INTAKE_BELOW_C {
        let speed = (INTAKE_BASE_SPEED - (INTAKE_BELOW_C - temperature) * SPEED_PER_DEGREE)
            .max(INTAKE_MIN_SPEED);
        FanSetting {
            direction: FanDirection::Anticlockwise,
            speed_percent: to_percent(speed),
        }
    } else {
        FanSetting {
            direction: previous,
            speed_percent: CIRCULATION_SPEED,
        }
    }
}

fn to_percent(value: f64) -> u8 {
    value.round().clamp(0.0, f64::from(MAX_FAN_SPEED)) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hot_air_is_exhausted() {
        let setting = auto_adjust(27.0, FanDirection::Anticlockwise);
        assert_eq!(setting.direction, FanDirection::Clockwise);
        assert_eq!(setting.speed_percent, 70);
    }

    #[test]
    fn exhaust_speed_is_capped() {
        let setting = auto_adjust(31.0, FanDirection::Clockwise);
        assert_eq!(setting.direction, FanDirection::Clockwise);
        assert_eq!(setting.speed_percent, 100);
        assert_eq!(auto_adjust(45.0, FanDirection::Clockwise).speed_percent, 100);
    }

    #[test]
    fn cool_air_pulls_intake() {
        let setting = auto_adjust(20.0, FanDirection::Clockwise);
        assert_eq!(setting.direction, FanDirection::Anticlockwise);
        assert_eq!(setting.speed_percent, 60);

        let setting = auto_adjust(21.5, FanDirection::Clockwise);
        assert_eq!(setting.speed_percent, 75);
    }

    #[test]
    fn intake_speed_has_a_floor() {
        assert_eq!(auto_adjust(17.0, FanDirection::Clockwise).speed_percent, 30);
        assert_eq!(auto_adjust(-5.0, FanDirection::Clockwise).speed_percent, 30);
    }

    #[test]
    fn comfort_window_keeps_direction() {
        for previous in [FanDirection::Clockwise, FanDirection::Anticlockwise] {
            for temperature in [22.0, 24.0, 26.0] {
                let setting = auto_adjust(temperature, previous);
                assert_eq!(setting.direction, previous);
                assert_eq!(setting.speed_percent, 50);
            }
        }
    }

    #[test]
    fn fractional_speeds_round_to_nearest_percent() {
        assert_eq!(auto_adjust(26.74, FanDirection::Clockwise).speed_percent, 67);
        assert_eq!(auto_adjust(26.76, FanDirection::Clockwise).speed_percent, 68);
    }

    #[test]
    fn flip_is_an_involution() {
        assert_eq!(FanDirection::Clockwise.flipped().flipped(), FanDirection::Clockwise);
        assert_eq!(FanDirection::Clockwise.flipped(), FanDirection::Anticlockwise);
    }
}
