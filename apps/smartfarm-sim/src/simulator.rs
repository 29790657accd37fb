use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;

use crate::control::auto_adjust;
use crate::render::View;
use crate::snapshot::{
    SensorSnapshot, SEED_ETHYLENE_PPM, SEED_HUMIDITY_PERCENT, SEED_TEMPERATURE_C,
};

const AIRFLOW_FLOOR_PERCENT: f64 = 70.0;
const AIRFLOW_SPAN_PERCENT: f64 = 20.0;

/// Full width of the uniform jitter applied around each base value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JitterProfile {
    pub temperature_span: f64,
    pub humidity_span: f64,
    pub ethylene_span: f64,
    pub default_period: Duration,
}

impl JitterProfile {
    pub const DASHBOARD: JitterProfile = JitterProfile {
        temperature_span: 2.0,
        humidity_span: 8.0,
        ethylene_span: 0.8,
        default_period: Duration::from_millis(3000),
    };

    /// The ventilation view swings temperature wider so the fan logic has something to do.
    pub const VENTILATION: JitterProfile = JitterProfile {
        temperature_span: 4.0,
        humidity_span: 8.0,
        ethylene_span: 0.8,
        default_period: Duration::from_millis(2000),
    };

    pub fn for_view(view: View) -> Self {
        match view {
            View::Dashboard => Self::DASHBOARD,
            View::Ventilation => Self::VENTILATION,
        }
    }
}

pub struct Simulator {
    rng: StdRng,
    profile: JitterProfile,
    ticks: u64,
}

impl Simulator {
    pub fn new(profile: JitterProfile, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            rng,
            profile,
            ticks: 0,
        }
    }

    pub fn profile(&self) -> JitterProfile {
        self.profile
    }

    pub fn set_profile(&mut self, profile: JitterProfile) {
        self.profile = profile;
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Regenerates the four readings around their base values and, when automatic
    /// ventilation is on, re-derives the fan from the new temperature. In manual mode the
    /// fan fields are left exactly as the user set them.
    pub fn tick(&mut self, snapshot: &mut SensorSnapshot) {
        self.ticks += 1;

        snapshot.temperature = SEED_TEMPERATURE_C + self.jitter(self.profile.temperature_span);
        snapshot.humidity = SEED_HUMIDITY_PERCENT + self.jitter(self.profile.humidity_span);
        snapshot.ethylene_level = SEED_ETHYLENE_PPM + self.jitter(self.profile.ethylene_span);
        snapshot.airflow_level = (AIRFLOW_FLOOR_PERCENT
            + self.rng.gen::<f64>() * AIRFLOW_SPAN_PERCENT)
            .clamp(0.0, 100.0);

        if snapshot.auto_ventilation_on {
            let setting = auto_adjust(snapshot.temperature, snapshot.fan_direction);
            snapshot.apply_fan_setting(setting);
        }

        tracing::trace!(
            tick = self.ticks,
            temperature = snapshot.temperature,
            humidity = snapshot.humidity,
            ethylene = snapshot.ethylene_level,
            airflow = snapshot.airflow_level,
            fan_direction = %snapshot.fan_direction,
            fan_speed = snapshot.fan_speed_percent,
            "simulated readings updated"
        );
    }

    fn jitter(&mut self, span: f64) -> f64 {
        (self.rng.gen::<f64>() - 0.5) * span
    }
}
