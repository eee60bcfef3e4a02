// Chamber environment - drives how fast the mycelium grows and how it looks
// Response curves follow the cultivation model used across the product

/// Conditions inside the growth chamber.
#[derive(Clone, Copy, Debug)]
pub struct Environment {
    /// Temperature in degrees Celsius.
    pub temperature: f32,
    /// Relative humidity in percent.
    pub humidity: f32,
    /// Light level in percent.
    pub light: f32,
}

impl Default for Environment {
    fn default() -> Self {
        Self {
            temperature: 24.0,
            humidity: 85.0,
            light: 50.0,
        }
    }
}

impl Environment {
    pub fn new(temperature: f32, humidity: f32, light: f32) -> Self {
        Self {
            temperature,
            humidity,
            light,
        }
    }

    /// Combined growth rate. Peaks at 24 degrees; a cold floor keeps a slow
    /// crawl below 10 while anything above 35 halts growth entirely. Dry
    /// chambers (under 50% humidity) collapse the rate to a tenth, and the
    /// light response is gentlest at half brightness.
    pub fn growth_rate(&self) -> f32 {
        let mut rate = if self.temperature < 10.0 {
            0.2
        } else if self.temperature > 35.0 {
            0.0
        } else {
            1.0 - (24.0 - self.temperature).abs() / 20.0
        };

        if self.humidity < 50.0 {
            rate *= 0.1;
        } else {
            rate *= self.humidity / 100.0;
        }

        let light_comfort = 1.0 - (50.0 - self.light).abs() / 100.0;
        rate * (0.5 + light_comfort * 0.5)
    }

    /// The window in which the lab drips rewards to the cultivator.
    pub fn is_optimal(&self) -> bool {
        self.temperature >= 20.0
            && self.temperature <= 28.0
            && self.humidity > 70.0
            && self.light > 20.0
            && self.light < 80.0
    }

    /// Stroke tint for rendered filaments, channels in [0, 1]. White at
    /// moderate temperatures, shifting red when hot and blue-violet when
    /// cold.
    pub fn stroke_tint(&self) -> (f32, f32, f32) {
        let mut r = 255.0;
        let mut g = 255.0;
        let mut b = 255.0;

        if self.temperature > 28.0 {
            let heat = (self.temperature - 28.0) * 20.0;
            g -= heat;
            b -= heat;
        } else if self.temperature < 18.0 {
            let chill = (18.0 - self.temperature) * 20.0;
            r -= chill;
            g -= chill * 0.5;
        }

        (
            r.clamp(0.0, 255.0) / 255.0,
            g.clamp(0.0, 255.0) / 255.0,
            b.clamp(0.0, 255.0) / 255.0,
        )
    }

    pub fn set_temperature(&mut self, value: f32) {
        self.temperature = value.clamp(0.0, 50.0);
    }

    pub fn set_humidity(&mut self, value: f32) {
        self.humidity = value.clamp(0.0, 100.0);
    }

    pub fn set_light(&mut self, value: f32) {
        self.light = value.clamp(0.0, 100.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn growth_rate_peaks_at_the_cultivation_optimum() {
        let env = Environment::new(24.0, 100.0, 50.0);
        assert!((env.growth_rate() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn reference_conditions_give_expected_rate() {
        // 24 C, 90% humidity, half light: 1.0 * 0.9 * 1.0
        let env = Environment::new(24.0, 90.0, 50.0);
        assert!((env.growth_rate() - 0.9).abs() < 1e-6);
    }

    #[test]
    fn cold_floor_applies_strictly_below_ten_degrees() {
        let below = Environment::new(9.9, 100.0, 50.0);
        assert!((below.growth_rate() - 0.2).abs() < 1e-6);
        // At exactly 10 the distance curve still applies.
        let boundary = Environment::new(10.0, 100.0, 50.0);
        assert!((boundary.growth_rate() - 0.3).abs() < 1e-6);
    }

    #[test]
    fn heat_halts_growth_strictly_above_thirty_five() {
        let boundary = Environment::new(35.0, 100.0, 50.0);
        assert!((boundary.growth_rate() - 0.45).abs() < 1e-5);
        let above = Environment::new(35.1, 100.0, 50.0);
        assert_eq!(above.growth_rate(), 0.0);
    }

    #[test]
    fn dry_chamber_collapses_the_rate() {
        let damp = Environment::new(24.0, 50.0, 50.0);
        assert!((damp.growth_rate() - 0.5).abs() < 1e-6);
        let dry = Environment::new(24.0, 49.9, 50.0);
        assert!((dry.growth_rate() - 0.1).abs() < 1e-5);
    }

    #[test]
    fn light_extremes_keep_three_quarters_of_the_rate() {
        let dark = Environment::new(24.0, 100.0, 0.0);
        let bright = Environment::new(24.0, 100.0, 100.0);
        assert!((dark.growth_rate() - 0.75).abs() < 1e-6);
        assert!((bright.growth_rate() - 0.75).abs() < 1e-6);
    }

    #[test]
    fn reward_window_boundaries() {
        assert!(Environment::new(20.0, 71.0, 50.0).is_optimal());
        assert!(Environment::new(28.0, 71.0, 79.9).is_optimal());
        assert!(!Environment::new(19.9, 71.0, 50.0).is_optimal());
        assert!(!Environment::new(28.1, 71.0, 50.0).is_optimal());
        assert!(!Environment::new(24.0, 70.0, 50.0).is_optimal());
        assert!(!Environment::new(24.0, 90.0, 20.0).is_optimal());
        assert!(!Environment::new(24.0, 90.0, 80.0).is_optimal());
    }

    #[test]
    fn tint_shifts_red_when_hot_and_violet_when_cold() {
        let (r, g, b) = Environment::new(33.0, 85.0, 50.0).stroke_tint();
        assert_eq!(r, 1.0);
        assert!((g - 155.0 / 255.0).abs() < 1e-6);
        assert!((b - 155.0 / 255.0).abs() < 1e-6);

        let (r, g, b) = Environment::new(13.0, 85.0, 50.0).stroke_tint();
        assert!((r - 155.0 / 255.0).abs() < 1e-6);
        assert!((g - 205.0 / 255.0).abs() < 1e-6);
        assert_eq!(b, 1.0);
    }

    #[test]
    fn tint_is_plain_white_in_the_comfort_band() {
        let (r, g, b) = Environment::new(24.0, 85.0, 50.0).stroke_tint();
        assert_eq!((r, g, b), (1.0, 1.0, 1.0));
    }

    #[test]
    fn setters_clamp_to_sane_ranges() {
        let mut env = Environment::default();
        env.set_temperature(99.0);
        env.set_humidity(-5.0);
        env.set_light(140.0);
        assert_eq!(env.temperature, 50.0);
        assert_eq!(env.humidity, 0.0);
        assert_eq!(env.light, 100.0);
    }
}
