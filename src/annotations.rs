// Floating annotations - short callouts rising off map nodes

use rand::Rng;

use crate::config::AnnotationConfig;

/// Filler callouts shown when a node has no conversation of its own.
pub const FILLER_MESSAGES: [&str; 10] = [
    "Found a huge colony here!",
    "Is this edible?",
    "Beautiful bioluminescence.",
    "Spores spreading fast.",
    "Need identification help.",
    "Conditions optimal.",
    "Verified observation.",
    "Connecting hyphae...",
    "Amazing texture.",
    "Habitat confirmed.",
];

#[derive(Clone, Debug)]
pub struct Annotation {
    /// Map-space percent coordinates.
    pub x: f32,
    pub y: f32,
    pub text: String,
    pub life: f32,
    /// Vertical drift per frame, always upward.
    pub rise: f32,
    /// Static horizontal offset applied at draw time.
    pub sway: f32,
}

impl Annotation {
    /// Fast fade-in, then a slow fade as life runs down past the half mark.
    pub fn opacity(&self) -> f32 {
        (self.life * 2.0).min(1.0)
    }
}

/// Spawn timing plus the live annotation set. The layer is purely additive:
/// it reads coordinates and text handed to it and never writes back to the
/// nodes or their comment threads.
pub struct AnnotationLayer {
    pub annotations: Vec<Annotation>,
    clock: f32,
}

impl AnnotationLayer {
    pub fn new() -> Self {
        Self {
            annotations: Vec::new(),
            clock: 0.0,
        }
    }

    /// Accumulate wall-clock time and report how many ambient spawns came
    /// due, consuming one interval per spawn.
    pub fn poll_spawns(&mut self, dt: f32, config: &AnnotationConfig) -> usize {
        self.clock += dt;
        let mut due = 0;
        while self.clock >= config.spawn_interval {
            self.clock -= config.spawn_interval;
            due += 1;
        }
        due
    }

    pub fn spawn<R: Rng>(
        &mut self,
        rng: &mut R,
        x: f32,
        y: f32,
        text: String,
        config: &AnnotationConfig,
    ) {
        self.annotations.push(Annotation {
            x,
            y,
            text,
            life: 1.0,
            rise: -(config.base_rise + rng.gen::<f32>() * config.rise_jitter),
            sway: (rng.gen::<f32>() - 0.5) * 2.0 * config.sway_range,
        });
    }

    /// One frame: drift upward, decay, purge the spent.
    pub fn step(&mut self, config: &AnnotationConfig) {
        for a in &mut self.annotations {
            a.y += a.rise;
            a.life -= config.life_decay;
        }
        self.annotations.retain(|a| a.life > 0.0);
    }

    pub fn len(&self) -> usize {
        self.annotations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }
}

impl Default for AnnotationLayer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn spawn_clock_fires_once_per_interval() {
        let config = AnnotationConfig::default();
        let mut layer = AnnotationLayer::new();

        assert_eq!(layer.poll_spawns(0.3, &config), 0);
        assert_eq!(layer.poll_spawns(0.2, &config), 1);
        assert_eq!(layer.poll_spawns(0.85, &config), 2);
        assert_eq!(layer.poll_spawns(0.0, &config), 0);
    }

    #[test]
    fn fresh_annotations_start_at_full_life_over_their_anchor() {
        let config = AnnotationConfig::default();
        let mut layer = AnnotationLayer::new();
        let mut rng = StdRng::seed_from_u64(4);

        layer.spawn(&mut rng, 30.0, 60.0, "Conditions optimal.".into(), &config);

        let a = &layer.annotations[0];
        assert_eq!(a.life, 1.0);
        assert_eq!((a.x, a.y), (30.0, 60.0));
        assert!(a.rise <= -config.base_rise);
        assert!(a.rise >= -(config.base_rise + config.rise_jitter));
        assert!(a.sway.abs() <= config.sway_range);
    }

    #[test]
    fn annotations_rise_and_fade_each_frame() {
        let config = AnnotationConfig::default();
        let mut layer = AnnotationLayer::new();
        let mut rng = StdRng::seed_from_u64(8);

        layer.spawn(&mut rng, 50.0, 50.0, "Amazing texture.".into(), &config);
        let rise = layer.annotations[0].rise;

        layer.step(&config);

        let a = &layer.annotations[0];
        assert!((a.y - (50.0 + rise)).abs() < 1e-6);
        assert!(a.y < 50.0);
        assert!((a.life - (1.0 - config.life_decay)).abs() < 1e-6);
    }

    #[test]
    fn spent_annotations_are_purged() {
        let config = AnnotationConfig::default();
        let mut layer = AnnotationLayer::new();
        let mut rng = StdRng::seed_from_u64(15);

        layer.spawn(&mut rng, 10.0, 10.0, "Habitat confirmed.".into(), &config);
        for _ in 0..150 {
            layer.step(&config);
        }
        assert_eq!(layer.len(), 1);

        // Full life at 0.005 per frame runs out just past frame 200.
        for _ in 0..52 {
            layer.step(&config);
        }
        assert!(layer.is_empty());
    }

    #[test]
    fn opacity_fades_in_fast_then_tracks_life() {
        let a = Annotation {
            x: 0.0,
            y: 0.0,
            text: String::new(),
            life: 1.0,
            rise: -0.02,
            sway: 0.0,
        };
        assert_eq!(a.opacity(), 1.0);

        let half = Annotation { life: 0.4, ..a.clone() };
        assert!((half.opacity() - 0.8).abs() < 1e-6);

        let dim = Annotation { life: 0.25, ..a };
        assert!((dim.opacity() - 0.5).abs() < 1e-6);
    }
}
