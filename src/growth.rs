// Growth chamber - hyphal tips radiating from the center, leaving trails

use rand::Rng;

use crate::config::GrowthConfig;
use crate::environment::Environment;
use crate::filament::Filament;
use crate::types::TrailSegment;

/// The lab's drawing surface and everything alive on it.
pub struct GrowthChamber {
    pub filaments: Vec<Filament>,
    pub trails: Vec<TrailSegment>,
    pub width: f32,
    pub height: f32,
    pub frame_index: u64,
}

impl GrowthChamber {
    pub fn new(width: f32, height: f32, config: &GrowthConfig) -> Self {
        let mut chamber = Self {
            filaments: Vec::new(),
            trails: Vec::new(),
            width,
            height,
            frame_index: 0,
        };
        chamber.seed(config);
        chamber
    }

    /// Replace the population with a fresh ring radiating evenly from the
    /// surface center. Old trails go with it.
    pub fn seed(&mut self, config: &GrowthConfig) {
        let cx = self.width / 2.0;
        let cy = self.height / 2.0;
        self.filaments.clear();
        self.trails.clear();
        for i in 0..config.seed_count {
            let angle = (i as f32 / config.seed_count as f32) * std::f32::consts::TAU;
            self.filaments.push(Filament {
                x: cx,
                y: cy,
                angle,
                speed: config.seed_speed,
                life: config.seed_life,
                width: config.seed_width,
            });
        }
    }

    /// The surface was resized: the raster the trails were laid on is gone,
    /// but the living filaments keep growing where they are.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
        self.trails.clear();
    }

    pub fn clear_trails(&mut self) {
        self.trails.clear();
    }

    /// Advance one frame under the given conditions. When the rate falls to
    /// the dormancy threshold the whole frame is a no-op: dormant mycelium
    /// neither moves nor decays.
    pub fn step<R: Rng>(&mut self, rng: &mut R, env: &Environment, config: &GrowthConfig) {
        let rate = env.growth_rate();
        if rate <= config.dormancy_threshold {
            return;
        }

        self.frame_index = self.frame_index.wrapping_add(1);

        // Age trails first so strokes laid this frame start fresh.
        for segment in &mut self.trails {
            segment.age += config.trail_age_increment;
        }
        self.trails.retain(|s| s.age < config.max_trail_age);

        let mut offshoots = Vec::new();
        for filament in &mut self.filaments {
            let from_x = filament.x;
            let from_y = filament.y;

            filament.x += filament.angle.cos() * filament.speed * rate;
            filament.y += filament.angle.sin() * filament.speed * rate;
            filament.angle += (rng.gen::<f32>() - 0.5) * config.angle_jitter * 2.0;

            // Offshoots inherit the tip's spot with strictly reduced vigor.
            if rng.gen::<f32>() < config.branch_chance * rate {
                offshoots.push(Filament {
                    x: filament.x,
                    y: filament.y,
                    angle: filament.angle
                        + (rng.gen::<f32>() - 0.5) * config.branch_angle_spread * 2.0,
                    speed: filament.speed * config.branch_speed_decay,
                    life: filament.life * config.branch_life_decay,
                    width: filament.width * config.branch_width_decay,
                });
            }

            filament.life -= config.life_step;

            self.trails.push(TrailSegment {
                from_x,
                from_y,
                to_x: filament.x,
                to_y: filament.y,
                width: filament.width,
                intensity: filament.vitality(),
                age: 0.0,
            });
        }

        self.filaments.retain(|f| f.life > 0.0);
        self.filaments.extend(offshoots);
    }

    pub fn stats(&self) -> (usize, usize) {
        (self.filaments.len(), self.trails.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn chamber_with(config: &GrowthConfig) -> GrowthChamber {
        GrowthChamber::new(800.0, 600.0, config)
    }

    fn warm_chamber_env() -> Environment {
        Environment::new(24.0, 100.0, 50.0)
    }

    #[test]
    fn seeding_lays_an_even_ring_at_the_center() {
        let config = GrowthConfig::default();
        let chamber = chamber_with(&config);
        assert_eq!(chamber.filaments.len(), config.seed_count);
        for (i, f) in chamber.filaments.iter().enumerate() {
            assert_eq!(f.x, 400.0);
            assert_eq!(f.y, 300.0);
            let expected = i as f32 / config.seed_count as f32 * std::f32::consts::TAU;
            assert!((f.angle - expected).abs() < 1e-6);
            assert_eq!(f.life, config.seed_life);
            assert_eq!(f.speed, config.seed_speed);
            assert_eq!(f.width, config.seed_width);
        }
    }

    #[test]
    fn active_frames_move_tips_by_speed_times_rate_and_decay_life() {
        let config = GrowthConfig {
            branch_chance: 0.0,
            ..GrowthConfig::default()
        };
        let mut chamber = chamber_with(&config);
        let mut rng = StdRng::seed_from_u64(7);
        let env = warm_chamber_env(); // rate 1.0

        let before: Vec<Filament> = chamber.filaments.clone();
        chamber.step(&mut rng, &env, &config);

        assert_eq!(chamber.filaments.len(), before.len());
        for (f, b) in chamber.filaments.iter().zip(&before) {
            let dx = f.x - b.x;
            let dy = f.y - b.y;
            let moved = (dx * dx + dy * dy).sqrt();
            assert!((moved - 2.0).abs() < 1e-4, "moved {}", moved);
            assert!((f.life - (b.life - 0.1)).abs() < 1e-5);
            // Heading jitter stays inside its band.
            assert!((f.angle - b.angle).abs() <= 0.25 + 1e-6);
        }
        assert_eq!(chamber.trails.len(), before.len());
    }

    #[test]
    fn dormant_frames_neither_move_nor_decay() {
        let config = GrowthConfig::default();
        let mut chamber = chamber_with(&config);
        let mut rng = StdRng::seed_from_u64(7);
        // 40 degrees kills the rate outright.
        let env = Environment::new(40.0, 90.0, 50.0);

        let before: Vec<Filament> = chamber.filaments.clone();
        for _ in 0..10 {
            chamber.step(&mut rng, &env, &config);
        }

        assert_eq!(chamber.frame_index, 0);
        assert!(chamber.trails.is_empty());
        for (f, b) in chamber.filaments.iter().zip(&before) {
            assert_eq!(f.x, b.x);
            assert_eq!(f.y, b.y);
            assert_eq!(f.life, b.life);
        }
    }

    #[test]
    fn heat_death_conditions_count_as_dormant() {
        let config = GrowthConfig::default();
        let mut chamber = chamber_with(&config);
        let mut rng = StdRng::seed_from_u64(1);
        let env = Environment::new(36.0, 100.0, 50.0);
        chamber.step(&mut rng, &env, &config);
        assert_eq!(chamber.frame_index, 0);
        assert!(chamber.trails.is_empty());
    }

    #[test]
    fn offshoots_are_strictly_smaller_than_their_parents() {
        let config = GrowthConfig {
            branch_chance: 1.0, // branch every frame at full rate
            ..GrowthConfig::default()
        };
        let mut chamber = chamber_with(&config);
        let mut rng = StdRng::seed_from_u64(11);
        let env = warm_chamber_env();

        chamber.step(&mut rng, &env, &config);

        assert_eq!(chamber.filaments.len(), config.seed_count * 2);
        let (parents, children) = chamber.filaments.split_at(config.seed_count);
        for (child, parent) in children.iter().zip(parents) {
            assert!(child.speed < parent.speed + 1e-6);
            assert!((child.speed - 1.8).abs() < 1e-4);
            // Life forked before the parent's decay step: 100 * 0.8.
            assert!((child.life - 80.0).abs() < 1e-4);
            assert!(child.life < config.seed_life);
            assert!((child.width - 2.4).abs() < 1e-4);
            assert_eq!(child.x, parent.x);
            assert_eq!(child.y, parent.y);
        }
    }

    #[test]
    fn spent_filaments_are_culled_and_stay_gone() {
        let config = GrowthConfig {
            branch_chance: 0.0,
            ..GrowthConfig::default()
        };
        let mut chamber = chamber_with(&config);
        for f in &mut chamber.filaments {
            f.life = 0.1;
        }
        let mut rng = StdRng::seed_from_u64(3);
        let env = warm_chamber_env();

        chamber.step(&mut rng, &env, &config);
        assert!(chamber.filaments.is_empty());
        // They still laid their final stroke on the way out.
        assert_eq!(chamber.trails.len(), config.seed_count);

        chamber.step(&mut rng, &env, &config);
        assert!(chamber.filaments.is_empty());
    }

    #[test]
    fn life_never_increases_across_active_frames() {
        let config = GrowthConfig::default();
        let mut chamber = chamber_with(&config);
        let mut rng = StdRng::seed_from_u64(42);
        let env = warm_chamber_env();

        let mut max_life = config.seed_life;
        for _ in 0..200 {
            chamber.step(&mut rng, &env, &config);
            let frame_max = chamber
                .filaments
                .iter()
                .map(|f| f.life)
                .fold(0.0f32, f32::max);
            assert!(frame_max <= max_life + 1e-4);
            max_life = max_life.max(frame_max);
        }
    }

    #[test]
    fn resize_clears_trails_but_keeps_filaments() {
        let config = GrowthConfig {
            branch_chance: 0.0,
            ..GrowthConfig::default()
        };
        let mut chamber = chamber_with(&config);
        let mut rng = StdRng::seed_from_u64(5);
        let env = warm_chamber_env();
        for _ in 0..5 {
            chamber.step(&mut rng, &env, &config);
        }
        assert_eq!(chamber.trails.len(), config.seed_count * 5);

        let positions: Vec<(f32, f32)> = chamber.filaments.iter().map(|f| (f.x, f.y)).collect();
        chamber.resize(1024.0, 768.0);

        assert!(chamber.trails.is_empty());
        assert_eq!(chamber.filaments.len(), config.seed_count);
        for (f, (x, y)) in chamber.filaments.iter().zip(&positions) {
            assert_eq!((f.x, f.y), (*x, *y));
        }
        assert_eq!(chamber.width, 1024.0);
    }

    #[test]
    fn reseeding_replaces_the_population() {
        let config = GrowthConfig::default();
        let mut chamber = chamber_with(&config);
        let mut rng = StdRng::seed_from_u64(9);
        let env = warm_chamber_env();
        for _ in 0..50 {
            chamber.step(&mut rng, &env, &config);
        }

        chamber.seed(&config);
        assert_eq!(chamber.filaments.len(), config.seed_count);
        assert!(chamber.trails.is_empty());
        assert!(chamber
            .filaments
            .iter()
            .all(|f| f.life == config.seed_life && f.x == 400.0 && f.y == 300.0));
    }

    #[test]
    fn old_trails_fade_out_of_the_buffer() {
        // Exact binary fractions keep the age ladder free of rounding drift.
        let config = GrowthConfig {
            branch_chance: 0.0,
            max_trail_age: 1.0,
            trail_age_increment: 0.25,
            ..GrowthConfig::default()
        };
        let mut chamber = chamber_with(&config);
        let mut rng = StdRng::seed_from_u64(13);
        let env = warm_chamber_env();

        for _ in 0..20 {
            chamber.step(&mut rng, &env, &config);
        }
        // Only the strokes younger than max_trail_age survive: 4 frames' worth.
        assert_eq!(chamber.trails.len(), config.seed_count * 4);
    }
}
