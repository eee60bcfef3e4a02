// Particle fields - fixed pools of drifting points laid over a silhouette

use rand::Rng;
use rayon::prelude::*;

use crate::config::FieldConfig;

/// Source layouts a field can be seeded over.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Silhouette {
    /// Ambient clustered rings, substrate colonized outward in waves.
    Network,
    /// Compound fruit body: cap dome over a stem column.
    Sporocarp,
}

impl Silhouette {
    pub fn label(&self) -> &'static str {
        match self {
            Silhouette::Network => "network",
            Silhouette::Sporocarp => "sporocarp",
        }
    }

    pub fn other(&self) -> Silhouette {
        match self {
            Silhouette::Network => Silhouette::Sporocarp,
            Silhouette::Sporocarp => Silhouette::Network,
        }
    }
}

/// Cool aurora tones for the network field.
pub const AURORA_PALETTE: [[f32; 3]; 4] = [
    [0.0, 1.0, 0.76],   // cyan
    [1.0, 0.18, 0.58],  // magenta
    [0.36, 0.25, 0.83], // violet
    [1.0, 0.84, 0.0],   // gold
];

/// Warm spore-print tones for the sporocarp field.
pub const SPORE_PALETTE: [[f32; 3]; 4] = [
    [0.82, 0.71, 0.55], // tan
    [1.0, 0.97, 0.86],  // cream
    [0.72, 0.25, 0.05], // rust
    [0.85, 0.65, 0.13], // ochre
];

#[derive(Clone, Copy, Debug)]
pub struct Particle {
    pub origin_x: f32,
    pub origin_y: f32,
    pub x: f32,
    pub y: f32,
    pub phase: f32,
    pub color: [f32; 3],
}

/// A fixed-capacity cloud: particles are placed once and then only drift.
pub struct ParticleField {
    pub particles: Vec<Particle>,
    pub silhouette: Silhouette,
    pub elapsed: f32,
}

impl ParticleField {
    pub fn new<R: Rng>(rng: &mut R, silhouette: Silhouette, config: &FieldConfig) -> Self {
        let palette = match silhouette {
            Silhouette::Network => &AURORA_PALETTE,
            Silhouette::Sporocarp => &SPORE_PALETTE,
        };
        let mut particles = Vec::with_capacity(config.particle_count);
        for _ in 0..config.particle_count {
            let (x, y) = sample_origin(rng, silhouette, config);
            particles.push(Particle {
                origin_x: x,
                origin_y: y,
                x,
                y,
                phase: rng.gen::<f32>() * std::f32::consts::TAU,
                color: palette[rng.gen_range(0..palette.len())],
            });
        }
        Self {
            particles,
            silhouette,
            elapsed: 0.0,
        }
    }

    /// Advance the whole pool one frame. The pointer, when present, shoves
    /// nearby particles outward before they settle back toward their drift
    /// targets.
    pub fn advance(&mut self, dt: f32, pointer: Option<(f32, f32)>, config: &FieldConfig) {
        self.elapsed += dt;
        let t = self.elapsed;
        // One shared breath: scales horizontal distance from the center axis.
        let pulse = 1.0 + (t * config.pulse_freq).sin() * config.pulse_amp;

        self.particles.par_iter_mut().for_each(|p| {
            let sway_x = (t * config.freq_x + p.phase).sin() * config.drift_x;
            let sway_y = (t * config.freq_y + p.phase * config.phase_skew).cos() * config.drift_y;
            let target_x = (p.origin_x + sway_x) * pulse;
            let target_y = p.origin_y + sway_y;

            if let Some((px, py)) = pointer {
                let dx = p.x - px;
                let dy = p.y - py;
                let d = (dx * dx + dy * dy).sqrt();
                if d < config.pointer_radius && d > f32::EPSILON {
                    let push = (config.pointer_radius - d) * config.pointer_strength;
                    p.x += dx / d * push;
                    p.y += dy / d * push;
                }
            }

            p.x += (target_x - p.x) * config.smoothing;
            p.y += (target_y - p.y) * config.smoothing;
        });
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

fn sample_origin<R: Rng>(rng: &mut R, silhouette: Silhouette, config: &FieldConfig) -> (f32, f32) {
    match silhouette {
        Silhouette::Network => {
            // Five concentric colony waves, each a fuzzy ring.
            let cluster = rng.gen_range(0..5);
            let angle = rng.gen::<f32>() * std::f32::consts::TAU;
            let radius = rng.gen::<f32>() * 3.0 + cluster as f32 * 0.5;
            (angle.cos() * radius, angle.sin() * radius)
        }
        Silhouette::Sporocarp => {
            if rng.gen::<f32>() < config.cap_fraction {
                // Cap: upper half-circle, squashed into a dome.
                let angle = rng.gen::<f32>() * std::f32::consts::PI;
                let radius = 2.2 * (0.8 + rng.gen::<f32>() * 0.2);
                (angle.cos() * radius, angle.sin() * radius * 0.62)
            } else {
                // Stem: a narrow column dropping below the cap line.
                let x = (rng.gen::<f32>() - 0.5) * 0.7;
                let y = -(rng.gen::<f32>() * 2.0);
                (x, y)
            }
        }
    }
}
