// Cultivation lab - a growth chamber with playback state and the specimen shelf

use std::ops::{Deref, DerefMut};

use rand::Rng;

use crate::config::{GrowthConfig, LabConfig};
use crate::environment::Environment;
use crate::growth::GrowthChamber;
use crate::progress::ProgressStore;

/// Specimens on offer and their mycelium cost. A fresh ledger already has
/// the first two unlocked, so only the last costs anything in practice.
pub const SPECIMEN_SHELF: [(&str, u32); 3] = [
    ("psilocybe-cubensis", 0),
    ("amanita-muscaria", 500),
    ("hericium-erinaceus", 1500),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PurchaseOutcome {
    Cultivating,
    Unlocked,
    InsufficientFunds,
    UnknownSpecimen,
}

/// A running cultivation: the chamber plus everything around it that makes
/// it a session rather than a bare simulation.
pub struct LabSession {
    pub chamber: GrowthChamber,
    pub environment: Environment,
    pub playing: bool,
    pub specimen: String,
    reward_clock: f32,
}

impl LabSession {
    pub fn new(width: f32, height: f32, config: &GrowthConfig) -> Self {
        Self {
            chamber: GrowthChamber::new(width, height, config),
            environment: Environment::default(),
            playing: true,
            specimen: SPECIMEN_SHELF[0].0.to_string(),
            reward_clock: 0.0,
        }
    }

    /// One lab frame. Pausing freezes the culture and the reward clock
    /// alike; nothing in here moves until playback resumes.
    pub fn step<R: Rng>(
        &mut self,
        dt: f32,
        rng: &mut R,
        progress: &mut ProgressStore,
        growth: &GrowthConfig,
        lab: &LabConfig,
    ) {
        if !self.playing {
            return;
        }
        self.chamber.step(rng, &self.environment, growth);
        self.reward_clock += dt;
        while self.reward_clock >= lab.reward_interval {
            self.reward_clock -= lab.reward_interval;
            if self.environment.is_optimal() {
                progress.add(lab.reward_amount);
            }
        }
    }

    pub fn toggle_play(&mut self) {
        self.playing = !self.playing;
    }

    /// Restart the culture from a fresh ring and resume playback.
    pub fn reset(&mut self, config: &GrowthConfig) {
        self.chamber.seed(config);
        self.playing = true;
    }

    pub fn shelf_cost(id: &str) -> Option<u32> {
        SPECIMEN_SHELF
            .iter()
            .find(|(shelf_id, _)| *shelf_id == id)
            .map(|(_, cost)| *cost)
    }

    /// Switch the chamber to a shelf specimen, buying the unlock first when
    /// the balance covers it. Refusals leave the session untouched.
    pub fn cultivate(
        &mut self,
        id: &str,
        progress: &mut ProgressStore,
        config: &GrowthConfig,
    ) -> PurchaseOutcome {
        let cost = match Self::shelf_cost(id) {
            Some(cost) => cost,
            None => return PurchaseOutcome::UnknownSpecimen,
        };
        if progress.is_unlocked(id) {
            self.specimen = id.to_string();
            self.reset(config);
            return PurchaseOutcome::Cultivating;
        }
        if !progress.spend(cost) {
            return PurchaseOutcome::InsufficientFunds;
        }
        progress.unlock(id);
        self.specimen = id.to_string();
        self.reset(config);
        PurchaseOutcome::Unlocked
    }
}

impl Deref for LabSession {
    type Target = GrowthChamber;

    fn deref(&self) -> &GrowthChamber {
        &self.chamber
    }
}

impl DerefMut for LabSession {
    fn deref_mut(&mut self) -> &mut GrowthChamber {
        &mut self.chamber
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn session() -> (LabSession, ProgressStore, GrowthConfig, LabConfig) {
        (
            LabSession::new(800.0, 600.0, &GrowthConfig::default()),
            ProgressStore::open(Box::new(MemoryStore::new())),
            GrowthConfig::default(),
            LabConfig::default(),
        )
    }

    #[test]
    fn optimal_conditions_pay_out_on_the_reward_clock() {
        let (mut lab, mut progress, growth, cfg) = session();
        let mut rng = StdRng::seed_from_u64(3);

        for _ in 0..5 {
            lab.step(1.0, &mut rng, &mut progress, &growth, &cfg);
        }
        assert_eq!(progress.mycelium(), 1260);

        for _ in 0..5 {
            lab.step(1.0, &mut rng, &mut progress, &growth, &cfg);
        }
        assert_eq!(progress.mycelium(), 1270);
    }

    #[test]
    fn poor_conditions_keep_the_clock_but_pay_nothing() {
        let (mut lab, mut progress, growth, cfg) = session();
        let mut rng = StdRng::seed_from_u64(4);

        lab.environment.set_humidity(50.0);
        for _ in 0..6 {
            lab.step(1.0, &mut rng, &mut progress, &growth, &cfg);
        }
        assert_eq!(progress.mycelium(), 1250);

        // The 6th second already counted toward the next interval.
        lab.environment.set_humidity(85.0);
        for _ in 0..4 {
            lab.step(1.0, &mut rng, &mut progress, &growth, &cfg);
        }
        assert_eq!(progress.mycelium(), 1260);
    }

    #[test]
    fn paused_sessions_freeze_culture_and_clock() {
        let (mut lab, mut progress, growth, cfg) = session();
        let mut rng = StdRng::seed_from_u64(5);

        lab.toggle_play();
        assert!(!lab.playing);
        for _ in 0..20 {
            lab.step(1.0, &mut rng, &mut progress, &growth, &cfg);
        }
        assert_eq!(lab.frame_index, 0);
        assert!(lab.trails.is_empty());
        assert_eq!(progress.mycelium(), 1250);

        lab.toggle_play();
        lab.step(1.0, &mut rng, &mut progress, &growth, &cfg);
        assert_eq!(lab.frame_index, 1);
    }

    #[test]
    fn cultivating_an_unlocked_specimen_is_free() {
        let (mut lab, mut progress, growth, cfg) = session();
        let mut rng = StdRng::seed_from_u64(6);

        for _ in 0..10 {
            lab.step(1.0 / 60.0, &mut rng, &mut progress, &growth, &cfg);
        }
        assert!(!lab.trails.is_empty());

        let outcome = lab.cultivate("amanita-muscaria", &mut progress, &growth);
        assert_eq!(outcome, PurchaseOutcome::Cultivating);
        assert_eq!(lab.specimen, "amanita-muscaria");
        assert_eq!(progress.mycelium(), 1250);
        assert!(lab.trails.is_empty());
        assert_eq!(lab.filaments.len(), growth.seed_count);
        assert!(lab.playing);
    }

    #[test]
    fn locked_specimens_cost_mycelium_once() {
        let (mut lab, mut progress, growth, _cfg) = session();

        assert_eq!(
            lab.cultivate("hericium-erinaceus", &mut progress, &growth),
            PurchaseOutcome::InsufficientFunds
        );
        assert_eq!(lab.specimen, "psilocybe-cubensis");
        assert!(!progress.is_unlocked("hericium-erinaceus"));

        progress.add(250);
        assert_eq!(
            lab.cultivate("hericium-erinaceus", &mut progress, &growth),
            PurchaseOutcome::Unlocked
        );
        assert_eq!(progress.mycelium(), 0);
        assert_eq!(lab.specimen, "hericium-erinaceus");

        // Already owned from here on, so switching back costs nothing.
        assert_eq!(
            lab.cultivate("hericium-erinaceus", &mut progress, &growth),
            PurchaseOutcome::Cultivating
        );
    }

    #[test]
    fn off_shelf_specimens_are_refused() {
        let (mut lab, mut progress, growth, _cfg) = session();
        assert_eq!(
            lab.cultivate("morchella-esculenta", &mut progress, &growth),
            PurchaseOutcome::UnknownSpecimen
        );
        assert_eq!(lab.specimen, "psilocybe-cubensis");
        assert_eq!(progress.mycelium(), 1250);
    }
}
