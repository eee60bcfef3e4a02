// Session orchestration - every subsystem behind one struct, one frame entry

use rand::Rng;

use crate::annotations::{AnnotationLayer, FILLER_MESSAGES};
use crate::config::AppConfig;
use crate::identity::IdentityStore;
use crate::lab::{LabSession, PurchaseOutcome};
use crate::map::{FieldMap, Interaction, MapEvent};
use crate::particles::{ParticleField, Silhouette};
use crate::progress::ProgressStore;
use crate::recipes::{Recipe, RecipeError, RecipeGenerator, StubRecipeGenerator};
use crate::species;
use crate::store::KeyValueStore;
use crate::types::NodeId;

const EVENT_LOG_CAP: usize = 32;

/// The whole running session. Rendering and transport layers hold one of
/// these and drive it a frame at a time.
pub struct App {
    pub config: AppConfig,
    pub lab: LabSession,
    pub map: FieldMap,
    pub field: ParticleField,
    pub annotations: AnnotationLayer,
    pub progress: ProgressStore,
    pub identity: IdentityStore,
    pub recipes: Box<dyn RecipeGenerator>,
    pub pointer: Option<(f32, f32)>,
    pub status: String,
    pub recent_events: Vec<String>,
}

impl App {
    pub fn new<R: Rng>(
        rng: &mut R,
        config: AppConfig,
        progress_store: Box<dyn KeyValueStore>,
        identity_store: Box<dyn KeyValueStore>,
    ) -> Self {
        let lab = LabSession::new(
            config.window_width as f32,
            config.window_height as f32,
            &config.growth,
        );
        let map = FieldMap::generate(rng, &config.map);
        let field = ParticleField::new(rng, Silhouette::Network, &config.field);
        Self {
            lab,
            map,
            field,
            annotations: AnnotationLayer::new(),
            progress: ProgressStore::open(progress_store),
            identity: IdentityStore::open(identity_store),
            recipes: Box::new(StubRecipeGenerator),
            pointer: None,
            status: "Mycelial network online.".to_string(),
            recent_events: Vec::new(),
            config,
        }
    }

    /// One simulation frame across every layer, plus the ambient chatter
    /// spawner and event bookkeeping.
    pub fn step<R: Rng>(&mut self, dt: f32, rng: &mut R) {
        self.lab.step(
            dt,
            rng,
            &mut self.progress,
            &self.config.growth,
            &self.config.lab,
        );
        self.map.step(dt, &self.config.map);
        self.field.advance(dt, self.pointer, &self.config.field);

        for _ in 0..self.annotations.poll_spawns(dt, &self.config.annotations) {
            self.spawn_ambient_annotation(rng);
        }
        self.annotations.step(&self.config.annotations);

        self.absorb_map_events();
    }

    /// The window changed size. The chamber raster is stale; the
    /// percent-based layers are not.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.lab.chamber.resize(width, height);
    }

    /// Route a map click: the nearest node within reach gets selected,
    /// empty substrate clears the selection.
    pub fn click_map(&mut self, px: f32, py: f32, view_w: f32, view_h: f32) {
        let hit = self.map.hit_test(px, py, view_w, view_h, &self.config.map);
        self.map.select(hit);
    }

    pub fn nourish_selected(&mut self) {
        if let Interaction::Selected(id) | Interaction::Replying(id) = self.map.interaction {
            self.nourish_node(id);
        }
    }

    pub fn nourish_node(&mut self, id: NodeId) {
        self.map.nourish(id);
        self.absorb_map_events();
    }

    /// Submit the draft reply: thread comment, echo annotation and status
    /// feedback in one motion.
    pub fn submit_reply<R: Rng>(&mut self, rng: &mut R, text: &str) -> bool {
        match self.map.submit_reply(text) {
            Some((x, y)) => {
                self.annotations
                    .spawn(rng, x, y, text.to_string(), &self.config.annotations);
                self.absorb_map_events();
                true
            }
            None => false,
        }
    }

    /// Reply addressed straight to a node id, bypassing the selection flow.
    pub fn post_reply<R: Rng>(&mut self, rng: &mut R, id: NodeId, text: &str) -> bool {
        match self.map.post_reply(id, text) {
            Some((x, y)) => {
                self.annotations
                    .spawn(rng, x, y, text.to_string(), &self.config.annotations);
                self.absorb_map_events();
                true
            }
            None => false,
        }
    }

    pub fn cultivate(&mut self, id: &str) -> PurchaseOutcome {
        let outcome = self
            .lab
            .cultivate(id, &mut self.progress, &self.config.growth);
        let name = species::find(id)
            .map(|s| s.name.to_string())
            .unwrap_or_else(|| id.to_string());
        self.status = match outcome {
            PurchaseOutcome::Cultivating => format!("Cultivating {name}."),
            PurchaseOutcome::Unlocked => format!("{name} unlocked for cultivation."),
            PurchaseOutcome::InsufficientFunds => {
                format!("Not enough mycelium for {name}.")
            }
            PurchaseOutcome::UnknownSpecimen => "That specimen is not on the shelf.".to_string(),
        };
        outcome
    }

    /// Rebuild the particle field over the opposite silhouette.
    pub fn toggle_field_silhouette<R: Rng>(&mut self, rng: &mut R) {
        let next = self.field.silhouette.other();
        self.field = ParticleField::new(rng, next, &self.config.field);
        self.status = format!("Field re-formed as {}.", next.label());
    }

    pub fn generate_recipe(&self, species_ids: &[String]) -> Result<Recipe, RecipeError> {
        self.recipes.generate(species_ids)
    }

    fn spawn_ambient_annotation<R: Rng>(&mut self, rng: &mut R) {
        if self.map.nodes.is_empty() {
            return;
        }
        let node = &self.map.nodes[rng.gen_range(0..self.map.nodes.len())];
        let (x, y) = (node.x, node.y);
        let text = node.comments.first().map(|c| c.text.clone()).unwrap_or_else(|| {
            FILLER_MESSAGES[rng.gen_range(0..FILLER_MESSAGES.len())].to_string()
        });
        self.annotations
            .spawn(rng, x, y, text, &self.config.annotations);
    }

    fn absorb_map_events(&mut self) {
        for event in self.map.drain_events() {
            let line = self.describe_event(&event);
            self.status = line.clone();
            self.recent_events.push(line);
            if self.recent_events.len() > EVENT_LOG_CAP {
                self.recent_events.remove(0);
            }
        }
    }

    fn describe_event(&self, event: &MapEvent) -> String {
        match *event {
            MapEvent::ConnectionFormed(id) => match self.map.node(id) {
                Some(node) => format!("Hyphal link established with {}.", node.author),
                None => "Hyphal link established.".to_string(),
            },
            MapEvent::Nourished(id) => match self.map.node(id) {
                Some(node) => {
                    format!("Nutrients sent to the {} {}.", node.species, node.kind.label())
                }
                None => "Nutrients dispatched.".to_string(),
            },
            MapEvent::ReplyPosted(_) => "Response sent via hyphae channel.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn app(rng: &mut StdRng) -> App {
        App::new(
            rng,
            AppConfig::default(),
            Box::new(MemoryStore::new()),
            Box::new(MemoryStore::new()),
        )
    }

    #[test]
    fn one_frame_advances_every_layer() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut app = app(&mut rng);

        app.step(1.0 / 60.0, &mut rng);
        assert_eq!(app.lab.frame_index, 1);
        assert!(app.map.elapsed > 0.0);
        assert!(app.field.elapsed > 0.0);
    }

    #[test]
    fn ambient_chatter_drifts_in_over_the_field() {
        let mut rng = StdRng::seed_from_u64(12);
        let mut app = app(&mut rng);

        for _ in 0..30 {
            app.step(1.0 / 60.0, &mut rng);
        }
        assert!(!app.annotations.is_empty());
    }

    #[test]
    fn replying_echoes_an_annotation_and_reports_back() {
        let mut rng = StdRng::seed_from_u64(13);
        let mut app = app(&mut rng);
        let id = app.map.nodes[0].id;

        app.map.select(Some(id));
        app.map.begin_reply();
        assert!(app.submit_reply(&mut rng, "Spore print pending."));

        assert_eq!(app.status, "Response sent via hyphae channel.");
        assert_eq!(app.annotations.len(), 1);
        assert!(app.map.connected.contains(&id));
        assert!(app
            .recent_events
            .iter()
            .any(|line| line.contains("Hyphal link")));

        // Out of composition now, and blanks would be refused anyway.
        assert!(!app.submit_reply(&mut rng, "   "));
    }

    #[test]
    fn cultivation_outcomes_land_in_the_status_line() {
        let mut rng = StdRng::seed_from_u64(14);
        let mut app = app(&mut rng);

        assert_eq!(
            app.cultivate("hericium-erinaceus"),
            PurchaseOutcome::InsufficientFunds
        );
        assert!(app.status.contains("Not enough mycelium"));

        assert_eq!(app.cultivate("amanita-muscaria"), PurchaseOutcome::Cultivating);
        assert!(app.status.contains("Fly Amanita"));

        assert_eq!(
            app.cultivate("boletus-edulis"),
            PurchaseOutcome::UnknownSpecimen
        );
        assert_eq!(app.status, "That specimen is not on the shelf.");
    }

    #[test]
    fn the_event_log_stays_bounded() {
        let mut rng = StdRng::seed_from_u64(15);
        let mut app = app(&mut rng);
        let id = app.map.nodes[0].id;

        app.map.select(Some(id));
        for _ in 0..40 {
            app.nourish_selected();
        }
        assert!(app.recent_events.len() <= EVENT_LOG_CAP);
        assert!(app.status.starts_with("Nutrients sent"));
    }

    #[test]
    fn the_field_reshapes_between_silhouettes() {
        let mut rng = StdRng::seed_from_u64(16);
        let mut app = app(&mut rng);

        assert_eq!(app.field.silhouette, Silhouette::Network);
        app.toggle_field_silhouette(&mut rng);
        assert_eq!(app.field.silhouette, Silhouette::Sporocarp);
        assert_eq!(app.field.len(), AppConfig::default().field.particle_count);
    }
}
