// Observation map - the living node field, nourish pulses and reply flow

use std::collections::HashSet;

use rand::Rng;

use crate::annotations::FILLER_MESSAGES;
use crate::config::MapConfig;
use crate::species;
use crate::types::{Comment, NodeId};

/// Observer handles attached to generated nodes.
pub const AUTHOR_POOL: [&str; 4] = ["Fungi Hunter", "Mycologist", "Master Picker", "Explorer"];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeKind {
    Colony,
    Spore,
}

impl NodeKind {
    pub fn label(&self) -> &'static str {
        match self {
            NodeKind::Colony => "colony",
            NodeKind::Spore => "spore",
        }
    }
}

/// An observation site. Coordinates are percentages of the view so the
/// field survives any window size.
#[derive(Clone, Debug)]
pub struct MapNode {
    pub id: NodeId,
    pub x: f32,
    pub y: f32,
    pub kind: NodeKind,
    pub size: f32,
    pub nourishment: u32,
    pub author: &'static str,
    pub species: &'static str,
    pub pulse_offset: f32,
    pub comments: Vec<Comment>,
}

impl MapNode {
    /// Nourished nodes swell on screen.
    pub fn display_size(&self) -> f32 {
        self.size + self.nourishment as f32 * 0.8
    }
}

/// A burst of energy traveling from the observer anchor to a node.
#[derive(Clone, Copy, Debug)]
pub struct NourishPulse {
    pub target_x: f32,
    pub target_y: f32,
    pub progress: f32,
}

/// Where the observer currently is in the detail flow.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Interaction {
    Idle,
    Selected(NodeId),
    Replying(NodeId),
}

/// Something the map did in response to an action, for status feedback.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MapEvent {
    ConnectionFormed(NodeId),
    Nourished(NodeId),
    ReplyPosted(NodeId),
}

pub struct FieldMap {
    pub nodes: Vec<MapNode>,
    pub connected: HashSet<NodeId>,
    pub pulses: Vec<NourishPulse>,
    pub interaction: Interaction,
    pub user_x: f32,
    pub user_y: f32,
    pub elapsed: f32,
    events: Vec<MapEvent>,
}

impl FieldMap {
    /// Lay out a randomized observation field: scattered nodes with mixed
    /// kinds, pool-drawn authors and species labels, and an opening comment
    /// on a minority of them.
    pub fn generate<R: Rng>(rng: &mut R, config: &MapConfig) -> Self {
        let mut nodes = Vec::with_capacity(config.node_count);
        for id in 0..config.node_count {
            let kind = if rng.gen::<f32>() < 0.5 {
                NodeKind::Colony
            } else {
                NodeKind::Spore
            };
            let author = AUTHOR_POOL[rng.gen_range(0..AUTHOR_POOL.len())];
            let mut comments = Vec::new();
            if rng.gen::<f32>() < config.seeded_comment_ratio {
                let text = FILLER_MESSAGES[rng.gen_range(0..FILLER_MESSAGES.len())];
                comments.push(Comment {
                    author: author.to_string(),
                    text: text.to_string(),
                });
            }
            nodes.push(MapNode {
                id: id as NodeId,
                x: config.margin_x + rng.gen::<f32>() * (100.0 - 2.0 * config.margin_x),
                y: config.margin_y + rng.gen::<f32>() * (100.0 - 2.0 * config.margin_y),
                kind,
                size: config.min_size + rng.gen::<f32>() * (config.max_size - config.min_size),
                nourishment: 0,
                author,
                species: species::CATALOG[rng.gen_range(0..species::CATALOG.len())].name,
                pulse_offset: rng.gen::<f32>() * std::f32::consts::TAU,
                comments,
            });
        }
        Self {
            nodes,
            connected: HashSet::new(),
            pulses: Vec::new(),
            interaction: Interaction::Idle,
            user_x: config.user_x,
            user_y: config.user_y,
            elapsed: 0.0,
            events: Vec::new(),
        }
    }

    pub fn node(&self, id: NodeId) -> Option<&MapNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut MapNode> {
        self.nodes.iter_mut().find(|n| n.id == id)
    }

    /// Advance pulse animation and the shared clock one frame.
    pub fn step(&mut self, dt: f32, config: &MapConfig) {
        self.elapsed += dt;
        for pulse in &mut self.pulses {
            pulse.progress += config.pulse_step;
        }
        self.pulses.retain(|p| p.progress <= 1.0);
    }

    /// Hit-test a pointer in view pixels against the node field. The touch
    /// radius grows with node size and accumulated nourishment, and the
    /// nearest node within its radius wins.
    pub fn hit_test(
        &self,
        px: f32,
        py: f32,
        view_w: f32,
        view_h: f32,
        config: &MapConfig,
    ) -> Option<NodeId> {
        let mut best: Option<(NodeId, f32)> = None;
        for node in &self.nodes {
            let nx = node.x / 100.0 * view_w;
            let ny = node.y / 100.0 * view_h;
            let radius = node.size + node.nourishment as f32 * 0.5 + config.hit_slack;
            let dist = ((px - nx).powi(2) + (py - ny).powi(2)).sqrt();
            if dist < radius && best.map_or(true, |(_, d)| dist < d) {
                best = Some((node.id, dist));
            }
        }
        best.map(|(id, _)| id)
    }

    /// Select a node (or clear the selection with None). Selecting always
    /// leaves reply composition.
    pub fn select(&mut self, id: Option<NodeId>) {
        self.interaction = match id {
            Some(id) if self.node(id).is_some() => Interaction::Selected(id),
            _ => Interaction::Idle,
        };
    }

    pub fn begin_reply(&mut self) {
        if let Interaction::Selected(id) = self.interaction {
            self.interaction = Interaction::Replying(id);
        }
    }

    pub fn cancel_reply(&mut self) {
        if let Interaction::Replying(id) = self.interaction {
            self.interaction = Interaction::Selected(id);
        }
    }

    /// Feed a node: pulse out, record the connection (first time only) and
    /// bump its nourishment. Unknown ids fall through without a trace.
    pub fn nourish(&mut self, id: NodeId) {
        let (x, y) = match self.node(id) {
            Some(node) => (node.x, node.y),
            None => return,
        };
        self.pulses.push(NourishPulse {
            target_x: x,
            target_y: y,
            progress: 0.0,
        });
        if self.connected.insert(id) {
            self.events.push(MapEvent::ConnectionFormed(id));
        }
        if let Some(node) = self.node_mut(id) {
            node.nourishment += 1;
        }
        self.events.push(MapEvent::Nourished(id));
    }

    /// Append a reply to a node's thread. Whitespace-only text is dropped
    /// with no state change at all. A posted reply nourishes the node as a
    /// side effect and hands back the anchor so the caller can echo the
    /// text as a floating annotation.
    pub fn post_reply(&mut self, id: NodeId, text: &str) -> Option<(f32, f32)> {
        if text.trim().is_empty() {
            return None;
        }
        let (x, y) = {
            let node = self.node_mut(id)?;
            node.comments.push(Comment {
                author: "You".to_string(),
                text: text.to_string(),
            });
            (node.x, node.y)
        };
        self.nourish(id);
        self.events.push(MapEvent::ReplyPosted(id));
        Some((x, y))
    }

    /// Submit the reply being composed. On success the flow returns to the
    /// node detail; an empty draft leaves composition open.
    pub fn submit_reply(&mut self, text: &str) -> Option<(f32, f32)> {
        let id = match self.interaction {
            Interaction::Replying(id) => id,
            _ => return None,
        };
        let anchor = self.post_reply(id, text)?;
        self.interaction = Interaction::Selected(id);
        Some(anchor)
    }

    pub fn drain_events(&mut self) -> Vec<MapEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn selected_node(&self) -> Option<&MapNode> {
        match self.interaction {
            Interaction::Selected(id) | Interaction::Replying(id) => self.node(id),
            Interaction::Idle => None,
        }
    }
}
