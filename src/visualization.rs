use macroquad::prelude::*;

use crate::annotations::AnnotationLayer;
use crate::config::{GrowthConfig, MapConfig};
use crate::environment::Environment;
use crate::growth::GrowthChamber;
use crate::lab::{LabSession, SPECIMEN_SHELF};
use crate::map::{FieldMap, Interaction, MapNode, NodeKind};
use crate::particles::ParticleField;
use crate::progress::ProgressStore;
use crate::species;

pub fn draw_chamber(chamber: &GrowthChamber, env: &Environment, config: &GrowthConfig) {
    let (tint_r, tint_g, tint_b) = env.stroke_tint();

    // Performance: LOD - only thin out strokes when FPS is actually low
    let fps = get_fps();
    let step = if fps < 30 {
        3
    } else if fps < 45 {
        2
    } else {
        1
    };

    for (i, trail) in chamber.trails.iter().enumerate() {
        if i % step != 0 {
            continue;
        }

        let age_fade = (1.0 - trail.age / config.max_trail_age).clamp(0.0, 1.0);
        let alpha = trail.intensity * age_fade;

        // Skip nearly invisible strokes for performance
        if alpha < 0.05 {
            continue;
        }

        draw_line(
            trail.from_x,
            trail.from_y,
            trail.to_x,
            trail.to_y,
            trail.width,
            Color::new(tint_r, tint_g, tint_b, alpha),
        );
    }

    // Living tips glow on top of their trails
    for f in &chamber.filaments {
        draw_circle(
            f.x,
            f.y,
            (f.width * 0.8).max(1.0),
            Color::new(tint_r, tint_g, tint_b, f.vitality().max(0.2)),
        );
    }

    draw_environment_overlay(env);
}

// Full-screen washes mirroring the chamber conditions: heat glows red,
// cold glows blue, low light darkens everything.
fn draw_environment_overlay(env: &Environment) {
    let w = screen_width();
    let h = screen_height();

    if env.temperature > 30.0 {
        let alpha = ((env.temperature - 30.0) / 100.0).min(0.5);
        draw_rectangle(0.0, 0.0, w, h, Color::new(1.0, 0.2, 0.0, alpha));
    } else if env.temperature < 15.0 {
        let alpha = ((15.0 - env.temperature) / 50.0).min(0.5);
        draw_rectangle(0.0, 0.0, w, h, Color::new(0.0, 0.4, 1.0, alpha));
    }

    let darkness = (100.0 - env.light) / 150.0;
    if darkness > 0.0 {
        draw_rectangle(0.0, 0.0, w, h, Color::new(0.0, 0.0, 0.0, darkness));
    }
}

pub fn draw_lab_hud(lab: &LabSession, progress: &ProgressStore) {
    let (filaments, trails) = lab.stats();
    let env = &lab.environment;
    let fps = get_fps();

    let stats_text = format!(
        "Filaments: {} | Trails: {} | Rate: {:.2} | Mycelium: {} | FPS: {}",
        filaments,
        trails,
        env.growth_rate(),
        progress.mycelium(),
        fps
    );
    draw_text(&stats_text, 10.0, 20.0, 20.0, WHITE);

    let env_text = format!(
        "Temp: {:.0}C | Humidity: {:.0}% | Light: {:.0}%{}",
        env.temperature,
        env.humidity,
        env.light,
        if env.is_optimal() { " | OPTIMAL" } else { "" }
    );
    let env_color = if env.is_optimal() { GREEN } else { WHITE };
    draw_text(&env_text, 10.0, 40.0, 20.0, env_color);

    if !lab.playing {
        draw_text("PAUSED - Press SPACE to resume", 10.0, 60.0, 20.0, YELLOW);
    }

    // Specimen shelf with prices and ownership
    let mut y = 90.0;
    draw_text("Shelf:", 10.0, y, 16.0, Color::new(1.0, 1.0, 1.0, 0.7));
    y += 18.0;
    for &(id, cost) in SPECIMEN_SHELF.iter() {
        let name = species::find(id).map(|s| s.name).unwrap_or(id);
        let marker = if lab.specimen == id { ">" } else { " " };
        let line = if progress.is_unlocked(id) {
            format!("{} {} (owned)", marker, name)
        } else {
            format!("{} {} ({} myc)", marker, name, cost)
        };
        let color = if progress.is_unlocked(id) {
            Color::new(1.0, 1.0, 1.0, 0.9)
        } else {
            Color::new(1.0, 1.0, 1.0, 0.5)
        };
        draw_text(&line, 10.0, y, 16.0, color);
        y += 18.0;
    }

    draw_text(
        "SPACE=Pause | R=Reset | T/G=Temp | Y/H=Humidity | U/J=Light | B=Next specimen",
        10.0,
        screen_height() - 40.0,
        16.0,
        Color::new(1.0, 1.0, 1.0, 0.7),
    );
    draw_text(
        "Screens: 1=Lab | 2=Map | 3=Field",
        10.0,
        screen_height() - 20.0,
        16.0,
        Color::new(1.0, 1.0, 1.0, 0.7),
    );
}

// Map layers back to front: ambient strands, formed connections, pulses,
// nodes, then the floating annotations.
pub fn draw_map(map: &FieldMap, annotations: &AnnotationLayer, config: &MapConfig) {
    let w = screen_width();
    let h = screen_height();
    let time = map.elapsed;

    for (i, node) in map.nodes.iter().enumerate() {
        for other in map.nodes.iter().take(i) {
            let x1 = node.x / 100.0 * w;
            let y1 = node.y / 100.0 * h;
            let x2 = other.x / 100.0 * w;
            let y2 = other.y / 100.0 * h;
            let dist = ((x2 - x1).powi(2) + (y2 - y1).powi(2)).sqrt();

            if dist < config.link_distance {
                let alpha = (0.05 + node.nourishment as f32 / 200.0).min(1.0);
                let width = 1.0 + node.nourishment as f32 / 50.0;
                let color = Color::new(0.72, 0.95, 0.9, alpha);
                draw_organic_line(x1, y1, x2, y2, width, color, time, 1.0, false);
            }
        }
    }

    let anchor_x = map.user_x / 100.0 * w;
    let anchor_y = map.user_y / 100.0 * h;
    for node in map.nodes.iter().filter(|n| map.connected.contains(&n.id)) {
        draw_organic_line(
            anchor_x,
            anchor_y,
            node.x / 100.0 * w,
            node.y / 100.0 * h,
            1.5,
            Color::new(0.92, 0.7, 0.26, 0.3),
            time,
            1.0,
            true,
        );
    }

    for pulse in &map.pulses {
        let target_x = pulse.target_x / 100.0 * w;
        let target_y = pulse.target_y / 100.0 * h;
        let alpha = (1.2 - pulse.progress).clamp(0.0, 1.0);
        draw_organic_line(
            anchor_x,
            anchor_y,
            target_x,
            target_y,
            3.0,
            Color::new(0.92, 0.7, 0.26, alpha),
            time,
            2.0,
            false,
        );

        // Traveling spark with a soft glow
        let spark_x = anchor_x + (target_x - anchor_x) * pulse.progress;
        let spark_y = anchor_y + (target_y - anchor_y) * pulse.progress;
        draw_circle(spark_x, spark_y, 9.0, Color::new(0.92, 0.8, 0.26, 0.35));
        draw_circle(spark_x, spark_y, 5.0, WHITE);
    }

    let selected = map.selected_node().map(|n| n.id);
    for node in &map.nodes {
        draw_map_node(node, selected == Some(node.id), time, w, h);
    }
    draw_observer_marker(map, time, w, h);

    for a in &annotations.annotations {
        let bx = (a.x + a.sway) / 100.0 * w;
        let by = a.y / 100.0 * h;
        draw_annotation_bubble(&a.text, a.opacity(), bx, by);
    }
}

fn draw_map_node(node: &MapNode, is_selected: bool, time: f32, w: f32, h: f32) {
    let x = node.x / 100.0 * w;
    let y = node.y / 100.0 * h;

    let heartbeat = (time * 2.0 + node.pulse_offset).sin() * 0.5 + 1.0;
    let base_size = node.display_size();

    let (halo, core) = match node.kind {
        NodeKind::Colony => (
            Color::new(0.67, 0.33, 0.22, 0.2),
            Color::new(0.67, 0.33, 0.22, 1.0),
        ),
        NodeKind::Spore => (
            Color::new(0.3, 0.8, 0.66, 0.1),
            Color::new(0.3, 0.8, 0.66, 1.0),
        ),
    };
    draw_circle(x, y, base_size + heartbeat * 5.0, halo);
    draw_circle(x, y, base_size, core);

    if is_selected {
        draw_circle_lines(x, y, base_size + 8.0, 2.0, WHITE);
    }
}

fn draw_observer_marker(map: &FieldMap, time: f32, w: f32, h: f32) {
    let x = map.user_x / 100.0 * w;
    let y = map.user_y / 100.0 * h;
    let heartbeat = (time * 2.0).sin() * 0.5 + 1.0;
    let gold = Color::new(0.82, 0.63, 0.17, 1.0);

    draw_circle(x, y, 8.0 + heartbeat * 5.0, Color::new(0.82, 0.63, 0.17, 0.2));
    draw_circle(x, y, 8.0, gold);
    draw_text("YOU", x - 10.0, y + 20.0, 12.0, gold);
}

// A strand that breathes: the path is displaced sideways by a standing wave
// pinned to zero at both endpoints. Formed connections sway less than the
// ambient ones.
#[allow(clippy::too_many_arguments)]
fn draw_organic_line(
    x1: f32,
    y1: f32,
    x2: f32,
    y2: f32,
    width: f32,
    color: Color,
    time: f32,
    intensity: f32,
    permanent: bool,
) {
    let dx = x2 - x1;
    let dy = y2 - y1;
    let dist = (dx * dx + dy * dy).sqrt();
    if dist <= f32::EPSILON {
        return;
    }

    let segments = ((dist / 20.0) as usize).max(5);
    let wave_scale = if permanent { 3.0 } else { 5.0 } * intensity;
    let perp = dy.atan2(dx) + std::f32::consts::FRAC_PI_2;

    let mut px = x1;
    let mut py = y1;
    for i in 1..=segments {
        let t = i as f32 / segments as f32;
        let offset = (t * std::f32::consts::PI * 4.0 + time * 5.0).sin()
            * (t * std::f32::consts::PI).sin()
            * wave_scale;
        let nx = x1 + dx * t + perp.cos() * offset;
        let ny = y1 + dy * t + perp.sin() * offset;
        draw_line(px, py, nx, ny, width, color);
        px = nx;
        py = ny;
    }
}

// Pill-shaped bubble sized to its text. The two end caps are tangent to the
// body rectangle, so the translucent fill never overdraws itself.
fn draw_annotation_bubble(text: &str, opacity: f32, x: f32, y: f32) {
    let font_size = 12.0;
    let dims = measure_text(text, None, font_size as u16, 1.0);
    let bw = dims.width + 16.0;
    let bh = 24.0;
    let radius = bh / 2.0;

    let rx = x - bw / 2.0;
    let ry = y - bh - 10.0;

    let bg = Color::new(0.04, 0.08, 0.12, 0.8 * opacity);
    draw_rectangle(rx + radius, ry, bw - radius * 2.0, bh, bg);
    draw_circle(rx + radius, ry + radius, radius, bg);
    draw_circle(rx + bw - radius, ry + radius, radius, bg);

    draw_text(
        text,
        x - dims.width / 2.0,
        ry + bh / 2.0 + 4.0,
        font_size,
        Color::new(1.0, 1.0, 1.0, opacity),
    );
}

pub fn draw_map_hud(map: &FieldMap, status: &str, reply_draft: &str) {
    draw_text(status, 10.0, 20.0, 20.0, WHITE);

    let Some(node) = map.selected_node() else {
        draw_text(
            "Click a node to inspect it | Screens: 1=Lab | 2=Map | 3=Field",
            10.0,
            screen_height() - 20.0,
            16.0,
            Color::new(1.0, 1.0, 1.0, 0.7),
        );
        return;
    };

    let mut y = 50.0;
    let gold = Color::new(0.92, 0.7, 0.26, 1.0);
    draw_text(
        &format!("{} ({})", node.author, node.kind.label()),
        10.0,
        y,
        18.0,
        gold,
    );
    y += 20.0;
    draw_text(&format!("Species: {}", node.species), 10.0, y, 18.0, gold);
    y += 20.0;
    draw_text(
        &format!("Vitality: {} units", node.nourishment),
        10.0,
        y,
        18.0,
        gold,
    );
    y += 22.0;

    for comment in node.comments.iter().rev().take(3) {
        draw_text(
            &format!("{}: {}", comment.author, comment.text),
            10.0,
            y,
            16.0,
            Color::new(1.0, 1.0, 1.0, 0.8),
        );
        y += 18.0;
    }

    if matches!(map.interaction, Interaction::Replying(_)) {
        draw_text(&format!("Reply: {}_", reply_draft), 10.0, y + 8.0, 18.0, WHITE);
        draw_text(
            "ENTER=Send | ESC=Cancel",
            10.0,
            screen_height() - 20.0,
            16.0,
            Color::new(1.0, 1.0, 1.0, 0.7),
        );
    } else {
        draw_text(
            "N=Nourish | ENTER=Reply | Click empty space to deselect",
            10.0,
            screen_height() - 20.0,
            16.0,
            Color::new(1.0, 1.0, 1.0, 0.7),
        );
    }
}

// Pixels per silhouette unit. Controls uses the same factor to map the
// mouse back into silhouette space.
pub fn field_scale() -> f32 {
    screen_width().min(screen_height()) / 14.0
}

// Particles live in silhouette space, a few units across and y-up. Scale to
// the window and flip y.
pub fn draw_field(field: &ParticleField) {
    let w = screen_width();
    let h = screen_height();
    let scale = field_scale();
    let cx = w / 2.0;
    let cy = h / 2.0;

    for p in &field.particles {
        draw_circle(
            cx + p.x * scale,
            cy - p.y * scale,
            2.0,
            Color::new(p.color[0], p.color[1], p.color[2], 0.9),
        );
    }
}

pub fn draw_field_hud(field: &ParticleField) {
    let label = format!(
        "Silhouette: {} | Particles: {} | FPS: {}",
        field.silhouette.label(),
        field.len(),
        get_fps()
    );
    draw_text(&label, 10.0, 20.0, 20.0, WHITE);
    draw_text(
        "TAB=Swap silhouette | Move mouse to stir | P=Screenshot | 1=Lab | 2=Map | 3=Field",
        10.0,
        screen_height() - 20.0,
        16.0,
        Color::new(1.0, 1.0, 1.0, 0.7),
    );
}
