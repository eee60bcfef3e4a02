use ::rand as external_rand;
use external_rand::Rng;
use macroquad::prelude::*;

use crate::app::App;
use crate::lab::SPECIMEN_SHELF;
use crate::map::Interaction;
use crate::visualization::field_scale;

const REPLY_DRAFT_MAX: usize = 120;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Lab,
    Map,
    Field,
}

pub struct UiState {
    pub screen: Screen,
    pub reply_draft: String,
    pub take_screenshot: bool,
}

impl UiState {
    pub fn new() -> Self {
        Self {
            screen: Screen::Lab,
            reply_draft: String::new(),
            take_screenshot: false,
        }
    }
}

pub fn handle_input<R: Rng>(app: &mut App, ui: &mut UiState, rng: &mut R) {
    // While composing a reply the keyboard belongs to the draft; only
    // ENTER and ESC act on anything else.
    if ui.screen == Screen::Map && matches!(app.map.interaction, Interaction::Replying(_)) {
        while let Some(ch) = get_char_pressed() {
            if !ch.is_control() && ui.reply_draft.len() < REPLY_DRAFT_MAX {
                ui.reply_draft.push(ch);
            }
        }
        if is_key_pressed(KeyCode::Backspace) {
            ui.reply_draft.pop();
        }
        if is_key_pressed(KeyCode::Enter) && app.submit_reply(rng, &ui.reply_draft) {
            ui.reply_draft.clear();
        }
        if is_key_pressed(KeyCode::Escape) {
            app.map.cancel_reply();
            ui.reply_draft.clear();
        }
        return;
    }

    if is_key_pressed(KeyCode::Key1) {
        ui.screen = Screen::Lab;
    }
    if is_key_pressed(KeyCode::Key2) {
        ui.screen = Screen::Map;
    }
    if is_key_pressed(KeyCode::Key3) {
        ui.screen = Screen::Field;
    }
    // The pointer only stirs the field while that screen is visible
    if ui.screen != Screen::Field {
        app.pointer = None;
    }

    match ui.screen {
        Screen::Lab => handle_lab(app, rng),
        Screen::Map => handle_map(app, ui),
        Screen::Field => handle_field(app, ui, rng),
    }
}

fn handle_lab<R: Rng>(app: &mut App, _rng: &mut R) {
    if is_key_pressed(KeyCode::Space) {
        app.lab.toggle_play();
    }

    if is_key_pressed(KeyCode::R) {
        app.lab.reset(&app.config.growth);
    }

    // Held keys nudge the chamber conditions like dragging a slider
    if is_key_down(KeyCode::T) {
        let t = app.lab.environment.temperature;
        app.lab.environment.set_temperature(t + 0.5);
    }
    if is_key_down(KeyCode::G) {
        let t = app.lab.environment.temperature;
        app.lab.environment.set_temperature(t - 0.5);
    }
    if is_key_down(KeyCode::Y) {
        let h = app.lab.environment.humidity;
        app.lab.environment.set_humidity(h + 1.0);
    }
    if is_key_down(KeyCode::H) {
        let h = app.lab.environment.humidity;
        app.lab.environment.set_humidity(h - 1.0);
    }
    if is_key_down(KeyCode::U) {
        let l = app.lab.environment.light;
        app.lab.environment.set_light(l + 1.0);
    }
    if is_key_down(KeyCode::J) {
        let l = app.lab.environment.light;
        app.lab.environment.set_light(l - 1.0);
    }

    // Cycle to the next shelf specimen, buying it if still locked
    if is_key_pressed(KeyCode::B) {
        let idx = SPECIMEN_SHELF
            .iter()
            .position(|(id, _)| *id == app.lab.specimen)
            .unwrap_or(0);
        let (next_id, _) = SPECIMEN_SHELF[(idx + 1) % SPECIMEN_SHELF.len()];
        app.cultivate(next_id);
    }
}

fn handle_map(app: &mut App, ui: &mut UiState) {
    if is_mouse_button_pressed(MouseButton::Left) {
        let (mx, my) = mouse_position();
        app.click_map(mx, my, screen_width(), screen_height());
    }

    if is_key_pressed(KeyCode::N) {
        app.nourish_selected();
    }

    if is_key_pressed(KeyCode::Enter) {
        app.map.begin_reply();
        ui.reply_draft.clear();
        // Drop queued characters so the keys that opened the draft
        // do not end up inside it
        clear_input_queue();
    }

    if is_key_pressed(KeyCode::Escape) {
        app.map.select(None);
    }
}

fn handle_field<R: Rng>(app: &mut App, ui: &mut UiState, rng: &mut R) {
    if is_key_pressed(KeyCode::Tab) {
        app.toggle_field_silhouette(rng);
    }

    let (mx, my) = mouse_position();
    let w = screen_width();
    let h = screen_height();
    let scale = field_scale();
    app.pointer = Some(((mx - w / 2.0) / scale, (h / 2.0 - my) / scale));

    // Set flag to take screenshot at end of frame
    if is_key_pressed(KeyCode::P) {
        ui.take_screenshot = true;
    }
}
