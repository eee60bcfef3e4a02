// API module for headless mode - HTTP endpoints to interact with the session

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use tower_http::cors::CorsLayer;

use crate::app::App;
use crate::config::AppConfig;
use crate::identity::Profile;
use crate::map::Interaction;
use crate::news;
use crate::progress::ProgressRecord;
use crate::recipes::{Recipe, RecipeError};
use crate::species::{self, Species};
use ::rand::rngs::StdRng;

const FRAME_DT: f32 = 1.0 / 60.0;

// Serializable views of session data for API responses
#[derive(Serialize, Clone)]
pub struct FilamentData {
    pub x: f32,
    pub y: f32,
    pub angle: f32,
    pub speed: f32,
    pub life: f32,
    pub width: f32,
}

#[derive(Serialize, Clone)]
pub struct TrailData {
    pub from_x: f32,
    pub from_y: f32,
    pub to_x: f32,
    pub to_y: f32,
    pub width: f32,
    pub intensity: f32,
    pub age: f32,
}

#[derive(Serialize, Clone)]
pub struct EnvironmentData {
    pub temperature: f32,
    pub humidity: f32,
    pub light: f32,
    pub growth_rate: f32,
    pub optimal: bool,
}

#[derive(Serialize, Clone)]
pub struct LabData {
    pub playing: bool,
    pub specimen: String,
    pub environment: EnvironmentData,
    pub filaments: Vec<FilamentData>,
    pub trails: Vec<TrailData>,
}

#[derive(Serialize, Clone)]
pub struct ParticleData {
    pub x: f32,
    pub y: f32,
    pub color: [f32; 3],
}

#[derive(Serialize, Clone)]
pub struct FieldData {
    pub silhouette: String,
    pub particles: Vec<ParticleData>,
}

#[derive(Serialize, Clone)]
pub struct CommentData {
    pub author: String,
    pub text: String,
}

#[derive(Serialize, Clone)]
pub struct NodeData {
    pub id: u32,
    pub x: f32,
    pub y: f32,
    pub kind: String,
    pub size: f32,
    pub nourishment: u32,
    pub author: String,
    pub species: String,
    pub comments: Vec<CommentData>,
}

#[derive(Serialize, Clone)]
pub struct PulseData {
    pub target_x: f32,
    pub target_y: f32,
    pub progress: f32,
}

#[derive(Serialize, Clone)]
pub struct InteractionData {
    pub mode: String,
    pub node: Option<u32>,
}

#[derive(Serialize, Clone)]
pub struct MapData {
    pub nodes: Vec<NodeData>,
    pub connected: Vec<u32>,
    pub pulses: Vec<PulseData>,
    pub interaction: InteractionData,
    pub user_x: f32,
    pub user_y: f32,
}

#[derive(Serialize, Clone)]
pub struct AnnotationData {
    pub x: f32,
    pub y: f32,
    pub text: String,
    pub life: f32,
    pub opacity: f32,
}

#[derive(Serialize, Clone)]
pub struct StatsData {
    pub filament_count: usize,
    pub trail_count: usize,
    pub particle_count: usize,
    pub node_count: usize,
    pub connection_count: usize,
    pub pulse_count: usize,
    pub annotation_count: usize,
    pub mycelium: u32,
    pub frame_index: u64,
}

#[derive(Serialize, Clone)]
pub struct SessionStateResponse {
    pub lab: LabData,
    pub map: MapData,
    pub field: FieldData,
    pub annotations: Vec<AnnotationData>,
    pub progress: ProgressRecord,
    pub profile: Option<Profile>,
    pub status: String,
    pub recent_events: Vec<String>,
    pub stats: StatsData,
}

#[derive(Serialize, Clone)]
pub struct CookingNotesData {
    pub method: String,
    pub min_cook_minutes: Option<u32>,
    pub warning: Option<String>,
    pub warning_critical: bool,
}

#[derive(Serialize, Clone)]
pub struct LookalikeData {
    pub name: String,
    pub warning: String,
}

#[derive(Serialize, Clone)]
pub struct AnatomyData {
    pub koh_reaction: Option<String>,
    pub spore_print: Option<String>,
    pub ring_type: Option<String>,
    pub gill_attachment: Option<String>,
}

#[derive(Serialize, Clone)]
pub struct EcologyData {
    pub relationship: String,
    pub host_trees: Vec<String>,
}

#[derive(Serialize, Clone)]
pub struct SpeciesData {
    pub id: String,
    pub name: String,
    pub scientific_name: String,
    pub family: String,
    pub edibility: String,
    pub description: String,
    pub seasons: Vec<String>,
    pub habitats: Vec<String>,
    pub cap_shape: String,
    pub odor: String,
    pub spore_color: String,
    pub color_change: Option<String>,
    pub lookalikes: Vec<LookalikeData>,
    pub anatomy: Option<AnatomyData>,
    pub ecology: Option<EcologyData>,
    pub cooking: Option<CookingNotesData>,
}

#[derive(Serialize, Clone)]
pub struct ArticleData {
    pub id: String,
    pub title: String,
    pub date: String,
    pub category: String,
    pub author: String,
    pub summary: String,
}

#[derive(Serialize, Clone)]
pub struct RecipeStepData {
    pub number: u32,
    pub instruction: String,
    pub minutes: u32,
    pub heat: Option<String>,
}

#[derive(Serialize, Clone)]
pub struct RecipeIngredientData {
    pub species_id: String,
    pub name: String,
    pub quantity: String,
    pub main: bool,
}

#[derive(Serialize, Clone)]
pub struct SafetyWarningData {
    pub text: String,
    pub critical: bool,
}

#[derive(Serialize, Clone)]
pub struct RecipeData {
    pub title: String,
    pub description: String,
    pub difficulty: String,
    pub total_minutes: u32,
    pub servings: u32,
    pub ingredients: Vec<RecipeIngredientData>,
    pub steps: Vec<RecipeStepData>,
    pub warnings: Vec<SafetyWarningData>,
    pub safety_level: u8,
}

#[derive(Deserialize)]
pub struct StepQuery {
    pub steps: Option<usize>,
}

#[derive(Deserialize)]
pub struct EnvironmentRequest {
    pub temperature: Option<f32>,
    pub humidity: Option<f32>,
    pub light: Option<f32>,
}

#[derive(Deserialize)]
pub struct CultivateRequest {
    pub species_id: String,
}

#[derive(Deserialize)]
pub struct SelectRequest {
    pub node_id: Option<u32>,
}

#[derive(Deserialize)]
pub struct NourishRequest {
    pub node_id: u32,
}

#[derive(Deserialize)]
pub struct ReplyRequest {
    pub node_id: u32,
    pub text: String,
}

#[derive(Deserialize)]
pub struct RecipeRequest {
    pub species_ids: Vec<String>,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    // Accepted but never checked; the network is make-believe.
    pub password: Option<String>,
}

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

// Shared state for the API server
#[derive(Clone)]
pub struct ApiState {
    pub app: Arc<Mutex<App>>,
    pub rng: Arc<Mutex<StdRng>>,
}

impl ApiState {
    pub fn new(app: App, rng: StdRng) -> Self {
        Self {
            app: Arc::new(Mutex::new(app)),
            rng: Arc::new(Mutex::new(rng)),
        }
    }
}

// Helper functions to convert session state to API responses
fn environment_data(app: &App) -> EnvironmentData {
    let env = &app.lab.environment;
    EnvironmentData {
        temperature: env.temperature,
        humidity: env.humidity,
        light: env.light,
        growth_rate: env.growth_rate(),
        optimal: env.is_optimal(),
    }
}

fn lab_data(app: &App) -> LabData {
    LabData {
        playing: app.lab.playing,
        specimen: app.lab.specimen.clone(),
        environment: environment_data(app),
        filaments: app
            .lab
            .filaments
            .iter()
            .map(|f| FilamentData {
                x: f.x,
                y: f.y,
                angle: f.angle,
                speed: f.speed,
                life: f.life,
                width: f.width,
            })
            .collect(),
        trails: app
            .lab
            .trails
            .iter()
            .map(|t| TrailData {
                from_x: t.from_x,
                from_y: t.from_y,
                to_x: t.to_x,
                to_y: t.to_y,
                width: t.width,
                intensity: t.intensity,
                age: t.age,
            })
            .collect(),
    }
}

fn field_data(app: &App) -> FieldData {
    FieldData {
        silhouette: app.field.silhouette.label().to_string(),
        particles: app
            .field
            .particles
            .iter()
            .map(|p| ParticleData {
                x: p.x,
                y: p.y,
                color: p.color,
            })
            .collect(),
    }
}

fn interaction_data(app: &App) -> InteractionData {
    let (mode, node) = match app.map.interaction {
        Interaction::Idle => ("idle", None),
        Interaction::Selected(id) => ("selected", Some(id)),
        Interaction::Replying(id) => ("replying", Some(id)),
    };
    InteractionData {
        mode: mode.to_string(),
        node,
    }
}

fn map_data(app: &App) -> MapData {
    let mut connected: Vec<u32> = app.map.connected.iter().copied().collect();
    connected.sort_unstable();
    MapData {
        nodes: app
            .map
            .nodes
            .iter()
            .map(|n| NodeData {
                id: n.id,
                x: n.x,
                y: n.y,
                kind: n.kind.label().to_string(),
                size: n.size,
                nourishment: n.nourishment,
                author: n.author.to_string(),
                species: n.species.to_string(),
                comments: n
                    .comments
                    .iter()
                    .map(|c| CommentData {
                        author: c.author.clone(),
                        text: c.text.clone(),
                    })
                    .collect(),
            })
            .collect(),
        connected,
        pulses: app
            .map
            .pulses
            .iter()
            .map(|p| PulseData {
                target_x: p.target_x,
                target_y: p.target_y,
                progress: p.progress,
            })
            .collect(),
        interaction: interaction_data(app),
        user_x: app.map.user_x,
        user_y: app.map.user_y,
    }
}

fn annotation_data(app: &App) -> Vec<AnnotationData> {
    app.annotations
        .annotations
        .iter()
        .map(|a| AnnotationData {
            x: a.x,
            y: a.y,
            text: a.text.clone(),
            life: a.life,
            opacity: a.opacity(),
        })
        .collect()
}

fn stats_data(app: &App) -> StatsData {
    let (filament_count, trail_count) = app.lab.stats();
    StatsData {
        filament_count,
        trail_count,
        particle_count: app.field.len(),
        node_count: app.map.nodes.len(),
        connection_count: app.map.connected.len(),
        pulse_count: app.map.pulses.len(),
        annotation_count: app.annotations.len(),
        mycelium: app.progress.mycelium(),
        frame_index: app.lab.frame_index,
    }
}

fn session_to_response(app: &App) -> SessionStateResponse {
    SessionStateResponse {
        lab: lab_data(app),
        map: map_data(app),
        field: field_data(app),
        annotations: annotation_data(app),
        progress: app.progress.record().clone(),
        profile: app.identity.current().cloned(),
        status: app.status.clone(),
        recent_events: app.recent_events.clone(),
        stats: stats_data(app),
    }
}

fn species_data(s: &Species) -> SpeciesData {
    SpeciesData {
        id: s.id.to_string(),
        name: s.name.to_string(),
        scientific_name: s.scientific_name.to_string(),
        family: s.family.to_string(),
        edibility: s.edibility.label().to_string(),
        description: s.description.to_string(),
        seasons: s.seasons.iter().map(|x| x.to_string()).collect(),
        habitats: s.habitats.iter().map(|x| x.to_string()).collect(),
        cap_shape: s.cap_shape.to_string(),
        odor: s.odor.to_string(),
        spore_color: s.spore_color.to_string(),
        color_change: s.color_change.map(|c| c.to_string()),
        lookalikes: s
            .lookalikes
            .iter()
            .map(|l| LookalikeData {
                name: l.name.to_string(),
                warning: l.warning.to_string(),
            })
            .collect(),
        anatomy: s.anatomy.as_ref().map(|a| AnatomyData {
            koh_reaction: a.koh_reaction.map(|x| x.to_string()),
            spore_print: a.spore_print.map(|x| x.to_string()),
            ring_type: a.ring_type.map(|x| x.to_string()),
            gill_attachment: a.gill_attachment.map(|x| x.to_string()),
        }),
        ecology: s.ecology.as_ref().map(|e| EcologyData {
            relationship: e.relationship.to_string(),
            host_trees: e.host_trees.iter().map(|t| t.to_string()).collect(),
        }),
        cooking: s.cooking.as_ref().map(|c| CookingNotesData {
            method: c.method.to_string(),
            min_cook_minutes: c.min_cook_minutes,
            warning: c.warning.map(|w| w.to_string()),
            warning_critical: c.warning_critical,
        }),
    }
}

fn article_data(a: &news::Article) -> ArticleData {
    ArticleData {
        id: a.id.to_string(),
        title: a.title.to_string(),
        date: a.date.to_string(),
        category: a.category.to_string(),
        author: a.author.to_string(),
        summary: a.summary.to_string(),
    }
}

fn recipe_data(recipe: &Recipe) -> RecipeData {
    RecipeData {
        title: recipe.title.clone(),
        description: recipe.description.clone(),
        difficulty: recipe.difficulty.label().to_string(),
        total_minutes: recipe.total_minutes,
        servings: recipe.servings,
        ingredients: recipe
            .ingredients
            .iter()
            .map(|i| RecipeIngredientData {
                species_id: i.species_id.clone(),
                name: i.name.clone(),
                quantity: i.quantity.to_string(),
                main: i.main,
            })
            .collect(),
        steps: recipe
            .steps
            .iter()
            .map(|s| RecipeStepData {
                number: s.number,
                instruction: s.instruction.clone(),
                minutes: s.minutes,
                heat: s.heat.map(|h| h.to_string()),
            })
            .collect(),
        warnings: recipe
            .warnings
            .iter()
            .map(|w| SafetyWarningData {
                text: w.text.clone(),
                critical: w.critical,
            })
            .collect(),
        safety_level: recipe.safety_level,
    }
}

// GET /state - Get current session state
async fn get_state(
    State(api_state): State<ApiState>,
) -> Result<Json<SessionStateResponse>, StatusCode> {
    let app = api_state
        .app
        .lock()
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    Ok(Json(session_to_response(&app)))
}

// GET /stats - Get session statistics
async fn get_stats(State(api_state): State<ApiState>) -> Result<Json<StatsData>, StatusCode> {
    let app = api_state
        .app
        .lock()
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    Ok(Json(stats_data(&app)))
}

// GET /config - Get application configuration
async fn get_config(State(api_state): State<ApiState>) -> Result<Json<AppConfig>, StatusCode> {
    let app = api_state
        .app
        .lock()
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    Ok(Json(app.config.clone()))
}

// GET /species - Full catalog
async fn list_species() -> Json<Vec<SpeciesData>> {
    Json(species::all().iter().map(species_data).collect())
}

// GET /species/:id - Single catalog entry; misses fall back to the
// reference entry per the catalog contract
async fn get_species(Path(id): Path<String>) -> Json<SpeciesData> {
    Json(species_data(species::find_or_default(&id)))
}

// GET /news - Journal headlines
async fn list_articles() -> Json<Vec<ArticleData>> {
    Json(news::all().iter().map(article_data).collect())
}

// GET /news/:id - Single article
async fn get_article(Path(id): Path<String>) -> Result<Json<ArticleData>, StatusCode> {
    news::find(&id)
        .map(|a| Json(article_data(a)))
        .ok_or(StatusCode::NOT_FOUND)
}

// GET /map - Observation map snapshot
async fn get_map(State(api_state): State<ApiState>) -> Result<Json<MapData>, StatusCode> {
    let app = api_state
        .app
        .lock()
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    Ok(Json(map_data(&app)))
}

// GET /auth - Current profile, if signed in
async fn get_auth(
    State(api_state): State<ApiState>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    let app = api_state
        .app
        .lock()
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    Ok(Json(serde_json::json!({
        "signed_in": app.identity.is_signed_in(),
        "profile": app.identity.current(),
    })))
}

// POST /step?steps=N - Advance the session N frames
async fn step_session(
    Query(params): Query<StepQuery>,
    State(api_state): State<ApiState>,
) -> Result<Json<SessionStateResponse>, StatusCode> {
    let mut app = api_state
        .app
        .lock()
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    let mut rng = api_state
        .rng
        .lock()
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    let steps = params.steps.unwrap_or(1);
    for _ in 0..steps {
        app.step(FRAME_DT, &mut *rng);
    }

    Ok(Json(session_to_response(&app)))
}

// POST /reset - Reseed the growth chamber
async fn reset_lab(
    State(api_state): State<ApiState>,
) -> Result<Json<SessionStateResponse>, StatusCode> {
    let mut app = api_state
        .app
        .lock()
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    let growth = app.config.growth.clone();
    app.lab.reset(&growth);
    Ok(Json(session_to_response(&app)))
}

// POST /pause - Toggle lab playback
async fn pause_lab(
    State(api_state): State<ApiState>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    let mut app = api_state
        .app
        .lock()
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    app.lab.toggle_play();
    Ok(Json(serde_json::json!({ "playing": app.lab.playing })))
}

// POST /lab/environment - Adjust chamber conditions
async fn set_environment(
    State(api_state): State<ApiState>,
    Json(req): Json<EnvironmentRequest>,
) -> Result<Json<EnvironmentData>, StatusCode> {
    let mut app = api_state
        .app
        .lock()
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    if let Some(t) = req.temperature {
        app.lab.environment.set_temperature(t);
    }
    if let Some(h) = req.humidity {
        app.lab.environment.set_humidity(h);
    }
    if let Some(l) = req.light {
        app.lab.environment.set_light(l);
    }
    Ok(Json(environment_data(&app)))
}

// POST /lab/cultivate - Switch or buy a shelf specimen
async fn cultivate(
    State(api_state): State<ApiState>,
    Json(req): Json<CultivateRequest>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    let mut app = api_state
        .app
        .lock()
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    let outcome = app.cultivate(&req.species_id);
    Ok(Json(serde_json::json!({
        "outcome": format!("{outcome:?}"),
        "specimen": app.lab.specimen,
        "mycelium": app.progress.mycelium(),
        "unlocked": app.progress.record().unlocked,
        "status": app.status,
    })))
}

// POST /map/select - Select a node (or clear with null)
async fn select_node(
    State(api_state): State<ApiState>,
    Json(req): Json<SelectRequest>,
) -> Result<Json<InteractionData>, StatusCode> {
    let mut app = api_state
        .app
        .lock()
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    app.map.select(req.node_id);
    Ok(Json(interaction_data(&app)))
}

// POST /map/nourish - Feed a node
async fn nourish_node(
    State(api_state): State<ApiState>,
    Json(req): Json<NourishRequest>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    let mut app = api_state
        .app
        .lock()
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    app.nourish_node(req.node_id);
    Ok(Json(serde_json::json!({
        "status": app.status,
        "connected": app.map.connected.contains(&req.node_id),
        "nourishment": app.map.node(req.node_id).map(|n| n.nourishment),
    })))
}

// POST /map/reply - Post a reply to a node's thread
async fn reply_to_node(
    State(api_state): State<ApiState>,
    Json(req): Json<ReplyRequest>,
) -> Result<Json<serde_json::Value>, (StatusCode, Json<serde_json::Value>)> {
    let mut app = api_state.app.lock().map_err(|_| internal_error())?;
    let mut rng = api_state.rng.lock().map_err(|_| internal_error())?;

    if app.post_reply(&mut *rng, req.node_id, &req.text) {
        Ok(Json(serde_json::json!({
            "posted": true,
            "status": app.status,
        })))
    } else {
        Err((
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({
                "error": "empty_reply",
                "message": "Replies need some text.",
            })),
        ))
    }
}

// POST /field/toggle - Rebuild the particle field over the other silhouette
async fn toggle_field(
    State(api_state): State<ApiState>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    let mut app = api_state
        .app
        .lock()
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    let mut rng = api_state
        .rng
        .lock()
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    app.toggle_field_silhouette(&mut *rng);
    Ok(Json(serde_json::json!({
        "silhouette": app.field.silhouette.label(),
        "particles": app.field.len(),
    })))
}

// POST /recipes - Generate a recipe from catalog ids
async fn generate_recipe(
    State(api_state): State<ApiState>,
    Json(req): Json<RecipeRequest>,
) -> Result<Json<RecipeData>, (StatusCode, Json<serde_json::Value>)> {
    let app = api_state.app.lock().map_err(|_| internal_error())?;
    match app.generate_recipe(&req.species_ids) {
        Ok(recipe) => Ok(Json(recipe_data(&recipe))),
        Err(err) => {
            let (code, dangerous) = match &err {
                RecipeError::EmptySelection => ("empty_selection", Vec::new()),
                RecipeError::DangerousIngredients { names } => {
                    ("dangerous_ingredients", names.clone())
                }
            };
            Err((
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({
                    "error": code,
                    "message": err.to_string(),
                    "dangerous": dangerous,
                })),
            ))
        }
    }
}

// POST /auth/login - Mock sign-in
async fn login(
    State(api_state): State<ApiState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<Profile>, StatusCode> {
    let mut app = api_state
        .app
        .lock()
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    let mut rng = api_state
        .rng
        .lock()
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    let _ = req.password;
    let email = req.email.unwrap_or_default();
    let profile = app.identity.login(&mut *rng, &email);
    Ok(Json(profile))
}

// POST /auth/register - Mock registration
async fn register(
    State(api_state): State<ApiState>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<Profile>, StatusCode> {
    let mut app = api_state
        .app
        .lock()
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    let mut rng = api_state
        .rng
        .lock()
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    let _ = req.password;
    let username = req.username.unwrap_or_default();
    let email = req.email.unwrap_or_default();
    let profile = app.identity.register(&mut *rng, &username, &email);
    Ok(Json(profile))
}

// POST /auth/logout - Drop the session
async fn logout(
    State(api_state): State<ApiState>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    let mut app = api_state
        .app
        .lock()
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    app.identity.logout();
    Ok(Json(serde_json::json!({ "signed_in": false })))
}

fn internal_error() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(serde_json::json!({ "error": "internal" })),
    )
}

// Create the API router
pub fn create_router(api_state: ApiState) -> Router {
    Router::new()
        .route("/state", get(get_state))
        .route("/stats", get(get_stats))
        .route("/config", get(get_config))
        .route("/species", get(list_species))
        .route("/species/:id", get(get_species))
        .route("/news", get(list_articles))
        .route("/news/:id", get(get_article))
        .route("/map", get(get_map))
        .route("/auth", get(get_auth))
        .route("/step", post(step_session))
        .route("/reset", post(reset_lab))
        .route("/pause", post(pause_lab))
        .route("/lab/environment", post(set_environment))
        .route("/lab/cultivate", post(cultivate))
        .route("/map/select", post(select_node))
        .route("/map/nourish", post(nourish_node))
        .route("/map/reply", post(reply_to_node))
        .route("/field/toggle", post(toggle_field))
        .route("/recipes", post(generate_recipe))
        .route("/auth/login", post(login))
        .route("/auth/register", post(register))
        .route("/auth/logout", post(logout))
        .layer(CorsLayer::permissive())
        .with_state(api_state)
}

// Run the API server with automatic session stepping
pub async fn run_server(api_state: ApiState, port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let app = create_router(api_state.clone());
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;

    println!(
        "Mycelia headless API server running on http://localhost:{}",
        port
    );
    println!("Endpoints:");
    println!("  GET  /state   - Full session state");
    println!("  GET  /stats   - Session statistics");
    println!("  GET  /config  - Application configuration");
    println!("  GET  /species - Species catalog (also /species/:id)");
    println!("  GET  /news    - Journal articles (also /news/:id)");
    println!("  GET  /map     - Observation map snapshot");
    println!("  GET  /auth    - Current profile");
    println!("  POST /step?steps=N    - Advance N frames (default: 1)");
    println!("  POST /reset           - Reseed the growth chamber");
    println!("  POST /pause           - Toggle lab playback");
    println!("  POST /lab/environment - Adjust temperature/humidity/light");
    println!("  POST /lab/cultivate   - Switch or buy a specimen");
    println!("  POST /map/select      - Select a node");
    println!("  POST /map/nourish     - Feed a node");
    println!("  POST /map/reply       - Reply to a node's thread");
    println!("  POST /field/toggle    - Swap the particle silhouette");
    println!("  POST /recipes         - Generate a recipe");
    println!("  POST /auth/login|register|logout - Mock identity");
    println!();
    println!("Session is running automatically at ~60 FPS (lab respects pause)");

    // Spawn background task to continuously step the session
    let session_task = tokio::spawn(session_loop(api_state.clone()));

    // Run the server
    let server_handle = tokio::spawn(async move { axum::serve(listener, app).await });

    // Wait for either task to complete
    tokio::select! {
        result = server_handle => {
            result??;
        }
        _ = session_task => {
            eprintln!("Session loop ended unexpectedly");
        }
    }

    Ok(())
}

// Background task that continuously steps the session. Lab pause is honored
// inside the step itself; the ambient layers keep breathing regardless.
async fn session_loop(api_state: ApiState) {
    let frame_duration = std::time::Duration::from_secs_f32(FRAME_DT);

    loop {
        let start = std::time::Instant::now();

        {
            let mut app = match api_state.app.lock() {
                Ok(app) => app,
                Err(_) => break,
            };
            let mut rng = match api_state.rng.lock() {
                Ok(rng) => rng,
                Err(_) => break,
            };
            app.step(FRAME_DT, &mut *rng);
        }

        // Sleep to maintain target FPS
        let elapsed = start.elapsed();
        if elapsed < frame_duration {
            tokio::time::sleep(frame_duration - elapsed).await;
        }
    }
}
