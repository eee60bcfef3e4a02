use ::rand as external_rand;
use clap::Parser;
use external_rand::rngs::StdRng;
use external_rand::SeedableRng;

mod annotations;
mod app;
mod config;
mod environment;
mod filament;
mod growth;
mod identity;
mod lab;
mod map;
mod news;
mod particles;
mod progress;
mod recipes;
mod species;
mod store;
mod types;

use app::App;
use config::AppConfig;
use store::JsonFileStore;

#[cfg(feature = "ui")]
mod controls;
#[cfg(feature = "ui")]
mod visualization;

mod api;

#[cfg(feature = "ui")]
use macroquad::prelude::*;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Run in headless mode (HTTP API server)
    #[arg(long)]
    headless: bool,

    /// Port for headless API server
    #[arg(long, default_value_t = 8080)]
    port: u16,

    /// Configuration file path (YAML or JSON). If not specified, searches for config.yaml, config.yml, or config.json in current directory.
    #[arg(short, long)]
    config: Option<String>,

    /// Seed for the session RNG. Two sessions with the same seed grow the
    /// same colonies.
    #[arg(long)]
    seed: Option<u64>,
}

#[cfg(not(feature = "ui"))]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Headless mode only
    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;
    headless_main(args.port, args.seed, config).await
}

#[cfg(feature = "ui")]
#[macroquad::main(window_conf)]
async fn main() {
    let args = Args::parse();

    let config = match load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            std::process::exit(1);
        }
    };

    if args.headless {
        // Run headless mode even with UI feature enabled
        let rt = match tokio::runtime::Runtime::new() {
            Ok(rt) => rt,
            Err(e) => {
                eprintln!("Error starting runtime: {}", e);
                std::process::exit(1);
            }
        };
        rt.block_on(async {
            if let Err(e) = headless_main(args.port, args.seed, config).await {
                eprintln!("Error running headless mode: {}", e);
                std::process::exit(1);
            }
        });
    } else {
        ui_main(config, args.seed).await;
    }
}

/// Load configuration from file or use default
fn load_config(config_path: Option<&str>) -> Result<AppConfig, Box<dyn std::error::Error>> {
    if let Some(path) = config_path {
        AppConfig::from_file(path)
            .map_err(|e| format!("Failed to load config from {}: {}", path, e).into())
    } else {
        Ok(AppConfig::from_default_paths())
    }
}

fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Wire the session to its on-disk stores and bring every layer up.
fn build_app(rng: &mut StdRng, config: AppConfig) -> App {
    let progress_store = JsonFileStore::new(config.state_dir.clone());
    let identity_store = JsonFileStore::new(config.state_dir.clone());
    App::new(rng, config, Box::new(progress_store), Box::new(identity_store))
}

#[cfg(feature = "ui")]
async fn ui_main(config: AppConfig, seed: Option<u64>) {
    use controls::{handle_input, Screen, UiState};
    use visualization::{
        draw_chamber, draw_field, draw_field_hud, draw_lab_hud, draw_map, draw_map_hud,
    };

    let mut rng = make_rng(seed);
    let mut app = build_app(&mut rng, config);
    let mut ui = UiState::new();

    let mut last_width = screen_width();
    let mut last_height = screen_height();

    loop {
        // A window resize invalidates the chamber raster; the percent-based
        // layers rescale on their own
        let width = screen_width();
        let height = screen_height();
        if (width - last_width).abs() > 0.5 || (height - last_height).abs() > 0.5 {
            app.resize(width, height);
            last_width = width;
            last_height = height;
        }

        handle_input(&mut app, &mut ui, &mut rng);

        app.step(get_frame_time(), &mut rng);

        clear_background(Color::new(0.03, 0.06, 0.05, 1.0));

        match ui.screen {
            Screen::Lab => {
                draw_chamber(&app.lab.chamber, &app.lab.environment, &app.config.growth);
                draw_lab_hud(&app.lab, &app.progress);
            }
            Screen::Map => {
                draw_map(&app.map, &app.annotations, &app.config.map);
                draw_map_hud(&app.map, &app.status, &ui.reply_draft);
            }
            Screen::Field => {
                draw_field(&app.field);
                draw_field_hud(&app.field);
            }
        }

        // Take screenshot if requested
        if ui.take_screenshot {
            ui.take_screenshot = false;
            let timestamp = std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0);
            let filename = format!("mycelia_screenshot_{}.png", timestamp);

            match capture_screenshot(&filename) {
                Ok(_) => println!("Screenshot saved: {}", filename),
                Err(e) => eprintln!("Failed to save screenshot {}: {}", filename, e),
            }
        }

        next_frame().await;
    }
}

#[cfg(feature = "ui")]
fn window_conf() -> Conf {
    // Try to load config to set window size, fall back to defaults if not available
    let config = AppConfig::from_default_paths();

    Conf {
        window_title: "Mycelia".to_owned(),
        window_width: config.window_width as i32,
        window_height: config.window_height as i32,
        ..Default::default()
    }
}

#[cfg(feature = "ui")]
/// Capture a screenshot of the current screen
fn capture_screenshot(filename: &str) -> Result<(), Box<dyn std::error::Error>> {
    let screen_image = get_screen_data();

    let width = screen_image.width as u32;
    let height = screen_image.height as u32;
    let bytes = &screen_image.bytes;

    // OpenGL rows run bottom-up while image files run top-down, so flip
    // vertically while copying
    let mut img = image::RgbaImage::new(width, height);
    for y in 0..height {
        for x in 0..width {
            let idx = ((y * width + x) * 4) as usize;
            if idx + 3 < bytes.len() {
                let pixel = image::Rgba([
                    bytes[idx],
                    bytes[idx + 1],
                    bytes[idx + 2],
                    bytes[idx + 3],
                ]);
                img.put_pixel(x, height - 1 - y, pixel);
            }
        }
    }

    img.save(filename)?;

    Ok(())
}

/// Headless mode - runs HTTP API server
async fn headless_main(
    port: u16,
    seed: Option<u64>,
    config: AppConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    use api::{run_server, ApiState};

    let mut rng = make_rng(seed);
    let app = build_app(&mut rng, config);

    let api_state = ApiState::new(app, rng);

    run_server(api_state, port).await?;

    Ok(())
}
