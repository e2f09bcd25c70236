//! IHSAN.ME: portfolio with a platformer gate
//!
//! On start a small 3D platformer runs full screen on the software
//! rasterizer. Reaching the finish (or skipping) opens the portfolio:
//! - Dashboard with profile, links and a MIDI music player
//! - Projects
//! - A local chatroom
//! - Passions

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod rasterizer;
mod assets;
mod ui;
mod game;
mod music;
mod pages;
mod app;

use macroquad::prelude::*;
use macroquad::logging::{info, warn};
use rasterizer::{HEIGHT, WIDTH};
use ui::{MouseState, Rect, UiContext};
use game::{load_level, GameSettings, LevelDef};
use music::{AudioEngine, MusicPlayer};
use pages::DashboardPage;
use app::{AppState, Page};

const SETTINGS_PATH: &str = "assets/config/game.ron";
const LEVEL_PATH: &str = "assets/levels/gate.ron";
const ICON_FONT_PATH: &str = "assets/fonts/lucide.ttf";

fn window_conf() -> Conf {
    Conf {
        window_title: "IHSAN.ME".to_string(),
        window_width: WIDTH as i32 * 4,
        window_height: HEIGHT as i32 * 3,
        window_resizable: true,
        high_dpi: true,
        ..Default::default()
    }
}

/// Settings from RON, or the compiled-in defaults
async fn load_settings() -> GameSettings {
    let Some(text) = assets::load_text(SETTINGS_PATH).await else {
        warn!("Using default game settings");
        return GameSettings::default();
    };
    match GameSettings::from_ron(&text) {
        Ok(settings) => {
            info!("Loaded {}", SETTINGS_PATH);
            settings
        }
        Err(e) => {
            warn!("Bad {}: {}, using defaults", SETTINGS_PATH, e);
            GameSettings::default()
        }
    }
}

/// Level from RON, or the built-in gate level
async fn load_gate_level() -> LevelDef {
    match load_level(LEVEL_PATH).await {
        Ok(level) => {
            info!("Loaded {} ({} platforms)", LEVEL_PATH, level.platforms.len());
            level
        }
        Err(e) => {
            warn!("{}: {}, using built-in level", LEVEL_PATH, e);
            LevelDef::gate()
        }
    }
}

/// Unix time in seconds
fn unix_now() -> f64 {
    macroquad::miniquad::date::now()
}

#[macroquad::main(window_conf)]
async fn main() {
    info!("=== IHSAN.ME v{} ===", VERSION);

    let settings = load_settings().await;
    let level = load_gate_level().await;

    // Load icon font (Lucide); buttons fall back to text glyphs without it
    let icon_font = match load_ttf_font(ICON_FONT_PATH).await {
        Ok(font) => {
            info!("Loaded Lucide icon font");
            Some(font)
        }
        Err(e) => {
            warn!("Failed to load Lucide font: {}, using text icons", e);
            None
        }
    };

    let mut dashboard = DashboardPage::new(MusicPlayer::new(AudioEngine::new()));
    dashboard.load().await;

    let mut app = AppState::new(level, settings, dashboard, icon_font, unix_now());

    // Mouse state tracking
    let mut last_left_down = false;

    // UI context
    let mut ui_ctx = UiContext::new();

    loop {
        let mouse_state = MouseState::sample(last_left_down);
        last_left_down = mouse_state.left_down;
        ui_ctx.begin_frame(mouse_state);

        let now = get_time();
        app.poll_switches(now);

        clear_background(Color::from_rgba(10, 10, 10, 255));
        let screen = Rect::new(0.0, 0.0, screen_width(), screen_height());

        if app.active() == Page::Game {
            app.draw_game(&mut ui_ctx, screen, now);
        } else {
            app.draw_portfolio(&mut ui_ctx, screen, unix_now());
        }

        // Music keeps playing across pages
        app.dashboard.update().await;

        ui_ctx.draw_tooltip();
        next_frame().await;
    }
}
