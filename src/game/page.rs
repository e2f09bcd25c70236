//! The gate page: hosts a `GameSession` full screen
//!
//! Mounting attaches the keyboard listener and requests the first frame.
//! Teardown undoes all three (frame, timers, listener) so nothing from this
//! view survives navigation.

use macroquad::prelude::*;
use macroquad::logging::info;
use crate::ui::{draw_wrapped, text_button, Rect, UiContext, ACCENT_ALT, PANEL_BG, TEXT_COLOR, TEXT_DIM};
use super::input::{Key, KeySignal, KeyboardListener};
use super::level::LevelDef;
use super::render::GameRenderer;
use super::session::{GameEvent, GameSession};
use super::settings::GameSettings;
use super::timer::FrameScheduler;

/// What the host should do after this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePageAction {
    None,
    /// Player pressed "Skip Game"
    Skip,
    /// Delayed completion notification arrived
    Complete,
}

/// Map a window key code to a game key
pub fn map_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::W => Some(Key::W),
        KeyCode::A => Some(Key::A),
        KeyCode::S => Some(Key::S),
        KeyCode::D => Some(Key::D),
        KeyCode::Up => Some(Key::ArrowUp),
        KeyCode::Down => Some(Key::ArrowDown),
        KeyCode::Left => Some(Key::ArrowLeft),
        KeyCode::Right => Some(Key::ArrowRight),
        KeyCode::Space => Some(Key::Space),
        _ => None,
    }
}

pub struct GamePage {
    session: GameSession,
    listener: KeyboardListener,
    frames: FrameScheduler,
    renderer: GameRenderer,
    screen_size: (f32, f32),
    show_completion: bool,
}

impl GamePage {
    pub fn mount(level: &LevelDef, settings: GameSettings) -> Self {
        let mut listener = KeyboardListener::new();
        listener.attach();
        let mut frames = FrameScheduler::new();
        frames.request();

        info!("Game mounted ({} platforms, {} collectibles)", level.platforms.len() + 1, level.collectibles.len());

        Self {
            session: GameSession::new(level, settings),
            listener,
            frames,
            renderer: GameRenderer::new(),
            screen_size: (0.0, 0.0),
            show_completion: false,
        }
    }

    /// Forward this frame's key transitions to the listener
    fn forward_keys(&mut self) {
        for code in get_keys_pressed() {
            if let Some(key) = map_key(code) {
                self.listener.dispatch(KeySignal::Down, key);
            }
        }
        for code in get_keys_released() {
            if let Some(key) = map_key(code) {
                self.listener.dispatch(KeySignal::Up, key);
            }
        }
    }

    /// Run the requested tick, if any, and react to its events
    fn step(&mut self, now: f64) -> GamePageAction {
        if self.frames.take_due().is_none() {
            return GamePageAction::None;
        }

        let mut action = GamePageAction::None;
        for event in self.session.tick(self.listener.state(), now) {
            match event {
                GameEvent::CollectiblePicked(i) => {
                    info!("Collectible {} picked ({}/{})", i, self.session.collected_count(), self.session.collectibles().len());
                }
                GameEvent::FinishReached => {
                    info!("Finish reached");
                    self.show_completion = true;
                }
                GameEvent::Completed => {
                    info!("Level complete");
                    action = GamePageAction::Complete;
                }
            }
        }

        self.frames.request();
        action
    }

    /// Update and draw one frame into `rect`
    pub fn frame(&mut self, ctx: &mut UiContext, rect: Rect, now: f64) -> GamePageAction {
        if self.screen_size != (rect.w, rect.h) {
            self.screen_size = (rect.w, rect.h);
            self.renderer.resize(rect.w, rect.h);
        }

        self.forward_keys();
        let mut action = self.step(now);

        self.renderer.render(&self.session);
        self.renderer.draw(rect);

        if self.draw_overlay(ctx, rect) {
            action = GamePageAction::Skip;
        }
        action
    }

    /// Skip button, controls and completion banner. Returns true on skip.
    fn draw_overlay(&self, ctx: &mut UiContext, rect: Rect) -> bool {
        let skip_rect = Rect::new(rect.right() - 130.0, rect.y + 16.0, 114.0, 34.0);
        let skipped = text_button(ctx, skip_rect, "Skip Game", 16.0);

        let gems = format!("Gems: {}/{}", self.session.collected_count(), self.session.collectibles().len());
        draw_text(&gems, rect.x + 20.0, rect.y + 36.0, 18.0, TEXT_COLOR);

        if self.show_completion {
            let panel = Rect::new(rect.center_x() - 190.0, rect.center_y() - 60.0, 380.0, 120.0);
            draw_rectangle(panel.x, panel.y, panel.w, panel.h, PANEL_BG);
            draw_rectangle_lines(panel.x, panel.y, panel.w, panel.h, 2.0, ACCENT_ALT);
            let title = "Level Complete!";
            let dims = measure_text(title, None, 32, 1.0);
            draw_text(title, panel.center_x() - dims.width * 0.5, panel.y + 52.0, 32.0, TEXT_COLOR);
            let sub = "Loading Portfolio...";
            let dims = measure_text(sub, None, 18, 1.0);
            draw_text(sub, panel.center_x() - dims.width * 0.5, panel.y + 88.0, 18.0, TEXT_DIM);
        } else {
            let x = rect.x + 20.0;
            let mut y = rect.bottom() - 100.0;
            draw_text("Controls:", x, y, 18.0, TEXT_COLOR);
            y += 22.0;
            for line in ["WASD / Arrow Keys: Move", "SPACE: Jump"] {
                draw_text(line, x, y, 16.0, TEXT_DIM);
                y += 20.0;
            }
            draw_wrapped("Reach the glowing platform to continue!", x, y, rect.w - 40.0, 16.0, ACCENT_ALT);
        }

        skipped
    }

    /// Cancel the pending frame and timers, and stop listening for keys
    pub fn teardown(&mut self) {
        self.frames.cancel();
        self.session.teardown();
        self.listener.detach();
        info!("Game torn down");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> GamePage {
        GamePage::mount(&LevelDef::gate(), GameSettings::default())
    }

    #[test]
    fn test_key_mapping() {
        assert_eq!(map_key(KeyCode::Up), Some(Key::ArrowUp));
        assert_eq!(map_key(KeyCode::Space), Some(Key::Space));
        assert_eq!(map_key(KeyCode::Escape), None);
    }

    #[test]
    fn test_mount_requests_first_frame() {
        let p = page();
        assert!(p.listener.is_attached());
        assert!(p.frames.is_requested());
    }

    #[test]
    fn test_each_step_requests_the_next() {
        let mut p = page();
        p.step(0.0);
        assert!(p.frames.is_requested());
        assert!((p.session.character().position.y - 0.985).abs() < 1e-6);
    }

    #[test]
    fn test_teardown_stops_everything() {
        let mut p = page();
        p.listener.dispatch(KeySignal::Down, Key::D);
        p.teardown();

        assert!(!p.listener.is_attached());
        assert!(!p.listener.state().is_held(Key::D));

        // No frame is due, so the session does not advance
        let before = p.session.character().position;
        assert_eq!(p.step(1.0), GamePageAction::None);
        assert_eq!(p.session.character().position, before);
    }
}
