//! Music player widget state: playlist cursor, transport and volume
//!
//! Clicks are turned into `PlayerCommand`s and applied immediately;
//! anything that needs file I/O is deferred to `update`, which the frame
//! loop awaits once per frame.

use macroquad::prelude::*;
use macroquad::logging::{info, warn};
use crate::assets::load_with_fallback;
use crate::ui::{
    draw_bar, draw_rounded_rect, icon, icon_button, Rect, UiContext, ACCENT_ALT, ACCENT_COLOR, PANEL_BG,
    PANEL_BORDER, TEXT_COLOR, TEXT_DIM,
};
use super::audio::AudioEngine;
use super::playlist::{format_time, Playlist};

pub const MUSIC_DIR: &str = "assets/music";
pub const SOUNDFONT_FILE: &str = "soundfont.sf2";
pub const DEFAULT_VOLUME: f32 = 0.7;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlayerCommand {
    TogglePlay,
    Next,
    Previous,
    SetVolume(f32),
}

pub struct MusicPlayer {
    playlist: Playlist,
    engine: AudioEngine,
    /// Playlist index currently loaded into the engine
    loaded: Option<usize>,
    duration: f64,
    playing: bool,
    play_requested: bool,
    volume: f32,
}

impl MusicPlayer {
    pub fn new(engine: AudioEngine) -> Self {
        engine.set_volume(DEFAULT_VOLUME);
        Self {
            playlist: Playlist::default(),
            engine,
            loaded: None,
            duration: 0.0,
            playing: false,
            play_requested: false,
            volume: DEFAULT_VOLUME,
        }
    }

    pub async fn load_soundfont(&mut self) {
        let Some(bytes) = load_with_fallback(MUSIC_DIR, SOUNDFONT_FILE).await else {
            warn!("No soundfont, music player will stay silent");
            return;
        };
        if let Err(e) = self.engine.load_soundfont_from_bytes(&bytes) {
            warn!("{}", e);
        }
    }

    #[cfg(test)]
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    pub fn apply(&mut self, cmd: PlayerCommand) {
        match cmd {
            PlayerCommand::TogglePlay => {
                if self.playing {
                    self.engine.pause();
                    self.playing = false;
                } else {
                    self.play_requested = true;
                }
            }
            PlayerCommand::Next => {
                self.playlist.next();
                self.change_track();
            }
            PlayerCommand::Previous => {
                self.playlist.previous();
                self.change_track();
            }
            PlayerCommand::SetVolume(v) => {
                self.volume = v.clamp(0.0, 1.0);
                self.engine.set_volume(self.volume);
            }
        }
    }

    /// A new track keeps playing if the old one was
    fn change_track(&mut self) {
        self.engine.stop();
        self.loaded = None;
        self.duration = 0.0;
        if self.playing {
            self.playing = false;
            self.play_requested = true;
        }
        info!("Track: {}", self.playlist.current().title);
    }

    /// Try to start playback; a failure leaves the player paused
    fn start(&mut self) {
        match self.engine.play() {
            Ok(()) => self.playing = true,
            Err(e) => {
                warn!("Play failed: {}", e);
                self.playing = false;
            }
        }
    }

    async fn load_current(&mut self) {
        let index = self.playlist.current_index();
        let track = *self.playlist.current();
        let Some(bytes) = load_with_fallback(MUSIC_DIR, track.file).await else {
            return;
        };
        match self.engine.load_midi_bytes(&bytes) {
            Ok(duration) => {
                self.loaded = Some(index);
                self.duration = duration;
            }
            Err(e) => warn!("Track {}: {}", track.title, e),
        }
    }

    /// Finish deferred loads and advance when a track ends
    pub async fn update(&mut self) {
        if self.play_requested {
            self.play_requested = false;
            if self.loaded != Some(self.playlist.current_index()) {
                self.load_current().await;
            }
            self.start();
        }

        if self.playing && self.engine.finished() {
            self.apply(PlayerCommand::Next);
        }
    }

    fn elapsed(&self) -> f64 {
        if self.loaded.is_some() { self.engine.position() } else { 0.0 }
    }

    /// Draw the player card into `rect`, returning the clicked command if any
    pub fn draw(&self, ctx: &mut UiContext, rect: Rect, icon_font: Option<&Font>) -> Option<PlayerCommand> {
        let mut command = None;

        draw_rounded_rect(rect.x, rect.y, rect.w, rect.h, 8.0, PANEL_BG);
        draw_rectangle_lines(rect.x, rect.y, rect.w, rect.h, 1.0, PANEL_BORDER);

        let x = rect.x + 20.0;
        draw_text("Now Playing", x, rect.y + 30.0, 20.0, ACCENT_ALT);
        draw_text(self.playlist.current().title, x, rect.y + 58.0, 18.0, TEXT_COLOR);

        // Transport
        let row_y = rect.y + 74.0;
        let size = 36.0;
        let prev = Rect::new(x, row_y, size, size);
        let play = Rect::new(x + size + 8.0, row_y, size, size);
        let next = Rect::new(x + (size + 8.0) * 2.0, row_y, size, size);

        if icon_button(ctx, prev, icon::SKIP_BACK, icon_font, "Previous", false) {
            command = Some(PlayerCommand::Previous);
        }
        let play_icon = if self.playing { icon::PAUSE } else { icon::PLAY };
        let play_tip = if self.playing { "Pause" } else { "Play" };
        if icon_button(ctx, play, play_icon, icon_font, play_tip, true) {
            command = Some(PlayerCommand::TogglePlay);
        }
        if icon_button(ctx, next, icon::SKIP_FORWARD, icon_font, "Next", false) {
            command = Some(PlayerCommand::Next);
        }

        // Progress (display only)
        let bar_x = next.right() + 16.0;
        let progress = Rect::new(bar_x, row_y + size * 0.5 - 3.0, (rect.right() - 20.0 - bar_x).max(20.0), 6.0);
        let elapsed = self.elapsed();
        let fraction = if self.duration > 0.0 { (elapsed / self.duration) as f32 } else { 0.0 };
        draw_bar(ctx, progress, fraction, ACCENT_COLOR);

        let time_y = row_y + size + 18.0;
        draw_text(&format_time(elapsed), bar_x, time_y, 14.0, TEXT_DIM);
        let total = format_time(self.duration);
        let dims = measure_text(&total, None, 14, 1.0);
        draw_text(&total, progress.right() - dims.width, time_y, 14.0, TEXT_DIM);

        // Volume
        let vol_y = time_y + 22.0;
        draw_text("Vol", x, vol_y + 5.0, 14.0, TEXT_DIM);
        let volume_bar = Rect::new(x + 36.0, vol_y, 120.0, 6.0);
        if let Some(v) = draw_bar(ctx, volume_bar, self.volume, ACCENT_ALT) {
            command = Some(PlayerCommand::SetVolume(v));
        }

        command
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player() -> MusicPlayer {
        MusicPlayer::new(AudioEngine::without_output())
    }

    #[test]
    fn test_defaults() {
        let p = player();
        assert!(!p.is_playing());
        assert_eq!(p.volume(), 0.7);
        assert_eq!(p.playlist().current_index(), 0);
    }

    #[test]
    fn test_failed_play_stays_paused() {
        let mut p = player();
        p.apply(PlayerCommand::TogglePlay);
        assert!(p.play_requested);
        p.play_requested = false;
        p.start();
        assert!(!p.is_playing());
    }

    #[test]
    fn test_track_change_keeps_playing_intent() {
        let mut p = player();
        p.playing = true;
        p.loaded = Some(0);
        p.apply(PlayerCommand::Previous);

        assert_eq!(p.playlist().current_index(), 2);
        assert_eq!(p.loaded, None);
        assert!(!p.playing);
        assert!(p.play_requested);
    }

    #[test]
    fn test_track_change_while_paused_stays_paused() {
        let mut p = player();
        p.apply(PlayerCommand::Next);
        assert_eq!(p.playlist().current_index(), 1);
        assert!(!p.play_requested);
    }

    #[test]
    fn test_volume_is_clamped() {
        let mut p = player();
        p.apply(PlayerCommand::SetVolume(1.4));
        assert_eq!(p.volume(), 1.0);
        p.apply(PlayerCommand::SetVolume(0.25));
        assert_eq!(p.volume(), 0.25);
    }
}
