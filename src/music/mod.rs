//! Dashboard music player
//!
//! MIDI tracks played through rustysynth with an SF2 soundfont.

mod audio;
mod player;
mod playlist;

pub use audio::AudioEngine;
pub use player::{MusicPlayer, PlayerCommand};
