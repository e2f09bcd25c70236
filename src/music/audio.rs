//! Audio engine: MIDI tracks rendered through a SoundFont synthesizer
//!
//! The sequencer lives behind a mutex shared with the output callback.
//! Pausing simply stops rendering, so the sequencer position holds.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use macroquad::logging::info;
use rustysynth::{MidiFile, MidiFileSequencer, SoundFont, Synthesizer, SynthesizerSettings};
#[cfg(not(target_arch = "wasm32"))]
use macroquad::logging::error;
#[cfg(not(target_arch = "wasm32"))]
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
#[cfg(not(target_arch = "wasm32"))]
use cpal::{SampleRate, Stream, StreamConfig};

/// Sample rate for audio output
pub const SAMPLE_RATE: u32 = 44100;

/// Error type for audio setup and playback
#[derive(Debug)]
pub enum AudioError {
    /// No output stream could be opened
    NoOutput,
    NoSoundFont,
    NothingLoaded,
    SoundFont(String),
    Midi(String),
    Synth(String),
}

impl std::fmt::Display for AudioError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AudioError::NoOutput => write!(f, "no audio output device"),
            AudioError::NoSoundFont => write!(f, "no soundfont loaded"),
            AudioError::NothingLoaded => write!(f, "no track loaded"),
            AudioError::SoundFont(e) => write!(f, "failed to parse soundfont: {}", e),
            AudioError::Midi(e) => write!(f, "failed to parse MIDI file: {}", e),
            AudioError::Synth(e) => write!(f, "failed to create synthesizer: {}", e),
        }
    }
}

/// Playback state shared between main thread and audio thread
struct PlaybackState {
    sequencer: Option<MidiFileSequencer>,
    playing: bool,
    volume: f32,
}

/// Fill an interleaved stereo buffer; silence unless a track is playing
fn render_into(state: &mut PlaybackState, data: &mut [f32], left: &mut Vec<f32>, right: &mut Vec<f32>) {
    let frames = data.len() / 2;
    let volume = state.volume;
    let playing = state.playing;

    match state.sequencer.as_mut() {
        Some(sequencer) if playing => {
            if left.len() < frames {
                left.resize(frames, 0.0);
                right.resize(frames, 0.0);
            }
            sequencer.render(&mut left[..frames], &mut right[..frames]);

            for i in 0..frames {
                data[i * 2] = left[i] * volume;
                data[i * 2 + 1] = right[i] * volume;
            }
        }
        _ => data.fill(0.0),
    }
}

/// The audio engine owns the soundfont and the output stream
pub struct AudioEngine {
    state: Arc<Mutex<PlaybackState>>,
    soundfont: Option<Arc<SoundFont>>,
    #[cfg(not(target_arch = "wasm32"))]
    _stream: Option<Stream>,
    has_output: bool,
}

impl AudioEngine {
    /// Create an engine and try to open the default output device
    pub fn new() -> Self {
        let state = Self::shared_state();

        #[cfg(not(target_arch = "wasm32"))]
        {
            let stream = Self::init_audio_stream(Arc::clone(&state));
            let has_output = stream.is_some();
            if has_output {
                info!("Audio output opened at {} Hz", SAMPLE_RATE);
            }
            Self {
                state,
                soundfont: None,
                _stream: stream,
                has_output,
            }
        }

        #[cfg(target_arch = "wasm32")]
        {
            Self {
                state,
                soundfont: None,
                has_output: false,
            }
        }
    }

    /// Engine with no output stream; playback requests fail with `NoOutput`
    #[cfg(test)]
    pub fn without_output() -> Self {
        Self {
            state: Self::shared_state(),
            soundfont: None,
            #[cfg(not(target_arch = "wasm32"))]
            _stream: None,
            has_output: false,
        }
    }

    fn shared_state() -> Arc<Mutex<PlaybackState>> {
        Arc::new(Mutex::new(PlaybackState {
            sequencer: None,
            playing: false,
            volume: 1.0,
        }))
    }

    /// Initialize the audio output stream
    #[cfg(not(target_arch = "wasm32"))]
    fn init_audio_stream(state: Arc<Mutex<PlaybackState>>) -> Option<Stream> {
        let host = cpal::default_host();
        let device = host.default_output_device()?;

        let config = StreamConfig {
            channels: 2,
            sample_rate: SampleRate(SAMPLE_RATE),
            buffer_size: cpal::BufferSize::Default,
        };

        let mut left_buffer = vec![0.0f32; 1024];
        let mut right_buffer = vec![0.0f32; 1024];

        let stream = device.build_output_stream(
            &config,
            move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                let mut state = state.lock().unwrap_or_else(PoisonError::into_inner);
                render_into(&mut state, data, &mut left_buffer, &mut right_buffer);
            },
            |err| error!("Audio stream error: {}", err),
            None,
        ).ok()?;

        stream.play().ok()?;
        Some(stream)
    }

    fn lock(&self) -> MutexGuard<'_, PlaybackState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn has_output(&self) -> bool {
        self.has_output
    }

    /// Load a soundfont from bytes (works on all platforms including WASM)
    pub fn load_soundfont_from_bytes(&mut self, bytes: &[u8]) -> Result<(), AudioError> {
        let mut cursor = std::io::Cursor::new(bytes);
        let soundfont = SoundFont::new(&mut cursor)
            .map_err(|e| AudioError::SoundFont(format!("{:?}", e)))?;
        self.soundfont = Some(Arc::new(soundfont));
        info!("Soundfont loaded");
        Ok(())
    }

    #[cfg(test)]
    pub fn is_loaded(&self) -> bool {
        self.soundfont.is_some()
    }

    /// Replace the current track with a MIDI file, paused at the start.
    /// Returns the track length in seconds.
    pub fn load_midi_bytes(&mut self, bytes: &[u8]) -> Result<f64, AudioError> {
        let soundfont = self.soundfont.as_ref().ok_or(AudioError::NoSoundFont)?;

        let mut cursor = std::io::Cursor::new(bytes);
        let midi = Arc::new(
            MidiFile::new(&mut cursor).map_err(|e| AudioError::Midi(format!("{:?}", e)))?,
        );

        let settings = SynthesizerSettings::new(SAMPLE_RATE as i32);
        let synth = Synthesizer::new(soundfont, &settings)
            .map_err(|e| AudioError::Synth(format!("{:?}", e)))?;

        let mut sequencer = MidiFileSequencer::new(synth);
        sequencer.play(&midi, false);

        let mut state = self.lock();
        state.sequencer = Some(sequencer);
        state.playing = false;
        Ok(midi.get_length())
    }

    pub fn play(&self) -> Result<(), AudioError> {
        if !self.has_output {
            return Err(AudioError::NoOutput);
        }
        let mut state = self.lock();
        if state.sequencer.is_none() {
            return Err(AudioError::NothingLoaded);
        }
        state.playing = true;
        Ok(())
    }

    pub fn pause(&self) {
        self.lock().playing = false;
    }

    /// Drop the current track
    pub fn stop(&self) {
        let mut state = self.lock();
        state.sequencer = None;
        state.playing = false;
    }

    /// Output gain, 0.0..=1.0
    pub fn set_volume(&self, volume: f32) {
        self.lock().volume = volume.clamp(0.0, 1.0);
    }

    /// Seconds into the current track
    pub fn position(&self) -> f64 {
        self.lock().sequencer.as_ref().map_or(0.0, |s| s.get_position())
    }

    /// The current track played through to its end
    pub fn finished(&self) -> bool {
        self.lock().sequencer.as_ref().is_some_and(|s| s.end_of_sequence())
    }
}

impl Default for AudioEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn idle_state() -> PlaybackState {
        PlaybackState { sequencer: None, playing: true, volume: 0.7 }
    }

    #[test]
    fn test_renders_silence_without_sequencer() {
        let mut state = idle_state();
        let mut data = vec![1.0f32; 64];
        let (mut l, mut r) = (Vec::new(), Vec::new());
        render_into(&mut state, &mut data, &mut l, &mut r);
        assert!(data.iter().all(|s| *s == 0.0));
    }

    #[test]
    fn test_play_without_output_fails() {
        let engine = AudioEngine::without_output();
        assert!(matches!(engine.play(), Err(AudioError::NoOutput)));
        assert_eq!(engine.position(), 0.0);
        assert!(!engine.finished());
    }

    #[test]
    fn test_midi_needs_soundfont() {
        let mut engine = AudioEngine::without_output();
        assert!(matches!(engine.load_midi_bytes(b"MThd"), Err(AudioError::NoSoundFont)));
    }

    #[test]
    fn test_garbage_soundfont_is_rejected() {
        let mut engine = AudioEngine::without_output();
        let err = engine.load_soundfont_from_bytes(b"definitely not RIFF").unwrap_err();
        assert!(matches!(err, AudioError::SoundFont(_)));
        assert!(!engine.is_loaded());
    }
}
