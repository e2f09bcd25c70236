//! Keyboard state and the input sampler
//!
//! Key signals only ever write `InputState` through a `KeyboardListener`;
//! the session reads it once per tick.

use std::collections::HashSet;
use super::physics::Character;

/// Logical keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    W,
    A,
    S,
    D,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Space,
}

const FORWARD_KEYS: [Key; 2] = [Key::W, Key::ArrowUp];
const BACK_KEYS: [Key; 2] = [Key::S, Key::ArrowDown];
const LEFT_KEYS: [Key; 2] = [Key::A, Key::ArrowLeft];
const RIGHT_KEYS: [Key; 2] = [Key::D, Key::ArrowRight];

/// Which keys are currently held
#[derive(Debug, Clone, Default)]
pub struct InputState {
    held: HashSet<Key>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    pub fn any_held(&self, keys: &[Key]) -> bool {
        keys.iter().any(|k| self.is_held(*k))
    }

    pub fn set(&mut self, key: Key, held: bool) {
        if held {
            self.held.insert(key);
        } else {
            self.held.remove(&key);
        }
    }

    pub fn clear(&mut self) {
        self.held.clear();
    }
}

/// The two key signals the game subscribes to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeySignal {
    Down,
    Up,
}

/// Scoped key subscription owned by a game session.
///
/// Signals dispatched while detached are dropped, and detaching forgets
/// every held key.
#[derive(Debug, Default)]
pub struct KeyboardListener {
    attached: bool,
    state: InputState,
}

impl KeyboardListener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attach(&mut self) {
        self.attached = true;
    }

    pub fn detach(&mut self) {
        self.attached = false;
        self.state.clear();
    }

    #[cfg(test)]
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Apply a key signal; returns false if the listener is detached
    pub fn dispatch(&mut self, signal: KeySignal, key: Key) -> bool {
        if !self.attached {
            return false;
        }
        self.state.set(key, signal == KeySignal::Down);
        true
    }

    pub fn state(&self) -> &InputState {
        &self.state
    }
}

/// Tuning used by the sampler
#[derive(Debug, Clone, Copy)]
pub struct MoveTuning {
    pub move_speed: f32,
    pub jump_speed: f32,
    pub damping: f32,
}

/// Resolve one axis: negative keys win over positive ones, otherwise decay
fn axis_velocity(input: &InputState, current: f32, negative: &[Key], positive: &[Key], tuning: MoveTuning) -> f32 {
    if input.any_held(negative) {
        -tuning.move_speed
    } else if input.any_held(positive) {
        tuning.move_speed
    } else {
        current * tuning.damping
    }
}

/// Turn held keys into this tick's velocity changes.
///
/// Jump is gated only by `on_ground`: holding it in the air does nothing,
/// holding it through a landing jumps again on the next grounded tick.
pub fn sample_input(input: &InputState, character: &mut Character, tuning: MoveTuning) {
    character.velocity.z = axis_velocity(input, character.velocity.z, &FORWARD_KEYS, &BACK_KEYS, tuning);
    character.velocity.x = axis_velocity(input, character.velocity.x, &LEFT_KEYS, &RIGHT_KEYS, tuning);

    if input.is_held(Key::Space) && character.on_ground {
        character.velocity.y = tuning.jump_speed;
        character.on_ground = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rasterizer::Vec3;

    const TUNING: MoveTuning = MoveTuning { move_speed: 0.1, jump_speed: 0.3, damping: 0.9 };

    fn held(keys: &[Key]) -> InputState {
        let mut input = InputState::new();
        for k in keys {
            input.set(*k, true);
        }
        input
    }

    #[test]
    fn test_direction_keys_set_speed() {
        let mut c = Character::spawn(Vec3::ZERO);
        sample_input(&held(&[Key::ArrowUp, Key::D]), &mut c, TUNING);
        assert_eq!(c.velocity.z, -0.1);
        assert_eq!(c.velocity.x, 0.1);

        sample_input(&held(&[Key::S, Key::ArrowLeft]), &mut c, TUNING);
        assert_eq!(c.velocity.z, 0.1);
        assert_eq!(c.velocity.x, -0.1);
    }

    #[test]
    fn test_forward_beats_back() {
        let mut c = Character::spawn(Vec3::ZERO);
        sample_input(&held(&[Key::W, Key::S]), &mut c, TUNING);
        assert_eq!(c.velocity.z, -0.1);
    }

    #[test]
    fn test_damping_is_geometric() {
        let mut c = Character::spawn(Vec3::ZERO);
        c.velocity.x = 0.1;
        c.velocity.z = -0.1;
        let idle = InputState::new();

        for _ in 0..25 {
            sample_input(&idle, &mut c, TUNING);
        }
        let expected = 0.1 * 0.9f32.powi(25);
        assert!((c.velocity.x - expected).abs() < 1e-6);
        assert!((c.velocity.z + expected).abs() < 1e-6);
    }

    #[test]
    fn test_jump_needs_ground() {
        let jump = held(&[Key::Space]);

        let mut c = Character::spawn(Vec3::ZERO);
        sample_input(&jump, &mut c, TUNING);
        assert_eq!(c.velocity.y, 0.3);
        assert!(!c.on_ground);

        c.velocity.y = 0.1;
        sample_input(&jump, &mut c, TUNING);
        assert_eq!(c.velocity.y, 0.1);
    }

    #[test]
    fn test_sampler_leaves_input_untouched() {
        let input = held(&[Key::Space, Key::A]);
        let mut c = Character::spawn(Vec3::ZERO);
        sample_input(&input, &mut c, TUNING);
        assert!(input.is_held(Key::Space));
        assert!(input.is_held(Key::A));
    }

    #[test]
    fn test_detached_listener_ignores_signals() {
        let mut listener = KeyboardListener::new();
        assert!(!listener.dispatch(KeySignal::Down, Key::W));
        assert!(!listener.state().is_held(Key::W));

        listener.attach();
        assert!(listener.dispatch(KeySignal::Down, Key::W));
        assert!(listener.state().is_held(Key::W));
        listener.dispatch(KeySignal::Up, Key::W);
        assert!(!listener.state().is_held(Key::W));
    }

    #[test]
    fn test_detach_forgets_held_keys() {
        let mut listener = KeyboardListener::new();
        listener.attach();
        listener.dispatch(KeySignal::Down, Key::Space);
        listener.dispatch(KeySignal::Down, Key::ArrowRight);

        listener.detach();
        assert!(!listener.is_attached());
        assert!(!listener.state().any_held(&[Key::Space, Key::ArrowRight]));
    }
}
