//! One playthrough of the gate level
//!
//! `GameSession` owns all simulation state and is the only thing that writes
//! it. The presentation layer reads it through the accessors below.

use crate::rasterizer::Vec3;
use super::camera::CameraRig;
use super::collectible::Collectible;
use super::input::{sample_input, InputState};
use super::level::LevelDef;
use super::physics::{step_physics, Character, Platform};
use super::settings::GameSettings;
use super::timer::TimerQueue;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Running,
    Completed,
}

/// Things that happened during a tick, for the host to react to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Index into the level's collectible list
    CollectiblePicked(usize),
    /// The character got close enough to the finish platform
    FinishReached,
    /// Delayed completion notification; emitted exactly once per session
    Completed,
}

pub struct GameSession {
    settings: GameSettings,
    platforms: Vec<Platform>,
    finish_center: Vec3,
    character: Character,
    collectibles: Vec<Collectible>,
    camera: CameraRig,
    state: GameState,
    timers: TimerQueue<GameEvent>,
}

impl GameSession {
    pub fn new(level: &LevelDef, settings: GameSettings) -> Self {
        let character = Character::spawn(level.spawn);
        let camera = CameraRig::new(settings.camera_offset, settings.camera_smoothing, character.position);

        Self {
            platforms: level.build_platforms(),
            finish_center: level.finish.center,
            character,
            collectibles: level.collectibles.iter().copied().map(Collectible::new).collect(),
            camera,
            state: GameState::Running,
            timers: TimerQueue::new(),
            settings,
        }
    }

    /// Advance one tick. `now` is the host clock in seconds.
    pub fn tick(&mut self, input: &InputState, now: f64) -> Vec<GameEvent> {
        let mut events = Vec::new();

        if self.state == GameState::Running {
            sample_input(input, &mut self.character, self.settings.move_tuning());
            step_physics(&mut self.character, &self.platforms, self.settings.gravity);

            for (i, collectible) in self.collectibles.iter_mut().enumerate() {
                if collectible.check_pickup(self.character.position, self.settings.pickup_radius) {
                    events.push(GameEvent::CollectiblePicked(i));
                }
            }
        }

        for collectible in &mut self.collectibles {
            collectible.animate(self.settings.collectible_spin, now, self.settings.bob_amplitude);
        }

        if self.state == GameState::Running
            && self.character.position.distance(self.finish_center) < self.settings.finish_radius
        {
            self.state = GameState::Completed;
            self.timers.schedule(now, self.settings.completion_delay, GameEvent::Completed);
            events.push(GameEvent::FinishReached);
        }

        self.camera.follow(self.character.position);

        events.extend(self.timers.poll(now));
        events
    }

    /// Drop anything still scheduled; the session will not notify again
    pub fn teardown(&mut self) {
        self.timers.cancel_all();
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn character(&self) -> &Character {
        &self.character
    }

    pub fn platforms(&self) -> &[Platform] {
        &self.platforms
    }

    pub fn collectibles(&self) -> &[Collectible] {
        &self.collectibles
    }

    pub fn collected_count(&self) -> usize {
        self.collectibles.iter().filter(|c| !c.visible).count()
    }

    pub fn camera(&self) -> &CameraRig {
        &self.camera
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::input::Key;

    fn session() -> GameSession {
        GameSession::new(&LevelDef::gate(), GameSettings::default())
    }

    fn holding(keys: &[Key]) -> InputState {
        let mut input = InputState::new();
        for k in keys {
            input.set(*k, true);
        }
        input
    }

    /// Drop the character onto the finish platform
    fn at_finish(session: &mut GameSession) {
        session.character.position = Vec3::new(20.0, 4.75, 0.0);
        session.character.velocity = Vec3::ZERO;
    }

    #[test]
    fn test_spawn_tick_stays_airborne() {
        let mut s = session();
        let events = s.tick(&InputState::new(), 0.0);

        assert!(events.is_empty());
        assert!(!s.character().on_ground);
        assert!((s.character().position.y - 0.985).abs() < 1e-6);
    }

    #[test]
    fn test_settles_on_start_platform() {
        let mut s = session();
        let idle = InputState::new();
        for i in 0..60 {
            s.tick(&idle, i as f64 / 60.0);
        }
        assert!(s.character().on_ground);
        assert_eq!(s.character().position.y, 0.75);
        assert_eq!(s.state(), GameState::Running);
    }

    #[test]
    fn test_held_jump_repeats_after_landing() {
        let mut s = session();
        let jump = holding(&[Key::Space]);

        let mut takeoffs = 0;
        let mut landings = 0;
        for i in 0..200 {
            let was_grounded = s.character().on_ground;
            s.tick(&jump, i as f64 / 60.0);
            let c = s.character();
            if was_grounded && !c.on_ground && c.velocity.y > 0.0 {
                takeoffs += 1;
            }
            if !was_grounded && c.on_ground {
                landings += 1;
                assert_eq!(c.position.y, 0.75);
            }
        }
        assert!(landings >= 1, "never landed");
        assert!(takeoffs >= 2, "held jump fired {} times", takeoffs);
        assert!(takeoffs >= landings);
    }

    #[test]
    fn test_single_completion_after_delay() {
        let mut s = session();
        at_finish(&mut s);
        let idle = InputState::new();

        let events = s.tick(&idle, 10.0);
        assert_eq!(events, vec![GameEvent::FinishReached]);
        assert_eq!(s.state(), GameState::Completed);

        assert!(s.tick(&idle, 11.0).is_empty());
        assert_eq!(s.tick(&idle, 12.0), vec![GameEvent::Completed]);

        let mut later = Vec::new();
        for i in 0..120 {
            later.extend(s.tick(&idle, 12.0 + i as f64 / 60.0));
        }
        assert!(later.is_empty());
        assert_eq!(s.state(), GameState::Completed);
    }

    #[test]
    fn test_position_frozen_after_completion() {
        let mut s = session();
        at_finish(&mut s);
        s.tick(&InputState::new(), 0.0);
        let frozen = s.character().position;

        let input = holding(&[Key::W, Key::D, Key::Space]);
        for i in 1..50 {
            s.tick(&input, i as f64 / 60.0);
        }
        assert_eq!(s.character().position, frozen);
    }

    #[test]
    fn test_animation_and_camera_continue_after_completion() {
        let mut s = session();
        at_finish(&mut s);
        s.tick(&InputState::new(), 0.0);
        let spin = s.collectibles()[0].rotation_y;

        s.tick(&InputState::new(), 0.1);
        assert!(s.collectibles()[0].rotation_y > spin);
        assert_eq!(s.camera().target, s.character().position);
    }

    #[test]
    fn test_pickup_is_reported_once() {
        let mut s = session();
        s.character.position = Vec3::new(5.0, 2.0, 2.0);

        let events = s.tick(&InputState::new(), 0.0);
        assert_eq!(events, vec![GameEvent::CollectiblePicked(0)]);
        assert!(!s.collectibles()[0].visible);

        s.character.position = Vec3::new(5.0, 2.0, 2.0);
        s.character.velocity = Vec3::ZERO;
        assert!(s.tick(&InputState::new(), 0.1).is_empty());
        assert!(!s.collectibles()[0].visible);
        assert_eq!(s.collected_count(), 1);
    }

    #[test]
    fn test_teardown_cancels_pending_completion() {
        let mut s = session();
        at_finish(&mut s);
        s.tick(&InputState::new(), 0.0);
        s.teardown();
        assert!(s.tick(&InputState::new(), 5.0).is_empty());
    }

    #[test]
    fn test_camera_follows_character() {
        let mut s = session();
        s.tick(&holding(&[Key::D]), 0.0);
        let c = s.character().position;
        assert_eq!(s.camera().eye, c + Vec3::new(0.0, 5.0, 10.0));
        assert_eq!(s.camera().target, c);
    }
}
