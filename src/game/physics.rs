//! Per-tick gravity, integration and platform contact
//!
//! The contact test is discrete: it looks only at the post-integration position,
//! so a fast enough fall can pass through a platform without touching it.

use crate::rasterizer::Vec3;

/// Half of the fixed platform height
pub const PLATFORM_HALF_THICKNESS: f32 = 0.25;

/// Distance from the character's origin to its feet, also the snap tolerance above a top face
pub const CHARACTER_HALF_HEIGHT: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformKind {
    Normal,
    Finish,
}

/// Axis-aligned platform with a fixed 0.5 height
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Platform {
    pub center: Vec3,
    /// Extent along X
    pub width: f32,
    /// Extent along Z
    pub depth: f32,
    pub kind: PlatformKind,
}

impl Platform {
    pub fn new(center: Vec3, width: f32, depth: f32, kind: PlatformKind) -> Self {
        Self { center, width, depth, kind }
    }

    pub fn top(&self) -> f32 {
        self.center.y + PLATFORM_HALF_THICKNESS
    }

    pub fn bottom(&self) -> f32 {
        self.center.y - PLATFORM_HALF_THICKNESS
    }

    /// Height the character's origin is snapped to when standing here
    pub fn standing_height(&self) -> f32 {
        self.top() + CHARACTER_HALF_HEIGHT
    }

    /// Strictly inside the horizontal footprint, and within
    /// `[bottom, top + CHARACTER_HALF_HEIGHT]` vertically (both ends inclusive)
    pub fn overlaps(&self, p: Vec3) -> bool {
        let half_w = self.width / 2.0;
        let half_d = self.depth / 2.0;

        p.x > self.center.x - half_w
            && p.x < self.center.x + half_w
            && p.z > self.center.z - half_d
            && p.z < self.center.z + half_d
            && p.y <= self.standing_height()
            && p.y >= self.bottom()
    }
}

/// The player-controlled body
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Character {
    pub position: Vec3,
    pub velocity: Vec3,
    pub on_ground: bool,
}

impl Character {
    /// Spawn at rest; grounded so a jump is available on the first tick
    pub fn spawn(position: Vec3) -> Self {
        Self {
            position,
            velocity: Vec3::ZERO,
            on_ground: true,
        }
    }
}

/// Advance the character by one tick against `platforms`.
///
/// Every platform is tested in order and each overlap overwrites the result,
/// so when two platforms overlap the character the last one wins.
pub fn step_physics(character: &mut Character, platforms: &[Platform], gravity: f32) {
    character.velocity.y -= gravity;
    character.position += character.velocity;

    character.on_ground = false;
    for platform in platforms {
        if platform.overlaps(character.position) {
            character.position.y = platform.standing_height();
            character.velocity.y = 0.0;
            character.on_ground = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GRAVITY: f32 = 0.015;

    fn start_platform() -> Platform {
        Platform::new(Vec3::ZERO, 4.0, 4.0, PlatformKind::Normal)
    }

    #[test]
    fn test_spawn_tick_stays_airborne() {
        let mut c = Character::spawn(Vec3::new(0.0, 1.0, 0.0));
        step_physics(&mut c, &[start_platform()], GRAVITY);

        assert!(!c.on_ground);
        assert!((c.velocity.y + 0.015).abs() < 1e-6);
        assert!((c.position.y - 0.985).abs() < 1e-6);
    }

    #[test]
    fn test_falls_into_band_and_snaps() {
        let mut c = Character::spawn(Vec3::new(0.0, 1.0, 0.0));
        c.on_ground = false;
        let platforms = [start_platform()];

        let mut ticks = 0;
        while !c.on_ground {
            step_physics(&mut c, &platforms, GRAVITY);
            ticks += 1;
            assert!(ticks < 100, "never landed");
        }
        assert_eq!(c.position.y, 0.75);
        assert_eq!(c.velocity.y, 0.0);
    }

    #[test]
    fn test_center_within_band_snaps_exactly() {
        let platform = Platform::new(Vec3::new(5.0, 1.0, 2.0), 3.0, 3.0, PlatformKind::Normal);
        // Gravity is zero so the integrated y stays where it was placed
        for y in [platform.bottom(), 1.0, platform.standing_height()] {
            let mut c = Character::spawn(Vec3::new(5.0, y, 2.0));
            c.velocity = Vec3::ZERO;
            step_physics(&mut c, &[platform], 0.0);
            assert!(c.on_ground);
            assert_eq!(c.position.y, platform.top() + 0.5);
        }
    }

    #[test]
    fn test_unsupported_fall_is_monotonic() {
        let mut c = Character::spawn(Vec3::new(50.0, 10.0, 50.0));
        c.velocity.y = -0.2;
        c.on_ground = false;

        for _ in 0..20 {
            let before = c;
            step_physics(&mut c, &[start_platform()], GRAVITY);
            let expected_drop = before.velocity.y.abs() + GRAVITY;
            assert!(c.position.y < before.position.y);
            assert!(((before.position.y - c.position.y) - expected_drop).abs() < 1e-4);
            assert!(!c.on_ground);
        }
    }

    #[test]
    fn test_edges_are_exclusive() {
        let platform = start_platform();
        assert!(!platform.overlaps(Vec3::new(2.0, 0.5, 0.0)));
        assert!(!platform.overlaps(Vec3::new(0.0, 0.5, -2.0)));
        assert!(platform.overlaps(Vec3::new(1.99, 0.5, 1.99)));
    }

    #[test]
    fn test_snaps_from_underneath_inside_band() {
        // Just above the bottom face counts as contact
        let platform = start_platform();
        let mut c = Character::spawn(Vec3::new(0.0, -0.2, 0.0));
        c.velocity.y = 0.05;
        step_physics(&mut c, &[platform], GRAVITY);
        assert!(c.on_ground);
        assert_eq!(c.position.y, 0.75);
    }

    #[test]
    fn test_fast_fall_tunnels_through() {
        let platform = start_platform();
        let mut c = Character::spawn(Vec3::new(0.0, 1.0, 0.0));
        c.velocity.y = -2.0;
        step_physics(&mut c, &[platform], GRAVITY);
        assert!(!c.on_ground);
        assert!(c.position.y < platform.bottom());
    }

    #[test]
    fn test_last_overlapping_platform_wins() {
        let low = Platform::new(Vec3::new(0.0, 0.0, 0.0), 4.0, 4.0, PlatformKind::Normal);
        let high = Platform::new(Vec3::new(0.0, 0.4, 0.0), 4.0, 4.0, PlatformKind::Finish);
        let start = Vec3::new(0.0, 0.3, 0.0);

        let mut c = Character::spawn(start);
        step_physics(&mut c, &[low, high], 0.0);
        assert_eq!(c.position.y, high.standing_height());

        // Later platforms test the already snapped position
        let mut c = Character::spawn(start);
        step_physics(&mut c, &[high, low], 0.0);
        assert_eq!(c.position.y, high.standing_height());
        assert!(c.on_ground);
    }
}
