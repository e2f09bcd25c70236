//! Spinning pickups

use crate::rasterizer::Vec3;

/// A pickup placed above a platform.
///
/// `position` is the logical spot used for pickup checks. The bob is kept
/// apart in `bob_offset` and only affects drawing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collectible {
    pub position: Vec3,
    pub visible: bool,
    /// Accumulated spin (radians)
    pub rotation_y: f32,
    pub bob_offset: f32,
}

impl Collectible {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            visible: true,
            rotation_y: 0.0,
            bob_offset: 0.0,
        }
    }

    /// Where the collectible is drawn this frame
    pub fn draw_position(&self) -> Vec3 {
        self.position + Vec3::new(0.0, self.bob_offset, 0.0)
    }

    /// Hide the collectible if `point` is within `radius`.
    ///
    /// Returns true only on the tick it gets picked up; hidden collectibles
    /// never come back.
    pub fn check_pickup(&mut self, point: Vec3, radius: f32) -> bool {
        if self.visible && self.position.distance(point) < radius {
            self.visible = false;
            return true;
        }
        false
    }

    /// Spin and bob, applied regardless of visibility
    pub fn animate(&mut self, spin: f32, now: f64, amplitude: f32) {
        self.rotation_y += spin;
        self.bob_offset = ((now * 3.0).sin() as f32) * amplitude;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pickup_is_one_way() {
        let mut c = Collectible::new(Vec3::new(5.0, 2.0, 2.0));
        assert!(!c.check_pickup(Vec3::new(5.0, 1.0, 2.0), 0.8));
        assert!(c.visible);

        assert!(c.check_pickup(Vec3::new(5.0, 1.75, 2.0), 0.8));
        assert!(!c.visible);

        // Standing on the same spot again changes nothing
        assert!(!c.check_pickup(Vec3::new(5.0, 2.0, 2.0), 0.8));
        assert!(!c.visible);
    }

    #[test]
    fn test_radius_is_strict() {
        let mut c = Collectible::new(Vec3::ZERO);
        assert!(!c.check_pickup(Vec3::new(0.8, 0.0, 0.0), 0.8));
        assert!(c.check_pickup(Vec3::new(0.79, 0.0, 0.0), 0.8));
    }

    #[test]
    fn test_bob_does_not_move_pickup_point() {
        let mut c = Collectible::new(Vec3::new(0.0, 2.0, 0.0));
        c.animate(0.05, 0.5, 0.01);
        assert_eq!(c.position, Vec3::new(0.0, 2.0, 0.0));
        assert!(c.bob_offset.abs() <= 0.01);
        assert_eq!(c.draw_position().y, 2.0 + c.bob_offset);
    }

    #[test]
    fn test_hidden_collectibles_keep_spinning() {
        let mut c = Collectible::new(Vec3::ZERO);
        c.visible = false;
        for i in 0..10 {
            c.animate(0.05, i as f64 / 60.0, 0.01);
        }
        assert!((c.rotation_y - 0.5).abs() < 1e-5);
    }
}
