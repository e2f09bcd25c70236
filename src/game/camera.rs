//! Follow camera

use crate::rasterizer::{Camera, Vec3};

/// Keeps the eye at a fixed offset from the character, aimed at it
#[derive(Debug, Clone, Copy)]
pub struct CameraRig {
    pub offset: Vec3,
    /// 0.0 snaps; closer to 1.0 eases the eye in over several frames
    pub smoothing: f32,
    pub eye: Vec3,
    pub target: Vec3,
}

impl CameraRig {
    pub fn new(offset: Vec3, smoothing: f32, focus: Vec3) -> Self {
        Self {
            offset,
            smoothing: smoothing.clamp(0.0, 0.99),
            eye: focus + offset,
            target: focus,
        }
    }

    /// Move toward `focus + offset`; the target always snaps to `focus`
    pub fn follow(&mut self, focus: Vec3) {
        let desired = focus + self.offset;
        self.eye = if self.smoothing > 0.0 {
            self.eye.lerp(desired, 1.0 - self.smoothing)
        } else {
            desired
        };
        self.target = focus;
    }

    pub fn to_camera(&self) -> Camera {
        let mut camera = Camera::new();
        camera.look_at(self.eye, self.target);
        camera
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snap_follow() {
        let mut rig = CameraRig::new(Vec3::new(0.0, 5.0, 10.0), 0.0, Vec3::ZERO);
        rig.follow(Vec3::new(3.0, 1.0, -2.0));
        assert_eq!(rig.eye, Vec3::new(3.0, 6.0, 8.0));
        assert_eq!(rig.target, Vec3::new(3.0, 1.0, -2.0));
    }

    #[test]
    fn test_smoothed_follow_still_aims_at_character() {
        let mut rig = CameraRig::new(Vec3::new(0.0, 5.0, 10.0), 0.8, Vec3::ZERO);
        let focus = Vec3::new(10.0, 3.0, 0.0);
        rig.follow(focus);

        assert_eq!(rig.target, focus);
        assert!(rig.eye.distance(focus + rig.offset) > 0.1);

        let cam = rig.to_camera();
        let aim = (focus - rig.eye).normalize();
        assert!(cam.basis_z.distance(aim) < 1e-4);
    }
}
