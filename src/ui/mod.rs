//! Immediate-mode UI helpers shared by every page

mod input;
mod icons;
mod tabbar;
mod widgets;

pub use input::*;
pub use icons::*;
pub use tabbar::*;
pub use widgets::*;

/// Screen-space rectangle
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x && px < self.x + self.w && py >= self.y && py < self.y + self.h
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.w * 0.5
    }

    pub fn center_y(&self) -> f32 {
        self.y + self.h * 0.5
    }

    /// Shrink on every side by `amount`
    pub fn pad(&self, amount: f32) -> Self {
        Self::new(
            self.x + amount,
            self.y + amount,
            (self.w - amount * 2.0).max(0.0),
            (self.h - amount * 2.0).max(0.0),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_is_half_open() {
        let r = Rect::new(10.0, 10.0, 20.0, 5.0);
        assert!(r.contains(10.0, 10.0));
        assert!(!r.contains(30.0, 12.0));
        assert!(!r.contains(15.0, 15.0));
    }

    #[test]
    fn test_pad_never_goes_negative() {
        let r = Rect::new(0.0, 0.0, 10.0, 4.0).pad(3.0);
        assert_eq!(r, Rect::new(3.0, 3.0, 4.0, 0.0));
    }
}
