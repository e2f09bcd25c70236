//! Input state for UI interaction

use super::Rect;
use macroquad::prelude::*;

/// Mouse button state
#[derive(Debug, Clone, Copy, Default)]
pub struct MouseState {
    pub x: f32,
    pub y: f32,
    pub left_down: bool,
    pub left_pressed: bool,  // Just pressed this frame
    pub scroll: f32,         // Scroll wheel delta
}

/// Pending tooltip to be drawn at end of frame
#[derive(Clone)]
pub struct PendingTooltip {
    pub text: String,
    pub x: f32,
    pub y: f32,
}

impl MouseState {
    /// Sample macroquad's mouse, given last frame's left button state
    pub fn sample(last_left_down: bool) -> Self {
        let (x, y) = mouse_position();
        let left_down = is_mouse_button_down(MouseButton::Left);
        Self {
            x,
            y,
            left_down,
            left_pressed: left_down && !last_left_down,
            scroll: mouse_wheel().1,
        }
    }

    /// Check if mouse is inside a rect
    pub fn inside(&self, rect: &Rect) -> bool {
        rect.contains(self.x, self.y)
    }

    /// Check if mouse is clicking inside a rect
    pub fn clicking(&self, rect: &Rect) -> bool {
        self.left_down && rect.contains(self.x, self.y)
    }

    /// Check if mouse just clicked inside a rect
    pub fn clicked(&self, rect: &Rect) -> bool {
        self.left_pressed && rect.contains(self.x, self.y)
    }
}

/// UI context passed through the frame
pub struct UiContext {
    pub mouse: MouseState,
    /// Tooltip to show this frame (set by widgets, drawn at end)
    pub tooltip: Option<PendingTooltip>,
    /// Set once anything consumed this frame's click
    click_consumed: bool,
}

impl UiContext {
    pub fn new() -> Self {
        Self {
            mouse: MouseState::default(),
            tooltip: None,
            click_consumed: false,
        }
    }

    /// Reset at start of frame (call before UI code)
    pub fn begin_frame(&mut self, mouse: MouseState) {
        self.mouse = mouse;
        self.tooltip = None;
        self.click_consumed = false;
    }

    /// True if the click landed in `rect` and nothing drawn earlier took it
    pub fn take_click(&mut self, rect: &Rect) -> bool {
        if !self.click_consumed && self.mouse.clicked(rect) {
            self.click_consumed = true;
            return true;
        }
        false
    }

    /// A click happened this frame that no widget claimed
    pub fn unclaimed_click(&self) -> bool {
        self.mouse.left_pressed && !self.click_consumed
    }

    /// Set tooltip to show (call from widget when hovered)
    pub fn set_tooltip(&mut self, text: &str, x: f32, y: f32) {
        self.tooltip = Some(PendingTooltip {
            text: text.to_string(),
            x,
            y,
        });
    }

    /// Draw the tooltip if one is pending (call at end of frame)
    pub fn draw_tooltip(&self) {
        if let Some(tip) = &self.tooltip {
            let padding = 6.0;
            let font_size = 13.0;
            let dims = measure_text(&tip.text, None, font_size as u16, 1.0);

            let box_w = dims.width + padding * 2.0;
            let box_h = dims.height + padding * 2.0;

            // Keep on screen
            let mut x = tip.x + 12.0;
            let mut y = tip.y + 20.0;
            if x + box_w > screen_width() {
                x = screen_width() - box_w - 4.0;
            }
            if y + box_h > screen_height() {
                y = tip.y - box_h - 4.0;
            }

            draw_rectangle(x, y, box_w, box_h, Color::from_rgba(20, 20, 24, 240));
            draw_rectangle_lines(x, y, box_w, box_h, 1.0, Color::from_rgba(107, 45, 158, 255));
            draw_text(
                &tip.text,
                x + padding,
                y + padding + dims.height - 2.0,
                font_size,
                Color::from_rgba(220, 220, 220, 255),
            );
        }
    }
}

impl Default for UiContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clicking_at(x: f32, y: f32) -> UiContext {
        let mut ctx = UiContext::new();
        ctx.begin_frame(MouseState { x, y, left_down: true, left_pressed: true, ..Default::default() });
        ctx
    }

    #[test]
    fn test_click_is_taken_once() {
        let mut ctx = clicking_at(5.0, 5.0);
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(ctx.take_click(&r));
        assert!(!ctx.take_click(&r));
        assert!(!ctx.unclaimed_click());
    }

    #[test]
    fn test_begin_frame_resets_claim() {
        let mut ctx = clicking_at(5.0, 5.0);
        ctx.take_click(&Rect::new(0.0, 0.0, 10.0, 10.0));
        ctx.begin_frame(MouseState { x: 50.0, y: 50.0, left_pressed: true, ..Default::default() });
        assert!(ctx.unclaimed_click());
    }
}
