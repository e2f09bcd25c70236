//! Portfolio content pages shown behind the nav bar

pub mod chatroom;
pub mod dashboard;
pub mod passion;
pub mod projects;

pub use chatroom::ChatroomPage;
pub use dashboard::DashboardPage;
pub use passion::PassionPage;
pub use projects::ProjectsPage;

use macroquad::prelude::*;
use crate::ui::{Rect, UiContext, ACCENT_COLOR};

/// Pixels scrolled per wheel notch
const SCROLL_STEP: f32 = 40.0;

/// Vertical scroll offset for a page taller than its viewport
#[derive(Debug, Clone, Copy, Default)]
pub struct ScrollView {
    pub offset: f32,
}

impl ScrollView {
    /// Apply a wheel delta; the offset stays within `0..=content_h - view_h`
    pub fn scroll(&mut self, wheel: f32, content_h: f32, view_h: f32) {
        let max = (content_h - view_h).max(0.0);
        // Wheel up (positive) moves the content down
        let step = if wheel > 0.0 {
            -SCROLL_STEP
        } else if wheel < 0.0 {
            SCROLL_STEP
        } else {
            0.0
        };
        self.offset = (self.offset + step).clamp(0.0, max);
    }

    /// Feed this frame's wheel if the mouse is over `view`
    pub fn handle(&mut self, ctx: &UiContext, view: Rect, content_h: f32) {
        let wheel = if ctx.mouse.inside(&view) { ctx.mouse.scroll } else { 0.0 };
        self.scroll(wheel, content_h, view.h);
    }
}

/// Centered page heading, returns the y below it
pub fn draw_heading(text: &str, rect: Rect, y: f32) -> f32 {
    let size = 40.0;
    let dims = measure_text(text, None, size as u16, 1.0);
    draw_text(text, (rect.center_x() - dims.width * 0.5).round(), y + size, size, ACCENT_COLOR);
    y + size + 36.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_clamps_to_content() {
        let mut view = ScrollView::default();
        view.scroll(1.0, 1000.0, 600.0);
        assert_eq!(view.offset, 0.0);

        for _ in 0..20 {
            view.scroll(-1.0, 1000.0, 600.0);
        }
        assert_eq!(view.offset, 400.0);

        view.scroll(0.0, 1000.0, 600.0);
        assert_eq!(view.offset, 400.0);
    }

    #[test]
    fn test_short_content_never_scrolls() {
        let mut view = ScrollView::default();
        view.scroll(-3.0, 300.0, 600.0);
        assert_eq!(view.offset, 0.0);
    }
}
