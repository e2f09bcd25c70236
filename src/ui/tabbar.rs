//! Navigation bar - logo plus one fixed tab per page
//!
//! Below `layout::COLLAPSE_WIDTH` the tabs fold into a hamburger menu that
//! drops down under the bar.

use macroquad::prelude::*;
use super::{Rect, UiContext};

/// Visual style for the nav bar
pub mod style {
    use macroquad::prelude::Color;

    /// Bar background
    pub const BAR_BG: Color = Color::new(0.04, 0.04, 0.05, 0.97);
    /// Hovered tab background
    pub const TAB_HOVER_BG: Color = Color::new(0.12, 0.10, 0.16, 1.0);
    /// Active tab text
    pub const TAB_ACTIVE_TEXT: Color = Color::new(1.0, 1.0, 1.0, 1.0);
    /// Inactive tab text
    pub const TAB_INACTIVE_TEXT: Color = Color::new(0.6, 0.6, 0.65, 1.0);
    /// Bottom border
    pub const BAR_BORDER: Color = Color::new(0.16, 0.10, 0.22, 1.0);
    /// Active tab indicator (site purple)
    pub const ACCENT: Color = Color::new(0.42, 0.18, 0.62, 1.0);
    /// Logo color
    pub const LOGO: Color = Color::new(0.55, 0.23, 0.38, 1.0);
}

/// Layout constants
pub mod layout {
    /// Bar height
    pub const BAR_HEIGHT: f32 = 48.0;
    /// Tab horizontal padding
    pub const TAB_PADDING_H: f32 = 16.0;
    /// Active tab indicator height
    pub const INDICATOR_HEIGHT: f32 = 2.0;
    /// Font size for tab labels
    pub const FONT_SIZE: f32 = 16.0;
    /// Font size for the logo
    pub const LOGO_SIZE: f32 = 22.0;
    /// Windows narrower than this get the hamburger menu
    pub const COLLAPSE_WIDTH: f32 = 720.0;
    /// Height of one row in the dropped-down menu
    pub const MENU_ROW_HEIGHT: f32 = 40.0;
}

/// Whether the tabs fold into the hamburger at this window width
pub fn nav_collapsed(width: f32) -> bool {
    width < layout::COLLAPSE_WIDTH
}

/// Logo text on the left of the bar
pub const LOGO_TEXT: &str = "IHSAN.ME";

/// Open/closed state of the collapsed menu
#[derive(Debug, Clone, Copy, Default)]
pub struct NavState {
    pub menu_open: bool,
}

impl NavState {
    pub fn toggle(&mut self) {
        self.menu_open = !self.menu_open;
    }

    /// A tab was picked: the menu always closes
    pub fn pick(&mut self) {
        self.menu_open = false;
    }

    /// Close the menu on a click nothing else claimed
    pub fn dismiss_on_stray_click(&mut self, ctx: &UiContext) {
        if self.menu_open && ctx.unclaimed_click() {
            self.menu_open = false;
        }
    }
}

/// Area the open dropdown covers below `bar`
pub fn menu_rect(bar: Rect, count: usize, nav: &NavState) -> Option<Rect> {
    (nav.menu_open && nav_collapsed(bar.w))
        .then(|| Rect::new(bar.x, bar.bottom(), bar.w, count as f32 * layout::MENU_ROW_HEIGHT))
}

/// Draw the navigation bar across `rect`.
/// Returns the index of the clicked tab, or None if no click
pub fn draw_nav_bar(
    ctx: &mut UiContext,
    rect: Rect,
    labels: &[&str],
    active_index: usize,
    nav: &mut NavState,
) -> Option<usize> {
    draw_rectangle(rect.x, rect.y, rect.w, rect.h, style::BAR_BG);
    draw_rectangle(rect.x, rect.bottom() - 1.0, rect.w, 1.0, style::BAR_BORDER);

    let logo_dims = measure_text(LOGO_TEXT, None, layout::LOGO_SIZE as u16, 1.0);
    draw_text(
        LOGO_TEXT,
        (rect.x + 20.0).round(),
        (rect.center_y() + logo_dims.offset_y * 0.5).round(),
        layout::LOGO_SIZE,
        style::LOGO,
    );

    let clicked = if nav_collapsed(rect.w) {
        draw_collapsed(ctx, rect, labels, active_index, nav)
    } else {
        nav.menu_open = false;
        draw_inline_tabs(ctx, rect, labels, active_index)
    };

    if clicked.is_some() {
        nav.pick();
    } else {
        nav.dismiss_on_stray_click(ctx);
    }
    clicked
}

fn draw_inline_tabs(ctx: &mut UiContext, rect: Rect, labels: &[&str], active_index: usize) -> Option<usize> {
    let widths: Vec<f32> = labels
        .iter()
        .map(|l| (measure_text(l, None, layout::FONT_SIZE as u16, 1.0).width + layout::TAB_PADDING_H * 2.0).round())
        .collect();

    // Tabs are right-aligned
    let mut x = (rect.right() - 16.0 - widths.iter().sum::<f32>()).round();
    let mut clicked_tab = None;

    for (i, (label, w)) in labels.iter().zip(&widths).enumerate() {
        let tab_rect = Rect::new(x, rect.y, *w, rect.h - 1.0);
        if draw_tab(ctx, tab_rect, label, i == active_index) {
            clicked_tab = Some(i);
        }
        x += w;
    }
    clicked_tab
}

fn draw_collapsed(
    ctx: &mut UiContext,
    rect: Rect,
    labels: &[&str],
    active_index: usize,
    nav: &mut NavState,
) -> Option<usize> {
    // Three bars, like the classic hamburger
    let button = Rect::new(rect.right() - 52.0, rect.y + 8.0, 36.0, rect.h - 16.0);
    if ctx.mouse.inside(&button) {
        draw_rectangle(button.x, button.y, button.w, button.h, style::TAB_HOVER_BG);
    }
    for i in 0..3 {
        let y = button.y + 8.0 + i as f32 * 7.0;
        draw_rectangle(button.x + 8.0, y, button.w - 16.0, 2.0, style::TAB_ACTIVE_TEXT);
    }
    if ctx.take_click(&button) {
        nav.toggle();
        return None;
    }

    if !nav.menu_open {
        return None;
    }

    let mut clicked_tab = None;
    for (i, label) in labels.iter().enumerate() {
        let row = Rect::new(rect.x, rect.bottom() + i as f32 * layout::MENU_ROW_HEIGHT, rect.w, layout::MENU_ROW_HEIGHT);
        draw_rectangle(row.x, row.y, row.w, row.h, style::BAR_BG);
        if draw_tab(ctx, row, label, i == active_index) {
            clicked_tab = Some(i);
        }
    }
    clicked_tab
}

fn draw_tab(ctx: &mut UiContext, tab_rect: Rect, label: &str, is_active: bool) -> bool {
    if ctx.mouse.inside(&tab_rect) {
        draw_rectangle(tab_rect.x, tab_rect.y, tab_rect.w, tab_rect.h, style::TAB_HOVER_BG);
    }

    if is_active {
        draw_rectangle(
            tab_rect.x,
            tab_rect.bottom() - layout::INDICATOR_HEIGHT,
            tab_rect.w,
            layout::INDICATOR_HEIGHT,
            style::ACCENT,
        );
    }

    let content_color = if is_active {
        style::TAB_ACTIVE_TEXT
    } else {
        style::TAB_INACTIVE_TEXT
    };

    let text_dims = measure_text(label, None, layout::FONT_SIZE as u16, 1.0);
    draw_text_ex(
        label,
        (tab_rect.x + layout::TAB_PADDING_H).round(),
        (tab_rect.center_y() + text_dims.height * 0.5 - 1.0).round(),
        TextParams {
            font: None,
            font_size: layout::FONT_SIZE as u16,
            color: content_color,
            ..Default::default()
        },
    );

    ctx.take_click(&tab_rect)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MouseState;

    #[test]
    fn test_collapse_threshold() {
        assert!(nav_collapsed(719.0));
        assert!(!nav_collapsed(720.0));
        assert!(!nav_collapsed(1280.0));
    }

    #[test]
    fn test_picking_closes_menu() {
        let mut nav = NavState::default();
        nav.toggle();
        assert!(nav.menu_open);
        nav.pick();
        assert!(!nav.menu_open);
    }

    fn pressed_at(x: f32, y: f32) -> UiContext {
        let mut ctx = UiContext::new();
        ctx.begin_frame(MouseState { x, y, left_down: true, left_pressed: true, ..Default::default() });
        ctx
    }

    #[test]
    fn test_stray_click_closes_menu() {
        let mut nav = NavState { menu_open: true };
        let mut ctx = pressed_at(10.0, 400.0);
        ctx.take_click(&Rect::new(0.0, 0.0, 50.0, 50.0));
        nav.dismiss_on_stray_click(&ctx);
        assert!(!nav.menu_open);
    }

    #[test]
    fn test_claimed_click_keeps_menu() {
        let mut nav = NavState { menu_open: true };
        let mut ctx = pressed_at(10.0, 10.0);
        assert!(ctx.take_click(&Rect::new(0.0, 0.0, 50.0, 50.0)));
        nav.dismiss_on_stray_click(&ctx);
        assert!(nav.menu_open);
    }

    #[test]
    fn test_menu_rect_only_when_collapsed_and_open() {
        let bar = Rect::new(0.0, 0.0, 600.0, layout::BAR_HEIGHT);
        let mut nav = NavState::default();
        assert_eq!(menu_rect(bar, 4, &nav), None);

        nav.toggle();
        assert_eq!(
            menu_rect(bar, 4, &nav),
            Some(Rect::new(0.0, layout::BAR_HEIGHT, 600.0, 4.0 * layout::MENU_ROW_HEIGHT))
        );
        assert_eq!(menu_rect(Rect::new(0.0, 0.0, 1280.0, layout::BAR_HEIGHT), 4, &nav), None);
    }
}
