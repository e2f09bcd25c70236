//! Basic UI widgets

use macroquad::prelude::*;
use macroquad::logging::{info, warn};
use super::{Rect, UiContext, draw_icon_centered};

/// Site accent (purple)
pub const ACCENT_COLOR: Color = Color::new(0.42, 0.18, 0.62, 1.0);
/// Secondary accent (teal)
pub const ACCENT_ALT: Color = Color::new(0.10, 0.48, 0.54, 1.0);
pub const TEXT_COLOR: Color = Color::new(0.88, 0.88, 0.90, 1.0);
pub const TEXT_DIM: Color = Color::new(0.55, 0.55, 0.60, 1.0);
pub const PANEL_BG: Color = Color::new(0.08, 0.08, 0.09, 1.0);
pub const PANEL_BORDER: Color = Color::new(0.20, 0.20, 0.24, 1.0);

// =============================================================================
// Clickable Link Widget
// =============================================================================

/// Hand a URL to the system browser
pub fn open_url(url: &str) {
    #[cfg(not(target_arch = "wasm32"))]
    {
        match webbrowser::open(url) {
            Ok(()) => info!("Opened {}", url),
            Err(e) => warn!("Could not open {}: {}", url, e),
        }
    }

    #[cfg(target_arch = "wasm32")]
    {
        extern "C" {
            fn ihsan_open_url(ptr: *const u8, len: usize);
        }
        unsafe { ihsan_open_url(url.as_ptr(), url.len()) }
        info!("Opened {}", url);
    }
}

/// Draw a clickable text link that opens a URL when clicked.
/// Returns whether it was clicked
pub fn draw_link(
    ctx: &mut UiContext,
    x: f32,
    y: f32,
    text: &str,
    url: &str,
    font_size: f32,
    color: Color,
    hover_color: Color,
) -> bool {
    let dims = measure_text(text, None, font_size as u16, 1.0);
    let link_rect = Rect::new(x, y - dims.height, dims.width, dims.height + 4.0);

    let hovered = ctx.mouse.inside(&link_rect);
    let clicked = ctx.take_click(&link_rect);

    let draw_color = if hovered { hover_color } else { color };
    draw_text(text, x, y, font_size, draw_color);

    if hovered {
        draw_line(x, y + 2.0, x + dims.width, y + 2.0, 1.0, draw_color);
        ctx.set_tooltip(url, ctx.mouse.x, ctx.mouse.y);
    }

    if clicked {
        open_url(url);
    }

    clicked
}

// =============================================================================
// Buttons
// =============================================================================

/// Draw a rounded rectangle (simple approximation using overlapping rects)
pub fn draw_rounded_rect(x: f32, y: f32, w: f32, h: f32, r: f32, color: Color) {
    let r = r.min(w * 0.5).min(h * 0.5);
    draw_rectangle(x + r, y, w - r * 2.0, h, color);
    draw_rectangle(x, y + r, w, h - r * 2.0, color);
    draw_circle(x + r, y + r, r, color);
    draw_circle(x + w - r, y + r, r, color);
    draw_circle(x + r, y + h - r, r, color);
    draw_circle(x + w - r, y + h - r, r, color);
}

/// Text button; returns true when clicked
pub fn text_button(ctx: &mut UiContext, rect: Rect, label: &str, font_size: f32) -> bool {
    let hovered = ctx.mouse.inside(&rect);
    let pressed = ctx.mouse.clicking(&rect);
    let clicked = ctx.take_click(&rect);

    let bg = if pressed {
        Color::new(ACCENT_COLOR.r * 0.8, ACCENT_COLOR.g * 0.8, ACCENT_COLOR.b * 0.8, 1.0)
    } else if hovered {
        Color::new(ACCENT_COLOR.r * 1.2, ACCENT_COLOR.g * 1.2, ACCENT_COLOR.b * 1.2, 1.0)
    } else {
        ACCENT_COLOR
    };
    draw_rounded_rect(rect.x, rect.y, rect.w, rect.h, 4.0, bg);

    let dims = measure_text(label, None, font_size as u16, 1.0);
    draw_text(
        label,
        (rect.center_x() - dims.width * 0.5).round(),
        (rect.center_y() + dims.offset_y * 0.5).round(),
        font_size,
        WHITE,
    );

    clicked
}

/// Flat icon button (MuseScore style), highlighted while `is_active`
pub fn icon_button(ctx: &mut UiContext, rect: Rect, icon: char, icon_font: Option<&Font>, tooltip: &str, is_active: bool) -> bool {
    let hovered = ctx.mouse.inside(&rect);
    let pressed = ctx.mouse.clicking(&rect);
    let clicked = ctx.take_click(&rect);

    if hovered && !tooltip.is_empty() {
        ctx.set_tooltip(tooltip, ctx.mouse.x, ctx.mouse.y);
    }

    let corner_radius = 4.0;
    if is_active {
        draw_rounded_rect(rect.x, rect.y, rect.w, rect.h, corner_radius, ACCENT_COLOR);
    } else if pressed {
        draw_rounded_rect(rect.x, rect.y, rect.w, rect.h, corner_radius, Color::from_rgba(60, 60, 70, 255));
    } else if hovered {
        draw_rounded_rect(rect.x, rect.y, rect.w, rect.h, corner_radius, Color::from_rgba(50, 50, 60, 255));
    }

    let icon_color = if is_active || hovered {
        WHITE
    } else {
        Color::from_rgba(180, 180, 180, 255)
    };
    let icon_size = (rect.h * 0.55).min(16.0);
    draw_icon_centered(icon_font, icon, &rect, icon_size, icon_color);

    clicked
}

// =============================================================================
// Bars
// =============================================================================

/// Horizontal fill bar; returns the clicked position as a 0..1 fraction
pub fn draw_bar(ctx: &mut UiContext, rect: Rect, fraction: f32, fill: Color) -> Option<f32> {
    draw_rounded_rect(rect.x, rect.y, rect.w, rect.h, rect.h * 0.5, PANEL_BORDER);
    let filled = rect.w * fraction.clamp(0.0, 1.0);
    if filled > 0.0 {
        draw_rounded_rect(rect.x, rect.y, filled, rect.h, rect.h * 0.5, fill);
    }

    // Slightly taller hit area than the visible bar
    let hit = Rect::new(rect.x, rect.y - 4.0, rect.w, rect.h + 8.0);
    if ctx.take_click(&hit) {
        return Some(bar_fraction(rect, ctx.mouse.x));
    }
    None
}

/// Fraction along `rect` at screen x `mx`, clamped to 0..1
pub fn bar_fraction(rect: Rect, mx: f32) -> f32 {
    if rect.w <= 0.0 {
        return 0.0;
    }
    ((mx - rect.x) / rect.w).clamp(0.0, 1.0)
}

// =============================================================================
// Text
// =============================================================================

/// Greedy word wrap by character count
pub fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        let needed = if line.is_empty() { word.chars().count() } else { line.chars().count() + 1 + word.chars().count() };
        if needed > max_chars && !line.is_empty() {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

/// Rough characters-per-line for the default font
pub fn chars_per_line(max_w: f32, font_size: f32) -> usize {
    let char_w = measure_text("M", None, font_size as u16, 1.0).width.max(1.0) * 0.62;
    (max_w / char_w) as usize
}

pub fn line_height(font_size: f32) -> f32 {
    font_size * 1.35
}

/// Draw wrapped text, returns the y below the last line
pub fn draw_wrapped(text: &str, x: f32, y: f32, max_w: f32, font_size: f32, color: Color) -> f32 {
    let line_h = line_height(font_size);
    let mut y = y;
    for line in wrap_text(text, chars_per_line(max_w, font_size)) {
        draw_text(&line, x, y, font_size, color);
        y += line_h;
    }
    y
}

/// Single-line text field state
#[derive(Debug, Clone, Default)]
pub struct TextInput {
    pub text: String,
    pub focused: bool,
    pub max_len: usize,
}

impl TextInput {
    pub fn new(max_len: usize) -> Self {
        Self {
            text: String::new(),
            focused: false,
            max_len,
        }
    }

    /// Feed one typed character; control characters are ignored
    pub fn push_char(&mut self, c: char) {
        if c.is_control() {
            return;
        }
        if self.max_len == 0 || self.text.chars().count() < self.max_len {
            self.text.push(c);
        }
    }

    pub fn backspace(&mut self) {
        self.text.pop();
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }

    /// Draw the field and route keyboard input while focused.
    /// Returns true when Enter was pressed in the field.
    pub fn draw(&mut self, ctx: &mut UiContext, rect: Rect, placeholder: &str, font_size: f32) -> bool {
        if ctx.mouse.left_pressed {
            self.focused = ctx.take_click(&rect);
        }

        let mut submitted = false;
        if self.focused {
            while let Some(c) = get_char_pressed() {
                self.push_char(c);
            }
            if is_key_pressed(KeyCode::Backspace) {
                self.backspace();
            }
            submitted = is_key_pressed(KeyCode::Enter) || is_key_pressed(KeyCode::KpEnter);
        }

        draw_rectangle(rect.x, rect.y, rect.w, rect.h, PANEL_BG);
        let border = if self.focused { ACCENT_COLOR } else { PANEL_BORDER };
        draw_rectangle_lines(rect.x, rect.y, rect.w, rect.h, 1.0, border);

        let baseline = rect.center_y() + font_size * 0.35;
        if self.text.is_empty() {
            draw_text(placeholder, rect.x + 8.0, baseline, font_size, TEXT_DIM);
        } else {
            draw_text(&self.text, rect.x + 8.0, baseline, font_size, TEXT_COLOR);
        }

        // Blinking caret
        if self.focused && (get_time() * 2.0) as i64 % 2 == 0 {
            let w = measure_text(&self.text, None, font_size as u16, 1.0).width;
            let cx = rect.x + 8.0 + w + 1.0;
            draw_line(cx, rect.y + 6.0, cx, rect.bottom() - 6.0, 1.0, TEXT_COLOR);
        }

        submitted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_respects_width() {
        let lines = wrap_text("the quick brown fox jumps over the lazy dog", 10);
        assert_eq!(lines, vec!["the quick", "brown fox", "jumps over", "the lazy", "dog"]);
    }

    #[test]
    fn test_wrap_keeps_long_words_whole() {
        assert_eq!(wrap_text("supercalifragilistic ok", 5), vec!["supercalifragilistic", "ok"]);
        assert!(wrap_text("   ", 5).is_empty());
    }

    #[test]
    fn test_text_input_editing() {
        let mut input = TextInput::new(5);
        for c in "hello world".chars() {
            input.push_char(c);
        }
        assert_eq!(input.text, "hello");

        input.backspace();
        input.push_char('\r');
        input.push_char('\u{8}');
        assert_eq!(input.text, "hell");
    }

    #[test]
    fn test_bar_fraction_clamps() {
        let r = Rect::new(100.0, 0.0, 200.0, 6.0);
        assert_eq!(bar_fraction(r, 50.0), 0.0);
        assert_eq!(bar_fraction(r, 150.0), 0.25);
        assert_eq!(bar_fraction(r, 400.0), 1.0);
    }
}
