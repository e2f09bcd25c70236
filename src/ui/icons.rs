//! Lucide icon support
//!
//! Uses the Lucide icon font when it is available; without it each icon
//! falls back to a short text glyph.

use macroquad::prelude::*;

/// Lucide icon codepoints
pub mod icon {
    pub const PLAY: char = '\u{e13c}';
    pub const PAUSE: char = '\u{e131}';
    pub const SKIP_BACK: char = '\u{e15f}';
    pub const SKIP_FORWARD: char = '\u{e160}';
    pub const MUSIC: char = '\u{e122}';
    pub const LINK: char = '\u{e104}';
}

/// Plain-text stand-in used when the icon font is missing
pub fn fallback_glyph(icon: char) -> &'static str {
    match icon {
        icon::PLAY => ">",
        icon::PAUSE => "||",
        icon::SKIP_BACK => "|<",
        icon::SKIP_FORWARD => ">|",
        icon::MUSIC => "~",
        icon::LINK => "@",
        _ => "?",
    }
}

/// Draw an icon centered in a rect
pub fn draw_icon_centered(font: Option<&Font>, icon: char, rect: &super::Rect, size: f32, color: Color) {
    let Some(font) = font else {
        let text = fallback_glyph(icon);
        let dims = measure_text(text, None, size as u16, 1.0);
        draw_text(
            text,
            (rect.center_x() - dims.width * 0.5).round(),
            (rect.center_y() + dims.offset_y * 0.5).round(),
            size,
            color,
        );
        return;
    };

    // Icon glyphs are square, about `size` on each side, drawn from the baseline
    let x = rect.x + (rect.w - size) * 0.5;
    let y = rect.y + (rect.h + size) * 0.5;

    draw_text_ex(
        &icon.to_string(),
        x.round(),
        y.round(),
        TextParams {
            font: Some(font),
            font_size: size as u16,
            color,
            ..Default::default()
        },
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_icons_have_fallbacks() {
        for i in [icon::PLAY, icon::PAUSE, icon::SKIP_BACK, icon::SKIP_FORWARD] {
            assert_ne!(fallback_glyph(i), "?");
        }
    }
}
