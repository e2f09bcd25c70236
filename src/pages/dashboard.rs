//! Profile card, social links and the music player

use macroquad::prelude::*;
use macroquad::logging::warn;
use crate::assets::load_with_fallback;
use crate::music::{MusicPlayer, PlayerCommand};
use crate::ui::{
    draw_link, draw_rounded_rect, draw_wrapped, Rect, UiContext, ACCENT_ALT, ACCENT_COLOR, PANEL_BG, PANEL_BORDER,
    TEXT_COLOR, TEXT_DIM,
};
use super::ScrollView;

pub const PROFILE_DIR: &str = "assets";
pub const PROFILE_FILE: &str = "IMG_0362.jpg";

pub const NAME: &str = "Ihsan";
pub const TITLE: &str = "Fullstack Developer";
pub const BIO: &str = "Node.js (Express, NestJS) | React.js | Next.js | PostgreSQL | GraphQL | REST APIs | \
                       WebSockets | Firebase | Supabase | Server Deployment & Hosting";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SocialLink {
    pub label: &'static str,
    pub url: &'static str,
}

pub const SOCIAL_LINKS: [SocialLink; 4] = [
    SocialLink { label: "LinkedIn", url: "https://linkedin.com/in/ikihsan" },
    SocialLink { label: "GitHub", url: "https://github.com/ikihsan" },
    SocialLink { label: "WhatsApp", url: "https://wa.me/9037312356" },
    SocialLink { label: "Email", url: "mailto:ikihsaan@gmail.com" },
];

const AVATAR_SIZE: f32 = 160.0;
const CARD_WIDTH: f32 = 560.0;

/// Decoded RGBA8 image, ready for upload
#[derive(Debug, Clone)]
pub struct RgbaImage {
    pub width: u16,
    pub height: u16,
    pub bytes: Vec<u8>,
}

/// Decode an encoded image (jpg, png, ...) to RGBA8
pub fn decode_image(bytes: &[u8]) -> Result<RgbaImage, String> {
    use image::GenericImageView;

    let img = image::load_from_memory(bytes).map_err(|e| format!("Failed to decode image: {}", e))?;
    let (width, height) = img.dimensions();
    if width > u16::MAX as u32 || height > u16::MAX as u32 {
        return Err(format!("Image too large: {}x{}", width, height));
    }

    Ok(RgbaImage {
        width: width as u16,
        height: height as u16,
        bytes: img.to_rgba8().into_raw(),
    })
}

pub struct DashboardPage {
    profile: Option<Texture2D>,
    player: MusicPlayer,
    scroll: ScrollView,
}

impl DashboardPage {
    pub fn new(player: MusicPlayer) -> Self {
        Self {
            profile: None,
            player,
            scroll: ScrollView::default(),
        }
    }

    /// Load the profile photo and the soundfont
    pub async fn load(&mut self) {
        if let Some(bytes) = load_with_fallback(PROFILE_DIR, PROFILE_FILE).await {
            match decode_image(&bytes) {
                Ok(img) => {
                    let texture = Texture2D::from_rgba8(img.width, img.height, &img.bytes);
                    texture.set_filter(FilterMode::Linear);
                    self.profile = Some(texture);
                }
                Err(e) => warn!("{}: {}", PROFILE_FILE, e),
            }
        }
        self.player.load_soundfont().await;
    }

    pub async fn update(&mut self) {
        self.player.update().await;
    }

    pub fn draw(&mut self, ctx: &mut UiContext, rect: Rect, icon_font: Option<&Font>) {
        let card_w = CARD_WIDTH.min(rect.w - 40.0).max(200.0);
        let x = rect.center_x() - card_w * 0.5;
        let content_h = 40.0 + AVATAR_SIZE + 360.0 + 200.0;
        self.scroll.handle(ctx, rect, content_h);
        let mut y = rect.y + 40.0 - self.scroll.offset;

        // Avatar
        let avatar = Rect::new(rect.center_x() - AVATAR_SIZE * 0.5, y, AVATAR_SIZE, AVATAR_SIZE);
        match &self.profile {
            Some(texture) => draw_texture_ex(
                texture,
                avatar.x,
                avatar.y,
                WHITE,
                DrawTextureParams {
                    dest_size: Some(Vec2::new(avatar.w, avatar.h)),
                    ..Default::default()
                },
            ),
            None => {
                draw_circle(avatar.center_x(), avatar.center_y(), AVATAR_SIZE * 0.5, PANEL_BG);
                let initial = &NAME[..1];
                let dims = measure_text(initial, None, 72, 1.0);
                draw_text(initial, avatar.center_x() - dims.width * 0.5, avatar.center_y() + dims.height * 0.5, 72.0, ACCENT_COLOR);
            }
        }
        draw_rectangle_lines(avatar.x, avatar.y, avatar.w, avatar.h, 2.0, ACCENT_COLOR);
        y = avatar.bottom() + 50.0;

        let dims = measure_text(NAME, None, 44, 1.0);
        draw_text(NAME, rect.center_x() - dims.width * 0.5, y, 44.0, TEXT_COLOR);
        y += 32.0;
        let dims = measure_text(TITLE, None, 22, 1.0);
        draw_text(TITLE, rect.center_x() - dims.width * 0.5, y, 22.0, ACCENT_ALT);
        y += 30.0;

        // Bio
        y = draw_wrapped(BIO, x, y + 16.0, card_w, 16.0, TEXT_DIM) + 20.0;

        // Links, laid out on one row and centered
        let font_size = 18.0;
        let gap = 28.0;
        let widths: Vec<f32> = SOCIAL_LINKS
            .iter()
            .map(|l| measure_text(l.label, None, font_size as u16, 1.0).width)
            .collect();
        let row_w = widths.iter().sum::<f32>() + gap * (widths.len() as f32 - 1.0);
        let mut lx = rect.center_x() - row_w * 0.5;
        for (link, w) in SOCIAL_LINKS.iter().zip(&widths) {
            draw_link(ctx, lx, y, link.label, link.url, font_size, ACCENT_ALT, TEXT_COLOR);
            lx += w + gap;
        }
        y += 30.0;

        // Player
        let player_rect = Rect::new(x, y, card_w, 160.0);
        draw_rounded_rect(player_rect.x - 1.0, player_rect.y - 1.0, player_rect.w + 2.0, player_rect.h + 2.0, 8.0, PANEL_BORDER);
        if let Some(cmd) = self.player.draw(ctx, player_rect, icon_font) {
            self.apply(cmd);
        }
    }

    pub fn apply(&mut self, cmd: PlayerCommand) {
        self.player.apply(cmd);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_links() {
        let labels: Vec<_> = SOCIAL_LINKS.iter().map(|l| l.label).collect();
        assert_eq!(labels, vec!["LinkedIn", "GitHub", "WhatsApp", "Email"]);
        assert!(SOCIAL_LINKS[3].url.starts_with("mailto:"));
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(decode_image(b"not an image").is_err());
    }

    #[test]
    fn test_decode_png() {
        let mut encoded = Vec::new();
        let img = image::RgbaImage::from_pixel(3, 2, image::Rgba([10, 20, 30, 255]));
        img.write_to(&mut std::io::Cursor::new(&mut encoded), image::ImageFormat::Png)
            .unwrap();

        let decoded = decode_image(&encoded).unwrap();
        assert_eq!((decoded.width, decoded.height), (3, 2));
        assert_eq!(decoded.bytes.len(), 3 * 2 * 4);
        assert_eq!(&decoded.bytes[..4], &[10, 20, 30, 255]);
    }
}
