//! Scene building and presentation for the gate level
//!
//! Reads a `GameSession` and never writes to it.

use macroquad::prelude::*;
use crate::rasterizer::{
    self, render_mesh, Color as RasterColor, Fog, Framebuffer, Mesh, RasterSettings, ShadingMode,
    Vec3 as RasterVec3,
};
use crate::ui::Rect;
use super::physics::{PlatformKind, PLATFORM_HALF_THICKNESS};
use super::session::GameSession;

pub const BACKGROUND: RasterColor = RasterColor::from_hex(0x0a0a0a);
pub const CHARACTER_COLOR: RasterColor = RasterColor::from_hex(0x6b2d9e);
pub const PLATFORM_COLOR: RasterColor = RasterColor::from_hex(0x2a2a2a);
pub const FINISH_COLOR: RasterColor = RasterColor::from_hex(0x1a7a8a);
pub const COLLECTIBLE_COLOR: RasterColor = RasterColor::from_hex(0x8b3a62);

const CHARACTER_SIZE: RasterVec3 = RasterVec3::new(0.6, 1.3, 0.6);
const COLLECTIBLE_RADIUS: f32 = 0.3;
const MAX_WIDTH: usize = rasterizer::HEIGHT * 4;

/// Framebuffer width that keeps the fixed vertical resolution at `w:h`
pub fn framebuffer_width(w: f32, h: f32) -> usize {
    if !(w > 0.0 && h > 0.0) {
        return rasterizer::WIDTH;
    }
    ((rasterizer::HEIGHT as f32 * w / h).round() as usize).clamp(1, MAX_WIDTH)
}

pub struct GameRenderer {
    fb: Framebuffer,
    mesh: Mesh,
    settings: RasterSettings,
}

impl GameRenderer {
    pub fn new() -> Self {
        Self {
            fb: Framebuffer::new(rasterizer::WIDTH, rasterizer::HEIGHT),
            mesh: Mesh::new(),
            settings: RasterSettings {
                shading: ShadingMode::Flat,
                light_dir: RasterVec3::new(-0.5, -1.0, -0.3).normalize(),
                ambient: 0.45,
                fog: Some(Fog { near: 10.0, far: 50.0, color: BACKGROUND }),
                ..RasterSettings::default()
            },
        }
    }

    /// Resize hook for window size changes
    pub fn resize(&mut self, w: f32, h: f32) {
        let width = framebuffer_width(w, h);
        if width != self.fb.width {
            self.fb.resize(width, rasterizer::HEIGHT);
        }
    }

    #[cfg(test)]
    pub fn framebuffer(&self) -> &Framebuffer {
        &self.fb
    }

    /// Rebuild the triangle list from the current simulation state
    pub fn build_scene(&mut self, session: &GameSession) {
        self.mesh.clear();

        for platform in session.platforms() {
            let color = match platform.kind {
                PlatformKind::Normal => PLATFORM_COLOR,
                PlatformKind::Finish => FINISH_COLOR,
            };
            let size = RasterVec3::new(platform.width, PLATFORM_HALF_THICKNESS * 2.0, platform.depth);
            self.mesh.push_box(platform.center, size, color);
        }

        self.mesh.push_box(session.character().position, CHARACTER_SIZE, CHARACTER_COLOR);

        for collectible in session.collectibles().iter().filter(|c| c.visible) {
            self.mesh.push_octahedron(
                collectible.draw_position(),
                COLLECTIBLE_RADIUS,
                collectible.rotation_y,
                COLLECTIBLE_COLOR,
            );
        }
    }

    /// Rasterize the session into the framebuffer
    pub fn render(&mut self, session: &GameSession) {
        self.build_scene(session);
        self.fb.clear(BACKGROUND);
        let camera = session.camera().to_camera();
        render_mesh(&mut self.fb, &self.mesh, &camera, &self.settings);
    }

    /// Blit the framebuffer into `rect`, letterboxed to keep its aspect
    pub fn draw(&self, rect: Rect) {
        let fb_aspect = self.fb.width as f32 / self.fb.height as f32;
        let (draw_w, draw_h) = if rect.w / rect.h > fb_aspect {
            (rect.h * fb_aspect, rect.h)
        } else {
            (rect.w, rect.w / fb_aspect)
        };
        let draw_x = rect.x + (rect.w - draw_w) * 0.5;
        let draw_y = rect.y + (rect.h - draw_h) * 0.5;

        let [r, g, b, _] = BACKGROUND.to_bytes();
        draw_rectangle(rect.x, rect.y, rect.w, rect.h, Color::from_rgba(r, g, b, 255));

        let texture = Texture2D::from_rgba8(self.fb.width as u16, self.fb.height as u16, &self.fb.pixels);
        texture.set_filter(FilterMode::Nearest);

        draw_texture_ex(
            &texture,
            draw_x,
            draw_y,
            WHITE,
            DrawTextureParams {
                dest_size: Some(Vec2::new(draw_w, draw_h)),
                ..Default::default()
            },
        );
    }
}
