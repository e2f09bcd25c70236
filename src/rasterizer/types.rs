//! Core types for the rasterizer

use super::math::Vec3;

/// RGBA color (0-255 per channel)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0, a: 255 };
    pub const WHITE: Color = Color { r: 255, g: 255, b: 255, a: 255 };

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Build an opaque color from a 0xRRGGBB literal
    pub const fn from_hex(hex: u32) -> Self {
        Self::new((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
    }

    /// Apply shading (multiply by intensity 0.0-1.0)
    pub fn shade(self, intensity: f32) -> Self {
        let i = intensity.clamp(0.0, 1.0);
        Self {
            r: (self.r as f32 * i) as u8,
            g: (self.g as f32 * i) as u8,
            b: (self.b as f32 * i) as u8,
            a: self.a,
        }
    }

    /// Blend toward `other` by `t` (0.0 = self, 1.0 = other)
    pub fn mix(self, other: Color, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let channel = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Self {
            r: channel(self.r, other.r),
            g: channel(self.g, other.g),
            b: channel(self.b, other.b),
            a: self.a,
        }
    }

    /// Convert to [u8; 4] for framebuffer
    pub fn to_bytes(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// A vertex with position and normal
#[derive(Debug, Clone, Copy, Default)]
pub struct Vertex {
    pub pos: Vec3,
    pub normal: Vec3,
}

impl Vertex {
    pub fn new(pos: Vec3, normal: Vec3) -> Self {
        Self { pos, normal }
    }
}

/// A triangle face (indices into vertex array) with a flat base color
#[derive(Debug, Clone, Copy)]
pub struct Face {
    pub v0: usize,
    pub v1: usize,
    pub v2: usize,
    pub color: Color,
}

impl Face {
    pub fn new(v0: usize, v1: usize, v2: usize, color: Color) -> Self {
        Self { v0, v1, v2, color }
    }
}

/// Shading mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShadingMode {
    Flat,     // One light calculation per face
    Gouraud,  // Interpolate vertex lighting (PS1 style)
}

/// Linear distance fog
#[derive(Debug, Clone, Copy)]
pub struct Fog {
    /// Camera-space depth where fog starts
    pub near: f32,
    /// Camera-space depth where geometry is fully fogged
    pub far: f32,
    pub color: Color,
}

impl Fog {
    /// Fog amount (0.0-1.0) at a camera-space depth
    pub fn factor(&self, depth: f32) -> f32 {
        if self.far <= self.near {
            return 0.0;
        }
        ((depth - self.near) / (self.far - self.near)).clamp(0.0, 1.0)
    }
}

/// Rasterizer settings
#[derive(Debug, Clone)]
pub struct RasterSettings {
    /// Snap vertices to integer coordinates (PS1 jitter)
    pub vertex_snap: bool,
    /// Use Z-buffer (false = painter's algorithm)
    pub use_zbuffer: bool,
    /// Shading mode
    pub shading: ShadingMode,
    /// Backface culling
    pub backface_cull: bool,
    /// Light direction (for shading)
    pub light_dir: Vec3,
    /// Ambient light intensity (0.0-1.0)
    pub ambient: f32,
    /// Distance fog, if any
    pub fog: Option<Fog>,
}

impl Default for RasterSettings {
    fn default() -> Self {
        Self {
            vertex_snap: true,
            use_zbuffer: true,
            shading: ShadingMode::Gouraud,
            backface_cull: false,
            light_dir: Vec3::new(-1.0, -1.0, -1.0).normalize(),
            ambient: 0.3,
            fog: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex() {
        let c = Color::from_hex(0x6b2d9e);
        assert_eq!((c.r, c.g, c.b, c.a), (0x6b, 0x2d, 0x9e, 255));
    }

    #[test]
    fn test_mix_endpoints() {
        let a = Color::new(10, 20, 30);
        let b = Color::new(200, 100, 0);
        assert_eq!(a.mix(b, 0.0), a);
        assert_eq!(a.mix(b, 1.0), b);
    }

    #[test]
    fn test_fog_factor_ramp() {
        let fog = Fog { near: 10.0, far: 50.0, color: Color::BLACK };
        assert_eq!(fog.factor(5.0), 0.0);
        assert!((fog.factor(30.0) - 0.5).abs() < 0.0001);
        assert_eq!(fog.factor(80.0), 1.0);
    }
}
