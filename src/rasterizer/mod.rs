//! PS1-style software rasterizer
//! Ported from tipsy (https://github.com/nkanaev/tipsy)
//!
//! Features:
//! - Vertex snapping (integer coords = PS1 jitter)
//! - Flat and Gouraud shading over flat-colored faces
//! - Linear distance fog
//! - Z-buffer or painter's algorithm

mod math;
mod types;
mod render;

pub use math::*;
pub use types::*;
pub use render::*;

/// Vertical resolution of the game view (authentic PS1 height)
pub const HEIGHT: usize = 240;

/// Width at a 4:3 aspect, used until the first resize
pub const WIDTH: usize = 320;
