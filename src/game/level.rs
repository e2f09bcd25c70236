//! Level loading
//!
//! Uses RON (Rusty Object Notation) for human-readable level files.
//! The built-in gate level is also available without any file.

use serde::{Deserialize, Serialize};
use crate::rasterizer::Vec3;
use super::physics::{Platform, PlatformKind};

/// Error type for level loading
#[derive(Debug)]
pub enum LevelError {
    IoError(String),
    ParseError(ron::error::SpannedError),
    Invalid(String),
}

impl From<ron::error::SpannedError> for LevelError {
    fn from(e: ron::error::SpannedError) -> Self {
        LevelError::ParseError(e)
    }
}

impl std::fmt::Display for LevelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LevelError::IoError(e) => write!(f, "IO error: {}", e),
            LevelError::ParseError(e) => write!(f, "Parse error: {}", e),
            LevelError::Invalid(msg) => write!(f, "Invalid level: {}", msg),
        }
    }
}

/// Serialized platform: center plus horizontal extents (height is fixed)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlatformDef {
    pub center: Vec3,
    pub width: f32,
    pub depth: f32,
}

impl PlatformDef {
    pub const fn new(center: Vec3, width: f32, depth: f32) -> Self {
        Self { center, width, depth }
    }
}

/// Level layout as stored on disk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelDef {
    pub spawn: Vec3,
    pub platforms: Vec<PlatformDef>,
    pub finish: PlatformDef,
    pub collectibles: Vec<Vec3>,
}

impl LevelDef {
    /// The gate level shown before the portfolio
    pub fn gate() -> Self {
        Self {
            spawn: Vec3::new(0.0, 1.0, 0.0),
            platforms: vec![
                PlatformDef::new(Vec3::new(0.0, 0.0, 0.0), 4.0, 4.0),
                PlatformDef::new(Vec3::new(5.0, 1.0, 2.0), 3.0, 3.0),
                PlatformDef::new(Vec3::new(10.0, 2.0, -1.0), 3.0, 3.0),
                PlatformDef::new(Vec3::new(15.0, 3.0, 3.0), 3.0, 3.0),
            ],
            finish: PlatformDef::new(Vec3::new(20.0, 4.0, 0.0), 4.0, 4.0),
            collectibles: (0..4)
                .map(|i| {
                    let z = if i % 2 == 0 { 2.0 } else { -1.0 };
                    Vec3::new(5.0 * (i + 1) as f32, 2.0 + i as f32, z)
                })
                .collect(),
        }
    }

    /// Check extents; everything else is trusted
    pub fn validate(&self) -> Result<(), LevelError> {
        for (i, p) in self.platforms.iter().enumerate() {
            if !(p.width > 0.0 && p.depth > 0.0) {
                return Err(LevelError::Invalid(format!(
                    "platform {} has non-positive extents {}x{}",
                    i, p.width, p.depth
                )));
            }
        }
        if !(self.finish.width > 0.0 && self.finish.depth > 0.0) {
            return Err(LevelError::Invalid("finish platform has non-positive extents".to_string()));
        }
        Ok(())
    }

    /// Collision list in iteration order; the finish platform is always last
    pub fn build_platforms(&self) -> Vec<Platform> {
        self.platforms
            .iter()
            .map(|p| Platform::new(p.center, p.width, p.depth, PlatformKind::Normal))
            .chain(std::iter::once(Platform::new(
                self.finish.center,
                self.finish.width,
                self.finish.depth,
                PlatformKind::Finish,
            )))
            .collect()
    }
}

impl Default for LevelDef {
    fn default() -> Self {
        Self::gate()
    }
}

/// Load a level file through macroquad's loader (filesystem on native, fetch on wasm)
pub async fn load_level(path: &str) -> Result<LevelDef, LevelError> {
    let contents = macroquad::file::load_string(path)
        .await
        .map_err(|e| LevelError::IoError(e.to_string()))?;
    load_level_from_str(&contents)
}

/// Load a level from a RON string
pub fn load_level_from_str(s: &str) -> Result<LevelDef, LevelError> {
    let level: LevelDef = ron::from_str(s)?;
    level.validate()?;
    Ok(level)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_level_matches_builtin() {
        let level = load_level_from_str(include_str!("../../assets/levels/gate.ron")).unwrap();
        assert_eq!(level, LevelDef::gate());
    }

    #[test]
    fn test_gate_collectible_layout() {
        let level = LevelDef::gate();
        assert_eq!(
            level.collectibles,
            vec![
                Vec3::new(5.0, 2.0, 2.0),
                Vec3::new(10.0, 3.0, -1.0),
                Vec3::new(15.0, 4.0, 2.0),
                Vec3::new(20.0, 5.0, -1.0),
            ]
        );
    }

    #[test]
    fn test_finish_is_last_platform() {
        let platforms = LevelDef::gate().build_platforms();
        assert_eq!(platforms.len(), 5);
        assert_eq!(platforms[4].kind, PlatformKind::Finish);
        assert!(platforms[..4].iter().all(|p| p.kind == PlatformKind::Normal));
    }

    #[test]
    fn test_zero_width_platform_rejected() {
        let mut level = LevelDef::gate();
        level.platforms[1].width = 0.0;
        assert!(matches!(level.validate(), Err(LevelError::Invalid(_))));
    }

    #[test]
    fn test_garbage_is_parse_error() {
        assert!(matches!(load_level_from_str("(spawn: 3)"), Err(LevelError::ParseError(_))));
    }
}
