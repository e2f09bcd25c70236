//! Media loading with a one-step fallback
//!
//! Every media file is tried under its asset directory first and then once
//! more at the bare file name. A file missing from both is not an error for
//! the caller: it gets `None` and runs degraded.

use macroquad::file::load_file;
use macroquad::logging::{info, warn};

/// Candidate paths for `file`: `{dir}/{file}`, then `{file}`
#[derive(Debug, Clone)]
pub struct FallbackPaths<'a> {
    dir: &'a str,
    file: &'a str,
    step: u8,
}

impl<'a> FallbackPaths<'a> {
    pub fn new(dir: &'a str, file: &'a str) -> Self {
        Self { dir, file, step: 0 }
    }
}

impl Iterator for FallbackPaths<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let path = match self.step {
            0 if !self.dir.is_empty() => format!("{}/{}", self.dir.trim_end_matches('/'), self.file),
            0 | 1 => self.file.to_string(),
            _ => return None,
        };
        // An empty dir skips straight past the fallback
        self.step = if self.step == 0 && self.dir.is_empty() { 2 } else { self.step + 1 };
        Some(path)
    }
}

/// Load `file` from `dir`, falling back to the bare name once
pub async fn load_with_fallback(dir: &str, file: &str) -> Option<Vec<u8>> {
    for path in FallbackPaths::new(dir, file) {
        match load_file(&path).await {
            Ok(bytes) => {
                info!("Loaded {} ({} bytes)", path, bytes.len());
                return Some(bytes);
            }
            Err(e) => warn!("Failed to load {}: {}", path, e),
        }
    }
    warn!("Giving up on {}, continuing without it", file);
    None
}

/// Load a UTF-8 config file, `None` if it is missing or not text
pub async fn load_text(path: &str) -> Option<String> {
    match macroquad::file::load_string(path).await {
        Ok(s) => Some(s),
        Err(e) => {
            warn!("Failed to load {}: {}", path, e);
            None
        }
    }
}
