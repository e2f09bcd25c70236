//! Fixed playlist and time formatting

/// One playlist entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Track {
    pub title: &'static str,
    /// File name, looked up under the music directory first
    pub file: &'static str,
}

pub const TRACKS: [Track; 3] = [
    Track { title: "Tokyo Drift Various", file: "Tokyo-Drift-Various.mid" },
    Track { title: "Govinda - A Modern Mantra", file: "Govinda_-_A_Modern_Mantra.mid" },
    Track { title: "Kadi Te Has Bol Ve", file: "Kadi_Te_Has_Bol_Ve.mid" },
];

/// Cursor over a non-empty track list; moving past either end wraps
#[derive(Debug, Clone)]
pub struct Playlist {
    tracks: &'static [Track],
    current: usize,
}

impl Playlist {
    pub fn new(tracks: &'static [Track]) -> Self {
        debug_assert!(!tracks.is_empty());
        Self { tracks, current: 0 }
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current(&self) -> &Track {
        &self.tracks[self.current]
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn next(&mut self) -> usize {
        self.current = (self.current + 1) % self.tracks.len();
        self.current
    }

    pub fn previous(&mut self) -> usize {
        let n = self.tracks.len();
        self.current = (self.current + n - 1) % n;
        self.current
    }
}

impl Default for Playlist {
    fn default() -> Self {
        Self::new(&TRACKS)
    }
}

/// `m:ss`; anything that is not a finite, non-negative time shows as `0:00`
pub fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return "0:00".to_string();
    }
    let total = seconds.floor() as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_and_previous_wrap() {
        let mut playlist = Playlist::default();
        assert_eq!(playlist.previous(), 2);
        assert_eq!(playlist.current().title, "Kadi Te Has Bol Ve");
        assert_eq!(playlist.next(), 0);
        assert_eq!(playlist.next(), 1);
        assert_eq!(playlist.next(), 2);
        assert_eq!(playlist.next(), 0);
    }

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(0.0), "0:00");
        assert_eq!(format_time(59.9), "0:59");
        assert_eq!(format_time(61.0), "1:01");
        assert_eq!(format_time(754.2), "12:34");
    }

    #[test]
    fn test_format_time_non_finite() {
        assert_eq!(format_time(f64::NAN), "0:00");
        assert_eq!(format_time(f64::INFINITY), "0:00");
        assert_eq!(format_time(-3.0), "0:00");
    }
}
