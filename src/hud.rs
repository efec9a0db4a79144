//! HUD widgets
//!
//! Pure projections from game state to display text and panel visibility.
//! The driver pushes the results to the host's `HudSink` every tick.

use serde::{Deserialize, Serialize};

/// Which panels are visible
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PanelVisibility {
    pub game_over: bool,
    pub score: bool,
}

impl PanelVisibility {
    /// Game-over panel while the run is over; score panel while playing
    pub fn project(game_over: bool, paused: bool) -> Self {
        Self {
            game_over,
            score: !game_over && !paused,
        }
    }
}

/// Raw integer score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScoreBoard {
    score: u32,
}

impl ScoreBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn set(&mut self, score: u32) {
        self.score = score;
    }

    pub fn add(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    pub fn text(&self) -> String {
        self.score.to_string()
    }
}

/// Elapsed time since a start marker, frozen once the run finishes.
///
/// Times are seconds on the caller's clock.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stopwatch {
    started_at: f64,
    finished_at: Option<f64>,
}

impl Stopwatch {
    pub fn new(started_at: f64) -> Self {
        Self {
            started_at,
            finished_at: None,
        }
    }

    pub fn restart(&mut self, now: f64) {
        *self = Self::new(now);
    }

    /// Freeze the display. Later calls keep the first finish time.
    pub fn finish(&mut self, now: f64) {
        if self.finished_at.is_none() {
            self.finished_at = Some(now);
        }
    }

    pub fn is_finished(&self) -> bool {
        self.finished_at.is_some()
    }

    pub fn elapsed(&self, now: f64) -> f64 {
        (self.finished_at.unwrap_or(now) - self.started_at).max(0.0)
    }

    pub fn text(&self, now: f64) -> String {
        format_elapsed(self.elapsed(now))
    }
}

/// Format seconds as `mm:ss:cc` (minutes, seconds, centiseconds), truncated
pub fn format_elapsed(secs: f64) -> String {
    // Epsilon absorbs representation error such as 5.1 * 100 = 509.99..
    let centis = (secs.max(0.0) * 100.0 + 1e-6).floor() as u64;
    let minutes = centis / 6000;
    let seconds = (centis / 100) % 60;
    format!("{:02}:{:02}:{:02}", minutes, seconds, centis % 100)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panels() {
        assert_eq!(
            PanelVisibility::project(true, false),
            PanelVisibility { game_over: true, score: false }
        );
        assert_eq!(
            PanelVisibility::project(false, false),
            PanelVisibility { game_over: false, score: true }
        );
        assert_eq!(
            PanelVisibility::project(false, true),
            PanelVisibility { game_over: false, score: false }
        );
    }

    #[test]
    fn test_score_text() {
        let mut board = ScoreBoard::new();
        assert_eq!(board.text(), "0");
        board.add(40);
        board.add(2);
        assert_eq!(board.text(), "42");
        board.set(u32::MAX);
        board.add(1);
        assert_eq!(board.score(), u32::MAX);
    }

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(125.34), "02:05:34");
        assert_eq!(format_elapsed(0.0), "00:00:00");
        assert_eq!(format_elapsed(-3.0), "00:00:00");
        assert_eq!(format_elapsed(59.5), "00:59:50");
        assert_eq!(format_elapsed(6000.0), "100:00:00");
        assert_eq!(format_elapsed(5.1), "00:05:10");
    }

    #[test]
    fn test_format_elapsed_truncates() {
        assert_eq!(format_elapsed(59.996), "00:59:99");
        assert_eq!(format_elapsed(1.009), "00:01:00");
    }

    #[test]
    fn test_stopwatch_freezes_on_finish() {
        let mut watch = Stopwatch::new(10.0);
        assert_eq!(watch.text(135.34), "02:05:34");

        watch.finish(135.34);
        assert!(watch.is_finished());
        assert_eq!(watch.text(200.0), "02:05:34");

        watch.finish(300.0);
        assert_eq!(watch.text(400.0), "02:05:34");

        watch.restart(400.0);
        assert_eq!(watch.text(401.0), "00:01:00");
    }
}
