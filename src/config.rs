//! Game tuning knobs.
//!
//! [`GameConfig::default()`] mirrors the constants below. With the `serde` feature
//! the struct can be deserialized from a partial document: missing keys fall
//! back to the defaults, so a page can override just the pause lengths for a
//! demo without restating everything else.

use crate::catalog;
use crate::error::ConfigError;

// --- Defaults ------------------------------------------------------------------

pub const SEGMENT_COUNT: usize = 12;
pub const POINTS_PER_CORRECT: u32 = 10;
pub const MAX_LIVES: u8 = 3;
pub const ANSWER_SECONDS: u32 = 10;
pub const SPIN_DURATION_MS: f64 = 4100.0;
pub const TICK_INTERVAL_MS: f64 = 100.0;
pub const HIGHLIGHT_MS: f64 = 1000.0;
pub const RESULT_PAUSE_MS: f64 = 2000.0;
pub const MIN_FULL_TURNS: u32 = 5;
pub const WHEEL_SIZE_PX: u32 = 360;

/// Parameters for the confetti burst fired on a correct answer.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(default))]
pub struct Burst {
    pub particle_count: u32,
    pub spread_deg: f64,
    pub origin_y: f64, // 0 = top of viewport, 1 = bottom
}

impl Default for Burst {
    fn default() -> Self {
        Self {
            particle_count: 100,
            spread_deg: 70.0,
            origin_y: 0.6,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize), serde(default))]
pub struct GameConfig {
    pub segments: usize,
    pub points_per_correct: u32,
    pub max_lives: u8,
    pub answer_seconds: u32,
    pub spin_duration_ms: f64,
    pub tick_interval_ms: f64,
    pub highlight_ms: f64,
    pub result_pause_ms: f64,
    pub min_full_turns: u32,
    pub wheel_size_px: u32,
    pub burst: Burst,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            segments: SEGMENT_COUNT,
            points_per_correct: POINTS_PER_CORRECT,
            max_lives: MAX_LIVES,
            answer_seconds: ANSWER_SECONDS,
            spin_duration_ms: SPIN_DURATION_MS,
            tick_interval_ms: TICK_INTERVAL_MS,
            highlight_ms: HIGHLIGHT_MS,
            result_pause_ms: RESULT_PAUSE_MS,
            min_full_turns: MIN_FULL_TURNS,
            wheel_size_px: WHEEL_SIZE_PX,
            burst: Burst::default(),
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |field, reason| Err(ConfigError::Invalid { field, reason });
        if self.segments == 0 {
            return invalid("segments", "must be at least 1");
        }
        if self.segments > catalog::len() {
            // every sector needs its own word
            return invalid("segments", "more segments than catalog words");
        }
        if self.max_lives == 0 {
            return invalid("max_lives", "must be at least 1");
        }
        if self.answer_seconds == 0 {
            return invalid("answer_seconds", "must be at least 1");
        }
        if self.wheel_size_px == 0 {
            return invalid("wheel_size_px", "must be at least 1");
        }
        if !(self.tick_interval_ms.is_finite() && self.tick_interval_ms > 0.0) {
            return invalid("tick_interval_ms", "must be a positive number");
        }
        let durations = [
            ("spin_duration_ms", self.spin_duration_ms),
            ("highlight_ms", self.highlight_ms),
            ("result_pause_ms", self.result_pause_ms),
        ];
        for (field, value) in durations {
            if !(value.is_finite() && value >= 0.0) {
                return invalid(field, "must be a non-negative number");
            }
        }
        if !(self.burst.spread_deg.is_finite() && self.burst.spread_deg >= 0.0) {
            return invalid("burst.spread_deg", "must be a non-negative number");
        }
        if !(self.burst.origin_y.is_finite() && (0.0..=1.0).contains(&self.burst.origin_y)) {
            return invalid("burst.origin_y", "must be within 0..=1");
        }
        Ok(())
    }

    /// Parse a (possibly partial) JSON override and validate the result.
    #[cfg(feature = "serde_json")]
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let cfg: GameConfig = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }
}
