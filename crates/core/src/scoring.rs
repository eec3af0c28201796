//! Scoring module - line-clear points, levels and fall speed
//!
//! Rules:
//! - A clear of `n` lines awards `line_scores[n]`, multiplied by the level the
//!   clear happened at when `multiply_by_level` is set. Counts outside the table
//!   award nothing.
//! - `level = initial_level + total_lines / lines_per_level`; it is derived from
//!   cumulative lines and therefore never goes down.
//! - The fall interval is derived from the level, never stored:
//!   `max(min_interval, base_interval * decay^(level - 1))`.
//! - Drops award 1 point per row (soft) or 2 per row (hard).

use serde::{Deserialize, Serialize};

use crate::events::{CoreEvent, EventSink, NullSink};
use crate::types::{
    RulesError, BASE_DROP_MS, DROP_DECAY_FACTOR, DROP_INTERVAL_MIN_MS, HARD_DROP_POINTS,
    INITIAL_LEVEL, LINES_PER_LEVEL, LINE_SCORES, SOFT_DROP_POINTS,
};

/// Tunable scoring and pacing rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Bonus per clear, indexed by number of lines
    pub line_scores: Vec<u32>,
    pub multiply_by_level: bool,
    pub initial_level: u32,
    pub lines_per_level: u32,
    pub base_interval_ms: u32,
    /// Per-level interval multiplier, strictly between 0 and 1
    pub decay_factor: f64,
    pub min_interval_ms: u32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            line_scores: LINE_SCORES.to_vec(),
            multiply_by_level: true,
            initial_level: INITIAL_LEVEL,
            lines_per_level: LINES_PER_LEVEL,
            base_interval_ms: BASE_DROP_MS,
            decay_factor: DROP_DECAY_FACTOR,
            min_interval_ms: DROP_INTERVAL_MIN_MS,
        }
    }
}

/// Highest accepted starting level
pub const MAX_INITIAL_LEVEL: u32 = u32::MAX / 2;

impl ScoringConfig {
    /// Reject values that would break the level or pacing rules
    ///
    /// A bonus table whose four-line clear is not worth more than four singles
    /// is allowed but logged.
    pub fn validate(&self) -> Result<(), RulesError> {
        if self.lines_per_level == 0 {
            return Err(RulesError::InvalidConfig("lines_per_level must be positive"));
        }
        if self.initial_level == 0 {
            return Err(RulesError::InvalidConfig("initial_level must be at least 1"));
        }
        if self.initial_level > MAX_INITIAL_LEVEL {
            return Err(RulesError::InvalidConfig("initial_level leaves no room to level up"));
        }
        if !(self.decay_factor > 0.0 && self.decay_factor < 1.0) {
            return Err(RulesError::InvalidConfig("decay_factor must be in (0, 1)"));
        }
        if self.min_interval_ms == 0 {
            return Err(RulesError::InvalidConfig("min_interval_ms must be positive"));
        }
        if self.base_interval_ms < self.min_interval_ms {
            return Err(RulesError::InvalidConfig(
                "base_interval_ms must not be below min_interval_ms",
            ));
        }
        if !self.is_convex() {
            log::warn!(
                "line score table {:?} does not reward a four-line clear above four singles",
                self.line_scores
            );
        }
        Ok(())
    }

    /// Four-line bonus strictly greater than four times the single-line bonus
    pub fn is_convex(&self) -> bool {
        self.line_score(4) > self.line_score(1).saturating_mul(4)
    }

    /// Table lookup; 0 for counts the table does not cover
    pub fn line_score(&self, lines: usize) -> u32 {
        self.line_scores.get(lines).copied().unwrap_or(0)
    }
}

/// Cumulative progress of one game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScoreState {
    pub score: u32,
    pub level: u32,
    pub total_lines: u32,
}

impl ScoreState {
    pub fn new(config: &ScoringConfig) -> Self {
        Self {
            score: 0,
            level: config.initial_level,
            total_lines: 0,
        }
    }
}

/// Points for clearing `lines` at `level`
pub fn calculate_line_score(lines: usize, level: u32, config: &ScoringConfig) -> u32 {
    let base = config.line_score(lines);
    if config.multiply_by_level {
        base.saturating_mul(level)
    } else {
        base
    }
}

/// Level reached after `total_lines` cumulative lines
pub fn calculate_level(total_lines: u32, config: &ScoringConfig) -> u32 {
    config
        .initial_level
        .saturating_add(total_lines / config.lines_per_level.max(1))
}

/// Fall interval for a level, in milliseconds per row
pub fn drop_interval_ms(level: u32, config: &ScoringConfig) -> u32 {
    let exponent = level.saturating_sub(1).min(i32::MAX as u32) as i32;
    let interval = config.base_interval_ms as f64 * config.decay_factor.powi(exponent);
    (interval as u32).max(config.min_interval_ms)
}

/// Drop points: soft drop 1 per row, hard drop 2 per row
pub fn calculate_drop_score(cells: u32, is_hard_drop: bool) -> u32 {
    let per_cell = if is_hard_drop {
        HARD_DROP_POINTS
    } else {
        SOFT_DROP_POINTS
    };
    cells.saturating_mul(per_cell)
}

/// Apply a lines-cleared event to a score state
///
/// Points use the level before the clear; score and total lines only grow.
pub fn clear_lines(state: ScoreState, count: usize, config: &ScoringConfig) -> ScoreState {
    let points = calculate_line_score(count, state.level, config);
    let total_lines = state.total_lines.saturating_add(count as u32);
    ScoreState {
        score: state.score.saturating_add(points),
        level: calculate_level(total_lines, config).max(state.level),
        total_lines,
    }
}

/// What one `clear_lines` call changed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreDelta {
    pub points: u32,
    pub lines: usize,
    pub level_before: u32,
    pub level_after: u32,
}

impl ScoreDelta {
    pub fn leveled_up(&self) -> bool {
        self.level_after > self.level_before
    }
}

/// Owns a [`ScoreState`] and the rules that advance it
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreManager {
    config: ScoringConfig,
    state: ScoreState,
}

impl ScoreManager {
    pub fn new(config: ScoringConfig) -> Self {
        let state = ScoreState::new(&config);
        Self { config, state }
    }

    pub fn clear_lines(&mut self, count: usize) -> ScoreDelta {
        self.clear_lines_with_events(count, &mut NullSink)
    }

    /// [`ScoreManager::clear_lines`] that reports `LevelUp`
    pub fn clear_lines_with_events(&mut self, count: usize, sink: &mut dyn EventSink) -> ScoreDelta {
        let before = self.state;
        self.state = clear_lines(before, count, &self.config);

        let delta = ScoreDelta {
            points: self.state.score - before.score,
            lines: count,
            level_before: before.level,
            level_after: self.state.level,
        };

        if delta.leveled_up() {
            log::debug!(
                "level {} -> {} after {} lines",
                delta.level_before,
                delta.level_after,
                self.state.total_lines
            );
            sink.emit(CoreEvent::LevelUp {
                from: delta.level_before,
                to: delta.level_after,
            });
        }

        delta
    }

    /// Award drop points; returns the points added
    pub fn add_drop_points(&mut self, cells: u32, is_hard_drop: bool) -> u32 {
        let points = calculate_drop_score(cells, is_hard_drop);
        self.state.score = self.state.score.saturating_add(points);
        points
    }

    /// Current fall interval, for the host's gravity timer
    pub fn drop_interval_ms(&self) -> u32 {
        drop_interval_ms(self.state.level, &self.config)
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn level(&self) -> u32 {
        self.state.level
    }

    pub fn total_lines(&self) -> u32 {
        self.state.total_lines
    }

    pub fn state(&self) -> ScoreState {
        self.state
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Back to the starting state, keeping the config
    pub fn reset(&mut self) {
        self.state = ScoreState::new(&self.config);
    }
}

impl Default for ScoreManager {
    fn default() -> Self {
        Self::new(ScoringConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_line_scores() {
        let config = ScoringConfig::default();
        assert_eq!(calculate_line_score(0, 1, &config), 0);
        assert_eq!(calculate_line_score(1, 1, &config), 100);
        assert_eq!(calculate_line_score(2, 1, &config), 300);
        assert_eq!(calculate_line_score(3, 1, &config), 500);
        assert_eq!(calculate_line_score(4, 1, &config), 800);
        assert_eq!(calculate_line_score(4, 3, &config), 2400);
        assert_eq!(calculate_line_score(5, 1, &config), 0);
        assert!(config.is_convex());
    }

    #[test]
    fn test_flat_scoring() {
        let config = ScoringConfig {
            multiply_by_level: false,
            ..ScoringConfig::default()
        };
        assert_eq!(calculate_line_score(4, 7, &config), 800);
    }

    #[test]
    fn test_level_calculation() {
        let config = ScoringConfig::default();
        assert_eq!(calculate_level(0, &config), 1);
        assert_eq!(calculate_level(9, &config), 1);
        assert_eq!(calculate_level(10, &config), 2);
        assert_eq!(calculate_level(29, &config), 3);
        assert_eq!(calculate_level(100, &config), 11);

        let config = ScoringConfig {
            initial_level: 5,
            lines_per_level: 4,
            ..ScoringConfig::default()
        };
        assert_eq!(calculate_level(7, &config), 6);
    }

    #[test]
    fn test_drop_intervals() {
        let config = ScoringConfig::default();
        assert_eq!(drop_interval_ms(1, &config), 1000);
        assert_eq!(drop_interval_ms(2, &config), 800);
        assert_eq!(drop_interval_ms(3, &config), 640);
        assert_eq!(drop_interval_ms(50, &config), 100);
        assert_eq!(drop_interval_ms(u32::MAX, &config), 100);

        let mut previous = drop_interval_ms(1, &config);
        for level in 2..=11 {
            let interval = drop_interval_ms(level, &config);
            assert!(interval < previous, "level {} did not speed up", level);
            previous = interval;
        }
    }

    #[test]
    fn test_drop_scores() {
        assert_eq!(calculate_drop_score(10, false), 10);
        assert_eq!(calculate_drop_score(10, true), 20);
    }

    #[test]
    fn test_clear_lines_uses_pre_clear_level() {
        let config = ScoringConfig::default();
        let state = ScoreState {
            score: 0,
            level: 1,
            total_lines: 8,
        };
        let next = clear_lines(state, 4, &config);
        assert_eq!(next.score, 800);
        assert_eq!(next.total_lines, 12);
        assert_eq!(next.level, 2);
    }

    #[test]
    fn test_manager_level_up_event() {
        let mut manager = ScoreManager::default();
        let mut events: Vec<CoreEvent> = Vec::new();
        for _ in 0..2 {
            manager.clear_lines_with_events(4, &mut events);
        }
        assert!(events.is_empty());

        let delta = manager.clear_lines_with_events(2, &mut events);
        assert!(delta.leveled_up());
        assert_eq!(events, vec![CoreEvent::LevelUp { from: 1, to: 2 }]);
        assert_eq!(manager.drop_interval_ms(), 800);

        manager.reset();
        assert_eq!(manager.state(), ScoreState::new(manager.config()));
    }

    #[test]
    fn test_validate() {
        assert!(ScoringConfig::default().validate().is_ok());

        let bad = ScoringConfig {
            lines_per_level: 0,
            ..ScoringConfig::default()
        };
        assert_eq!(bad.validate().unwrap_err().code(), "invalid_config");

        let bad = ScoringConfig {
            decay_factor: 1.0,
            ..ScoringConfig::default()
        };
        assert!(bad.validate().is_err());

        let bad = ScoringConfig {
            base_interval_ms: 50,
            ..ScoringConfig::default()
        };
        assert!(bad.validate().is_err());

        let flat = ScoringConfig {
            line_scores: vec![0, 100, 200, 300, 400],
            ..ScoringConfig::default()
        };
        assert!(!flat.is_convex());
        assert!(flat.validate().is_ok());
    }

    #[test]
    fn test_level_saturates_near_max() {
        let config = ScoringConfig {
            initial_level: u32::MAX,
            ..ScoringConfig::default()
        };
        assert!(config.validate().is_err());
        assert_eq!(calculate_level(40, &config), u32::MAX);

        let mut manager = ScoreManager::new(config);
        for _ in 0..3 {
            manager.clear_lines(4);
        }
        assert_eq!(manager.level(), u32::MAX);
        assert_eq!(manager.total_lines(), 12);
    }

    #[test]
    fn test_highest_accepted_initial_level() {
        let config = ScoringConfig {
            initial_level: MAX_INITIAL_LEVEL,
            ..ScoringConfig::default()
        };
        assert!(config.validate().is_ok());
        assert_eq!(calculate_level(10, &config), MAX_INITIAL_LEVEL + 1);
    }
}
