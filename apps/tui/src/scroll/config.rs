use std::time::Duration;
use thiserror::Error;

/// Tunable constants for the scroll/transition machine.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollConfig {
    /// Number of native sections (2 or 3).
    pub section_count: usize,
    /// Fraction of a section boundary at which the active section flips.
    pub transition_point: f64,
    /// Half-width of the cross-fade window around `transition_point`.
    pub transition_range: f64,
    /// Wheel delta to accumulator scale while sub-scrolling.
    pub sensitivity: f64,
    /// Accumulator is clamped to `[-limit, limit]`.
    pub accumulator_limit: f64,
    /// Accumulator below this commits a move back one section.
    pub commit_threshold: f64,
    /// Accumulator below this (and above commit) only gives visual feedback.
    pub feedback_threshold: f64,
    /// How far transition progress dips at the bottom of the feedback band.
    pub feedback_strength: f64,
    /// Programmatic scroll duration; the section commits when it elapses.
    pub commit_delay: Duration,
    /// Time after which the re-entrancy guard clears.
    pub settle_delay: Duration,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            section_count: 2,
            transition_point: 0.5,
            transition_range: 0.3,
            sensitivity: 0.0008,
            accumulator_limit: 1.2,
            commit_threshold: -0.6,
            feedback_threshold: -0.3,
            feedback_strength: 0.5,
            commit_delay: Duration::from_millis(600),
            settle_delay: Duration::from_millis(1000),
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ScrollConfigError {
    #[error("section count must be 2 or 3, got {0}")]
    SectionCount(usize),
    #[error("transition window [{low}, {high}] must lie inside [0, 1]")]
    TransitionWindow { low: f64, high: f64 },
    #[error("sensitivity must be positive, got {0}")]
    Sensitivity(f64),
    #[error("thresholds must satisfy -limit <= commit < feedback <= 0")]
    Thresholds,
    #[error("settle delay must not be shorter than commit delay")]
    Delays,
}

impl ScrollConfig {
    pub fn validate(&self) -> Result<(), ScrollConfigError> {
        if !(2..=3).contains(&self.section_count) {
            return Err(ScrollConfigError::SectionCount(self.section_count));
        }

        let low = self.transition_point - self.transition_range;
        let high = self.transition_point + self.transition_range;
        if self.transition_range <= 0.0 || low < 0.0 || high > 1.0 {
            return Err(ScrollConfigError::TransitionWindow { low, high });
        }

        if !(self.sensitivity > 0.0 && self.sensitivity.is_finite()) {
            return Err(ScrollConfigError::Sensitivity(self.sensitivity));
        }

        if !(self.accumulator_limit > 0.0
            && -self.accumulator_limit <= self.commit_threshold
            && self.commit_threshold < self.feedback_threshold
            && self.feedback_threshold <= 0.0)
        {
            return Err(ScrollConfigError::Thresholds);
        }

        if self.settle_delay < self.commit_delay {
            return Err(ScrollConfigError::Delays);
        }

        Ok(())
    }

    pub const fn last_section(&self) -> usize {
        self.section_count.saturating_sub(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(ScrollConfig::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_window_outside_unit_interval() {
        let config = ScrollConfig {
            transition_range: 0.6,
            ..ScrollConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ScrollConfigError::TransitionWindow { .. })
        ));
    }

    #[test]
    fn rejects_unreachable_commit_threshold() {
        let config = ScrollConfig {
            commit_threshold: -1.5,
            ..ScrollConfig::default()
        };
        assert_eq!(config.validate(), Err(ScrollConfigError::Thresholds));

        let config = ScrollConfig {
            commit_threshold: -0.2,
            ..ScrollConfig::default()
        };
        assert_eq!(config.validate(), Err(ScrollConfigError::Thresholds));
    }

    #[test]
    fn rejects_section_counts_outside_layouts() {
        let config = ScrollConfig {
            section_count: 1,
            ..ScrollConfig::default()
        };
        assert_eq!(config.validate(), Err(ScrollConfigError::SectionCount(1)));
    }
}
