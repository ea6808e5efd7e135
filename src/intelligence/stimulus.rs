// ABOUTME: Stimulus quality scoring from subjective session feedback ratings
// ABOUTME: Sums mind-muscle connection, pump, and disruption into a 0-9 score with an action
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! MEV stimulus estimator.
//!
//! Scores how growth-productive a week's training was for one muscle from
//! three subjective ratings. Inputs are clamped into range before scoring,
//! never rejected; the scorer is deterministic and has no error conditions.

use crate::constants::stimulus;
use crate::models::StimulusFeedback;
use serde::{Deserialize, Serialize};

/// Volume action implied by a stimulus score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StimulusAction {
    /// Stimulus inadequate: push more volume next week
    AddSets,
    /// Stimulus adequate: no volume change from this signal
    Keep,
    /// Stimulus excessive: stop adding volume, treat as a caution signal
    Stop,
}

/// Clamped per-rating breakdown that produced the score
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct StimulusBreakdown {
    /// Clamped mind-muscle connection rating
    pub mmc: u8,
    /// Clamped pump rating
    pub pump: u8,
    /// Clamped disruption rating
    pub disruption: u8,
}

/// Result of scoring one week's stimulus feedback
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StimulusScore {
    /// Combined score, 0-9
    pub score: u8,
    /// Action implied by the score
    pub action: StimulusAction,
    /// Human-readable advice for the athlete
    pub advice: String,
    /// The clamped ratings that were summed
    pub breakdown: StimulusBreakdown,
}

/// Score a training stimulus from subjective ratings.
///
/// Each rating is clamped to 0-3 and the three are summed. Thresholds:
/// score <= 3 add sets, 4-6 keep, >= 7 stop.
#[must_use]
pub fn score_stimulus(mmc: u8, pump: u8, disruption: u8) -> StimulusScore {
    let mmc = mmc.min(stimulus::RATING_MAX);
    let pump = pump.min(stimulus::RATING_MAX);
    let disruption = disruption.min(stimulus::RATING_MAX);
    let score = mmc + pump + disruption;

    let (action, advice) = if score <= stimulus::LOW_SCORE_MAX {
        (
            StimulusAction::AddSets,
            format!(
                "Stimulus too low ({score}/{max}): add 2 sets next week",
                max = stimulus::SCORE_MAX
            ),
        )
    } else if score <= stimulus::ADEQUATE_SCORE_MAX {
        (
            StimulusAction::Keep,
            format!(
                "Stimulus adequate ({score}/{max}): keep progressing normally",
                max = stimulus::SCORE_MAX
            ),
        )
    } else {
        (
            StimulusAction::Stop,
            format!(
                "Stimulus excessive ({score}/{max}): stop adding volume this week",
                max = stimulus::SCORE_MAX
            ),
        )
    };

    StimulusScore {
        score,
        action,
        advice,
        breakdown: StimulusBreakdown {
            mmc,
            pump,
            disruption,
        },
    }
}

/// Score a [`StimulusFeedback`] value directly
#[must_use]
pub fn score_feedback(feedback: &StimulusFeedback) -> StimulusScore {
    score_stimulus(feedback.mmc, feedback.pump, feedback.disruption)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scores_are_clamped_into_range() {
        let result = score_stimulus(9, 9, 9);
        assert_eq!(result.score, 9);
        assert_eq!(result.breakdown.mmc, 3);
    }

    #[test]
    fn threshold_boundaries_match_policy() {
        assert_eq!(score_stimulus(1, 1, 1).action, StimulusAction::AddSets);
        assert_eq!(score_stimulus(2, 1, 1).action, StimulusAction::Keep);
        assert_eq!(score_stimulus(2, 2, 2).action, StimulusAction::Keep);
        assert_eq!(score_stimulus(3, 2, 2).action, StimulusAction::Stop);
        assert_eq!(score_stimulus(3, 3, 3).action, StimulusAction::Stop);
    }
}
