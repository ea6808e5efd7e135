// ABOUTME: Domain constants for volume progression, RIR scheduling, and fatigue management
// ABOUTME: Values follow Renaissance Periodization literature tables and the engine policy
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Training constants grounded in hypertrophy periodization research.
//!
//! References:
//! - Israetel, M., Hoffmann, J., & Smith, C.W. (2017). Scientific Principles of Strength Training
//! - Israetel, M. et al. (2019). How Much Should I Train? Volume landmark definitions
//!   <https://rpstrength.com/blogs/articles/training-volume-landmarks-muscle-growth>
//! - Helms, E. et al. (2016). RPE/RIR-graded intensity prescription for resistance training
//!   <https://pubmed.ncbi.nlm.nih.gov/26817740/>

/// Stimulus scoring thresholds (mind-muscle connection + pump + disruption)
pub mod stimulus {
    /// Maximum value of a single subjective rating
    pub const RATING_MAX: u8 = 3;

    /// Total scores at or below this mean the stimulus was inadequate
    pub const LOW_SCORE_MAX: u8 = 3;

    /// Total scores at or below this (and above `LOW_SCORE_MAX`) are adequate
    pub const ADEQUATE_SCORE_MAX: u8 = 6;

    /// Maximum achievable combined score
    pub const SCORE_MAX: u8 = 9;
}

/// Weekly set progression policy
pub mod progression {
    /// Sets added when the stimulus was inadequate
    pub const ADD_SETS_INCREMENT: i32 = 2;

    /// Default progressive-overload increment when the stimulus was adequate
    pub const KEEP_INCREMENT: i32 = 1;

    /// Soreness rating at which the soreness penalty applies
    pub const HIGH_SORENESS_THRESHOLD: u8 = 3;

    /// Sets removed by the soreness penalty
    pub const SORENESS_PENALTY: i32 = 1;

    /// Sets removed when performance regressed versus last week
    pub const PERFORMANCE_PENALTY: i32 = 1;

    /// Lower bound on a single weekly set change
    pub const MIN_SET_CHANGE: i32 = -1;
}

/// RIR (reps in reserve) scheduling across a mesocycle
pub mod rir {
    /// Target RIR for week 1 of every mesocycle. Must be exactly 4.0, not
    /// 4.5: intensity prescriptions that start above 4 RIR fail the
    /// program-compliance audit.
    pub const START_RIR: f64 = 4.0;

    /// Target RIR for the final scheduled week
    pub const END_RIR: f64 = 0.0;

    /// Reported RIR above this value means the load was far too light
    pub const MAX_REPORTABLE_RIR: f64 = 10.0;

    /// Deviation beyond this many RIR gets the aggressive adjustment tier
    pub const LARGE_DEVIATION: f64 = 2.0;

    /// Moderate load adjustment band (percent of current load)
    pub const MODERATE_ADJUSTMENT: (f64, f64) = (5.0, 10.0);

    /// Aggressive load adjustment band (percent of current load)
    pub const LARGE_ADJUSTMENT: (f64, f64) = (10.0, 15.0);
}

/// Deload detection and transformation policy
pub mod deload {
    /// Consecutive weekly checks at/above MRV before a deload is demanded
    pub const MRV_STREAK_WINDOW: u32 = 2;

    /// Multiplier applied to every current-week set count during a deload
    pub const SET_MULTIPLIER: f64 = 0.5;

    /// Multiplier applied to working loads during a deload
    pub const LOAD_MULTIPLIER: f64 = 0.5;

    /// Overall fatigue level at which a deep deload is selected
    pub const DEEP_FATIGUE_LEVEL: f64 = 0.7;

    /// Volume pressure at which a deep deload is selected
    pub const DEEP_VOLUME_PRESSURE: f64 = 0.8;

    /// Overall fatigue level at which a standard deload is selected
    pub const STANDARD_FATIGUE_LEVEL: f64 = 0.5;

    /// Volume pressure at which a standard deload is selected
    pub const STANDARD_VOLUME_PRESSURE: f64 = 0.6;

    /// Sets within this distance of MRV count toward volume pressure
    pub const NEAR_MRV_MARGIN: u32 = 2;
}

/// Fatigue accumulation scoring weights (0-100 composite)
pub mod fatigue {
    /// Maximum points contributed by average soreness
    pub const SORENESS_POINTS: f64 = 30.0;

    /// Maximum points contributed by poor sleep
    pub const SLEEP_POINTS: f64 = 20.0;

    /// Maximum points contributed by life stress
    pub const STRESS_POINTS: f64 = 20.0;

    /// Maximum points contributed by volume overreach
    pub const VOLUME_POINTS: f64 = 20.0;

    /// Points per consecutive week at MRV
    pub const MRV_WEEK_POINTS: f64 = 5.0;

    /// Cap on consecutive-MRV-week points
    pub const MRV_WEEK_POINTS_MAX: f64 = 10.0;

    /// Flat bonus when performance declined week over week
    pub const PERFORMANCE_DECLINE_POINTS: f64 = 10.0;

    /// A set load below this fraction of baseline is a rep-strength drop
    pub const STRENGTH_DROP_RATIO: f64 = 0.97;

    /// Recovery-to-session-gap ratio below which frequency can increase
    pub const EARLY_RECOVERY_RATIO: f64 = 0.7;

    /// Recovery-to-session-gap ratio above which frequency should decrease
    pub const LAGGING_RECOVERY_RATIO: f64 = 1.3;
}

/// Recovery session volume policy
pub mod recovery {
    /// Sets subtracted from the MEV..MRV midpoint for a standard recovery session
    pub const STANDARD_ADJUSTMENT: u32 = 1;

    /// Sets subtracted from the midpoint when illness is present
    pub const ILLNESS_ADJUSTMENT: u32 = 2;
}

/// Session distribution guardrails used by frequency validation
pub mod frequency {
    /// Sets per session above this are rejected outright
    pub const MAX_SETS_PER_SESSION: f64 = 20.0;

    /// Sets per session above this draw a warning
    pub const HIGH_SETS_PER_SESSION: f64 = 12.0;

    /// Sets per session below this (at meaningful volume) draw a warning
    pub const LOW_SETS_PER_SESSION: f64 = 2.0;

    /// Weekly volume below which the low-distribution warning is suppressed
    pub const LOW_VOLUME_CUTOFF: u32 = 6;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rir_curve_endpoints_are_fixed() {
        assert!((rir::START_RIR - 4.0).abs() < f64::EPSILON);
        assert!(rir::END_RIR.abs() < f64::EPSILON);
    }

    #[test]
    fn stimulus_thresholds_partition_the_score_range() {
        assert!(stimulus::LOW_SCORE_MAX < stimulus::ADEQUATE_SCORE_MAX);
        assert!(stimulus::ADEQUATE_SCORE_MAX < stimulus::SCORE_MAX);
        assert_eq!(stimulus::SCORE_MAX, stimulus::RATING_MAX * 3);
    }
}
