//! Dice modifier (DM) evaluator.
//!
//! Every rule-book modifier table is expressed as a chain of calls to
//! [`adjust_dm`], [`adjust_starport_dm`] or [`adjust_zone_dm`]: each call
//! either adds its delta to the running modifier or passes it through.

use serde::{Deserialize, Serialize};

/// Comparison applied between the tested value and the thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Predicate {
    /// value < t
    Lt,
    /// value <= t
    Le,
    /// value == t
    Eq,
    /// value >= t
    Ge,
    /// value > t
    Gt,
    /// lo <= value <= hi
    InRange,
    /// value is one of the listed thresholds
    IsOneOf,
}

impl Predicate {
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Lt => "lt",
            Self::Le => "le",
            Self::Eq => "eq",
            Self::Ge => "ge",
            Self::Gt => "gt",
            Self::InRange => "in_range",
            Self::IsOneOf => "is_one_of",
        }
    }

    /// Panics when the threshold list does not fit the predicate. These are
    /// call-site defects, never data problems.
    fn check_thresholds(self, thresholds: &[i32]) {
        let count = thresholds.len();
        match self {
            Self::Lt | Self::Le | Self::Eq | Self::Ge | Self::Gt => {
                if count != 1 {
                    log::error!(
                        "predicate {} takes exactly 1 threshold, got {count}",
                        self.key()
                    );
                    panic!(
                        "invalid threshold count for predicate {}: {count} (required 1)",
                        self.key()
                    );
                }
            }
            Self::InRange => {
                if count != 2 {
                    log::error!("predicate in_range takes exactly 2 thresholds, got {count}");
                    panic!("invalid threshold count for predicate in_range: {count} (required 2)");
                }
                if thresholds[0] > thresholds[1] {
                    log::error!(
                        "threshold range is inverted: {} > {}",
                        thresholds[0],
                        thresholds[1]
                    );
                    panic!(
                        "threshold range is inverted: low {} > high {}",
                        thresholds[0], thresholds[1]
                    );
                }
            }
            Self::IsOneOf => {
                if count < 2 {
                    log::error!("predicate is_one_of takes at least 2 thresholds, got {count}");
                    panic!("invalid threshold count for predicate is_one_of: {count} (minimum 2)");
                }
            }
        }
    }

    fn holds(self, value: i32, thresholds: &[i32]) -> bool {
        match self {
            Self::Lt => value < thresholds[0],
            Self::Le => value <= thresholds[0],
            Self::Eq => value == thresholds[0],
            Self::Ge => value >= thresholds[0],
            Self::Gt => value > thresholds[0],
            Self::InRange => value >= thresholds[0] && value <= thresholds[1],
            Self::IsOneOf => thresholds.contains(&value),
        }
    }
}

/// Add `delta` to `current` when `value` satisfies `predicate` against
/// `thresholds`; otherwise return `current` unchanged.
///
/// # Panics
///
/// Panics when the threshold count does not match the predicate (one for the
/// plain comparisons, two for [`Predicate::InRange`], at least two for
/// [`Predicate::IsOneOf`]) or when an in-range pair is inverted.
#[must_use]
pub fn adjust_dm(current: i32, delta: i32, value: i32, predicate: Predicate, thresholds: &[i32]) -> i32 {
    predicate.check_thresholds(thresholds);
    if predicate.holds(value, thresholds) {
        current + delta
    } else {
        current
    }
}

/// Starport-class variant: adds `delta` when the class letters match.
#[must_use]
pub fn adjust_starport_dm(current: i32, delta: i32, value: &str, threshold: &str) -> i32 {
    if value == threshold {
        current + delta
    } else {
        current
    }
}

/// Flag variant: adds `delta` when the flag is set.
#[must_use]
pub const fn adjust_zone_dm(current: i32, delta: i32, flag: bool) -> i32 {
    if flag { current + delta } else { current }
}
