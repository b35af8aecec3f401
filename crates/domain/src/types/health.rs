//! Health score presentation types.

use serde::{Deserialize, Serialize};

use crate::constants::{GOOD_SCORE_CEILING, MAX_HEALTH_SCORE, WARNING_SCORE_CEILING};
use crate::impl_identifier_conversions;

/// Coarse grading of a health score (lower scores are healthier).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthGrade {
    Good,
    Warning,
    Critical,
}

impl_identifier_conversions!(HealthGrade {
    Good => "good",
    Warning => "warning",
    Critical => "critical",
});

impl HealthGrade {
    /// Grade a score: `Good` up to 40, `Warning` up to 70, `Critical` above.
    pub fn from_score(score: i64) -> Self {
        if score <= GOOD_SCORE_CEILING {
            Self::Good
        } else if score <= WARNING_SCORE_CEILING {
            Self::Warning
        } else {
            Self::Critical
        }
    }
}

/// Individual penalty terms behind a health score, each already capped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PenaltyBreakdown {
    pub autoload: f64,
    pub expired_transients: f64,
    pub revisions: f64,
    pub orphaned_meta: f64,
    pub spam_trash: f64,
    pub auto_drafts: f64,
}

impl PenaltyBreakdown {
    /// Sum of all terms before the overall cap.
    pub fn sum(&self) -> f64 {
        self.autoload
            + self.expired_transients
            + self.revisions
            + self.orphaned_meta
            + self.spam_trash
            + self.auto_drafts
    }

    /// Sum of all terms capped at the maximum score.
    pub fn total(&self) -> f64 {
        self.sum().min(MAX_HEALTH_SCORE as f64)
    }

    /// Labelled terms in display order.
    pub fn terms(&self) -> [(&'static str, f64); 6] {
        [
            ("autoload", self.autoload),
            ("expired_transients", self.expired_transients),
            ("revisions", self.revisions),
            ("orphaned_meta", self.orphaned_meta),
            ("spam_trash", self.spam_trash),
            ("auto_drafts", self.auto_drafts),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grade_boundaries() {
        assert_eq!(HealthGrade::from_score(0), HealthGrade::Good);
        assert_eq!(HealthGrade::from_score(40), HealthGrade::Good);
        assert_eq!(HealthGrade::from_score(41), HealthGrade::Warning);
        assert_eq!(HealthGrade::from_score(70), HealthGrade::Warning);
        assert_eq!(HealthGrade::from_score(71), HealthGrade::Critical);
        assert_eq!(HealthGrade::from_score(100), HealthGrade::Critical);
    }

    #[test]
    fn breakdown_sum_adds_every_term() {
        let breakdown = PenaltyBreakdown {
            autoload: 10.0,
            expired_transients: 1.5,
            revisions: 1.0,
            orphaned_meta: 0.5,
            spam_trash: 0.0,
            auto_drafts: 6.0,
        };
        assert!((breakdown.sum() - 19.0).abs() < f64::EPSILON);
        assert!((breakdown.total() - 19.0).abs() < f64::EPSILON);
        assert_eq!(breakdown.terms()[0], ("autoload", 10.0));
    }

    #[test]
    fn breakdown_total_is_capped() {
        let breakdown = PenaltyBreakdown {
            autoload: 30.0,
            expired_transients: 15.0,
            revisions: 20.0,
            orphaned_meta: 15.0,
            spam_trash: 10.0,
            auto_drafts: 10.0,
        };
        assert!((breakdown.total() - 100.0).abs() < f64::EPSILON);
    }
}
