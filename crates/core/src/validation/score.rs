//! Completeness score.
//!
//! Linear penalty model: every error costs 5 points, every warning 1 point,
//! floored at 0. Missing fields and recommendations are not counted.

/// Number of checks the penalty is spread across.
pub const TOTAL_CHECKS: u32 = 20;

/// Penalty units per error.
pub const ERROR_PENALTY: u32 = 10;

/// Penalty units per warning.
pub const WARNING_PENALTY: u32 = 2;

/// Compute the 0–100 completeness score from finding counts.
pub fn completeness_score(error_count: usize, warning_count: usize) -> u8 {
    let total = f64::from(TOTAL_CHECKS);
    let penalty = error_count as f64 * f64::from(ERROR_PENALTY)
        + warning_count as f64 * f64::from(WARNING_PENALTY);
    let raw = ((total * 10.0 - penalty) / total * 10.0).round();
    raw.clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_is_100() {
        assert_eq!(completeness_score(0, 0), 100);
    }

    #[test]
    fn error_costs_five_points() {
        assert_eq!(completeness_score(1, 0), 95);
        assert_eq!(completeness_score(2, 0), 90);
    }

    #[test]
    fn warning_costs_one_point() {
        assert_eq!(completeness_score(0, 1), 99);
        assert_eq!(completeness_score(1, 3), 92);
    }

    #[test]
    fn floors_at_zero() {
        assert_eq!(completeness_score(20, 0), 0);
        assert_eq!(completeness_score(50, 50), 0);
    }
}
