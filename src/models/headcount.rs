//! Headcount models.
//!
//! This module defines [`HeadcountInputs`], the headcount figures for the credit year,
//! and [`FollowUpYear`], a single year of the post-credit retention window.

use serde::{Deserialize, Serialize};

/// Headcount figures for the credit year.
///
/// All figures are full-time-equivalent regular employee counts at year end.
/// The two increase quantities are derived and never negative: a decline in
/// headcount contributes zero increase.
///
/// # Example
///
/// ```
/// use employment_credit::models::HeadcountInputs;
///
/// let heads = HeadcountInputs {
///     prev_total: 50,
///     curr_total: 60,
///     prev_youth: 10,
///     curr_youth: 14,
///     converted_regular: 2,
///     returned_from_parental_leave: 1,
/// };
/// assert_eq!(heads.increase_total(), 10);
/// assert_eq!(heads.increase_youth(), 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HeadcountInputs {
    /// Total headcount in the prior tax year.
    pub prev_total: u32,
    /// Total headcount in the credit year.
    pub curr_total: u32,
    /// Youth-or-equivalent headcount in the prior tax year.
    #[serde(default)]
    pub prev_youth: u32,
    /// Youth-or-equivalent headcount in the credit year.
    #[serde(default)]
    pub curr_youth: u32,
    /// Workers converted from non-regular to regular employment in the credit year.
    #[serde(default)]
    pub converted_regular: u32,
    /// Workers returning from parental leave in the credit year.
    #[serde(default)]
    pub returned_from_parental_leave: u32,
}

impl HeadcountInputs {
    /// Returns the increase in total headcount, floored at zero.
    pub fn increase_total(&self) -> u32 {
        self.curr_total.saturating_sub(self.prev_total)
    }

    /// Returns the increase in youth headcount, floored at zero.
    pub fn increase_youth(&self) -> u32 {
        self.curr_youth.saturating_sub(self.prev_youth)
    }
}

/// Headcount observed in one year of the retention window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FollowUpYear {
    /// Years elapsed since the credit year (1 is the year after).
    pub year_index: u32,
    /// Total headcount at the end of this follow-up year.
    pub headcount_total: u32,
    /// Youth headcount at the end of this follow-up year. Carried for reporting only.
    #[serde(default)]
    pub headcount_youth: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_heads(prev_total: u32, curr_total: u32) -> HeadcountInputs {
        HeadcountInputs {
            prev_total,
            curr_total,
            prev_youth: 10,
            curr_youth: 14,
            converted_regular: 2,
            returned_from_parental_leave: 1,
        }
    }

    #[test]
    fn test_increase_total_when_headcount_grows() {
        let heads = create_test_heads(50, 60);
        assert_eq!(heads.increase_total(), 10);
    }

    #[test]
    fn test_increase_total_is_zero_when_headcount_declines() {
        let heads = create_test_heads(60, 50);
        assert_eq!(heads.increase_total(), 0);
    }

    #[test]
    fn test_increase_total_is_zero_when_headcount_holds() {
        let heads = create_test_heads(60, 60);
        assert_eq!(heads.increase_total(), 0);
    }

    #[test]
    fn test_increase_youth_floored_at_zero() {
        let heads = HeadcountInputs {
            prev_youth: 14,
            curr_youth: 10,
            ..create_test_heads(50, 60)
        };
        assert_eq!(heads.increase_youth(), 0);
    }

    #[test]
    fn test_deserialize_with_optional_counts_missing() {
        let json = r#"{ "prev_total": 50, "curr_total": 60 }"#;

        let heads: HeadcountInputs = serde_json::from_str(json).unwrap();
        assert_eq!(heads.prev_total, 50);
        assert_eq!(heads.curr_total, 60);
        assert_eq!(heads.prev_youth, 0);
        assert_eq!(heads.converted_regular, 0);
        assert_eq!(heads.returned_from_parental_leave, 0);
    }

    #[test]
    fn test_deserialize_rejects_negative_headcount() {
        let json = r#"{ "prev_total": -1, "curr_total": 60 }"#;

        let result: Result<HeadcountInputs, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn test_follow_up_year_youth_is_optional() {
        let json = r#"{ "year_index": 2, "headcount_total": 57 }"#;

        let year: FollowUpYear = serde_json::from_str(json).unwrap();
        assert_eq!(year.year_index, 2);
        assert_eq!(year.headcount_total, 57);
        assert_eq!(year.headcount_youth, None);
    }
}
