//! `B…/S…` rule-string notation.
//!
//! Neighborhoods with at most 9 neighbors use the classic digit form
//! (`B3/S23`). Larger neighborhoods need multi-digit counts, so any list
//! containing a comma is read as comma-separated (`B9,10,11,12/S7,8,9`).
//! A single multi-digit count carries a trailing comma (`B12,/S4`) so it
//! is not read as digits. [`Display`](std::fmt::Display) picks the digit
//! form whenever every threshold is a single digit.

use std::fmt;

use ndlife_core::ConfigError;

use crate::rule::RuleSet;

impl RuleSet {
    /// Parse a rule string, validating thresholds against `max_neighbors`.
    ///
    /// The birth and survival parts may appear in either order and the
    /// letters are case-insensitive. An empty list (`B/S23`) is allowed.
    ///
    /// # Examples
    ///
    /// ```
    /// use ndlife_rule::RuleSet;
    ///
    /// let r = RuleSet::parse("B9,10,11,12/S7,8,9", 26).unwrap();
    /// assert!(r.evaluate(false, 12));
    /// assert_eq!(r.to_string(), "B9,10,11,12/S7,8,9");
    /// ```
    pub fn parse(s: &str, max_neighbors: usize) -> Result<Self, ConfigError> {
        let (first, second) = s
            .trim()
            .split_once('/')
            .ok_or_else(|| invalid(format!("expected 'B…/S…', got {s:?}")))?;

        let mut birth = None;
        let mut survival = None;
        for part in [first, second] {
            let part = part.trim();
            let mut chars = part.chars();
            let slot = match chars.next().map(|c| c.to_ascii_uppercase()) {
                Some('B') => &mut birth,
                Some('S') => &mut survival,
                _ => return Err(invalid(format!("part {part:?} must start with 'B' or 'S'"))),
            };
            if slot.is_some() {
                return Err(invalid(format!("duplicate part in {s:?}")));
            }
            *slot = Some(parse_counts(chars.as_str())?);
        }

        match (birth, survival) {
            (Some(b), Some(s)) => RuleSet::new(b, s, max_neighbors),
            _ => Err(invalid(format!("{s:?} needs one 'B' and one 'S' part"))),
        }
    }
}

fn parse_counts(body: &str) -> Result<Vec<i64>, ConfigError> {
    let body = body.trim();
    if body.is_empty() {
        return Ok(Vec::new());
    }
    if body.contains(',') {
        let body = body.strip_suffix(',').unwrap_or(body);
        body.split(',')
            .map(|tok| {
                let tok = tok.trim();
                tok.parse::<i64>()
                    .map_err(|_| invalid(format!("{tok:?} is not a neighbor count")))
            })
            .collect()
    } else {
        body.chars()
            .map(|c| {
                c.to_digit(10)
                    .map(i64::from)
                    .ok_or_else(|| invalid(format!("{c:?} is not a digit")))
            })
            .collect()
    }
}

fn invalid(reason: String) -> ConfigError {
    ConfigError::InvalidRuleString { reason }
}

fn write_counts(f: &mut fmt::Formatter<'_>, counts: &[usize]) -> fmt::Result {
    if counts.iter().all(|&n| n < 10) {
        for n in counts {
            write!(f, "{n}")?;
        }
        return Ok(());
    }
    for (i, n) in counts.iter().enumerate() {
        if i > 0 {
            write!(f, ",")?;
        }
        write!(f, "{n}")?;
    }
    if counts.len() == 1 {
        write!(f, ",")?;
    }
    Ok(())
}

impl fmt::Display for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "B")?;
        write_counts(f, &self.birth())?;
        write!(f, "/S")?;
        write_counts(f, &self.survival())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_classic_life() {
        let r = RuleSet::parse("B3/S23", 8).unwrap();
        assert_eq!(r, RuleSet::new([3], [2, 3], 8).unwrap());
    }

    #[test]
    fn parts_in_either_order_and_case() {
        let a = RuleSet::parse("s23/b3", 8).unwrap();
        let b = RuleSet::parse("B3/S23", 8).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn empty_lists_allowed() {
        let r = RuleSet::parse("B/S", 8).unwrap();
        assert!(r.birth().is_empty() && r.survival().is_empty());
        assert_eq!(r.to_string(), "B/S");
    }

    #[test]
    fn comma_form_for_large_counts() {
        let r = RuleSet::parse("B5,12/S4,10,11", 26).unwrap();
        assert_eq!(r.birth(), vec![5, 12]);
        assert_eq!(r.survival(), vec![4, 10, 11]);
        assert_eq!(r.to_string(), "B5,12/S4,10,11");
    }

    #[test]
    fn out_of_range_digit_rejected_by_validation() {
        assert!(matches!(
            RuleSet::parse("B9/S23", 8),
            Err(ConfigError::ThresholdOutOfRange { value: 9, .. })
        ));
    }

    #[test]
    fn malformed_strings_rejected() {
        for bad in [
            "B3S23", "X3/S23", "B3/B23", "B3/Sx", "B1,,2/S3", "B,/S3", "B12,,/S3",
        ] {
            assert!(
                matches!(
                    RuleSet::parse(bad, 26),
                    Err(ConfigError::InvalidRuleString { .. })
                ),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn display_roundtrips_through_parse() {
        let r = RuleSet::proportional(80).unwrap();
        let text = r.to_string();
        assert_eq!(RuleSet::parse(&text, 80).unwrap(), r);
    }

    #[test]
    fn single_multi_digit_count_roundtrips() {
        let r = RuleSet::new([12], [4], 26).unwrap();
        let text = r.to_string();
        assert_eq!(text, "B12,/S4");
        assert_eq!(RuleSet::parse(&text, 26).unwrap(), r);

        let s = RuleSet::new([3], [10], 26).unwrap();
        assert_eq!(s.to_string(), "B3/S10,");
        assert_eq!(RuleSet::parse(&s.to_string(), 26).unwrap(), s);
    }

    #[test]
    fn trailing_comma_accepted_on_lists() {
        let r = RuleSet::parse("B5,12,/S4", 26).unwrap();
        assert_eq!(r.birth(), vec![5, 12]);
    }

    #[test]
    fn display_roundtrips_for_every_single_threshold() {
        for n in 0..=26i64 {
            let r = RuleSet::new([n], [n], 26).unwrap();
            assert_eq!(RuleSet::parse(&r.to_string(), 26).unwrap(), r, "count {n}");
        }
    }
}
