//! Progress estimate scraped from prediction logs.
//!
//! The service streams tqdm-style log lines. The estimate takes the last log
//! line, keeps whatever precedes the first `"it"`, reads it as a number and
//! doubles it. The log format is not versioned, so the steps are kept
//! literal rather than "fixed".

/// Estimate in percent. Absent logs read as `Some(0.0)`; a prefix that is
/// not a number yields `None` (nothing to display).
pub fn parse_logs(logs: Option<&str>) -> Option<f32> {
    let Some(logs) = logs else {
        return Some(0.0);
    };

    let last_line = logs.split('\n').next_back().unwrap_or_default();
    let prefix = last_line.split("it").next().unwrap_or_default();

    parse_number(prefix).map(|n| n * 2.0)
}

// Blank text counts as zero, surrounding whitespace is ignored.
fn parse_number(text: &str) -> Option<f32> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }

    trimmed.parse::<f32>().ok().filter(|n| n.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_logs_are_zero() {
        assert_eq!(parse_logs(None), Some(0.0));
    }

    #[test]
    fn test_doubles_leading_number_of_last_line() {
        assert_eq!(parse_logs(Some("45it/s")), Some(90.0));
        assert_eq!(parse_logs(Some("10it/s")), Some(20.0));
        assert_eq!(parse_logs(Some("Using seed: 1234\n3it/s\n25it/s")), Some(50.0));
    }

    #[test]
    fn test_only_last_line_counts() {
        assert_eq!(parse_logs(Some("40it/s\n")), Some(0.0));
        assert_eq!(parse_logs(Some("40it/s\nloading weights")), None);
    }

    #[test]
    fn test_fractional_and_padded_numbers() {
        assert_eq!(parse_logs(Some(" 12.5 it/s")), Some(25.0));
    }

    #[test]
    fn test_non_numeric_prefix_has_no_estimate() {
        let bar = " 45%|████      | 23/50 [00:05<00:06, 4.30it/s]";
        assert_eq!(parse_logs(Some(bar)), None);
        assert_eq!(parse_logs(Some("inf it")), None);
    }

    #[test]
    fn test_full_range_for_well_formed_lines() {
        for n in 0..=50u32 {
            let estimate = parse_logs(Some(format!("{n}it/s").as_str())).unwrap();
            assert!((0.0..=100.0).contains(&estimate));
        }
    }
}
