//! Range literal parsing for the `<@` operator
//!
//! Values look like `["2015-12-01 00:00:00","2015-12-02 01:00:00")` or
//! `[-1,5]`. A square bracket is an inclusive bound, a parenthesis an
//! exclusive one. Timestamps are rewritten to the ISO form the backend
//! expects; other endpoints are passed through as strings, which is what
//! numeric ranges rely on.

use chrono::NaiveDateTime;
use esfdw_query::{RangeBounds, RangeOp, Scalar};
use thiserror::Error;

/// Endpoint formats produced when a timestamp range is rendered as text
const ENDPOINT_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M:%S%.f"];

const CANONICAL_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum IntervalError {
    #[error("Range literal {0:?} does not start with '[' or '('")]
    MissingLowerBracket(String),

    #[error("Range literal {0:?} does not end with ']' or ')'")]
    MissingUpperBracket(String),

    #[error("Range literal {0:?} must contain exactly one ','")]
    Separator(String),
}

/// Parse a range literal into range filter bounds.
///
/// An empty endpoint is an unbounded side and contributes no bound.
pub fn parse_interval(literal: &str) -> Result<RangeBounds, IntervalError> {
    let lower_op = match literal.chars().next() {
        Some('[') => RangeOp::Gte,
        Some('(') => RangeOp::Gt,
        _ => return Err(IntervalError::MissingLowerBracket(literal.to_string())),
    };
    let upper_op = match literal.chars().last() {
        Some(']') if literal.len() > 1 => RangeOp::Lte,
        Some(')') if literal.len() > 1 => RangeOp::Lt,
        _ => return Err(IntervalError::MissingUpperBracket(literal.to_string())),
    };

    let inner = &literal[1..literal.len() - 1];
    let (start, end) = inner
        .split_once(',')
        .filter(|(_, end)| !end.contains(','))
        .ok_or_else(|| IntervalError::Separator(literal.to_string()))?;

    let mut bounds = RangeBounds::new();
    for (op, endpoint) in [(lower_op, start), (upper_op, end)] {
        let endpoint = endpoint.trim_matches('"');
        if !endpoint.is_empty() {
            bounds.insert(op, Scalar::String(format_endpoint(endpoint)));
        }
    }
    Ok(bounds)
}

/// Canonical ISO form for timestamp endpoints, anything else unchanged
pub fn format_endpoint(endpoint: &str) -> String {
    ENDPOINT_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(endpoint, fmt).ok())
        .map(|ts| ts.format(CANONICAL_FORMAT).to_string())
        .unwrap_or_else(|| endpoint.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds(pairs: &[(RangeOp, &str)]) -> RangeBounds {
        pairs
            .iter()
            .map(|(op, value)| (*op, Scalar::from(*value)))
            .collect()
    }

    #[test]
    fn test_timestamp_range_half_open() {
        assert_eq!(
            parse_interval(r#"["2015-12-01 00:00:00","2015-12-02 01:00:00.123456")"#).unwrap(),
            bounds(&[
                (RangeOp::Gte, "2015-12-01T00:00:00.000000"),
                (RangeOp::Lt, "2015-12-02T01:00:00.123456"),
            ])
        );
    }

    #[test]
    fn test_timestamp_range_unquoted() {
        assert_eq!(
            parse_interval("[2015-12-01 00:00:00,2015-12-02 01:00:00.123456)").unwrap(),
            bounds(&[
                (RangeOp::Gte, "2015-12-01T00:00:00.000000"),
                (RangeOp::Lt, "2015-12-02T01:00:00.123456"),
            ])
        );
    }

    #[test]
    fn test_bracket_combinations() {
        assert_eq!(
            parse_interval(r#"["2015-12-01 00:00:00.000001","2015-12-02 01:00:00"]"#).unwrap(),
            bounds(&[
                (RangeOp::Gte, "2015-12-01T00:00:00.000001"),
                (RangeOp::Lte, "2015-12-02T01:00:00.000000"),
            ])
        );
        assert_eq!(
            parse_interval(r#"("2015-12-01 00:00:00","2015-12-02 01:00:00"]"#).unwrap(),
            bounds(&[
                (RangeOp::Gt, "2015-12-01T00:00:00.000000"),
                (RangeOp::Lte, "2015-12-02T01:00:00.000000"),
            ])
        );
        assert_eq!(
            parse_interval(r#"("2015-12-01 00:00:00.123456","2015-12-02 01:00:00.987654")"#)
                .unwrap(),
            bounds(&[
                (RangeOp::Gt, "2015-12-01T00:00:00.123456"),
                (RangeOp::Lt, "2015-12-02T01:00:00.987654"),
            ])
        );
    }

    #[test]
    fn test_numeric_range_passes_through() {
        assert_eq!(
            parse_interval("[-1,5]").unwrap(),
            bounds(&[(RangeOp::Gte, "-1"), (RangeOp::Lte, "5")])
        );
    }

    #[test]
    fn test_unbounded_side_is_omitted() {
        assert_eq!(parse_interval("[10,)").unwrap(), bounds(&[(RangeOp::Gte, "10")]));
    }

    #[test]
    fn test_malformed_literals() {
        assert_eq!(
            parse_interval("1,5]"),
            Err(IntervalError::MissingLowerBracket("1,5]".to_string()))
        );
        assert_eq!(
            parse_interval("[1,5"),
            Err(IntervalError::MissingUpperBracket("[1,5".to_string()))
        );
        assert_eq!(parse_interval("["), Err(IntervalError::MissingUpperBracket("[".to_string())));
        assert_eq!(parse_interval("[15]"), Err(IntervalError::Separator("[15]".to_string())));
        assert_eq!(parse_interval("[1,2,3]"), Err(IntervalError::Separator("[1,2,3]".to_string())));
        assert!(parse_interval("").is_err());
    }

    #[test]
    fn test_format_endpoint() {
        assert_eq!(format_endpoint("2015-12-01 00:00:00"), "2015-12-01T00:00:00.000000");
        assert_eq!(format_endpoint("2015-12-01 00:00:00.5"), "2015-12-01T00:00:00.500000");
        assert_eq!(format_endpoint("2015-12-01"), "2015-12-01");
        assert_eq!(format_endpoint("2015-12-01 00:00:00+00"), "2015-12-01 00:00:00+00");
    }
}
