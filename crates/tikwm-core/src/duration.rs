//! Duration strings as written in config files.
//!
//! Accepts one or more `<number><unit>` pairs, e.g. `"60s"`, `"1h"`,
//! `"2h15m"`, `"1.5h"`, `"250ms"`. Units: `ns`, `us` (or `µs`), `ms`, `s`,
//! `m`, `h`. A bare `"0"` is zero. Negative values are rejected.

use std::time::Duration;

use thiserror::Error;

const NANOS_PER_MICRO: u128 = 1_000;
const NANOS_PER_MILLI: u128 = 1_000_000;
const NANOS_PER_SEC: u128 = 1_000_000_000;

/// Fraction digits beyond this are ignored (well below nanosecond precision for any unit).
const MAX_FRACTION_DIGITS: usize = 18;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DurationError {
    #[error("duration is empty")]
    Empty,

    #[error("invalid duration '{input}': expected a number at '{rest}'")]
    MissingNumber { input: String, rest: String },

    #[error("invalid duration '{input}': malformed number '{number}'")]
    InvalidNumber { input: String, number: String },

    #[error("invalid duration '{input}': missing unit after '{number}'")]
    MissingUnit { input: String, number: String },

    #[error("invalid duration '{input}': unknown unit '{unit}'")]
    UnknownUnit { input: String, unit: String },

    #[error("invalid duration '{input}': value out of range")]
    Overflow { input: String },
}

/// Parse a duration string such as `"60s"` or `"2h15m"`.
pub fn parse_duration(input: &str) -> Result<Duration, DurationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(DurationError::Empty);
    }
    if trimmed == "0" {
        return Ok(Duration::ZERO);
    }

    let mut total: u128 = 0;
    let mut rest = trimmed;
    while !rest.is_empty() {
        let number_len = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(rest.len());
        let (number, tail) = rest.split_at(number_len);
        if number.is_empty() || number == "." {
            return Err(DurationError::MissingNumber {
                input: input.to_string(),
                rest: rest.to_string(),
            });
        }

        if number.matches('.').count() > 1 {
            return Err(DurationError::InvalidNumber {
                input: input.to_string(),
                number: number.to_string(),
            });
        }

        let unit_len = tail
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(tail.len());
        let (unit, tail) = tail.split_at(unit_len);
        if unit.is_empty() {
            return Err(DurationError::MissingUnit {
                input: input.to_string(),
                number: number.to_string(),
            });
        }

        let scale = unit_nanos(unit).ok_or_else(|| DurationError::UnknownUnit {
            input: input.to_string(),
            unit: unit.to_string(),
        })?;
        let nanos = scaled_nanos(number, scale).ok_or_else(|| DurationError::Overflow {
            input: input.to_string(),
        })?;
        total = total
            .checked_add(nanos)
            .ok_or_else(|| DurationError::Overflow {
                input: input.to_string(),
            })?;
        rest = tail;
    }

    let nanos = u64::try_from(total).map_err(|_| DurationError::Overflow {
        input: input.to_string(),
    })?;
    Ok(Duration::from_nanos(nanos))
}

fn unit_nanos(unit: &str) -> Option<u128> {
    match unit {
        "ns" => Some(1),
        "us" | "µs" | "μs" => Some(NANOS_PER_MICRO),
        "ms" => Some(NANOS_PER_MILLI),
        "s" => Some(NANOS_PER_SEC),
        "m" => Some(60 * NANOS_PER_SEC),
        "h" => Some(3_600 * NANOS_PER_SEC),
        _ => None,
    }
}

/// `number` is digits with at most one `.`; returns `None` on overflow.
fn scaled_nanos(number: &str, scale: u128) -> Option<u128> {
    let (whole, fraction) = number.split_once('.').unwrap_or((number, ""));

    let whole_value = if whole.is_empty() {
        0
    } else {
        whole.parse::<u128>().ok()?
    };
    let mut nanos = whole_value.checked_mul(scale)?;

    let fraction = &fraction[..fraction.len().min(MAX_FRACTION_DIGITS)];
    if !fraction.is_empty() {
        let digits = u32::try_from(fraction.len()).ok()?;
        let fraction_value = fraction.parse::<u128>().ok()?;
        nanos = nanos.checked_add(fraction_value * scale / 10_u128.pow(digits))?;
    }
    Some(nanos)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parses_single_units() {
        assert_eq!(parse_duration("60s"), Ok(Duration::from_secs(60)));
        assert_eq!(parse_duration("30m"), Ok(Duration::from_secs(1_800)));
        assert_eq!(parse_duration("1h"), Ok(Duration::from_secs(3_600)));
        assert_eq!(parse_duration("250ms"), Ok(Duration::from_millis(250)));
        assert_eq!(parse_duration("15us"), Ok(Duration::from_micros(15)));
        assert_eq!(parse_duration("7ns"), Ok(Duration::from_nanos(7)));
    }

    #[test]
    fn parses_compound_and_fractional_values() {
        assert_eq!(parse_duration("2h15m"), Ok(Duration::from_secs(8_100)));
        assert_eq!(parse_duration("1m30s"), Ok(Duration::from_secs(90)));
        assert_eq!(parse_duration("1.5h"), Ok(Duration::from_secs(5_400)));
        assert_eq!(parse_duration(".5s"), Ok(Duration::from_millis(500)));
    }

    #[test]
    fn zero_and_surrounding_whitespace() {
        assert_eq!(parse_duration("0"), Ok(Duration::ZERO));
        assert_eq!(parse_duration("  45s "), Ok(Duration::from_secs(45)));
    }

    #[test]
    fn rejects_malformed_input() {
        assert_eq!(parse_duration(""), Err(DurationError::Empty));
        assert!(matches!(
            parse_duration("60"),
            Err(DurationError::MissingUnit { .. })
        ));
        assert!(matches!(
            parse_duration("5d"),
            Err(DurationError::UnknownUnit { unit, .. }) if unit == "d"
        ));
        assert!(matches!(
            parse_duration("-5s"),
            Err(DurationError::MissingNumber { .. })
        ));
        assert!(matches!(
            parse_duration("s"),
            Err(DurationError::MissingNumber { .. })
        ));
        assert!(matches!(
            parse_duration("1.2.3s"),
            Err(DurationError::InvalidNumber { .. })
        ));
    }

    #[test]
    fn rejects_values_beyond_u64_nanos() {
        assert!(matches!(
            parse_duration("99999999999h"),
            Err(DurationError::Overflow { .. })
        ));
    }
}
