//! Loose typing for hand-edited config values.
//!
//! Before merging, file values are shaped like the defaults they override:
//! null values are dropped so the default stays, and scalars are converted
//! between string, number and bool when the conversion is unambiguous
//! (`max_workers: "4"`, `check_for_updates: "false"`,
//! `daemon_poll_interval: 60`). Anything else is left alone and reported by
//! extraction.

use figment::value::{Dict, Num, Value};

/// Drop null entries from `parsed` and coerce scalars towards the type of
/// the matching entry in `defaults`. Keys without a default pass through.
pub fn normalize(parsed: Dict, defaults: &Dict) -> Dict {
    parsed
        .into_iter()
        .filter(|(_, value)| !matches!(value, Value::Empty(..)))
        .map(|(key, value)| {
            let value = match defaults.get(&key) {
                Some(default) => coerce(&value, default).unwrap_or(value),
                None => value,
            };
            (key, value)
        })
        .collect()
}

fn coerce(value: &Value, default: &Value) -> Option<Value> {
    match (default, value) {
        (Value::String(..), Value::Num(..) | Value::Bool(..) | Value::Char(..)) => {
            scalar_to_string(value).map(Value::from)
        }
        (Value::Num(..), Value::String(_, text)) => parse_integer(text),
        (Value::Num(..), Value::Bool(_, flag)) => Some(Value::from(u64::from(*flag))),
        (Value::Bool(..), Value::String(_, text)) => parse_bool(text).map(Value::from),
        (Value::Bool(..), Value::Num(_, number)) => {
            integer(number).map(|number| Value::from(number != 0))
        }
        _ => None,
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::Bool(_, flag) => Some(flag.to_string()),
        Value::Char(_, c) => Some(c.to_string()),
        Value::Num(_, Num::F32(number)) => Some(number.to_string()),
        Value::Num(_, Num::F64(number)) => Some(number.to_string()),
        Value::Num(_, number) => integer(number).map(|number| number.to_string()),
        _ => None,
    }
}

fn integer(number: &Num) -> Option<i128> {
    match *number {
        Num::U8(n) => Some(n.into()),
        Num::U16(n) => Some(n.into()),
        Num::U32(n) => Some(n.into()),
        Num::U64(n) => Some(n.into()),
        Num::U128(n) => i128::try_from(n).ok(),
        Num::USize(n) => i128::try_from(n).ok(),
        Num::I8(n) => Some(n.into()),
        Num::I16(n) => Some(n.into()),
        Num::I32(n) => Some(n.into()),
        Num::I64(n) => Some(n.into()),
        Num::I128(n) => Some(n),
        Num::ISize(n) => i128::try_from(n).ok(),
        _ => None,
    }
}

fn parse_integer(text: &str) -> Option<Value> {
    let text = text.trim();
    text.parse::<u64>()
        .map(Value::from)
        .or_else(|_| text.parse::<i64>().map(Value::from))
        .ok()
}

/// The spellings accepted by Go's `strconv.ParseBool`.
fn parse_bool(text: &str) -> Option<bool> {
    match text.trim() {
        "1" | "t" | "T" | "true" | "TRUE" | "True" => Some(true),
        "0" | "f" | "F" | "false" | "FALSE" | "False" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use figment::value::{Empty, Tag};
    use pretty_assertions::assert_eq;

    use super::*;

    fn as_integer(value: &Value) -> Option<i128> {
        match value {
            Value::Num(_, number) => integer(number),
            _ => None,
        }
    }

    fn as_bool(value: &Value) -> Option<bool> {
        match value {
            Value::Bool(_, flag) => Some(*flag),
            _ => None,
        }
    }

    fn defaults() -> Dict {
        Dict::from([
            ("editor".to_string(), Value::from("")),
            ("max_workers".to_string(), Value::from(8_u64)),
            ("check_for_updates".to_string(), Value::from(true)),
        ])
    }

    #[test]
    fn null_entries_are_dropped() {
        let parsed = Dict::from([
            ("editor".to_string(), Value::Empty(Tag::Default, Empty::Unit)),
            ("max_workers".to_string(), Value::Empty(Tag::Default, Empty::None)),
        ]);
        assert!(normalize(parsed, &defaults()).is_empty());
    }

    #[test]
    fn strings_become_numbers_and_bools() {
        let parsed = Dict::from([
            ("max_workers".to_string(), Value::from(" 4 ")),
            ("check_for_updates".to_string(), Value::from("false")),
        ]);
        let normalized = normalize(parsed, &defaults());
        assert_eq!(as_integer(&normalized["max_workers"]), Some(4));
        assert_eq!(as_bool(&normalized["check_for_updates"]), Some(false));
    }

    #[test]
    fn scalars_become_strings() {
        let parsed = Dict::from([("editor".to_string(), Value::from(60_u64))]);
        let normalized = normalize(parsed, &defaults());
        assert_eq!(normalized["editor"].as_str(), Some("60"));

        let parsed = Dict::from([("editor".to_string(), Value::from(true))]);
        let normalized = normalize(parsed, &defaults());
        assert_eq!(normalized["editor"].as_str(), Some("true"));
    }

    #[test]
    fn numbers_and_bools_cross_over() {
        let parsed = Dict::from([
            ("max_workers".to_string(), Value::from(true)),
            ("check_for_updates".to_string(), Value::from(0_u64)),
        ]);
        let normalized = normalize(parsed, &defaults());
        assert_eq!(as_integer(&normalized["max_workers"]), Some(1));
        assert_eq!(as_bool(&normalized["check_for_updates"]), Some(false));
    }

    #[test]
    fn unconvertible_and_unknown_values_pass_through() {
        let parsed = Dict::from([
            ("max_workers".to_string(), Value::from("lots")),
            ("check_for_updates".to_string(), Value::from("maybe")),
            ("legacy".to_string(), Value::from("kept")),
        ]);
        let normalized = normalize(parsed, &defaults());
        assert_eq!(normalized["max_workers"].as_str(), Some("lots"));
        assert_eq!(normalized["check_for_updates"].as_str(), Some("maybe"));
        assert_eq!(normalized["legacy"].as_str(), Some("kept"));
    }
}
