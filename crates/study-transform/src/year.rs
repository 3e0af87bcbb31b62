//! Publication year derivation.
//!
//! Rules are tried in order and the first hit wins:
//!
//! 1. a number already in `[MIN_YEAR, MAX_YEAR]`
//! 2. `Date` matched against `YYYY-MM-DD HH:MM:SS`, `YYYY-MM-DD` and `YYYY`
//! 3. the same two rules against `temp_year`
//! 4. any `19xx` / `20xx` / `21xx` run inside `Date`, then `temp_year`
//!
//! Every candidate is range-checked. When nothing matches the caller omits
//! the year field entirely.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value as JsonValue;

pub const MIN_YEAR: i32 = 1800;
pub const MAX_YEAR: i32 = 2200;

static TIMESTAMP_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]{4})-([0-9]{2})-([0-9]{2})\s+[0-9]{2}:[0-9]{2}:[0-9]{2}$")
        .expect("Invalid timestamp regex")
});

static DATE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]{4})-([0-9]{2})-([0-9]{2})$").expect("Invalid date regex")
});

static BARE_YEAR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]{4})$").expect("Invalid year regex"));

static YEAR_RUN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(19|20|21)[0-9]{2}").expect("Invalid year run regex"));

fn in_range(year: i32) -> Option<i32> {
    (MIN_YEAR..=MAX_YEAR).contains(&year).then_some(year)
}

/// Derive the year from the primary date and the fallback year field.
pub fn derive_year(date: Option<&JsonValue>, temp_year: Option<&JsonValue>) -> Option<i32> {
    let sources = [date, temp_year];
    sources
        .iter()
        .flatten()
        .find_map(|value| year_from_value(value))
        .or_else(|| sources.iter().flatten().find_map(|value| scan_year(value)))
}

/// Strict rules: an in-range integral number, or a string matching one of
/// the literal date patterns.
pub fn year_from_value(value: &JsonValue) -> Option<i32> {
    match value {
        JsonValue::Number(number) => {
            let number = number.as_f64()?;
            if number.fract() != 0.0 {
                return None;
            }
            let year = number as i64;
            in_range(i32::try_from(year).ok()?)
        }
        JsonValue::String(text) => year_from_text(text),
        _ => None,
    }
}

/// Match `text` against the three literal date patterns.
pub fn year_from_text(text: &str) -> Option<i32> {
    [&*TIMESTAMP_REGEX, &*DATE_REGEX, &*BARE_YEAR_REGEX]
        .into_iter()
        .find_map(|regex| {
            let captures = regex.captures(text)?;
            let year = captures.get(1)?.as_str().parse::<i32>().ok()?;
            in_range(year)
        })
}

/// Last resort: the first plausible four-digit year anywhere in the value.
pub fn scan_year(value: &JsonValue) -> Option<i32> {
    let text = match value {
        JsonValue::String(text) => text.clone(),
        JsonValue::Number(number) => number.to_string(),
        _ => return None,
    };
    let found = YEAR_RUN_REGEX.find(&text)?;
    in_range(found.as_str().parse::<i32>().ok()?)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn literal_patterns() {
        assert_eq!(year_from_text("2019-05-01 12:00:00"), Some(2019));
        assert_eq!(year_from_text("2019-05-01"), Some(2019));
        assert_eq!(year_from_text("2019"), Some(2019));
        assert_eq!(year_from_text("2019-05"), None);
        assert_eq!(year_from_text(" 2019"), None);
        assert_eq!(year_from_text("1750-01-01"), None);
    }

    #[test]
    fn numeric_year_must_be_integral_and_in_range() {
        assert_eq!(year_from_value(&json!(2020)), Some(2020));
        assert_eq!(year_from_value(&json!(2020.5)), None);
        assert_eq!(year_from_value(&json!(1700)), None);
        assert_eq!(year_from_value(&json!(true)), None);
    }

    #[test]
    fn scan_finds_embedded_year() {
        assert_eq!(scan_year(&json!("Published in 2019 at...")), Some(2019));
        assert_eq!(scan_year(&json!("Spring 1750")), None);
        assert_eq!(scan_year(&json!(2020.5)), Some(2020));
    }

    #[test]
    fn falls_back_to_temp_year_before_scanning() {
        let date = json!("circa 2001 or so");
        let temp = json!("2005");
        assert_eq!(derive_year(Some(&date), Some(&temp)), Some(2005));
        assert_eq!(derive_year(Some(&date), None), Some(2001));
        assert_eq!(derive_year(None, Some(&json!("about 1999"))), Some(1999));
        assert_eq!(derive_year(None, None), None);
    }
}
