use rust_decimal::Decimal;
use serde_json::Value;

/* Share counts arrive either as numbers or as comma-formatted text
("1,234,567"), depending on the provider. Both sides of a comparison go
through this same normalization so "1,000" and 1000 compare equal.

Anything that still fails to parse becomes 0: a missing or garbled share
count must never abort a run. */
pub fn parse_shares(raw: &str) -> Decimal {
    let cleaned: String = raw
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',')
        .collect();
    if cleaned.is_empty() {
        return Decimal::ZERO;
    }
    return cleaned.parse::<Decimal>().unwrap_or(Decimal::ZERO);
}

/* Weights are informational only, so an unparseable weight is None
rather than 0. */
pub fn parse_weight(raw: &str) -> Option<Decimal> {
    let cleaned: String = raw
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',' && *c != '%')
        .collect();
    return cleaned.parse::<Decimal>().ok();
}

/* Providers disagree on whether numeric fields are JSON numbers or
strings; flatten either to text before normalizing. */
pub fn value_to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

pub fn shares_from_value(value: &Value) -> Decimal {
    return parse_shares(&value_to_text(value));
}

pub fn weight_from_value(value: &Value) -> Option<Decimal> {
    return parse_weight(&value_to_text(value));
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use serde_json::json;

    use super::*;

    #[test]
    fn strips_thousands_separators() {
        assert_eq!(parse_shares("1,234,567"), dec!(1234567));
        assert_eq!(parse_shares(" 1,000 "), dec!(1000));
    }

    #[test]
    fn plain_and_fractional_numbers() {
        assert_eq!(parse_shares("42"), dec!(42));
        assert_eq!(parse_shares("12.5"), dec!(12.5));
    }

    #[test]
    fn garbage_degrades_to_zero() {
        assert_eq!(parse_shares("abc"), Decimal::ZERO);
        assert_eq!(parse_shares(""), Decimal::ZERO);
        assert_eq!(parse_shares("--"), Decimal::ZERO);
    }

    #[test]
    fn comma_text_equals_plain_number() {
        assert_eq!(parse_shares("1,000"), parse_shares("1000"));
    }

    #[test]
    fn weight_accepts_percent_sign() {
        assert_eq!(parse_weight("12.34%"), Some(dec!(12.34)));
        assert_eq!(parse_weight("n/a"), None);
    }

    #[test]
    fn json_number_and_string_normalize_alike() {
        assert_eq!(shares_from_value(&json!("1,000")), dec!(1000));
        assert_eq!(shares_from_value(&json!(1000)), dec!(1000));
        assert_eq!(shares_from_value(&json!(null)), Decimal::ZERO);
    }
}
