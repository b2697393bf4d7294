pub mod sign;

use rust_decimal::{prelude::FromPrimitive, Decimal};
use serde::Deserialize;


pub fn deserialize_decimal_from_string<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Decimal::from_str_exact(&s).map_err(D::Error::custom),
        serde_json::Value::Number(n) => n
            .as_f64()
            .and_then(Decimal::from_f64)
            .ok_or_else(|| D::Error::custom("Invalid number")),
        other => Err(D::Error::custom(format!(
            "unexpected type for Decimal: {:?}",
            other
        ))),
    }
}

/// Escape special characters for Telegram MarkdownV2
pub fn escape_markdown(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '_' | '*' | '[' | ']' | '(' | ')' | '~' | '`' | '>' | '#' | '+' | '-' | '=' | '|' | '{' | '}' | '.' | '!' | '\\' => {
                format!("\\{}", c)
            }
            _ => c.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[derive(Deserialize)]
    struct Amount {
        #[serde(deserialize_with = "deserialize_decimal_from_string")]
        value: Decimal,
    }

    #[test]
    fn test_decimal_from_string_and_number() {
        let a: Amount = serde_json::from_str(r#"{"value":"0.00012300"}"#).unwrap();
        assert_eq!(a.value, dec!(0.000123));

        let b: Amount = serde_json::from_str(r#"{"value":2.5}"#).unwrap();
        assert_eq!(b.value, dec!(2.5));

        assert!(serde_json::from_str::<Amount>(r#"{"value":"abc"}"#).is_err());
        assert!(serde_json::from_str::<Amount>(r#"{"value":null}"#).is_err());
    }

    #[test]
    fn test_escape_markdown() {
        assert_eq!(escape_markdown("Ada L."), "Ada L\\.");
        assert_eq!(escape_markdown("a_b*c"), "a\\_b\\*c");
        assert_eq!(escape_markdown("plain"), "plain");
    }
}
