use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Accepts `YYYY-MM-DD` or any timestamp starting with it. Empty, null or unparsable
/// text is `None`.
pub(crate) fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    let text = match raw.as_ref().and_then(Value::as_str).map(str::trim) {
        Some(text) if !text.is_empty() => text,
        _ => return Ok(None),
    };

    let day = text.get(..10).unwrap_or(text);
    Ok(NaiveDate::parse_from_str(day, "%Y-%m-%d").ok())
}

/// Null reads as the type's default.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Identifiers arrive as strings or numbers.
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(text) => Ok(text),
        Value::Number(number) => Ok(number.to_string()),
        Value::Null => Ok(String::new()),
        other => Err(serde::de::Error::custom(format!("invalid identifier: {}", other))),
    }
}

/// Optional identifier that may arrive as a string or a number.
pub(crate) fn optional_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => Ok(Some(text)),
        Some(Value::Number(number)) => Ok(Some(number.to_string())),
        Some(other) => Err(serde::de::Error::custom(format!("invalid identifier: {}", other))),
    }
}
