//! Response validation and status translation.
//!
//! The status API answers with `{"homeworks": [...], "current_date": <unix>}`.
//! Only the first work item is consumed per cycle. Payloads stay as
//! [`serde_json::Value`] so each shape violation maps to its own
//! [`BotError`] kind.

use crate::error::{BotError, Result};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Review status of a submitted homework (the verdict table).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeworkStatus {
    Approved,
    Reviewing,
    Rejected,
}

impl HomeworkStatus {
    /// Every recognized status.
    pub const ALL: [Self; 3] = [Self::Approved, Self::Reviewing, Self::Rejected];

    /// Wire name used by the API.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Approved => "approved",
            Self::Reviewing => "reviewing",
            Self::Rejected => "rejected",
        }
    }

    /// Human-readable verdict sent to the recipient.
    pub fn verdict(self) -> &'static str {
        match self {
            Self::Approved => "Работа проверена: ревьюеру всё понравилось. Ура!",
            Self::Reviewing => "Работа взята на проверку ревьюером.",
            Self::Rejected => "Работа проверена: у ревьюера есть замечания.",
        }
    }
}

impl FromStr for HomeworkStatus {
    type Err = BotError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| BotError::UnrecognizedStatus(s.to_owned()))
    }
}

impl fmt::Display for HomeworkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validate the API response and return its most recent work item.
///
/// The mapping check runs before any key access.
///
/// # Errors
///
/// - [`BotError::MalformedResponse`] if the response is not a mapping or
///   `homeworks` is not a sequence
/// - [`BotError::MissingKey`] if `homeworks` is absent
/// - [`BotError::EmptyWorkList`] if `homeworks` is empty
pub fn check_response(response: &Value) -> Result<&Value> {
    let Some(body) = response.as_object() else {
        return Err(BotError::MalformedResponse(format!(
            "ответ API не является словарём ({})",
            json_kind(response)
        )));
    };
    let homeworks = body
        .get("homeworks")
        .ok_or_else(|| BotError::MissingKey("homeworks".to_owned()))?;
    let Some(items) = homeworks.as_array() else {
        return Err(BotError::MalformedResponse(format!(
            "homeworks не является списком ({})",
            json_kind(homeworks)
        )));
    };
    items.first().ok_or(BotError::EmptyWorkList)
}

/// Build the notification text for a work item.
///
/// # Errors
///
/// - [`BotError::MissingKey`] if `homework_name` is absent
/// - [`BotError::MalformedResponse`] if `homework_name` is not a string
/// - [`BotError::UnrecognizedStatus`] if `status` is absent or not in the verdict table
pub fn parse_status(homework: &Value) -> Result<String> {
    let name = homework
        .get("homework_name")
        .ok_or_else(|| BotError::MissingKey("homework_name".to_owned()))?;
    let Some(name) = name.as_str() else {
        return Err(BotError::MalformedResponse(format!(
            "homework_name не является строкой ({})",
            json_kind(name)
        )));
    };

    let status: HomeworkStatus = match homework.get("status") {
        Some(Value::String(raw)) => raw.parse()?,
        Some(other) => return Err(BotError::UnrecognizedStatus(other.to_string())),
        None => return Err(BotError::UnrecognizedStatus("<отсутствует>".to_owned())),
    };

    Ok(format!(
        "Изменился статус проверки работы \"{name}\". {}",
        status.verdict()
    ))
}

/// Server-side timestamp of the response, when present.
pub fn current_date(response: &Value) -> Option<i64> {
    response.get("current_date").and_then(Value::as_i64)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use serde_json::json;

    #[test]
    fn check_response_returns_first_item_unchanged() {
        let response = json!({
            "homeworks": [
                {"homework_name": "X", "status": "approved"},
                {"homework_name": "Y", "status": "rejected"}
            ],
            "current_date": 1_700_000_000
        });
        let item = check_response(&response).unwrap();
        assert_eq!(item, &json!({"homework_name": "X", "status": "approved"}));
    }

    #[test]
    fn check_response_rejects_empty_list() {
        let response = json!({"homeworks": []});
        assert!(matches!(
            check_response(&response),
            Err(BotError::EmptyWorkList)
        ));
    }

    #[test]
    fn check_response_rejects_non_mapping() {
        let response = json!([{"homeworks": []}]);
        assert!(matches!(
            check_response(&response),
            Err(BotError::MalformedResponse(_))
        ));
    }

    #[test]
    fn check_response_requires_homeworks_key() {
        let response = json!({"current_date": 1});
        match check_response(&response) {
            Err(BotError::MissingKey(key)) => assert_eq!(key, "homeworks"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn check_response_requires_sequence() {
        let response = json!({"homeworks": {"homework_name": "X"}});
        let err = check_response(&response).unwrap_err();
        assert!(matches!(err, BotError::MalformedResponse(_)));
        assert!(err.to_string().contains("homeworks"));
    }

    #[test]
    fn parse_status_formats_approved() {
        let item = json!({"homework_name": "X", "status": "approved"});
        assert_eq!(
            parse_status(&item).unwrap(),
            "Изменился статус проверки работы \"X\". Работа проверена: ревьюеру всё понравилось. Ура!"
        );
    }

    #[test]
    fn parse_status_covers_verdict_table() {
        for status in HomeworkStatus::ALL {
            let item = json!({"homework_name": "hw", "status": status.as_str()});
            let message = parse_status(&item).unwrap();
            assert!(message.ends_with(status.verdict()), "{message}");
        }
    }

    #[test]
    fn parse_status_rejects_unknown_status() {
        let item = json!({"homework_name": "X", "status": "unknown"});
        match parse_status(&item) {
            Err(BotError::UnrecognizedStatus(s)) => assert_eq!(s, "unknown"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn parse_status_rejects_missing_status() {
        let item = json!({"homework_name": "X"});
        assert!(matches!(
            parse_status(&item),
            Err(BotError::UnrecognizedStatus(_))
        ));
    }

    #[test]
    fn parse_status_requires_homework_name() {
        let item = json!({"status": "approved"});
        assert!(matches!(parse_status(&item), Err(BotError::MissingKey(_))));
    }

    #[test]
    fn parse_status_rejects_non_string_name() {
        let item = json!({"homework_name": 7, "status": "approved"});
        assert!(matches!(
            parse_status(&item),
            Err(BotError::MalformedResponse(_))
        ));
    }

    #[test]
    fn status_parses_from_wire_name() {
        let status: HomeworkStatus = "reviewing".parse().unwrap();
        assert_eq!(status, HomeworkStatus::Reviewing);
        assert_eq!(status.to_string(), "reviewing");
    }

    #[test]
    fn current_date_is_optional() {
        assert_eq!(current_date(&json!({"current_date": 42})), Some(42));
        assert_eq!(current_date(&json!({"homeworks": []})), None);
        assert_eq!(current_date(&json!([1, 2])), None);
    }
}
