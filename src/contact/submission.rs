//! Contact form payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::ContactError;

/// Body of `POST /api/contact`. Every field is optional at the wire level so
/// that missing fields are reported as a 400 instead of a parse failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, alias = "optionalMessage")]
    pub message: Option<String>,
}

/// One stored submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactRecord {
    pub name: String,
    pub email: String,
    /// Stored as `optionalMessage`, `null` when the visitor left it blank
    #[serde(default, rename = "optionalMessage", alias = "message")]
    pub message: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl ContactRequest {
    /// Validate and stamp the submission
    pub fn into_record(self, timestamp: DateTime<Utc>) -> Result<ContactRecord, ContactError> {
        let name = non_blank(self.name).ok_or(ContactError::MissingFields)?;
        let email = non_blank(self.email).ok_or(ContactError::MissingFields)?;
        Ok(ContactRecord {
            name,
            email,
            message: non_blank(self.message),
            timestamp,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Response body for every outcome
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Envelope {
    pub fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> ContactRequest {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_valid_request() {
        let now = Utc::now();
        let record = parse(r#"{"name":" Ada ","email":"ada@example.com","message":"Hi"}"#)
            .into_record(now)
            .unwrap();
        assert_eq!(record.name, "Ada");
        assert_eq!(record.message.as_deref(), Some("Hi"));
        assert_eq!(record.timestamp, now);
    }

    #[test]
    fn test_optional_message_alias() {
        let record = parse(r#"{"name":"A","email":"a@b.co","optionalMessage":"yo"}"#)
            .into_record(Utc::now())
            .unwrap();
        assert_eq!(record.message.as_deref(), Some("yo"));
    }

    #[test]
    fn test_missing_or_blank_fields() {
        for json in [
            r#"{"email":"a@b.co"}"#,
            r#"{"name":"A"}"#,
            r#"{"name":"   ","email":"a@b.co"}"#,
            r#"{}"#,
        ] {
            let err = parse(json).into_record(Utc::now()).unwrap_err();
            assert!(matches!(err, ContactError::MissingFields), "{json}");
        }
    }

    #[test]
    fn test_envelope_shape() {
        assert_eq!(serde_json::to_string(&Envelope::ok()).unwrap(), r#"{"success":true}"#);
        assert_eq!(
            serde_json::to_string(&Envelope::failure("nope")).unwrap(),
            r#"{"success":false,"error":"nope"}"#
        );
    }

    #[test]
    fn test_record_blank_message_is_null() {
        let record = parse(r#"{"name":"A","email":"a@b.co","message":""}"#)
            .into_record(Utc::now())
            .unwrap();
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json.get("optionalMessage"), Some(&serde_json::Value::Null));
        assert!(json.get("message").is_none());
        assert!(json.get("timestamp").is_some());
    }

    #[test]
    fn test_record_stores_optional_message_key() {
        let record = parse(r#"{"name":"A","email":"a@b.co","optionalMessage":"hi"}"#)
            .into_record(Utc::now())
            .unwrap();
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["optionalMessage"], "hi");
        assert!(json.get("message").is_none());

        // Files written with the older key still load
        let old = r#"{"name":"A","email":"a@b.co","message":"hi","timestamp":"2026-01-01T00:00:00Z"}"#;
        let loaded: ContactRecord = serde_json::from_str(old).unwrap();
        assert_eq!(loaded.message.as_deref(), Some("hi"));
    }
}
