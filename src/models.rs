//! Wire types shared with the mnt dashboard API.
//!
//! Every endpoint answers with the same envelope shape; `message` and `data`
//! are omitted on the wire when absent, so both are `Option` here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiEnvelope<T> {
    pub status: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiEnvelope<T> {
    /// Envelope synthesized when the body could not be decoded.
    pub fn synthetic(status: u16, status_text: &str) -> Self {
        Self {
            status,
            message: Some(status_text.to_string()),
            data: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Auth
// ---------------------------------------------------------------------------

/// Token + expiry pair as issued by `auth/login` and persisted under the
/// `"token"` localStorage key.  `exp_at` stays a string so the stored value
/// round-trips byte-for-byte; expiry comparison parses it lazily.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthResponse {
    pub token: String,
    pub exp_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthPostBody {
    pub username: String,
    pub totp: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserInfo {
    pub id: String,
    pub username: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Websites
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebsiteBackend {
    pub url: String,
    pub balance: usize,
    pub main: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Website {
    pub id: String,
    pub name: Option<String>,
    pub hosts: Vec<String>,
    pub ports: Vec<u16>,
    pub certificates: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub backends: Vec<WebsiteBackend>,
    #[serde(default)]
    pub config: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebsiteCreateRequest {
    pub name: Option<String>,
    pub hosts: Vec<String>,
    pub ports: Vec<u16>,
    pub certificates: Vec<String>,
    pub backends: Vec<WebsiteBackend>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<Value>,
}

// ---------------------------------------------------------------------------
// Logs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogContentParam {
    pub key: String,
    pub value: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogContentData {
    pub content: String,
    pub params: Vec<LogContentParam>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "type", content = "content")]
pub enum LogContent {
    Raw(String),
    Data(LogContentData),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Log {
    pub id: String,
    pub user_id: String,
    pub content: LogContent,
    pub created_at: DateTime<Utc>,
    pub address: String,
}

impl Log {
    /// Flatten the log content into a displayable line.
    pub fn display_content(&self) -> String {
        match &self.content {
            LogContent::Raw(s) => s.clone(),
            LogContent::Data(d) => d.content.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// DNS providers
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DnsProvider {
    pub id: String,
    #[serde(rename = "type")]
    pub provider_type: String,
    pub config: Value,
    pub domains: Vec<String>,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DnsProviderCreateRequest {
    pub name: String,
    pub domains: Vec<String>,
    #[serde(rename = "type")]
    pub provider_type: String,
    pub config: Value,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn envelope_with_message_and_data() {
        let env: ApiEnvelope<Vec<u32>> =
            serde_json::from_value(json!({"status": 200, "data": [3, 1, 2]})).unwrap();
        assert_eq!(env.status, 200);
        assert_eq!(env.message, None);
        // order comes back exactly as sent
        assert_eq!(env.data, Some(vec![3, 1, 2]));
    }

    #[test]
    fn envelope_without_data() {
        let env: ApiEnvelope<UserInfo> =
            serde_json::from_value(json!({"status": 401, "message": "Unauthorized"})).unwrap();
        assert_eq!(env.status, 401);
        assert_eq!(env.message.as_deref(), Some("Unauthorized"));
        assert!(env.data.is_none());
    }

    #[test]
    fn envelope_serializes_without_empty_fields() {
        let env = ApiEnvelope::<u32> {
            status: 200,
            message: None,
            data: None,
        };
        assert_eq!(serde_json::to_string(&env).unwrap(), r#"{"status":200}"#);
    }

    #[test]
    fn log_content_tagged_variants() {
        let raw: LogContent =
            serde_json::from_value(json!({"type": "raw", "content": "hello"})).unwrap();
        assert!(matches!(raw, LogContent::Raw(ref s) if s == "hello"));

        let data: LogContent = serde_json::from_value(json!({
            "type": "data",
            "content": {"content": "login from {addr}", "params": [{"key": "addr", "value": "1.2.3.4"}]}
        }))
        .unwrap();
        match data {
            LogContent::Data(d) => {
                assert_eq!(d.content, "login from {addr}");
                assert_eq!(d.params.len(), 1);
            }
            _ => panic!("wrong variant"),
        }
    }

    #[test]
    fn dns_provider_type_field_rename() {
        let p: DnsProvider = serde_json::from_value(json!({
            "id": "x1",
            "type": "tencent",
            "config": {"secret_id": "a", "secret_key": "b"},
            "domains": ["example.com"],
            "name": "main",
            "created_at": "2025-01-01T00:00:00Z",
            "updated_at": "2025-01-01T00:00:00Z"
        }))
        .unwrap();
        assert_eq!(p.provider_type, "tencent");

        let req = DnsProviderCreateRequest {
            name: "main".into(),
            domains: vec!["example.com".into()],
            provider_type: "tencent".into(),
            config: json!({}),
        };
        let v = serde_json::to_value(&req).unwrap();
        assert_eq!(v["type"], "tencent");
    }
}
