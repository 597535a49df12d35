//! Inbound Uptime Kuma and outbound Google Chat model types.

use serde::{de::Error as _, Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

const NOTIFICATION_FIELDS: &[&str] = &["heartbeat", "monitor", "msg"];
const HEARTBEAT_FIELDS: &[&str] = &["monitorID", "status", "time", "msg", "ping"];
const MONITOR_FIELDS: &[&str] = &["id", "name", "url", "hostname", "port", "type"];

/// Decode `null` the same way as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// ============================================================================
// Uptime Kuma
// ============================================================================

/// A notification posted by Uptime Kuma's webhook provider.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UptimeKumaNotification {
    #[serde(deserialize_with = "null_as_default")]
    pub heartbeat: Heartbeat,
    #[serde(deserialize_with = "null_as_default")]
    pub monitor: Monitor,
    #[serde(deserialize_with = "null_as_default")]
    pub msg: String,
}

impl UptimeKumaNotification {
    /// Decode a webhook body.
    ///
    /// Object keys match field names case-insensitively and a later key wins
    /// over an earlier one naming the same field. A bare `null` body decodes
    /// to an empty notification.
    pub fn from_json(body: &[u8]) -> serde_json::Result<Self> {
        let mut value: Value = serde_json::from_slice(body)?;

        match &mut value {
            Value::Null => return Ok(Self::default()),
            Value::Object(map) => {
                fold_keys(map, NOTIFICATION_FIELDS);
                let nested = [("heartbeat", HEARTBEAT_FIELDS), ("monitor", MONITOR_FIELDS)];
                for (key, fields) in nested {
                    if let Some(Value::Object(inner)) = map.get_mut(key) {
                        fold_keys(inner, fields);
                    }
                }
            }
            other => {
                return Err(serde_json::Error::custom(format!(
                    "expected a notification object, found {}",
                    json_type(other)
                )))
            }
        }

        Self::deserialize(value)
    }
}

/// Rename keys that match a known field ignoring ASCII case.
fn fold_keys(map: &mut Map<String, Value>, fields: &[&str]) {
    *map = std::mem::take(map)
        .into_iter()
        .map(|(key, value)| {
            let key = fields
                .iter()
                .find(|field| field.eq_ignore_ascii_case(&key))
                .map_or(key, |field| field.to_string());
            (key, value)
        })
        .collect();
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Heartbeat {
    #[serde(rename = "monitorID", deserialize_with = "null_as_default")]
    pub monitor_id: i64,
    /// 1 means up, anything else is treated as down.
    #[serde(deserialize_with = "null_as_default")]
    pub status: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub time: String,
    #[serde(deserialize_with = "null_as_default")]
    pub msg: String,
    /// Response time in milliseconds.
    #[serde(deserialize_with = "null_as_default")]
    pub ping: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Monitor {
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub hostname: String,
    #[serde(deserialize_with = "null_as_default")]
    pub port: i64,
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub monitor_type: String,
}

// ============================================================================
// Google Chat (cardsV2)
// ============================================================================

/// A Google Chat message carrying preview text and a single card.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    /// Plain text shown in notification previews.
    pub text: String,
    pub cards_v2: Vec<CardV2>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardV2 {
    pub card_id: String,
    pub card: Card,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Card {
    pub header: CardHeader,
    pub sections: Vec<CardSection>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardHeader {
    pub title: String,
    pub subtitle: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardSection {
    pub widgets: Vec<Widget>,
}

/// One renderable unit within a card section.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Widget {
    DecoratedText(DecoratedText),
    TextParagraph(TextParagraph),
    ButtonList(ButtonList),
}

impl Widget {
    pub fn labeled(label: &str, text: impl Into<String>) -> Self {
        Widget::DecoratedText(DecoratedText {
            top_label: label.to_string(),
            text: text.into(),
        })
    }

    pub fn paragraph(text: impl Into<String>) -> Self {
        Widget::TextParagraph(TextParagraph { text: text.into() })
    }

    /// A button list holding a single button that opens `url`.
    pub fn link_button(label: &str, url: impl Into<String>) -> Self {
        Widget::ButtonList(ButtonList {
            buttons: vec![Button {
                text: label.to_string(),
                on_click: OnClick {
                    open_link: OpenLink { url: url.into() },
                },
            }],
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecoratedText {
    pub top_label: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextParagraph {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ButtonList {
    pub buttons: Vec<Button>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Button {
    pub text: String,
    pub on_click: OnClick,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OnClick {
    pub open_link: OpenLink,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OpenLink {
    pub url: String,
}

/// Minimal payload used when the inbound body is not a Kuma notification.
#[derive(Debug, Clone, Serialize)]
pub struct TextMessage<'a> {
    pub text: &'a str,
}
