mod classify;

pub use classify::classify;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What kind of thing a capture was recognized as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Task,
    Event,
    Note,
    Custom,
}

impl Kind {
    pub fn label(&self) -> &'static str {
        match self {
            Kind::Task => "task",
            Kind::Event => "event",
            Kind::Note => "note",
            Kind::Custom => "custom",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Kind::Task => "󰄲",
            Kind::Event => "󰃭",
            Kind::Note => "󰎞",
            Kind::Custom => "󱐋",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn label(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

/// One classified capture. Lives in the single pending slot of the app until
/// it is accepted, rejected, or replaced by the next capture. Serialized as
/// camelCase JSON for `--classify` output and as TOML for the edit round trip.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Classification {
    pub id: Uuid,
    pub original_text: String,
    pub kind: Kind,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    pub confidence: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_serializes_with_camel_case_keys() {
        let record = classify("remind me to water the plants");
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"originalText\""));
        assert!(json.contains("\"kind\":\"task\""));
        // None fields are omitted, not null
        assert!(!json.contains("dueDate"));
    }

    #[test]
    fn record_round_trips_through_toml() {
        let record = classify("todo: buy milk, urgent");
        let text = toml::to_string_pretty(&record).unwrap();
        let back: Classification = toml::from_str(&text).unwrap();
        assert_eq!(back.id, record.id);
        assert_eq!(back.title, record.title);
        assert_eq!(back.priority, Some(Priority::High));
    }
}
