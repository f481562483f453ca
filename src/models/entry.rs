use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Unit attached to every feeding amount.
pub const FEEDING_UNIT: &str = "oz";

/// Diaper change category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiaperType {
    Pee,
    Poop,
    Both,
}

impl DiaperType {
    /// Summary fragment shown in the selection bar.
    pub fn label(&self) -> &'static str {
        match self {
            DiaperType::Pee => "💧 Pee",
            DiaperType::Poop => "💩 Poop",
            DiaperType::Both => "💧💩 Both",
        }
    }
}

impl std::fmt::Display for DiaperType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DiaperType::Pee => write!(f, "Pee"),
            DiaperType::Poop => write!(f, "Poop"),
            DiaperType::Both => write!(f, "Both"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feeding {
    pub amount: f64,
    pub unit: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diaper {
    #[serde(rename = "type")]
    pub kind: DiaperType,
}

/// The payload posted to the webhook for one logged event.
///
/// Built fresh at submission time and never persisted locally. Unselected
/// categories are omitted from the JSON entirely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feeding: Option<Feeding>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diaper: Option<Diaper>,
}

impl Entry {
    pub fn new(timestamp: DateTime<Utc>, amount: Option<f64>, diaper: Option<DiaperType>) -> Self {
        Self {
            timestamp: timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
            feeding: amount.map(|amount| Feeding {
                amount,
                unit: FEEDING_UNIT.to_string(),
            }),
            diaper: diaper.map(|kind| Diaper { kind }),
        }
    }
}
