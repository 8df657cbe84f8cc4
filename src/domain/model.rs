use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Extracted detail fields, keyed by the table's trimmed label text.
/// A sorted map keeps serialized field ordering stable across runs.
pub type FieldMap = BTreeMap<String, String>;

/// The label under which the remote table reports the unit's own name.
pub const FLAT_NO_FIELD: &str = "Flat No.";

/// One entry of a cascading select control. Placeholder entries (empty
/// value) are filtered out before a `SelectOption` is ever built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// The three levels of the dependent selection hierarchy, in descent order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    Project,
    Tower,
    Unit,
}

impl Level {
    /// The DOM id of the select element backing this level.
    pub fn select_id(self) -> &'static str {
        match self {
            Level::Project => "project",
            Level::Tower => "tower",
            Level::Unit => "unit",
        }
    }

    /// The level repopulated when an option at this level is selected.
    pub fn child(self) -> Option<Level> {
        match self {
            Level::Project => Some(Level::Tower),
            Level::Tower => Some(Level::Unit),
            Level::Unit => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AcceptedRecord {
    pub project: String,
    pub tower: String,
    pub unit: String,
    pub details: FieldMap,
}

/// Diagnostic payload of a rejected record: the extracted fields when a
/// table was parsed, otherwise the raw response or an error message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RejectDetails {
    Fields(FieldMap),
    Text(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RejectedRecord {
    pub project: String,
    pub tower: String,
    pub unit: String,
    pub reason: String,
    pub details: RejectDetails,
}

/// Final traversal counters. Accepted plus rejected equals the number of
/// leaves visited.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub accepted: u64,
    pub rejected: u64,
}

impl RunSummary {
    pub fn leaves(&self) -> u64 {
        self.accepted + self.rejected
    }
}
