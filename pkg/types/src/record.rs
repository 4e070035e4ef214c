use serde::{Deserialize, Serialize};

/// A secret store item as returned by `op item get --format json`.
///
/// Only the parts the normalizer needs are modelled; unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub version: u64,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Labeled fields in item order. Empty for list summaries.
    #[serde(default)]
    pub fields: Vec<RawField>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawField {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub value: String,
}

impl RawRecord {
    pub fn new(id: &str, title: &str) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            ..Default::default()
        }
    }

    /// Append a field, builder style. Used when assembling records by hand.
    pub fn with_field(mut self, label: &str, value: &str) -> Self {
        self.fields.push(RawField {
            id: String::new(),
            label: label.to_string(),
            value: value.to_string(),
        });
        self
    }
}
