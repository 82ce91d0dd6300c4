use std::collections::HashMap;

use super::modifiers::LabelModifier;
use super::MESSAGE_ID_LEN;
use crate::conf::MappingConfig;
use crate::parser::FieldMap;

/// Message id of a record: the trailing six characters of `logid`.
pub fn message_id(fields: &FieldMap) -> Option<&str> {
    let logid = fields.get("logid")?;
    let start = logid.len().checked_sub(MESSAGE_ID_LEN)?;
    logid.get(start..)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLabel {
    pub message_id: String,
    pub label: String,
}

pub struct LabelResolver {
    labels: HashMap<String, String>,
    modifiers: Vec<Box<dyn LabelModifier>>,
}

impl LabelResolver {
    pub fn new(labels: HashMap<String, String>, modifiers: Vec<Box<dyn LabelModifier>>) -> Self {
        Self { labels, modifiers }
    }

    pub fn from_config(mapping: &MappingConfig) -> Self {
        let modifiers = mapping.modifiers.iter().map(|kind| kind.build()).collect();
        Self::new(mapping.message_labels.clone(), modifiers)
    }

    pub fn modifier_names(&self) -> Vec<&'static str> {
        self.modifiers.iter().map(|m| m.name()).collect()
    }

    /// Table label overridden by the modifier chain; the last modifier
    /// returning a label wins. `None` means the record is skipped.
    pub fn resolve(&self, fields: &FieldMap) -> Option<ResolvedLabel> {
        let message_id = message_id(fields)?;

        let baseline = self.labels.get(message_id).cloned();
        let label = self.modifiers.iter().fold(baseline, |label, modifier| {
            modifier.modify_label(message_id, fields).or(label)
        })?;

        Some(ResolvedLabel {
            message_id: message_id.to_string(),
            label,
        })
    }
}
